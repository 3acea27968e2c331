//! Response aggregator (verb module)
//!
//! Transforms raw GraphQL responses into chart-ready series, breakdowns and
//! summaries. Missing data is absorbed: absent arrays are empty, absent
//! numbers are 0, and zero totals give 0% shares.

mod aggregate;
mod extract;
mod numeric;
mod series;

pub use aggregate::{aggregate, breakdown, grouped, measures, period_series, summary};
pub use extract::{category_at, nodes, unwrap_data, UNKNOWN_CATEGORY};
pub use numeric::{cumulative, number_at, percentage, round_to, sum_field, value_at, DEFAULT_DECIMALS};
pub use series::{Aggregated, AggregatedSeries, Breakdown, PanelOutput, Series, Summary};
