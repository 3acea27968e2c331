//! Dashboard filter state
//!
//! A serializable filter selection with a pure transition function, cascade
//! clearing of location levels, and an active-filter count.

mod change;
mod dashboard;
mod error;

pub use change::{DateRange, FilterChange};
pub use dashboard::{
    DashboardFilterState, BENEFIT_PLAN_FIELD, DATE_FIELD, LOCATION_FIELD, STATUS_FIELD, YEAR_FIELD,
};
pub use error::StateError;
