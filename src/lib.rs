//! spquery - Filter encoding, GraphQL query assembly and dashboard aggregation
//! for social protection beneficiary management
//!
//! This library provides:
//! - Typed filter values and their encoding into GraphQL argument fragments
//! - Query and mutation builders with response-tag dispatch
//! - Aggregation of raw responses into chart-ready series and breakdowns
//! - Bulk status updates and file upload validation
//! - Dashboard filter state with cascading location levels
//! - A catalog of entities and panels loaded from YAML
//!
//! # Architecture
//!
//! **Noun modules** (data structures):
//! - `query/` - filter inputs, lookup kinds, GraphQL values and fragments
//! - `request/` - built queries and mutations, selections, response tags
//! - `catalog/` - entities, panels, dashboard defaults
//! - `state/` - dashboard filter state and changes
//! - `store/` - response slices keyed by tag prefix
//!
//! **Verb modules** (transformations):
//! - `parser/` - YAML → Catalog
//! - `encoder/` - FilterInput → Fragment
//! - `builder/` - Fragments + projection → QueryRequest / MutationRequest
//! - `emitter/` - request → GraphQL document text
//! - `aggregator/` - raw response + PanelSpec → series
//! - `bulk/` - selections and uploads → validated mutations
//! - `client/` - requests → transport → data or typed errors
//!
//! # Example
//!
//! ```ignore
//! use spquery::{parser, DashboardFilterState, FilterChange};
//!
//! let catalog = parser::parse_file("catalog.yaml")?;
//! let state = DashboardFilterState::new(&catalog.dashboard)
//!     .apply(FilterChange::Provinces(vec!["12".into()]));
//! let fragments = spquery::encode_all(&state.to_filter_inputs())?;
//! let request = catalog.get_entity("beneficiary").unwrap()
//!     .query_builder()
//!     .filters(fragments)
//!     .with_count(true)
//!     .build()?;
//! let data = client.fetch(&request).await?;
//! let panel = spquery::aggregate(Some(&data), catalog.get_panel("beneficiaries_by_gender").unwrap());
//! ```

pub mod query;
pub mod request;
pub mod catalog;
pub mod state;
pub mod store;
pub mod parser;
pub mod encoder;
pub mod builder;
pub mod emitter;
pub mod aggregator;
pub mod bulk;
pub mod client;
pub mod error;

// Re-export commonly used types
pub use query::{Argument, FilterInput, FilterValue, Fragment, GqlValue, LookupKind, RangeValue};
pub use request::{Dispatch, GraphqlPayload, MutationRequest, Page, QueryRequest, ResponseTags, Selection};
pub use catalog::{Catalog, DashboardDefaults, EntityDef, PanelKind, PanelSpec, YearRange};
pub use state::{DashboardFilterState, DateRange, FilterChange, StateError};
pub use store::{Action, ResponseStore, Slice};
pub use encoder::{encode, encode_all, EncodeError};
pub use builder::{BuildError, MutationBuilder, QueryBuilder};
pub use aggregator::{aggregate, Aggregated, AggregatedSeries, Breakdown, PanelOutput, Series, Summary};
pub use bulk::{BeneficiaryStatus, BulkUpdateRequest, CsvTemplate, StatusUploadSubmission, UploadedFile, ValidationError};
pub use client::{Client, ClientError, GraphqlError, GraphqlTransport, TransportError};
pub use error::ParseError;
