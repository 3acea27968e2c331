//! Request types (nouns)
//!
//! Built queries and mutations, their projections and dispatch tags.

mod request;
mod selection;
mod tags;

pub use request::{GraphqlPayload, MutationRequest, Page, QueryRequest};
pub use selection::Selection;
pub use tags::{Dispatch, ResponseTags, CLEAR_SUFFIX, ERROR_SUFFIX, REQUEST_SUFFIX, SUCCESS_SUFFIX};
