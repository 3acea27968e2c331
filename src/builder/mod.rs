//! Request builders (verb module)
//!
//! Compose encoded fragments and projections into queries and mutations.

mod error;
mod mutation;
mod query;

pub use error::BuildError;
pub use mutation::MutationBuilder;
pub use query::QueryBuilder;
