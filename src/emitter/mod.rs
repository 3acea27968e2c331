//! GraphQL emitter (verb module)
//!
//! Transforms built requests into GraphQL document text.

mod gql;

pub use gql::{emit_arguments, emit_mutation, emit_query, emit_selection, emit_selection_set, emit_value};
