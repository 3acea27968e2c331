//! Filter encoder (verb module)
//!
//! Transforms raw filter values into typed query fragments.

mod encode;
mod error;
mod escape;
mod id;

pub use encode::{encode, encode_all, truncate_date};
pub use error::EncodeError;
pub use escape::{escape_gql_string, is_gql_name, quote_gql_string};
pub use id::{decode_id, encode_id};
