//! GraphQL client
//!
//! An async transport seam plus a client that validates locally, posts, and
//! maps `errors[0]` to a typed error.

mod client;
mod error;
mod transport;

pub use client::Client;
pub use error::{ClientError, GraphqlError, TransportError};
pub use transport::GraphqlTransport;
