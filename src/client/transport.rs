//! Transport seam

use async_trait::async_trait;
use serde_json::Value;

use super::error::TransportError;
use crate::request::GraphqlPayload;

/// Posts a GraphQL body to the endpoint and returns the decoded JSON response
///
/// Authentication headers, CSRF tokens and the endpoint URL belong to the
/// implementation.
#[async_trait]
pub trait GraphqlTransport: Send + Sync {
    async fn post(&self, payload: &GraphqlPayload) -> Result<Value, TransportError>;
}

#[async_trait]
impl<T: GraphqlTransport + ?Sized> GraphqlTransport for std::sync::Arc<T> {
    async fn post(&self, payload: &GraphqlPayload) -> Result<Value, TransportError> {
        (**self).post(payload).await
    }
}
