//! Client errors

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::builder::BuildError;
use crate::bulk::ValidationError;

/// Failure below the GraphQL layer, reported by the transport
#[derive(Debug, Clone, PartialEq)]
pub enum TransportError {
    /// Connection, timeout, TLS
    Network(String),
    /// Non-success HTTP status
    Status { code: u16, body: String },
    /// Body was not a JSON object
    InvalidResponse(String),
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::Network(msg) => write!(f, "Network error: {}", msg),
            TransportError::Status { code, body } => write!(f, "HTTP {}: {}", code, body),
            TransportError::InvalidResponse(msg) => write!(f, "Invalid response: {}", msg),
        }
    }
}

impl std::error::Error for TransportError {}

/// Error surfaced to the user for a failed operation
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct GraphqlError {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl GraphqlError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Default::default()
        }
    }

    /// The first entry of a response's `errors` array, if any
    pub fn from_response(response: &Value) -> Option<Self> {
        let first = response.get("errors")?.as_array()?.first()?;
        let message = first
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("Unknown error")
            .to_string();
        let extensions = first.get("extensions");
        let text = |key: &str| {
            extensions
                .and_then(|e| e.get(key))
                .and_then(|v| match v {
                    Value::String(s) => Some(s.clone()),
                    Value::Null => None,
                    other => Some(other.to_string()),
                })
        };
        Some(Self {
            message,
            code: text("code"),
            detail: text("detail"),
        })
    }
}

impl fmt::Display for GraphqlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(code) = &self.code {
            write!(f, " ({})", code)?;
        }
        if let Some(detail) = &self.detail {
            write!(f, ": {}", detail)?;
        }
        Ok(())
    }
}

impl std::error::Error for GraphqlError {}

impl From<TransportError> for GraphqlError {
    fn from(e: TransportError) -> Self {
        let code = match &e {
            TransportError::Status { code, .. } => Some(code.to_string()),
            _ => None,
        };
        Self {
            message: e.to_string(),
            code,
            detail: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ClientError {
    /// Rejected locally, nothing was sent
    Validation(ValidationError),
    /// Request could not be assembled, nothing was sent
    Build(BuildError),
    /// Server or transport reported a failure
    Graphql(GraphqlError),
}

impl ClientError {
    /// Whether the request reached the transport
    pub fn was_sent(&self) -> bool {
        matches!(self, ClientError::Graphql(_))
    }
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::Validation(e) => write!(f, "{}", e),
            ClientError::Build(e) => write!(f, "{}", e),
            ClientError::Graphql(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ClientError::Validation(e) => Some(e),
            ClientError::Build(e) => Some(e),
            ClientError::Graphql(e) => Some(e),
        }
    }
}

impl From<ValidationError> for ClientError {
    fn from(e: ValidationError) -> Self {
        ClientError::Validation(e)
    }
}

impl From<BuildError> for ClientError {
    fn from(e: BuildError) -> Self {
        ClientError::Build(e)
    }
}

impl From<GraphqlError> for ClientError {
    fn from(e: GraphqlError) -> Self {
        ClientError::Graphql(e)
    }
}

impl From<TransportError> for ClientError {
    fn from(e: TransportError) -> Self {
        ClientError::Graphql(e.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_first_error_extracted() {
        let response = json!({
            "errors": [
                {"message": "Permission denied", "extensions": {"code": "FORBIDDEN", "detail": "beneficiary.update"}},
                {"message": "second"}
            ]
        });
        let err = GraphqlError::from_response(&response).unwrap();
        assert_eq!(err.message, "Permission denied");
        assert_eq!(err.code.as_deref(), Some("FORBIDDEN"));
        assert_eq!(err.detail.as_deref(), Some("beneficiary.update"));
        assert_eq!(err.to_string(), "Permission denied (FORBIDDEN): beneficiary.update");
    }

    #[test]
    fn test_no_errors() {
        assert_eq!(GraphqlError::from_response(&json!({"data": {}})), None);
        assert_eq!(GraphqlError::from_response(&json!({"errors": []})), None);
    }

    #[test]
    fn test_transport_error_becomes_graphql_error() {
        let err: ClientError = TransportError::Status { code: 502, body: "Bad Gateway".into() }.into();
        match err {
            ClientError::Graphql(e) => {
                assert_eq!(e.code.as_deref(), Some("502"));
                assert_eq!(e.message, "HTTP 502: Bad Gateway");
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
