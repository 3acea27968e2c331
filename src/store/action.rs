//! Actions dispatched against the store

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::GraphqlError;
use crate::request::{ResponseTags, CLEAR_SUFFIX, ERROR_SUFFIX, REQUEST_SUFFIX, SUCCESS_SUFFIX};

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Action {
    pub tag: String,
    #[serde(default)]
    pub payload: Value,
}

/// Phase of an operation, read from the tag suffix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Request,
    Success,
    Error,
    Clear,
}

impl Action {
    pub fn new(tag: impl Into<String>, payload: Value) -> Self {
        Self {
            tag: tag.into(),
            payload,
        }
    }

    pub fn request(tags: &ResponseTags) -> Self {
        Self::new(&tags.request, Value::Null)
    }

    pub fn success(tags: &ResponseTags, payload: Value) -> Self {
        Self::new(&tags.success, payload)
    }

    pub fn error(tags: &ResponseTags, error: &GraphqlError) -> Self {
        let payload = serde_json::to_value(error).unwrap_or(Value::Null);
        Self::new(&tags.error, payload)
    }

    pub fn clear(tags: &ResponseTags) -> Self {
        Self::new(&tags.clear, Value::Null)
    }

    /// Split the tag into prefix and phase
    pub fn route(&self) -> Option<(&str, Phase)> {
        [
            (REQUEST_SUFFIX, Phase::Request),
            (SUCCESS_SUFFIX, Phase::Success),
            (ERROR_SUFFIX, Phase::Error),
            (CLEAR_SUFFIX, Phase::Clear),
        ]
        .into_iter()
        .find_map(|(suffix, phase)| self.tag.strip_suffix(suffix).map(|prefix| (prefix, phase)))
    }
}
