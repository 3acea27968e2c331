//! One response slice

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::GraphqlError;

/// Cursor state of a connection
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    #[serde(default)]
    pub has_next_page: bool,
    #[serde(default)]
    pub has_previous_page: bool,
    #[serde(default)]
    pub start_cursor: Option<String>,
    #[serde(default)]
    pub end_cursor: Option<String>,
}

/// Request lifecycle and last result for one tag prefix
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Slice {
    pub fetching: bool,
    pub fetched: bool,
    pub data: Option<Value>,
    pub total_count: Option<u64>,
    pub page_info: Option<PageInfo>,
    pub error: Option<GraphqlError>,
}

impl Slice {
    pub(crate) fn begin(&mut self) {
        self.fetching = true;
        self.fetched = false;
        self.error = None;
    }

    pub(crate) fn succeed(&mut self, payload: Value) {
        let connection = connection_of(&payload);
        self.total_count = connection.and_then(|c| c.get("totalCount")).and_then(Value::as_u64);
        self.page_info = connection
            .and_then(|c| c.get("pageInfo"))
            .and_then(|p| serde_json::from_value(p.clone()).ok());
        self.fetching = false;
        self.fetched = true;
        self.error = None;
        self.data = Some(payload);
    }

    pub(crate) fn fail(&mut self, payload: &Value) {
        let error = serde_json::from_value(payload.clone())
            .unwrap_or_else(|_| GraphqlError::new(payload.to_string()));
        self.fetching = false;
        self.fetched = false;
        self.error = Some(error);
    }

    /// Nodes of the stored connection, or the stored array
    pub fn records(&self) -> Vec<&Value> {
        let Some(data) = &self.data else {
            return Vec::new();
        };
        let target = connection_of(data).unwrap_or(data);
        crate::aggregator::nodes(target, "")
    }
}

/// The connection object carried by a payload
///
/// Either the payload itself or its single top-level field.
fn connection_of(payload: &Value) -> Option<&Value> {
    let map = payload.as_object()?;
    if map.contains_key("totalCount") || map.contains_key("pageInfo") || map.contains_key("edges") {
        return Some(payload);
    }
    match map.values().next() {
        Some(inner) if map.len() == 1 && inner.is_object() => Some(inner),
        _ => None,
    }
}
