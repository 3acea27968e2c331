//! Record extraction from raw responses

use serde_json::Value;
use super::numeric::value_at;

/// Strip the `{"data": ...}` envelope if present
pub fn unwrap_data(response: &Value) -> &Value {
    match response.get("data") {
        Some(data) if data.is_object() => data,
        _ => response,
    }
}

/// Records found at `path`
///
/// Connections (`{edges: [{node}]}`) and edge lists are flattened to their
/// nodes, plain arrays are returned as-is, and a single object counts as one
/// record. Anything missing yields no records.
pub fn nodes<'a>(response: &'a Value, path: &str) -> Vec<&'a Value> {
    let Some(target) = value_at(response, path) else {
        return Vec::new();
    };

    match target {
        Value::Array(items) => items.iter().map(edge_node).collect(),
        Value::Object(map) => match map.get("edges") {
            Some(Value::Array(edges)) => edges.iter().map(edge_node).collect(),
            Some(_) => Vec::new(),
            None => vec![target],
        },
        _ => Vec::new(),
    }
}

fn edge_node(item: &Value) -> &Value {
    match item.get("node") {
        Some(node) if node.is_object() => node,
        _ => item,
    }
}

/// Category key as text; missing or null becomes `unknown`
pub fn category_at(record: &Value, path: &str) -> String {
    match value_at(record, path) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => UNKNOWN_CATEGORY.to_string(),
    }
}

pub const UNKNOWN_CATEGORY: &str = "unknown";
