//! Raw filter values as they come out of UI state

use serde::{Deserialize, Serialize};
use super::lookup::LookupKind;

/// A raw filter value before encoding
///
/// Deserializes from plain JSON: `null`, scalars, arrays and
/// `{"start": .., "end": ..}` objects.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum FilterValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    List(Vec<FilterValue>),
    Range(RangeValue),
}

/// Lower/upper bounds; either side may be open
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct RangeValue {
    #[serde(default)]
    pub start: Option<Box<FilterValue>>,
    #[serde(default)]
    pub end: Option<Box<FilterValue>>,
}

impl FilterValue {
    pub fn range(start: Option<FilterValue>, end: Option<FilterValue>) -> Self {
        FilterValue::Range(RangeValue {
            start: start.map(Box::new),
            end: end.map(Box::new),
        })
    }

    /// Null, an empty list, or a range with no bounds
    pub fn is_empty(&self) -> bool {
        match self {
            FilterValue::Null => true,
            FilterValue::List(items) => items.is_empty(),
            FilterValue::Range(range) => range.is_unbounded(),
            _ => false,
        }
    }

    /// Short name of the value's shape, for error messages
    pub fn kind_name(&self) -> &'static str {
        match self {
            FilterValue::Null => "null",
            FilterValue::Bool(_) => "bool",
            FilterValue::Int(_) => "int",
            FilterValue::Float(_) => "float",
            FilterValue::Text(_) => "string",
            FilterValue::List(_) => "list",
            FilterValue::Range(_) => "range",
        }
    }
}

impl RangeValue {
    /// Both bounds missing or null
    pub fn is_unbounded(&self) -> bool {
        let open = |b: &Option<Box<FilterValue>>| b.as_deref().map_or(true, FilterValue::is_empty);
        open(&self.start) && open(&self.end)
    }
}

impl From<&str> for FilterValue {
    fn from(s: &str) -> Self {
        FilterValue::Text(s.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(s: String) -> Self {
        FilterValue::Text(s)
    }
}

impl From<i64> for FilterValue {
    fn from(i: i64) -> Self {
        FilterValue::Int(i)
    }
}

impl From<i32> for FilterValue {
    fn from(i: i32) -> Self {
        FilterValue::Int(i64::from(i))
    }
}

impl From<f64> for FilterValue {
    fn from(f: f64) -> Self {
        FilterValue::Float(f)
    }
}

impl From<bool> for FilterValue {
    fn from(b: bool) -> Self {
        FilterValue::Bool(b)
    }
}

impl<T: Into<FilterValue>> From<Vec<T>> for FilterValue {
    fn from(items: Vec<T>) -> Self {
        FilterValue::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<FilterValue>> From<Option<T>> for FilterValue {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(FilterValue::Null, Into::into)
    }
}

/// One named filter as supplied by a caller
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FilterInput {
    pub field: String,
    pub lookup: LookupKind,
    pub value: FilterValue,
}

impl FilterInput {
    pub fn new(field: impl Into<String>, lookup: LookupKind, value: impl Into<FilterValue>) -> Self {
        Self {
            field: field.into(),
            lookup,
            value: value.into(),
        }
    }
}
