//! Encoded filter fragments: typed GraphQL arguments

use serde_json::{Map, Value};

/// A GraphQL input literal
///
/// String content is kept raw here; escaping happens when the literal is
/// written out by the emitter.
#[derive(Debug, Clone, PartialEq)]
pub enum GqlValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    /// Enum value, emitted unquoted
    Enum(String),
    List(Vec<GqlValue>),
    Object(Vec<Argument>),
}

impl GqlValue {
    /// JSON form, used for the `variables` side of a payload
    pub fn to_json(&self) -> Value {
        match self {
            GqlValue::Null => Value::Null,
            GqlValue::Bool(b) => Value::Bool(*b),
            GqlValue::Int(i) => Value::from(*i),
            GqlValue::Float(f) => Value::from(*f),
            GqlValue::String(s) | GqlValue::Enum(s) => Value::String(s.clone()),
            GqlValue::List(items) => Value::Array(items.iter().map(GqlValue::to_json).collect()),
            GqlValue::Object(fields) => Value::Object(arguments_to_map(fields)),
        }
    }
}

/// `name: value`
#[derive(Debug, Clone, PartialEq)]
pub struct Argument {
    pub name: String,
    pub value: GqlValue,
}

impl Argument {
    pub fn new(name: impl Into<String>, value: GqlValue) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// The encoded form of one filter field: one or more arguments
///
/// Never empty; a filter that encodes to nothing is represented by `None`
/// at the encoder boundary instead.
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    arguments: Vec<Argument>,
}

impl Fragment {
    /// Returns `None` for an empty argument list
    pub fn new(arguments: Vec<Argument>) -> Option<Self> {
        if arguments.is_empty() {
            None
        } else {
            Some(Self { arguments })
        }
    }

    pub fn single(argument: Argument) -> Self {
        Self {
            arguments: vec![argument],
        }
    }

    pub fn arguments(&self) -> &[Argument] {
        &self.arguments
    }

    /// Inline form: `a: 1, b_Gte: "2023-01-01"`
    pub fn render(&self) -> String {
        crate::emitter::emit_arguments(&self.arguments)
    }
}

fn arguments_to_map(arguments: &[Argument]) -> Map<String, Value> {
    arguments
        .iter()
        .map(|a| (a.name.clone(), a.value.to_json()))
        .collect()
}
