//! Filter state errors

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum StateError {
    /// No dashboard filter with that name
    UnknownField(String),
    /// Value has the wrong shape for the field
    InvalidValue { field: String, message: String },
}

impl fmt::Display for StateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateError::UnknownField(name) => write!(f, "Unknown dashboard filter '{}'", name),
            StateError::InvalidValue { field, message } => {
                write!(f, "Invalid value for dashboard filter '{}': {}", field, message)
            }
        }
    }
}

impl std::error::Error for StateError {}
