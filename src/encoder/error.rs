//! Encoder errors

use std::fmt;
use crate::query::LookupKind;

/// Errors that can occur while encoding a filter
#[derive(Debug, Clone, PartialEq)]
pub enum EncodeError {
    /// Field name is not a valid GraphQL name
    InvalidFieldName(String),
    /// Value shape does not fit the lookup
    TypeMismatch {
        field: String,
        lookup: LookupKind,
        found: &'static str,
    },
    /// Not a recognizable date or timestamp
    InvalidDate { field: String, value: String },
    /// Opaque id could not be decoded
    InvalidId { field: String, value: String },
    /// Enum value is not a GraphQL name
    InvalidEnum { field: String, value: String },
    /// Numeric lookup given a non-numeric string
    InvalidNumber { field: String, value: String },
    /// Field is not a declared filter of the entity
    UnknownFilter { entity: String, field: String },
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodeError::InvalidFieldName(name) => {
                write!(f, "Invalid filter field name '{}'", name)
            }
            EncodeError::TypeMismatch { field, lookup, found } => {
                write!(f, "Filter '{}' with lookup '{}' cannot take a {} value", field, lookup, found)
            }
            EncodeError::InvalidDate { field, value } => {
                write!(f, "Filter '{}': '{}' is not a date", field, value)
            }
            EncodeError::InvalidId { field, value } => {
                write!(f, "Filter '{}': cannot decode id '{}'", field, value)
            }
            EncodeError::InvalidEnum { field, value } => {
                write!(f, "Filter '{}': '{}' is not a valid enum value", field, value)
            }
            EncodeError::InvalidNumber { field, value } => {
                write!(f, "Filter '{}': '{}' is not a number", field, value)
            }
            EncodeError::UnknownFilter { entity, field } => {
                write!(f, "Entity '{}' has no filter '{}'", entity, field)
            }
        }
    }
}

impl std::error::Error for EncodeError {}
