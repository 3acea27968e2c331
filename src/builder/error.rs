//! Builder errors

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum BuildError {
    /// Entity or operation name missing or not a GraphQL name
    InvalidName(String),
    /// No fields requested
    EmptyProjection,
    /// No response tag prefix declared
    MissingDispatch,
    /// Two arguments with the same name
    DuplicateArgument(String),
    /// Argument name the builder sets itself
    ReservedArgument(String),
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildError::InvalidName(name) => write!(f, "Invalid entity or operation name '{}'", name),
            BuildError::EmptyProjection => write!(f, "Query must request at least one field"),
            BuildError::MissingDispatch => write!(f, "Request has no response tag prefix"),
            BuildError::DuplicateArgument(name) => write!(f, "Argument '{}' is set more than once", name),
            BuildError::ReservedArgument(name) => write!(f, "Argument '{}' is reserved", name),
        }
    }
}

impl std::error::Error for BuildError {}
