//! Catalog loading errors

use std::fmt;

/// Why a catalog could not be loaded
#[derive(Debug)]
pub enum ParseError {
    /// The catalog file could not be read
    Read {
        path: String,
        source: std::io::Error,
    },
    /// The catalog is not well-formed YAML, or a value has the wrong shape
    /// (unknown lookup, non-numeric year, ...)
    Yaml(serde_yaml::Error),
    /// Well-formed, but breaks a cross-entry rule such as duplicate
    /// entity names or a panel missing its category key
    InvalidCatalog(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Read { path, source } => write!(f, "Cannot read catalog '{}': {}", path, source),
            ParseError::Yaml(source) => write!(f, "Malformed catalog: {}", source),
            ParseError::InvalidCatalog(msg) => write!(f, "Invalid catalog: {}", msg),
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::Read { source, .. } => Some(source),
            ParseError::Yaml(source) => Some(source),
            ParseError::InvalidCatalog(_) => None,
        }
    }
}

impl From<serde_yaml::Error> for ParseError {
    fn from(err: serde_yaml::Error) -> Self {
        ParseError::Yaml(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_read_error_names_the_catalog() {
        let err = ParseError::Read {
            path: "catalog.yaml".into(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert_eq!(err.to_string(), "Cannot read catalog 'catalog.yaml': gone");
        assert!(err.source().is_some());
    }

    #[test]
    fn test_invalid_catalog_has_no_source() {
        let err = ParseError::InvalidCatalog("duplicate entity 'beneficiary'".into());
        assert_eq!(err.to_string(), "Invalid catalog: duplicate entity 'beneficiary'");
        assert!(err.source().is_none());
    }
}
