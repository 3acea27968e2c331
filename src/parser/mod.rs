//! Catalog parser (verb module)
//!
//! Transforms YAML files into a validated `Catalog`.

use std::path::Path;
use tracing::debug;

use crate::catalog::Catalog;
use crate::error::ParseError;

/// Parse a catalog from a YAML file
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Catalog, ParseError> {
    let path_str = path.as_ref().display().to_string();
    let contents = std::fs::read_to_string(&path).map_err(|e| ParseError::Read {
        path: path_str.clone(),
        source: e,
    })?;
    debug!(target: "spquery::parser", path = %path_str, "parsing catalog");
    parse_str(&contents)
}

/// Parse a catalog from a YAML string
pub fn parse_str(yaml: &str) -> Result<Catalog, ParseError> {
    let mut catalog: Catalog = serde_yaml::from_str(yaml)?;
    catalog.validate()?;
    catalog.apply_dashboard_defaults();
    Ok(catalog)
}
