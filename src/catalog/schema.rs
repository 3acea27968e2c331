//! Root catalog definition

use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

use crate::bulk::CsvTemplate;
use crate::encoder::is_gql_name;
use crate::error::ParseError;
use super::defaults::DashboardDefaults;
use super::entity::EntityDef;
use super::panel::PanelSpec;

fn default_endpoint() -> String {
    "/api/graphql".to_string()
}

/// Everything the query layer is configured with
#[derive(Debug, Clone, Deserialize)]
pub struct Catalog {
    /// Path of the GraphQL endpoint, relative to the API root
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default)]
    pub entities: Vec<EntityDef>,
    #[serde(default)]
    pub panels: Vec<PanelSpec>,
    #[serde(default)]
    pub dashboard: DashboardDefaults,
    #[serde(default)]
    pub csv_templates: Vec<CsvTemplate>,
}

impl Catalog {
    /// Load a catalog from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ParseError> {
        crate::parser::parse_file(path)
    }

    pub fn get_entity(&self, name: &str) -> Option<&EntityDef> {
        self.entities.iter().find(|e| e.name == name)
    }

    pub fn get_panel(&self, name: &str) -> Option<&PanelSpec> {
        self.panels.iter().find(|p| p.name == name)
    }

    pub fn get_template(&self, name: &str) -> Option<&CsvTemplate> {
        self.csv_templates.iter().find(|t| t.name == name)
    }

    /// Panels without their own `decimals` take the dashboard's
    pub(crate) fn apply_dashboard_defaults(&mut self) {
        if let Some(decimals) = self.dashboard.decimals {
            for panel in &mut self.panels {
                panel.decimals.get_or_insert(decimals);
            }
        }
    }

    /// Check the invariants serde cannot express
    pub fn validate(&self) -> Result<(), ParseError> {
        let mut names = HashSet::new();
        for entity in &self.entities {
            if !is_gql_name(&entity.name) {
                return Err(invalid(format!("entity name '{}' is not a GraphQL name", entity.name)));
            }
            if !names.insert(entity.name.as_str()) {
                return Err(invalid(format!("duplicate entity '{}'", entity.name)));
            }
            if entity.fields.is_empty() {
                return Err(invalid(format!("entity '{}' has no fields", entity.name)));
            }
            if entity.dispatch.trim().is_empty() {
                return Err(invalid(format!("entity '{}' has no dispatch prefix", entity.name)));
            }
            for filter in &entity.filters {
                if !is_gql_name(&filter.field) {
                    return Err(invalid(format!(
                        "filter '{}' of entity '{}' is not a GraphQL name",
                        filter.field, entity.name
                    )));
                }
            }
        }

        let mut panels = HashSet::new();
        for panel in &self.panels {
            if !panels.insert(panel.name.as_str()) {
                return Err(invalid(format!("duplicate panel '{}'", panel.name)));
            }
            if panel.needs_category() && panel.category.is_none() {
                return Err(invalid(format!("{} panel '{}' needs a category", panel.kind, panel.name)));
            }
            if panel.needs_series() && panel.series.as_deref().map_or(true, |s| s.trim().is_empty()) {
                return Err(invalid(format!("{} panel '{}' needs a series key", panel.kind, panel.name)));
            }
            if panel.values.is_empty() {
                return Err(invalid(format!("panel '{}' has no values", panel.name)));
            }
        }

        for template in &self.csv_templates {
            if template.headers.is_empty() {
                return Err(invalid(format!("csv template '{}' has no headers", template.name)));
            }
        }

        let years = self.dashboard.year_range;
        if years.min > years.max {
            return Err(invalid(format!("year range {}..{} is empty", years.min, years.max)));
        }
        Ok(())
    }
}

fn invalid(msg: String) -> ParseError {
    ParseError::InvalidCatalog(msg)
}
