//! Catalog types (nouns)
//!
//! Configuration loaded from YAML: entities, panels, dashboard defaults and
//! CSV templates.

mod defaults;
mod entity;
mod panel;
mod schema;

pub use defaults::{DashboardDefaults, YearRange};
pub use entity::{EntityDef, FilterFieldDef};
pub use panel::{PanelKind, PanelSpec, ParsePanelKindError};
pub use schema::Catalog;
