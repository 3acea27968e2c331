//! Queryable entity definitions

use serde::Deserialize;

use crate::builder::QueryBuilder;
use crate::encoder::{encode_all, EncodeError};
use crate::query::{FilterInput, FilterValue, Fragment, LookupKind};

/// A queryable backend entity (beneficiary, groupBeneficiary, project, ...)
#[derive(Debug, Clone, Deserialize)]
pub struct EntityDef {
    /// Top-level query field name
    pub name: String,
    /// Response tag prefix for list queries
    pub dispatch: String,
    /// Default projection; nested relations as `relation {subfields}`
    pub fields: Vec<String>,
    #[serde(default)]
    pub filters: Vec<FilterFieldDef>,
    /// Entity is a cursor connection
    #[serde(default = "default_true")]
    pub paginated: bool,
}

/// A filterable field and how it is encoded
#[derive(Debug, Clone, Deserialize)]
pub struct FilterFieldDef {
    pub field: String,
    pub lookup: LookupKind,
    /// Always applied, e.g. `isDeleted: false`
    #[serde(default)]
    pub fixed: Option<FilterValue>,
}

fn default_true() -> bool {
    true
}

impl EntityDef {
    pub fn get_filter(&self, field: &str) -> Option<&FilterFieldDef> {
        self.filters.iter().find(|f| f.field == field)
    }

    /// Preloaded with the default projection, pagination and dispatch prefix
    pub fn query_builder(&self) -> QueryBuilder {
        QueryBuilder::new(&self.name)
            .fields(self.fields.iter().map(String::as_str))
            .paginated(self.paginated)
            .with_count(self.paginated)
            .dispatch(&self.dispatch)
    }

    /// Pair caller values with their declared lookups, plus fixed filters
    pub fn filter_inputs<'a, I>(&self, values: I) -> Result<Vec<FilterInput>, EncodeError>
    where
        I: IntoIterator<Item = (&'a str, FilterValue)>,
    {
        let mut inputs: Vec<FilterInput> = self
            .filters
            .iter()
            .filter_map(|f| f.fixed.clone().map(|v| FilterInput::new(&f.field, f.lookup, v)))
            .collect();

        for (field, value) in values {
            let def = self.get_filter(field).ok_or_else(|| EncodeError::UnknownFilter {
                entity: self.name.clone(),
                field: field.to_string(),
            })?;
            if def.fixed.is_some() {
                continue;
            }
            inputs.push(FilterInput::new(field, def.lookup, value));
        }
        Ok(inputs)
    }

    pub fn encode_filters<'a, I>(&self, values: I) -> Result<Vec<Fragment>, EncodeError>
    where
        I: IntoIterator<Item = (&'a str, FilterValue)>,
    {
        encode_all(&self.filter_inputs(values)?)
    }
}
