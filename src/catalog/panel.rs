//! Dashboard panel definitions

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// How a panel reshapes its records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelKind {
    /// One value per category with shares of the total
    Breakdown,
    /// Category × series matrix, densely aligned
    Grouped,
    /// Several value fields per category, one series each
    Measures,
    /// Running totals over period-ordered records
    Cumulative,
    /// Sums over all records
    Total,
}

impl fmt::Display for PanelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PanelKind::Breakdown => write!(f, "breakdown"),
            PanelKind::Grouped => write!(f, "grouped"),
            PanelKind::Measures => write!(f, "measures"),
            PanelKind::Cumulative => write!(f, "cumulative"),
            PanelKind::Total => write!(f, "total"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ParsePanelKindError {
    pub input: String,
}

impl fmt::Display for ParsePanelKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown panel kind '{}'. Valid options: breakdown, grouped, measures, cumulative, total", self.input)
    }
}

impl std::error::Error for ParsePanelKindError {}

impl FromStr for PanelKind {
    type Err = ParsePanelKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "breakdown" => Ok(PanelKind::Breakdown),
            "grouped" | "stacked" => Ok(PanelKind::Grouped),
            "measures" => Ok(PanelKind::Measures),
            "cumulative" => Ok(PanelKind::Cumulative),
            "total" | "summary" => Ok(PanelKind::Total),
            _ => Err(ParsePanelKindError { input: s.to_string() }),
        }
    }
}

impl<'de> Deserialize<'de> for PanelKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        PanelKind::from_str(&s).map_err(serde::de::Error::custom)
    }
}

impl Serialize for PanelKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// One dashboard panel: where its records live and how to reshape them
#[derive(Debug, Clone, Deserialize)]
pub struct PanelSpec {
    pub name: String,
    pub kind: PanelKind,
    /// Dotted path to the records inside `data`
    pub path: String,
    /// Category (or period, for cumulative panels) key
    #[serde(default)]
    pub category: Option<String>,
    /// Series key for grouped panels
    #[serde(default)]
    pub series: Option<String>,
    /// Value keys; the first is used where a single value is expected
    #[serde(default = "default_values")]
    pub values: Vec<String>,
    /// Raw key → display label
    #[serde(default)]
    pub labels: HashMap<String, String>,
    #[serde(default)]
    pub decimals: Option<u32>,
}

fn default_values() -> Vec<String> {
    vec!["count".to_string()]
}

impl PanelSpec {
    /// Build a panel in code; `values` defaults to `count`
    pub fn new(name: impl Into<String>, kind: PanelKind, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            path: path.into(),
            category: None,
            series: None,
            values: default_values(),
            labels: HashMap::new(),
            decimals: None,
        }
    }

    pub fn with_category(mut self, key: impl Into<String>) -> Self {
        self.category = Some(key.into());
        self
    }

    pub fn with_series(mut self, key: impl Into<String>) -> Self {
        self.series = Some(key.into());
        self
    }

    pub fn with_values<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.values = keys.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_label(mut self, key: impl Into<String>, label: impl Into<String>) -> Self {
        self.labels.insert(key.into(), label.into());
        self
    }

    pub fn with_decimals(mut self, decimals: u32) -> Self {
        self.decimals = Some(decimals);
        self
    }

    pub fn value_key(&self) -> &str {
        self.values.first().map(String::as_str).unwrap_or("count")
    }

    pub fn label_for<'a>(&'a self, key: &'a str) -> &'a str {
        self.labels.get(key).map(String::as_str).unwrap_or(key)
    }

    /// Kinds that need a category key
    pub fn needs_category(&self) -> bool {
        !matches!(self.kind, PanelKind::Total)
    }

    /// Kinds that split values into series by a record key
    pub fn needs_series(&self) -> bool {
        matches!(self.kind, PanelKind::Grouped)
    }
}
