//! Dashboard defaults

use serde::{Deserialize, Serialize};

/// Inclusive year bounds offered by the year slider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct YearRange {
    pub min: i32,
    pub max: i32,
}

impl Default for YearRange {
    fn default() -> Self {
        Self { min: 2020, max: 2030 }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct DashboardDefaults {
    #[serde(default)]
    pub year_range: YearRange,
    /// Decimal places for percentages when a panel sets none
    #[serde(default)]
    pub decimals: Option<u32>,
}
