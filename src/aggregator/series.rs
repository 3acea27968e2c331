//! Chart-ready outputs

use serde::Serialize;
use std::collections::BTreeMap;

/// Either a result or the explicit "no data" sentinel
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum Aggregated<T> {
    Data(T),
    NoData,
}

impl<T> Aggregated<T> {
    pub fn is_no_data(&self) -> bool {
        matches!(self, Aggregated::NoData)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Aggregated::Data(t) => Some(t),
            Aggregated::NoData => None,
        }
    }
}

/// One named row of values aligned with the categories
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub name: String,
    pub data: Vec<f64>,
}

/// Categories plus dense series
///
/// Every series has exactly one value per category.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct AggregatedSeries {
    pub categories: Vec<String>,
    pub series: Vec<Series>,
}

impl AggregatedSeries {
    pub fn get(&self, name: &str) -> Option<&Series> {
        self.series.iter().find(|s| s.name == name)
    }

    /// Value of `series` at `category`, if both exist
    pub fn value(&self, series: &str, category: &str) -> Option<f64> {
        let idx = self.categories.iter().position(|c| c == category)?;
        self.get(series)?.data.get(idx).copied()
    }

    pub fn is_aligned(&self) -> bool {
        self.series.iter().all(|s| s.data.len() == self.categories.len())
    }
}

/// Category counts with their shares of the total
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Breakdown {
    /// Raw category keys as they appear in the response
    pub keys: Vec<String>,
    /// Display labels, parallel to `keys`
    pub categories: Vec<String>,
    pub data: Vec<f64>,
    pub percentages: Vec<f64>,
    pub total: f64,
}

impl Breakdown {
    /// Share of a category, looked up by raw key or label
    pub fn share_of(&self, key_or_label: &str) -> Option<f64> {
        let idx = self
            .keys
            .iter()
            .position(|k| k == key_or_label)
            .or_else(|| self.categories.iter().position(|c| c == key_or_label))?;
        self.percentages.get(idx).copied()
    }
}

/// Totals over a set of records
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Summary {
    pub count: usize,
    pub totals: BTreeMap<String, f64>,
}

/// What a panel aggregation produces
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PanelOutput {
    Series(AggregatedSeries),
    Breakdown(Breakdown),
    Summary(Summary),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_lookup() {
        let s = AggregatedSeries {
            categories: vec!["Bubanza".into(), "Gitega".into()],
            series: vec![Series {
                name: "paid".into(),
                data: vec![10.0, 0.0],
            }],
        };
        assert!(s.is_aligned());
        assert_eq!(s.value("paid", "Gitega"), Some(0.0));
        assert_eq!(s.value("unpaid", "Gitega"), None);
    }

    #[test]
    fn test_no_data_serializes_with_status() {
        let v: Aggregated<Summary> = Aggregated::NoData;
        assert_eq!(serde_json::to_value(&v).unwrap(), serde_json::json!({"status": "no_data"}));
    }
}
