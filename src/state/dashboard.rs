//! Dashboard filter state and its transition function

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::bulk::BeneficiaryStatus;
use crate::catalog::{DashboardDefaults, YearRange};
use crate::query::{FilterInput, FilterValue, LookupKind};
use super::change::{DateRange, FilterChange};
use super::error::StateError;

pub const LOCATION_FIELD: &str = "location";
pub const BENEFIT_PLAN_FIELD: &str = "benefitPlan";
pub const YEAR_FIELD: &str = "year";
pub const DATE_FIELD: &str = "date";
pub const STATUS_FIELD: &str = "status";

/// Filters shared by every panel of a dashboard
///
/// Invariants: `communes` is empty unless exactly one province is selected,
/// and `collines` is empty unless exactly one commune is selected. The only
/// way to change a state is `apply`, which returns a new one.
///
/// Serializes as a flat camelCase object. Deserializing replays the stored
/// selections through `apply`, so a snapshot that breaks the location
/// invariants loses the offending child levels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "StateSnapshot", from = "StateSnapshot")]
pub struct DashboardFilterState {
    provinces: Vec<String>,
    communes: Vec<String>,
    collines: Vec<String>,
    benefit_plan: Option<String>,
    year: Option<i32>,
    date_range: Option<DateRange>,
    status: Vec<BeneficiaryStatus>,
    year_range: YearRange,
    default_year_range: YearRange,
}

impl Default for DashboardFilterState {
    fn default() -> Self {
        Self::new(&DashboardDefaults::default())
    }
}

impl DashboardFilterState {
    pub fn new(defaults: &DashboardDefaults) -> Self {
        Self {
            provinces: Vec::new(),
            communes: Vec::new(),
            collines: Vec::new(),
            benefit_plan: None,
            year: None,
            date_range: None,
            status: Vec::new(),
            year_range: defaults.year_range,
            default_year_range: defaults.year_range,
        }
    }

    pub fn provinces(&self) -> &[String] {
        &self.provinces
    }

    pub fn communes(&self) -> &[String] {
        &self.communes
    }

    pub fn collines(&self) -> &[String] {
        &self.collines
    }

    pub fn benefit_plan(&self) -> Option<&str> {
        self.benefit_plan.as_deref()
    }

    pub fn year(&self) -> Option<i32> {
        self.year
    }

    pub fn date_range(&self) -> Option<DateRange> {
        self.date_range
    }

    pub fn status(&self) -> &[BeneficiaryStatus] {
        &self.status
    }

    pub fn year_range(&self) -> YearRange {
        self.year_range
    }

    /// Pure transition with cascade clearing
    pub fn apply(&self, change: FilterChange) -> Self {
        let mut next = self.clone();
        match change {
            FilterChange::Provinces(provinces) => {
                let provinces = dedup(provinces);
                if !same_single(&self.provinces, &provinces) {
                    next.communes.clear();
                    next.collines.clear();
                }
                next.provinces = provinces;
            }
            FilterChange::Communes(communes) => {
                if self.provinces.len() != 1 && !communes.is_empty() {
                    warn!(target: "spquery::state", "ignoring commune selection without a single province");
                    return next;
                }
                let communes = dedup(communes);
                if !same_single(&self.communes, &communes) {
                    next.collines.clear();
                }
                next.communes = communes;
            }
            FilterChange::Collines(collines) => {
                if self.communes.len() != 1 && !collines.is_empty() {
                    warn!(target: "spquery::state", "ignoring colline selection without a single commune");
                    return next;
                }
                next.collines = dedup(collines);
            }
            FilterChange::BenefitPlan(plan) => next.benefit_plan = plan.filter(|p| !p.is_empty()),
            FilterChange::Year(year) => next.year = year,
            FilterChange::DateRange(range) => next.date_range = range.filter(DateRange::is_set),
            FilterChange::Status(status) => next.status = dedup(status),
            FilterChange::YearRange(range) => next.year_range = range,
        }
        next
    }

    /// `apply` from a field name and JSON value
    pub fn apply_field(&self, field: &str, value: &Value) -> Result<Self, StateError> {
        Ok(self.apply(FilterChange::from_field(field, value)?))
    }

    /// Number of active filters
    ///
    /// List filters count their elements; benefit plan, year, a date range
    /// with any bound, and a non-default year range count 1 each.
    pub fn count_active(&self) -> usize {
        let lists = self.provinces.len() + self.communes.len() + self.collines.len() + self.status.len();
        let scalars = [
            self.benefit_plan.is_some(),
            self.year.is_some(),
            self.date_range.map_or(false, |r| r.is_set()),
            self.year_range != self.default_year_range,
        ];
        lists + scalars.iter().filter(|set| **set).count()
    }

    /// The default state, whatever the current one
    pub fn clear_all(&self) -> Self {
        Self::new(&DashboardDefaults {
            year_range: self.default_year_range,
            ..Default::default()
        })
    }

    /// Read-only filter snapshot for the encoder
    ///
    /// Only the deepest selected location level is sent.
    pub fn to_filter_inputs(&self) -> Vec<FilterInput> {
        let mut inputs = Vec::new();

        let location = [&self.collines, &self.communes, &self.provinces]
            .into_iter()
            .find(|level| !level.is_empty());
        if let Some(level) = location {
            let ids: Vec<FilterValue> = level.iter().map(|id| id_value(id)).collect();
            inputs.push(FilterInput::new(LOCATION_FIELD, LookupKind::IdIn, FilterValue::List(ids)));
        }
        if let Some(plan) = &self.benefit_plan {
            inputs.push(FilterInput::new(BENEFIT_PLAN_FIELD, LookupKind::Id, id_value(plan)));
        }
        if let Some(year) = self.year {
            inputs.push(FilterInput::new(YEAR_FIELD, LookupKind::Number, year));
        }
        if let Some(range) = self.date_range.filter(DateRange::is_set) {
            let bound = |d: Option<chrono::NaiveDate>| d.map(|d| FilterValue::Text(d.format("%Y-%m-%d").to_string()));
            inputs.push(FilterInput::new(
                DATE_FIELD,
                LookupKind::DateRange,
                FilterValue::range(bound(range.start), bound(range.end)),
            ));
        }
        if !self.status.is_empty() {
            let status: Vec<&str> = self.status.iter().map(|s| s.as_str()).collect();
            inputs.push(FilterInput::new(STATUS_FIELD, LookupKind::EnumIn, status));
        }
        inputs
    }
}

/// Wire form of `DashboardFilterState`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct StateSnapshot {
    provinces: Vec<String>,
    communes: Vec<String>,
    collines: Vec<String>,
    benefit_plan: Option<String>,
    year: Option<i32>,
    date_range: Option<DateRange>,
    status: Vec<BeneficiaryStatus>,
    year_range: YearRange,
    default_year_range: YearRange,
}

impl From<DashboardFilterState> for StateSnapshot {
    fn from(state: DashboardFilterState) -> Self {
        Self {
            provinces: state.provinces,
            communes: state.communes,
            collines: state.collines,
            benefit_plan: state.benefit_plan,
            year: state.year,
            date_range: state.date_range,
            status: state.status,
            year_range: state.year_range,
            default_year_range: state.default_year_range,
        }
    }
}

impl From<StateSnapshot> for DashboardFilterState {
    fn from(snapshot: StateSnapshot) -> Self {
        let defaults = DashboardDefaults {
            year_range: snapshot.default_year_range,
            ..Default::default()
        };
        [
            FilterChange::Provinces(snapshot.provinces),
            FilterChange::Communes(snapshot.communes),
            FilterChange::Collines(snapshot.collines),
            FilterChange::BenefitPlan(snapshot.benefit_plan),
            FilterChange::Year(snapshot.year),
            FilterChange::DateRange(snapshot.date_range),
            FilterChange::Status(snapshot.status),
            FilterChange::YearRange(snapshot.year_range),
        ]
        .into_iter()
        .fold(Self::new(&defaults), |state, change| state.apply(change))
    }
}

/// Both single-element and equal
fn same_single(previous: &[String], next: &[String]) -> bool {
    previous.len() == 1 && next.len() == 1 && previous[0] == next[0]
}

fn dedup<T: PartialEq>(items: Vec<T>) -> Vec<T> {
    let mut out: Vec<T> = Vec::with_capacity(items.len());
    for item in items {
        if !out.contains(&item) {
            out.push(item);
        }
    }
    out
}

/// Numeric ids are primary keys already; anything else is opaque
fn id_value(id: &str) -> FilterValue {
    match id.parse::<i64>() {
        Ok(i) => FilterValue::Int(i),
        Err(_) => FilterValue::Text(id.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ids(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn with_colline() -> DashboardFilterState {
        DashboardFilterState::default()
            .apply(FilterChange::Provinces(ids(&["A"])))
            .apply(FilterChange::Communes(ids(&["C1"])))
            .apply(FilterChange::Collines(ids(&["K1", "K2"])))
    }

    #[test]
    fn test_changing_single_province_clears_children() {
        let state = with_colline();
        assert_eq!(state.collines().len(), 2);
        let next = state.apply(FilterChange::Provinces(ids(&["B"])));
        assert!(next.communes().is_empty());
        assert!(next.collines().is_empty());
        // the original is untouched
        assert_eq!(state.communes(), ["C1"]);
    }

    #[test]
    fn test_reselecting_same_province_keeps_children() {
        let next = with_colline().apply(FilterChange::Provinces(ids(&["A"])));
        assert_eq!(next.communes(), ["C1"]);
        assert_eq!(next.collines().len(), 2);
    }

    #[test]
    fn test_multiple_provinces_clear_children() {
        let next = with_colline().apply(FilterChange::Provinces(ids(&["A", "B"])));
        assert!(next.communes().is_empty());
        assert!(next.collines().is_empty());
    }

    #[test]
    fn test_commune_change_clears_collines() {
        let next = with_colline().apply(FilterChange::Communes(ids(&["C2"])));
        assert_eq!(next.communes(), ["C2"]);
        assert!(next.collines().is_empty());
    }

    #[test]
    fn test_communes_need_single_province() {
        let state = DashboardFilterState::default()
            .apply(FilterChange::Provinces(ids(&["A", "B"])))
            .apply(FilterChange::Communes(ids(&["C1"])));
        assert!(state.communes().is_empty());
    }

    #[test]
    fn test_count_active() {
        let state = DashboardFilterState::default()
            .apply(FilterChange::Provinces(ids(&["1", "2"])))
            .apply(FilterChange::BenefitPlan(None))
            .apply(FilterChange::Year(Some(2023)))
            .apply(FilterChange::DateRange(Some(DateRange { start: None, end: None })));
        assert_eq!(state.count_active(), 3);

        let state = state
            .apply(FilterChange::DateRange(Some(DateRange {
                start: NaiveDate::from_ymd_opt(2024, 1, 1),
                end: None,
            })))
            .apply(FilterChange::Status(vec![BeneficiaryStatus::Active, BeneficiaryStatus::Suspended]))
            .apply(FilterChange::YearRange(YearRange { min: 2022, max: 2024 }));
        assert_eq!(state.count_active(), 7);
    }

    #[test]
    fn test_clear_all() {
        let defaults = DashboardDefaults {
            year_range: YearRange { min: 2018, max: 2026 },
            decimals: None,
        };
        let state = DashboardFilterState::new(&defaults)
            .apply(FilterChange::Provinces(ids(&["A"])))
            .apply(FilterChange::Year(Some(2020)))
            .apply(FilterChange::YearRange(YearRange { min: 2019, max: 2020 }));
        let cleared = state.clear_all();
        assert_eq!(cleared, DashboardFilterState::new(&defaults));
        assert_eq!(cleared.count_active(), 0);
        assert_eq!(cleared.year_range(), YearRange { min: 2018, max: 2026 });
    }

    #[test]
    fn test_filter_inputs_use_deepest_location() {
        let inputs = with_colline()
            .apply(FilterChange::Year(Some(2023)))
            .to_filter_inputs();
        assert_eq!(inputs[0].field, LOCATION_FIELD);
        assert_eq!(inputs[0].value, FilterValue::from(vec!["K1", "K2"]));
        assert_eq!(inputs[1].field, YEAR_FIELD);
    }

    #[test]
    fn test_json_round_trip() {
        let state = with_colline()
            .apply(FilterChange::BenefitPlan(Some("7".into())))
            .apply(FilterChange::Year(Some(2023)))
            .apply(FilterChange::DateRange(Some(DateRange {
                start: NaiveDate::from_ymd_opt(2024, 1, 1),
                end: NaiveDate::from_ymd_opt(2024, 6, 30),
            })))
            .apply(FilterChange::Status(vec![BeneficiaryStatus::Active]))
            .apply(FilterChange::YearRange(YearRange { min: 2021, max: 2024 }));

        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["provinces"], serde_json::json!(["A"]));
        assert_eq!(json["benefitPlan"], "7");
        assert_eq!(json["status"], serde_json::json!(["ACTIVE"]));
        assert_eq!(json["dateRange"]["start"], "2024-01-01");

        let restored: DashboardFilterState = serde_json::from_value(json).unwrap();
        assert_eq!(restored, state);
        assert_eq!(restored.count_active(), state.count_active());
    }

    #[test]
    fn test_deserialize_enforces_cascade() {
        let restored: DashboardFilterState = serde_json::from_value(serde_json::json!({
            "provinces": ["A", "B"],
            "communes": ["C1"],
            "collines": ["K1"],
            "year": 2022
        }))
        .unwrap();
        assert_eq!(restored.provinces(), ["A", "B"]);
        assert!(restored.communes().is_empty());
        assert!(restored.collines().is_empty());
        assert_eq!(restored.year(), Some(2022));
        assert_eq!(restored, DashboardFilterState::default()
            .apply(FilterChange::Provinces(ids(&["A", "B"])))
            .apply(FilterChange::Year(Some(2022))));
    }

    #[test]
    fn test_apply_field() {
        let state = DashboardFilterState::default()
            .apply_field("provinces", &serde_json::json!([3]))
            .unwrap();
        assert_eq!(state.provinces(), ["3"]);
        assert!(state.apply_field("district", &serde_json::json!(1)).is_err());
    }
}
