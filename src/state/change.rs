//! Filter changes dispatched by the dashboard

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::bulk::BeneficiaryStatus;
use crate::catalog::YearRange;
use super::error::StateError;

/// Date bounds; either side may be open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct DateRange {
    #[serde(default)]
    pub start: Option<NaiveDate>,
    #[serde(default)]
    pub end: Option<NaiveDate>,
}

impl DateRange {
    /// At least one bound set
    pub fn is_set(&self) -> bool {
        self.start.is_some() || self.end.is_some()
    }
}

/// One user filter action
#[derive(Debug, Clone, PartialEq)]
pub enum FilterChange {
    Provinces(Vec<String>),
    Communes(Vec<String>),
    Collines(Vec<String>),
    BenefitPlan(Option<String>),
    Year(Option<i32>),
    DateRange(Option<DateRange>),
    Status(Vec<BeneficiaryStatus>),
    YearRange(YearRange),
}

impl FilterChange {
    /// Map a field name and JSON value, as sent by a UI control
    pub fn from_field(field: &str, value: &Value) -> Result<Self, StateError> {
        let invalid = |message: String| StateError::InvalidValue {
            field: field.to_string(),
            message,
        };
        let change = match field {
            "provinces" => FilterChange::Provinces(ids(value).map_err(invalid)?),
            "communes" => FilterChange::Communes(ids(value).map_err(invalid)?),
            "collines" => FilterChange::Collines(ids(value).map_err(invalid)?),
            "benefitPlan" => FilterChange::BenefitPlan(optional_id(value).map_err(invalid)?),
            "year" => FilterChange::Year(parse(value).map_err(invalid)?),
            "dateRange" => FilterChange::DateRange(parse(value).map_err(invalid)?),
            "status" => FilterChange::Status(parse::<Option<Vec<_>>>(value).map_err(invalid)?.unwrap_or_default()),
            "yearRange" => FilterChange::YearRange(parse(value).map_err(invalid)?),
            other => return Err(StateError::UnknownField(other.to_string())),
        };
        Ok(change)
    }
}

fn parse<T: serde::de::DeserializeOwned>(value: &Value) -> Result<T, String> {
    serde_json::from_value(value.clone()).map_err(|e| e.to_string())
}

fn id_text(value: &Value) -> Result<String, String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(format!("expected an id, got {}", other)),
    }
}

fn ids(value: &Value) -> Result<Vec<String>, String> {
    match value {
        Value::Null => Ok(Vec::new()),
        Value::Array(items) => items.iter().map(id_text).collect(),
        single => Ok(vec![id_text(single)?]),
    }
}

fn optional_id(value: &Value) -> Result<Option<String>, String> {
    match value {
        Value::Null => Ok(None),
        other => id_text(other).map(Some),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_field() {
        assert_eq!(
            FilterChange::from_field("provinces", &json!([1, "2"])).unwrap(),
            FilterChange::Provinces(vec!["1".into(), "2".into()])
        );
        assert_eq!(FilterChange::from_field("year", &json!(2023)).unwrap(), FilterChange::Year(Some(2023)));
        assert_eq!(FilterChange::from_field("year", &json!(null)).unwrap(), FilterChange::Year(None));
        assert_eq!(
            FilterChange::from_field("status", &json!(["ACTIVE"])).unwrap(),
            FilterChange::Status(vec![BeneficiaryStatus::Active])
        );
        let range = FilterChange::from_field("dateRange", &json!({"start": "2024-01-01", "end": null})).unwrap();
        match range {
            FilterChange::DateRange(Some(r)) => {
                assert!(r.is_set());
                assert!(r.end.is_none());
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_from_field_errors() {
        assert_eq!(
            FilterChange::from_field("district", &json!([])).unwrap_err(),
            StateError::UnknownField("district".into())
        );
        assert!(matches!(
            FilterChange::from_field("year", &json!("soon")).unwrap_err(),
            StateError::InvalidValue { .. }
        ));
        assert!(FilterChange::from_field("provinces", &json!([{"id": 1}])).is_err());
    }
}
