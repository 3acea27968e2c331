//! Panel aggregation: raw response → chart-ready data

use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

use crate::catalog::{PanelKind, PanelSpec};
use super::extract::{category_at, nodes, unwrap_data};
use super::numeric::{cumulative, number_at, percentage, sum_field, DEFAULT_DECIMALS};
use super::series::{Aggregated, AggregatedSeries, Breakdown, PanelOutput, Series, Summary};

/// Aggregate one panel's response
///
/// An absent (or JSON `null`) response yields `NoData`; an empty one yields
/// empty output. Missing numbers count as 0.
pub fn aggregate(raw: Option<&Value>, spec: &PanelSpec) -> Aggregated<PanelOutput> {
    let Some(raw) = raw.filter(|v| !v.is_null()) else {
        debug!(target: "spquery::aggregator", panel = %spec.name, "no response");
        return Aggregated::NoData;
    };

    let records = nodes(unwrap_data(raw), &spec.path);
    let decimals = spec.decimals.unwrap_or(DEFAULT_DECIMALS);
    let category = spec.category.as_deref().unwrap_or_default();

    let output = match spec.kind {
        PanelKind::Breakdown => {
            PanelOutput::Breakdown(breakdown(&records, category, spec.value_key(), &spec.labels, decimals))
        }
        PanelKind::Grouped => {
            // without a series key there is one series, named after the value
            let mut out = match spec.series.as_deref().filter(|s| !s.is_empty()) {
                Some(series_key) => grouped(&records, category, series_key, spec.value_key()),
                None => measures(&records, category, &[spec.value_key().to_string()]),
            };
            relabel(&mut out, &spec.labels);
            PanelOutput::Series(out)
        }
        PanelKind::Measures => {
            let mut out = measures(&records, category, &spec.values);
            relabel(&mut out, &spec.labels);
            PanelOutput::Series(out)
        }
        PanelKind::Cumulative => {
            PanelOutput::Series(period_series(&records, category, spec.value_key(), true))
        }
        PanelKind::Total => PanelOutput::Summary(summary(&records, &spec.values)),
    };

    debug!(
        target: "spquery::aggregator",
        panel = %spec.name,
        kind = %spec.kind,
        records = records.len(),
        "aggregated panel"
    );
    Aggregated::Data(output)
}

/// Value per category with shares of the total
///
/// Categories keep first-seen order; repeated categories are summed, as are
/// raw keys sharing one display label (the first raw key is kept).
pub fn breakdown(
    records: &[&Value],
    category_key: &str,
    value_key: &str,
    labels: &HashMap<String, String>,
    decimals: u32,
) -> Breakdown {
    let mut keys: Vec<String> = Vec::new();
    let mut categories: Vec<String> = Vec::new();
    let mut data: Vec<f64> = Vec::new();

    for record in records {
        let key = category_at(record, category_key);
        let label = labels.get(&key).cloned().unwrap_or_else(|| key.clone());
        let value = number_at(record, value_key);
        match categories.iter().position(|c| *c == label) {
            Some(idx) => data[idx] += value,
            None => {
                keys.push(key);
                categories.push(label);
                data.push(value);
            }
        }
    }

    let total: f64 = data.iter().sum();
    let percentages = data.iter().map(|v| percentage(*v, total, decimals)).collect();

    Breakdown {
        keys,
        categories,
        data,
        percentages,
        total,
    }
}

/// Category × series matrix
///
/// Every category seen in any record appears once, and every series has a
/// value (0 if absent) at each category position.
pub fn grouped(records: &[&Value], category_key: &str, series_key: &str, value_key: &str) -> AggregatedSeries {
    let mut categories: Vec<String> = Vec::new();
    let mut names: Vec<String> = Vec::new();
    let mut cells: HashMap<(usize, usize), f64> = HashMap::new();

    for record in records {
        let cat = index_of(&mut categories, category_at(record, category_key));
        let ser = index_of(&mut names, category_at(record, series_key));
        *cells.entry((ser, cat)).or_insert(0.0) += number_at(record, value_key);
    }

    let series = names
        .into_iter()
        .enumerate()
        .map(|(s, name)| Series {
            name,
            data: (0..categories.len())
                .map(|c| cells.get(&(s, c)).copied().unwrap_or(0.0))
                .collect(),
        })
        .collect();

    AggregatedSeries { categories, series }
}

/// One series per value key, aligned on categories
pub fn measures(records: &[&Value], category_key: &str, value_keys: &[String]) -> AggregatedSeries {
    let mut categories: Vec<String> = Vec::new();
    let mut data: Vec<Vec<f64>> = vec![Vec::new(); value_keys.len()];

    for record in records {
        let before = categories.len();
        let cat = index_of(&mut categories, category_at(record, category_key));
        for (i, key) in value_keys.iter().enumerate() {
            if categories.len() > before {
                data[i].push(0.0);
            }
            data[i][cat] += number_at(record, key);
        }
    }

    let series = value_keys
        .iter()
        .zip(data)
        .map(|(name, data)| Series {
            name: name.clone(),
            data,
        })
        .collect();

    AggregatedSeries { categories, series }
}

/// Values per period in the order given, optionally as running totals
///
/// Records must already be sorted by period; they are not reordered here.
pub fn period_series(records: &[&Value], period_key: &str, value_key: &str, running: bool) -> AggregatedSeries {
    let categories: Vec<String> = records.iter().map(|r| category_at(r, period_key)).collect();
    let raw: Vec<f64> = records.iter().map(|r| number_at(r, value_key)).collect();
    let data = if running { cumulative(&raw) } else { raw };

    AggregatedSeries {
        categories,
        series: vec![Series {
            name: value_key.to_string(),
            data,
        }],
    }
}

pub fn summary(records: &[&Value], value_keys: &[String]) -> Summary {
    let totals: BTreeMap<String, f64> = value_keys
        .iter()
        .map(|k| (k.clone(), sum_field(records, k)))
        .collect();
    Summary {
        count: records.len(),
        totals,
    }
}

fn index_of(items: &mut Vec<String>, item: String) -> usize {
    match items.iter().position(|i| *i == item) {
        Some(idx) => idx,
        None => {
            items.push(item);
            items.len() - 1
        }
    }
}

/// Swap raw keys for display labels
///
/// Categories or series that end up with the same label are merged by
/// summing, so each label appears once.
fn relabel(series: &mut AggregatedSeries, labels: &HashMap<String, String>) {
    if labels.is_empty() {
        return;
    }
    let label = |key: &String| labels.get(key).cloned().unwrap_or_else(|| key.clone());

    let mut categories: Vec<String> = Vec::new();
    let positions: Vec<usize> = series
        .categories
        .iter()
        .map(|c| index_of(&mut categories, label(c)))
        .collect();

    let mut merged: Vec<Series> = Vec::new();
    for s in series.series.drain(..) {
        let name = label(&s.name);
        let idx = match merged.iter().position(|m| m.name == name) {
            Some(idx) => idx,
            None => {
                merged.push(Series {
                    name,
                    data: vec![0.0; categories.len()],
                });
                merged.len() - 1
            }
        };
        for (value, &pos) in s.data.iter().zip(&positions) {
            merged[idx].data[pos] += value;
        }
    }

    series.categories = categories;
    series.series = merged;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn gender_labels() -> HashMap<String, String> {
        HashMap::from([
            ("M".to_string(), "Hommes".to_string()),
            ("F".to_string(), "Femmes".to_string()),
        ])
    }

    #[test]
    fn test_gender_breakdown() {
        let resp = json!({"breakdownByGender": [
            {"gender": "M", "count": 40},
            {"gender": "F", "count": 60}
        ]});
        let records = nodes(&resp, "breakdownByGender");
        let b = breakdown(&records, "gender", "count", &gender_labels(), 1);
        assert_eq!(b.data, vec![40.0, 60.0]);
        assert_eq!(b.categories, vec!["Hommes", "Femmes"]);
        assert_eq!(b.share_of("F"), Some(60.0));
        assert_eq!(b.share_of("Femmes"), Some(60.0));
        assert_eq!(b.total, 100.0);
    }

    #[test]
    fn test_shared_label_merges_breakdown_categories() {
        let resp = json!([
            {"gender": "M", "count": 10},
            {"gender": "F", "count": 30},
            {"gender": "male", "count": 10}
        ]);
        let records = nodes(&resp, "");
        let mut labels = gender_labels();
        labels.insert("male".into(), "Hommes".into());
        let b = breakdown(&records, "gender", "count", &labels, 1);
        assert_eq!(b.categories, vec!["Hommes", "Femmes"]);
        assert_eq!(b.keys, vec!["M", "F"]);
        assert_eq!(b.data, vec![20.0, 30.0]);
        assert_eq!(b.share_of("Hommes"), Some(40.0));
    }

    #[test]
    fn test_shared_label_merges_grouped_categories() {
        let resp = json!({"rows": [
            {"gender": "M", "status": "ACTIVE", "count": 2},
            {"gender": "male", "status": "ACTIVE", "count": 3},
            {"gender": "F", "status": "SUSPENDED", "count": 1},
            {"gender": "male", "status": "SUSPENDED", "count": 4}
        ]});
        let spec = PanelSpec::new("by_gender", PanelKind::Grouped, "rows")
            .with_category("gender")
            .with_series("status")
            .with_label("M", "Hommes")
            .with_label("male", "Hommes")
            .with_label("F", "Femmes");
        let Aggregated::Data(PanelOutput::Series(g)) = aggregate(Some(&resp), &spec) else {
            panic!("expected series");
        };
        assert_eq!(g.categories, vec!["Hommes", "Femmes"]);
        assert!(g.is_aligned());
        assert_eq!(g.value("ACTIVE", "Hommes"), Some(5.0));
        assert_eq!(g.value("SUSPENDED", "Hommes"), Some(4.0));
        assert_eq!(g.value("SUSPENDED", "Femmes"), Some(1.0));
    }

    #[test]
    fn test_grouped_without_series_key_is_single_series() {
        let resp = json!({"rows": [
            {"gender": "M", "count": 2},
            {"gender": "F", "count": 1},
            {"gender": "M", "count": 1}
        ]});
        let spec = PanelSpec::new("by_gender", PanelKind::Grouped, "rows").with_category("gender");
        let Aggregated::Data(PanelOutput::Series(g)) = aggregate(Some(&resp), &spec) else {
            panic!("expected series");
        };
        assert_eq!(g.series.len(), 1);
        assert_eq!(g.series[0].name, "count");
        assert_eq!(g.value("count", "M"), Some(3.0));
        assert_eq!(g.value("count", "F"), Some(1.0));
    }

    #[test]
    fn test_breakdown_all_zero() {
        let resp = json!([{"gender": "M"}, {"gender": "F", "count": null}]);
        let records = nodes(&resp, "");
        let b = breakdown(&records, "gender", "count", &HashMap::new(), 1);
        assert_eq!(b.percentages, vec![0.0, 0.0]);
        assert!(b.percentages.iter().all(|p| p.is_finite()));
    }

    #[test]
    fn test_grouped_is_dense() {
        let resp = json!([
            {"province": "Gitega", "status": "PAID", "amount": 10},
            {"province": "Ngozi", "status": "UNPAID", "amount": 5},
            {"province": "Gitega", "status": "UNPAID", "amount": "2.5"},
            {"province": "Ngozi", "status": "PAID"}
        ]);
        let records = nodes(&resp, "");
        let g = grouped(&records, "province", "status", "amount");
        assert_eq!(g.categories, vec!["Gitega", "Ngozi"]);
        assert!(g.is_aligned());
        assert_eq!(g.value("PAID", "Gitega"), Some(10.0));
        assert_eq!(g.value("PAID", "Ngozi"), Some(0.0));
        assert_eq!(g.value("UNPAID", "Gitega"), Some(2.5));
    }

    #[test]
    fn test_measures_per_category() {
        let resp = json!([
            {"province": "Gitega", "paid": 3, "unpaid": 1},
            {"province": "Bururi", "paid": 2},
            {"province": "Gitega", "paid": 1}
        ]);
        let records = nodes(&resp, "");
        let m = measures(&records, "province", &["paid".to_string(), "unpaid".to_string()]);
        assert!(m.is_aligned());
        assert_eq!(m.get("paid").unwrap().data, vec![4.0, 2.0]);
        assert_eq!(m.get("unpaid").unwrap().data, vec![1.0, 0.0]);
    }

    #[test]
    fn test_cumulative_series_keeps_input_order() {
        let resp = json!([
            {"month": "2024-01", "amount": 100},
            {"month": "2024-02", "amount": 50},
            {"month": "2024-03"}
        ]);
        let records = nodes(&resp, "");
        let s = period_series(&records, "month", "amount", true);
        assert_eq!(s.categories, vec!["2024-01", "2024-02", "2024-03"]);
        assert_eq!(s.series[0].data, vec![100.0, 150.0, 150.0]);
    }

    #[test]
    fn test_aggregate_absent_is_no_data() {
        let spec = PanelSpec::new("gender", PanelKind::Breakdown, "breakdownByGender").with_category("gender");
        assert!(aggregate(None, &spec).is_no_data());
        assert!(aggregate(Some(&Value::Null), &spec).is_no_data());
    }

    #[test]
    fn test_aggregate_empty_is_data() {
        let spec = PanelSpec::new("gender", PanelKind::Breakdown, "breakdownByGender").with_category("gender");
        let out = aggregate(Some(&json!({"data": {}})), &spec);
        match out {
            Aggregated::Data(PanelOutput::Breakdown(b)) => {
                assert!(b.data.is_empty());
                assert_eq!(b.total, 0.0);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_aggregate_is_repeatable() {
        let spec = PanelSpec::new("payments", PanelKind::Total, "paymentSummary")
            .with_values(["totalPaid", "totalUnpaid"]);
        let resp = json!({"data": {"paymentSummary": {"totalPaid": "1500.00", "totalUnpaid": 20}}});
        let first = aggregate(Some(&resp), &spec);
        let second = aggregate(Some(&resp), &spec);
        assert_eq!(first, second);
        match first {
            Aggregated::Data(PanelOutput::Summary(s)) => {
                assert_eq!(s.count, 1);
                assert_eq!(s.totals["totalPaid"], 1500.0);
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
