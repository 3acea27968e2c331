//! Numeric helpers with zero/missing defaulting

use serde_json::Value;

pub const DEFAULT_DECIMALS: u32 = 1;

/// Round half away from zero to `decimals` places; non-finite input gives 0
pub fn round_to(value: f64, decimals: u32) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    let factor = 10f64.powi(decimals as i32);
    let rounded = (value * factor).round() / factor;
    if rounded.is_finite() { rounded } else { value }
}

/// `part / total * 100`, rounded; a zero total gives exactly 0
pub fn percentage(part: f64, total: f64, decimals: u32) -> f64 {
    if total == 0.0 || !total.is_finite() || !part.is_finite() {
        return 0.0;
    }
    round_to(part / total * 100.0, decimals)
}

/// Walk a dotted path (`individual.gender`); missing segments give `None`
pub fn value_at<'a>(record: &'a Value, path: &str) -> Option<&'a Value> {
    if path.is_empty() {
        return Some(record);
    }
    path.split('.').try_fold(record, |v, key| v.get(key))
}

/// Numeric leaf at `path`; missing, null or non-numeric gives 0
///
/// Numeric strings are accepted since decimals come back as strings.
pub fn number_at(record: &Value, path: &str) -> f64 {
    match value_at(record, path) {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()).unwrap_or(0.0),
        _ => 0.0,
    }
}

pub fn sum_field(records: &[&Value], path: &str) -> f64 {
    records.iter().map(|r| number_at(r, path)).sum()
}

/// Running total, left to right
///
/// Input must already be in period order; nothing is sorted here.
pub fn cumulative(values: &[f64]) -> Vec<f64> {
    values
        .iter()
        .scan(0.0, |acc, v| {
            *acc += v;
            Some(*acc)
        })
        .collect()
}
