//! Filter encoding: raw values → typed fragments

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use tracing::debug;

use crate::query::{Argument, FilterInput, FilterValue, Fragment, GqlValue, LookupKind, RangeValue};
use super::error::EncodeError;
use super::escape::is_gql_name;
use super::id::decode_id;

const DATE_FORMAT: &str = "%Y-%m-%d";

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Encode one filter field
///
/// Returns `Ok(None)` when the value is null, an empty list, an unbounded
/// range or a blank search string: the field is then omitted from the
/// query altogether.
pub fn encode(field: &str, value: &FilterValue, lookup: LookupKind) -> Result<Option<Fragment>, EncodeError> {
    if !is_gql_name(field) {
        return Err(EncodeError::InvalidFieldName(field.to_string()));
    }
    if value.is_empty() {
        return Ok(None);
    }

    let ctx = Ctx { field, lookup };
    let name = format!("{}{}", field, lookup.suffix());

    let fragment = match lookup {
        LookupKind::Exact => Fragment::single(Argument::new(name, ctx.scalar(value)?)),
        LookupKind::Icontains | LookupKind::Istartswith => {
            let text = ctx.text(value)?;
            // A cleared search box means "no filter"
            if text.trim().is_empty() {
                return Ok(None);
            }
            Fragment::single(Argument::new(name, GqlValue::String(text.to_string())))
        }
        LookupKind::Enum => Fragment::single(Argument::new(name, ctx.enum_value(value)?)),
        LookupKind::Bool => match value {
            FilterValue::Bool(b) => Fragment::single(Argument::new(name, GqlValue::Bool(*b))),
            other => return Err(ctx.mismatch(other)),
        },
        LookupKind::Number | LookupKind::Gte | LookupKind::Lte => {
            Fragment::single(Argument::new(name, ctx.number(value)?))
        }
        LookupKind::Date | LookupKind::DateGte | LookupKind::DateLte => {
            Fragment::single(Argument::new(name, ctx.date(value)?))
        }
        LookupKind::In => Fragment::single(Argument::new(name, ctx.list(value, Ctx::scalar)?)),
        LookupKind::EnumIn => Fragment::single(Argument::new(name, ctx.list(value, Ctx::enum_value)?)),
        LookupKind::IdIn => Fragment::single(Argument::new(name, ctx.list(value, Ctx::id)?)),
        LookupKind::Id => Fragment::single(Argument::new(name, ctx.id(value)?)),
        LookupKind::Range => match value {
            FilterValue::Range(range) => return ctx.range(range, Ctx::number),
            other => return Err(ctx.mismatch(other)),
        },
        LookupKind::DateRange => match value {
            FilterValue::Range(range) => return ctx.range(range, Ctx::date),
            other => return Err(ctx.mismatch(other)),
        },
    };

    Ok(Some(fragment))
}

/// Encode a whole filter set, dropping fields that encode to nothing
pub fn encode_all(inputs: &[FilterInput]) -> Result<Vec<Fragment>, EncodeError> {
    let mut fragments = Vec::with_capacity(inputs.len());
    for input in inputs {
        match encode(&input.field, &input.value, input.lookup)? {
            Some(fragment) => fragments.push(fragment),
            None => debug!(target: "spquery::encoder", field = %input.field, "omitting empty filter"),
        }
    }
    Ok(fragments)
}

/// Truncate a date or timestamp string to `YYYY-MM-DD`
///
/// The date is taken as written; offsets are not converted to UTC first.
pub fn truncate_date(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive().format(DATE_FORMAT).to_string());
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt.date().format(DATE_FORMAT).to_string());
        }
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .ok()
        .map(|d| d.format(DATE_FORMAT).to_string())
}

struct Ctx<'a> {
    field: &'a str,
    lookup: LookupKind,
}

impl Ctx<'_> {
    fn mismatch(&self, value: &FilterValue) -> EncodeError {
        EncodeError::TypeMismatch {
            field: self.field.to_string(),
            lookup: self.lookup,
            found: value.kind_name(),
        }
    }

    fn text<'v>(&self, value: &'v FilterValue) -> Result<&'v str, EncodeError> {
        match value {
            FilterValue::Text(s) => Ok(s),
            other => Err(self.mismatch(other)),
        }
    }

    fn scalar(&self, value: &FilterValue) -> Result<GqlValue, EncodeError> {
        match value {
            FilterValue::Text(s) => Ok(GqlValue::String(s.clone())),
            FilterValue::Int(i) => Ok(GqlValue::Int(*i)),
            FilterValue::Float(f) => self.finite(*f),
            FilterValue::Bool(b) => Ok(GqlValue::Bool(*b)),
            other => Err(self.mismatch(other)),
        }
    }

    fn enum_value(&self, value: &FilterValue) -> Result<GqlValue, EncodeError> {
        let s = self.text(value)?;
        if !is_gql_name(s) {
            return Err(EncodeError::InvalidEnum {
                field: self.field.to_string(),
                value: s.to_string(),
            });
        }
        Ok(GqlValue::Enum(s.to_string()))
    }

    fn number(&self, value: &FilterValue) -> Result<GqlValue, EncodeError> {
        match value {
            FilterValue::Int(i) => Ok(GqlValue::Int(*i)),
            FilterValue::Float(f) => self.finite(*f),
            FilterValue::Text(s) => {
                let s = s.trim();
                if let Ok(i) = s.parse::<i64>() {
                    Ok(GqlValue::Int(i))
                } else if let Some(f) = s.parse::<f64>().ok().filter(|f| f.is_finite()) {
                    Ok(GqlValue::Float(f))
                } else {
                    Err(EncodeError::InvalidNumber {
                        field: self.field.to_string(),
                        value: s.to_string(),
                    })
                }
            }
            other => Err(self.mismatch(other)),
        }
    }

    /// GraphQL has no literal for NaN or infinity
    fn finite(&self, f: f64) -> Result<GqlValue, EncodeError> {
        if f.is_finite() {
            Ok(GqlValue::Float(f))
        } else {
            Err(EncodeError::InvalidNumber {
                field: self.field.to_string(),
                value: f.to_string(),
            })
        }
    }

    fn date(&self, value: &FilterValue) -> Result<GqlValue, EncodeError> {
        let raw = self.text(value)?;
        truncate_date(raw)
            .map(GqlValue::String)
            .ok_or_else(|| EncodeError::InvalidDate {
                field: self.field.to_string(),
                value: raw.to_string(),
            })
    }

    fn id(&self, value: &FilterValue) -> Result<GqlValue, EncodeError> {
        match value {
            // Already a primary key
            FilterValue::Int(i) => Ok(GqlValue::Int(*i)),
            FilterValue::Text(s) => {
                let key = decode_id(s).ok_or_else(|| EncodeError::InvalidId {
                    field: self.field.to_string(),
                    value: s.clone(),
                })?;
                Ok(match key.parse::<i64>() {
                    Ok(i) => GqlValue::Int(i),
                    Err(_) => GqlValue::String(key),
                })
            }
            other => Err(self.mismatch(other)),
        }
    }

    /// Lists stay lists even with one element; a bare scalar is treated as a singleton
    fn list(
        &self,
        value: &FilterValue,
        item: fn(&Self, &FilterValue) -> Result<GqlValue, EncodeError>,
    ) -> Result<GqlValue, EncodeError> {
        match value {
            FilterValue::List(items) => items
                .iter()
                .map(|v| item(self, v))
                .collect::<Result<Vec<_>, _>>()
                .map(GqlValue::List),
            FilterValue::Range(_) | FilterValue::Null => Err(self.mismatch(value)),
            scalar => Ok(GqlValue::List(vec![item(self, scalar)?])),
        }
    }

    fn range(
        &self,
        range: &RangeValue,
        bound: fn(&Self, &FilterValue) -> Result<GqlValue, EncodeError>,
    ) -> Result<Option<Fragment>, EncodeError> {
        let mut arguments = Vec::with_capacity(2);
        if let Some(start) = range.start.as_deref().filter(|v| !v.is_empty()) {
            arguments.push(Argument::new(format!("{}_Gte", self.field), bound(self, start)?));
        }
        if let Some(end) = range.end.as_deref().filter(|v| !v.is_empty()) {
            arguments.push(Argument::new(format!("{}_Lte", self.field), bound(self, end)?));
        }
        Ok(Fragment::new(arguments))
    }
}
