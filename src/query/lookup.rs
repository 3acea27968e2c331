//! Lookup kinds: how a filter field is encoded into query arguments

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Encoding rule for a filter field
///
/// Each kind fixes both the shape of the accepted value and the argument
/// name suffix understood by the backend (`field_Icontains`, `field_In`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LookupKind {
    /// Quoted string equality
    Exact,
    /// Case-insensitive substring match
    Icontains,
    /// Case-insensitive prefix match
    Istartswith,
    /// Unquoted enum value
    Enum,
    /// List of unquoted enum values
    EnumIn,
    /// Boolean flag
    Bool,
    /// Numeric equality
    Number,
    /// Numeric lower bound (inclusive)
    Gte,
    /// Numeric upper bound (inclusive)
    Lte,
    /// Numeric `{start, end}` range
    Range,
    /// List membership of plain scalars
    In,
    /// Date equality (time of day dropped)
    Date,
    /// Date lower bound (inclusive)
    DateGte,
    /// Date upper bound (inclusive)
    DateLte,
    /// Date `{start, end}` range
    DateRange,
    /// Single opaque id, decoded before sending
    Id,
    /// List of opaque ids, decoded before sending
    IdIn,
}

impl LookupKind {
    /// Suffix appended to the field name for single-argument lookups
    pub fn suffix(&self) -> &'static str {
        match self {
            LookupKind::Exact
            | LookupKind::Enum
            | LookupKind::Bool
            | LookupKind::Number
            | LookupKind::Date => "",
            LookupKind::Icontains => "_Icontains",
            LookupKind::Istartswith => "_Istartswith",
            LookupKind::In | LookupKind::EnumIn => "_In",
            LookupKind::Gte | LookupKind::DateGte => "_Gte",
            LookupKind::Lte | LookupKind::DateLte => "_Lte",
            // Ranges expand into a `_Gte` / `_Lte` pair
            LookupKind::Range | LookupKind::DateRange => "",
            LookupKind::Id => "_Id",
            LookupKind::IdIn => "_Id_In",
        }
    }
}

impl fmt::Display for LookupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LookupKind::Exact => "exact",
            LookupKind::Icontains => "icontains",
            LookupKind::Istartswith => "istartswith",
            LookupKind::Enum => "enum",
            LookupKind::EnumIn => "enum_in",
            LookupKind::Bool => "bool",
            LookupKind::Number => "number",
            LookupKind::Gte => "gte",
            LookupKind::Lte => "lte",
            LookupKind::Range => "range",
            LookupKind::In => "in",
            LookupKind::Date => "date",
            LookupKind::DateGte => "date_gte",
            LookupKind::DateLte => "date_lte",
            LookupKind::DateRange => "date_range",
            LookupKind::Id => "id",
            LookupKind::IdIn => "id_in",
        };
        write!(f, "{}", s)
    }
}

/// Error when parsing a lookup kind string
#[derive(Debug, Clone)]
pub struct ParseLookupError {
    pub input: String,
}

impl fmt::Display for ParseLookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Unknown lookup kind '{}'. Valid options: exact, icontains, istartswith, enum, enum_in, bool, number, gte, lte, range, in, date, date_gte, date_lte, date_range, id, id_in",
            self.input
        )
    }
}

impl std::error::Error for ParseLookupError {}

impl FromStr for LookupKind {
    type Err = ParseLookupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "exact" | "eq" => Ok(LookupKind::Exact),
            "icontains" => Ok(LookupKind::Icontains),
            "istartswith" => Ok(LookupKind::Istartswith),
            "enum" => Ok(LookupKind::Enum),
            "enum_in" => Ok(LookupKind::EnumIn),
            "bool" | "boolean" => Ok(LookupKind::Bool),
            "number" => Ok(LookupKind::Number),
            "gte" => Ok(LookupKind::Gte),
            "lte" => Ok(LookupKind::Lte),
            "range" => Ok(LookupKind::Range),
            "in" => Ok(LookupKind::In),
            "date" => Ok(LookupKind::Date),
            "date_gte" => Ok(LookupKind::DateGte),
            "date_lte" => Ok(LookupKind::DateLte),
            "date_range" => Ok(LookupKind::DateRange),
            "id" => Ok(LookupKind::Id),
            "id_in" => Ok(LookupKind::IdIn),
            _ => Err(ParseLookupError { input: s.to_string() }),
        }
    }
}

impl<'de> Deserialize<'de> for LookupKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        LookupKind::from_str(&s).map_err(serde::de::Error::custom)
    }
}

impl Serialize for LookupKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}
