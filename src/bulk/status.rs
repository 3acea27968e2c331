//! Bulk status updates

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use crate::builder::{BuildError, MutationBuilder};
use crate::query::GqlValue;
use crate::request::MutationRequest;
use super::error::ValidationError;

pub const BULK_UPDATE_OPERATION: &str = "bulkUpdateBeneficiaryStatus";
pub const BULK_UPDATE_TAGS: &str = "SOCIAL_PROTECTION_MUTATION_BULK_UPDATE_BENEFICIARY_STATUS";

/// Beneficiary lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BeneficiaryStatus {
    Potential,
    Active,
    Graduated,
    Suspended,
}

impl BeneficiaryStatus {
    pub const ALL: [BeneficiaryStatus; 4] = [
        BeneficiaryStatus::Potential,
        BeneficiaryStatus::Active,
        BeneficiaryStatus::Graduated,
        BeneficiaryStatus::Suspended,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BeneficiaryStatus::Potential => "POTENTIAL",
            BeneficiaryStatus::Active => "ACTIVE",
            BeneficiaryStatus::Graduated => "GRADUATED",
            BeneficiaryStatus::Suspended => "SUSPENDED",
        }
    }
}

impl fmt::Display for BeneficiaryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BeneficiaryStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BeneficiaryStatus::ALL
            .into_iter()
            .find(|st| st.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValidationError::UnknownStatus(s.to_string()))
    }
}

/// A validated bulk status change
///
/// Ids are unique (first occurrence kept) and never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct BulkUpdateRequest {
    ids: Vec<String>,
    status: BeneficiaryStatus,
    reason: Option<String>,
}

impl BulkUpdateRequest {
    pub fn new<I, S>(ids: I, status: Option<BeneficiaryStatus>, reason: Option<String>) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        let ids: Vec<String> = ids
            .into_iter()
            .map(Into::into)
            .filter(|id| seen.insert(id.clone()))
            .collect();
        if ids.is_empty() {
            return Err(ValidationError::EmptySelection);
        }
        let status = status.ok_or(ValidationError::MissingStatus)?;
        let reason = reason.filter(|r| !r.trim().is_empty());
        Ok(Self { ids, status, reason })
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn status(&self) -> BeneficiaryStatus {
        self.status
    }

    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }

    /// `{"input": {"ids": [...], "status": "...", "reason": ...}}`; reason is not escaped here
    pub fn to_variables(&self) -> Value {
        json!({
            "input": {
                "ids": self.ids,
                "status": self.status.as_str(),
                "reason": self.reason,
            }
        })
    }

    /// Inline mutation; the reason goes through string-literal escaping
    pub fn to_mutation(&self, label: impl Into<String>) -> Result<MutationRequest, BuildError> {
        let ids = self.ids.iter().cloned().map(GqlValue::String).collect();
        let reason = self.reason.clone().map_or(GqlValue::Null, GqlValue::String);
        MutationBuilder::new(BULK_UPDATE_OPERATION)
            .input("ids", GqlValue::List(ids))
            .input("status", GqlValue::Enum(self.status.as_str().to_string()))
            .input("reason", reason)
            .label(label)
            .tags(BULK_UPDATE_TAGS)
            .build()
    }
}
