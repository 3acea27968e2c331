//! Mutation builder

use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use crate::encoder::is_gql_name;
use crate::query::{Argument, GqlValue};
use crate::request::{MutationRequest, ResponseTags, Selection};
use super::error::BuildError;
use super::query::check_unique_arguments;

const RESERVED_INPUTS: &[&str] = &["clientMutationId", "clientMutationLabel"];

/// Builds a single top-level mutation
///
/// Every `build()` stamps a fresh time-ordered client mutation id and
/// request time, so two identical user actions never share an id.
#[derive(Debug, Clone, Default)]
pub struct MutationBuilder {
    operation: String,
    input: Vec<Argument>,
    label: String,
    tags: Option<ResponseTags>,
    returning: Vec<Selection>,
    input_type: Option<String>,
}

impl MutationBuilder {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            ..Default::default()
        }
    }

    pub fn input(mut self, name: impl Into<String>, value: GqlValue) -> Self {
        self.input.push(Argument::new(name, value));
        self
    }

    pub fn inputs(mut self, arguments: impl IntoIterator<Item = Argument>) -> Self {
        self.input.extend(arguments);
        self
    }

    /// Free-text label shown in the mutation journal
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Derive request/success/error tags from a prefix
    pub fn tags(mut self, prefix: &str) -> Self {
        self.tags = Some(ResponseTags::from_prefix(prefix));
        self
    }

    /// Send the input as a `$input` variable of this GraphQL type
    pub fn input_type(mut self, type_name: impl Into<String>) -> Self {
        self.input_type = Some(type_name.into());
        self
    }

    /// Fields read back from the mutation result
    pub fn returning<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Selection>,
    {
        self.returning.extend(fields.into_iter().map(Into::into));
        self
    }

    pub fn build(&self) -> Result<MutationRequest, BuildError> {
        if !is_gql_name(&self.operation) {
            return Err(BuildError::InvalidName(self.operation.clone()));
        }
        for arg in &self.input {
            if RESERVED_INPUTS.contains(&arg.name.as_str()) {
                return Err(BuildError::ReservedArgument(arg.name.clone()));
            }
            if !is_gql_name(&arg.name) {
                return Err(BuildError::InvalidName(arg.name.clone()));
            }
        }
        check_unique_arguments(&self.input)?;
        if let Some(type_name) = self.input_type.as_deref().filter(|t| !is_gql_name(t)) {
            return Err(BuildError::InvalidName(type_name.to_string()));
        }
        let tags = self.tags.clone().ok_or(BuildError::MissingDispatch)?;

        let returning = if self.returning.is_empty() {
            vec![Selection::field("clientMutationId"), Selection::field("internalId")]
        } else {
            self.returning.clone()
        };

        let request = MutationRequest {
            operation: self.operation.clone(),
            input: self.input.clone(),
            label: self.label.clone(),
            client_mutation_id: Uuid::now_v7(),
            requested_at: Utc::now(),
            tags,
            returning,
            input_type: self.input_type.clone(),
        };

        debug!(
            target: "spquery::builder",
            operation = %request.operation,
            client_mutation_id = %request.client_mutation_id,
            "built mutation"
        );
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> MutationBuilder {
        MutationBuilder::new("updateBenefitPlan")
            .input("id", GqlValue::String("9f1c".into()))
            .input("name", GqlValue::String("Cash \"Plus\"".into()))
            .label("Update benefit plan \"Cash Plus\"")
            .tags("SOCIAL_PROTECTION_MUTATION_UPDATE_BENEFIT_PLAN")
    }

    #[test]
    fn test_mutation_document() {
        let request = builder().build().unwrap();
        let query = request.payload().query;
        assert!(query.starts_with("mutation {updateBenefitPlan(input: {clientMutationId: \""));
        assert!(query.contains(r#"clientMutationLabel: "Update benefit plan \"Cash Plus\"""#));
        assert!(query.contains(r#"name: "Cash \"Plus\"""#));
        assert!(query.ends_with("){clientMutationId,internalId}}"));
    }

    #[test]
    fn test_variables_form() {
        let request = builder().input_type("UpdateBenefitPlanMutationInput").build().unwrap();
        let payload = request.payload();
        assert_eq!(
            payload.query,
            "mutation ($input: UpdateBenefitPlanMutationInput!) {updateBenefitPlan(input: $input){clientMutationId,internalId}}"
        );
        let input = &payload.variables["input"];
        assert_eq!(input["clientMutationId"], request.client_mutation_id.to_string());
        assert_eq!(input["clientMutationLabel"], "Update benefit plan \"Cash Plus\"");
        assert_eq!(input["name"], "Cash \"Plus\"");
    }

    #[test]
    fn test_invalid_input_type_rejected() {
        let err = builder().input_type("Bad Type!").build().unwrap_err();
        assert_eq!(err, BuildError::InvalidName("Bad Type!".into()));
    }

    #[test]
    fn test_label_stored_unmodified() {
        let request = builder().build().unwrap();
        assert_eq!(request.label, "Update benefit plan \"Cash Plus\"");
    }

    #[test]
    fn test_fresh_id_per_build() {
        let b = builder();
        let first = b.build().unwrap();
        let second = b.build().unwrap();
        assert_ne!(first.client_mutation_id, second.client_mutation_id);
        assert!(second.requested_at >= first.requested_at);
    }

    #[test]
    fn test_tags_required() {
        let err = MutationBuilder::new("deleteProject").build().unwrap_err();
        assert_eq!(err, BuildError::MissingDispatch);
    }

    #[test]
    fn test_reserved_input_rejected() {
        let err = MutationBuilder::new("deleteProject")
            .input("clientMutationId", GqlValue::String("x".into()))
            .tags("X")
            .build()
            .unwrap_err();
        assert_eq!(err, BuildError::ReservedArgument("clientMutationId".into()));
    }
}
