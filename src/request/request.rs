//! Built requests and the payload posted to the endpoint

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::query::{Argument, Fragment, GqlValue};
use super::selection::Selection;
use super::tags::{Dispatch, ResponseTags};

/// Cursor pagination and ordering arguments
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub first: Option<u32>,
    pub last: Option<u32>,
    pub after: Option<String>,
    pub before: Option<String>,
    /// e.g. `["-dateCreated", "code"]`
    pub order_by: Vec<String>,
}

impl Page {
    pub fn first(n: u32) -> Self {
        Self {
            first: Some(n),
            ..Default::default()
        }
    }

    pub fn after(mut self, cursor: impl Into<String>) -> Self {
        self.after = Some(cursor.into());
        self
    }

    pub fn order_by(mut self, key: impl Into<String>) -> Self {
        self.order_by.push(key.into());
        self
    }

    pub fn arguments(&self) -> Vec<Argument> {
        let mut args = Vec::new();
        if let Some(n) = self.first {
            args.push(Argument::new("first", GqlValue::Int(i64::from(n))));
        }
        if let Some(n) = self.last {
            args.push(Argument::new("last", GqlValue::Int(i64::from(n))));
        }
        if let Some(cursor) = &self.after {
            args.push(Argument::new("after", GqlValue::String(cursor.clone())));
        }
        if let Some(cursor) = &self.before {
            args.push(Argument::new("before", GqlValue::String(cursor.clone())));
        }
        if !self.order_by.is_empty() {
            let keys = self.order_by.iter().cloned().map(GqlValue::String).collect();
            args.push(Argument::new("orderBy", GqlValue::List(keys)));
        }
        args
    }
}

/// A single top-level query
#[derive(Debug, Clone)]
pub struct QueryRequest {
    pub entity: String,
    pub projection: Vec<Selection>,
    pub fragments: Vec<Fragment>,
    pub paginated: bool,
    pub with_count: bool,
    pub page: Page,
    pub dispatch: Dispatch,
}

impl QueryRequest {
    /// Filter arguments followed by pagination arguments
    pub fn arguments(&self) -> Vec<Argument> {
        let mut args: Vec<Argument> = self
            .fragments
            .iter()
            .flat_map(|f| f.arguments().iter().cloned())
            .collect();
        args.extend(self.page.arguments());
        args
    }

    /// The projection actually sent, with connection wrapping applied
    pub fn effective_projection(&self) -> Vec<Selection> {
        let mut out = Vec::new();
        if self.with_count {
            out.push(Selection::field("totalCount"));
        }
        if self.paginated {
            out.push(Selection::nested(
                "pageInfo",
                ["hasNextPage", "hasPreviousPage", "startCursor", "endCursor"]
                    .into_iter()
                    .map(Selection::field)
                    .collect(),
            ));
            out.push(Selection::nested(
                "edges",
                vec![Selection::nested("node", self.projection.clone())],
            ));
        } else {
            out.extend(self.projection.iter().cloned());
        }
        out
    }

    pub fn payload(&self) -> GraphqlPayload {
        GraphqlPayload::new(crate::emitter::emit_query(self))
    }
}

/// A single top-level mutation
#[derive(Debug, Clone)]
pub struct MutationRequest {
    pub operation: String,
    pub input: Vec<Argument>,
    /// Audit label, stored exactly as given
    pub label: String,
    /// Unique per built request, time-ordered
    pub client_mutation_id: Uuid,
    pub requested_at: DateTime<Utc>,
    pub tags: ResponseTags,
    pub returning: Vec<Selection>,
    /// Declared type of `$input`; when set the input travels as a variable
    pub input_type: Option<String>,
}

impl MutationRequest {
    /// `input` object including the client mutation id and label
    pub fn input_object(&self) -> GqlValue {
        let mut fields = vec![
            Argument::new("clientMutationId", GqlValue::String(self.client_mutation_id.to_string())),
            Argument::new("clientMutationLabel", GqlValue::String(self.label.clone())),
        ];
        fields.extend(self.input.iter().cloned());
        GqlValue::Object(fields)
    }

    /// Inline document, or `$input` document plus `variables` when an input type is set
    pub fn payload(&self) -> GraphqlPayload {
        let payload = GraphqlPayload::new(crate::emitter::emit_mutation(self));
        if self.input_type.is_none() {
            return payload;
        }
        let mut variables = Map::new();
        variables.insert("input".to_string(), self.input_object().to_json());
        payload.with_variables(variables)
    }
}

/// JSON body posted to the GraphQL endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphqlPayload {
    pub query: String,
    #[serde(default)]
    pub variables: Map<String, Value>,
}

impl GraphqlPayload {
    pub fn new(query: String) -> Self {
        Self {
            query,
            variables: Map::new(),
        }
    }

    pub fn with_variables(mut self, variables: Map<String, Value>) -> Self {
        self.variables = variables;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_arguments() {
        let page = Page::first(20).after("YXJyYXljb25uZWN0aW9uOjE5").order_by("-dateCreated");
        let args = page.arguments();
        assert_eq!(args.len(), 3);
        assert_eq!(args[0], Argument::new("first", GqlValue::Int(20)));
        assert_eq!(args[2].name, "orderBy");
    }

    #[test]
    fn test_payload_serializes_with_variables_key() {
        let payload = GraphqlPayload::new("{ x }".into());
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json, serde_json::json!({"query": "{ x }", "variables": {}}));
    }
}
