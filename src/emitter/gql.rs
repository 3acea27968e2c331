//! GraphQL emitter
//!
//! Transforms built requests into compact single-line GraphQL documents.
//! Every string literal goes through `quote_gql_string`.

use crate::encoder::quote_gql_string;
use crate::query::{Argument, GqlValue};
use crate::request::{MutationRequest, QueryRequest, Selection};

/// `{entity(args){projection}}`
pub fn emit_query(request: &QueryRequest) -> String {
    let field = emit_field(&request.entity, &request.arguments(), &request.effective_projection());
    format!("{{{}}}", field)
}

/// `mutation {op(input: {...}){clientMutationId,internalId}}`
///
/// With an input type: `mutation ($input: T!) {op(input: $input){...}}`.
pub fn emit_mutation(request: &MutationRequest) -> String {
    match &request.input_type {
        Some(input_type) => {
            let input = vec![Argument::new("input", GqlValue::Enum("$input".to_string()))];
            let field = emit_field(&request.operation, &input, &request.returning);
            format!("mutation ($input: {}!) {{{}}}", input_type, field)
        }
        None => {
            let input = vec![Argument::new("input", request.input_object())];
            let field = emit_field(&request.operation, &input, &request.returning);
            format!("mutation {{{}}}", field)
        }
    }
}

fn emit_field(name: &str, arguments: &[Argument], projection: &[Selection]) -> String {
    let mut out = String::from(name);
    if !arguments.is_empty() {
        out.push('(');
        out.push_str(&emit_arguments(arguments));
        out.push(')');
    }
    if !projection.is_empty() {
        out.push_str(&emit_selection_set(projection));
    }
    out
}

// ---------------------------------------------------------------------------
// Selections
// ---------------------------------------------------------------------------

pub fn emit_selection_set(selections: &[Selection]) -> String {
    let items: Vec<String> = selections.iter().map(emit_selection).collect();
    format!("{{{}}}", items.join(","))
}

pub fn emit_selection(selection: &Selection) -> String {
    match selection {
        Selection::Field(name) => name.clone(),
        Selection::Nested { name, children } => {
            format!("{}{}", name, emit_selection_set(children))
        }
        Selection::Raw(text) => text.clone(),
    }
}

// ---------------------------------------------------------------------------
// Arguments and values
// ---------------------------------------------------------------------------

pub fn emit_arguments(arguments: &[Argument]) -> String {
    let items: Vec<String> = arguments
        .iter()
        .map(|a| format!("{}: {}", a.name, emit_value(&a.value)))
        .collect();
    items.join(", ")
}

pub fn emit_value(value: &GqlValue) -> String {
    match value {
        GqlValue::Null => "null".to_string(),
        GqlValue::Bool(b) => b.to_string(),
        GqlValue::Int(i) => i.to_string(),
        GqlValue::Float(f) if f.is_finite() => format!("{}", f),
        // no literal exists for NaN or infinity
        GqlValue::Float(_) => "null".to_string(),
        GqlValue::String(s) => quote_gql_string(s),
        GqlValue::Enum(e) => e.clone(),
        GqlValue::List(items) => {
            let parts: Vec<String> = items.iter().map(emit_value).collect();
            format!("[{}]", parts.join(", "))
        }
        GqlValue::Object(fields) => format!("{{{}}}", emit_arguments(fields)),
    }
}
