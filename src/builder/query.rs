//! Query builder

use std::collections::HashSet;
use tracing::debug;

use crate::encoder::is_gql_name;
use crate::query::{Argument, Fragment};
use crate::request::{Dispatch, Page, QueryRequest, Selection};
use super::error::BuildError;

/// Builds a single top-level query
///
/// # Example
/// ```ignore
/// let request = QueryBuilder::new("beneficiary")
///     .fields(["id", "status"])
///     .filters(fragments)
///     .paginated(true)
///     .with_count(true)
///     .dispatch("SOCIAL_PROTECTION_BENEFICIARIES")
///     .build()?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct QueryBuilder {
    entity: String,
    projection: Vec<Selection>,
    fragments: Vec<Fragment>,
    paginated: bool,
    with_count: bool,
    page: Page,
    dispatch: Option<String>,
}

impl QueryBuilder {
    pub fn new(entity: impl Into<String>) -> Self {
        Self {
            entity: entity.into(),
            ..Default::default()
        }
    }

    pub fn field(mut self, field: impl Into<Selection>) -> Self {
        self.projection.push(field.into());
        self
    }

    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Selection>,
    {
        self.projection.extend(fields.into_iter().map(Into::into));
        self
    }

    pub fn filter(mut self, fragment: Fragment) -> Self {
        self.fragments.push(fragment);
        self
    }

    pub fn filters(mut self, fragments: impl IntoIterator<Item = Fragment>) -> Self {
        self.fragments.extend(fragments);
        self
    }

    /// Wrap the projection in `edges{node{..}}` with `pageInfo`
    pub fn paginated(mut self, paginated: bool) -> Self {
        self.paginated = paginated;
        self
    }

    /// Add `totalCount` to the projection
    pub fn with_count(mut self, with_count: bool) -> Self {
        self.with_count = with_count;
        self
    }

    pub fn page(mut self, page: Page) -> Self {
        self.page = page;
        self
    }

    /// Response tag prefix the result is routed under
    pub fn dispatch(mut self, prefix: impl Into<String>) -> Self {
        self.dispatch = Some(prefix.into());
        self
    }

    pub fn build(self) -> Result<QueryRequest, BuildError> {
        if !is_gql_name(&self.entity) {
            return Err(BuildError::InvalidName(self.entity));
        }
        let projection = dedup_projection(self.projection);
        if projection.is_empty() {
            return Err(BuildError::EmptyProjection);
        }
        let prefix = self
            .dispatch
            .filter(|p| !p.trim().is_empty())
            .ok_or(BuildError::MissingDispatch)?;

        let request = QueryRequest {
            entity: self.entity,
            projection,
            fragments: self.fragments,
            paginated: self.paginated,
            with_count: self.with_count,
            page: self.page,
            dispatch: Dispatch::Single(prefix),
        };
        check_unique_arguments(&request.arguments())?;

        debug!(
            target: "spquery::builder",
            entity = %request.entity,
            dispatch = %request.dispatch,
            fields = request.projection.len(),
            filters = request.fragments.len(),
            "built query"
        );
        Ok(request)
    }
}

/// Keep the first occurrence of each entry, preserving order
fn dedup_projection(projection: Vec<Selection>) -> Vec<Selection> {
    let mut seen = HashSet::new();
    projection
        .into_iter()
        .filter(|s| seen.insert(s.key()))
        .collect()
}

pub(crate) fn check_unique_arguments(arguments: &[Argument]) -> Result<(), BuildError> {
    let mut seen = HashSet::new();
    for arg in arguments {
        if !seen.insert(arg.name.as_str()) {
            return Err(BuildError::DuplicateArgument(arg.name.clone()));
        }
    }
    Ok(())
}
