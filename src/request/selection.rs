//! Projection entries

use crate::encoder::is_gql_name;

/// One entry of a projection
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    /// A scalar field
    Field(String),
    /// A relation with its own projection
    Nested { name: String, children: Vec<Selection> },
    /// Caller-supplied projection text, appended verbatim
    Raw(String),
}

impl Selection {
    pub fn field(name: impl Into<String>) -> Self {
        Selection::Field(name.into())
    }

    pub fn nested(name: impl Into<String>, children: Vec<Selection>) -> Self {
        Selection::Nested {
            name: name.into(),
            children,
        }
    }

    /// `relation {subfields}` by concatenation; `subfields` is not parsed
    pub fn relation(name: &str, subfields: &str) -> Self {
        Selection::Raw(format!("{} {{{}}}", name, subfields))
    }

    /// Key used to detect duplicate entries in a projection
    pub fn key(&self) -> String {
        crate::emitter::emit_selection(self)
    }
}

impl From<&str> for Selection {
    /// Plain names become fields, anything else is kept as raw text
    fn from(s: &str) -> Self {
        if is_gql_name(s) {
            Selection::Field(s.to_string())
        } else {
            Selection::Raw(s.to_string())
        }
    }
}

impl From<String> for Selection {
    fn from(s: String) -> Self {
        Selection::from(s.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!(Selection::from("status"), Selection::Field("status".into()));
        assert_eq!(
            Selection::from("individual {firstName lastName}"),
            Selection::Raw("individual {firstName lastName}".into())
        );
    }

    #[test]
    fn test_relation_concatenation() {
        let sel = Selection::relation("benefitPlan", "id code name");
        assert_eq!(sel, Selection::Raw("benefitPlan {id code name}".into()));
    }
}
