//! Response tags routing results to store slices

use std::fmt;

pub const REQUEST_SUFFIX: &str = "_REQ";
pub const SUCCESS_SUFFIX: &str = "_RESP";
pub const ERROR_SUFFIX: &str = "_ERR";
pub const CLEAR_SUFFIX: &str = "_CLEAR";

/// The tags one logical operation dispatches under
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResponseTags {
    pub request: String,
    pub success: String,
    pub error: String,
    pub clear: String,
}

impl ResponseTags {
    /// `PREFIX_REQ`, `PREFIX_RESP`, `PREFIX_ERR`, `PREFIX_CLEAR`
    pub fn from_prefix(prefix: &str) -> Self {
        Self {
            request: format!("{}{}", prefix, REQUEST_SUFFIX),
            success: format!("{}{}", prefix, SUCCESS_SUFFIX),
            error: format!("{}{}", prefix, ERROR_SUFFIX),
            clear: format!("{}{}", prefix, CLEAR_SUFFIX),
        }
    }
}

/// How a request declares its tags
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Dispatch {
    /// Queries: one prefix, expanded by the store
    Single(String),
    /// Mutations: explicit request/success/error tags
    Triple(ResponseTags),
}

impl Dispatch {
    pub fn prefix(&self) -> Option<&str> {
        match self {
            Dispatch::Single(prefix) => Some(prefix),
            Dispatch::Triple(tags) => tags.request.strip_suffix(REQUEST_SUFFIX),
        }
    }

    pub fn tags(&self) -> ResponseTags {
        match self {
            Dispatch::Single(prefix) => ResponseTags::from_prefix(prefix),
            Dispatch::Triple(tags) => tags.clone(),
        }
    }
}

impl fmt::Display for Dispatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dispatch::Single(prefix) => write!(f, "{}", prefix),
            Dispatch::Triple(tags) => write!(f, "{}/{}/{}", tags.request, tags.success, tags.error),
        }
    }
}
