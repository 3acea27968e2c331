//! Slices keyed by tag prefix

use std::collections::HashMap;

use tracing::debug;

use super::action::{Action, Phase};
use super::slice::Slice;

/// Response slices for the views currently mounted
///
/// A slice exists only between `mount` and `unmount`. Actions for any other
/// prefix, such as a response arriving after its view went away, are dropped.
#[derive(Debug, Clone, Default)]
pub struct ResponseStore {
    slices: HashMap<String, Slice>,
}

impl ResponseStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start accepting actions for `prefix`; an existing slice is kept
    pub fn mount(&mut self, prefix: impl Into<String>) {
        self.slices.entry(prefix.into()).or_default();
    }

    /// Stop accepting actions for `prefix` and drop its slice
    pub fn unmount(&mut self, prefix: &str) -> Option<Slice> {
        self.slices.remove(prefix)
    }

    pub fn is_mounted(&self, prefix: &str) -> bool {
        self.slices.contains_key(prefix)
    }

    pub fn slice(&self, prefix: &str) -> Option<&Slice> {
        self.slices.get(prefix)
    }

    /// Apply an action; false when it was discarded
    pub fn reduce(&mut self, action: &Action) -> bool {
        let Some((prefix, phase)) = action.route() else {
            debug!(target: "spquery::store", tag = %action.tag, "unrouted action");
            return false;
        };
        let Some(slice) = self.slices.get_mut(prefix) else {
            debug!(target: "spquery::store", tag = %action.tag, "discarding action for unmounted slice");
            return false;
        };
        match phase {
            Phase::Request => slice.begin(),
            Phase::Success => slice.succeed(action.payload.clone()),
            Phase::Error => slice.fail(&action.payload),
            Phase::Clear => *slice = Slice::default(),
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::ResponseTags;
    use serde_json::json;

    const PREFIX: &str = "SOCIAL_PROTECTION_BENEFICIARIES";

    #[test]
    fn test_lifecycle() {
        let tags = ResponseTags::from_prefix(PREFIX);
        let mut store = ResponseStore::new();
        store.mount(PREFIX);

        assert!(store.reduce(&Action::request(&tags)));
        assert!(store.slice(PREFIX).unwrap().fetching);

        assert!(store.reduce(&Action::success(&tags, json!({"beneficiary": {"totalCount": 7, "edges": []}}))));
        let slice = store.slice(PREFIX).unwrap();
        assert!(slice.fetched);
        assert_eq!(slice.total_count, Some(7));

        assert!(store.reduce(&Action::clear(&tags)));
        assert_eq!(store.slice(PREFIX), Some(&Slice::default()));
    }

    #[test]
    fn test_late_response_discarded() {
        let tags = ResponseTags::from_prefix(PREFIX);
        let mut store = ResponseStore::new();
        store.mount(PREFIX);
        store.reduce(&Action::request(&tags));
        store.unmount(PREFIX);

        assert!(!store.reduce(&Action::success(&tags, json!({"beneficiary": {"totalCount": 1}}))));
        assert!(store.slice(PREFIX).is_none());
    }

    #[test]
    fn test_unrouted_tag_ignored() {
        let mut store = ResponseStore::new();
        store.mount(PREFIX);
        assert!(!store.reduce(&Action::new(PREFIX, json!(null))));
    }
}
