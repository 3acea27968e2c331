//! Response store (nouns)
//!
//! Request/response/error slices keyed by response-tag prefix, with explicit
//! mount and unmount.

mod action;
mod slice;
mod store;

pub use action::{Action, Phase};
pub use slice::{PageInfo, Slice};
pub use store::ResponseStore;
