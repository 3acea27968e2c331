//! Filter types (nouns)
//!
//! Raw filter values, lookup kinds, and the typed fragments they encode into.

mod fragment;
mod lookup;
mod value;

pub use fragment::{Argument, Fragment, GqlValue};
pub use lookup::{LookupKind, ParseLookupError};
pub use value::{FilterInput, FilterValue, RangeValue};
