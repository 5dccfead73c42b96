//! Trove: an immutable, keyed collection engine with dot-notation path
//! resolution for nested data.
//!
//! The two pieces collaborate: [`data_get`] resolves a dot-separated path
//! (with `*` wildcard fan-out) against any [`Value`] tree, falling back
//! to a default instead of erroring; [`Collection`] is an
//! insertion-ordered, keyed container whose operations (sorted
//! iteration, null stripping, extraction, pluck, the `where` family)
//! read element fields through that same resolver.

pub use crate::access::{data_get_on, FieldAccess};
pub use crate::collection::{collect, Collection, Entry, Key, SortedIter};
pub use crate::compare::Operator;
pub use crate::errors::TroveError;
pub use crate::path::{Path, Segment};
pub use crate::resolve::data_get;
pub use crate::value::Value;

pub mod access;
pub mod collection;
pub mod compare;
pub mod errors;
pub mod path;
pub mod resolve;
pub mod value;
