//! The field-access capability seam.
//!
//! `FieldAccess` is the single interface through which a path segment
//! reads one named field off a target. `Value` implements it with keyed
//! and indexed lookup; user types can implement it directly to expose
//! getter-style access without being imaged through serde first.

use crate::path::{Path, Segment};
use crate::resolve::data_get;
use crate::value::Value;

/// Read one named field off a target, or report that it has none.
pub trait FieldAccess {
    fn field(&self, name: &str) -> Option<Value>;
}

impl FieldAccess for Value {
    /// The direct read path: map key lookup, list index lookup, and
    /// collection key lookup.
    fn field(&self, name: &str) -> Option<Value> {
        match self {
            Value::Map(map) => map.get(name).cloned(),
            Value::List(items) => name
                .parse::<usize>()
                .ok()
                .and_then(|index| items.get(index).cloned()),
            Value::Collection(c) => c.get_by_segment(name).cloned(),
            _ => None,
        }
    }
}

/// Resolves a path against any `FieldAccess` source: the first segment
/// goes through the capability, the remainder through normal value
/// resolution. Misses produce `default`, never an error.
///
/// The first segment must be a literal name; a wildcard cannot fan out
/// over an opaque source, and the empty path has no value to return, so
/// both produce `default`.
pub fn data_get_on(source: &dyn FieldAccess, path: impl Into<Path>, default: Value) -> Value {
    let path = path.into();
    let Some((first, rest)) = path.segments().split_first() else {
        return default;
    };
    let Segment::Key(name) = first else {
        return default;
    };
    let Some(value) = source.field(name) else {
        return default;
    };
    if rest.is_empty() {
        return value;
    }
    data_get(&value, Path::from_segments(rest.to_vec()), default)
}
