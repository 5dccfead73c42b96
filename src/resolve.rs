//! Dot-notation path resolution over value trees.
//!
//! The resolver walks literal segments front to back and fans out on the
//! `*` wildcard. It never panics and never errors: any segment that
//! cannot be followed resolves the whole lookup to the caller-supplied
//! default.

use crate::path::{Path, Segment};
use crate::value::Value;
use im::Vector;

/// The tagged outcome of walking a segment sequence. `Many` keeps
/// wildcard fan-out distinct from a plain hit so that one-level collapse
/// stays precise.
pub(crate) enum Resolved {
    Hit(Value),
    Many(Vector<Value>),
    Miss,
}

/// Gets a value from a nested structure using dot notation.
///
/// # Examples
///
/// ```rust
/// use trove::{data_get, Value};
/// use serde_json::json;
///
/// let target = Value::from(json!({"user": {"name": "Ann"}}));
/// assert_eq!(
///     data_get(&target, "user.name", Value::Nil),
///     Value::from("Ann")
/// );
/// assert_eq!(
///     data_get(&target, "user.age", Value::from(-1)),
///     Value::from(-1)
/// );
/// ```
pub fn data_get(target: &Value, path: impl Into<Path>, default: Value) -> Value {
    match resolve_path(target, &path.into()) {
        Resolved::Hit(value) => value,
        Resolved::Many(items) => Value::List(items),
        Resolved::Miss => default,
    }
}

pub(crate) fn resolve_path(target: &Value, path: &Path) -> Resolved {
    if path.is_empty() {
        return Resolved::Hit(target.clone());
    }
    resolve_segments(target, path.segments())
}

fn resolve_segments(target: &Value, segments: &[Segment]) -> Resolved {
    let mut current = target.clone();
    let mut index = 0;
    while index < segments.len() {
        match &segments[index] {
            Segment::Wildcard => {
                let items: Vector<Value> = match &current {
                    Value::Collection(c) => c.values(),
                    Value::List(items) => items.clone(),
                    Value::Map(map) => map.values().cloned().collect(),
                    _ => return Resolved::Miss,
                };
                let rest = &segments[index + 1..];
                if rest.is_empty() {
                    return Resolved::Many(items);
                }
                // Fan the remaining segments out over every element;
                // elements missing the remainder contribute nil.
                let fanned: Vector<Value> = items
                    .iter()
                    .map(|item| match resolve_segments(item, rest) {
                        Resolved::Hit(value) => value,
                        Resolved::Many(inner) => Value::List(inner),
                        Resolved::Miss => Value::Nil,
                    })
                    .collect();
                let result = if rest.contains(&Segment::Wildcard) {
                    collapse(&fanned)
                } else {
                    fanned
                };
                return Resolved::Many(result);
            }
            Segment::Key(name) => {
                let next = match &current {
                    Value::Map(map) => map.get(name.as_str()).cloned(),
                    Value::List(items) => name
                        .parse::<usize>()
                        .ok()
                        .and_then(|i| items.get(i).cloned()),
                    Value::Collection(c) => c.get_by_segment(name).cloned(),
                    _ => None,
                };
                match next {
                    Some(value) => current = value,
                    None => return Resolved::Miss,
                }
            }
        }
        index += 1;
    }
    Resolved::Hit(current)
}

/// One-level flatten: concatenates list elements, dropping non-lists.
fn collapse(items: &Vector<Value>) -> Vector<Value> {
    let mut out = Vector::new();
    for item in items {
        if let Value::List(inner) = item {
            out.append(inner.clone());
        }
    }
    out
}
