//! Query operations: pluck, strict containment, and the `where` family.
//!
//! Every operation resolves element fields through `data_get`, so a dot
//! path (or a wildcard path) works anywhere a plain field name does, and
//! a missing field behaves like nil rather than an error.

use super::{Collection, Key};
use crate::compare::{compare, loose_eq, loose_gt, loose_lt, Operator};
use crate::path::Path;
use crate::resolve::data_get;
use crate::value::Value;

impl Collection {
    /// Resolves `value_path` on every element, keyed positionally.
    /// Elements missing the path contribute nil.
    pub fn pluck(&self, value_path: impl Into<Path>) -> Self {
        let path = value_path.into();
        Self::from_values(
            self.iter()
                .map(|entry| data_get(&entry.value, path.clone(), Value::Nil)),
        )
    }

    /// Like [`pluck`](Self::pluck), but keyed by each element's resolved
    /// value at `key_path`, coerced to text. Later duplicate keys
    /// overwrite earlier ones; a key with no textual representation falls
    /// back to positional append.
    pub fn pluck_with_keys(
        &self,
        value_path: impl Into<Path>,
        key_path: impl Into<Path>,
    ) -> Self {
        let value_path = value_path.into();
        let key_path = key_path.into();
        let mut out = Collection::new();
        for entry in self.iter() {
            let item_value = data_get(&entry.value, value_path.clone(), Value::Nil);
            let item_key = data_get(&entry.value, key_path.clone(), Value::Nil);
            out = match item_key.as_key_string() {
                Some(key) => out.insert(Key::Str(key), item_value),
                None => out.push(item_value),
            };
        }
        out
    }

    /// True iff some element's resolved value at `key` is identical
    /// (type and value) to `value`.
    pub fn contains_strict(&self, key: impl Into<Path>, value: &Value) -> bool {
        let path = key.into();
        self.iter()
            .any(|entry| data_get(&entry.value, path.clone(), Value::Nil) == *value)
    }

    /// True iff the raw value itself is present, under identity
    /// comparison.
    pub fn contains_value_strict(&self, value: &Value) -> bool {
        self.iter().any(|entry| entry.value == *value)
    }

    /// The callable form: true iff some element satisfies the predicate.
    pub fn contains_strict_by(&self, pred: impl Fn(&Value) -> bool) -> bool {
        self.iter().any(|entry| pred(&entry.value))
    }

    /// Keeps elements whose resolved value at `key` satisfies
    /// `op value`.
    pub fn where_op(&self, key: impl Into<Path>, op: Operator, value: &Value) -> Self {
        let path = key.into();
        self.filter(|element| compare(&data_get(element, path.clone(), Value::Nil), op, value))
    }

    /// The two-argument form: operator `=`.
    pub fn where_eq(&self, key: impl Into<Path>, value: &Value) -> Self {
        self.where_op(key, Operator::Eq, value)
    }

    /// The one-argument form: `= true`, i.e. keeps elements whose
    /// resolved value is truthy.
    pub fn where_truthy(&self, key: impl Into<Path>) -> Self {
        self.where_op(key, Operator::Eq, &Value::Bool(true))
    }

    /// Keeps elements whose resolved value at `key` is a member of
    /// `values`: identity comparison when `strict`, loose otherwise.
    pub fn where_in(&self, key: impl Into<Path>, values: &[Value], strict: bool) -> Self {
        let path = key.into();
        self.filter(|element| {
            let resolved = data_get(element, path.clone(), Value::Nil);
            values.iter().any(|candidate| {
                if strict {
                    resolved == *candidate
                } else {
                    loose_eq(&resolved, candidate)
                }
            })
        })
    }

    pub fn where_not_in(&self, key: impl Into<Path>, values: &[Value], strict: bool) -> Self {
        let path = key.into();
        self.filter(|element| {
            let resolved = data_get(element, path.clone(), Value::Nil);
            !values.iter().any(|candidate| {
                if strict {
                    resolved == *candidate
                } else {
                    loose_eq(&resolved, candidate)
                }
            })
        })
    }

    /// Keeps elements strictly below `lo` or strictly above `hi`. The
    /// bounds are taken in the order given, never auto-sorted.
    pub fn where_not_between(&self, key: impl Into<Path>, lo: &Value, hi: &Value) -> Self {
        let path = key.into();
        self.filter(|element| {
            let resolved = data_get(element, path.clone(), Value::Nil);
            loose_lt(&resolved, lo) || loose_gt(&resolved, hi)
        })
    }
}
