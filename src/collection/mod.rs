//! An immutable, insertion-ordered, keyed collection of values.
//!
//! `Collection` mirrors the shape of a dynamic associative array: entries
//! carry either integer or string keys, iteration follows insertion
//! order, and every transformation returns a new instance backed by a
//! persistent vector, so the original is never mutated.

mod query;

use crate::compare::sort_cmp;
use crate::errors::TroveError;
use crate::path::Path;
use crate::resolve::{data_get, resolve_path, Resolved};
use crate::value::Value;
use im::Vector;
use serde::de::{MapAccess, SeqAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A collection key: integer or string, never normalized across the two.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Key {
    Int(i64),
    Str(String),
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Int(i) => write!(f, "{i}"),
            Key::Str(s) => write!(f, "{s}"),
        }
    }
}

impl From<i64> for Key {
    fn from(i: i64) -> Self {
        Key::Int(i)
    }
}

impl From<usize> for Key {
    fn from(i: usize) -> Self {
        Key::Int(i as i64)
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Key::Str(s.to_string())
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Key::Str(s)
    }
}

/// One keyed slot of a collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub key: Key,
    pub value: Value,
}

/// The collection itself. Construction and the transformation primitives
/// live here; the query operations (`where` family, pluck, containment)
/// live in the `query` module.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Collection {
    entries: Vector<Entry>,
}

/// Builds a collection from anything convertible to a value: lists become
/// positionally keyed, maps keep their keys, nil is empty, and a bare
/// scalar wraps into a single-element collection.
///
/// # Examples
///
/// ```rust
/// use trove::collect;
/// use serde_json::json;
///
/// let c = collect(json!([1, 2, 3]));
/// assert_eq!(c.len(), 3);
/// assert!(collect(serde_json::Value::Null).is_empty());
/// ```
pub fn collect(value: impl Into<Value>) -> Collection {
    Collection::from_value(&value.into())
}

impl Collection {
    pub fn new() -> Self {
        Self {
            entries: Vector::new(),
        }
    }

    /// Positionally keyed collection over the given values.
    pub fn from_values(values: impl IntoIterator<Item = Value>) -> Self {
        Self {
            entries: values
                .into_iter()
                .enumerate()
                .map(|(index, value)| Entry {
                    key: Key::Int(index as i64),
                    value,
                })
                .collect(),
        }
    }

    pub fn from_pairs(pairs: impl IntoIterator<Item = (Key, Value)>) -> Self {
        Self {
            entries: pairs
                .into_iter()
                .map(|(key, value)| Entry { key, value })
                .collect(),
        }
    }

    /// The constructor wrapping rule: list, map, and collection values
    /// unwrap into entries; nil is empty; anything else becomes a
    /// single-element collection.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Nil => Self::new(),
            Value::List(items) => Self::from_values(items.iter().cloned()),
            Value::Map(map) => Self::from_pairs(
                map.iter()
                    .map(|(key, value)| (Key::Str(key.clone()), value.clone())),
            ),
            Value::Collection(c) => c.clone(),
            scalar => Self::from_values([scalar.clone()]),
        }
    }

    /// Resolves `field` on the reflected `source` and wraps the result.
    /// This is the one lookup that fails on a miss instead of defaulting.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde::Serialize;
    /// use trove::Collection;
    ///
    /// #[derive(Serialize)]
    /// struct Basket {
    ///     collection: Vec<u32>,
    /// }
    ///
    /// let basket = Basket { collection: vec![1, 2] };
    /// let c = Collection::extract_collection(&basket).unwrap();
    /// assert_eq!(c.len(), 2);
    /// ```
    pub fn extract_collection<T: Serialize>(source: &T) -> Result<Self, TroveError> {
        Self::extract_collection_at(source, "collection")
    }

    pub fn extract_collection_at<T: Serialize>(
        source: &T,
        field: &str,
    ) -> Result<Self, TroveError> {
        let image = Value::reflect(source)?;
        match resolve_path(&image, &Path::from(field)) {
            Resolved::Hit(value) => Ok(Self::from_value(&value)),
            Resolved::Many(items) => Ok(Self::from_values(items)),
            Resolved::Miss => Err(TroveError::FieldNotFound {
                field: field.to_string(),
            }),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &Key) -> Option<&Value> {
        self.entries
            .iter()
            .find(|entry| entry.key == *key)
            .map(|entry| &entry.value)
    }

    /// Lookup by a raw path segment: an exact string key wins, then a
    /// numeric segment falls back to the matching integer key.
    pub(crate) fn get_by_segment(&self, segment: &str) -> Option<&Value> {
        if let Some(entry) = self
            .entries
            .iter()
            .find(|entry| matches!(&entry.key, Key::Str(s) if s == segment))
        {
            return Some(&entry.value);
        }
        let index: i64 = segment.parse().ok()?;
        self.entries
            .iter()
            .find(|entry| entry.key == Key::Int(index))
            .map(|entry| &entry.value)
    }

    pub fn contains_key(&self, key: &Key) -> bool {
        self.entries.iter().any(|entry| entry.key == *key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &Key> + '_ {
        self.entries.iter().map(|entry| &entry.key)
    }

    /// The plain value sequence, in insertion order.
    pub fn values(&self) -> Vector<Value> {
        self.entries.iter().map(|entry| entry.value.clone()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entry> + '_ {
        self.entries.iter()
    }

    /// Appends under the next free non-negative integer key.
    pub fn push(&self, value: Value) -> Self {
        let mut entries = self.entries.clone();
        entries.push_back(Entry {
            key: Key::Int(self.next_index()),
            value,
        });
        Self { entries }
    }

    /// Upsert: an existing key keeps its position and takes the new value
    /// (last write wins), a fresh key appends.
    pub fn insert(&self, key: Key, value: Value) -> Self {
        let mut entries = self.entries.clone();
        match entries.iter().position(|entry| entry.key == key) {
            Some(position) => {
                entries.set(position, Entry { key, value });
            }
            None => entries.push_back(Entry { key, value }),
        }
        Self { entries }
    }

    fn next_index(&self) -> i64 {
        self.entries
            .iter()
            .filter_map(|entry| match entry.key {
                Key::Int(i) => Some(i),
                Key::Str(_) => None,
            })
            .max()
            .map_or(0, |max| (max + 1).max(0))
    }

    /// Maps every value, keeping keys.
    pub fn map(&self, f: impl Fn(&Value) -> Value) -> Self {
        Self {
            entries: self
                .entries
                .iter()
                .map(|entry| Entry {
                    key: entry.key.clone(),
                    value: f(&entry.value),
                })
                .collect(),
        }
    }

    /// Keeps the entries whose value satisfies the predicate; keys are
    /// preserved.
    pub fn filter(&self, pred: impl Fn(&Value) -> bool) -> Self {
        Self {
            entries: self
                .entries
                .iter()
                .filter(|entry| pred(&entry.value))
                .cloned()
                .collect(),
        }
    }

    pub fn reject(&self, pred: impl Fn(&Value) -> bool) -> Self {
        self.filter(|value| !pred(value))
    }

    /// Splits into (satisfying, rest); both halves keep original keys.
    pub fn partition(&self, pred: impl Fn(&Key, &Value) -> bool) -> (Self, Self) {
        let mut kept = Vector::new();
        let mut rest = Vector::new();
        for entry in &self.entries {
            if pred(&entry.key, &entry.value) {
                kept.push_back(entry.clone());
            } else {
                rest.push_back(entry.clone());
            }
        }
        (Self { entries: kept }, Self { entries: rest })
    }

    /// Splices one level of nested lists, maps, and collections into a
    /// positionally re-keyed collection; scalars pass through.
    pub fn flatten_one(&self) -> Self {
        let mut out = Vector::new();
        for entry in &self.entries {
            match &entry.value {
                Value::List(items) => out.extend(items.iter().cloned()),
                Value::Map(map) => out.extend(map.values().cloned()),
                Value::Collection(c) => {
                    out.extend(c.entries.iter().map(|entry| entry.value.clone()))
                }
                scalar => out.push_back(scalar.clone()),
            }
        }
        Self::from_values(out)
    }

    pub fn to_vec(&self) -> Vec<Value> {
        self.entries.iter().map(|entry| entry.value.clone()).collect()
    }

    pub fn to_value(&self) -> Value {
        Value::Collection(self.clone())
    }

    /// A restartable iterator over values ordered ascending by the value
    /// each element resolves at `field`. The sort is stable: elements with
    /// equal sort keys keep their relative input order.
    pub fn sorted_iter_on(&self, field: impl Into<Path>) -> SortedIter {
        let path = field.into();
        let mut items: Vec<Value> = self.to_vec();
        items.sort_by(|a, b| {
            sort_cmp(
                &data_get(a, path.clone(), Value::Nil),
                &data_get(b, path.clone(), Value::Nil),
            )
        });
        SortedIter {
            items: items.into_iter().collect(),
            position: 0,
        }
    }

    /// New collection materialized from `sorted_iter_on`, re-keyed
    /// positionally.
    pub fn sorted_by(&self, field: impl Into<Path>) -> Self {
        Self::from_values(self.sorted_iter_on(field))
    }

    /// New collection sorted by natural ordering over the raw values,
    /// re-keyed positionally.
    pub fn sorted(&self) -> Self {
        let mut items = self.to_vec();
        items.sort_by(sort_cmp);
        Self::from_values(items)
    }

    /// Drops entries whose value is empty.
    pub fn without_null(&self) -> Self {
        self.filter(|value| !value.is_empty())
    }

    /// Drops entries whose value resolved at `field` is empty.
    pub fn without_null_at(&self, field: impl Into<Path>) -> Self {
        let path = field.into();
        self.filter(|value| !data_get(value, path.clone(), Value::Nil).is_empty())
    }

    /// Extracts one field from every element: empty-valued elements are
    /// dropped, the resolved values are flattened one level and sorted
    /// ascending. Duplicates survive.
    pub fn extract(&self, field: impl Into<Path>) -> Self {
        let path = field.into();
        let resolved = path.clone();
        self.without_null_at(path)
            .map(move |value| data_get(value, resolved.clone(), Value::Nil))
            .flatten_one()
            .sorted()
    }

    /// Keeps the entries whose key is in `keys`, original keys preserved.
    pub fn filter_by_key(&self, keys: &[Key]) -> Self {
        let (kept, _) = self.partition(|key, _| keys.contains(key));
        kept
    }
}

/// A restartable, cloneable pass over an already-sorted value sequence.
#[derive(Debug, Clone)]
pub struct SortedIter {
    items: Vector<Value>,
    position: usize,
}

impl SortedIter {
    /// A fresh pass over the same sorted sequence.
    pub fn restart(&self) -> Self {
        Self {
            items: self.items.clone(),
            position: 0,
        }
    }
}

impl Iterator for SortedIter {
    type Item = Value;

    fn next(&mut self) -> Option<Value> {
        let value = self.items.get(self.position).cloned();
        self.position += 1;
        value
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        let mut first = true;
        for entry in &self.entries {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", entry.key, entry.value)?;
            first = false;
        }
        write!(f, "}}")
    }
}

impl IntoIterator for Collection {
    type Item = Entry;
    type IntoIter = im::vector::ConsumingIter<Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = &'a Entry;
    type IntoIter = im::vector::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl FromIterator<Value> for Collection {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self::from_values(iter)
    }
}

impl FromIterator<(Key, Value)> for Collection {
    fn from_iter<I: IntoIterator<Item = (Key, Value)>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}

impl Serialize for Collection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.key.to_string(), &entry.value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Collection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CollectionVisitor;

        impl<'de> Visitor<'de> for CollectionVisitor {
            type Value = Collection;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "a sequence or map of values")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Collection, A::Error> {
                let mut entries = Vector::new();
                let mut index = 0i64;
                while let Some(value) = seq.next_element::<Value>()? {
                    entries.push_back(Entry {
                        key: Key::Int(index),
                        value,
                    });
                    index += 1;
                }
                Ok(Collection { entries })
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Collection, A::Error> {
                let mut entries = Vector::new();
                while let Some((key, value)) = map.next_entry::<String, Value>()? {
                    entries.push_back(Entry {
                        key: Key::Str(key),
                        value,
                    });
                }
                Ok(Collection { entries })
            }
        }

        deserializer.deserialize_any(CollectionVisitor)
    }
}
