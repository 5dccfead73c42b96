//! The dynamic value tree shared by the path resolver and the collection
//! engine.
//!
//! Every element a [`Collection`] holds, and every target [`data_get`]
//! resolves against, is a `Value`. Structured data enters the tree either
//! directly (from JSON, or by building lists and maps by hand) or through
//! [`Value::reflect`], which images any `Serialize` type as a value tree.
//!
//! [`Collection`]: crate::collection::Collection
//! [`data_get`]: crate::resolve::data_get

use crate::collection::Collection;
use crate::errors::TroveError;
use im::{OrdMap, Vector};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A value in a trove tree.
///
/// # Examples
///
/// ```rust
/// use trove::Value;
/// let n = Value::Number(3.14);
/// assert_eq!(n.type_name(), "Number");
/// let s = Value::String("hello".to_string());
/// assert_eq!(s.type_name(), "String");
/// let nil = Value::default();
/// assert!(nil.is_nil());
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Nil,
    Bool(bool),
    Number(f64),
    String(String),
    List(Vector<Value>),
    Map(OrdMap<String, Value>),
    Collection(Collection),
}

impl Value {
    /// Returns the type name of the value as a string.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "Nil",
            Value::Bool(_) => "Bool",
            Value::Number(_) => "Number",
            Value::String(_) => "String",
            Value::List(_) => "List",
            Value::Map(_) => "Map",
            Value::Collection(_) => "Collection",
        }
    }

    /// Returns true if the value is Nil.
    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    /// Returns the contained bool if this is a Bool value.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the contained number if this is a Number value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use trove::Value;
    /// assert_eq!(Value::Number(2.0).as_number(), Some(2.0));
    /// assert_eq!(Value::String("nope".to_string()).as_number(), None);
    /// ```
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the contained string slice if this is a String value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// The "empty" check used by `without_null` and `extract`: nil, false,
    /// numeric zero, the empty string, and empty containers are all empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use trove::Value;
    /// assert!(Value::Nil.is_empty());
    /// assert!(Value::Number(0.0).is_empty());
    /// assert!(!Value::String("0".to_string()).is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        match self {
            Value::Nil => true,
            Value::Bool(b) => !b,
            Value::Number(n) => *n == 0.0,
            Value::String(s) => s.is_empty(),
            Value::List(items) => items.is_empty(),
            Value::Map(map) => map.is_empty(),
            Value::Collection(c) => c.is_empty(),
        }
    }

    /// Truthiness for loose boolean comparison.
    pub fn truthy(&self) -> bool {
        !self.is_empty()
    }

    /// The textual representation used when a plucked key must become a
    /// collection key. Scalars coerce; lists, maps, and collections do not.
    pub fn as_key_string(&self) -> Option<String> {
        match self {
            Value::Nil => Some(String::new()),
            Value::Bool(_) | Value::Number(_) | Value::String(_) => Some(self.to_string()),
            _ => None,
        }
    }

    /// Images an arbitrary `Serialize` type as a value tree.
    ///
    /// This is the reflective field-access path: struct fields, public or
    /// not, are reachable through the type's `Serialize` impl, the same way
    /// a property accessor reaches non-public storage.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde::Serialize;
    /// use trove::Value;
    ///
    /// #[derive(Serialize)]
    /// struct User {
    ///     name: String,
    /// }
    ///
    /// let image = Value::reflect(&User { name: "Ann".into() }).unwrap();
    /// assert_eq!(image.type_name(), "Map");
    /// ```
    pub fn reflect<T: Serialize>(source: &T) -> Result<Value, TroveError> {
        let json = serde_json::to_value(source)?;
        Ok(Value::from(json))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "nil"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => {
                if n.fract() == 0.0 && n.is_finite() {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{n}")
                }
            }
            Value::String(s) => write!(f, "{s}"),
            Value::List(items) => {
                write!(f, "[")?;
                let mut first = true;
                for item in items {
                    if !first {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                    first = false;
                }
                write!(f, "]")
            }
            Value::Map(map) => {
                write!(f, "{{")?;
                let mut first = true;
                for (key, value) in map {
                    if !first {
                        write!(f, ", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                    first = false;
                }
                write!(f, "}}")
            }
            Value::Collection(c) => write!(f, "{c}"),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items.into_iter().collect())
    }
}

impl From<Vector<Value>> for Value {
    fn from(items: Vector<Value>) -> Self {
        Value::List(items)
    }
}

impl From<Collection> for Value {
    fn from(c: Collection) -> Self {
        Value::Collection(c)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Nil,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Value::Map(
                map.into_iter()
                    .map(|(key, value)| (key, Value::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<Value> for serde_json::Value {
    fn from(value: Value) -> Self {
        match value {
            Value::Nil => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(b),
            Value::Number(n) => {
                if n.fract() == 0.0 && n >= i64::MIN as f64 && n <= i64::MAX as f64 {
                    serde_json::Value::Number((n as i64).into())
                } else {
                    serde_json::Number::from_f64(n)
                        .map_or(serde_json::Value::Null, serde_json::Value::Number)
                }
            }
            Value::String(s) => serde_json::Value::String(s),
            Value::List(items) => {
                serde_json::Value::Array(items.into_iter().map(Into::into).collect())
            }
            Value::Map(map) => serde_json::Value::Object(
                map.into_iter()
                    .map(|(key, value)| (key, value.into()))
                    .collect(),
            ),
            Value::Collection(c) => serde_json::Value::Object(
                c.into_iter()
                    .map(|entry| (entry.key.to_string(), entry.value.into()))
                    .collect(),
            ),
        }
    }
}
