//! A canonical, type-safe representation of a dot-notation path into a
//! value tree.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One step of a [`Path`]: either a literal key/index name, or the `*`
/// wildcard that fans resolution out across every element of the current
/// container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Segment {
    Key(String),
    Wildcard,
}

impl Segment {
    fn parse(raw: &str) -> Self {
        if raw == "*" {
            Segment::Wildcard
        } else {
            Segment::Key(raw.to_string())
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Key(name) => write!(f, "{name}"),
            Segment::Wildcard => write!(f, "*"),
        }
    }
}

/// A dot-separated path such as `"user.address.city"` or `"orders.*.id"`.
///
/// The empty path denotes identity: resolving it returns the target
/// unchanged.
///
/// # Examples
///
/// ```rust
/// use trove::Path;
/// let path = Path::from("user.address.city");
/// assert_eq!(path.to_string(), "user.address.city");
/// assert_eq!(path.0.len(), 3);
/// assert!(Path::from("").is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Path(pub Vec<Segment>);

impl Path {
    pub fn new() -> Self {
        Path(Vec::new())
    }

    /// Splits a raw dot-separated string into segments. The empty string
    /// parses to the empty path.
    pub fn parse(raw: &str) -> Self {
        if raw.is_empty() {
            return Path::new();
        }
        Path(raw.split('.').map(Segment::parse).collect())
    }

    pub fn from_segments(segments: Vec<Segment>) -> Self {
        Path(segments)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.0
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for segment in &self.0 {
            if !first {
                write!(f, ".")?;
            }
            write!(f, "{segment}")?;
            first = false;
        }
        Ok(())
    }
}

impl From<&str> for Path {
    fn from(raw: &str) -> Self {
        Path::parse(raw)
    }
}

impl From<String> for Path {
    fn from(raw: String) -> Self {
        Path::parse(&raw)
    }
}

impl From<&Path> for Path {
    fn from(path: &Path) -> Self {
        path.clone()
    }
}

/// Builds a path from pre-split segment strings, without re-splitting on
/// dots. A `"*"` segment is still the wildcard.
impl From<Vec<String>> for Path {
    fn from(segments: Vec<String>) -> Self {
        Path(segments.iter().map(|raw| Segment::parse(raw)).collect())
    }
}

impl From<&[&str]> for Path {
    fn from(segments: &[&str]) -> Self {
        Path(segments.iter().map(|raw| Segment::parse(raw)).collect())
    }
}

impl FromIterator<Segment> for Path {
    fn from_iter<I: IntoIterator<Item = Segment>>(iter: I) -> Self {
        Path(iter.into_iter().collect())
    }
}
