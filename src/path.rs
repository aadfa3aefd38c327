//! Dotted paths locating a field inside a student record.
//!
//! A [`FieldPath`] is what every [`FieldError`](crate::FieldError) points at:
//! `demographics.siblings` for a scalar field, `activities.sports[2]` for one
//! element of a list field.

use std::fmt::{self, Display};

use serde::{Serialize, Serializer};

/// One step of a [`FieldPath`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// A named key (`demographics`, `alias`).
    Field(String),
    /// A position inside a list field.
    Index(usize),
}

/// Location of a value inside a raw or validated record.
///
/// Paths are immutable; `push_*` returns a new path so a parent can hand
/// extended copies to each of its fields.
///
/// # Example
///
/// ```rust
/// use classroll::FieldPath;
///
/// let path = FieldPath::root()
///     .push_field("activities")
///     .push_field("sports")
///     .push_index(2);
///
/// assert_eq!(path.to_string(), "activities.sports[2]");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct FieldPath {
    segments: Vec<PathSegment>,
}

impl FieldPath {
    /// The empty path, i.e. the record itself.
    pub fn root() -> Self {
        Self::default()
    }

    /// Parses a dotted path such as `activities.sports[2]`.
    ///
    /// A bracketed segment that is not a number is kept as a literal field
    /// segment; trailing text after the last bracket is ignored.
    pub fn parse(dotted: &str) -> Self {
        let mut path = Self::root();
        for part in dotted.split('.').filter(|p| !p.is_empty()) {
            let (name, mut rest) = match part.find('[') {
                Some(pos) => (&part[..pos], &part[pos..]),
                None => (part, ""),
            };
            if !name.is_empty() {
                path = path.push_field(name);
            }
            while rest.starts_with('[') {
                let Some(close) = rest.find(']') else { break };
                match rest[1..close].parse::<usize>() {
                    Ok(idx) => path = path.push_index(idx),
                    Err(_) => path = path.push_field(&rest[..=close]),
                }
                rest = &rest[close + 1..];
            }
        }
        path
    }

    /// Returns a new path with a field segment appended.
    pub fn push_field(&self, name: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Field(name.into()));
        Self { segments }
    }

    /// Returns a new path with an index segment appended.
    pub fn push_index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Index(index));
        Self { segments }
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> impl Iterator<Item = &PathSegment> {
        self.segments.iter()
    }

    /// The path without its last segment, or `None` at the root.
    pub fn parent(&self) -> Option<Self> {
        let (_, init) = self.segments.split_last()?;
        Some(Self {
            segments: init.to_vec(),
        })
    }

    /// The first field segment, which for record paths names the group.
    pub fn group(&self) -> Option<&str> {
        match self.segments.first() {
            Some(PathSegment::Field(name)) => Some(name),
            _ => None,
        }
    }

    /// True if `self` equals `prefix` or lies underneath it.
    pub fn starts_with(&self, prefix: &FieldPath) -> bool {
        self.segments.starts_with(&prefix.segments)
    }
}

impl Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Field(name) => {
                    if i > 0 {
                        write!(f, ".")?;
                    }
                    write!(f, "{}", name)?;
                }
                PathSegment::Index(idx) => write!(f, "[{}]", idx)?,
            }
        }
        Ok(())
    }
}

impl Serialize for FieldPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl From<&str> for FieldPath {
    fn from(dotted: &str) -> Self {
        Self::parse(dotted)
    }
}
