//! Field-scoped validation errors.
//!
//! This module provides [`FieldError`] for a single constraint violation and
//! [`FieldErrors`] for the ordered, non-empty list a rejected record yields.

use std::fmt::{self, Display};

use serde::{Serialize, Serializer};
use stillwater::prelude::*;

use crate::path::FieldPath;

/// What kind of constraint a field violated.
///
/// There is no record-level kind: a record is rejected exactly when its error
/// list is non-empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// A required field (or a whole group) is absent.
    MissingField,
    /// The value has the wrong JSON type or cannot be coerced.
    TypeMismatch,
    /// A number lies outside its inclusive bounds.
    OutOfRange,
    /// A string is shorter than its minimum length, or a list has too few items.
    TooShort,
    /// A string is longer than its maximum length.
    TooLong,
    /// A scalar is not in its closed literal set or vocabulary.
    InvalidEnum,
    /// One or more list elements are absent from the vocabulary.
    InvalidVocabularyMember,
}

impl ErrorKind {
    /// Every kind, in taxonomy order.
    pub const ALL: [ErrorKind; 7] = [
        ErrorKind::MissingField,
        ErrorKind::TypeMismatch,
        ErrorKind::OutOfRange,
        ErrorKind::TooShort,
        ErrorKind::TooLong,
        ErrorKind::InvalidEnum,
        ErrorKind::InvalidVocabularyMember,
    ];

    /// Machine-readable code, e.g. `out_of_range`.
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::MissingField => "missing_field",
            ErrorKind::TypeMismatch => "type_mismatch",
            ErrorKind::OutOfRange => "out_of_range",
            ErrorKind::TooShort => "too_short",
            ErrorKind::TooLong => "too_long",
            ErrorKind::InvalidEnum => "invalid_enum",
            ErrorKind::InvalidVocabularyMember => "invalid_vocabulary_member",
        }
    }

    fn name(&self) -> &'static str {
        match self {
            ErrorKind::MissingField => "MissingField",
            ErrorKind::TypeMismatch => "TypeMismatch",
            ErrorKind::OutOfRange => "OutOfRange",
            ErrorKind::TooShort => "TooShort",
            ErrorKind::TooLong => "TooLong",
            ErrorKind::InvalidEnum => "InvalidEnum",
            ErrorKind::InvalidVocabularyMember => "InvalidVocabularyMember",
        }
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single constraint violation with full context.
///
/// # Example
///
/// ```rust
/// use classroll::{ErrorKind, FieldError, FieldPath};
///
/// let error = FieldError::new(
///     FieldPath::parse("demographics.siblings"),
///     ErrorKind::OutOfRange,
///     "must be between 0 and 20, got -1",
/// )
/// .with_got("-1")
/// .with_expected("0..=20");
///
/// assert_eq!(error.kind.code(), "out_of_range");
/// assert_eq!(error.path.to_string(), "demographics.siblings");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    /// Where the violation occurred.
    pub path: FieldPath,
    pub kind: ErrorKind,
    /// Human-readable reason. Enum and vocabulary failures list every allowed value.
    pub message: String,
    /// The received value, rendered as text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub got: Option<String>,
    /// Short description of what would have been accepted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<String>,
}

impl FieldError {
    pub fn new(path: FieldPath, kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            path,
            kind,
            message: message.into(),
            got: None,
            expected: None,
        }
    }

    /// A required field that is absent.
    pub fn missing(path: FieldPath) -> Self {
        let name = match path.segments().last() {
            Some(crate::PathSegment::Field(name)) => name.clone(),
            _ => path.to_string(),
        };
        Self::new(path, ErrorKind::MissingField, format!("required field '{}' is missing", name))
            .with_expected("value")
    }

    /// A value of the wrong JSON type.
    pub fn type_mismatch(path: FieldPath, expected: &str, got: impl Into<String>) -> Self {
        Self::new(path, ErrorKind::TypeMismatch, format!("expected {}", expected))
            .with_expected(expected)
            .with_got(got)
    }

    pub fn with_got(mut self, got: impl Into<String>) -> Self {
        self.got = Some(got.into());
        self
    }

    pub fn with_expected(mut self, expected: impl Into<String>) -> Self {
        self.expected = Some(expected.into());
        self
    }

    /// Shorthand for `self.kind.code()`.
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }
}

impl Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_root() {
            write!(f, "(root)")?;
        } else {
            write!(f, "{}", self.path)?;
        }
        write!(f, ": [{}] {}", self.kind, self.message)?;
        if let Some(ref got) = self.got {
            write!(f, " (got: {})", got)?;
        }
        Ok(())
    }
}

impl std::error::Error for FieldError {}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<FieldError>();
    assert_sync::<FieldError>();
};

/// The ordered, non-empty list of violations for one rejected input.
///
/// Order follows evaluation: group order (demographics, academics,
/// behavioral, activities, digital_metrics), then field declaration order,
/// then element order within a list.
///
/// # Combining Errors
///
/// ```rust
/// use classroll::{ErrorKind, FieldError, FieldErrors, FieldPath};
/// use stillwater::prelude::*;
///
/// let a = FieldErrors::single(FieldError::missing(FieldPath::parse("academics.academic_interest")));
/// let b = FieldErrors::single(FieldError::missing(FieldPath::parse("academics.favorite_subject")));
///
/// let combined = a.combine(b);
/// assert_eq!(combined.len(), 2);
/// assert_eq!(combined.of_kind(ErrorKind::MissingField).len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FieldErrors(NonEmptyVec<FieldError>);

impl FieldErrors {
    pub fn single(error: FieldError) -> Self {
        Self(NonEmptyVec::singleton(error))
    }

    pub fn from_non_empty(errors: NonEmptyVec<FieldError>) -> Self {
        Self(errors)
    }

    /// Wraps a list of errors, or returns `None` when the list is empty.
    pub fn from_vec(errors: Vec<FieldError>) -> Option<Self> {
        NonEmptyVec::from_vec(errors).map(Self)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    pub fn first(&self) -> &FieldError {
        self.0.head()
    }

    /// All errors reported at exactly `path`.
    pub fn at_path(&self, path: &FieldPath) -> Vec<&FieldError> {
        self.0.iter().filter(|e| &e.path == path).collect()
    }

    /// All errors of the given kind.
    pub fn of_kind(&self, kind: ErrorKind) -> Vec<&FieldError> {
        self.0.iter().filter(|e| e.kind == kind).collect()
    }

    /// All errors whose path lies under the named group.
    pub fn in_group(&self, group: &str) -> Vec<&FieldError> {
        self.0.iter().filter(|e| e.path.group() == Some(group)).collect()
    }

    /// Dotted paths of every error, in report order.
    pub fn paths(&self) -> Vec<String> {
        self.0.iter().map(|e| e.path.to_string()).collect()
    }

    pub fn into_vec(self) -> Vec<FieldError> {
        self.0.into_vec()
    }

    pub fn as_non_empty_vec(&self) -> &NonEmptyVec<FieldError> {
        &self.0
    }
}

impl Semigroup for FieldErrors {
    fn combine(self, other: Self) -> Self {
        FieldErrors(self.0.combine(other.0))
    }
}

impl Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Validation failed with {} error(s):", self.len())?;
        for (i, error) in self.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, error)?;
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

impl Serialize for FieldErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl IntoIterator for FieldErrors {
    type Item = FieldError;
    type IntoIter = std::vec::IntoIter<FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_vec().into_iter()
    }
}

impl<'a> IntoIterator for &'a FieldErrors {
    type Item = &'a FieldError;
    type IntoIter = Box<dyn Iterator<Item = &'a FieldError> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.0.iter())
    }
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<FieldErrors>();
    assert_sync::<FieldErrors>();
};
