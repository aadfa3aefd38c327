//! Declarative per-field constraints.
//!
//! A [`FieldConstraint`] is checked against a value that has already been
//! type-coerced and normalized ([`FieldValue`]). Checks are stateless apart
//! from the vocabulary bundle passed in.

use crate::error::{ErrorKind, FieldError};
use crate::path::FieldPath;
use crate::vocabulary::{Vocabularies, VocabularyKind};

use super::field::FieldValue;

/// The closed set a scalar must belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Literals {
    /// Lowercase string tokens, compared after normalization.
    Text(&'static [&'static str]),
    /// Integers, compared exactly.
    Integer(&'static [i64]),
    /// Membership in a controlled vocabulary, compared after normalization.
    Vocabulary(VocabularyKind),
}

/// A rule attached to one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldConstraint {
    /// Inclusive numeric bounds.
    Range { min: i64, max: i64 },
    /// Inclusive bounds on string length in characters.
    Length { min: usize, max: usize },
    /// The value must be one of a closed set.
    Enum(Literals),
    /// A list with at least `min_items` elements, each a vocabulary member.
    VocabularyList {
        vocabulary: VocabularyKind,
        min_items: usize,
    },
}

impl FieldConstraint {
    /// Checks a coerced, normalized value.
    ///
    /// Returns `None` when the value passes. A constraint paired with a value
    /// of a shape it does not apply to (a `Range` given text, say) also
    /// passes; field specs only ever build matching pairs.
    pub(crate) fn check(
        &self,
        value: &FieldValue,
        path: &FieldPath,
        vocabularies: &Vocabularies,
    ) -> Option<FieldError> {
        match (self, value) {
            (FieldConstraint::Range { min, max }, FieldValue::Integer(n)) => {
                check_range(*n, *min, *max, path)
            }
            (FieldConstraint::Length { min, max }, FieldValue::Text(s)) => {
                check_length(s, *min, *max, path)
            }
            (FieldConstraint::Enum(Literals::Text(allowed)), FieldValue::Text(s)) => {
                if allowed.iter().any(|token| *token == s.as_str()) {
                    None
                } else {
                    Some(invalid_enum(path, s, &render_list(allowed.iter())))
                }
            }
            (FieldConstraint::Enum(Literals::Integer(allowed)), FieldValue::Integer(n)) => {
                if allowed.contains(n) {
                    None
                } else {
                    Some(invalid_enum(path, &n.to_string(), &render_list(allowed.iter())))
                }
            }
            (FieldConstraint::Enum(Literals::Vocabulary(kind)), FieldValue::Text(s)) => {
                let vocabulary = vocabularies.get(*kind);
                if vocabulary.contains(s) {
                    None
                } else {
                    Some(invalid_enum(path, s, &vocabulary.allowed_list()))
                }
            }
            (
                FieldConstraint::VocabularyList {
                    vocabulary,
                    min_items,
                },
                FieldValue::List(items),
            ) => check_vocabulary_list(items, *vocabulary, *min_items, path, vocabularies),
            _ => None,
        }
    }

    /// The error for a whole number outside the `i64` range, which no
    /// integer constraint accepts.
    pub(crate) fn reject_overflow(&self, got: &str, path: &FieldPath) -> FieldError {
        match self {
            FieldConstraint::Range { min, max } => out_of_range(path, *min, *max, got),
            FieldConstraint::Enum(Literals::Integer(allowed)) => {
                invalid_enum(path, got, &render_list(allowed.iter()))
            }
            _ => FieldError::type_mismatch(path.clone(), "integer in i64 range", got),
        }
    }
}

fn check_range(value: i64, min: i64, max: i64, path: &FieldPath) -> Option<FieldError> {
    if (min..=max).contains(&value) {
        return None;
    }
    Some(out_of_range(path, min, max, &value.to_string()))
}

fn out_of_range(path: &FieldPath, min: i64, max: i64, got: &str) -> FieldError {
    FieldError::new(
        path.clone(),
        ErrorKind::OutOfRange,
        format!("must be between {} and {}, got {}", min, max, got),
    )
    .with_expected(format!("{}..={}", min, max))
    .with_got(got)
}

fn check_length(value: &str, min: usize, max: usize, path: &FieldPath) -> Option<FieldError> {
    let len = value.chars().count();
    if len < min {
        Some(
            FieldError::new(
                path.clone(),
                ErrorKind::TooShort,
                format!("length must be at least {}, got {}", min, len),
            )
            .with_expected(format!("at least {} characters", min))
            .with_got(value.to_string()),
        )
    } else if len > max {
        Some(
            FieldError::new(
                path.clone(),
                ErrorKind::TooLong,
                format!("length must be at most {}, got {}", max, len),
            )
            .with_expected(format!("at most {} characters", max))
            .with_got(value.to_string()),
        )
    } else {
        None
    }
}

fn check_vocabulary_list(
    items: &[String],
    kind: VocabularyKind,
    min_items: usize,
    path: &FieldPath,
    vocabularies: &Vocabularies,
) -> Option<FieldError> {
    if items.len() < min_items {
        return Some(
            FieldError::new(
                path.clone(),
                ErrorKind::TooShort,
                format!(
                    "must contain at least {} item(s), got {}",
                    min_items,
                    items.len()
                ),
            )
            .with_expected(format!("at least {} item(s)", min_items))
            .with_got(format!("{} item(s)", items.len())),
        );
    }

    let vocabulary = vocabularies.get(kind);
    let invalid: Vec<&str> = items
        .iter()
        .map(String::as_str)
        .filter(|item| !vocabulary.contains(item))
        .collect();

    if invalid.is_empty() {
        return None;
    }

    let quoted = invalid
        .iter()
        .map(|item| format!("'{}'", item))
        .collect::<Vec<_>>()
        .join(", ");
    let noun = if invalid.len() == 1 {
        kind.noun().to_string()
    } else {
        format!("{} values", kind.noun())
    };

    Some(
        FieldError::new(
            path.clone(),
            ErrorKind::InvalidVocabularyMember,
            format!(
                "invalid {} {}. Must be one of {}",
                noun,
                quoted,
                vocabulary.allowed_list()
            ),
        )
        .with_expected(format!("members of {}", vocabulary.name()))
        .with_got(invalid.join(", ")),
    )
}

fn invalid_enum(path: &FieldPath, got: &str, allowed: &str) -> FieldError {
    FieldError::new(
        path.clone(),
        ErrorKind::InvalidEnum,
        format!("must be one of {}, got '{}'", allowed, got),
    )
    .with_expected(format!("one of {}", allowed))
    .with_got(got)
}

fn render_list<T: ToString>(items: impl Iterator<Item = T>) -> String {
    format!(
        "[{}]",
        items.map(|i| i.to_string()).collect::<Vec<_>>().join(", ")
    )
}
