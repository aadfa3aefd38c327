//! The nested-group abstraction.
//!
//! This module provides the [`NestedSchema`] trait implemented by each of the
//! five record groups, the [`FieldValues`] bag handed to their assembly step,
//! and [`zip`] for combining independent validations.

use indexmap::IndexMap;
use serde_json::{Map, Value};
use stillwater::prelude::*;
use stillwater::Validation;

use crate::error::{ErrorKind, FieldError, FieldErrors};
use crate::path::FieldPath;
use crate::vocabulary::Vocabularies;

use super::field::{value_type_name, FieldSpec, FieldValue};
use super::literal::{IntegerLiteral, TextLiteral};

/// A named group of fields validated independently of its siblings.
///
/// Implementors declare a field table and an assembly step; the provided
/// [`validate`](NestedSchema::validate) evaluates every field, never stopping
/// at the first failure, and only assembles when nothing failed.
///
/// # Example
///
/// ```rust
/// use classroll::{DigitalMetrics, FieldPath, NestedSchema, Vocabularies};
/// use serde_json::json;
///
/// let raw = json!({"avg_screen_time_min": 2000, "phone_pickups_daily": -1});
/// let result = DigitalMetrics::validate(Some(&raw), &FieldPath::root(), &Vocabularies::builtin());
///
/// let errors = result.into_result().unwrap_err();
/// assert_eq!(errors.len(), 2);
/// ```
pub trait NestedSchema: Sized {
    /// Key of this group in a raw record.
    const GROUP: &'static str;

    /// Field table in declaration order.
    const FIELDS: &'static [FieldSpec];

    /// Builds the typed group from values that passed every constraint.
    fn assemble(values: FieldValues) -> Result<Self, FieldErrors>;

    /// Validates the raw group found under [`GROUP`](Self::GROUP).
    ///
    /// `raw` is `None` when the group key is absent, in which case every
    /// field reports `MissingField`. A present value that is not a mapping
    /// yields a single `TypeMismatch` at the group path.
    fn validate(
        raw: Option<&Value>,
        root: &FieldPath,
        vocabularies: &Vocabularies,
    ) -> Validation<Self, FieldErrors> {
        let path = root.push_field(Self::GROUP);
        let empty = Map::new();
        let group = match raw {
            None => &empty,
            Some(Value::Object(map)) => map,
            Some(other) => {
                return Validation::Failure(FieldErrors::single(FieldError::type_mismatch(
                    path,
                    "object",
                    value_type_name(other),
                )))
            }
        };

        let mut values = FieldValues::new(path.clone());
        let mut errors = Vec::new();
        for spec in Self::FIELDS {
            match spec.evaluate(group.get(spec.name()), &path, vocabularies) {
                Validation::Success(value) => values.insert(spec.name(), value),
                Validation::Failure(e) => errors.extend(e),
            }
        }

        if let Some(errors) = FieldErrors::from_vec(errors) {
            return Validation::Failure(errors);
        }
        match Self::assemble(values) {
            Ok(group) => Validation::Success(group),
            Err(errors) => Validation::Failure(errors),
        }
    }
}

/// Validated field values of one group, keyed by field name.
#[derive(Debug, Clone)]
pub struct FieldValues {
    group: FieldPath,
    values: IndexMap<&'static str, FieldValue>,
}

impl FieldValues {
    pub fn new(group: FieldPath) -> Self {
        Self {
            group,
            values: IndexMap::new(),
        }
    }

    pub fn insert(&mut self, name: &'static str, value: FieldValue) {
        self.values.insert(name, value);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn take_integer(&mut self, name: &str) -> Result<i64, FieldErrors> {
        match self.values.shift_remove(name) {
            Some(FieldValue::Integer(n)) => Ok(n),
            other => Err(self.unexpected(name, "integer", other)),
        }
    }

    pub fn take_text(&mut self, name: &str) -> Result<String, FieldErrors> {
        match self.values.shift_remove(name) {
            Some(FieldValue::Text(s)) => Ok(s),
            other => Err(self.unexpected(name, "string", other)),
        }
    }

    pub fn take_list(&mut self, name: &str) -> Result<Vec<String>, FieldErrors> {
        match self.values.shift_remove(name) {
            Some(FieldValue::List(items)) => Ok(items),
            other => Err(self.unexpected(name, "list of strings", other)),
        }
    }

    /// Takes a text field and parses it into its literal enum.
    pub fn take_literal<L: TextLiteral>(&mut self, name: &str) -> Result<L, FieldErrors> {
        let token = self.take_text(name)?;
        L::parse(&token).ok_or_else(|| {
            FieldErrors::single(
                FieldError::new(
                    self.group.push_field(name),
                    ErrorKind::InvalidEnum,
                    format!("must be one of [{}], got '{}'", L::TOKENS.join(", "), token),
                )
                .with_got(token),
            )
        })
    }

    /// Takes an integer field and converts it into its literal enum.
    pub fn take_integer_literal<L: IntegerLiteral>(&mut self, name: &str) -> Result<L, FieldErrors> {
        let n = self.take_integer(name)?;
        L::from_i64(n).ok_or_else(|| {
            let allowed: Vec<String> = L::VALUES.iter().map(|v| v.to_string()).collect();
            FieldErrors::single(
                FieldError::new(
                    self.group.push_field(name),
                    ErrorKind::InvalidEnum,
                    format!("must be one of [{}], got {}", allowed.join(", "), n),
                )
                .with_got(n.to_string()),
            )
        })
    }

    fn unexpected(&self, name: &str, expected: &str, found: Option<FieldValue>) -> FieldErrors {
        let path = self.group.push_field(name);
        FieldErrors::single(match found {
            None => FieldError::missing(path),
            Some(value) => FieldError::type_mismatch(path, expected, format!("{:?}", value)),
        })
    }
}

/// Combines two independent validations, keeping the errors of both.
///
/// Errors from `a` precede errors from `b`.
pub fn zip<A, B>(
    a: Validation<A, FieldErrors>,
    b: Validation<B, FieldErrors>,
) -> Validation<(A, B), FieldErrors> {
    match (a, b) {
        (Validation::Success(a), Validation::Success(b)) => Validation::Success((a, b)),
        (Validation::Failure(e), Validation::Success(_))
        | (Validation::Success(_), Validation::Failure(e)) => Validation::Failure(e),
        (Validation::Failure(e1), Validation::Failure(e2)) => Validation::Failure(e1.combine(e2)),
    }
}
