//! Field specifications and the generic per-field evaluation.
//!
//! A [`FieldSpec`] pairs a field name and declared type with one
//! [`FieldConstraint`]. Evaluation runs presence check, type coercion,
//! normalization and the constraint, in that order.

use serde_json::Value;
use stillwater::Validation;

use crate::error::{FieldError, FieldErrors};
use crate::normalize::{normalize_list, normalize_scalar};
use crate::path::FieldPath;
use crate::vocabulary::{Vocabularies, VocabularyKind};

use super::constraint::{FieldConstraint, Literals};

/// The declared type a raw value is coerced to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Integer,
    String,
    StringList,
}

/// A coerced and normalized field value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Integer(i64),
    Text(String),
    List(Vec<String>),
}

/// One row of a group's field table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    name: &'static str,
    ty: FieldType,
    constraint: FieldConstraint,
}

impl FieldSpec {
    /// An integer within `min..=max`.
    pub const fn integer(name: &'static str, min: i64, max: i64) -> Self {
        Self {
            name,
            ty: FieldType::Integer,
            constraint: FieldConstraint::Range { min, max },
        }
    }

    /// An integer that must equal one of `values`.
    pub const fn integer_literal(name: &'static str, values: &'static [i64]) -> Self {
        Self {
            name,
            ty: FieldType::Integer,
            constraint: FieldConstraint::Enum(Literals::Integer(values)),
        }
    }

    /// A string whose normalized length lies within `min..=max`.
    pub const fn text(name: &'static str, min: usize, max: usize) -> Self {
        Self {
            name,
            ty: FieldType::String,
            constraint: FieldConstraint::Length { min, max },
        }
    }

    /// A string that normalizes to one of `tokens`.
    pub const fn text_literal(name: &'static str, tokens: &'static [&'static str]) -> Self {
        Self {
            name,
            ty: FieldType::String,
            constraint: FieldConstraint::Enum(Literals::Text(tokens)),
        }
    }

    /// A string that normalizes to a member of `vocabulary`.
    pub const fn vocabulary_member(name: &'static str, vocabulary: VocabularyKind) -> Self {
        Self {
            name,
            ty: FieldType::String,
            constraint: FieldConstraint::Enum(Literals::Vocabulary(vocabulary)),
        }
    }

    /// A non-empty list of strings, each normalizing to a member of `vocabulary`.
    pub const fn vocabulary_list(name: &'static str, vocabulary: VocabularyKind) -> Self {
        Self {
            name,
            ty: FieldType::StringList,
            constraint: FieldConstraint::VocabularyList {
                vocabulary,
                min_items: 1,
            },
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn field_type(&self) -> FieldType {
        self.ty
    }

    pub fn constraint(&self) -> &FieldConstraint {
        &self.constraint
    }

    /// Evaluates the raw value found under this field in its group.
    ///
    /// `raw` is `None` when the key is absent. `group` is the path of the
    /// enclosing group; errors are reported at `group.<name>`.
    pub fn evaluate(
        &self,
        raw: Option<&Value>,
        group: &FieldPath,
        vocabularies: &Vocabularies,
    ) -> Validation<FieldValue, FieldErrors> {
        let path = group.push_field(self.name);

        let Some(raw) = raw else {
            return Validation::Failure(FieldErrors::single(FieldError::missing(path)));
        };

        let value = match self.coerce(raw, &path) {
            Ok(value) => value,
            Err(errors) => return Validation::Failure(errors),
        };

        match self.constraint.check(&value, &path, vocabularies) {
            Some(error) => Validation::Failure(FieldErrors::single(error)),
            None => Validation::Success(value),
        }
    }

    /// Converts a raw value to the declared type, normalizing strings.
    fn coerce(&self, raw: &Value, path: &FieldPath) -> Result<FieldValue, FieldErrors> {
        match self.ty {
            FieldType::Integer => match coerce_integer(raw, path) {
                Ok(Whole::Fits(n)) => Ok(FieldValue::Integer(n)),
                Ok(Whole::Overflow(got)) => Err(FieldErrors::single(
                    self.constraint.reject_overflow(&got, path),
                )),
                Err(error) => Err(FieldErrors::single(error)),
            },
            FieldType::String => match raw.as_str() {
                Some(s) => Ok(FieldValue::Text(normalize_scalar(s))),
                None => Err(FieldErrors::single(FieldError::type_mismatch(
                    path.clone(),
                    "string",
                    value_type_name(raw),
                ))),
            },
            FieldType::StringList => coerce_string_list(raw, path),
        }
    }
}

/// A whole number as received, before any constraint applies.
enum Whole {
    Fits(i64),
    /// Outside the `i64` range; holds the value as written.
    Overflow(String),
}

/// Accepts JSON integers, integral floats and strings holding an integer.
fn coerce_integer(raw: &Value, path: &FieldPath) -> Result<Whole, FieldError> {
    match raw {
        Value::Number(num) => {
            if let Some(n) = num.as_i64() {
                Ok(Whole::Fits(n))
            } else if num.is_u64() {
                Ok(Whole::Overflow(num.to_string()))
            } else {
                match num.as_f64() {
                    Some(f) if f.is_finite() && f.fract() == 0.0 => {
                        if f >= i64::MIN as f64 && f < i64::MAX as f64 {
                            Ok(Whole::Fits(f as i64))
                        } else {
                            Ok(Whole::Overflow(num.to_string()))
                        }
                    }
                    _ => Err(FieldError::type_mismatch(path.clone(), "integer", num.to_string())),
                }
            }
        }
        Value::String(s) => {
            let trimmed = s.trim();
            match trimmed.parse::<i64>() {
                Ok(n) => Ok(Whole::Fits(n)),
                Err(_) if is_integer_literal(trimmed) => Ok(Whole::Overflow(trimmed.to_string())),
                Err(_) => Err(FieldError::type_mismatch(
                    path.clone(),
                    "integer",
                    format!("'{}'", s),
                )),
            }
        }
        other => Err(FieldError::type_mismatch(
            path.clone(),
            "integer",
            value_type_name(other),
        )),
    }
}

/// An optional sign followed by at least one ASCII digit.
fn is_integer_literal(s: &str) -> bool {
    let digits = s.strip_prefix(|c: char| c == '-' || c == '+').unwrap_or(s);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Every element must be a string; offending elements are reported by index.
fn coerce_string_list(raw: &Value, path: &FieldPath) -> Result<FieldValue, FieldErrors> {
    let Some(items) = raw.as_array() else {
        return Err(FieldErrors::single(FieldError::type_mismatch(
            path.clone(),
            "list of strings",
            value_type_name(raw),
        )));
    };

    let mut strings = Vec::with_capacity(items.len());
    let mut errors = Vec::new();
    for (i, item) in items.iter().enumerate() {
        match item.as_str() {
            Some(s) => strings.push(s),
            None => errors.push(FieldError::type_mismatch(
                path.push_index(i),
                "string",
                value_type_name(item),
            )),
        }
    }

    match FieldErrors::from_vec(errors) {
        Some(errors) => Err(errors),
        None => Ok(FieldValue::List(normalize_list(&strings))),
    }
}

/// Returns the JSON type name for a value.
pub fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use serde_json::json;

    fn unwrap_success<T, E: std::fmt::Debug>(v: Validation<T, E>) -> T {
        v.into_result().unwrap()
    }

    fn unwrap_failure<T: std::fmt::Debug, E>(v: Validation<T, E>) -> E {
        v.into_result().unwrap_err()
    }

    fn group() -> FieldPath {
        FieldPath::root().push_field("demographics")
    }

    #[test]
    fn test_missing_field() {
        let spec = FieldSpec::integer("siblings", 0, 20);
        let errors = unwrap_failure(spec.evaluate(None, &group(), &Vocabularies::builtin()));

        assert_eq!(errors.len(), 1);
        assert_eq!(errors.first().kind, ErrorKind::MissingField);
        assert_eq!(errors.first().path.to_string(), "demographics.siblings");
    }

    #[test]
    fn test_integer_coercion() {
        let spec = FieldSpec::integer("siblings", 0, 20);
        let vocab = Vocabularies::builtin();

        for raw in [json!(3), json!(3.0), json!("3"), json!(" 3 ")] {
            let value = unwrap_success(spec.evaluate(Some(&raw), &group(), &vocab));
            assert_eq!(value, FieldValue::Integer(3), "raw: {raw}");
        }
    }

    #[test]
    fn test_integer_type_mismatch() {
        let spec = FieldSpec::integer("siblings", 0, 20);
        let vocab = Vocabularies::builtin();

        for raw in [json!(2.5), json!("two"), json!(true), json!(null), json!([1])] {
            let errors = unwrap_failure(spec.evaluate(Some(&raw), &group(), &vocab));
            assert_eq!(errors.first().kind, ErrorKind::TypeMismatch, "raw: {raw}");
        }

        assert!(!is_integer_literal("-"));
        assert!(!is_integer_literal("1_000"));
    }

    #[test]
    fn test_integer_too_large_for_i64_is_out_of_range() {
        let spec = FieldSpec::integer("siblings", 0, 20);
        let vocab = Vocabularies::builtin();

        for (raw, got) in [
            (json!(1e16), None),
            (json!(-1e19), None),
            (json!(u64::MAX), Some("18446744073709551615")),
            (json!(" 99999999999999999999 "), Some("99999999999999999999")),
            (json!("-99999999999999999999"), Some("-99999999999999999999")),
        ] {
            let errors = unwrap_failure(spec.evaluate(Some(&raw), &group(), &vocab));
            assert_eq!(errors.len(), 1);
            let error = errors.first();
            assert_eq!(error.kind, ErrorKind::OutOfRange, "raw: {raw}");
            assert_eq!(error.path.to_string(), "demographics.siblings");
            assert_eq!(error.expected.as_deref(), Some("0..=20"));
            assert!(error.message.starts_with("must be between 0 and 20"), "raw: {raw}");
            if got.is_some() {
                assert_eq!(error.got.as_deref(), got);
            }
        }
    }

    #[test]
    fn test_large_float_within_i64_is_range_checked() {
        let spec = FieldSpec::integer("avg_screen_time_min", 0, 1440);
        let errors = unwrap_failure(spec.evaluate(
            Some(&json!(1e16)),
            &FieldPath::root().push_field("digital_metrics"),
            &Vocabularies::builtin(),
        ));
        assert_eq!(errors.first().kind, ErrorKind::OutOfRange);
    }

    #[test]
    fn test_integer_literal_overflow_is_invalid_enum() {
        let spec = FieldSpec::integer_literal("best_work_time", &[1, 2, 3, 4]);
        let errors = unwrap_failure(spec.evaluate(
            Some(&json!(u64::MAX)),
            &FieldPath::root().push_field("behavioral"),
            &Vocabularies::builtin(),
        ));
        assert_eq!(errors.first().kind, ErrorKind::InvalidEnum);
        assert!(errors.first().message.contains("[1, 2, 3, 4]"));
    }

    #[test]
    fn test_type_mismatch_skips_constraint() {
        let spec = FieldSpec::integer("siblings", 0, 20);
        let errors = unwrap_failure(spec.evaluate(
            Some(&json!("many")),
            &group(),
            &Vocabularies::builtin(),
        ));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.first().got.as_deref(), Some("'many'"));
    }

    #[test]
    fn test_text_is_normalized_before_check() {
        let spec = FieldSpec::text_literal("class_section", &["a", "b", "c", "d", "e"]);
        let value = unwrap_success(spec.evaluate(
            Some(&json!(" C ")),
            &group(),
            &Vocabularies::builtin(),
        ));
        assert_eq!(value, FieldValue::Text("c".to_string()));
    }

    #[test]
    fn test_text_rejects_numbers() {
        let spec = FieldSpec::text("hometown", 2, 50);
        let errors = unwrap_failure(spec.evaluate(
            Some(&json!(42)),
            &group(),
            &Vocabularies::builtin(),
        ));
        assert_eq!(errors.first().kind, ErrorKind::TypeMismatch);
        assert_eq!(errors.first().got.as_deref(), Some("number"));
    }

    #[test]
    fn test_list_elements_are_normalized() {
        let spec = FieldSpec::vocabulary_list("sports", VocabularyKind::Sports);
        let activities = FieldPath::root().push_field("activities");
        let value = unwrap_success(spec.evaluate(
            Some(&json!(["Soccer", "TENNIS "])),
            &activities,
            &Vocabularies::builtin(),
        ));
        assert_eq!(
            value,
            FieldValue::List(vec!["soccer".to_string(), "tennis".to_string()])
        );
    }

    #[test]
    fn test_list_non_string_elements_reported_by_index() {
        let spec = FieldSpec::vocabulary_list("sports", VocabularyKind::Sports);
        let activities = FieldPath::root().push_field("activities");
        let errors = unwrap_failure(spec.evaluate(
            Some(&json!(["soccer", 7, "football", null])),
            &activities,
            &Vocabularies::builtin(),
        ));

        assert_eq!(
            errors.paths(),
            vec!["activities.sports[1]", "activities.sports[3]"]
        );
        assert!(errors.iter().all(|e| e.kind == ErrorKind::TypeMismatch));
    }

    #[test]
    fn test_list_rejects_scalar() {
        let spec = FieldSpec::vocabulary_list("hobbies", VocabularyKind::Hobbies);
        let errors = unwrap_failure(spec.evaluate(
            Some(&json!("gaming")),
            &FieldPath::root().push_field("activities"),
            &Vocabularies::builtin(),
        ));
        assert_eq!(errors.first().kind, ErrorKind::TypeMismatch);
        assert_eq!(errors.first().expected.as_deref(), Some("list of strings"));
    }

    #[test]
    fn test_spec_accessors() {
        let spec = FieldSpec::vocabulary_member("favorite_subject", VocabularyKind::Subjects);
        assert_eq!(spec.name(), "favorite_subject");
        assert_eq!(spec.field_type(), FieldType::String);
        assert_eq!(
            spec.constraint(),
            &FieldConstraint::Enum(Literals::Vocabulary(VocabularyKind::Subjects))
        );
    }
}
