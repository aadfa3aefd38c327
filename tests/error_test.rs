//! Integration tests for FieldError and FieldErrors.

use classroll::{ErrorKind, FieldError, FieldErrors, FieldPath, ValidationResult};
use serde_json::json;
use stillwater::prelude::*;
use stillwater::Validation;

fn path(dotted: &str) -> FieldPath {
    FieldPath::parse(dotted)
}

#[test]
fn test_field_error_full_context() {
    let error = FieldError::new(
        path("digital_metrics.phone_pickups_daily"),
        ErrorKind::OutOfRange,
        "must be between 0 and 500, got 900",
    )
    .with_got("900")
    .with_expected("0..=500");

    assert_eq!(error.path.to_string(), "digital_metrics.phone_pickups_daily");
    assert_eq!(error.kind, ErrorKind::OutOfRange);
    assert_eq!(error.code(), "out_of_range");
    assert_eq!(error.got, Some("900".to_string()));
    assert_eq!(error.expected, Some("0..=500".to_string()));
}

#[test]
fn test_missing_names_the_field() {
    let error = FieldError::missing(path("behavioral.humor_style"));
    assert_eq!(error.kind, ErrorKind::MissingField);
    assert_eq!(error.message, "required field 'humor_style' is missing");
}

#[test]
fn test_display() {
    let error = FieldError::type_mismatch(path("demographics.siblings"), "integer", "string");
    assert_eq!(
        error.to_string(),
        "demographics.siblings: [TypeMismatch] expected integer (got: string)"
    );

    let root = FieldError::type_mismatch(FieldPath::root(), "object", "array");
    assert!(root.to_string().starts_with("(root): "));
}

#[test]
fn test_errors_never_empty() {
    let errors = FieldErrors::single(FieldError::missing(path("academics.academic_interest")));
    assert!(!errors.is_empty());
    assert_eq!(errors.len(), 1);
    assert!(FieldErrors::from_vec(Vec::new()).is_none());
}

#[test]
fn test_combine_preserves_order() {
    let combined = FieldErrors::single(FieldError::missing(path("demographics.alias")))
        .combine(FieldErrors::single(FieldError::missing(path("academics.favorite_subject"))))
        .combine(FieldErrors::single(FieldError::missing(path("activities.hobbies"))));

    assert_eq!(
        combined.paths(),
        vec!["demographics.alias", "academics.favorite_subject", "activities.hobbies"]
    );
}

#[test]
fn test_from_vec_keeps_order() {
    let errors = FieldErrors::from_vec(vec![
        FieldError::missing(path("a.x")),
        FieldError::missing(path("a.y")),
    ])
    .unwrap();
    assert_eq!(errors.paths(), vec!["a.x", "a.y"]);
    assert_eq!(errors.into_vec().len(), 2);
}

#[test]
fn test_queries() {
    let errors = FieldErrors::from_vec(vec![
        FieldError::missing(path("demographics.alias")),
        FieldError::new(path("demographics.siblings"), ErrorKind::OutOfRange, "too many"),
        FieldError::new(path("demographics.siblings"), ErrorKind::TypeMismatch, "odd"),
        FieldError::new(path("activities.sports[0]"), ErrorKind::TypeMismatch, "expected string"),
    ])
    .unwrap();

    assert_eq!(errors.at_path(&path("demographics.siblings")).len(), 2);
    assert_eq!(errors.of_kind(ErrorKind::TypeMismatch).len(), 2);
    assert_eq!(errors.in_group("demographics").len(), 3);
    assert_eq!(errors.in_group("activities").len(), 1);
    assert!(errors.in_group("behavioral").is_empty());
}

#[test]
fn test_validation_map_on_failure() {
    let errors = FieldErrors::single(FieldError::missing(path("academics.academic_interest")));
    let result: ValidationResult<i64> = Validation::Failure(errors);

    match result.map(|x| x * 2) {
        Validation::Success(_) => panic!("Expected failure"),
        Validation::Failure(e) => assert_eq!(e.len(), 1),
    }
}

#[test]
fn test_errors_serialize_as_list() {
    let errors = FieldErrors::single(
        FieldError::new(path("activities.sports"), ErrorKind::InvalidVocabularyMember, "bad")
            .with_got("football"),
    );

    let value = serde_json::to_value(&errors).unwrap();
    assert_eq!(
        value,
        json!([{
            "path": "activities.sports",
            "kind": "invalid_vocabulary_member",
            "message": "bad",
            "got": "football"
        }])
    );
}

#[test]
fn test_errors_display_numbers_each_error() {
    let errors = FieldErrors::single(FieldError::missing(path("a.x")))
        .combine(FieldErrors::single(FieldError::missing(path("a.y"))));
    let text = errors.to_string();

    assert!(text.starts_with("Validation failed with 2 error(s):"));
    assert!(text.contains("  1. a.x: [MissingField]"));
    assert!(text.contains("  2. a.y: [MissingField]"));
}

#[test]
fn test_every_kind_has_distinct_code() {
    let mut codes: Vec<_> = ErrorKind::ALL.iter().map(|k| k.code()).collect();
    codes.sort();
    codes.dedup();
    assert_eq!(codes.len(), ErrorKind::ALL.len());
}
