//! Integration tests for controlled vocabularies and their effect on validation.

use std::sync::Arc;

use classroll::{
    ErrorKind, StudentSchema, Vocabularies, Vocabulary, VocabularyConfig, VocabularyError,
    VocabularyKind, VocabularyRegistry,
};
use serde_json::{json, Value};

fn valid_record() -> Value {
    json!({
        "demographics": {
            "alias": "Sparrow",
            "siblings": 2,
            "commute_time_min": 15,
            "class_section": "a",
            "hometown": "Bari"
        },
        "academics": {"academic_interest": 3, "favorite_subject": "biology"},
        "behavioral": {
            "social_style": 4,
            "weekend_style": "explore",
            "best_work_time": 2,
            "humor_style": "dry"
        },
        "activities": {
            "sports": ["swimming"],
            "music_genres": ["indie"],
            "hobbies": ["photography"]
        },
        "digital_metrics": {"avg_screen_time_min": 180, "phone_pickups_daily": 60}
    })
}

#[test]
fn test_builtin_vocabularies_are_normalized() {
    let vocabularies = Vocabularies::builtin();
    for kind in VocabularyKind::ALL {
        let vocabulary = vocabularies.get(kind);
        assert!(!vocabulary.is_empty());
        for token in vocabulary.tokens() {
            assert_eq!(token, token.trim().to_lowercase());
        }
    }
}

#[test]
fn test_none_is_an_answer_for_sports_and_hobbies_only() {
    let vocabularies = Vocabularies::builtin();
    assert!(vocabularies.get(VocabularyKind::Sports).contains("none"));
    assert!(vocabularies.get(VocabularyKind::Hobbies).contains("none"));
    assert!(!vocabularies.get(VocabularyKind::MusicGenres).contains("none"));
}

#[test]
fn test_vocabulary_rejects_bad_tokens_together() {
    let err = Vocabulary::new("sports", ["chess", " Golf", "chess"]).unwrap_err();
    match err {
        VocabularyError::Multiple(problems) => {
            assert_eq!(problems.len(), 2);
            assert!(matches!(problems[0], VocabularyError::NotNormalized { .. }));
            assert!(matches!(problems[1], VocabularyError::Duplicate { .. }));
        }
        other => panic!("expected Multiple, got {other}"),
    }

    assert!(matches!(
        Vocabulary::new("sports", Vec::<String>::new()),
        Err(VocabularyError::Empty { .. })
    ));
}

#[test]
fn test_config_keeps_builtins_for_absent_keys() {
    let config = VocabularyConfig {
        sports: Some(vec!["chess".into(), "none".into()]),
        ..Default::default()
    };
    let vocabularies = Vocabularies::from_config(&config).unwrap();

    assert_eq!(vocabularies.get(VocabularyKind::Sports).len(), 2);
    assert_eq!(
        vocabularies.get(VocabularyKind::Hobbies),
        Vocabularies::builtin().get(VocabularyKind::Hobbies)
    );
}

#[test]
fn test_config_rejects_unknown_keys() {
    let err = Vocabularies::from_json_str(r#"{"colours": ["red"]}"#).unwrap_err();
    assert!(matches!(err, VocabularyError::Parse(_)));
}

#[test]
fn test_custom_vocabulary_changes_validation() {
    let custom = Vocabularies::from_json_str(r#"{"sports": ["chess", "none"]}"#).unwrap();
    let schema = StudentSchema::with_vocabularies(Arc::new(custom));

    let errors = schema.validate(&valid_record()).into_result().unwrap_err();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.first().kind, ErrorKind::InvalidVocabularyMember);
    assert!(errors.first().message.contains("[chess, none]"));

    let mut raw = valid_record();
    raw["activities"]["sports"] = json!(["Chess"]);
    assert!(schema.validate(&raw).is_success());
}

#[test]
fn test_registry_load_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("vocab.json");
    std::fs::write(&path, r#"{"subjects": ["astronomy", "other"]}"#).unwrap();

    let registry = VocabularyRegistry::new();
    let schema = StudentSchema::with_registry(registry.clone());
    assert!(schema.validate(&valid_record()).is_success());

    registry.load_file(&path).unwrap();
    let errors = schema.validate(&valid_record()).into_result().unwrap_err();
    assert_eq!(errors.first().path.to_string(), "academics.favorite_subject");
    assert_eq!(errors.first().kind, ErrorKind::InvalidEnum);
}

#[test]
fn test_registry_keeps_bundle_on_bad_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("vocab.json");
    std::fs::write(&path, r#"{"hobbies": ["Knitting"]}"#).unwrap();

    let registry = VocabularyRegistry::new();
    let before = registry.snapshot();

    assert!(matches!(
        registry.load_file(&path),
        Err(VocabularyError::NotNormalized { .. })
    ));
    assert!(matches!(
        registry.load_file(dir.path().join("missing.json")),
        Err(VocabularyError::Io(..))
    ));
    assert!(Arc::ptr_eq(&before, &registry.snapshot()));
}
