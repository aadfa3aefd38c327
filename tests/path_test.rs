//! Integration tests for FieldPath.

use classroll::{FieldPath, PathSegment};

#[test]
fn test_path_construction_and_display() {
    assert_eq!(FieldPath::root().to_string(), "");
    assert_eq!(FieldPath::root().push_field("academics").to_string(), "academics");

    let path = FieldPath::root()
        .push_field("activities")
        .push_field("hobbies")
        .push_index(3);
    assert_eq!(path.to_string(), "activities.hobbies[3]");
}

#[test]
fn test_parse_matches_construction() {
    let built = FieldPath::root()
        .push_field("activities")
        .push_field("sports")
        .push_index(0);
    assert_eq!(FieldPath::parse("activities.sports[0]"), built);
    assert_eq!(FieldPath::parse(""), FieldPath::root());
}

#[test]
fn test_parse_tolerates_odd_input() {
    assert_eq!(FieldPath::parse("a..b").to_string(), "a.b");
    assert_eq!(FieldPath::parse("a[").to_string(), "a");
    assert_eq!(FieldPath::parse("a[x]").len(), 2);
}

#[test]
fn test_segments_preserved() {
    let path = FieldPath::parse("activities.sports[2]");
    let segments: Vec<&PathSegment> = path.segments().collect();

    assert_eq!(segments.len(), 3);
    assert_eq!(segments[0], &PathSegment::Field("activities".into()));
    assert_eq!(segments[1], &PathSegment::Field("sports".into()));
    assert_eq!(segments[2], &PathSegment::Index(2));
}

#[test]
fn test_path_is_immutable() {
    let base = FieldPath::root().push_field("demographics");

    let alias = base.push_field("alias");
    let siblings = base.push_field("siblings");

    assert_eq!(base.to_string(), "demographics");
    assert_eq!(alias.to_string(), "demographics.alias");
    assert_eq!(siblings.to_string(), "demographics.siblings");
}

#[test]
fn test_group_and_parent() {
    let path = FieldPath::parse("digital_metrics.phone_pickups_daily");
    assert_eq!(path.group(), Some("digital_metrics"));
    assert_eq!(path.parent(), Some(FieldPath::parse("digital_metrics")));
    assert!(path.starts_with(&FieldPath::parse("digital_metrics")));
    assert!(!path.starts_with(&FieldPath::parse("academics")));

    assert_eq!(FieldPath::root().group(), None);
    assert_eq!(FieldPath::root().parent(), None);
}
