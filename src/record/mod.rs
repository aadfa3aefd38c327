//! The composite student record and the validation entry point.
//!
//! [`StudentSchema`] evaluates all five groups on every call and returns
//! either a complete [`StudentRecord`] or every violation found. There is no
//! partial record.
//!
//! # Example
//!
//! ```rust
//! use classroll::{ErrorKind, StudentSchema};
//! use serde_json::json;
//!
//! let schema = StudentSchema::new();
//! let result = schema.validate(&json!({
//!     "demographics": {"alias": "Nightowl", "siblings": -1, "commute_time_min": 200,
//!                      "class_section": "b", "hometown": "Palermo"},
//!     "_id": "abc123"
//! }));
//!
//! let errors = result.into_result().unwrap_err();
//! assert_eq!(errors.first().path.to_string(), "demographics.siblings");
//! assert_eq!(errors.first().kind, ErrorKind::OutOfRange);
//! // academics, behavioral, activities and digital_metrics are absent:
//! assert_eq!(errors.of_kind(ErrorKind::MissingField).len(), 11);
//! ```

mod groups;

pub use groups::{Academics, Activities, Behavioral, Demographics, DigitalMetrics};

use std::sync::Arc;

use serde::Serialize;
use serde_json::{json, Map, Value};
use stillwater::Validation;
use tracing::{debug, trace};

use crate::error::{FieldError, FieldErrors};
use crate::path::FieldPath;
use crate::registry::VocabularyRegistry;
use crate::schema::{value_type_name, zip, NestedSchema};
use crate::vocabulary::Vocabularies;
use crate::ValidationResult;

/// Top-level keys a record may carry, in evaluation order.
pub const GROUPS: [&str; 5] = [
    Demographics::GROUP,
    Academics::GROUP,
    Behavioral::GROUP,
    Activities::GROUP,
    DigitalMetrics::GROUP,
];

/// A validated student survey response.
///
/// Only ever observed in a valid state; there is no mutation API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudentRecord {
    demographics: Demographics,
    academics: Academics,
    behavioral: Behavioral,
    activities: Activities,
    digital_metrics: DigitalMetrics,
}

impl StudentRecord {
    pub fn demographics(&self) -> &Demographics {
        &self.demographics
    }

    pub fn academics(&self) -> &Academics {
        &self.academics
    }

    pub fn behavioral(&self) -> &Behavioral {
        &self.behavioral
    }

    pub fn activities(&self) -> &Activities {
        &self.activities
    }

    pub fn digital_metrics(&self) -> &DigitalMetrics {
        &self.digital_metrics
    }

    /// The nested document handed to a document store: exactly the five group keys.
    pub fn to_document(&self) -> Value {
        json!({
            "demographics": self.demographics,
            "academics": self.academics,
            "behavioral": self.behavioral,
            "activities": self.activities,
            "digital_metrics": self.digital_metrics,
        })
    }
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<StudentRecord>();
    assert_sync::<StudentRecord>();
    assert_send::<StudentSchema>();
    assert_sync::<StudentSchema>();
};

#[derive(Debug, Clone)]
enum VocabularySource {
    Fixed(Arc<Vocabularies>),
    Registry(VocabularyRegistry),
}

/// Validates raw records into [`StudentRecord`]s.
///
/// The schema reads vocabularies either from a fixed bundle or from a
/// [`VocabularyRegistry`]; in the latter case each call takes one snapshot
/// and uses it throughout.
#[derive(Debug, Clone)]
pub struct StudentSchema {
    vocabularies: VocabularySource,
}

impl StudentSchema {
    /// A schema using the built-in vocabularies.
    pub fn new() -> Self {
        Self::with_vocabularies(Vocabularies::builtin())
    }

    pub fn with_vocabularies(vocabularies: Arc<Vocabularies>) -> Self {
        Self {
            vocabularies: VocabularySource::Fixed(vocabularies),
        }
    }

    /// A schema that follows replacements published to `registry`.
    pub fn with_registry(registry: VocabularyRegistry) -> Self {
        Self {
            vocabularies: VocabularySource::Registry(registry),
        }
    }

    /// The vocabulary bundle the next validation will use.
    pub fn vocabularies(&self) -> Arc<Vocabularies> {
        match &self.vocabularies {
            VocabularySource::Fixed(vocabularies) => Arc::clone(vocabularies),
            VocabularySource::Registry(registry) => registry.snapshot(),
        }
    }

    /// Validates one raw record.
    ///
    /// Every group and every field is evaluated; the failure carries all
    /// violations in group order, then field declaration order.
    pub fn validate(&self, raw: &Value) -> ValidationResult<StudentRecord> {
        self.validate_with(raw, &self.vocabularies())
    }

    pub(crate) fn validate_with(
        &self,
        raw: &Value,
        vocabularies: &Vocabularies,
    ) -> ValidationResult<StudentRecord> {
        let root = FieldPath::root();
        let Some(map) = raw.as_object() else {
            return Validation::Failure(FieldErrors::single(FieldError::type_mismatch(
                root,
                "object",
                value_type_name(raw),
            )));
        };

        let groups = KnownGroups::filter(map);
        let demographics = Demographics::validate(groups.get(Demographics::GROUP), &root, vocabularies);
        let academics = Academics::validate(groups.get(Academics::GROUP), &root, vocabularies);
        let behavioral = Behavioral::validate(groups.get(Behavioral::GROUP), &root, vocabularies);
        let activities = Activities::validate(groups.get(Activities::GROUP), &root, vocabularies);
        let digital_metrics =
            DigitalMetrics::validate(groups.get(DigitalMetrics::GROUP), &root, vocabularies);

        let result = zip(
            zip(zip(zip(demographics, academics), behavioral), activities),
            digital_metrics,
        )
        .map(
            |((((demographics, academics), behavioral), activities), digital_metrics)| StudentRecord {
                demographics,
                academics,
                behavioral,
                activities,
                digital_metrics,
            },
        );

        match &result {
            Validation::Success(_) => debug!("record accepted"),
            Validation::Failure(errors) => debug!(errors = errors.len(), "record rejected"),
        }
        result
    }
}

impl Default for StudentSchema {
    fn default() -> Self {
        Self::new()
    }
}

/// The group values of a raw record, with every other top-level key dropped.
struct KnownGroups<'a> {
    values: [Option<&'a Value>; 5],
}

impl<'a> KnownGroups<'a> {
    fn filter(map: &'a Map<String, Value>) -> Self {
        let values = GROUPS.map(|group| map.get(group));
        let dropped = map.keys().filter(|k| !GROUPS.contains(&k.as_str())).count();
        if dropped > 0 {
            trace!(dropped, "ignoring unknown top-level keys");
        }
        Self { values }
    }

    fn get(&self, group: &str) -> Option<&'a Value> {
        GROUPS
            .iter()
            .position(|g| *g == group)
            .and_then(|i| self.values[i])
    }
}

/// Validates one raw record against the built-in vocabularies.
///
/// ```rust
/// use serde_json::json;
///
/// let errors = classroll::validate(&json!({})).unwrap_err();
/// assert_eq!(errors.len(), 16);
/// ```
pub fn validate(raw: &Value) -> Result<StudentRecord, FieldErrors> {
    StudentSchema::new().validate(raw).into_result()
}
