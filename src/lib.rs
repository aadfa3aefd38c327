//! # Classroll
//!
//! Validation for student survey records that accumulates ALL violations in
//! one pass instead of stopping at the first.
//!
//! ## Overview
//!
//! A raw record is a JSON object with five groups (`demographics`,
//! `academics`, `behavioral`, `activities`, `digital_metrics`). Validation
//! normalizes every string (trim, then lowercase), coerces numbers, checks
//! ranges, lengths, closed literal sets and controlled vocabularies, and
//! returns either a complete [`StudentRecord`] or every [`FieldError`] found,
//! each addressed by its dotted [`FieldPath`]. Accumulation uses stillwater's
//! `Validation` type.
//!
//! ## Core Types
//!
//! - [`StudentSchema`]: validates raw records, singly or in parallel batches
//! - [`FieldErrors`]: the ordered, non-empty error list of a rejected record
//! - [`Vocabularies`]: the four controlled vocabularies, built in or loaded
//!   from JSON and published through a [`VocabularyRegistry`]
//! - [`COLUMNS`] and [`write_csv`]: the flat tabular form of accepted records
//!
//! ## Example
//!
//! ```rust
//! use classroll::{ErrorKind, FieldPath, StudentSchema};
//! use serde_json::json;
//!
//! let schema = StudentSchema::new();
//! let result = schema.validate(&json!({
//!     "demographics": {"alias": "Nightowl", "siblings": 1, "commute_time_min": 30,
//!                      "class_section": "C", "hometown": "Catania"},
//!     "academics": {"academic_interest": 4, "favorite_subject": "Physics"},
//!     "behavioral": {"social_style": 2, "weekend_style": "study",
//!                    "best_work_time": 1, "humor_style": "quirky"},
//!     "activities": {"sports": ["rowing"], "music_genres": ["jazz"], "hobbies": ["none"]},
//!     "digital_metrics": {"avg_screen_time_min": 240, "phone_pickups_daily": 80}
//! }));
//! assert!(result.is_success());
//!
//! let result = schema.validate(&json!({"academics": {"academic_interest": 9}}));
//! let errors = result.into_result().unwrap_err();
//! assert_eq!(errors.at_path(&FieldPath::parse("academics.academic_interest")).len(), 1);
//! assert_eq!(errors.of_kind(ErrorKind::OutOfRange).len(), 1);
//! ```

pub mod batch;
pub mod error;
pub mod normalize;
pub mod path;
pub mod record;
pub mod registry;
pub mod schema;
pub mod tabular;
pub mod vocabulary;

pub use batch::BatchReport;
pub use error::{ErrorKind, FieldError, FieldErrors};
pub use normalize::{normalize_list, normalize_scalar};
pub use path::{FieldPath, PathSegment};
pub use record::{
    validate, Academics, Activities, Behavioral, Demographics, DigitalMetrics, StudentRecord,
    StudentSchema, GROUPS,
};
pub use registry::VocabularyRegistry;
pub use schema::{
    BestWorkTime, ClassSection, FieldConstraint, FieldSpec, FieldType, FieldValue, FieldValues,
    HumorStyle, IntegerLiteral, Literals, NestedSchema, TextLiteral, WeekendStyle,
};
pub use tabular::{write_csv, write_csv_path, TabularError, COLUMNS, LIST_SEPARATOR};
pub use vocabulary::{
    Vocabularies, Vocabulary, VocabularyConfig, VocabularyError, VocabularyKind,
};

/// Type alias for validation results using FieldErrors
pub type ValidationResult<T> = stillwater::Validation<T, FieldErrors>;
