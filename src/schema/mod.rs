//! The field-table validation engine.
//!
//! Rules are data: each group declares a table of [`FieldSpec`]s, and one
//! generic evaluation runs presence, type coercion, normalization and the
//! field's [`FieldConstraint`] for every row, accumulating all failures.
//!
//! # Example
//!
//! ```rust
//! use classroll::{FieldPath, FieldSpec, Vocabularies, VocabularyKind};
//! use serde_json::json;
//!
//! let spec = FieldSpec::vocabulary_list("sports", VocabularyKind::Sports);
//! let group = FieldPath::root().push_field("activities");
//!
//! let result = spec.evaluate(Some(&json!(["Soccer", "football"])), &group, &Vocabularies::builtin());
//! let errors = result.into_result().unwrap_err();
//! assert!(errors.first().message.contains("'football'"));
//! ```

mod constraint;
mod field;
mod literal;
mod traits;

pub use constraint::{FieldConstraint, Literals};
pub use field::{value_type_name, FieldSpec, FieldType, FieldValue};
pub use literal::{BestWorkTime, ClassSection, HumorStyle, IntegerLiteral, TextLiteral, WeekendStyle};
pub use traits::{zip, FieldValues, NestedSchema};
