//! Error types for validation failures.
//!
//! Every constraint violation becomes one [`FieldError`] carrying the path,
//! a machine-readable [`ErrorKind`], the offending value and a message. A
//! failed record yields a non-empty, ordered [`FieldErrors`].

mod field_error;

pub use field_error::{ErrorKind, FieldError, FieldErrors};
