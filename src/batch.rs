//! Parallel validation of many records.
//!
//! Records are independent, so a batch is sharded across rayon's thread pool
//! with no coordination beyond one shared vocabulary snapshot.

use rayon::prelude::*;
use serde_json::Value;
use tracing::info;

use crate::error::FieldErrors;
use crate::record::{StudentRecord, StudentSchema};

/// Per-record outcomes of a batch, in input order.
#[derive(Debug, Clone)]
pub struct BatchReport {
    outcomes: Vec<Result<StudentRecord, FieldErrors>>,
}

impl BatchReport {
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Outcomes indexed like the input.
    pub fn outcomes(&self) -> &[Result<StudentRecord, FieldErrors>] {
        &self.outcomes
    }

    /// Accepted records with their input index.
    pub fn accepted(&self) -> impl Iterator<Item = (usize, &StudentRecord)> {
        self.outcomes
            .iter()
            .enumerate()
            .filter_map(|(i, outcome)| outcome.as_ref().ok().map(|record| (i, record)))
    }

    /// Rejections with their input index.
    pub fn rejected(&self) -> impl Iterator<Item = (usize, &FieldErrors)> {
        self.outcomes
            .iter()
            .enumerate()
            .filter_map(|(i, outcome)| outcome.as_ref().err().map(|errors| (i, errors)))
    }

    pub fn accepted_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_ok()).count()
    }

    pub fn rejected_count(&self) -> usize {
        self.outcomes.len() - self.accepted_count()
    }

    /// True if every record was accepted.
    pub fn all_accepted(&self) -> bool {
        self.outcomes.iter().all(Result::is_ok)
    }

    /// Consumes the report, keeping accepted records in input order.
    pub fn into_records(self) -> Vec<StudentRecord> {
        self.outcomes.into_iter().filter_map(Result::ok).collect()
    }
}

impl StudentSchema {
    /// Validates every record in parallel.
    ///
    /// All records in the batch see the same vocabulary snapshot, even if the
    /// registry is replaced while the batch runs.
    ///
    /// # Example
    ///
    /// ```rust
    /// use classroll::StudentSchema;
    /// use serde_json::json;
    ///
    /// let report = StudentSchema::new().validate_batch(&[json!({}), json!("nope")]);
    /// assert_eq!(report.rejected_count(), 2);
    /// assert_eq!(report.rejected().next().unwrap().1.len(), 16);
    /// ```
    pub fn validate_batch(&self, raws: &[Value]) -> BatchReport {
        let vocabularies = self.vocabularies();
        let outcomes: Vec<_> = raws
            .par_iter()
            .map(|raw| self.validate_with(raw, &vocabularies).into_result())
            .collect();

        let report = BatchReport { outcomes };
        info!(
            records = report.len(),
            accepted = report.accepted_count(),
            rejected = report.rejected_count(),
            "batch validated"
        );
        report
    }
}
