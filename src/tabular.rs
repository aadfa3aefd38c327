//! Flat, tabular form of validated records.
//!
//! Column order is fixed and follows the field tables: group order, then
//! field declaration order. List fields are joined with [`LIST_SEPARATOR`].

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::record::StudentRecord;
use crate::schema::{IntegerLiteral, TextLiteral};

pub const COLUMNS: [&str; 16] = [
    "demographics.alias",
    "demographics.siblings",
    "demographics.commute_time_min",
    "demographics.class_section",
    "demographics.hometown",
    "academics.academic_interest",
    "academics.favorite_subject",
    "behavioral.social_style",
    "behavioral.weekend_style",
    "behavioral.best_work_time",
    "behavioral.humor_style",
    "activities.sports",
    "activities.music_genres",
    "activities.hobbies",
    "digital_metrics.avg_screen_time_min",
    "digital_metrics.phone_pickups_daily",
];

pub const LIST_SEPARATOR: &str = ";";

/// Errors writing records as CSV.
#[derive(Debug, thiserror::Error)]
pub enum TabularError {
    /// The writer refuses an empty record set rather than emit a bare header.
    #[error("no records to write")]
    Empty,

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl StudentRecord {
    /// One row in [`COLUMNS`] order.
    pub fn to_row(&self) -> Vec<String> {
        let d = self.demographics();
        let a = self.academics();
        let b = self.behavioral();
        let act = self.activities();
        let m = self.digital_metrics();
        vec![
            d.alias().to_string(),
            d.siblings().to_string(),
            d.commute_time_min().to_string(),
            d.class_section().as_str().to_string(),
            d.hometown().to_string(),
            a.academic_interest().to_string(),
            a.favorite_subject().to_string(),
            b.social_style().to_string(),
            b.weekend_style().as_str().to_string(),
            b.best_work_time().as_i64().to_string(),
            b.humor_style().as_str().to_string(),
            act.sports().join(LIST_SEPARATOR),
            act.music_genres().join(LIST_SEPARATOR),
            act.hobbies().join(LIST_SEPARATOR),
            m.avg_screen_time_min().to_string(),
            m.phone_pickups_daily().to_string(),
        ]
    }
}

/// Writes a header row and one row per record.
///
/// # Errors
///
/// Returns `TabularError::Empty` when `records` is empty, otherwise any CSV
/// or IO error from the underlying writer.
pub fn write_csv<W: io::Write>(writer: W, records: &[StudentRecord]) -> Result<(), TabularError> {
    if records.is_empty() {
        return Err(TabularError::Empty);
    }

    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(COLUMNS)?;
    for record in records {
        csv.write_record(record.to_row())?;
    }
    csv.flush()?;
    Ok(())
}

/// Writes records to `path`, creating parent directories as needed.
///
/// Returns the path written.
pub fn write_csv_path(
    path: impl AsRef<Path>,
    records: &[StudentRecord],
) -> Result<PathBuf, TabularError> {
    let path = path.as_ref();
    if records.is_empty() {
        return Err(TabularError::Empty);
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    write_csv(File::create(path)?, records)?;
    info!(path = %path.display(), rows = records.len(), "wrote csv");
    Ok(path.to_path_buf())
}
