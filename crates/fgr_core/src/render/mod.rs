//! Document export pipeline.
//!
//! # Responsibility
//! - Validate, renumber and sort a record snapshot exactly once
//!   (`view::build_view`), then serialize that shared view through one of
//!   three format sinks: plain text, print HTML, or .docx.
//!
//! # Invariants
//! - Every format renders the same facts, the same chronological event
//!   order and the same citation numbers; formats differ in markup only.
//! - A record failing the required-field check aborts before any rendering
//!   work, with a single user-facing message.

use crate::model::record::Record;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod docx;
pub mod html;
pub mod text;
pub mod view;

/// Export abort reasons shared by all formats.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportError {
    /// Required fields are blank; no partial output was produced.
    MissingRequiredFields(Vec<&'static str>),
}

impl Display for ExportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingRequiredFields(fields) => write!(
                f,
                "please fill in all required fields before exporting: {}",
                fields.join(", ")
            ),
        }
    }
}

impl Error for ExportError {}

/// Download name for an export artifact:
/// `FamilyGroupRecord_{father}_{mother}_{ISO-date}.{ext}`.
pub fn export_file_name(record: &Record, extension: &str, on: chrono::NaiveDate) -> String {
    format!(
        "FamilyGroupRecord_{}_{}_{}.{}",
        record.father.name,
        record.mother.name,
        on.format("%Y-%m-%d"),
        extension
    )
}

#[cfg(test)]
mod tests {
    use super::export_file_name;
    use crate::model::record::Record;

    #[test]
    fn file_name_follows_the_naming_contract() {
        let mut record = Record::new();
        record.father.name = "John Smith".to_string();
        record.mother.name = "Jane Doe".to_string();
        let on = chrono::NaiveDate::from_ymd_opt(2026, 8, 6).unwrap();
        assert_eq!(
            export_file_name(&record, "txt", on),
            "FamilyGroupRecord_John Smith_Jane Doe_2026-08-06.txt"
        );
    }
}
