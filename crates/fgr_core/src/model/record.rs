//! Family Group Record domain model.
//!
//! # Responsibility
//! - Define the canonical record shape shared by the form store, the
//!   numbering engine, persistence and export.
//! - Provide construction helpers that guarantee generated ids and fully
//!   defaulted fields.
//!
//! # Invariants
//! - `record_id` is generated once at record creation and never regenerated
//!   on edit.
//! - Source numbers are written only by the numbering engine; constructors
//!   always start them at 0 ("no citation").
//! - Serialized field names are the camelCase names the original documents
//!   were stored under, so existing payloads load unchanged.

use crate::model::event::Event;
use crate::model::ident;
use serde::{Deserialize, Serialize};

/// A citation: free text plus the sequential number assigned on export.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceRef {
    /// Citation text; may embed hyperlink markup.
    #[serde(default)]
    pub content: String,
    /// 0 means unset; assigned by the numbering engine only.
    #[serde(default)]
    pub source_number: u32,
}

impl SourceRef {
    pub fn with_content(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            source_number: 0,
        }
    }
}

/// Father or mother of the family. The `father`/`mother` fields are
/// free-text ancestor names, not references to other records.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub father: String,
    #[serde(default)]
    pub father_source: SourceRef,
    #[serde(default)]
    pub mother: String,
    #[serde(default)]
    pub mother_source: SourceRef,
    #[serde(default)]
    pub events: Vec<Event>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Spouse {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub source: SourceRef,
}

impl Spouse {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: ident::spouse_id(),
            name: name.into(),
            source: SourceRef::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Child {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub spouses: Vec<Spouse>,
    #[serde(default)]
    pub events: Vec<Event>,
}

impl Child {
    pub fn new() -> Self {
        Self {
            id: ident::child_id(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preparer {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub email: String,
}

/// The Family Group Record itself.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    #[serde(default)]
    pub record_id: String,
    /// Free-text genealogy date shown in the document header.
    #[serde(default)]
    pub record_date: String,
    /// ISO-8601 creation timestamp; drives "most recent" selection on load.
    #[serde(default)]
    pub created: String,
    /// Denormalized convenience copy of `father.name`.
    #[serde(default)]
    pub father_name: String,
    /// Denormalized convenience copy of `mother.name`.
    #[serde(default)]
    pub mother_name: String,
    #[serde(default)]
    pub father: Person,
    #[serde(default)]
    pub mother: Person,
    #[serde(default)]
    pub children: Vec<Child>,
    #[serde(default)]
    pub preparer: Preparer,
    #[serde(default)]
    pub comments: String,
}

impl Record {
    /// Creates an empty record with a fresh stable id. All collections start
    /// empty; an empty record is valid.
    pub fn new() -> Self {
        Self {
            record_id: ident::record_id(),
            ..Self::default()
        }
    }

    /// Returns the labels of required fields that are blank.
    ///
    /// Checked only before save/export, never per keystroke. An empty result
    /// means the record may be exported.
    pub fn missing_required_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.father.name.trim().is_empty() {
            missing.push("father full name");
        }
        if self.mother.name.trim().is_empty() {
            missing.push("mother full name");
        }
        if self.preparer.name.trim().is_empty() {
            missing.push("preparer name");
        }
        if self.preparer.email.trim().is_empty() {
            missing.push("preparer email");
        }
        missing
    }
}

#[cfg(test)]
mod tests {
    use super::{Child, Record, SourceRef, Spouse};

    #[test]
    fn new_record_has_id_and_empty_collections() {
        let record = Record::new();
        assert!(!record.record_id.is_empty());
        assert!(record.children.is_empty());
        assert!(record.father.events.is_empty());
        assert_eq!(record.father.father_source.source_number, 0);
    }

    #[test]
    fn required_field_check_reports_every_blank_field() {
        let mut record = Record::new();
        assert_eq!(record.missing_required_fields().len(), 4);

        record.father.name = "John Smith".to_string();
        record.mother.name = "Jane Doe".to_string();
        record.preparer.name = "Preparer".to_string();
        record.preparer.email = "p@example.com".to_string();
        assert!(record.missing_required_fields().is_empty());

        record.preparer.email = "   ".to_string();
        assert_eq!(record.missing_required_fields(), vec!["preparer email"]);
    }

    #[test]
    fn serde_uses_the_original_wire_names() {
        let mut record = Record::new();
        record.record_id = "r-1".to_string();
        record.father.father_source = SourceRef::with_content("census");
        let mut child = Child::new();
        child.spouses.push(Spouse::new("Pat"));
        record.children.push(child);

        let json = serde_json::to_value(&record).expect("record serializes");
        assert_eq!(json["recordId"], "r-1");
        assert_eq!(json["father"]["fatherSource"]["content"], "census");
        assert_eq!(json["father"]["fatherSource"]["sourceNumber"], 0);
        assert!(json["children"][0]["spouses"][0]["id"]
            .as_str()
            .expect("spouse id")
            .starts_with("spouse-"));
    }

    #[test]
    fn partial_payloads_deserialize_with_defaults() {
        let parsed: Record = serde_json::from_str(
            r#"{"recordId":"r-2","father":{"name":"A"},"mother":{},"preparer":{"name":"P"}}"#,
        )
        .expect("partial record parses");
        assert_eq!(parsed.record_id, "r-2");
        assert_eq!(parsed.father.name, "A");
        assert!(parsed.mother.events.is_empty());
        assert!(parsed.comments.is_empty());
    }
}
