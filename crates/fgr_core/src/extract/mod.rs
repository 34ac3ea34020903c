//! AI-assisted import of free-form notes into record data.
//!
//! # Responsibility
//! - Define the extractor contract (external generative-model client).
//! - Describe the record shape as a JSON schema for the extractor.
//! - Parse replies strictly and reassert caller-owned identity fields.
//!
//! # Invariants
//! - `record_id` and `record_date` always come from the pre-import record,
//!   never from extractor output.
//! - Any failure is atomic: the caller's form state is left untouched.

use crate::model::record::Record;
use log::{info, warn};
use serde_json::{json, Value};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Failure envelope reported by an extractor adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionError {
    pub code: String,
    pub message: String,
}

impl ExtractionError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

impl Display for ExtractionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "extraction failed [{}]: {}", self.code, self.message)
    }
}

impl Error for ExtractionError {}

/// Contract for the structured-output model call (external collaborator).
///
/// Implementations receive the user's free text plus the schema from
/// `record_schema` and reply with JSON expected to conform to it. There is
/// no in-process timeout; the call runs to completion or failure.
pub trait TextExtractor {
    fn extract(&self, free_text: &str, schema: &Value) -> Result<Value, ExtractionError>;
}

/// Import failures surfaced to the user as one message.
#[derive(Debug)]
pub enum ImportError {
    Extraction(ExtractionError),
    /// The reply was not a record-shaped document.
    NonConformingReply(String),
}

impl Display for ImportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Extraction(err) => write!(f, "{err}"),
            Self::NonConformingReply(message) => {
                write!(f, "extractor reply does not match the record shape: {message}")
            }
        }
    }
}

impl Error for ImportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Extraction(err) => Some(err),
            Self::NonConformingReply(_) => None,
        }
    }
}

impl From<ExtractionError> for ImportError {
    fn from(value: ExtractionError) -> Self {
        Self::Extraction(value)
    }
}

/// JSON schema of the record shape handed to the extractor.
pub fn record_schema() -> Value {
    let source_ref = json!({
        "type": "object",
        "properties": {
            "content": { "type": "string" },
            "sourceNumber": { "type": "integer" }
        }
    });
    let event = json!({
        "type": "object",
        "properties": {
            "id": { "type": "string" },
            "type": { "type": "string" },
            "date": { "type": "string" },
            "description": { "type": "string" },
            "place": { "type": "string" },
            "sources": { "type": "string" },
            "sourceNumber": { "type": "integer" }
        },
        "required": ["type", "date"]
    });
    let parent = json!({
        "type": "object",
        "properties": {
            "name": { "type": "string" },
            "father": { "type": "string" },
            "fatherSource": source_ref.clone(),
            "mother": { "type": "string" },
            "motherSource": source_ref.clone(),
            "events": { "type": "array", "items": event.clone() }
        },
        "required": ["name"]
    });

    json!({
        "type": "object",
        "properties": {
            "fatherName": { "type": "string" },
            "motherName": { "type": "string" },
            "recordDate": { "type": "string" },
            "recordId": { "type": "string" },
            "created": { "type": "string" },
            "comments": { "type": "string" },
            "father": parent.clone(),
            "mother": parent,
            "children": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "id": { "type": "string" },
                        "name": { "type": "string" },
                        "spouses": {
                            "type": "array",
                            "items": {
                                "type": "object",
                                "properties": {
                                    "id": { "type": "string" },
                                    "name": { "type": "string" },
                                    "source": source_ref
                                }
                            }
                        },
                        "events": { "type": "array", "items": event }
                    }
                }
            },
            "preparer": {
                "type": "object",
                "properties": {
                    "name": { "type": "string" },
                    "address": { "type": "string" },
                    "email": { "type": "string" }
                }
            }
        },
        "required": ["father", "mother", "preparer"]
    })
}

/// Turns free text into a replacement record via the injected extractor.
pub struct ImportService<E: TextExtractor> {
    extractor: E,
}

impl<E: TextExtractor> ImportService<E> {
    pub fn new(extractor: E) -> Self {
        Self { extractor }
    }

    /// Runs the extraction and returns the candidate replacement record.
    ///
    /// The caller decides whether to populate the form with the result; on
    /// error nothing has been changed anywhere.
    pub fn import_from_text(&self, free_text: &str, current: &Record) -> Result<Record, ImportError> {
        let schema = record_schema();
        let reply = self.extractor.extract(free_text, &schema).map_err(|err| {
            warn!("event=import_extract module=extract status=error error={err}");
            err
        })?;

        check_conformance(&reply)?;
        let mut record: Record = serde_json::from_value(reply)
            .map_err(|err| ImportError::NonConformingReply(err.to_string()))?;

        // Identity stays caller-owned across imports.
        record.record_id = current.record_id.clone();
        record.record_date = current.record_date.clone();

        info!(
            "event=import_extract module=extract status=ok record_id={} children={}",
            record.record_id,
            record.children.len()
        );
        Ok(record)
    }
}

// The serde model defaults every missing field, so an unrelated JSON object
// would otherwise "parse" into an empty record. Require the schema's
// required members before trusting the reply.
fn check_conformance(reply: &Value) -> Result<(), ImportError> {
    let object = reply
        .as_object()
        .ok_or_else(|| ImportError::NonConformingReply("reply is not a JSON object".into()))?;
    for member in ["father", "mother", "preparer"] {
        if !object.get(member).is_some_and(Value::is_object) {
            return Err(ImportError::NonConformingReply(format!(
                "missing required object member `{member}`"
            )));
        }
    }
    Ok(())
}
