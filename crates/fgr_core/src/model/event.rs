//! Life-event model and display ordering.
//!
//! # Responsibility
//! - Define the `Event` record and its fixed type vocabulary.
//! - Provide the chronological view used by document rendering.
//!
//! # Invariants
//! - `Event.date` stays free text ("12 January 2025", "January 2025",
//!   "2025"); it is parsed only when a sortable view is needed.
//! - `chronological` never mutates or reorders the stored sequence.

use crate::date::sort_key_or_earliest;
use crate::model::ident;
use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// Fixed vocabulary of genealogical event types, with a free-text fallback
/// for anything outside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventType {
    Birth,
    Baptism,
    Christening,
    Marriage,
    Divorce,
    Death,
    Burial,
    Census,
    Residence,
    Occupation,
    Military,
    Other(String),
}

impl EventType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Birth => "birth",
            Self::Baptism => "baptism",
            Self::Christening => "christening",
            Self::Marriage => "marriage",
            Self::Divorce => "divorce",
            Self::Death => "death",
            Self::Burial => "burial",
            Self::Census => "census",
            Self::Residence => "residence",
            Self::Occupation => "occupation",
            Self::Military => "military",
            Self::Other(value) => value.as_str(),
        }
    }

    /// Parses a stored type string. Unknown values are preserved verbatim as
    /// `Other` rather than rejected.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "birth" => Self::Birth,
            "baptism" => Self::Baptism,
            "christening" => Self::Christening,
            "marriage" => Self::Marriage,
            "divorce" => Self::Divorce,
            "death" => Self::Death,
            "burial" => Self::Burial,
            "census" => Self::Census,
            "residence" => Self::Residence,
            "occupation" => Self::Occupation,
            "military" => Self::Military,
            _ => Self::Other(value.trim().to_string()),
        }
    }

    /// Uppercase label used by every export format.
    pub fn label(&self) -> String {
        self.as_str().to_uppercase()
    }
}

impl Default for EventType {
    fn default() -> Self {
        Self::Birth
    }
}

impl Serialize for EventType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for EventType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Ok(Self::parse(&value))
    }
}

/// One life event attached to a parent or child.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Unique within the owning events collection.
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: EventType,
    /// Free-text genealogical date; empty means unknown.
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub place: String,
    /// Citation text; may embed hyperlink markup.
    #[serde(default)]
    pub sources: String,
    /// Assigned by the numbering engine only; 0 means unset.
    #[serde(default)]
    pub source_number: u32,
}

impl Event {
    /// Creates an empty event of the given type with a generated id.
    pub fn new(kind: EventType) -> Self {
        Self {
            id: ident::event_id(),
            kind,
            ..Self::default()
        }
    }
}

/// Returns the events sorted ascending by resolved date, for display only.
///
/// The sort is stable: events with equal resolved dates (including two
/// unparseable dates) keep their stored relative order. Missing or malformed
/// dates resolve to the earliest sentinel key instead of failing.
pub fn chronological(events: &[Event]) -> Vec<Event> {
    let mut sorted = events.to_vec();
    sorted.sort_by_key(|event| sort_key_or_earliest(&event.date));
    sorted
}
