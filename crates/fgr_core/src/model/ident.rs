//! Identifier helpers for records and their nested collections.
//!
//! # Invariants
//! - A generated id is never reused for another object.
//! - Event/spouse/child ids only need to be unique within their owning
//!   collection, but v4 uuids make them globally unique anyway.

use uuid::Uuid;

/// Stable record identifier, generated once at record creation.
pub fn record_id() -> String {
    Uuid::new_v4().to_string()
}

pub fn child_id() -> String {
    format!("child-{}", Uuid::new_v4())
}

pub fn spouse_id() -> String {
    format!("spouse-{}", Uuid::new_v4())
}

pub fn event_id() -> String {
    format!("event-{}", Uuid::new_v4())
}
