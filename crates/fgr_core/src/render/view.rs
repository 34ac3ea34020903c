//! The shared, format-independent document view.
//!
//! One traversal turns a record snapshot into everything a format sink
//! needs: validated header data, renumbered citation markers, events in
//! chronological order, and the filtered sources appendix. Sinks never walk
//! the record themselves, so numbering and ordering exist in one place.

use crate::model::event::chronological;
use crate::model::record::{Child, Person, Preparer, Record};
use crate::numbering::{renumber, Citation};
use crate::render::ExportError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRow {
    pub date: String,
    /// Uppercase event-type label.
    pub label: String,
    pub place: String,
    pub description: String,
    /// Citation marker to show next to the description; 0 means the fact is
    /// unsourced and gets no marker.
    pub marker: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentSection {
    /// "Father" or "Mother".
    pub role: &'static str,
    pub name: String,
    /// Free-text ancestor names; empty when unknown.
    pub father_name: String,
    pub father_marker: u32,
    pub mother_name: String,
    pub mother_marker: u32,
    /// Chronological order, not stored order.
    pub events: Vec<EventRow>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpouseLine {
    pub name: String,
    pub marker: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildSection {
    pub name: String,
    pub events: Vec<EventRow>,
    pub spouses: Vec<SpouseLine>,
}

/// Everything the format sinks render, in render order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentView {
    /// "Family of {father} and {mother}".
    pub title: String,
    pub record_date: String,
    pub father: ParentSection,
    pub mother: ParentSection,
    pub children: Vec<ChildSection>,
    pub preparer: Preparer,
    /// Empty means the comments section is omitted.
    pub comments: String,
    /// Appendix entries: number ascending, empty citations dropped.
    pub sources: Vec<Citation>,
}

/// Builds the shared view, or aborts with the single validation failure.
pub fn build_view(record: &Record) -> Result<DocumentView, ExportError> {
    let missing = record.missing_required_fields();
    if !missing.is_empty() {
        return Err(ExportError::MissingRequiredFields(missing));
    }

    let numbered = renumber(record);
    let record = &numbered.record;

    Ok(DocumentView {
        title: format!("Family of {} and {}", record.father.name, record.mother.name),
        record_date: record.record_date.clone(),
        father: parent_section("Father", &record.father),
        mother: parent_section("Mother", &record.mother),
        children: record.children.iter().map(child_section).collect(),
        preparer: record.preparer.clone(),
        comments: record.comments.trim().to_string(),
        sources: appendix(numbered.citations),
    })
}

fn parent_section(role: &'static str, person: &Person) -> ParentSection {
    ParentSection {
        role,
        name: person.name.clone(),
        father_name: person.father.clone(),
        father_marker: marker(
            person.father_source.source_number,
            &person.father_source.content,
        ),
        mother_name: person.mother.clone(),
        mother_marker: marker(
            person.mother_source.source_number,
            &person.mother_source.content,
        ),
        events: event_rows(&person.events),
    }
}

fn child_section(child: &Child) -> ChildSection {
    ChildSection {
        name: child.name.clone(),
        events: event_rows(&child.events),
        spouses: child
            .spouses
            .iter()
            .map(|spouse| SpouseLine {
                name: spouse.name.clone(),
                marker: marker(spouse.source.source_number, &spouse.source.content),
            })
            .collect(),
    }
}

fn event_rows(events: &[crate::model::event::Event]) -> Vec<EventRow> {
    chronological(events)
        .into_iter()
        .map(|event| EventRow {
            date: event.date.clone(),
            label: event.kind.label(),
            place: event.place.clone(),
            description: event.description.clone(),
            marker: marker(event.source_number, &event.sources),
        })
        .collect()
}

// A marker is shown only for facts that actually cite something, so every
// visible superscript has an appendix entry to land on.
fn marker(number: u32, content: &str) -> u32 {
    if content.trim().is_empty() {
        0
    } else {
        number
    }
}

fn appendix(citations: Vec<Citation>) -> Vec<Citation> {
    let mut entries: Vec<Citation> = citations
        .into_iter()
        .filter(|citation| !citation.content.trim().is_empty())
        .collect();
    entries.sort_by_key(|citation| citation.number);
    entries
}

#[cfg(test)]
mod tests {
    use super::build_view;
    use crate::model::event::{Event, EventType};
    use crate::model::record::{Child, Record, SourceRef, Spouse};
    use crate::render::ExportError;

    fn exportable_record() -> Record {
        let mut record = Record::new();
        record.record_date = "6 August 2026".to_string();
        record.father.name = "John Smith".to_string();
        record.mother.name = "Jane Doe".to_string();
        record.preparer.name = "Sam Archivist".to_string();
        record.preparer.email = "sam@example.com".to_string();
        record
    }

    #[test]
    fn missing_required_fields_abort_before_any_work() {
        let mut record = exportable_record();
        record.mother.name.clear();
        let err = build_view(&record).unwrap_err();
        assert_eq!(
            err,
            ExportError::MissingRequiredFields(vec!["mother full name"])
        );
    }

    #[test]
    fn empty_record_builds_an_empty_view_without_error() {
        let view = build_view(&exportable_record()).expect("empty record renders");
        assert!(view.sources.is_empty());
        assert!(view.children.is_empty());
        assert!(view.comments.is_empty());
        assert_eq!(view.title, "Family of John Smith and Jane Doe");
        // Unsourced ancestor slots were numbered but show no markers.
        assert_eq!(view.father.father_marker, 0);
    }

    #[test]
    fn events_are_chronological_while_markers_keep_assignment_order() {
        let mut record = exportable_record();
        record.father.events.push(Event {
            id: "late".to_string(),
            kind: EventType::Death,
            date: "1900".to_string(),
            sources: "death cert".to_string(),
            ..Event::default()
        });
        record.father.events.push(Event {
            id: "early".to_string(),
            kind: EventType::Birth,
            date: "3 March 1850".to_string(),
            sources: "birth cert".to_string(),
            ..Event::default()
        });

        let view = build_view(&record).unwrap();
        // Display order flips to chronological...
        assert_eq!(view.father.events[0].label, "BIRTH");
        assert_eq!(view.father.events[1].label, "DEATH");
        // ...but numbers still follow stored order: death was stored first.
        assert_eq!(view.father.events[0].marker, 2);
        assert_eq!(view.father.events[1].marker, 1);
    }

    #[test]
    fn appendix_keeps_only_cited_slots_in_number_order() {
        let mut record = exportable_record();
        record.father.events.push(Event {
            id: "e".to_string(),
            date: "3 March 1850".to_string(),
            sources: "Census 1850".to_string(),
            ..Event::default()
        });
        let mut child = Child::new();
        child.name = "Mary Smith".to_string();
        let mut spouse = Spouse::new("Tom Jones");
        spouse.source = SourceRef::with_content("Marriage record");
        child.spouses.push(spouse);
        record.children.push(child);

        let view = build_view(&record).unwrap();
        let numbers: Vec<u32> = view.sources.iter().map(|s| s.number).collect();
        assert_eq!(numbers, vec![1, 6]);
        assert_eq!(view.sources[0].content, "Census 1850");
        assert_eq!(view.children[0].spouses[0].marker, 6);
    }
}
