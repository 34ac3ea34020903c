use fgr_core::model::event::{Event, EventType};
use fgr_core::model::record::{Child, Record, SourceRef, Spouse};
use fgr_core::numbering::renumber;
use fgr_core::render::view::build_view;

/// Record from the documented numbering scenario: father with one sourced
/// birth event, mother with no events, one child with one sourced spouse.
fn scenario_record() -> Record {
    let mut record = Record::new();
    record.record_date = "6 August 2026".to_string();
    record.father.name = "John Smith".to_string();
    record.mother.name = "Jane Doe".to_string();
    record.preparer.name = "Sam Archivist".to_string();
    record.preparer.email = "sam@example.com".to_string();

    record.father.events.push(Event {
        date: "3 March 1850".to_string(),
        sources: "Census 1850".to_string(),
        ..Event::new(EventType::Birth)
    });

    let mut child = Child::new();
    child.name = "Mary Smith".to_string();
    let mut spouse = Spouse::new("Tom Jones");
    spouse.source = SourceRef::with_content("Marriage record");
    child.spouses.push(spouse);
    record.children.push(child);

    record
}

#[test]
fn scenario_assigns_one_through_six_in_traversal_order() {
    let numbered = renumber(&scenario_record());
    let record = &numbered.record;

    assert_eq!(record.father.events[0].source_number, 1);
    assert_eq!(record.father.father_source.source_number, 2);
    assert_eq!(record.father.mother_source.source_number, 3);
    assert_eq!(record.mother.father_source.source_number, 4);
    assert_eq!(record.mother.mother_source.source_number, 5);
    assert_eq!(record.children[0].spouses[0].source.source_number, 6);

    let numbers: Vec<u32> = numbered.citations.iter().map(|c| c.number).collect();
    assert_eq!(numbers, vec![1, 2, 3, 4, 5, 6]);
}

#[test]
fn appendix_shows_only_the_two_cited_entries() {
    let view = build_view(&scenario_record()).expect("scenario renders");
    let entries: Vec<(u32, &str)> = view
        .sources
        .iter()
        .map(|s| (s.number, s.content.as_str()))
        .collect();
    assert_eq!(entries, vec![(1, "Census 1850"), (6, "Marriage record")]);
}

#[test]
fn numbering_ignores_date_edits_because_it_uses_stored_order() {
    let mut record = scenario_record();
    record.father.events.push(Event {
        date: "1 January 1800".to_string(),
        sources: "Old parish book".to_string(),
        ..Event::new(EventType::Baptism)
    });

    let before = renumber(&record);
    // Editing a date changes chronology but must not move citation numbers.
    record.father.events[1].date = "31 December 2000".to_string();
    let after = renumber(&record);

    assert_eq!(
        before.record.father.events[1].source_number,
        after.record.father.events[1].source_number
    );

    let view = build_view(&record).expect("renders");
    // The edited event now displays last while keeping marker 2.
    assert_eq!(view.father.events.last().unwrap().marker, 2);
}

#[test]
fn a_record_with_nothing_sourced_numbers_to_an_empty_appendix() {
    let mut record = scenario_record();
    record.father.events.clear();
    record.children.clear();

    let numbered = renumber(&record);
    // Four ancestor slots still get numbers by position.
    assert_eq!(numbered.citations.len(), 4);

    let view = build_view(&record).expect("empty record renders");
    assert!(view.sources.is_empty());
    assert!(view.children.is_empty());
}
