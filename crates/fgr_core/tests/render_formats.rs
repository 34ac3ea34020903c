use fgr_core::model::event::{Event, EventType};
use fgr_core::model::record::{Child, Record, SourceRef, Spouse};
use fgr_core::render::view::build_view;
use fgr_core::render::{docx, export_file_name, html, text, ExportError};
use std::io::Cursor;

fn family_record() -> Record {
    let mut record = Record::new();
    record.record_date = "6 August 2026".to_string();
    record.father.name = "John Smith".to_string();
    record.father.father = "Will Smith".to_string();
    record.father.father_source = SourceRef::with_content("Parish register");
    record.mother.name = "Jane Doe".to_string();
    record.preparer.name = "Sam Archivist".to_string();
    record.preparer.email = "sam@example.com".to_string();
    record.comments = "Census spelling varies.".to_string();

    record.father.events.push(Event {
        date: "1900".to_string(),
        description: "at home".to_string(),
        place: "Boston".to_string(),
        sources: "1900 census".to_string(),
        ..Event::new(EventType::Census)
    });
    record.father.events.push(Event {
        date: "3 March 1850".to_string(),
        sources: "Birth certificate".to_string(),
        ..Event::new(EventType::Birth)
    });

    let mut child = Child::new();
    child.name = "Mary Smith".to_string();
    let mut spouse = Spouse::new("Tom Jones");
    spouse.source =
        SourceRef::with_content("Marriage record, see https://example.com/m/1875");
    child.spouses.push(spouse);
    record.children.push(child);

    record
}

#[test]
fn text_output_carries_facts_markers_and_appendix() {
    let view = build_view(&family_record()).expect("record renders");
    let rendered = text::render(&view);

    assert!(rendered.starts_with("FAMILY GROUP RECORD\n"));
    assert!(rendered.contains("Family of John Smith and Jane Doe"));
    // Chronological: birth (stored second, numbered 2) before census.
    let birth = rendered.find("BIRTH: 3 March 1850 [2]").expect("birth line");
    let census = rendered
        .find("CENSUS: 1900 | Boston | at home [1]")
        .expect("census line");
    assert!(birth < census);
    assert!(rendered.contains("Father: Will Smith [3]"));
    assert!(rendered.contains("Spouses: Tom Jones [7]"));
    assert!(rendered.contains("COMMENTS:\nCensus spelling varies."));
    assert!(rendered.contains("[1] 1900 census"));
    assert!(rendered.contains("[7] Marriage record"));
}

#[test]
fn html_output_cross_references_markers_and_appendix_both_ways() {
    let view = build_view(&family_record()).expect("record renders");
    let rendered = html::render(&view);

    assert!(rendered.contains("<h1 id=\"fgr-top\">Family of John Smith and Jane Doe</h1>"));
    // Marker on the sourced fact points at the appendix entry...
    assert!(rendered.contains("<a href=\"#source-description-3\">3</a>"));
    assert!(rendered.contains("id=\"source-number-3\""));
    // ...and the appendix entry points back at the fact.
    assert!(rendered.contains("<p id=\"source-description-3\"><a href=\"#source-number-3\">"));
    // Bare URLs in citation text become anchors.
    assert!(rendered.contains("<a href=\"https://example.com/m/1875\">"));
    assert!(rendered.contains("Back to top"));
    // Empty ancestor names are omitted, exactly as in the other formats.
    assert!(!rendered.contains("<li>Mother: </li>"));
}

#[test]
fn all_three_formats_agree_on_numbering() {
    let record = family_record();
    let view = build_view(&record).expect("record renders");
    let appendix: Vec<u32> = view.sources.iter().map(|s| s.number).collect();
    assert_eq!(appendix, vec![1, 2, 3, 7]);

    let rendered_text = text::render(&view);
    let rendered_html = html::render(&view);
    for number in &appendix {
        assert!(rendered_text.contains(&format!("[{number}] ")));
        assert!(rendered_html.contains(&format!("id=\"source-description-{number}\"")));
    }

    let mut buffer = Cursor::new(Vec::new());
    docx::write(&view, &mut buffer).expect("docx packs");
    assert!(!buffer.into_inner().is_empty());
}

#[test]
fn missing_required_fields_abort_every_format_before_output() {
    let mut record = family_record();
    record.preparer.email.clear();
    let err = build_view(&record).unwrap_err();
    assert_eq!(
        err,
        ExportError::MissingRequiredFields(vec!["preparer email"])
    );
    assert_eq!(
        err.to_string(),
        "please fill in all required fields before exporting: preparer email"
    );
}

#[test]
fn file_names_stamp_parents_and_iso_date() {
    let record = family_record();
    let on = chrono::NaiveDate::from_ymd_opt(2026, 8, 6).expect("valid date");
    assert_eq!(
        export_file_name(&record, "docx", on),
        "FamilyGroupRecord_John Smith_Jane Doe_2026-08-06.docx"
    );
}
