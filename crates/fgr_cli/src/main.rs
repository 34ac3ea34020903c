//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `fgr_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use fgr_core::model::event::{Event, EventType};
use fgr_core::model::record::{Child, Record, SourceRef, Spouse};
use fgr_core::render::{text, view};

fn main() {
    println!("fgr_core version={}", fgr_core::core_version());

    match view::build_view(&sample_record()) {
        Ok(view) => print!("{}", text::render(&view)),
        Err(err) => eprintln!("sample record failed to render: {err}"),
    }
}

fn sample_record() -> Record {
    let mut record = Record::new();
    record.record_date = "1 January 2026".to_string();
    record.father.name = "John Smith".to_string();
    record.mother.name = "Jane Doe".to_string();
    record.preparer.name = "Sample Preparer".to_string();
    record.preparer.email = "preparer@example.com".to_string();

    record.father.events.push(Event {
        date: "3 March 1850".to_string(),
        sources: "1850 census, line 12".to_string(),
        ..Event::new(EventType::Birth)
    });

    let mut child = Child::new();
    child.name = "Mary Smith".to_string();
    let mut spouse = Spouse::new("Tom Jones");
    spouse.source = SourceRef::with_content("Marriage record, 1875");
    child.spouses.push(spouse);
    record.children.push(child);

    record
}
