//! Plain-text export sink.
//!
//! Citation markers render as `[n]` after the fact they source; the
//! appendix lists `[n] content` in number order.

use crate::render::view::{DocumentView, EventRow, ParentSection};
use std::fmt::Write;

/// Renders the shared view as the downloadable text document.
pub fn render(view: &DocumentView) -> String {
    let mut out = String::new();

    out.push_str("FAMILY GROUP RECORD\n");
    let _ = writeln!(out, "Record Date: {}", view.record_date);
    let _ = writeln!(out, "{}", view.title);
    let _ = writeln!(out, "Prepared by: {}", view.preparer.name);
    out.push('\n');

    parent_block(&mut out, &view.father);
    parent_block(&mut out, &view.mother);

    if !view.children.is_empty() {
        out.push_str("CHILDREN:\n");
        for (index, child) in view.children.iter().enumerate() {
            let _ = writeln!(out, "  {}. {}", index + 1, child.name);
            if !child.events.is_empty() {
                out.push_str("    Events:\n");
                for event in &child.events {
                    event_line(&mut out, "      ", event);
                }
            }
            if !child.spouses.is_empty() {
                let spouses: Vec<String> = child
                    .spouses
                    .iter()
                    .map(|spouse| format!("{}{}", spouse.name, text_marker(spouse.marker)))
                    .collect();
                let _ = writeln!(out, "    Spouses: {}", spouses.join(", "));
            }
        }
        out.push('\n');
    }

    out.push_str("PREPARER:\n");
    let _ = writeln!(out, "  Name: {}", view.preparer.name);
    if !view.preparer.address.is_empty() {
        let _ = writeln!(out, "  Address: {}", view.preparer.address);
    }
    let _ = writeln!(out, "  Email: {}", view.preparer.email);
    out.push('\n');

    if !view.comments.is_empty() {
        let _ = writeln!(out, "COMMENTS:\n{}", view.comments);
        out.push('\n');
    }

    if !view.sources.is_empty() {
        out.push_str("SOURCES:\n");
        for source in &view.sources {
            let _ = writeln!(out, "  [{}] {}", source.number, source.content);
        }
    }

    out
}

fn parent_block(out: &mut String, parent: &ParentSection) {
    let _ = writeln!(out, "{}: {}", parent.role.to_uppercase(), parent.name);
    if !parent.father_name.is_empty() {
        let _ = writeln!(
            out,
            "  Father: {}{}",
            parent.father_name,
            text_marker(parent.father_marker)
        );
    }
    if !parent.mother_name.is_empty() {
        let _ = writeln!(
            out,
            "  Mother: {}{}",
            parent.mother_name,
            text_marker(parent.mother_marker)
        );
    }
    if !parent.events.is_empty() {
        out.push_str("  Events:\n");
        for event in &parent.events {
            event_line(out, "    ", event);
        }
    }
    out.push('\n');
}

fn event_line(out: &mut String, indent: &str, event: &EventRow) {
    let _ = write!(out, "{indent}{}: {}", event.label, event.date);
    if !event.place.is_empty() {
        let _ = write!(out, " | {}", event.place);
    }
    if !event.description.is_empty() {
        let _ = write!(out, " | {}", event.description);
    }
    let _ = writeln!(out, "{}", text_marker(event.marker));
}

fn text_marker(marker: u32) -> String {
    if marker == 0 {
        String::new()
    } else {
        format!(" [{marker}]")
    }
}
