//! Word-processor (.docx) export sink.
//!
//! Same facts, order and numbers as the text and HTML sinks; markers render
//! as superscript runs and the event table keeps the 20/20/20/40 column
//! split of the printable layout.

use crate::render::view::{DocumentView, EventRow};
use docx_rs::{
    Docx, Paragraph, Run, Table, TableCell, TableRow, VertAlignType, WidthType,
};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::{Seek, Write};

// Column widths in twentieths of a point, out of a ~10000 body width.
const COLUMN_WIDTHS: [usize; 4] = [2000, 2000, 2000, 4000];

#[derive(Debug)]
pub enum DocxWriteError {
    Pack(docx_rs::DocxError),
}

impl Display for DocxWriteError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pack(err) => write!(f, "failed to pack docx archive: {err}"),
        }
    }
}

impl Error for DocxWriteError {}

impl From<docx_rs::DocxError> for DocxWriteError {
    fn from(value: docx_rs::DocxError) -> Self {
        Self::Pack(value)
    }
}

/// Writes the shared view as a .docx archive to `writer`.
pub fn write<W: Write + Seek>(view: &DocumentView, writer: W) -> Result<(), DocxWriteError> {
    let mut docx = Docx::new();

    docx = docx.add_paragraph(heading("FAMILY GROUP RECORD", 36));
    docx = docx.add_paragraph(line(&format!("Record Date: {}", view.record_date)));
    docx = docx.add_paragraph(line(&view.title));
    docx = docx.add_paragraph(line(&format!("Prepared by: {}", view.preparer.name)));

    for parent in [&view.father, &view.mother] {
        docx = docx.add_paragraph(heading(
            &format!("{}: {}", parent.role.to_uppercase(), parent.name),
            28,
        ));
        if !parent.father_name.is_empty() {
            docx = docx.add_paragraph(marked_line(
                &format!("Father: {}", parent.father_name),
                parent.father_marker,
            ));
        }
        if !parent.mother_name.is_empty() {
            docx = docx.add_paragraph(marked_line(
                &format!("Mother: {}", parent.mother_name),
                parent.mother_marker,
            ));
        }
        if !parent.events.is_empty() {
            docx = docx.add_table(events_table(&parent.events));
        }
    }

    if !view.children.is_empty() {
        docx = docx.add_paragraph(heading("CHILDREN", 28));
        for (index, child) in view.children.iter().enumerate() {
            let mut name_line = Paragraph::new()
                .add_run(Run::new().add_text(format!("{}. {}", index + 1, child.name)));
            if !child.spouses.is_empty() {
                name_line = name_line.add_run(Run::new().add_text(" (Spouses: "));
                for (position, spouse) in child.spouses.iter().enumerate() {
                    if position > 0 {
                        name_line = name_line.add_run(Run::new().add_text(", "));
                    }
                    name_line = name_line.add_run(Run::new().add_text(spouse.name.as_str()));
                    if spouse.marker > 0 {
                        name_line = name_line.add_run(superscript(spouse.marker));
                    }
                }
                name_line = name_line.add_run(Run::new().add_text(")"));
            }
            docx = docx.add_paragraph(name_line);
            if !child.events.is_empty() {
                docx = docx.add_table(events_table(&child.events));
            }
        }
    }

    docx = docx.add_paragraph(heading("PREPARER", 28));
    docx = docx.add_paragraph(line(&format!("Name: {}", view.preparer.name)));
    if !view.preparer.address.is_empty() {
        docx = docx.add_paragraph(line(&format!("Address: {}", view.preparer.address)));
    }
    docx = docx.add_paragraph(line(&format!("Email: {}", view.preparer.email)));

    if !view.comments.is_empty() {
        docx = docx.add_paragraph(heading("COMMENTS", 28));
        docx = docx.add_paragraph(line(&view.comments));
    }

    if !view.sources.is_empty() {
        docx = docx.add_paragraph(heading("Sources", 28));
        for source in &view.sources {
            docx = docx.add_paragraph(
                Paragraph::new()
                    .add_run(superscript(source.number))
                    .add_run(Run::new().add_text(format!(" {}", source.content))),
            );
        }
    }

    docx.build().pack(writer).map_err(docx_rs::DocxError::from)?;
    Ok(())
}

fn heading(text: &str, half_points: usize) -> Paragraph {
    Paragraph::new().add_run(Run::new().add_text(text).bold().size(half_points))
}

fn line(text: &str) -> Paragraph {
    Paragraph::new().add_run(Run::new().add_text(text))
}

fn marked_line(text: &str, marker: u32) -> Paragraph {
    let mut paragraph = Paragraph::new().add_run(Run::new().add_text(text));
    if marker > 0 {
        paragraph = paragraph.add_run(superscript(marker));
    }
    paragraph
}

fn superscript(marker: u32) -> Run {
    let mut run = Run::new().add_text(marker.to_string());
    run.run_property = run.run_property.vert_align(VertAlignType::SuperScript);
    run
}

fn events_table(events: &[EventRow]) -> Table {
    let mut rows = vec![TableRow::new(vec![
        header_cell("Date", COLUMN_WIDTHS[0]),
        header_cell("Event", COLUMN_WIDTHS[1]),
        header_cell("Place", COLUMN_WIDTHS[2]),
        header_cell("Notes", COLUMN_WIDTHS[3]),
    ])];

    for event in events {
        let mut notes = Paragraph::new().add_run(Run::new().add_text(event.description.as_str()));
        if event.marker > 0 {
            notes = notes.add_run(superscript(event.marker));
        }
        rows.push(TableRow::new(vec![
            text_cell(&event.date, COLUMN_WIDTHS[0]),
            text_cell(&event.label, COLUMN_WIDTHS[1]),
            text_cell(&event.place, COLUMN_WIDTHS[2]),
            TableCell::new()
                .add_paragraph(notes)
                .width(COLUMN_WIDTHS[3], WidthType::Dxa),
        ]));
    }

    Table::new(rows).set_grid(COLUMN_WIDTHS.to_vec())
}

fn header_cell(label: &str, width: usize) -> TableCell {
    TableCell::new()
        .add_paragraph(Paragraph::new().add_run(Run::new().add_text(label).bold()))
        .width(width, WidthType::Dxa)
}

fn text_cell(text: &str, width: usize) -> TableCell {
    TableCell::new()
        .add_paragraph(line(text))
        .width(width, WidthType::Dxa)
}
