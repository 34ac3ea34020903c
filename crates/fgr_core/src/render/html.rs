//! Print-ready HTML export sink.
//!
//! Cross-references are bidirectional: every marker is
//! `<sup><a href="#source-description-N">` and every appendix entry links
//! back to `#source-number-N`, the id of the fact it sources. Citation
//! content is emitted raw after URL auto-linking, since citations may embed
//! hyperlink markup of their own.

use crate::render::view::{ChildSection, DocumentView, EventRow, ParentSection};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt::Write;

static URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"https?://[^\s<>"']+"#).expect("valid url regex"));

/// Renders the shared view as a standalone printable page.
pub fn render(view: &DocumentView) -> String {
    let mut out = String::new();

    out.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    let _ = writeln!(out, "<title>{}</title>", escape(&view.title));
    out.push_str("</head>\n<body class=\"pdf\">\n");

    let _ = writeln!(out, "<h1 id=\"fgr-top\">{}</h1>", escape(&view.title));
    out.push_str("<p class=\"subtitle\">Family Group Record</p>\n");
    let _ = writeln!(out, "<p>Record Date: {}</p>", escape(&view.record_date));
    let _ = writeln!(out, "<p>Prepared by: {}</p>", escape(&view.preparer.name));

    parent_block(&mut out, &view.father);
    parent_block(&mut out, &view.mother);

    if !view.children.is_empty() {
        out.push_str("<h2>Children</h2>\n");
        for child in &view.children {
            child_block(&mut out, child);
        }
    }

    out.push_str("<h2>Preparer</h2>\n");
    let _ = writeln!(out, "<p>Name: {}</p>", escape(&view.preparer.name));
    if !view.preparer.address.is_empty() {
        let _ = writeln!(out, "<p>Address: {}</p>", escape(&view.preparer.address));
    }
    let _ = writeln!(out, "<p>Email: {}</p>", escape(&view.preparer.email));

    if !view.comments.is_empty() {
        out.push_str("<h2>Comments</h2>\n");
        let _ = writeln!(out, "<p>{}</p>", escape(&view.comments));
    }

    if !view.sources.is_empty() {
        out.push_str("<div class=\"page-break-here\"></div>\n");
        out.push_str("<h2>Sources</h2>\n");
        for source in &view.sources {
            let _ = writeln!(
                out,
                "<p id=\"source-description-{n}\"><a href=\"#source-number-{n}\"><sup>{n}</sup></a> {content}</p>",
                n = source.number,
                content = linkify(&source.content),
            );
        }
    }

    out.push_str("<a href=\"#fgr-top\">Back to top</a>\n</body>\n</html>\n");
    out
}

fn parent_block(out: &mut String, parent: &ParentSection) {
    let _ = writeln!(out, "<h2>{}: {}</h2>", parent.role, escape(&parent.name));
    events_table(out, &parent.events);
    if parent.father_name.is_empty() && parent.mother_name.is_empty() {
        return;
    }
    out.push_str("<ul>\n");
    if !parent.father_name.is_empty() {
        ancestor_item(out, "Father", &parent.father_name, parent.father_marker);
    }
    if !parent.mother_name.is_empty() {
        ancestor_item(out, "Mother", &parent.mother_name, parent.mother_marker);
    }
    out.push_str("</ul>\n");
}

fn ancestor_item(out: &mut String, label: &str, name: &str, marker: u32) {
    let _ = writeln!(
        out,
        "<li{}>{label}: {}{}</li>",
        anchor_id(marker),
        escape(name),
        sup_marker(marker),
    );
}

fn child_block(out: &mut String, child: &ChildSection) {
    let _ = writeln!(out, "<h3>{}</h3>", escape(&child.name));
    events_table(out, &child.events);
    if !child.spouses.is_empty() {
        let spouses: Vec<String> = child
            .spouses
            .iter()
            .map(|spouse| {
                format!(
                    "<span{}>{}{}</span>",
                    anchor_id(spouse.marker),
                    escape(&spouse.name),
                    sup_marker(spouse.marker),
                )
            })
            .collect();
        let _ = writeln!(out, "<p>Spouses: {}</p>", spouses.join(", "));
    }
}

fn events_table(out: &mut String, events: &[EventRow]) {
    if events.is_empty() {
        return;
    }
    out.push_str("<table class=\"exported-table\">\n<tbody>\n");
    out.push_str(
        "<tr><th width=\"20%\">Date</th><th width=\"20%\">Event</th>\
         <th width=\"20%\">Place</th><th width=\"40%\">Notes</th></tr>\n",
    );
    for event in events {
        let _ = writeln!(
            out,
            "<tr><td>{}</td><td>{}</td><td>{}</td>\
             <td{}>{}{}</td></tr>",
            escape(&event.date),
            escape(&event.label),
            escape(&event.place),
            anchor_id(event.marker),
            escape(&event.description),
            sup_marker(event.marker),
        );
    }
    out.push_str("</tbody>\n</table>\n");
}

// Back-link target for one sourced fact; unsourced facts get no anchor so
// the id stays unique per citation number.
fn anchor_id(marker: u32) -> String {
    if marker == 0 {
        String::new()
    } else {
        format!(" id=\"source-number-{marker}\"")
    }
}

fn sup_marker(marker: u32) -> String {
    if marker == 0 {
        String::new()
    } else {
        format!(
            "<sup class=\"source-number\"><a href=\"#source-description-{marker}\">{marker}</a></sup>"
        )
    }
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

// Citation text keeps its own markup; only bare URLs are upgraded to links.
fn linkify(content: &str) -> String {
    URL_RE
        .replace_all(content, |caps: &regex::Captures<'_>| {
            let url = &caps[0];
            format!("<a href=\"{url}\">{url}</a>")
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::{escape, linkify};

    #[test]
    fn escape_covers_markup_characters() {
        assert_eq!(escape("a<b>&\"c\""), "a&lt;b&gt;&amp;&quot;c&quot;");
    }

    #[test]
    fn bare_urls_become_anchors_and_markup_is_left_alone() {
        assert_eq!(
            linkify("see https://example.com/census for details"),
            "see <a href=\"https://example.com/census\">https://example.com/census</a> for details"
        );
        assert_eq!(
            linkify("<b>already marked up</b>"),
            "<b>already marked up</b>"
        );
    }
}
