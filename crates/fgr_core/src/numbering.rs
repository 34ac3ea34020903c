//! Sequential citation numbering over a record snapshot.
//!
//! # Responsibility
//! - Assign `source_number` to every sourced fact slot in one fixed
//!   traversal, starting at 1 on every call.
//! - Hand the renderer the citation list collected during that same walk.
//!
//! # Invariants
//! - Traversal order: father events (stored order), father's father source,
//!   father's mother source, mother events, mother's father source,
//!   mother's mother source, then per child in list order: the child's
//!   events followed by the child's spouse sources.
//! - Every slot the traversal reaches gets a number, sourced or not;
//!   filtering empty citations out of the appendix is the renderer's job.
//! - Numbering is recomputed from scratch each call and is not idempotent
//!   across mutations: the counter always restarts at 1.

use crate::model::record::Record;

/// One numbered citation slot, in traversal order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Citation {
    pub number: u32,
    /// Snapshot of the slot's citation text; may be empty.
    pub content: String,
}

/// A fully renumbered copy of a record plus its citation slots.
#[derive(Debug, Clone)]
pub struct Numbered {
    pub record: Record,
    /// All slots in assignment order; numbers run 1..=len() with no gaps.
    pub citations: Vec<Citation>,
}

/// Renumbers every citation slot of `record` into a fresh copy.
///
/// Pure from the caller's perspective: the input is never mutated. Calling
/// twice on the same input yields identical output.
pub fn renumber(record: &Record) -> Numbered {
    let mut out = record.clone();
    let mut citations = Vec::new();
    let mut counter = 0u32;

    let mut assign = |content: &str, slot: &mut u32| {
        counter += 1;
        *slot = counter;
        citations.push(Citation {
            number: counter,
            content: content.to_string(),
        });
    };

    for event in &mut out.father.events {
        assign(&event.sources, &mut event.source_number);
    }
    assign(
        &out.father.father_source.content,
        &mut out.father.father_source.source_number,
    );
    assign(
        &out.father.mother_source.content,
        &mut out.father.mother_source.source_number,
    );

    for event in &mut out.mother.events {
        assign(&event.sources, &mut event.source_number);
    }
    assign(
        &out.mother.father_source.content,
        &mut out.mother.father_source.source_number,
    );
    assign(
        &out.mother.mother_source.content,
        &mut out.mother.mother_source.source_number,
    );

    for child in &mut out.children {
        for event in &mut child.events {
            assign(&event.sources, &mut event.source_number);
        }
        for spouse in &mut child.spouses {
            assign(&spouse.source.content, &mut spouse.source.source_number);
        }
    }

    Numbered {
        record: out,
        citations,
    }
}

#[cfg(test)]
mod tests {
    use super::renumber;
    use crate::model::event::Event;
    use crate::model::record::{Child, Record, SourceRef, Spouse};

    fn sourced_event(sources: &str) -> Event {
        Event {
            id: format!("e-{sources}"),
            sources: sources.to_string(),
            ..Event::default()
        }
    }

    #[test]
    fn numbers_run_from_one_with_no_gaps_or_duplicates() {
        let mut record = Record::new();
        record.father.events.push(sourced_event("a"));
        record.father.events.push(sourced_event("b"));
        record.mother.events.push(sourced_event("c"));
        let mut child = Child::new();
        child.events.push(sourced_event("d"));
        child.spouses.push(Spouse::new("S"));
        record.children.push(child);

        let numbered = renumber(&record);
        let numbers: Vec<u32> = numbered.citations.iter().map(|c| c.number).collect();
        let expected: Vec<u32> = (1..=numbers.len() as u32).collect();
        assert_eq!(numbers, expected);
        // 4 events + 4 ancestor sources + 1 spouse source
        assert_eq!(numbers.len(), 9);
    }

    #[test]
    fn renumbering_is_deterministic_and_does_not_mutate_the_input() {
        let mut record = Record::new();
        record.father.events.push(sourced_event("a"));
        record.father.father_source = SourceRef::with_content("x");

        let first = renumber(&record);
        let second = renumber(&record);
        assert_eq!(first.record, second.record);
        assert_eq!(first.citations, second.citations);
        assert_eq!(record.father.events[0].source_number, 0);
    }

    #[test]
    fn second_pass_overwrites_rather_than_continues() {
        let mut record = Record::new();
        record.father.events.push(sourced_event("a"));

        let once = renumber(&record);
        let twice = renumber(&once.record);
        assert_eq!(twice.record.father.events[0].source_number, 1);
        assert_eq!(
            once.record.father.father_source.source_number,
            twice.record.father.father_source.source_number
        );
    }

    #[test]
    fn traversal_matches_the_documented_order() {
        let mut record = Record::new();
        record.father.name = "John Smith".to_string();
        record.father.events.push(sourced_event("Census 1850"));
        record.mother.name = "Jane Doe".to_string();
        let mut child = Child::new();
        child.name = "Mary Smith".to_string();
        let mut spouse = Spouse::new("Tom Jones");
        spouse.source = SourceRef::with_content("Marriage record");
        child.spouses.push(spouse);
        record.children.push(child);

        let numbered = renumber(&record);
        assert_eq!(numbered.record.father.events[0].source_number, 1);
        assert_eq!(numbered.record.father.father_source.source_number, 2);
        assert_eq!(numbered.record.father.mother_source.source_number, 3);
        assert_eq!(numbered.record.mother.father_source.source_number, 4);
        assert_eq!(numbered.record.mother.mother_source.source_number, 5);
        assert_eq!(
            numbered.record.children[0].spouses[0].source.source_number,
            6
        );

        // Empty slots were numbered anyway; only two carry content.
        let cited: Vec<u32> = numbered
            .citations
            .iter()
            .filter(|c| !c.content.trim().is_empty())
            .map(|c| c.number)
            .collect();
        assert_eq!(cited, vec![1, 6]);
    }
}
