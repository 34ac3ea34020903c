//! Observable live state for the record form.
//!
//! # Responsibility
//! - Hold the record being edited and rebuild full snapshots on demand.
//! - Notify observers exactly once per logical mutation.
//! - Gate auto-save behind the populated flag.
//!
//! # Invariants
//! - `record_id` survives every edit and clear; only `start_fresh` or
//!   `populate` may change it.
//! - Declined confirmations leave state unchanged and emit nothing.
//! - Observers never receive duplicate notifications for one mutation.

use crate::date::display_date;
use crate::model::event::{Event, EventType};
use crate::model::ident;
use crate::model::record::{Child, Person, Preparer, Record, SourceRef, Spouse};

/// Simple text fields of the form, addressed by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    RecordDate,
    FatherName,
    FatherFather,
    FatherFatherSource,
    FatherMother,
    FatherMotherSource,
    MotherName,
    MotherFather,
    MotherFatherSource,
    MotherMother,
    MotherMotherSource,
    PreparerName,
    PreparerAddress,
    PreparerEmail,
    Comments,
}

/// Which person's event list a mutation targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventOwner {
    Father,
    Mother,
    Child(String),
}

/// Modal form payload for adding or editing one event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventDraft {
    pub kind: EventType,
    pub date: String,
    pub description: String,
    pub place: String,
    pub sources: String,
}

/// One logical store mutation, as observers see it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreChange {
    /// A record replaced the form wholesale (load or fresh start).
    Populated,
    Cleared,
    FieldEdited(FormField),
    ChildAdded { child_id: String },
    ChildEdited { child_id: String },
    ChildDeleted { child_id: String },
    SpouseAdded { child_id: String, spouse_id: String },
    SpouseEdited { child_id: String, spouse_id: String },
    SpouseDeleted { child_id: String, spouse_id: String },
    EventAdded { owner: EventOwner, event_id: String },
    EventEdited { owner: EventOwner, event_id: String },
    EventDeleted { owner: EventOwner, event_id: String },
}

impl StoreChange {
    /// True for mutations that should arm the auto-save debounce. Populating
    /// the form is not a user edit; saving right after load would be a no-op
    /// write of what storage already holds.
    pub fn is_user_edit(&self) -> bool {
        !matches!(self, Self::Populated)
    }
}

/// Interactive confirmation hook for destructive operations.
pub trait ConfirmPrompt {
    fn confirm(&mut self, message: &str) -> bool;
}

/// Accepts everything; for flows with no interactive surface.
pub struct AlwaysConfirm;

impl ConfirmPrompt for AlwaysConfirm {
    fn confirm(&mut self, _message: &str) -> bool {
        true
    }
}

type Observer = Box<dyn FnMut(&StoreChange)>;

/// The live form state. Explicitly constructed and passed by reference to
/// whatever needs it; there is no global instance.
pub struct FormStore {
    record_id: String,
    record_date: String,
    created: String,
    father: Person,
    mother: Person,
    children: Vec<Child>,
    preparer: Preparer,
    comments: String,
    populated: bool,
    observers: Vec<Observer>,
}

impl FormStore {
    /// Creates an unpopulated store. Auto-save stays off until the caller
    /// either populates it from storage or starts fresh.
    pub fn new() -> Self {
        Self {
            record_id: ident::record_id(),
            record_date: String::new(),
            created: String::new(),
            father: Person::default(),
            mother: Person::default(),
            children: Vec::new(),
            preparer: Preparer::default(),
            comments: String::new(),
            populated: false,
            observers: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, observer: impl FnMut(&StoreChange) + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn is_populated(&self) -> bool {
        self.populated
    }

    pub fn record_id(&self) -> &str {
        &self.record_id
    }

    /// Starts a brand-new record: fresh id, today's record date, now as the
    /// creation timestamp. Sets the populated flag.
    pub fn start_fresh(&mut self) {
        *self = Self {
            record_id: ident::record_id(),
            record_date: display_date(chrono::Local::now().date_naive()),
            created: chrono::Utc::now().to_rfc3339(),
            populated: true,
            observers: std::mem::take(&mut self.observers),
            ..Self::new()
        };
        self.notify(StoreChange::Populated);
    }

    /// Replaces the whole form with a loaded record. The previous in-memory
    /// state is discarded, never merged.
    pub fn populate(&mut self, record: Record) {
        self.record_id = record.record_id;
        self.record_date = record.record_date;
        self.created = record.created;
        self.father = record.father;
        self.mother = record.mother;
        self.children = record.children;
        self.preparer = record.preparer;
        self.comments = record.comments;
        self.populated = true;
        self.notify(StoreChange::Populated);
    }

    /// Empties every field except the record id, after confirmation.
    /// Returns false (and changes nothing) when the prompt declines.
    pub fn clear(&mut self, prompt: &mut dyn ConfirmPrompt) -> bool {
        if !prompt.confirm("Clear all form data? This cannot be undone.") {
            return false;
        }
        self.record_date = display_date(chrono::Local::now().date_naive());
        self.father = Person::default();
        self.mother = Person::default();
        self.children = Vec::new();
        self.preparer = Preparer::default();
        self.comments = String::new();
        self.notify(StoreChange::Cleared);
        true
    }

    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::RecordDate => self.record_date = value,
            FormField::FatherName => self.father.name = value,
            FormField::FatherFather => self.father.father = value,
            FormField::FatherFatherSource => self.father.father_source.content = value,
            FormField::FatherMother => self.father.mother = value,
            FormField::FatherMotherSource => self.father.mother_source.content = value,
            FormField::MotherName => self.mother.name = value,
            FormField::MotherFather => self.mother.father = value,
            FormField::MotherFatherSource => self.mother.father_source.content = value,
            FormField::MotherMother => self.mother.mother = value,
            FormField::MotherMotherSource => self.mother.mother_source.content = value,
            FormField::PreparerName => self.preparer.name = value,
            FormField::PreparerAddress => self.preparer.address = value,
            FormField::PreparerEmail => self.preparer.email = value,
            FormField::Comments => self.comments = value,
        }
        self.notify(StoreChange::FieldEdited(field));
    }

    pub fn add_child(&mut self) -> String {
        let child = Child::new();
        let child_id = child.id.clone();
        self.children.push(child);
        self.notify(StoreChange::ChildAdded {
            child_id: child_id.clone(),
        });
        child_id
    }

    pub fn set_child_name(&mut self, child_id: &str, name: impl Into<String>) -> bool {
        let Some(child) = self.children.iter_mut().find(|c| c.id == child_id) else {
            return false;
        };
        child.name = name.into();
        let child_id = child_id.to_string();
        self.notify(StoreChange::ChildEdited { child_id });
        true
    }

    pub fn delete_child(&mut self, child_id: &str, prompt: &mut dyn ConfirmPrompt) -> bool {
        let Some(index) = self.children.iter().position(|c| c.id == child_id) else {
            return false;
        };
        if !prompt.confirm("Delete this child and all their information?") {
            return false;
        }
        self.children.remove(index);
        self.notify(StoreChange::ChildDeleted {
            child_id: child_id.to_string(),
        });
        true
    }

    pub fn add_spouse(&mut self, child_id: &str, name: impl Into<String>) -> Option<String> {
        let child = self.children.iter_mut().find(|c| c.id == child_id)?;
        let spouse = Spouse::new(name);
        let spouse_id = spouse.id.clone();
        child.spouses.push(spouse);
        self.notify(StoreChange::SpouseAdded {
            child_id: child_id.to_string(),
            spouse_id: spouse_id.clone(),
        });
        Some(spouse_id)
    }

    pub fn edit_spouse(
        &mut self,
        child_id: &str,
        spouse_id: &str,
        name: impl Into<String>,
        source_content: impl Into<String>,
    ) -> bool {
        let Some(child) = self.children.iter_mut().find(|c| c.id == child_id) else {
            return false;
        };
        let Some(spouse) = child.spouses.iter_mut().find(|s| s.id == spouse_id) else {
            return false;
        };
        spouse.name = name.into();
        spouse.source = SourceRef::with_content(source_content);
        self.notify(StoreChange::SpouseEdited {
            child_id: child_id.to_string(),
            spouse_id: spouse_id.to_string(),
        });
        true
    }

    pub fn delete_spouse(
        &mut self,
        child_id: &str,
        spouse_id: &str,
        prompt: &mut dyn ConfirmPrompt,
    ) -> bool {
        let Some(child) = self.children.iter_mut().find(|c| c.id == child_id) else {
            return false;
        };
        let Some(index) = child.spouses.iter().position(|s| s.id == spouse_id) else {
            return false;
        };
        if !prompt.confirm("Delete this spouse?") {
            return false;
        }
        child.spouses.remove(index);
        self.notify(StoreChange::SpouseDeleted {
            child_id: child_id.to_string(),
            spouse_id: spouse_id.to_string(),
        });
        true
    }

    pub fn events(&self, owner: &EventOwner) -> Option<&[Event]> {
        match owner {
            EventOwner::Father => Some(&self.father.events),
            EventOwner::Mother => Some(&self.mother.events),
            EventOwner::Child(child_id) => self
                .children
                .iter()
                .find(|c| &c.id == child_id)
                .map(|c| c.events.as_slice()),
        }
    }

    pub fn event(&self, owner: &EventOwner, event_id: &str) -> Option<&Event> {
        self.events(owner)?.iter().find(|e| e.id == event_id)
    }

    pub fn add_event(&mut self, owner: &EventOwner, draft: EventDraft) -> Option<String> {
        let event = Event {
            id: ident::event_id(),
            kind: draft.kind,
            date: draft.date,
            description: draft.description,
            place: draft.place,
            sources: draft.sources,
            source_number: 0,
        };
        let event_id = event.id.clone();
        self.events_mut(owner)?.push(event);
        self.notify(StoreChange::EventAdded {
            owner: owner.clone(),
            event_id: event_id.clone(),
        });
        Some(event_id)
    }

    /// Replaces the editable fields of one event; id and position stay put,
    /// so citation numbering input order is unaffected by edits.
    pub fn edit_event(&mut self, owner: &EventOwner, event_id: &str, draft: EventDraft) -> bool {
        let Some(events) = self.events_mut(owner) else {
            return false;
        };
        let Some(event) = events.iter_mut().find(|e| e.id == event_id) else {
            return false;
        };
        event.kind = draft.kind;
        event.date = draft.date;
        event.description = draft.description;
        event.place = draft.place;
        event.sources = draft.sources;
        self.notify(StoreChange::EventEdited {
            owner: owner.clone(),
            event_id: event_id.to_string(),
        });
        true
    }

    pub fn delete_event(
        &mut self,
        owner: &EventOwner,
        event_id: &str,
        prompt: &mut dyn ConfirmPrompt,
    ) -> bool {
        let Some(index) = self
            .events(owner)
            .and_then(|events| events.iter().position(|e| e.id == event_id))
        else {
            return false;
        };
        if !prompt.confirm("Delete this event?") {
            return false;
        }
        if let Some(events) = self.events_mut(owner) {
            events.remove(index);
        }
        self.notify(StoreChange::EventDeleted {
            owner: owner.clone(),
            event_id: event_id.to_string(),
        });
        true
    }

    /// Rebuilds the full record from live state, including the denormalized
    /// parent-name copies. Source numbers are left untouched; numbering is
    /// recomputed by the export pipeline, never here.
    pub fn snapshot(&self) -> Record {
        Record {
            record_id: self.record_id.clone(),
            record_date: self.record_date.clone(),
            created: self.created.clone(),
            father_name: self.father.name.clone(),
            mother_name: self.mother.name.clone(),
            father: self.father.clone(),
            mother: self.mother.clone(),
            children: self.children.clone(),
            preparer: self.preparer.clone(),
            comments: self.comments.clone(),
        }
    }

    fn events_mut(&mut self, owner: &EventOwner) -> Option<&mut Vec<Event>> {
        match owner {
            EventOwner::Father => Some(&mut self.father.events),
            EventOwner::Mother => Some(&mut self.mother.events),
            EventOwner::Child(child_id) => self
                .children
                .iter_mut()
                .find(|c| &c.id == child_id)
                .map(|c| &mut c.events),
        }
    }

    // Observers are invoked after the mutation is fully applied. They get a
    // shared reference only, so a derived view cannot re-enter the store and
    // trigger a second notification for the same change.
    fn notify(&mut self, change: StoreChange) {
        for observer in &mut self.observers {
            observer(&change);
        }
    }
}

impl Default for FormStore {
    fn default() -> Self {
        Self::new()
    }
}
