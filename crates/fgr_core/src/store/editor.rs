//! Modal event editing flow.
//!
//! Only one add/edit session may be open at a time; the exclusivity flag
//! lives on this controller object, not in module state. Opening a second
//! session is a silent no-op.

use crate::store::form_store::{EventDraft, EventOwner, FormStore};

#[derive(Debug)]
struct EditorSession {
    owner: EventOwner,
    /// `None` while adding; the target event id while editing.
    event_id: Option<String>,
    draft: EventDraft,
}

/// UI controller for the event add/edit modal.
#[derive(Debug, Default)]
pub struct EventEditor {
    active: Option<EditorSession>,
}

impl EventEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.active.is_some()
    }

    /// Opens an add session with an empty draft. Returns false if another
    /// session is already open.
    pub fn open_add(&mut self, owner: EventOwner) -> bool {
        if self.active.is_some() {
            return false;
        }
        self.active = Some(EditorSession {
            owner,
            event_id: None,
            draft: EventDraft::default(),
        });
        true
    }

    /// Opens an edit session seeded from the stored event. Returns false if
    /// another session is open or the event does not exist.
    pub fn open_edit(&mut self, store: &FormStore, owner: EventOwner, event_id: &str) -> bool {
        if self.active.is_some() {
            return false;
        }
        let Some(event) = store.event(&owner, event_id) else {
            return false;
        };
        self.active = Some(EditorSession {
            owner,
            event_id: Some(event_id.to_string()),
            draft: EventDraft {
                kind: event.kind.clone(),
                date: event.date.clone(),
                description: event.description.clone(),
                place: event.place.clone(),
                sources: event.sources.clone(),
            },
        });
        true
    }

    /// The draft under edit, for the form to bind to.
    pub fn draft_mut(&mut self) -> Option<&mut EventDraft> {
        self.active.as_mut().map(|session| &mut session.draft)
    }

    /// Closes the session without touching the store.
    pub fn cancel(&mut self) {
        self.active = None;
    }

    /// Applies the session to the store (add or edit) and closes it.
    /// Returns the affected event id, or `None` when no session was open.
    pub fn submit(&mut self, store: &mut FormStore) -> Option<String> {
        let session = self.active.take()?;
        match session.event_id {
            Some(event_id) => {
                if store.edit_event(&session.owner, &event_id, session.draft) {
                    Some(event_id)
                } else {
                    None
                }
            }
            None => store.add_event(&session.owner, session.draft),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::EventEditor;
    use crate::model::event::EventType;
    use crate::store::form_store::{EventOwner, FormStore};

    #[test]
    fn second_open_is_a_silent_no_op() {
        let mut editor = EventEditor::new();
        assert!(editor.open_add(EventOwner::Father));
        assert!(!editor.open_add(EventOwner::Mother));
        assert!(editor.is_open());

        editor.cancel();
        assert!(editor.open_add(EventOwner::Mother));
    }

    #[test]
    fn submit_applies_add_then_edit_round_trip() {
        let mut store = FormStore::new();
        let mut editor = EventEditor::new();

        assert!(editor.open_add(EventOwner::Father));
        {
            let draft = editor.draft_mut().expect("open session");
            draft.kind = EventType::Death;
            draft.date = "1900".to_string();
        }
        let event_id = editor.submit(&mut store).expect("event added");
        assert!(!editor.is_open());

        assert!(editor.open_edit(&store, EventOwner::Father, &event_id));
        {
            let draft = editor.draft_mut().expect("open session");
            assert_eq!(draft.kind, EventType::Death);
            draft.place = "Boston".to_string();
        }
        editor.submit(&mut store).expect("event edited");
        let event = store
            .event(&EventOwner::Father, &event_id)
            .expect("event exists");
        assert_eq!(event.place, "Boston");
    }

    #[test]
    fn cancel_leaves_the_store_untouched() {
        let mut store = FormStore::new();
        let mut editor = EventEditor::new();
        editor.open_add(EventOwner::Mother);
        editor.cancel();
        assert!(editor.submit(&mut store).is_none());
        assert_eq!(store.events(&EventOwner::Mother).unwrap().len(), 0);
    }
}
