//! Core domain logic for the Family Group Record editor.
//! This crate is the single source of truth for business invariants.

pub mod date;
pub mod db;
pub mod extract;
pub mod logging;
pub mod model;
pub mod numbering;
pub mod render;
pub mod repo;
pub mod store;

pub use date::{DateFormatError, GenDate};
pub use extract::{ExtractionError, ImportError, ImportService, TextExtractor};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::event::{chronological, Event, EventType};
pub use model::record::{Child, Person, Preparer, Record, SourceRef, Spouse};
pub use numbering::{renumber, Citation, Numbered};
pub use render::view::{build_view, DocumentView};
pub use render::{export_file_name, ExportError};
pub use repo::record_repo::{
    PersistenceGateway, RemoteRecordStore, RemoteStoreError, RepoError, RepoResult,
    SaveDestination, SqliteRecordStore,
};
pub use store::autosave::{AutoSaver, AUTO_SAVE_QUIET_MS};
pub use store::editor::EventEditor;
pub use store::form_store::{
    AlwaysConfirm, ConfirmPrompt, EventDraft, EventOwner, FormField, FormStore, StoreChange,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
