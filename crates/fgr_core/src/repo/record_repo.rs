//! Record persistence: remote store contract, local SQLite fallback, and
//! the gateway that picks between them.
//!
//! # Responsibility
//! - Keep SQL and JSON payload details inside the persistence boundary.
//! - Implement the fallback order: remote first when a session exists,
//!   local ("guest mode") otherwise or on any remote failure.
//!
//! # Invariants
//! - Local saves upsert by `record_id`; loading picks the most recently
//!   created record when several are stored.
//! - A failing local fallback is reported to the caller, never retried
//!   here.
//! - Required-field validation happens in the save command flow, not here:
//!   debounced auto-save persists work-in-progress records as-is.

use crate::db::DbError;
use crate::model::record::Record;
use log::{info, warn};
use rusqlite::{params, Connection};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

pub type RepoResult<T> = Result<T, RepoError>;

/// Persistence errors for record storage.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// A stored payload or a record refused to (de)serialize.
    InvalidPayload(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidPayload(message) => write!(f, "invalid record payload: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidPayload(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Failure envelope reported by a remote store adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteStoreError {
    pub code: String,
    pub message: String,
}

impl RemoteStoreError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

impl Display for RemoteStoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "remote store error [{}]: {}", self.code, self.message)
    }
}

impl Error for RemoteStoreError {}

/// Contract for the hosted record store (external collaborator).
///
/// `session` identifies the authenticated user, if any; without one, every
/// operation falls back to the local store.
pub trait RemoteRecordStore {
    fn session(&self) -> Option<String>;
    fn save(&self, session: &str, record: &Record) -> Result<(), RemoteStoreError>;
    fn load(&self, session: &str) -> Result<Option<Record>, RemoteStoreError>;
}

/// Guest-mode record store over a migrated SQLite connection.
pub struct SqliteRecordStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteRecordStore<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Inserts or replaces the record under its stable id.
    pub fn save_record(&self, record: &Record) -> RepoResult<()> {
        let payload = serde_json::to_string(record)
            .map_err(|err| RepoError::InvalidPayload(err.to_string()))?;
        self.conn.execute(
            "INSERT INTO records (record_id, created, payload)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(record_id) DO UPDATE SET
                created = excluded.created,
                payload = excluded.payload;",
            params![record.record_id, record.created, payload],
        )?;
        Ok(())
    }

    pub fn load_record(&self, record_id: &str) -> RepoResult<Option<Record>> {
        let mut stmt = self
            .conn
            .prepare("SELECT payload FROM records WHERE record_id = ?1;")?;
        let mut rows = stmt.query([record_id])?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_payload(row.get::<_, String>(0)?)?)),
            None => Ok(None),
        }
    }

    /// Returns the most recently created record, if any are stored.
    pub fn load_latest(&self) -> RepoResult<Option<Record>> {
        let mut stmt = self.conn.prepare(
            "SELECT payload FROM records
             ORDER BY created DESC, record_id ASC
             LIMIT 1;",
        )?;
        let mut rows = stmt.query([])?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_payload(row.get::<_, String>(0)?)?)),
            None => Ok(None),
        }
    }
}

fn parse_payload(payload: String) -> RepoResult<Record> {
    serde_json::from_str(&payload).map_err(|err| RepoError::InvalidPayload(err.to_string()))
}

/// Where a save actually landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveDestination {
    Remote,
    LocalFallback,
}

/// Save/load front door combining the optional remote store with the local
/// fallback. Constructed explicitly and passed to whatever needs it.
pub struct PersistenceGateway<'conn> {
    remote: Option<Arc<dyn RemoteRecordStore>>,
    local: SqliteRecordStore<'conn>,
}

impl<'conn> PersistenceGateway<'conn> {
    /// Gateway with no remote adapter: every operation is guest-mode.
    pub fn local_only(local: SqliteRecordStore<'conn>) -> Self {
        Self {
            remote: None,
            local,
        }
    }

    pub fn with_remote(local: SqliteRecordStore<'conn>, remote: Arc<dyn RemoteRecordStore>) -> Self {
        Self {
            remote: Some(remote),
            local,
        }
    }

    /// Saves remote-first, falling back to the local store on any remote
    /// failure or when no session is present. A local failure is returned.
    pub fn save(&self, record: &Record) -> RepoResult<SaveDestination> {
        if let Some(remote) = &self.remote {
            if let Some(session) = remote.session() {
                match remote.save(&session, record) {
                    Ok(()) => {
                        info!(
                            "event=record_save module=repo status=ok destination=remote record_id={}",
                            record.record_id
                        );
                        return Ok(SaveDestination::Remote);
                    }
                    Err(err) => {
                        warn!(
                            "event=record_save module=repo status=fallback error={err} record_id={}",
                            record.record_id
                        );
                    }
                }
            }
        }

        self.local.save_record(record)?;
        info!(
            "event=record_save module=repo status=ok destination=local record_id={}",
            record.record_id
        );
        Ok(SaveDestination::LocalFallback)
    }

    /// Loads remote-first with the same fallback order as `save`. Guest
    /// loads return the most recently created local record.
    pub fn load(&self) -> RepoResult<Option<Record>> {
        if let Some(remote) = &self.remote {
            if let Some(session) = remote.session() {
                match remote.load(&session) {
                    Ok(found) => {
                        info!(
                            "event=record_load module=repo status=ok source=remote found={}",
                            found.is_some()
                        );
                        return Ok(found);
                    }
                    Err(err) => {
                        warn!("event=record_load module=repo status=fallback error={err}");
                    }
                }
            }
        }

        let found = self.local.load_latest()?;
        info!(
            "event=record_load module=repo status=ok source=local found={}",
            found.is_some()
        );
        Ok(found)
    }
}
