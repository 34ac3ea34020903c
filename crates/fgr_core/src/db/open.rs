//! Connection bootstrap utilities for SQLite.
//!
//! Returned connections have `foreign_keys=ON`, a busy timeout, and all
//! migrations applied.

use super::migrations::apply_migrations;
use super::DbResult;
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::Duration;

/// Opens a SQLite database file and applies all pending migrations.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    let mut conn = Connection::open(path)?;
    match bootstrap_connection(&mut conn) {
        Ok(()) => {
            info!("event=db_open module=db status=ok mode=file");
            Ok(conn)
        }
        Err(err) => {
            error!("event=db_open module=db status=error mode=file error={err}");
            Err(err)
        }
    }
}

/// Opens an in-memory SQLite database and applies all pending migrations.
pub fn open_db_in_memory() -> DbResult<Connection> {
    let mut conn = Connection::open_in_memory()?;
    match bootstrap_connection(&mut conn) {
        Ok(()) => {
            info!("event=db_open module=db status=ok mode=memory");
            Ok(conn)
        }
        Err(err) => {
            error!("event=db_open module=db status=error mode=memory error={err}");
            Err(err)
        }
    }
}

fn bootstrap_connection(conn: &mut Connection) -> DbResult<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_secs(5))?;
    apply_migrations(conn)?;
    Ok(())
}
