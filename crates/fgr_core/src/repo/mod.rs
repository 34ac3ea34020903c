//! Persistence layer abstractions and implementations.
//!
//! # Responsibility
//! - Define the remote store contract and the local SQLite fallback.
//! - Isolate storage details from the form store and export pipeline.

pub mod record_repo;
