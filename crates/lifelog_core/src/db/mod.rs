//! SQLite backing file for persisted app state.
//!
//! # Responsibility
//! - Open the state database and bring `kv_entries` up to the current schema.
//! - Report whether a connection is ready for key-value reads and writes.
//!
//! # Invariants
//! - Schema version lives in `PRAGMA user_version`.
//! - Files written by a newer build are refused, never downgraded.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Failure opening or checking the state database.
#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    /// File was migrated by a newer build.
    SchemaTooNew { found: u32, supported: u32 },
    /// Connection has not been migrated to the key-value schema yet.
    SchemaNotReady { found: u32, required: u32 },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "sqlite error: {err}"),
            Self::SchemaTooNew { found, supported } => write!(
                f,
                "state database schema {found} was written by a newer build (supported: {supported})"
            ),
            Self::SchemaNotReady { found, required } => write!(
                f,
                "state database schema {found} is not migrated (required: {required})"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::SchemaTooNew { .. } | Self::SchemaNotReady { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
