//! Schema steps for the state database.
//!
//! Each step is a SQL script keyed by the `user_version` it leaves behind.
//! Steps above the file's current version run together in one transaction.

use crate::db::{DbError, DbResult};
use rusqlite::Connection;

/// `(resulting user_version, script)`, ascending.
const STEPS: &[(u32, &str)] = &[(1, include_str!("0001_init.sql"))];

/// Schema version fully supported by this build.
pub fn latest_version() -> u32 {
    STEPS.last().map_or(0, |(version, _)| *version)
}

/// Reads `PRAGMA user_version`.
pub fn schema_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?)
}

/// Version change performed by [`apply_migrations`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MigrationReport {
    pub from: u32,
    pub to: u32,
}

impl MigrationReport {
    /// `true` when the file was already current.
    pub fn is_noop(&self) -> bool {
        self.from == self.to
    }
}

/// Brings `conn` up to [`latest_version`].
///
/// # Errors
/// - `SchemaTooNew` when the file was written by a newer build.
/// - `Sqlite` when a step fails; the file keeps its previous version.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<MigrationReport> {
    let from = schema_version(conn)?;
    let supported = latest_version();
    if from > supported {
        return Err(DbError::SchemaTooNew {
            found: from,
            supported,
        });
    }

    let pending = STEPS
        .iter()
        .filter(|(version, _)| *version > from)
        .collect::<Vec<_>>();
    if pending.is_empty() {
        return Ok(MigrationReport { from, to: from });
    }

    let tx = conn.transaction()?;
    for (version, script) in pending {
        tx.execute_batch(script)?;
        tx.pragma_update(None, "user_version", *version)?;
    }
    tx.commit()?;

    Ok(MigrationReport {
        from,
        to: supported,
    })
}

/// Fails unless `conn` is at exactly the schema this build writes.
pub fn ensure_current(conn: &Connection) -> DbResult<()> {
    let found = schema_version(conn)?;
    let required = latest_version();
    match found.cmp(&required) {
        std::cmp::Ordering::Less => Err(DbError::SchemaNotReady { found, required }),
        std::cmp::Ordering::Greater => Err(DbError::SchemaTooNew {
            found,
            supported: required,
        }),
        std::cmp::Ordering::Equal => Ok(()),
    }
}
