//! SQLite-backed key-value storage.
//!
//! # Invariants
//! - Construction fails unless the connection was opened through `db::open_db*`.
//! - Each `set` is a single upsert statement.

use super::{KeyValueStore, StorageResult};
use crate::db::migrations::ensure_current;
use rusqlite::{params, Connection, OptionalExtension};

/// Key-value storage over the `kv_entries` table.
pub struct SqliteKvStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteKvStore<'conn> {
    /// Wraps a migrated connection.
    ///
    /// # Errors
    /// - `Db(SchemaNotReady)` when migrations have not been applied.
    /// - `Db(SchemaTooNew)` when the file belongs to a newer build.
    pub fn try_new(conn: &'conn Connection) -> StorageResult<Self> {
        ensure_current(conn)?;
        Ok(Self { conn })
    }

    /// Returns stored keys in ascending order.
    pub fn keys(&self) -> StorageResult<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT key FROM kv_entries ORDER BY key ASC;")?;
        let keys = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(keys)
    }
}

impl KeyValueStore for SqliteKvStore<'_> {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.conn.execute(
            "INSERT INTO kv_entries (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM kv_entries WHERE key = ?1;", [key])?;
        Ok(changed > 0)
    }
}
