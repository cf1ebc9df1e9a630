//! Durable key-value storage boundary.
//!
//! # Responsibility
//! - Define the get/set/remove contract every store persists through.
//! - Provide SQLite-backed and in-memory implementations.
//!
//! # Invariants
//! - Keys and values are UTF-8 strings; values are opaque to the backend.
//! - `set` replaces the previous value for a key in full.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod memory;
mod sqlite_kv;

pub use memory::MemoryKvStore;
pub use sqlite_kv::SqliteKvStore;

pub type StorageResult<T> = Result<T, StorageError>;

/// Storage-layer failure for reads, writes and payload encoding.
#[derive(Debug)]
pub enum StorageError {
    Db(DbError),
    Serialize(serde_json::Error),
    /// Backend refused the operation (e.g. read-only or detached storage).
    Unavailable(String),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Serialize(err) => write!(f, "failed to encode persisted state: {err}"),
            Self::Unavailable(message) => write!(f, "storage unavailable: {message}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Serialize(err) => Some(err),
            Self::Unavailable(_) => None,
        }
    }
}

impl From<DbError> for StorageError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}

/// Durable string key-value storage used by all persisted stores.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;
    /// Returns whether a value existed for `key`.
    fn remove(&self, key: &str) -> StorageResult<bool>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> StorageResult<bool> {
        (**self).remove(key)
    }
}
