//! Log store: the single source of truth for the record collection.
//!
//! # Responsibility
//! - Hold the record collection in insertion order.
//! - Validate records at the insertion boundary.
//! - Write the full collection through to storage after every mutation.
//! - Notify subscribers after every effective mutation.
//!
//! # Invariants
//! - Record ids are unique across the collection.
//! - In-memory state is authoritative; a failed write marks the store unsaved
//!   instead of rolling back.
//! - Photo records never change status.
//! - A stored payload that loses data on load is copied to
//!   [`LOG_BACKUP_STORAGE_KEY`] before any write can replace it.

use crate::model::log_record::{LogKind, LogRecord, LogStatus, LogValidationError};
use crate::storage::{KeyValueStore, StorageResult};
use crate::store::persist::{read_snapshot, write_snapshot, Snapshot};
use log::{debug, info, warn};
use serde::Serialize;
use serde_json::Value;
use std::collections::{BTreeMap, HashSet};

/// Storage key of the log collection.
pub const LOG_STORAGE_KEY: &str = "lifelog-storage";

/// Raw copy of the last stored payload that could not be loaded in full.
pub const LOG_BACKUP_STORAGE_KEY: &str = "lifelog-storage.discarded";

/// Handle returned by [`LogStore::subscribe`].
pub type SubscriptionId = u64;

type Listener = Box<dyn Fn(&[LogRecord])>;

#[derive(Serialize)]
struct LogState<'a> {
    logs: &'a [LogRecord],
}

/// Persisted, observable collection of log records.
pub struct LogStore<S: KeyValueStore> {
    storage: S,
    logs: Vec<LogRecord>,
    listeners: BTreeMap<SubscriptionId, Listener>,
    next_subscription: SubscriptionId,
    unsaved: bool,
}

impl<S: KeyValueStore> LogStore<S> {
    /// Rehydrates the collection from storage.
    ///
    /// Missing, unreadable or newer-version data yields an empty collection.
    /// Individually invalid records are dropped.
    /// When anything is discarded, the raw payload is first copied to
    /// [`LOG_BACKUP_STORAGE_KEY`].
    pub fn open(storage: S) -> Self {
        let (logs, discarded) = load_logs(&storage);
        if discarded {
            back_up_raw_state(&storage);
        }
        info!(
            "event=store_open module=log_store status=ok count={}",
            logs.len()
        );
        Self {
            storage,
            logs,
            listeners: BTreeMap::new(),
            next_subscription: 1,
            unsaved: false,
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Current snapshot in insertion order.
    pub fn logs(&self) -> &[LogRecord] {
        &self.logs
    }

    pub fn len(&self) -> usize {
        self.logs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.logs.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&LogRecord> {
        self.logs.iter().find(|record| record.id == id)
    }

    /// Appends a record after validating it against the collection.
    ///
    /// # Errors
    /// - Any record-level [`LogValidationError`].
    /// - `DuplicateId` when a record with the same id exists.
    ///
    /// On error the collection is left untouched and nothing is written.
    pub fn add_log(&mut self, record: LogRecord) -> Result<(), LogValidationError> {
        record.validate()?;
        if self.get(&record.id).is_some() {
            return Err(LogValidationError::DuplicateId(record.id));
        }

        let kind = record.kind;
        self.logs.push(record);
        debug!(
            "event=log_add module=log_store status=ok kind={} count={}",
            kind,
            self.logs.len()
        );
        self.commit();
        Ok(())
    }

    /// Removes the record with `id`; returns whether one was removed.
    ///
    /// Unknown ids are a no-op: nothing is written and nobody is notified.
    pub fn remove_log(&mut self, id: &str) -> bool {
        let Some(index) = self.logs.iter().position(|record| record.id == id) else {
            return false;
        };

        self.logs.remove(index);
        debug!(
            "event=log_remove module=log_store status=ok count={}",
            self.logs.len()
        );
        self.commit();
        true
    }

    /// Toggles completion of a task/schedule record.
    ///
    /// Returns the new status, or `None` when `id` is unknown or the record is
    /// a photo.
    pub fn toggle_status(&mut self, id: &str) -> Option<LogStatus> {
        let record = self.logs.iter_mut().find(|record| record.id == id)?;
        if record.kind == LogKind::Photo {
            return None;
        }

        let next = LogStatus::toggled(record.status);
        record.status = Some(next);
        debug!("event=log_toggle module=log_store status=ok next={next}");
        self.commit();
        Some(next)
    }

    /// Registers a listener called with the full snapshot after each change.
    pub fn subscribe(&mut self, listener: impl Fn(&[LogRecord]) + 'static) -> SubscriptionId {
        let id = self.next_subscription;
        self.next_subscription += 1;
        self.listeners.insert(id, Box::new(listener));
        id
    }

    /// Removes a listener; returns whether it was registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.remove(&id).is_some()
    }

    /// Whether the latest snapshot failed to reach storage.
    pub fn has_unsaved_changes(&self) -> bool {
        self.unsaved
    }

    /// Writes the current snapshot and reports the storage outcome.
    pub fn flush(&mut self) -> StorageResult<()> {
        let result = self.persist();
        self.unsaved = result.is_err();
        result
    }

    /// Flushes and releases the store.
    pub fn close(mut self) -> StorageResult<()> {
        self.flush()
    }

    fn commit(&mut self) {
        match self.persist() {
            Ok(()) => self.unsaved = false,
            Err(err) => {
                self.unsaved = true;
                warn!(
                    "event=state_save module=log_store status=error key={LOG_STORAGE_KEY} error={err}"
                );
            }
        }

        for listener in self.listeners.values() {
            listener(&self.logs);
        }
    }

    fn persist(&self) -> StorageResult<()> {
        write_snapshot(
            &self.storage,
            LOG_STORAGE_KEY,
            &LogState { logs: &self.logs },
        )
    }
}

/// Returns the loadable records and whether stored data was discarded.
fn load_logs<S: KeyValueStore>(storage: &S) -> (Vec<LogRecord>, bool) {
    let (version, state) = match read_snapshot(storage, LOG_STORAGE_KEY) {
        Snapshot::Found { version, state } => (version, state),
        Snapshot::Missing => return (Vec::new(), false),
        Snapshot::Unreadable(_) => return (Vec::new(), true),
    };

    let items = match state {
        Value::Array(items) => items,
        Value::Object(mut object) => match object.remove("logs") {
            Some(Value::Array(items)) => items,
            None | Some(Value::Null) => Vec::new(),
            Some(_) => {
                warn!("event=state_load module=log_store status=error version={version} reason=logs_not_array");
                return (Vec::new(), true);
            }
        },
        _ => {
            warn!("event=state_load module=log_store status=error version={version} reason=unexpected_shape");
            return (Vec::new(), true);
        }
    };

    let total = items.len();
    let mut seen = HashSet::with_capacity(total);
    let mut logs = Vec::with_capacity(total);
    for (index, item) in items.into_iter().enumerate() {
        let record = match serde_json::from_value::<LogRecord>(item) {
            Ok(record) => upgrade_record(record),
            Err(err) => {
                warn!("event=record_load module=log_store status=skipped index={index} reason=decode error={err}");
                continue;
            }
        };
        if let Err(err) = record.validate() {
            warn!("event=record_load module=log_store status=skipped index={index} reason=invalid error={err}");
            continue;
        }
        if !seen.insert(record.id.clone()) {
            warn!("event=record_load module=log_store status=skipped index={index} reason=duplicate_id");
            continue;
        }
        logs.push(record);
    }

    if logs.len() != total {
        warn!(
            "event=state_load module=log_store status=partial version={version} loaded={} dropped={}",
            logs.len(),
            total - logs.len()
        );
    }
    let discarded = logs.len() != total;
    (logs, discarded)
}

fn back_up_raw_state<S: KeyValueStore>(storage: &S) {
    let raw = match storage.get(LOG_STORAGE_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return,
        Err(err) => {
            warn!("event=state_backup module=log_store status=error error={err}");
            return;
        }
    };
    match storage.set(LOG_BACKUP_STORAGE_KEY, &raw) {
        Ok(()) => warn!(
            "event=state_backup module=log_store status=ok key={LOG_BACKUP_STORAGE_KEY} bytes={}",
            raw.len()
        ),
        Err(err) => warn!(
            "event=state_backup module=log_store status=error key={LOG_BACKUP_STORAGE_KEY} error={err}"
        ),
    }
}

/// Normalizes fields older payloads stored loosely.
fn upgrade_record(mut record: LogRecord) -> LogRecord {
    if record
        .description
        .as_deref()
        .is_some_and(|description| description.trim().is_empty())
    {
        record.description = None;
    }
    if record.kind == LogKind::Photo {
        record.status = None;
        if record.title.trim().is_empty() {
            record.title = crate::model::log_record::DEFAULT_PHOTO_TITLE.to_string();
        }
    }
    record
}
