//! Log use-case service.
//!
//! # Responsibility
//! - Run the Add flow (id + timestamp assignment, validation, insertion).
//! - Expose timeline, dashboard and calendar queries per screen.
//!
//! # Invariants
//! - Service APIs never bypass store validation.
//! - Service layer remains storage-agnostic.

use crate::model::log_record::{LogId, LogRecord, LogStatus, LogValidationError, NewLogRequest};
use crate::storage::{KeyValueStore, StorageResult};
use crate::store::log_store::LogStore;
use crate::view::calendar::{calendar_markers, logs_on_day, DayMarker};
use crate::view::dashboard::{recent_topics, weekly_histogram, WeeklyHistogram};
use crate::view::timeline::{group_by_day, DayGroup, LogFilter};
use chrono::{DateTime, NaiveDate, Utc};
use std::collections::BTreeMap;

/// Home screen data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dashboard<'a> {
    pub histogram: WeeklyHistogram,
    pub recent_topics: Vec<&'a LogRecord>,
}

/// Calendar screen data for one selected day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarDay<'a> {
    pub selected: NaiveDate,
    pub logs: Vec<&'a LogRecord>,
    pub markers: BTreeMap<NaiveDate, DayMarker>,
}

/// Use-case wrapper around a [`LogStore`].
pub struct LogService<S: KeyValueStore> {
    store: LogStore<S>,
}

impl<S: KeyValueStore> LogService<S> {
    pub fn new(store: LogStore<S>) -> Self {
        Self { store }
    }

    /// Opens the store over `storage` and wraps it.
    pub fn open(storage: S) -> Self {
        Self::new(LogStore::open(storage))
    }

    pub fn store(&self) -> &LogStore<S> {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut LogStore<S> {
        &mut self.store
    }

    /// Creates a record stamped with the current time.
    pub fn create_log(&mut self, request: NewLogRequest) -> Result<LogId, LogValidationError> {
        self.create_log_at(request, Utc::now())
    }

    /// Creates a record with an explicit creation instant.
    ///
    /// # Contract
    /// - Assigns a fresh UUID id.
    /// - Returns the id of the stored record.
    pub fn create_log_at(
        &mut self,
        request: NewLogRequest,
        created_at: DateTime<Utc>,
    ) -> Result<LogId, LogValidationError> {
        let record = LogRecord::create(request, created_at)?;
        let id = record.id.clone();
        self.store.add_log(record)?;
        Ok(id)
    }

    /// Deletes a record; returns whether it existed.
    pub fn delete_log(&mut self, id: &str) -> bool {
        self.store.remove_log(id)
    }

    pub fn toggle_status(&mut self, id: &str) -> Option<LogStatus> {
        self.store.toggle_status(id)
    }

    pub fn timeline(&self, filter: &LogFilter) -> Vec<DayGroup<'_>> {
        group_by_day(self.store.logs(), filter)
    }

    pub fn dashboard(&self, today: NaiveDate) -> Dashboard<'_> {
        Dashboard {
            histogram: weekly_histogram(self.store.logs(), today),
            recent_topics: recent_topics(self.store.logs()),
        }
    }

    pub fn calendar(&self, selected: NaiveDate) -> CalendarDay<'_> {
        CalendarDay {
            selected,
            logs: logs_on_day(self.store.logs(), selected),
            markers: calendar_markers(self.store.logs(), selected),
        }
    }

    /// Flushes and releases the underlying store.
    pub fn close(self) -> StorageResult<()> {
        self.store.close()
    }
}
