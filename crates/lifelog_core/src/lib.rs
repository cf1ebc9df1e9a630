//! Core domain logic for LifeLog.
//! This crate is the single source of truth for record invariants, persisted
//! state and derived views.

pub mod db;
pub mod logging;
pub mod model;
pub mod service;
pub mod storage;
pub mod store;
pub mod view;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::log_record::{
    LogId, LogKind, LogRecord, LogStatus, LogValidationError, NewLogRequest, DEFAULT_PHOTO_TITLE,
};
pub use model::preferences::{ColorScheme, EffectiveLanguage, Language, ThemeMode};
pub use service::log_service::{CalendarDay, Dashboard, LogService};
pub use storage::{KeyValueStore, MemoryKvStore, SqliteKvStore, StorageError, StorageResult};
pub use store::language_store::{LanguageStore, LANGUAGE_STORAGE_KEY};
pub use store::log_store::{LogStore, SubscriptionId, LOG_BACKUP_STORAGE_KEY, LOG_STORAGE_KEY};
pub use store::persist::STATE_VERSION;
pub use store::theme_store::{ThemeStore, THEME_STORAGE_KEY};
pub use view::calendar::{calendar_markers, logs_on_day, DayMarker};
pub use view::dashboard::{recent_topics, weekly_histogram, DayCount, WeeklyHistogram};
pub use view::timeline::{filter_logs, group_by_day, DayGroup, KindFilter, LogFilter};

use chrono::NaiveDate;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Current calendar day in the device's local time zone.
pub fn local_today() -> NaiveDate {
    chrono::Local::now().date_naive()
}
