//! Domain model for life-log records and user preferences.
//!
//! # Responsibility
//! - Define canonical data structures used by stores and views.
//! - Keep wire naming compatible with previously persisted payloads.
//!
//! # Invariants
//! - Every record is identified by a stable `LogId`.
//! - Deletion is a hard delete; there are no tombstones.

pub mod log_record;
pub mod preferences;
