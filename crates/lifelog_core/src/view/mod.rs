//! Derived read-only views over the log collection.
//!
//! # Responsibility
//! - Compute timeline, dashboard and calendar projections on demand.
//!
//! # Invariants
//! - Every function is pure over `(&[LogRecord], parameters)`.
//! - Results borrow from the input collection; nothing is cached.
//! - Ties on `created_at` keep collection order.

pub mod calendar;
pub mod dashboard;
pub mod timeline;

use crate::model::log_record::LogRecord;
use std::cmp::Reverse;

/// Sorts newest-created first; stable for equal timestamps.
pub(crate) fn sort_newest_created_first(records: &mut [&LogRecord]) {
    records.sort_by_key(|record| Reverse(record.created_at));
}
