//! Calendar projection: one selected day plus per-date markers.

use super::sort_newest_created_first;
use crate::model::log_record::LogRecord;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Annotation for one calendar cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DayMarker {
    /// At least one record exists on this date.
    pub marked: bool,
    /// This date is the current selection.
    pub selected: bool,
}

/// Records dated `date`, newest-created first.
pub fn logs_on_day(logs: &[LogRecord], date: NaiveDate) -> Vec<&LogRecord> {
    let mut day_logs = logs
        .iter()
        .filter(|record| record.date == date)
        .collect::<Vec<_>>();
    sort_newest_created_first(&mut day_logs);
    day_logs
}

/// Markers for every date with records, plus the selected date.
///
/// The selected date is present even when it has no records.
pub fn calendar_markers(logs: &[LogRecord], selected: NaiveDate) -> BTreeMap<NaiveDate, DayMarker> {
    let mut markers = BTreeMap::new();
    for record in logs {
        markers
            .entry(record.date)
            .or_insert_with(DayMarker::default)
            .marked = true;
    }
    markers.entry(selected).or_insert_with(DayMarker::default).selected = true;
    markers
}
