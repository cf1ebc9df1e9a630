//! Timeline projection: kind/text filtering and day grouping.

use super::sort_newest_created_first;
use crate::model::log_record::{LogKind, LogRecord};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Kind selector used by the timeline filter chips.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum KindFilter {
    #[default]
    All,
    Only(LogKind),
}

impl KindFilter {
    /// Parses `all` or a kind label.
    pub fn parse(value: &str) -> Option<Self> {
        if value.trim().eq_ignore_ascii_case("all") {
            return Some(Self::All);
        }
        LogKind::parse(value).map(Self::Only)
    }

    pub fn matches(self, kind: LogKind) -> bool {
        match self {
            Self::All => true,
            Self::Only(expected) => expected == kind,
        }
    }
}

/// Timeline filter: kind selector plus case-insensitive substring query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogFilter {
    pub kind: KindFilter,
    /// Matched against title and description; empty matches everything.
    pub query: String,
}

impl LogFilter {
    pub fn new(kind: KindFilter, query: impl Into<String>) -> Self {
        Self {
            kind,
            query: query.into(),
        }
    }
}

/// Records of one calendar day, newest-created first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayGroup<'a> {
    pub date: NaiveDate,
    pub logs: Vec<&'a LogRecord>,
}

impl DayGroup<'_> {
    /// Whether this section is headed as "today".
    pub fn is_today(&self, today: NaiveDate) -> bool {
        self.date == today
    }
}

/// Returns records matching `filter`, in collection order.
pub fn filter_logs<'a>(logs: &'a [LogRecord], filter: &LogFilter) -> Vec<&'a LogRecord> {
    let needle = filter.query.to_lowercase();
    logs.iter()
        .filter(|record| filter.kind.matches(record.kind) && record.matches_lowercase(&needle))
        .collect()
}

/// Groups filtered records by `date`, newest day first.
pub fn group_by_day<'a>(logs: &'a [LogRecord], filter: &LogFilter) -> Vec<DayGroup<'a>> {
    let mut buckets: BTreeMap<NaiveDate, Vec<&'a LogRecord>> = BTreeMap::new();
    for record in filter_logs(logs, filter) {
        buckets.entry(record.date).or_default().push(record);
    }

    buckets
        .into_iter()
        .rev()
        .map(|(date, mut logs)| {
            sort_newest_created_first(&mut logs);
            DayGroup { date, logs }
        })
        .collect()
}
