//! Home dashboard projections: weekly activity and recent topics.

use super::sort_newest_created_first;
use crate::model::log_record::{LogKind, LogRecord};
use chrono::{Datelike, Days, NaiveDate, Weekday};

/// Number of days covered by the activity histogram.
pub const HISTOGRAM_DAYS: usize = 7;
/// Maximum number of records in the recent-topics strip.
pub const RECENT_TOPICS_LIMIT: usize = 5;
/// Lowest bar height, in percent, so empty days stay visible.
pub const MIN_BAR_PERCENT: u32 = 10;

/// Record count of one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCount {
    pub date: NaiveDate,
    pub count: usize,
}

impl DayCount {
    /// One-letter weekday label (`M`, `T`, `W`, ...).
    pub fn weekday_initial(&self) -> char {
        match self.date.weekday() {
            Weekday::Mon => 'M',
            Weekday::Tue | Weekday::Thu => 'T',
            Weekday::Wed => 'W',
            Weekday::Fri => 'F',
            Weekday::Sat | Weekday::Sun => 'S',
        }
    }
}

/// Seven-day activity histogram, oldest day first, ending today.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeeklyHistogram {
    pub days: Vec<DayCount>,
}

impl WeeklyHistogram {
    pub fn counts(&self) -> Vec<usize> {
        self.days.iter().map(|day| day.count).collect()
    }

    /// Largest count, never below 1.
    pub fn max_count(&self) -> usize {
        self.days
            .iter()
            .map(|day| day.count)
            .max()
            .unwrap_or(0)
            .max(1)
    }

    /// Bar height in percent of the tallest day, floored at [`MIN_BAR_PERCENT`].
    ///
    /// Rounds half up to the nearest whole percent (2 of 3 is 67).
    pub fn bar_percent(&self, index: usize) -> Option<u32> {
        let day = self.days.get(index)?;
        let max = self.max_count();
        let percent = u32::try_from((day.count * 100 + max / 2) / max).unwrap_or(u32::MAX);
        Some(percent.max(MIN_BAR_PERCENT))
    }
}

/// Counts records per day for `today` and the six days before it.
pub fn weekly_histogram(logs: &[LogRecord], today: NaiveDate) -> WeeklyHistogram {
    let days = (0..HISTOGRAM_DAYS as u64)
        .rev()
        .filter_map(|offset| today.checked_sub_days(Days::new(offset)))
        .map(|date| DayCount {
            date,
            count: logs.iter().filter(|record| record.date == date).count(),
        })
        .collect();
    WeeklyHistogram { days }
}

/// Latest photo and schedule records, newest-created first.
pub fn recent_topics(logs: &[LogRecord]) -> Vec<&LogRecord> {
    let mut topics = logs
        .iter()
        .filter(|record| matches!(record.kind, LogKind::Photo | LogKind::Schedule))
        .collect::<Vec<_>>();
    sort_newest_created_first(&mut topics);
    topics.truncate(RECENT_TOPICS_LIMIT);
    topics
}
