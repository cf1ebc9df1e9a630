//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose screen-level functions (add, timeline, dashboard, calendar,
//!   settings) to Dart via FRB.
//! - Map core types to plain string/number envelopes.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Each call runs one open-mutate-close session under a process-wide lock.
//! - Validation failures come back as `ok=false` envelopes, never as panics.
//! - A mutation is reported `ok=true` only once it has reached the database.

use chrono::NaiveDate;
use lifelog_core::db::open_db;
use lifelog_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, local_today,
    ping as ping_inner, KeyValueStore, KindFilter, Language, LanguageStore, LogFilter, LogKind,
    LogRecord, LogService, NewLogRequest, SqliteKvStore, StorageError, ThemeMode, ThemeStore,
};
use log::warn;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};

const DB_FILE_NAME: &str = "lifelog.sqlite3";
const DB_PATH_ENV: &str = "LIFELOG_DB_PATH";
static DB_PATH: OnceLock<PathBuf> = OnceLock::new();
static SESSION_LOCK: Mutex<()> = Mutex::new(());

/// Minimal health-check API for FRB smoke integration.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Flat view of one log record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogItem {
    pub id: String,
    /// `task|schedule|photo`.
    pub kind: String,
    pub title: String,
    pub description: Option<String>,
    /// `YYYY-MM-DD`.
    pub date: String,
    /// RFC 3339 UTC timestamp.
    pub created_at: String,
    /// `todo|in_progress|completed`, absent for photos.
    pub status: Option<String>,
    pub photo_uri: Option<String>,
}

/// Generic action response envelope for mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    pub ok: bool,
    /// Affected record id, when one exists.
    pub log_id: Option<String>,
    pub message: String,
}

impl ActionResponse {
    fn success(message: impl Into<String>, log_id: Option<String>) -> Self {
        Self {
            ok: true,
            log_id,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            log_id: None,
            message: message.into(),
        }
    }
}

/// Record list response, insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogListResponse {
    pub items: Vec<LogItem>,
    pub message: String,
}

/// One timeline section (one day).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineSection {
    pub date: String,
    pub is_today: bool,
    pub items: Vec<LogItem>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineResponse {
    pub sections: Vec<TimelineSection>,
    pub message: String,
}

/// One histogram bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistogramBar {
    pub date: String,
    pub count: u32,
    /// Bar height in percent, floored so empty days stay visible.
    pub bar_percent: u32,
    pub weekday: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardResponse {
    /// Oldest day first, ending today.
    pub bars: Vec<HistogramBar>,
    pub recent_topics: Vec<LogItem>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarResponse {
    pub selected_date: String,
    pub items: Vec<LogItem>,
    /// Every date that has at least one record, ascending.
    pub marked_dates: Vec<String>,
    pub message: String,
}

/// Preference read/write envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreferenceResponse {
    pub ok: bool,
    pub value: String,
    pub message: String,
}

/// Adds a log from the add screen.
///
/// # FFI contract
/// - `kind`: `task|schedule|photo`.
/// - `date`: `YYYY-MM-DD`; blank means today.
/// - Returns the created id on success; validation errors as `ok=false`.
#[flutter_rust_bridge::frb(sync)]
pub fn log_add(
    kind: String,
    title: String,
    description: Option<String>,
    date: String,
    photo_uri: Option<String>,
) -> ActionResponse {
    add_log_at(&resolve_db_path(), kind, title, description, date, photo_uri)
}

fn add_log_at(
    db_path: &Path,
    kind: String,
    title: String,
    description: Option<String>,
    date: String,
    photo_uri: Option<String>,
) -> ActionResponse {
    let Some(kind) = LogKind::parse(&kind) else {
        return ActionResponse::failure(format!("log_add failed: unknown kind `{kind}`"));
    };
    let date = match parse_date_or_today(Some(date.as_str())) {
        Ok(date) => date,
        Err(err) => return ActionResponse::failure(format!("log_add failed: {err}")),
    };
    let request = NewLogRequest {
        kind,
        title,
        description,
        date,
        photo_uri,
        status: None,
    };

    match with_log_service_at(db_path, |service| service.create_log(request)) {
        Ok(Ok(id)) => ActionResponse::success("Log saved.", Some(id)),
        Ok(Err(err)) => ActionResponse::failure(format!("log_add failed: {err}")),
        Err(err) => ActionResponse::failure(format!("log_add failed: {err}")),
    }
}

/// Deletes a log; unknown ids succeed as no-ops.
#[flutter_rust_bridge::frb(sync)]
pub fn log_remove(log_id: String) -> ActionResponse {
    remove_log_at(&resolve_db_path(), log_id)
}

fn remove_log_at(db_path: &Path, log_id: String) -> ActionResponse {
    match with_log_service_at(db_path, |service| service.delete_log(log_id.trim())) {
        Ok(true) => ActionResponse::success("Log deleted.", Some(log_id)),
        Ok(false) => ActionResponse::success("No matching log.", None),
        Err(err) => ActionResponse::failure(format!("log_remove failed: {err}")),
    }
}

/// Toggles task/schedule completion.
///
/// Photos and unknown ids succeed as no-ops with an explanatory message.
#[flutter_rust_bridge::frb(sync)]
pub fn log_toggle_status(log_id: String) -> ActionResponse {
    toggle_log_at(&resolve_db_path(), log_id)
}

fn toggle_log_at(db_path: &Path, log_id: String) -> ActionResponse {
    match with_log_service_at(db_path, |service| service.toggle_status(log_id.trim())) {
        Ok(Some(status)) => ActionResponse::success(format!("Status set to {status}."), Some(log_id)),
        Ok(None) => ActionResponse::success("Nothing to toggle.", None),
        Err(err) => ActionResponse::failure(format!("log_toggle_status failed: {err}")),
    }
}

/// Lists every record in insertion order.
#[flutter_rust_bridge::frb(sync)]
pub fn log_list() -> LogListResponse {
    list_logs_at(&resolve_db_path())
}

fn list_logs_at(db_path: &Path) -> LogListResponse {
    match with_log_service_at(db_path, |service| {
        service
            .store()
            .logs()
            .iter()
            .map(to_log_item)
            .collect::<Vec<_>>()
    }) {
        Ok(items) => LogListResponse {
            message: format!("{} log(s).", items.len()),
            items,
        },
        Err(err) => LogListResponse {
            items: Vec::new(),
            message: format!("log_list failed: {err}"),
        },
    }
}

/// Timeline sections for a kind filter (`all|task|schedule|photo`) and query.
#[flutter_rust_bridge::frb(sync)]
pub fn timeline(kind: String, query: String) -> TimelineResponse {
    let Some(kind) = KindFilter::parse(&kind) else {
        return TimelineResponse {
            sections: Vec::new(),
            message: format!("timeline failed: unknown filter `{kind}`"),
        };
    };
    let filter = LogFilter::new(kind, query);
    let today = local_today();

    match with_log_service_at(&resolve_db_path(), |service| {
        service
            .timeline(&filter)
            .into_iter()
            .map(|group| TimelineSection {
                date: format_date(group.date),
                is_today: group.is_today(today),
                items: group.logs.into_iter().map(to_log_item).collect(),
            })
            .collect::<Vec<_>>()
    }) {
        Ok(sections) => TimelineResponse {
            message: if sections.is_empty() {
                "No results.".to_string()
            } else {
                format!("{} day(s).", sections.len())
            },
            sections,
        },
        Err(err) => TimelineResponse {
            sections: Vec::new(),
            message: format!("timeline failed: {err}"),
        },
    }
}

/// Home screen: weekly histogram and recent topics.
///
/// `today` overrides the device date (`YYYY-MM-DD`).
#[flutter_rust_bridge::frb(sync)]
pub fn dashboard(today: Option<String>) -> DashboardResponse {
    let today = match parse_date_or_today(today.as_deref()) {
        Ok(today) => today,
        Err(err) => {
            return DashboardResponse {
                bars: Vec::new(),
                recent_topics: Vec::new(),
                message: format!("dashboard failed: {err}"),
            }
        }
    };

    match with_log_service_at(&resolve_db_path(), |service| {
        let dashboard = service.dashboard(today);
        let bars = dashboard
            .histogram
            .days
            .iter()
            .enumerate()
            .map(|(index, day)| HistogramBar {
                date: format_date(day.date),
                count: u32::try_from(day.count).unwrap_or(u32::MAX),
                bar_percent: dashboard.histogram.bar_percent(index).unwrap_or_default(),
                weekday: day.weekday_initial().to_string(),
            })
            .collect::<Vec<_>>();
        let recent = dashboard
            .recent_topics
            .into_iter()
            .map(to_log_item)
            .collect::<Vec<_>>();
        (bars, recent)
    }) {
        Ok((bars, recent_topics)) => DashboardResponse {
            bars,
            recent_topics,
            message: "ok".to_string(),
        },
        Err(err) => DashboardResponse {
            bars: Vec::new(),
            recent_topics: Vec::new(),
            message: format!("dashboard failed: {err}"),
        },
    }
}

/// Calendar screen for one selected date (blank or `None` means today).
#[flutter_rust_bridge::frb(sync)]
pub fn calendar_day(date: Option<String>) -> CalendarResponse {
    let selected = match parse_date_or_today(date.as_deref()) {
        Ok(selected) => selected,
        Err(err) => {
            return CalendarResponse {
                selected_date: String::new(),
                items: Vec::new(),
                marked_dates: Vec::new(),
                message: format!("calendar_day failed: {err}"),
            }
        }
    };

    match with_log_service_at(&resolve_db_path(), |service| {
        let calendar = service.calendar(selected);
        let marked = calendar
            .markers
            .iter()
            .filter(|(_, marker)| marker.marked)
            .map(|(date, _)| format_date(*date))
            .collect::<Vec<_>>();
        let items = calendar.logs.into_iter().map(to_log_item).collect::<Vec<_>>();
        (items, marked)
    }) {
        Ok((items, marked_dates)) => CalendarResponse {
            selected_date: format_date(selected),
            message: format!("{} log(s).", items.len()),
            items,
            marked_dates,
        },
        Err(err) => CalendarResponse {
            selected_date: format_date(selected),
            items: Vec::new(),
            marked_dates: Vec::new(),
            message: format!("calendar_day failed: {err}"),
        },
    }
}

/// Reads the theme mode (`light|dark|system`).
#[flutter_rust_bridge::frb(sync)]
pub fn theme_get() -> PreferenceResponse {
    get_theme_at(&resolve_db_path())
}

fn get_theme_at(db_path: &Path) -> PreferenceResponse {
    match with_storage_at(db_path, |kv| ThemeStore::open(kv).mode()) {
        Ok(mode) => PreferenceResponse::value(mode.as_str()),
        Err(err) => PreferenceResponse::failure(format!("theme_get failed: {err}")),
    }
}

/// Stores the theme mode.
#[flutter_rust_bridge::frb(sync)]
pub fn theme_set(mode: String) -> PreferenceResponse {
    set_theme_at(&resolve_db_path(), mode)
}

fn set_theme_at(db_path: &Path, mode: String) -> PreferenceResponse {
    let Some(mode) = ThemeMode::parse(&mode) else {
        return PreferenceResponse::failure(format!("theme_set failed: unknown mode `{mode}`"));
    };
    match with_storage_at(db_path, |kv| -> Result<ThemeMode, String> {
        let mut store = ThemeStore::open(kv);
        store.set_mode(mode);
        if store.has_unsaved_changes() {
            store.flush().map_err(unsaved_error)?;
        }
        Ok(store.mode())
    })
    .and_then(|saved| saved)
    {
        Ok(mode) => PreferenceResponse::value(mode.as_str()),
        Err(err) => PreferenceResponse::failure(format!("theme_set failed: {err}")),
    }
}

/// Reads the language preference (`en|ja|system`).
#[flutter_rust_bridge::frb(sync)]
pub fn language_get() -> PreferenceResponse {
    match with_storage_at(&resolve_db_path(), |kv| LanguageStore::open(kv).language()) {
        Ok(language) => PreferenceResponse::value(language.as_str()),
        Err(err) => PreferenceResponse::failure(format!("language_get failed: {err}")),
    }
}

/// Stores the language preference.
#[flutter_rust_bridge::frb(sync)]
pub fn language_set(language: String) -> PreferenceResponse {
    let Some(language) = Language::parse(&language) else {
        return PreferenceResponse::failure(format!(
            "language_set failed: unknown language `{language}`"
        ));
    };
    match with_storage_at(&resolve_db_path(), |kv| -> Result<Language, String> {
        let mut store = LanguageStore::open(kv);
        store.set_language(language);
        if store.has_unsaved_changes() {
            store.flush().map_err(unsaved_error)?;
        }
        Ok(store.language())
    })
    .and_then(|saved| saved)
    {
        Ok(language) => PreferenceResponse::value(language.as_str()),
        Err(err) => PreferenceResponse::failure(format!("language_set failed: {err}")),
    }
}

/// Resolves the UI language (`en|ja`) given the device locale code.
#[flutter_rust_bridge::frb(sync)]
pub fn language_effective(device_locale: Option<String>) -> PreferenceResponse {
    match with_storage_at(&resolve_db_path(), |kv| {
        LanguageStore::open(kv).effective_language(device_locale.as_deref())
    }) {
        Ok(language) => PreferenceResponse::value(language.as_str()),
        Err(err) => PreferenceResponse::failure(format!("language_effective failed: {err}")),
    }
}

impl PreferenceResponse {
    fn value(value: &str) -> Self {
        Self {
            ok: true,
            value: value.to_string(),
            message: String::new(),
        }
    }

    fn failure(message: String) -> Self {
        Self {
            ok: false,
            value: String::new(),
            message,
        }
    }
}

fn resolve_db_path() -> PathBuf {
    DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var(DB_PATH_ENV) {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(DB_FILE_NAME)
        })
        .clone()
}

fn with_storage_at<T>(
    db_path: &Path,
    f: impl FnOnce(&SqliteKvStore<'_>) -> T,
) -> Result<T, String> {
    // Sessions keep no shared in-memory state, so a poisoned lock is reusable.
    let _session = SESSION_LOCK
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    let conn = open_db(db_path).map_err(|err| format!("DB open failed: {err}"))?;
    let kv = SqliteKvStore::try_new(&conn).map_err(|err| format!("storage init failed: {err}"))?;
    Ok(f(&kv))
}

/// Runs `f` against the log collection and closes the session.
///
/// In-memory state dies with the session, so a write that still fails on the
/// closing flush turns the whole call into an error.
fn with_log_service_at<T>(
    db_path: &Path,
    f: impl FnOnce(&mut LogService<&SqliteKvStore<'_>>) -> T,
) -> Result<T, String> {
    with_storage_at(db_path, |kv| {
        let mut service = LogService::open(kv);
        let output = f(&mut service);
        close_log_session(&mut service).map(|()| output)
    })
    .and_then(|closed| closed)
}

fn close_log_session<S: KeyValueStore>(service: &mut LogService<S>) -> Result<(), String> {
    if !service.store().has_unsaved_changes() {
        return Ok(());
    }
    service.store_mut().flush().map_err(unsaved_error)
}

fn unsaved_error(err: StorageError) -> String {
    warn!("event=session_close module=ffi status=error reason=unsaved_changes error={err}");
    format!("changes were not saved: {err}")
}

fn parse_date_or_today(value: Option<&str>) -> Result<NaiveDate, String> {
    match value.map(str::trim) {
        None | Some("") => Ok(local_today()),
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map_err(|_| format!("invalid date `{raw}`; expected YYYY-MM-DD")),
    }
}

fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn to_log_item(record: &LogRecord) -> LogItem {
    LogItem {
        id: record.id.clone(),
        kind: record.kind.as_str().to_string(),
        title: record.title.clone(),
        description: record.description.clone(),
        date: format_date(record.date),
        created_at: record.created_at.to_rfc3339(),
        status: record.status.map(|status| status.as_str().to_string()),
        photo_uri: record.photo_uri.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::{
        add_log_at, calendar_day, core_version, dashboard, get_theme_at, init_logging,
        language_effective, language_set, list_logs_at, log_add, log_list, log_remove,
        log_toggle_status, ping, remove_log_at, set_theme_at, theme_get, theme_set, timeline,
        toggle_log_at,
    };
    use lifelog_core::db::open_db;
    use std::path::{Path, PathBuf};
    use std::time::{SystemTime, UNIX_EPOCH};

    fn isolated_db() -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lifelog.sqlite3");
        drop(open_db(&path).unwrap());
        (dir, path)
    }

    fn reject_writes(path: &Path) {
        let conn = open_db(path).unwrap();
        conn.execute_batch(
            "CREATE TRIGGER kv_entries_reject_insert BEFORE INSERT ON kv_entries
             BEGIN SELECT RAISE(ABORT, 'disk full'); END;
             CREATE TRIGGER kv_entries_reject_update BEFORE UPDATE ON kv_entries
             BEGIN SELECT RAISE(ABORT, 'disk full'); END;",
        )
        .unwrap();
    }

    fn add_task(path: &Path, title: &str) -> super::ActionResponse {
        add_log_at(
            path,
            "task".to_string(),
            title.to_string(),
            None,
            "2024-04-01".to_string(),
            None,
        )
    }

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_bad_input() {
        assert!(!init_logging("info".to_string(), String::new()).is_empty());
        assert!(!init_logging("verbose".to_string(), "tmp/logs".to_string()).is_empty());
    }

    #[test]
    fn log_add_then_list_and_timeline_find_it() {
        let token = unique_token("ffi-add");
        let created = log_add(
            "task".to_string(),
            format!("task {token}"),
            Some("details".to_string()),
            "2024-01-15".to_string(),
            None,
        );
        assert!(created.ok, "{}", created.message);
        let id = created.log_id.expect("created log should return log_id");

        let listed = log_list();
        assert!(listed.items.iter().any(|item| item.id == id));

        let found = timeline("task".to_string(), token.to_uppercase());
        assert_eq!(found.sections.len(), 1, "{}", found.message);
        assert_eq!(found.sections[0].date, "2024-01-15");
        assert_eq!(found.sections[0].items[0].id, id);

        let photos_only = timeline("photo".to_string(), token);
        assert!(photos_only.sections.is_empty());
    }

    #[test]
    fn log_add_rejects_invalid_input() {
        let missing_title = log_add(
            "schedule".to_string(),
            "  ".to_string(),
            None,
            "2024-01-15".to_string(),
            None,
        );
        assert!(!missing_title.ok);
        assert!(missing_title.message.contains("title"));

        let missing_photo = log_add(
            "photo".to_string(),
            String::new(),
            None,
            String::new(),
            None,
        );
        assert!(!missing_photo.ok);

        let bad_kind = log_add(
            "note".to_string(),
            "x".to_string(),
            None,
            String::new(),
            None,
        );
        assert!(!bad_kind.ok);

        let bad_date = log_add(
            "task".to_string(),
            "x".to_string(),
            None,
            "15/01/2024".to_string(),
            None,
        );
        assert!(!bad_date.ok);
        assert!(bad_date.message.contains("YYYY-MM-DD"));
    }

    #[test]
    fn toggle_and_remove_round_trip() {
        let token = unique_token("ffi-toggle");
        let created = log_add(
            "task".to_string(),
            token.clone(),
            None,
            "2024-02-01".to_string(),
            None,
        );
        let id = created.log_id.expect("created log should return log_id");

        let toggled = log_toggle_status(id.clone());
        assert!(toggled.ok);
        assert!(toggled.message.contains("completed"));
        let toggled_back = log_toggle_status(id.clone());
        assert!(toggled_back.message.contains("in_progress"));

        let photo = log_add(
            "photo".to_string(),
            String::new(),
            None,
            "2024-02-01".to_string(),
            Some(format!("file:///{token}.jpg")),
        );
        let photo_id = photo.log_id.expect("photo should return log_id");
        let photo_toggle = log_toggle_status(photo_id.clone());
        assert!(photo_toggle.ok);
        assert_eq!(photo_toggle.log_id, None);

        let removed = log_remove(id.clone());
        assert_eq!(removed.log_id.as_deref(), Some(id.as_str()));
        let removed_again = log_remove(id.clone());
        assert!(removed_again.ok);
        assert_eq!(removed_again.log_id, None);
        assert!(log_remove(photo_id).ok);
        assert!(!log_list().items.iter().any(|item| item.id == id));
    }

    #[test]
    fn dashboard_and_calendar_include_new_log() {
        let token = unique_token("ffi-calendar");
        let created = log_add(
            "schedule".to_string(),
            token,
            None,
            "2023-06-10".to_string(),
            None,
        );
        let id = created.log_id.expect("created log should return log_id");

        let home = dashboard(Some("2023-06-10".to_string()));
        assert_eq!(home.bars.len(), 7);
        assert_eq!(home.bars[6].date, "2023-06-10");
        assert!(home.bars[6].count >= 1);
        assert!(home.bars.iter().all(|bar| bar.bar_percent >= 10));

        let day = calendar_day(Some("2023-06-10".to_string()));
        assert_eq!(day.selected_date, "2023-06-10");
        assert!(day.items.iter().any(|item| item.id == id));
        assert!(day.marked_dates.contains(&"2023-06-10".to_string()));

        assert!(!calendar_day(Some("June".to_string())).message.is_empty());
    }

    #[test]
    fn preferences_round_trip() {
        let set = theme_set("dark".to_string());
        assert!(set.ok, "{}", set.message);
        assert_eq!(theme_get().value, "dark");
        assert!(!theme_set("sepia".to_string()).ok);

        let set = language_set("ja".to_string());
        assert!(set.ok, "{}", set.message);
        assert_eq!(language_effective(Some("en-US".to_string())).value, "ja");
        language_set("system".to_string());
        assert_eq!(language_effective(Some("ja-JP".to_string())).value, "ja");
        assert_eq!(language_effective(None).value, "en");
    }

    #[test]
    fn session_round_trip_on_isolated_database() {
        let (_dir, path) = isolated_db();

        let created = add_task(&path, "Morning Run");
        assert!(created.ok, "{}", created.message);
        let id = created.log_id.unwrap();

        assert!(toggle_log_at(&path, id.clone()).ok);
        let listed = list_logs_at(&path);
        assert_eq!(listed.items.len(), 1);
        assert_eq!(listed.items[0].status.as_deref(), Some("completed"));

        assert!(remove_log_at(&path, id).ok);
        assert!(list_logs_at(&path).items.is_empty());
    }

    #[test]
    fn log_add_reports_failure_when_write_is_rejected() {
        let (_dir, path) = isolated_db();
        reject_writes(&path);

        let created = add_task(&path, "Morning Run");

        assert!(!created.ok);
        assert_eq!(created.log_id, None);
        assert!(created.message.contains("not saved"), "{}", created.message);
        assert!(list_logs_at(&path).items.is_empty());
    }

    #[test]
    fn toggle_and_remove_report_failure_when_write_is_rejected() {
        let (_dir, path) = isolated_db();
        let id = add_task(&path, "Dentist").log_id.unwrap();
        reject_writes(&path);

        let toggled = toggle_log_at(&path, id.clone());
        assert!(!toggled.ok);
        let removed = remove_log_at(&path, id.clone());
        assert!(!removed.ok);

        let listed = list_logs_at(&path);
        assert_eq!(listed.items.len(), 1);
        assert_eq!(listed.items[0].id, id);
        assert_eq!(listed.items[0].status, None);
    }

    #[test]
    fn theme_set_reports_failure_when_write_is_rejected() {
        let (_dir, path) = isolated_db();
        reject_writes(&path);

        let set = set_theme_at(&path, "dark".to_string());
        assert!(!set.ok);
        assert!(set.message.contains("not saved"), "{}", set.message);
        assert_eq!(get_theme_at(&path).value, "system");
    }

    fn unique_token(prefix: &str) -> String {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time went backwards")
            .as_nanos();
        format!("{prefix}-{nanos}")
    }
}
