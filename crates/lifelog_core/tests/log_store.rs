use chrono::{NaiveDate, TimeZone, Utc};
use lifelog_core::{
    KeyValueStore, LogKind, LogRecord, LogStatus, LogStore, LogValidationError, MemoryKvStore,
    NewLogRequest, LOG_STORAGE_KEY,
};
use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

fn day(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap()
}

fn task(title: &str, date: &str, minute: u32) -> LogRecord {
    LogRecord::create(
        NewLogRequest::new(LogKind::Task, title, day(date)),
        Utc.with_ymd_and_hms(2024, 1, 1, 12, minute, 0).unwrap(),
    )
    .unwrap()
}

fn photo(date: &str) -> LogRecord {
    LogRecord::create(
        NewLogRequest::photo("file:///photo.jpg", day(date)),
        Utc::now(),
    )
    .unwrap()
}

#[test]
fn add_n_records_then_read_all() {
    let kv = MemoryKvStore::new();
    let mut store = LogStore::open(&kv);

    let submitted = (0..5)
        .map(|i| task(&format!("task {i}"), "2024-01-01", i))
        .collect::<Vec<_>>();
    for record in &submitted {
        store.add_log(record.clone()).unwrap();
    }

    assert_eq!(store.len(), 5);
    assert_eq!(store.logs(), submitted.as_slice());
    let ids = store.logs().iter().map(|r| r.id.as_str()).collect::<HashSet<_>>();
    assert_eq!(ids.len(), 5);
    assert!(kv.get(LOG_STORAGE_KEY).unwrap().is_some());
}

#[test]
fn add_rejects_duplicate_id_without_state_change() {
    let kv = MemoryKvStore::new();
    let mut store = LogStore::open(&kv);
    let record = task("once", "2024-01-01", 0);
    store.add_log(record.clone()).unwrap();
    let persisted_before = kv.get(LOG_STORAGE_KEY).unwrap();

    let err = store.add_log(record.clone()).unwrap_err();
    assert_eq!(err, LogValidationError::DuplicateId(record.id.clone()));
    assert_eq!(store.len(), 1);
    assert_eq!(kv.get(LOG_STORAGE_KEY).unwrap(), persisted_before);
}

#[test]
fn add_rejects_invalid_records() {
    let mut store = LogStore::open(MemoryKvStore::new());

    let mut untitled = task("title", "2024-01-01", 0);
    untitled.title = "  ".to_string();
    assert_eq!(
        store.add_log(untitled).unwrap_err(),
        LogValidationError::MissingTitle(LogKind::Task)
    );

    let mut no_id = task("title", "2024-01-01", 0);
    no_id.id = String::new();
    assert_eq!(store.add_log(no_id).unwrap_err(), LogValidationError::EmptyId);

    let mut photo_without_uri = photo("2024-01-01");
    photo_without_uri.photo_uri = None;
    assert_eq!(
        store.add_log(photo_without_uri).unwrap_err(),
        LogValidationError::MissingPhoto
    );

    assert!(store.is_empty());
    assert!(store.storage().is_empty());
}

#[test]
fn remove_unknown_id_is_noop() {
    let kv = MemoryKvStore::new();
    let mut store = LogStore::open(&kv);
    store.add_log(task("keep", "2024-01-01", 0)).unwrap();
    let before = store.logs().to_vec();

    assert!(!store.remove_log("does-not-exist"));
    assert_eq!(store.logs(), before.as_slice());
}

#[test]
fn remove_existing_id_shrinks_collection() {
    let mut store = LogStore::open(MemoryKvStore::new());
    let first = task("first", "2024-01-01", 0);
    let second = task("second", "2024-01-01", 1);
    store.add_log(first.clone()).unwrap();
    store.add_log(second.clone()).unwrap();

    assert!(store.remove_log(&first.id));
    assert_eq!(store.logs(), [second].as_slice());
    assert!(store.get(&first.id).is_none());
}

#[test]
fn toggle_status_follows_completed_in_progress_cycle() {
    let mut store = LogStore::open(MemoryKvStore::new());
    let mut completed = task("done", "2024-01-01", 0);
    completed.status = Some(LogStatus::Completed);
    let mut todo = task("todo", "2024-01-01", 1);
    todo.status = Some(LogStatus::Todo);
    let absent = task("absent", "2024-01-01", 2);
    for record in [&completed, &todo, &absent] {
        store.add_log(record.clone()).unwrap();
    }

    assert_eq!(store.toggle_status(&completed.id), Some(LogStatus::InProgress));
    assert_eq!(store.toggle_status(&todo.id), Some(LogStatus::Completed));
    assert_eq!(store.toggle_status(&absent.id), Some(LogStatus::Completed));
    assert_eq!(store.toggle_status(&absent.id), Some(LogStatus::InProgress));
    assert_eq!(
        store.get(&completed.id).unwrap().status,
        Some(LogStatus::InProgress)
    );
}

#[test]
fn toggle_status_on_photo_or_unknown_id_is_noop() {
    let kv = MemoryKvStore::new();
    let mut store = LogStore::open(&kv);
    let picture = photo("2024-01-01");
    store.add_log(picture.clone()).unwrap();
    let persisted_before = kv.get(LOG_STORAGE_KEY).unwrap();

    assert_eq!(store.toggle_status(&picture.id), None);
    assert_eq!(store.toggle_status("missing"), None);
    assert_eq!(store.get(&picture.id).unwrap().status, None);
    assert_eq!(kv.get(LOG_STORAGE_KEY).unwrap(), persisted_before);
}

#[test]
fn subscribers_see_each_effective_mutation() {
    let mut store = LogStore::open(MemoryKvStore::new());
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let subscription = store.subscribe(move |logs| sink.borrow_mut().push(logs.len()));

    let record = task("watched", "2024-01-01", 0);
    store.add_log(record.clone()).unwrap();
    store.toggle_status(&record.id);
    store.remove_log("missing");
    store.remove_log(&record.id);

    assert_eq!(*seen.borrow(), vec![1, 1, 0]);

    assert!(store.unsubscribe(subscription));
    assert!(!store.unsubscribe(subscription));
    store.add_log(task("unwatched", "2024-01-01", 1)).unwrap();
    assert_eq!(seen.borrow().len(), 3);
}

#[test]
fn write_failure_keeps_memory_state_and_flush_recovers() {
    let kv = MemoryKvStore::new();
    let mut store = LogStore::open(&kv);
    kv.set_fail_writes(true);

    let record = task("offline", "2024-01-01", 0);
    store.add_log(record.clone()).unwrap();
    assert_eq!(store.len(), 1);
    assert!(store.has_unsaved_changes());
    assert!(kv.get(LOG_STORAGE_KEY).unwrap().is_none());
    assert!(store.flush().is_err());

    kv.set_fail_writes(false);
    store.close().unwrap();

    let reopened = LogStore::open(&kv);
    assert_eq!(reopened.logs(), [record].as_slice());
}
