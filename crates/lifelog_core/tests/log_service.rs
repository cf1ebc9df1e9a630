use chrono::{NaiveDate, TimeZone, Utc};
use lifelog_core::{
    KindFilter, LogFilter, LogKind, LogService, LogStatus, LogValidationError, MemoryKvStore,
    NewLogRequest,
};

fn day(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap()
}

#[test]
fn create_log_assigns_id_and_stores_record() {
    let mut service = LogService::open(MemoryKvStore::new());

    let id = service
        .create_log(NewLogRequest::new(LogKind::Task, "Write report", day("2024-05-01")))
        .unwrap();

    let stored = service.store().get(&id).unwrap();
    assert_eq!(stored.title, "Write report");
    assert_eq!(stored.kind, LogKind::Task);
}

#[test]
fn create_log_validation_failure_changes_nothing() {
    let mut service = LogService::open(MemoryKvStore::new());

    let err = service
        .create_log(NewLogRequest::new(LogKind::Schedule, "", day("2024-05-01")))
        .unwrap_err();
    assert_eq!(err, LogValidationError::MissingTitle(LogKind::Schedule));

    let mut photo = NewLogRequest::photo("", day("2024-05-01"));
    photo.photo_uri = None;
    assert_eq!(
        service.create_log(photo).unwrap_err(),
        LogValidationError::MissingPhoto
    );

    assert!(service.store().is_empty());
    assert!(service.store().storage().is_empty());
}

#[test]
fn screen_queries_reflect_mutations() {
    let mut service = LogService::open(MemoryKvStore::new());
    let created = |hour| Utc.with_ymd_and_hms(2024, 5, 3, hour, 0, 0).unwrap();

    let run = service
        .create_log_at(
            NewLogRequest::new(LogKind::Task, "Morning Run", day("2024-05-03")),
            created(7),
        )
        .unwrap();
    let meeting = service
        .create_log_at(
            NewLogRequest::new(LogKind::Schedule, "Standup", day("2024-05-02")),
            created(8),
        )
        .unwrap();
    service
        .create_log_at(
            NewLogRequest::photo("file:///lunch.jpg", day("2024-05-03")),
            created(12),
        )
        .unwrap();

    assert_eq!(service.toggle_status(&run), Some(LogStatus::Completed));

    let timeline = service.timeline(&LogFilter::new(KindFilter::All, ""));
    assert_eq!(timeline.len(), 2);
    assert_eq!(timeline[0].date, day("2024-05-03"));
    assert_eq!(timeline[0].logs[0].kind, LogKind::Photo);
    assert!(timeline[0].logs[1].is_completed());

    let dashboard = service.dashboard(day("2024-05-03"));
    assert_eq!(dashboard.histogram.counts(), vec![0, 0, 0, 0, 0, 1, 2]);
    assert_eq!(dashboard.recent_topics.len(), 2);
    assert_eq!(dashboard.recent_topics[0].kind, LogKind::Photo);

    let calendar = service.calendar(day("2024-05-02"));
    assert_eq!(calendar.logs.len(), 1);
    assert_eq!(calendar.logs[0].id, meeting);
    assert!(calendar.markers[&day("2024-05-03")].marked);
    assert!(calendar.markers[&day("2024-05-02")].selected);

    assert!(service.delete_log(&meeting));
    assert!(!service.delete_log(&meeting));
    assert!(service.calendar(day("2024-05-02")).logs.is_empty());

    service.close().unwrap();
}
