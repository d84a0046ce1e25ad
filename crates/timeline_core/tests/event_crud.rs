use rusqlite::Connection;
use timeline_core::db::migrations::latest_version;
use timeline_core::db::open_db_in_memory;
use timeline_core::{
    EventOrder, EventRepository, EventValidationError, RepoError, SqliteEventRepository,
    TimelineEvent,
};

#[test]
fn create_and_get_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEventRepository::try_new(&conn).unwrap();

    let event = TimelineEvent::new(4_600_000_000, "earth forms", Some("accretion")).unwrap();
    let id = repo.create_event(&event).unwrap();

    let loaded = repo.get_event(id).unwrap().unwrap();
    assert_eq!(loaded.id, Some(id));
    assert_eq!(loaded.year_number, 4_600_000_000);
    assert_eq!(loaded.year, "46億年前");
    assert_eq!(loaded.label, "earth forms");
    assert_eq!(loaded.note.as_deref(), Some("accretion"));
    assert_eq!(loaded.created_at, event.created_at);
}

#[test]
fn ids_are_unique_and_not_reused_after_delete() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEventRepository::try_new(&conn).unwrap();

    let first = repo.create_event(&TimelineEvent::new(1, "a", None).unwrap()).unwrap();
    let second = repo.create_event(&TimelineEvent::new(2, "b", None).unwrap()).unwrap();
    assert_ne!(first, second);

    repo.delete_event(second).unwrap();
    let third = repo.create_event(&TimelineEvent::new(3, "c", None).unwrap()).unwrap();
    assert!(third > second);
}

#[test]
fn update_text_leaves_year_fields_untouched() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEventRepository::try_new(&conn).unwrap();

    let event = TimelineEvent::new(60_000, "before", Some("old note")).unwrap();
    let id = repo.create_event(&event).unwrap();
    repo.update_event_text(id, "after", None).unwrap();

    let loaded = repo.get_event(id).unwrap().unwrap();
    assert_eq!(loaded.label, "after");
    assert_eq!(loaded.note, None);
    assert_eq!(loaded.year, event.year);
    assert_eq!(loaded.year_number, event.year_number);
    assert_eq!(loaded.created_at, event.created_at);
}

#[test]
fn update_and_delete_missing_rows_return_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEventRepository::try_new(&conn).unwrap();

    assert!(matches!(
        repo.update_event_text(42, "label", None),
        Err(RepoError::NotFound(42))
    ));
    assert!(matches!(repo.delete_event(42), Err(RepoError::NotFound(42))));
}

#[test]
fn writes_reject_invalid_shapes() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEventRepository::try_new(&conn).unwrap();

    let mut event = TimelineEvent::new(10, "label", None).unwrap();
    event.label = " padded ".to_string();
    assert!(matches!(
        repo.create_event(&event),
        Err(RepoError::Validation(EventValidationError::UntrimmedLabel))
    ));

    let mut with_id = TimelineEvent::new(10, "label", None).unwrap();
    with_id.id = Some(7);
    assert!(matches!(
        repo.create_event(&with_id),
        Err(RepoError::InvalidData(_))
    ));

    let mut huge = TimelineEvent::new(10, "label", None).unwrap();
    huge.year_number = u64::MAX;
    assert!(matches!(repo.create_event(&huge), Err(RepoError::InvalidData(_))));

    let id = repo.create_event(&TimelineEvent::new(10, "ok", None).unwrap()).unwrap();
    assert!(matches!(
        repo.update_event_text(id, "ok", Some("")),
        Err(RepoError::Validation(EventValidationError::EmptyNote))
    ));
    assert_eq!(repo.count_events().unwrap(), 1);
}

#[test]
fn list_orders_by_creation_time_with_id_tiebreak() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEventRepository::try_new(&conn).unwrap();

    for (label, created_at) in [("b", 2000), ("a", 1000), ("c", 2000)] {
        let mut event = TimelineEvent::new(5, label, None).unwrap();
        event.created_at = created_at;
        repo.create_event(&event).unwrap();
    }

    let asc: Vec<_> = repo
        .list_events(EventOrder::CreatedAsc)
        .unwrap()
        .into_iter()
        .map(|event| event.label)
        .collect();
    assert_eq!(asc, vec!["a", "b", "c"]);

    let desc: Vec<_> = repo
        .list_events(EventOrder::CreatedDesc)
        .unwrap()
        .into_iter()
        .map(|event| event.label)
        .collect();
    assert_eq!(desc, vec!["c", "b", "a"]);
}

#[test]
fn read_rejects_negative_year_number() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO events (year, year_number, label, note, created_at)
         VALUES ('broken', -5, 'bad', NULL, 1);",
        [],
    )
    .unwrap();

    let repo = SqliteEventRepository::try_new(&conn).unwrap();
    assert!(matches!(
        repo.list_events(EventOrder::CreatedAsc),
        Err(RepoError::InvalidData(_))
    ));
}

#[test]
fn repository_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    match SqliteEventRepository::try_new(&conn) {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert_eq!(expected_version, latest_version()),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn repository_rejects_connection_without_events_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    assert!(matches!(
        SqliteEventRepository::try_new(&conn),
        Err(RepoError::MissingRequiredTable("events"))
    ));
}

#[test]
fn repository_rejects_connection_missing_year_number_column() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE events (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            year TEXT NOT NULL,
            label TEXT NOT NULL,
            note TEXT NULL,
            created_at INTEGER NOT NULL
        );",
    )
    .unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    assert!(matches!(
        SqliteEventRepository::try_new(&conn),
        Err(RepoError::MissingRequiredColumn {
            table: "events",
            column: "year_number"
        })
    ));
}
