use lifelog_core::db::open_db_in_memory;
use lifelog_core::{KeyValueStore, MemoryKvStore, SqliteKvStore, StorageError};

#[test]
fn sqlite_kv_set_get_overwrite_remove() {
    let conn = open_db_in_memory().unwrap();
    let kv = SqliteKvStore::try_new(&conn).unwrap();

    assert_eq!(kv.get("missing").unwrap(), None);

    kv.set("alpha", "1").unwrap();
    kv.set("alpha", "2").unwrap();
    kv.set("beta", "x").unwrap();
    assert_eq!(kv.get("alpha").unwrap().as_deref(), Some("2"));
    assert_eq!(kv.keys().unwrap(), vec!["alpha".to_string(), "beta".to_string()]);

    assert!(kv.remove("alpha").unwrap());
    assert!(!kv.remove("alpha").unwrap());
    assert_eq!(kv.get("alpha").unwrap(), None);
}

#[test]
fn sqlite_kv_values_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("kv.db");

    {
        let conn = lifelog_core::db::open_db(&path).unwrap();
        let kv = SqliteKvStore::try_new(&conn).unwrap();
        kv.set("key", "{\"state\":{}}").unwrap();
    }

    let conn = lifelog_core::db::open_db(&path).unwrap();
    let kv = SqliteKvStore::try_new(&conn).unwrap();
    assert_eq!(kv.get("key").unwrap().as_deref(), Some("{\"state\":{}}"));
}

#[test]
fn memory_kv_injects_write_failures() {
    let kv = MemoryKvStore::new().with_entry("seed", "value");
    kv.set_fail_writes(true);

    let err = kv.set("other", "value").unwrap_err();
    assert!(matches!(err, StorageError::Unavailable(_)));
    assert!(kv.remove("seed").is_err());
    assert_eq!(kv.get("seed").unwrap().as_deref(), Some("value"));

    kv.set_fail_writes(false);
    kv.set("other", "value").unwrap();
    assert_eq!(kv.len(), 2);
}

#[test]
fn borrowed_store_shares_backend() {
    fn write_marker<S: KeyValueStore>(storage: S) {
        storage.set("shared", "yes").unwrap();
    }

    let kv = MemoryKvStore::new();
    write_marker(&kv);
    assert_eq!(kv.get("shared").unwrap().as_deref(), Some("yes"));
}
