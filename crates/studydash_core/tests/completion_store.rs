use studydash_core::db::{open_db, open_db_in_memory};
use studydash_core::{CompletionStore, KvRepository, SqliteKvRepository, COMPLETION_KEY};

#[test]
fn absent_entries_are_not_done() {
    let conn = open_db_in_memory().unwrap();
    let store = CompletionStore::open(SqliteKvRepository::new(&conn));

    assert!(!store.is_done("S1", "l1"));
    assert!(!store.is_done("", ""));
    assert!(store.snapshot().is_empty());
}

#[test]
fn set_done_is_idempotent_and_latest_call_wins() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteKvRepository::new(&conn);
    let mut store = CompletionStore::open(repo);

    store.set_done("S1", "l1", true).unwrap();
    let after_first = store.snapshot().clone();
    store.set_done("S1", "l1", true).unwrap();
    assert_eq!(store.snapshot(), &after_first);
    assert!(store.is_done("S1", "l1"));

    store.set_done("S1", "l1", false).unwrap();
    assert!(!store.is_done("S1", "l1"));
    assert_eq!(
        repo.get(COMPLETION_KEY).unwrap().as_deref(),
        Some(r#"{"S1":{"l1":false}}"#)
    );
}

#[test]
fn toggle_flips_and_persists() {
    let conn = open_db_in_memory().unwrap();
    let mut store = CompletionStore::open(SqliteKvRepository::new(&conn));

    assert!(store.toggle("S1", "l2").unwrap());
    assert!(!store.toggle("S1", "l2").unwrap());

    let reopened = CompletionStore::open(SqliteKvRepository::new(&conn));
    assert!(!reopened.is_done("S1", "l2"));
}

#[test]
fn reset_all_clears_memory_and_storage() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteKvRepository::new(&conn);
    let mut store = CompletionStore::open(repo);
    store.set_done("S1", "l1", true).unwrap();
    store.set_done("S2", "l9", true).unwrap();

    store.reset_all().unwrap();

    assert!(!store.is_done("S1", "l1"));
    assert!(!store.is_done("S2", "l9"));
    assert_eq!(repo.get(COMPLETION_KEY).unwrap(), None);
}

#[test]
fn completion_survives_reopening_the_database_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("studydash.sqlite3");

    {
        let conn = open_db(&path).unwrap();
        let mut store = CompletionStore::open(SqliteKvRepository::new(&conn));
        store.set_done("S1", "l1", true).unwrap();
    }

    let conn = open_db(&path).unwrap();
    let store = CompletionStore::open(SqliteKvRepository::new(&conn));
    assert!(store.is_done("S1", "l1"));
    assert!(!store.is_done("S1", "l2"));
}

#[test]
fn corrupt_persisted_map_falls_back_to_empty() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteKvRepository::new(&conn);
    repo.put(COMPLETION_KEY, "{\"S1\": {\"l1\": tru").unwrap();

    let mut store = CompletionStore::open(repo);
    assert!(store.snapshot().is_empty());

    store.set_done("S1", "l1", true).unwrap();
    assert_eq!(
        repo.get(COMPLETION_KEY).unwrap().as_deref(),
        Some(r#"{"S1":{"l1":true}}"#)
    );
}

#[test]
fn wrongly_shaped_persisted_map_falls_back_to_empty() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteKvRepository::new(&conn);
    repo.put(COMPLETION_KEY, "[\"l1\"]").unwrap();

    let store = CompletionStore::open(repo);
    assert!(!store.is_done("S1", "l1"));
}
