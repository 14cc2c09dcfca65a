use studydash_core::db::open_db_in_memory;
use studydash_core::{KvRepository, NotesStore, SqliteKvRepository, NOTES_KEY};

#[test]
fn missing_notes_load_as_empty_string() {
    let conn = open_db_in_memory().unwrap();
    let store = NotesStore::open(SqliteKvRepository::new(&conn));
    assert_eq!(store.text(), "");
}

#[test]
fn update_overwrites_persisted_json_string() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteKvRepository::new(&conn);
    let mut store = NotesStore::open(repo);

    store.update("first").unwrap();
    store.update("second \"quoted\"").unwrap();

    assert_eq!(
        repo.get(NOTES_KEY).unwrap().as_deref(),
        Some(r#""second \"quoted\"""#)
    );
    let reopened = NotesStore::open(repo);
    assert_eq!(reopened.text(), "second \"quoted\"");
}

#[test]
fn append_line_separates_with_newline() {
    let conn = open_db_in_memory().unwrap();
    let mut store = NotesStore::open(SqliteKvRepository::new(&conn));

    store.append_line("one").unwrap();
    store.append_line("two").unwrap();
    assert_eq!(store.text(), "one\ntwo");
}

#[test]
fn corrupt_or_non_string_notes_load_as_empty() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteKvRepository::new(&conn);

    repo.put(NOTES_KEY, "not json at all").unwrap();
    assert_eq!(NotesStore::open(repo).text(), "");

    repo.put(NOTES_KEY, "{\"text\":1}").unwrap();
    assert_eq!(NotesStore::open(repo).text(), "");

    repo.put(NOTES_KEY, "null").unwrap();
    assert_eq!(NotesStore::open(repo).text(), "");
}
