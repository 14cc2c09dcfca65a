use rusqlite::Connection;
use studydash_core::db::migrations::latest_version;
use studydash_core::db::{open_db, open_db_in_memory, DbError};

fn user_version(conn: &Connection) -> u32 {
    conn.pragma_query_value(None, "user_version", |row| row.get(0))
        .unwrap()
}

fn kv_columns(conn: &Connection) -> Vec<String> {
    let mut stmt = conn.prepare("PRAGMA table_info(kv_entries);").unwrap();
    let names = stmt
        .query_map([], |row| row.get::<_, String>(1))
        .unwrap()
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    names
}

#[test]
fn fresh_store_has_kv_entries_at_latest_version() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(user_version(&conn), latest_version());
    assert_eq!(kv_columns(&conn), vec!["key", "value", "updated_at"]);
}

#[test]
fn kv_key_is_unique_and_stamped_on_insert() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO kv_entries (key, value) VALUES ('study_dash_notes_v2', '\"a\"');",
        [],
    )
    .unwrap();

    let duplicate = conn.execute(
        "INSERT INTO kv_entries (key, value) VALUES ('study_dash_notes_v2', '\"b\"');",
        [],
    );
    assert!(duplicate.is_err());

    let stamped: i64 = conn
        .query_row("SELECT updated_at FROM kv_entries;", [], |row| row.get(0))
        .unwrap();
    assert!(stamped > 0);
}

#[test]
fn reopening_a_progress_file_keeps_entries() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("studydash.sqlite3");

    let first = open_db(&path).unwrap();
    first
        .execute(
            "INSERT INTO kv_entries (key, value) VALUES ('study_dash_done_v2', '{}');",
            [],
        )
        .unwrap();
    drop(first);

    let second = open_db(&path).unwrap();
    assert_eq!(user_version(&second), latest_version());
    let value: String = second
        .query_row(
            "SELECT value FROM kv_entries WHERE key = 'study_dash_done_v2';",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(value, "{}");
}

#[test]
fn progress_file_from_newer_build_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ahead.sqlite3");
    Connection::open(&path)
        .unwrap()
        .pragma_update(None, "user_version", 42)
        .unwrap();

    match open_db(&path) {
        Err(DbError::SchemaTooNew { found, supported }) => {
            assert_eq!(found, 42);
            assert_eq!(supported, latest_version());
        }
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("newer schema should be refused"),
    }
}
