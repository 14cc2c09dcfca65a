//! Key-value repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide get/put/remove over named string entries.
//! - Provide the JSON read/write helpers used by persisted stores.
//!
//! # Invariants
//! - `put` replaces the full value of an entry.
//! - `remove` of an absent key is not an error.
//! - [`parse_or_default`] never fails; corrupt input yields `T::default()`.

use crate::db::DbError;
use log::warn;
use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::error::Category;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for entry persistence.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// Value could not be encoded before persistence.
    Serialize(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Serialize(message) => write!(f, "failed to encode entry: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Serialize(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Durable storage of named string entries.
pub trait KvRepository {
    fn get(&self, key: &str) -> RepoResult<Option<String>>;
    fn put(&self, key: &str, value: &str) -> RepoResult<()>;
    fn remove(&self, key: &str) -> RepoResult<()>;
}

/// SQLite-backed entry repository over `kv_entries`.
#[derive(Clone, Copy)]
pub struct SqliteKvRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteKvRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl KvRepository for SqliteKvRepository<'_> {
    fn get(&self, key: &str) -> RepoResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn put(&self, key: &str, value: &str) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO kv_entries (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove(&self, key: &str) -> RepoResult<()> {
        self.conn
            .execute("DELETE FROM kv_entries WHERE key = ?1;", [key])?;
        Ok(())
    }
}

/// Decodes a persisted JSON value, falling back to `T::default()`.
///
/// Absent input, unparsable JSON, JSON `null` and values of the wrong shape
/// all yield the default.
pub fn parse_or_default<T>(raw: Option<&str>) -> T
where
    T: DeserializeOwned + Default,
{
    raw.and_then(|text| decode_entry::<T>(text).ok().flatten())
        .unwrap_or_default()
}

/// `Ok(None)` for JSON `null`; `Err` for unparsable or wrongly shaped text.
fn decode_entry<T: DeserializeOwned>(text: &str) -> serde_json::Result<Option<T>> {
    serde_json::from_str(text)
}

fn fallback_code(err: &serde_json::Error) -> &'static str {
    match err.classify() {
        Category::Data => "unexpected_shape",
        Category::Io | Category::Syntax | Category::Eof => "corrupt_value",
    }
}

/// Reads one JSON entry with fail-open semantics.
///
/// Read failures and corrupt values are logged and replaced by the default;
/// they are never surfaced to callers.
pub fn load_json_or_default<R, T>(repo: &R, key: &str) -> T
where
    R: KvRepository + ?Sized,
    T: DeserializeOwned + Default,
{
    let raw = match repo.get(key) {
        Ok(raw) => raw,
        Err(err) => {
            warn!(
                "event=entry_load module=repo status=fallback key={key} error_code=read_failed error={err}"
            );
            return T::default();
        }
    };

    let Some(text) = raw else {
        return T::default();
    };
    match decode_entry::<T>(&text) {
        Ok(value) => value.unwrap_or_default(),
        Err(err) => {
            warn!(
                "event=entry_load module=repo status=fallback key={key} error_code={} bytes={}",
                fallback_code(&err),
                text.len()
            );
            T::default()
        }
    }
}

/// Serializes `value` as JSON and overwrites the entry.
pub fn save_json<R, T>(repo: &R, key: &str, value: &T) -> RepoResult<()>
where
    R: KvRepository + ?Sized,
    T: Serialize + ?Sized,
{
    let encoded =
        serde_json::to_string(value).map_err(|err| RepoError::Serialize(err.to_string()))?;
    repo.put(key, &encoded)
}

#[cfg(test)]
mod tests {
    use super::{decode_entry, fallback_code, parse_or_default};
    use std::collections::BTreeMap;

    #[test]
    fn parse_or_default_handles_absent_corrupt_and_null() {
        assert_eq!(parse_or_default::<String>(None), "");
        assert_eq!(parse_or_default::<String>(Some("{not json")), "");
        assert_eq!(parse_or_default::<String>(Some("null")), "");
        assert_eq!(parse_or_default::<String>(Some("42")), "");
        assert_eq!(parse_or_default::<String>(Some("\"kept\"")), "kept");
    }

    #[test]
    fn parse_or_default_rejects_wrong_shape_for_maps() {
        let parsed: BTreeMap<String, bool> = parse_or_default(Some("[1,2,3]"));
        assert!(parsed.is_empty());
    }

    #[test]
    fn decode_failures_are_classified_for_fallback_logging() {
        let wrong_shape = decode_entry::<BTreeMap<String, bool>>("42").unwrap_err();
        assert_eq!(fallback_code(&wrong_shape), "unexpected_shape");

        let list_for_map = decode_entry::<BTreeMap<String, bool>>("[1,2]").unwrap_err();
        assert_eq!(fallback_code(&list_for_map), "unexpected_shape");

        let truncated = decode_entry::<String>("{not json").unwrap_err();
        assert_eq!(fallback_code(&truncated), "corrupt_value");

        assert_eq!(decode_entry::<String>("null").unwrap(), None);
    }
}
