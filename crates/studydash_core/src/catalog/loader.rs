//! File and HTTP catalog loaders.
//!
//! # Invariants
//! - Subject/lesson order from the resource is preserved.
//! - HTTP loads send no-cache headers and treat non-2xx statuses as failures.

use crate::model::catalog::Catalog;
use log::{error, info};
use reqwest::header::{CACHE_CONTROL, PRAGMA};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Default resource location, relative to the working directory.
pub const DEFAULT_CATALOG_SOURCE: &str = "data/subjects.json";

const HTTP_TIMEOUT: Duration = Duration::from_secs(15);

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Catalog load failure.
#[derive(Debug)]
pub enum CatalogError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Http(reqwest::Error),
    /// Server answered with a non-success status.
    Status(u16),
    Parse(serde_json::Error),
}

impl Display for CatalogError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "cannot read catalog `{}`: {source}", path.display())
            }
            Self::Http(err) => write!(f, "cannot fetch catalog: {err}"),
            Self::Status(code) => write!(f, "catalog request failed with status {code}"),
            Self::Parse(err) => write!(f, "malformed catalog JSON: {err}"),
        }
    }
}

impl Error for CatalogError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Http(err) => Some(err),
            Self::Status(_) => None,
            Self::Parse(err) => Some(err),
        }
    }
}

impl From<reqwest::Error> for CatalogError {
    fn from(value: reqwest::Error) -> Self {
        Self::Http(value)
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

/// Source of the subject/lesson catalog.
pub trait CatalogLoader {
    fn load_catalog(&self) -> CatalogResult<Catalog>;

    /// Human-readable origin for diagnostics.
    fn describe(&self) -> String;
}

/// Decodes a catalog JSON document.
pub fn parse_catalog(json: &str) -> CatalogResult<Catalog> {
    Ok(serde_json::from_str(json)?)
}

/// Reads the catalog from a local file on every call.
#[derive(Debug, Clone)]
pub struct FileCatalogLoader {
    path: PathBuf,
}

impl FileCatalogLoader {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl CatalogLoader for FileCatalogLoader {
    fn load_catalog(&self) -> CatalogResult<Catalog> {
        let text = std::fs::read_to_string(&self.path).map_err(|source| CatalogError::Io {
            path: self.path.clone(),
            source,
        })?;
        parse_catalog(&text)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Fetches the catalog over HTTP with caching disabled.
#[derive(Debug, Clone)]
pub struct HttpCatalogLoader {
    url: String,
}

impl HttpCatalogLoader {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

impl CatalogLoader for HttpCatalogLoader {
    fn load_catalog(&self) -> CatalogResult<Catalog> {
        let client = reqwest::blocking::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()?;
        let response = client
            .get(&self.url)
            .header(CACHE_CONTROL, "no-cache, no-store")
            .header(PRAGMA, "no-cache")
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status(status.as_u16()));
        }

        let body = response.text()?;
        parse_catalog(&body)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Picks the loader for a resource string: HTTP for `http(s)://`, file
/// otherwise.
pub fn loader_for(source: &str) -> Box<dyn CatalogLoader> {
    let trimmed = source.trim();
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        Box::new(HttpCatalogLoader::new(trimmed))
    } else {
        Box::new(FileCatalogLoader::new(trimmed))
    }
}

/// Loads through `loader`, emitting `catalog_load` events.
pub fn load_with_logging(loader: &dyn CatalogLoader) -> CatalogResult<Catalog> {
    let started_at = Instant::now();
    info!("event=catalog_load module=catalog status=start");

    match loader.load_catalog() {
        Ok(catalog) => {
            info!(
                "event=catalog_load module=catalog status=ok duration_ms={} subjects={}",
                started_at.elapsed().as_millis(),
                catalog.subjects.len()
            );
            Ok(catalog)
        }
        Err(err) => {
            error!(
                "event=catalog_load module=catalog status=error duration_ms={} source={} error={}",
                started_at.elapsed().as_millis(),
                loader.describe(),
                err
            );
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{loader_for, parse_catalog, CatalogError};

    #[test]
    fn parse_catalog_preserves_order() {
        let catalog = parse_catalog(
            r#"{"subjects":[{"id":"z","name":"Z"},{"id":"a","name":"A"}]}"#,
        )
        .unwrap();
        let ids: Vec<_> = catalog.subjects.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["z", "a"]);
    }

    #[test]
    fn parse_catalog_rejects_malformed_json() {
        let err = parse_catalog("{\"subjects\": [").unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
    }

    #[test]
    fn loader_for_selects_by_scheme() {
        assert_eq!(
            loader_for("https://example.com/subjects.json").describe(),
            "https://example.com/subjects.json"
        );
        assert_eq!(loader_for(" data/subjects.json ").describe(), "data/subjects.json");
    }
}
