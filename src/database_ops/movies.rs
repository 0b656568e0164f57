//! Record fetcher: bulk reads of every movie document from a store.

use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use serde_json::Value;
use sqlx::types::Json;
use tracing::{info, instrument, warn};

use crate::database_ops::db::Db;
use crate::model::Document;
use crate::util::env as env_util;

pub const DEFAULT_COLLECTION: &str = "movies2";

/// A source of raw movie documents. One call reads the whole collection;
/// there is no paging, filtering or retry.
#[async_trait]
pub trait MovieStore: Send + Sync {
    /// Short human label for logs and the health endpoint (never a DSN).
    fn describe(&self) -> String;

    async fn fetch_all(&self) -> Result<Vec<Document>>;

    /// Whether the store currently answers.
    async fn ping(&self) -> bool;
}

/// Documents stored as one JSONB `doc` column per row.
pub struct PgMovieStore {
    db: Db,
    collection: String,
}

impl PgMovieStore {
    pub fn new(db: Db, collection: &str) -> Result<Self> {
        if !is_valid_collection(collection) {
            bail!("invalid collection name {collection:?}");
        }
        Ok(Self {
            db,
            collection: collection.to_string(),
        })
    }
}

#[async_trait]
impl MovieStore for PgMovieStore {
    fn describe(&self) -> String {
        format!("postgres:{}", self.collection)
    }

    #[instrument(skip(self), fields(collection = %self.collection))]
    async fn fetch_all(&self) -> Result<Vec<Document>> {
        // Identifier was validated in `new`; it cannot be bound as a parameter.
        let sql = format!("SELECT doc FROM {}", self.collection);
        let rows: Vec<Json<Value>> = sqlx::query_scalar(&sql)
            .persistent(false)
            .fetch_all(&self.db.pool)
            .await
            .with_context(|| format!("fetching documents from {}", self.collection))?;

        let docs = into_documents(rows.into_iter().map(|Json(v)| v));
        info!(count = docs.len(), "fetched movie documents");
        Ok(docs)
    }

    async fn ping(&self) -> bool {
        self.db.ping().await
    }
}

/// Newline-delimited JSON export (one document per line) or a single JSON array.
pub struct NdjsonMovieStore {
    path: PathBuf,
}

impl NdjsonMovieStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl MovieStore for NdjsonMovieStore {
    fn describe(&self) -> String {
        format!("file:{}", self.path.display())
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn fetch_all(&self) -> Result<Vec<Document>> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("reading {}", self.path.display()))?;
        let values = parse_export(&raw)?;
        let docs = into_documents(values.into_iter());
        info!(count = docs.len(), "fetched movie documents");
        Ok(docs)
    }

    async fn ping(&self) -> bool {
        tokio::fs::metadata(&self.path).await.is_ok()
    }
}

/// Fixed in-memory collection, handy for embedding and tests.
#[derive(Default)]
pub struct MemoryMovieStore {
    docs: Vec<Document>,
}

impl MemoryMovieStore {
    pub fn new(docs: Vec<Document>) -> Self {
        Self { docs }
    }
}

#[async_trait]
impl MovieStore for MemoryMovieStore {
    fn describe(&self) -> String {
        format!("memory:{}", self.docs.len())
    }

    async fn fetch_all(&self) -> Result<Vec<Document>> {
        Ok(self.docs.clone())
    }

    async fn ping(&self) -> bool {
        true
    }
}

/// Build the configured store: `MOVIES_FILE` when set, Postgres otherwise.
pub async fn store_from_env() -> Result<Box<dyn MovieStore>> {
    if let Some(path) = env_util::env_opt("MOVIES_FILE") {
        return Ok(Box::new(NdjsonMovieStore::new(path)));
    }
    let url = env_util::db_url()?;
    let collection =
        env_util::env_opt("MOVIES_COLLECTION").unwrap_or_else(|| DEFAULT_COLLECTION.to_string());
    let max_conns: u32 = env_util::env_parse("DB_MAX_CONNS", 5u32);
    let db = Db::connect(&url, max_conns).await?;
    Ok(Box::new(PgMovieStore::new(db, &collection)?))
}

/// Plain or schema-qualified SQL identifier (`movies2`, `public.movies2`).
fn is_valid_collection(name: &str) -> bool {
    let parts: Vec<&str> = name.split('.').collect();
    parts.len() <= 2
        && parts.iter().all(|part| {
            let mut chars = part.chars();
            chars
                .next()
                .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        })
}

fn parse_export(raw: &str) -> Result<Vec<Value>> {
    if raw.trim_start().starts_with('[') {
        return serde_json::from_str(raw).context("parsing JSON array export");
    }
    raw.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| {
            serde_json::from_str(line).map_err(|e| anyhow!("line {}: invalid JSON: {e}", idx + 1))
        })
        .collect()
}

fn into_documents(values: impl Iterator<Item = Value>) -> Vec<Document> {
    let mut skipped = 0usize;
    let docs: Vec<Document> = values
        .filter_map(|value| match value {
            Value::Object(map) => Some(map),
            _ => {
                skipped += 1;
                None
            }
        })
        .collect();
    if skipped > 0 {
        warn!(skipped, "ignored non-object documents");
    }
    docs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "movie-dash-{}-{}",
            uuid::Uuid::new_v4(),
            name
        ));
        std::fs::write(&path, contents).expect("write fixture");
        path
    }

    #[test]
    fn validates_collection_identifiers() {
        assert!(is_valid_collection("movies2"));
        assert!(is_valid_collection("public.movies2"));
        assert!(is_valid_collection("_staging"));
        assert!(!is_valid_collection("2movies"));
        assert!(!is_valid_collection("movies; DROP TABLE x"));
        assert!(!is_valid_collection("a.b.c"));
        assert!(!is_valid_collection(""));
    }

    #[tokio::test]
    async fn reads_ndjson_and_skips_blank_lines_and_non_objects() {
        let path = temp_file(
            "movies.ndjson",
            "{\"title\":\"Heat\"}\n\n[1,2]\n{\"title\":\"Ronin\"}\n",
        );
        let store = NdjsonMovieStore::new(&path);
        let docs = store.fetch_all().await.expect("fetch");
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[1]["title"], "Ronin");
        assert!(store.ping().await);
        std::fs::remove_file(path).ok();
    }

    #[tokio::test]
    async fn reads_json_array_export() {
        let path = temp_file("movies.json", "[{\"title\":\"Heat\"},{\"title\":\"Ronin\"}]");
        let docs = NdjsonMovieStore::new(&path).fetch_all().await.expect("fetch");
        assert_eq!(docs.len(), 2);
        std::fs::remove_file(path).ok();
    }

    #[tokio::test]
    async fn malformed_line_fails_the_fetch() {
        let path = temp_file("broken.ndjson", "{\"title\":\"Heat\"}\n{oops\n");
        let err = NdjsonMovieStore::new(&path).fetch_all().await.unwrap_err();
        assert!(err.to_string().contains("line 2"));
        std::fs::remove_file(path).ok();
    }

    #[tokio::test]
    async fn missing_file_is_an_error() {
        let store = NdjsonMovieStore::new("/definitely/not/here.ndjson");
        assert!(store.fetch_all().await.is_err());
        assert!(!store.ping().await);
    }
}
