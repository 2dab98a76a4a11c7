//! Status store: append-only log of per-path outcomes
//!
//! Records are only ever inserted. The most recently inserted record for a
//! path is authoritative, so the whole log is folded into an in-memory index
//! (`path -> latest tag`) when the store is opened and kept in step on every
//! write.
//!
//! Paths are keyed by their raw OS bytes. Names that are valid UTF-8 are
//! stored as TEXT, matching logs written by older clients; anything else is
//! stored as a BLOB so that no two paths ever share a record.

use crate::models::{Outcome, Reason};
use abz_common::Result;
use sqlx::query::Query;
use sqlx::sqlite::{SqliteArguments, SqlitePool};
use sqlx::{Row, Sqlite};
use std::collections::HashMap;
use std::path::Path;
use tokio::sync::RwLock;

/// Persistent outcome log
pub struct StatusStore {
    pool: SqlitePool,
    /// Latest tag per raw path; `None` is the legacy "done" sentinel
    index: RwLock<HashMap<Vec<u8>, Option<String>>>,
}

impl StatusStore {
    /// Load the existing log into memory
    pub async fn open(pool: SqlitePool) -> Result<Self> {
        let rows = sqlx::query(
            "SELECT CAST(filename AS BLOB) AS filename, reason FROM filelog ORDER BY rowid",
        )
        .fetch_all(&pool)
        .await?;

        let mut index = HashMap::with_capacity(rows.len());
        for row in rows {
            let filename: Option<Vec<u8>> = row.try_get("filename")?;
            let reason: Option<String> = row.try_get("reason")?;
            if let Some(filename) = filename {
                // Later rows overwrite earlier ones
                index.insert(filename, reason);
            }
        }

        tracing::info!(paths = index.len(), "Status log loaded");

        Ok(Self {
            pool,
            index: RwLock::new(index),
        })
    }

    /// Current state of `path`
    pub async fn lookup(&self, path: &Path) -> Outcome {
        match self.index.read().await.get(path_key(path)) {
            Some(tag) => Outcome::from_stored(tag.as_deref()),
            None => Outcome::Unprocessed,
        }
    }

    /// Append a record for `path`
    ///
    /// The insert is committed before this returns.
    pub async fn record_outcome(&self, path: &Path, reason: Reason) -> Result<()> {
        let key = path_key(path);

        bind_filename(sqlx::query("INSERT INTO filelog (filename, reason) VALUES (?, ?)"), key)
            .bind(reason.as_str())
            .execute(&self.pool)
            .await?;

        tracing::debug!(path = %path.display(), reason = %reason, "Outcome recorded");

        self.index
            .write()
            .await
            .insert(key.to_vec(), Some(reason.as_str().to_string()));

        Ok(())
    }

    /// All records for `path` in insertion order
    pub async fn history(&self, path: &Path) -> Result<Vec<Option<String>>> {
        let rows = sqlx::query(
            "SELECT reason FROM filelog WHERE CAST(filename AS BLOB) = ? ORDER BY rowid",
        )
        .bind(path_key(path))
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| row.try_get::<Option<String>, _>("reason").map_err(Into::into))
            .collect()
    }
}

fn path_key(path: &Path) -> &[u8] {
    path.as_os_str().as_encoded_bytes()
}

fn bind_filename<'q>(
    query: Query<'q, Sqlite, SqliteArguments<'q>>,
    key: &'q [u8],
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    match std::str::from_utf8(key) {
        Ok(text) => query.bind(text),
        Err(_) => query.bind(key),
    }
}
