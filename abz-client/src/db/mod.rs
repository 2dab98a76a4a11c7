//! Database access for abz-client
//!
//! A single SQLite file holds the status log (`filelog` table).

pub mod filelog;

pub use filelog::StatusStore;

use abz_common::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteSynchronous};
use std::path::Path;

/// Open (creating if needed) the status database
///
/// One connection, `synchronous = FULL`: every insert is on disk before the
/// next file starts.
pub async fn init_database_pool(db_path: &Path) -> Result<SqlitePool> {
    // Ensure parent directory exists
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    tracing::debug!("Opening status database: {}", db_path.display());

    let options = SqliteConnectOptions::new()
        .filename(db_path)
        .create_if_missing(true)
        .synchronous(SqliteSynchronous::Full);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await?;

    init_tables(&pool).await?;

    Ok(pool)
}

/// Create the status log table if it doesn't exist
///
/// The layout matches databases written by earlier clients, which did not
/// declare a key: rows are ordered by `rowid`.
async fn init_tables(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS filelog (
            filename TEXT,
            reason TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS filelog_filename ON filelog (filename)")
        .execute(pool)
        .await?;

    tracing::debug!("Database tables initialized (filelog)");

    Ok(())
}
