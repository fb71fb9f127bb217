//! Database operations

use std::path::PathBuf;

use sqlmask_core::{AliasMapping, HistoryRecord, HistorySummary, MaskResult};
use sqlx::Row;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use time::OffsetDateTime;
use tracing::debug;

use crate::{Result, StorageError};

const MIGRATION: &str = "
CREATE TABLE IF NOT EXISTS query_history (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    original_query TEXT NOT NULL,
    masked_query TEXT NOT NULL,
    mapping TEXT NOT NULL,
    restored_query TEXT,
    created_at INTEGER NOT NULL,
    restored_at INTEGER
)";

/// Main storage interface
#[derive(Clone)]
pub struct Storage {
    pool: SqlitePool,
}

impl Storage {
    /// Open (or create) the history database and run migrations.
    ///
    /// `None` uses `history.db` under the platform data directory.
    pub async fn new(db_path: Option<PathBuf>) -> Result<Self> {
        let path = db_path.unwrap_or_else(Self::default_db_path);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let options = SqliteConnectOptions::new()
            .filename(&path)
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        sqlx::query(MIGRATION).execute(&pool).await?;
        debug!(path = %path.display(), "history database ready");

        Ok(Self { pool })
    }

    pub fn default_db_path() -> PathBuf {
        if let Some(dirs) = directories::ProjectDirs::from("com", "sqlmask", "sqlmask") {
            dirs.data_dir().join("history.db")
        } else {
            PathBuf::from("~/.sqlmask/history.db")
        }
    }

    /// Record a mask call and return its history id.
    pub async fn save_masking(&self, original: &str, result: &MaskResult) -> Result<i64> {
        let mapping = serde_json::to_string(&result.mapping)?;

        let done = sqlx::query(
            "INSERT INTO query_history (original_query, masked_query, mapping, created_at)
             VALUES (?, ?, ?, ?)",
        )
        .bind(original)
        .bind(&result.masked)
        .bind(mapping)
        .bind(OffsetDateTime::now_utc().unix_timestamp())
        .execute(&self.pool)
        .await?;

        let id = done.last_insert_rowid();
        debug!(id, aliases = result.mapping.len(), "saved masking");
        Ok(id)
    }

    /// Attach restored text to an existing record; a later restore replaces
    /// an earlier one.
    pub async fn save_restoration(&self, id: i64, restored: &str) -> Result<()> {
        let done =
            sqlx::query("UPDATE query_history SET restored_query = ?, restored_at = ? WHERE id = ?")
                .bind(restored)
                .bind(OffsetDateTime::now_utc().unix_timestamp())
                .bind(id)
                .execute(&self.pool)
                .await?;

        if done.rows_affected() == 0 {
            return Err(StorageError::NotFound(id));
        }
        debug!(id, "saved restoration");
        Ok(())
    }

    pub async fn get_history(&self, id: i64) -> Result<HistoryRecord> {
        let row = sqlx::query(
            "SELECT id, original_query, masked_query, mapping, restored_query, created_at, restored_at
             FROM query_history WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StorageError::NotFound(id))?;

        record_from_row(&row)
    }

    /// Mapping of a stored record, for restoring edited text.
    pub async fn get_mapping(&self, id: i64) -> Result<AliasMapping> {
        let mapping: String = sqlx::query_scalar("SELECT mapping FROM query_history WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StorageError::NotFound(id))?;

        Ok(serde_json::from_str(&mapping)?)
    }

    /// All records, newest first, with the first `preview_chars` characters
    /// of the original statement.
    pub async fn list_history(&self, preview_chars: usize) -> Result<Vec<HistorySummary>> {
        let rows = sqlx::query(
            "SELECT id, substr(original_query, 1, ?) AS preview, created_at, restored_at
             FROM query_history ORDER BY id DESC",
        )
        .bind(i64::try_from(preview_chars).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| -> Result<HistorySummary> {
                Ok(HistorySummary {
                    id: row.try_get("id")?,
                    preview: row.try_get("preview")?,
                    created_at: timestamp(row.try_get("created_at")?)?,
                    restored_at: row
                        .try_get::<Option<i64>, _>("restored_at")?
                        .map(timestamp)
                        .transpose()?,
                })
            })
            .collect()
    }

    pub async fn delete_history(&self, id: i64) -> Result<()> {
        let done = sqlx::query("DELETE FROM query_history WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if done.rows_affected() == 0 {
            return Err(StorageError::NotFound(id));
        }
        Ok(())
    }
}

fn record_from_row(row: &SqliteRow) -> Result<HistoryRecord> {
    let mapping: String = row.try_get("mapping")?;

    Ok(HistoryRecord {
        id: row.try_get("id")?,
        original_query: row.try_get("original_query")?,
        masked_query: row.try_get("masked_query")?,
        mapping: serde_json::from_str(&mapping)?,
        restored_query: row.try_get("restored_query")?,
        created_at: timestamp(row.try_get("created_at")?)?,
        restored_at: row
            .try_get::<Option<i64>, _>("restored_at")?
            .map(timestamp)
            .transpose()?,
    })
}

fn timestamp(secs: i64) -> Result<OffsetDateTime> {
    Ok(OffsetDateTime::from_unix_timestamp(secs)?)
}
