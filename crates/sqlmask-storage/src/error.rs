//! Error types for sqlmask-storage

use thiserror::Error;

pub type Result<T> = std::result::Result<T, StorageError>;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Stored mapping is unreadable: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Stored timestamp is out of range: {0}")]
    Timestamp(#[from] time::error::ComponentRange),

    #[error("History record not found: {0}")]
    NotFound(i64),
}

impl StorageError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StorageError::NotFound(_))
    }
}
