//! Masking history domain models

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::mapping::AliasMapping;

/// One mask call and, once it happened, its restoration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub id: i64,
    pub original_query: String,
    pub masked_query: String,
    pub mapping: AliasMapping,
    pub restored_query: Option<String>,
    #[serde(with = "time::serde::timestamp")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::timestamp::option")]
    pub restored_at: Option<OffsetDateTime>,
}

impl HistoryRecord {
    pub fn is_restored(&self) -> bool {
        self.restored_query.is_some()
    }
}

/// Listing row: the start of the original statement and its timestamps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistorySummary {
    pub id: i64,
    pub preview: String,
    #[serde(with = "time::serde::timestamp")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::timestamp::option")]
    pub restored_at: Option<OffsetDateTime>,
}
