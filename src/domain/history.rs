use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{HistoryOperation, TableName, UserId};

/// Append-only audit record of a mutating API call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryEntry {
    pub id: String,
    pub table_operation: HistoryOperation,
    pub table_modified: TableName,
    pub timestamp: NaiveDateTime,
    pub user_id: UserId,
    pub modified_id: Option<i32>,
}

/// A history record that has not been persisted yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewHistoryEntry {
    pub id: String,
    pub table_operation: HistoryOperation,
    pub table_modified: TableName,
    pub timestamp: NaiveDateTime,
    pub user_id: UserId,
    pub modified_id: Option<i32>,
}

impl NewHistoryEntry {
    /// Build an entry keyed as `<table>:<operation>:<user>:<timestamp>`.
    ///
    /// The key keeps plain-text searches on the primary key convenient while
    /// the structured columns serve the filtered queries.
    pub fn new(
        table_operation: HistoryOperation,
        table_modified: TableName,
        user_id: UserId,
        modified_id: Option<i32>,
        timestamp: NaiveDateTime,
    ) -> Self {
        let id = format!(
            "{}:{}:{}:{}",
            table_modified.as_str(),
            table_operation.as_str(),
            user_id.as_str(),
            timestamp.format("%Y%m%dT%H%M%S%f"),
        );
        Self {
            id,
            table_operation,
            table_modified,
            timestamp,
            user_id,
            modified_id,
        }
    }
}
