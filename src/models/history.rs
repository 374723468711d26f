use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::history::{HistoryEntry as DomainHistoryEntry, NewHistoryEntry as DomainNew};
use crate::domain::types::{HistoryOperation, TableName, TypeConstraintError, UserId};

/// Diesel model representing the `history` table.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::history)]
pub struct HistoryEntry {
    pub id: String,
    pub table_operation: String,
    pub table_modified: String,
    pub timestamp: NaiveDateTime,
    pub user_id: String,
    pub modified_id: Option<i32>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::history)]
pub struct NewHistoryEntry {
    pub id: String,
    pub table_operation: String,
    pub table_modified: String,
    pub timestamp: NaiveDateTime,
    pub user_id: String,
    pub modified_id: Option<i32>,
}

impl TryFrom<HistoryEntry> for DomainHistoryEntry {
    type Error = TypeConstraintError;

    fn try_from(entry: HistoryEntry) -> Result<Self, Self::Error> {
        Ok(Self {
            id: entry.id,
            table_operation: HistoryOperation::try_from(entry.table_operation.as_str())?,
            table_modified: TableName::try_from(entry.table_modified.as_str())?,
            timestamp: entry.timestamp,
            user_id: UserId::new(entry.user_id)?,
            modified_id: entry.modified_id,
        })
    }
}

impl From<DomainNew> for NewHistoryEntry {
    fn from(entry: DomainNew) -> Self {
        Self {
            id: entry.id,
            table_operation: entry.table_operation.as_str().to_string(),
            table_modified: entry.table_modified.as_str().to_string(),
            timestamp: entry.timestamp,
            user_id: entry.user_id.into_inner(),
            modified_id: entry.modified_id,
        }
    }
}
