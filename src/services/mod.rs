//! Framework-independent business logic invoked by the HTTP routes.

use chrono::Utc;

use crate::domain::history::NewHistoryEntry;
use crate::domain::types::{HistoryOperation, TableName, UserId};
use crate::repository::HistoryWriter;

pub mod categories;
pub mod errors;
pub mod history;
pub mod images;
pub mod inventory;
pub mod items;

pub use errors::{ServiceError, ServiceResult};

/// Append an audit entry for a completed mutation.
///
/// The mutation has already been committed, so a failed history write is
/// logged and does not fail the request.
pub(crate) fn record_history<R>(
    repo: &R,
    operation: HistoryOperation,
    table: TableName,
    user: &UserId,
    modified_id: i32,
) where
    R: HistoryWriter,
{
    let entry = NewHistoryEntry::new(
        operation,
        table,
        user.clone(),
        Some(modified_id),
        Utc::now().naive_utc(),
    );
    if let Err(e) = repo.log_history(&entry) {
        log::error!("Failed to record history entry {}: {e}", entry.id);
    }
}
