use crate::domain::history::HistoryEntry;
use crate::domain::types::UserId;
use crate::forms::history::HistoryQueryForm;
use crate::models::config::ServerConfig;
use crate::repository::{HistoryListQuery, HistoryReader};

use super::{ServiceError, ServiceResult};

pub const ADMIN_REQUIRED: &str = "admin user required to access history";

/// History entries matching the query, newest first. Admins only.
pub fn list_history<R>(
    form: HistoryQueryForm,
    user: &UserId,
    config: &ServerConfig,
    repo: &R,
) -> ServiceResult<Vec<HistoryEntry>>
where
    R: HistoryReader,
{
    if !config.is_admin(user.as_str()) {
        return Err(ServiceError::Forbidden(ADMIN_REQUIRED));
    }

    let query = HistoryListQuery::try_from(form)?;

    repo.list_history(query).map_err(|e| {
        log::error!("Failed to list history: {e}");
        ServiceError::Internal
    })
}
