use crate::domain::category::Category;
use crate::domain::types::{CategoryId, HistoryOperation, TableName, UserId};
use crate::forms::categories::CategoryFormPayload;
use crate::repository::{CategoryReader, CategoryWriter, HistoryWriter};
use crate::services::record_history;

use super::{ServiceError, ServiceResult};

pub const CATEGORY_NOT_FOUND: &str = "Category not found";

fn category_id(raw: i32) -> ServiceResult<CategoryId> {
    CategoryId::new(raw).map_err(|_| ServiceError::NotFound(CATEGORY_NOT_FOUND))
}

pub fn list_categories<R>(repo: &R) -> ServiceResult<Vec<Category>>
where
    R: CategoryReader,
{
    repo.list_categories().map_err(|e| {
        log::error!("Failed to list categories: {e}");
        ServiceError::Internal
    })
}

pub fn get_category<R>(category_id_raw: i32, repo: &R) -> ServiceResult<Category>
where
    R: CategoryReader,
{
    let category_id = category_id(category_id_raw)?;

    match repo.get_category_by_id(category_id) {
        Ok(Some(category)) => Ok(category),
        Ok(None) => Err(ServiceError::NotFound(CATEGORY_NOT_FOUND)),
        Err(e) => {
            log::error!("Failed to get category: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn create_category<R>(
    payload: CategoryFormPayload,
    user: &UserId,
    repo: &R,
) -> ServiceResult<Category>
where
    R: CategoryWriter + HistoryWriter,
{
    let category = repo.create_category(&payload.category).map_err(|e| {
        log::error!("Failed to create category: {e}");
        ServiceError::Internal
    })?;

    record_history(
        repo,
        HistoryOperation::Add,
        TableName::Category,
        user,
        category.id.get(),
    );
    Ok(category)
}

pub fn update_category<R>(
    category_id_raw: i32,
    payload: CategoryFormPayload,
    user: &UserId,
    repo: &R,
) -> ServiceResult<Category>
where
    R: CategoryWriter + HistoryWriter,
{
    let category_id = category_id(category_id_raw)?;

    let category = match repo.update_category(category_id, &payload.category) {
        Ok(Some(category)) => category,
        Ok(None) => return Err(ServiceError::NotFound(CATEGORY_NOT_FOUND)),
        Err(e) => {
            log::error!("Failed to update category: {e}");
            return Err(ServiceError::Internal);
        }
    };

    record_history(
        repo,
        HistoryOperation::Update,
        TableName::Category,
        user,
        category.id.get(),
    );
    Ok(category)
}

/// Delete a category. Its items stay in place without a category.
pub fn delete_category<R>(category_id_raw: i32, user: &UserId, repo: &R) -> ServiceResult<()>
where
    R: CategoryWriter + HistoryWriter,
{
    let category_id = category_id(category_id_raw)?;

    match repo.delete_category(category_id) {
        Ok(0) => return Err(ServiceError::NotFound(CATEGORY_NOT_FOUND)),
        Ok(_) => {}
        Err(e) => {
            log::error!("Failed to delete category: {e}");
            return Err(ServiceError::Internal);
        }
    }

    record_history(
        repo,
        HistoryOperation::Delete,
        TableName::Category,
        user,
        category_id.get(),
    );
    Ok(())
}
