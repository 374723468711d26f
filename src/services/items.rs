use crate::domain::item::{Item, NewItem};
use crate::domain::types::{CategoryId, HistoryOperation, ItemId, TableName, UserId};
use crate::forms::items::ItemFormPayload;
use crate::repository::{
    CategoryReader, HistoryWriter, ItemListQuery, ItemReader, ItemWriter,
};
use crate::services::record_history;

use super::{ServiceError, ServiceResult};

pub const ITEM_NOT_FOUND: &str = "Item not found";
pub const UNKNOWN_CATEGORY: &str = "Category does not exist";

pub(crate) fn item_id(raw: i32) -> ServiceResult<ItemId> {
    ItemId::new(raw).map_err(|_| ServiceError::NotFound(ITEM_NOT_FOUND))
}

/// Reject references to categories that do not exist.
fn ensure_category_exists<R>(item: &NewItem, repo: &R) -> ServiceResult<()>
where
    R: CategoryReader,
{
    let Some(category_id) = item.category_id else {
        return Ok(());
    };
    match repo.get_category_by_id(category_id) {
        Ok(Some(_)) => Ok(()),
        Ok(None) => Err(ServiceError::Form(UNKNOWN_CATEGORY.to_string())),
        Err(e) => {
            log::error!("Failed to get category: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// List items, optionally restricted to one category.
///
/// A non-positive category id cannot match anything and yields an empty list.
pub fn list_items<R>(category_id: Option<i32>, repo: &R) -> ServiceResult<Vec<Item>>
where
    R: ItemReader,
{
    let query = match category_id.map(CategoryId::new) {
        None => ItemListQuery::default(),
        Some(Ok(category_id)) => ItemListQuery::default().category(category_id),
        Some(Err(_)) => return Ok(vec![]),
    };

    repo.list_items(query).map_err(|e| {
        log::error!("Failed to list items: {e}");
        ServiceError::Internal
    })
}

pub fn get_item<R>(item_id_raw: i32, repo: &R) -> ServiceResult<Item>
where
    R: ItemReader,
{
    let item_id = item_id(item_id_raw)?;

    match repo.get_item_by_id(item_id) {
        Ok(Some(item)) => Ok(item),
        Ok(None) => Err(ServiceError::NotFound(ITEM_NOT_FOUND)),
        Err(e) => {
            log::error!("Failed to get item: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn create_item<R>(payload: ItemFormPayload, user: &UserId, repo: &R) -> ServiceResult<Item>
where
    R: CategoryReader + ItemWriter + HistoryWriter,
{
    ensure_category_exists(&payload.item, repo)?;

    let item = repo.create_item(&payload.item).map_err(|e| {
        log::error!("Failed to create item: {e}");
        ServiceError::Internal
    })?;

    record_history(repo, HistoryOperation::Add, TableName::Item, user, item.id.get());
    Ok(item)
}

/// Overwrite name, category and description. The stored image is kept.
pub fn update_item<R>(
    item_id_raw: i32,
    payload: ItemFormPayload,
    user: &UserId,
    repo: &R,
) -> ServiceResult<Item>
where
    R: CategoryReader + ItemWriter + HistoryWriter,
{
    let item_id = item_id(item_id_raw)?;
    ensure_category_exists(&payload.item, repo)?;

    let item = match repo.update_item(item_id, &payload.item) {
        Ok(Some(item)) => item,
        Ok(None) => return Err(ServiceError::NotFound(ITEM_NOT_FOUND)),
        Err(e) => {
            log::error!("Failed to update item: {e}");
            return Err(ServiceError::Internal);
        }
    };

    record_history(repo, HistoryOperation::Update, TableName::Item, user, item.id.get());
    Ok(item)
}

pub fn delete_item<R>(item_id_raw: i32, user: &UserId, repo: &R) -> ServiceResult<()>
where
    R: ItemWriter + HistoryWriter,
{
    let item_id = item_id(item_id_raw)?;

    match repo.delete_item(item_id) {
        Ok(0) => return Err(ServiceError::NotFound(ITEM_NOT_FOUND)),
        Ok(_) => {}
        Err(e) => {
            log::error!("Failed to delete item: {e}");
            return Err(ServiceError::Internal);
        }
    }

    record_history(repo, HistoryOperation::Delete, TableName::Item, user, item_id.get());
    Ok(())
}
