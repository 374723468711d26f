use std::collections::HashMap;

use crate::domain::inventory::{InventoryEntry, UNASSIGNED_CATEGORY_NAME};
use crate::domain::types::ItemCount;
use crate::repository::{CategoryReader, ItemReader};

use super::{ServiceError, ServiceResult};

/// Item counts per category in category id order.
///
/// Every category is listed, including empty ones. Items without a category
/// are reported in a trailing `Unassigned` row, present only when such items
/// exist.
pub fn inventory_summary<R>(repo: &R) -> ServiceResult<Vec<InventoryEntry>>
where
    R: CategoryReader + ItemReader,
{
    let categories = repo.list_categories().map_err(|e| {
        log::error!("Failed to list categories: {e}");
        ServiceError::Internal
    })?;
    let mut counts: HashMap<_, _> = repo
        .count_items_by_category()
        .map_err(|e| {
            log::error!("Failed to count items: {e}");
            ServiceError::Internal
        })?
        .into_iter()
        .collect();

    let zero = ItemCount::new(0)?;
    let mut summary: Vec<InventoryEntry> = categories
        .into_iter()
        .map(|category| InventoryEntry {
            category_id: Some(category.id),
            item_count: counts.remove(&Some(category.id)).unwrap_or(zero),
            category_name: category.name.into_inner(),
        })
        .collect();

    if let Some(unassigned) = counts.remove(&None).filter(|count| count.get() > 0) {
        summary.push(InventoryEntry {
            category_id: None,
            category_name: UNASSIGNED_CATEGORY_NAME.to_string(),
            item_count: unassigned,
        });
    }

    Ok(summary)
}
