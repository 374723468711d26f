use serde::{Deserialize, Serialize};

use crate::domain::types::{CategoryId, ItemCount};

/// Label used for items that do not belong to any category.
pub const UNASSIGNED_CATEGORY_NAME: &str = "Unassigned";

/// Item count for one category, or for unassigned items when
/// `category_id` is `None`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InventoryEntry {
    pub category_id: Option<CategoryId>,
    pub category_name: String,
    pub item_count: ItemCount,
}
