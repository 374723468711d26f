use serde::{Deserialize, Serialize};

use crate::domain::types::{CategoryId, Description, ImageReference, ItemId, ItemName};

/// An inventory item.
///
/// `image_file` holds either the local filename written by the upload
/// endpoint or the remote object id written back by the upload reconciler.
/// Both resolve to a URL through the configured image base URL.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Item {
    pub id: ItemId,
    pub name: ItemName,
    pub category_id: Option<CategoryId>,
    pub description: Option<Description>,
    pub image_file: Option<ImageReference>,
}

/// Information required to create or update an [`Item`].
///
/// Images are attached separately through the upload flow.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewItem {
    pub name: ItemName,
    pub category_id: Option<CategoryId>,
    pub description: Option<Description>,
}
