use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::item::NewItem;
use crate::domain::types::{CategoryId, ItemName, TypeConstraintError};
use crate::forms::optional_description;

/// JSON body accepted when creating or replacing an item.
///
/// `image_file` is not accepted here; images are attached through the
/// upload endpoint only.
#[derive(Deserialize, Validate)]
pub struct ItemForm {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[serde(default)]
    pub category_id: Option<i32>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ItemFormPayload {
    pub item: NewItem,
}

#[derive(Debug, Error)]
pub enum ItemFormError {
    #[error("Item validation failed: {0}")]
    Validation(String),
    #[error("Item contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for ItemFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for ItemFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<ItemForm> for ItemFormPayload {
    type Error = ItemFormError;

    fn try_from(value: ItemForm) -> Result<Self, Self::Error> {
        value.validate()?;
        Ok(Self {
            item: NewItem {
                name: ItemName::new(value.name)?,
                category_id: value.category_id.map(CategoryId::new).transpose()?,
                description: optional_description(value.description),
            },
        })
    }
}

/// Query string of the item listing.
#[derive(Debug, Deserialize)]
pub struct ItemListParams {
    pub category_id: Option<i32>,
}
