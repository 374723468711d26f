use diesel::prelude::*;

use crate::domain::item::{Item as DomainItem, NewItem as DomainNewItem};
use crate::domain::types::{
    CategoryId, Description, ImageReference, ItemName, TypeConstraintError,
};

/// Diesel model representing the `items` table.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::items)]
pub struct Item {
    pub id: i32,
    pub name: String,
    pub category_id: Option<i32>,
    pub description: Option<String>,
    pub image_file: Option<String>,
}

/// Insertable/patchable form of [`Item`].
///
/// `image_file` is deliberately absent: it is only ever written through
/// the dedicated single-column image update.
#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::items)]
#[diesel(treat_none_as_null = true)]
pub struct NewItem {
    pub name: String,
    pub category_id: Option<i32>,
    pub description: Option<String>,
}

impl TryFrom<Item> for DomainItem {
    type Error = TypeConstraintError;

    fn try_from(item: Item) -> Result<Self, Self::Error> {
        Ok(Self {
            id: item.id.try_into()?,
            name: ItemName::new(item.name)?,
            category_id: item.category_id.map(CategoryId::new).transpose()?,
            description: item
                .description
                .filter(|d| !d.trim().is_empty())
                .map(Description::new)
                .transpose()?,
            image_file: item
                .image_file
                .filter(|f| !f.trim().is_empty())
                .map(ImageReference::new)
                .transpose()?,
        })
    }
}

impl From<DomainNewItem> for NewItem {
    fn from(item: DomainNewItem) -> Self {
        Self {
            name: item.name.into_inner(),
            category_id: item.category_id.map(CategoryId::get),
            description: item.description.map(Description::into_inner),
        }
    }
}
