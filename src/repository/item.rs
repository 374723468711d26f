use diesel::prelude::*;

use crate::domain::item::{Item, NewItem};
use crate::domain::types::{CategoryId, ImageReference, ItemCount, ItemId};
use crate::models::item::{Item as DbItem, NewItem as DbNewItem};
use crate::repository::{DieselRepository, ItemListQuery, ItemReader, ItemWriter, RepositoryResult};

impl ItemReader for DieselRepository {
    fn list_items(&self, query: ItemListQuery) -> RepositoryResult<Vec<Item>> {
        use crate::schema::items;

        let mut conn = self.conn()?;

        let mut rows = items::table.into_boxed::<diesel::sqlite::Sqlite>();
        if let Some(category_id) = query.category_id {
            rows = rows.filter(items::category_id.eq(Some(category_id.get())));
        }

        let items = rows
            .order(items::id.asc())
            .select(DbItem::as_select())
            .load::<DbItem>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Item>, _>>()?;

        Ok(items)
    }

    fn get_item_by_id(&self, id: ItemId) -> RepositoryResult<Option<Item>> {
        use crate::schema::items;

        let mut conn = self.conn()?;

        let item = items::table
            .filter(items::id.eq(id.get()))
            .select(DbItem::as_select())
            .first::<DbItem>(&mut conn)
            .optional()?;

        Ok(item.map(TryInto::try_into).transpose()?)
    }

    fn count_items_by_category(&self) -> RepositoryResult<Vec<(Option<CategoryId>, ItemCount)>> {
        use crate::schema::items;

        let mut conn = self.conn()?;

        let rows: Vec<(Option<i32>, i64)> = items::table
            .group_by(items::category_id)
            .select((items::category_id, diesel::dsl::count_star()))
            .load(&mut conn)?;

        let counts = rows
            .into_iter()
            .map(|(category_id, count)| {
                Ok((
                    category_id.map(CategoryId::new).transpose()?,
                    ItemCount::new(count)?,
                ))
            })
            .collect::<RepositoryResult<Vec<_>>>()?;

        Ok(counts)
    }
}

impl ItemWriter for DieselRepository {
    fn create_item(&self, item: &NewItem) -> RepositoryResult<Item> {
        use crate::schema::items;

        let mut conn = self.conn()?;
        let db_item: DbNewItem = item.clone().into();

        let created = diesel::insert_into(items::table)
            .values(db_item)
            .returning(DbItem::as_returning())
            .get_result::<DbItem>(&mut conn)?;

        Ok(created.try_into()?)
    }

    fn update_item(&self, id: ItemId, item: &NewItem) -> RepositoryResult<Option<Item>> {
        use crate::schema::items;

        let mut conn = self.conn()?;
        let db_item: DbNewItem = item.clone().into();

        let updated = diesel::update(items::table.filter(items::id.eq(id.get())))
            .set(db_item)
            .returning(DbItem::as_returning())
            .get_result::<DbItem>(&mut conn)
            .optional()?;

        Ok(updated.map(TryInto::try_into).transpose()?)
    }

    fn delete_item(&self, id: ItemId) -> RepositoryResult<usize> {
        use crate::schema::items;

        let mut conn = self.conn()?;

        let affected = diesel::delete(items::table.filter(items::id.eq(id.get()))).execute(&mut conn)?;

        Ok(affected)
    }

    fn update_item_image_file(
        &self,
        id: ItemId,
        image_file: &ImageReference,
    ) -> RepositoryResult<bool> {
        use crate::schema::items;

        let mut conn = self.conn()?;

        let affected = diesel::update(items::table.filter(items::id.eq(id.get())))
            .set(items::image_file.eq(image_file.as_str()))
            .execute(&mut conn)?;

        Ok(affected > 0)
    }
}
