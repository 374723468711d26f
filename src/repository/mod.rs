use chrono::NaiveDateTime;

use crate::db::{DbConnection, DbPool};
use crate::domain::category::{Category, NewCategory};
use crate::domain::history::{HistoryEntry, NewHistoryEntry};
use crate::domain::item::{Item, NewItem};
use crate::domain::types::{CategoryId, ImageReference, ItemCount, ItemId, TableName};

pub mod category;
pub mod errors;
pub mod history;
pub mod item;

pub use errors::{RepositoryError, RepositoryResult};

/// Default number of history rows returned per page.
pub const DEFAULT_HISTORY_LIMIT: i64 = 100;
/// Upper bound accepted for a single history page.
pub const MAX_HISTORY_LIMIT: i64 = 1000;

/// Repository implementation backed by Diesel and SQLite.
///
/// The underlying `r2d2::Pool` is cheap to clone, allowing the repository to
/// be passed around freely between handlers and upload workers.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository from an established database pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get a pooled database connection.
    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Query parameters used when listing items.
#[derive(Debug, Clone, Default)]
pub struct ItemListQuery {
    /// Filter by category identifier.
    pub category_id: Option<CategoryId>,
}

impl ItemListQuery {
    pub fn category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }
}

/// Query parameters for the history log.
///
/// Timestamp bounds are inclusive. Results are ordered newest first.
#[derive(Debug, Clone)]
pub struct HistoryListQuery {
    pub user_id: Option<String>,
    pub table_modified: Option<TableName>,
    pub from: Option<NaiveDateTime>,
    pub to: Option<NaiveDateTime>,
    pub limit: i64,
    pub offset: i64,
}

impl Default for HistoryListQuery {
    fn default() -> Self {
        Self {
            user_id: None,
            table_modified: None,
            from: None,
            to: None,
            limit: DEFAULT_HISTORY_LIMIT,
            offset: 0,
        }
    }
}

impl HistoryListQuery {
    pub fn user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }
    pub fn table(mut self, table: TableName) -> Self {
        self.table_modified = Some(table);
        self
    }
    pub fn between(mut self, from: Option<NaiveDateTime>, to: Option<NaiveDateTime>) -> Self {
        self.from = from;
        self.to = to;
        self
    }
    pub fn paginate(mut self, limit: i64, offset: i64) -> Self {
        self.limit = limit;
        self.offset = offset;
        self
    }
}

/// Read-only operations for category entities.
pub trait CategoryReader {
    /// List every category ordered by identifier.
    fn list_categories(&self) -> RepositoryResult<Vec<Category>>;
    /// Retrieve a category by its identifier.
    fn get_category_by_id(&self, id: CategoryId) -> RepositoryResult<Option<Category>>;
}

/// Write operations for category entities.
pub trait CategoryWriter {
    /// Persist a new category and return the stored row.
    fn create_category(&self, category: &NewCategory) -> RepositoryResult<Category>;
    /// Overwrite name and description; `None` when the category does not exist.
    fn update_category(
        &self,
        id: CategoryId,
        category: &NewCategory,
    ) -> RepositoryResult<Option<Category>>;
    /// Delete a category, detaching its items first.
    fn delete_category(&self, id: CategoryId) -> RepositoryResult<usize>;
}

/// Read-only operations for item entities.
pub trait ItemReader {
    /// List items matching the supplied query, ordered by identifier.
    fn list_items(&self, query: ItemListQuery) -> RepositoryResult<Vec<Item>>;
    /// Retrieve an item by its identifier.
    fn get_item_by_id(&self, id: ItemId) -> RepositoryResult<Option<Item>>;
    /// Number of items per category; `None` groups unassigned items.
    fn count_items_by_category(&self) -> RepositoryResult<Vec<(Option<CategoryId>, ItemCount)>>;
}

/// Write operations for item entities.
pub trait ItemWriter {
    /// Persist a new item and return the stored row.
    fn create_item(&self, item: &NewItem) -> RepositoryResult<Item>;
    /// Overwrite name, category and description; `None` when missing.
    fn update_item(&self, id: ItemId, item: &NewItem) -> RepositoryResult<Option<Item>>;
    /// Delete an item by id.
    fn delete_item(&self, id: ItemId) -> RepositoryResult<usize>;
    /// Set `image_file` with a single-row update.
    ///
    /// Returns `false` when the item no longer exists; no row is created.
    fn update_item_image_file(
        &self,
        id: ItemId,
        image_file: &ImageReference,
    ) -> RepositoryResult<bool>;
}

/// Read-only access to the audit log.
pub trait HistoryReader {
    fn list_history(&self, query: HistoryListQuery) -> RepositoryResult<Vec<HistoryEntry>>;
}

/// Append-only access to the audit log.
pub trait HistoryWriter {
    fn log_history(&self, entry: &NewHistoryEntry) -> RepositoryResult<usize>;
}
