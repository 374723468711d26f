use diesel::prelude::*;

use crate::domain::history::{HistoryEntry, NewHistoryEntry};
use crate::models::history::{HistoryEntry as DbHistoryEntry, NewHistoryEntry as DbNewHistoryEntry};
use crate::repository::{
    DieselRepository, HistoryListQuery, HistoryReader, HistoryWriter, RepositoryResult,
};

impl HistoryReader for DieselRepository {
    fn list_history(&self, query: HistoryListQuery) -> RepositoryResult<Vec<HistoryEntry>> {
        use crate::schema::history;

        let mut conn = self.conn()?;

        let mut rows = history::table.into_boxed::<diesel::sqlite::Sqlite>();
        if let Some(user_id) = &query.user_id {
            rows = rows.filter(history::user_id.eq(user_id.clone()));
        }
        if let Some(table) = query.table_modified {
            rows = rows.filter(history::table_modified.eq(table.as_str()));
        }
        if let Some(from) = query.from {
            rows = rows.filter(history::timestamp.ge(from));
        }
        if let Some(to) = query.to {
            rows = rows.filter(history::timestamp.le(to));
        }

        let entries = rows
            .order((history::timestamp.desc(), history::id.desc()))
            .offset(query.offset)
            .limit(query.limit)
            .select(DbHistoryEntry::as_select())
            .load::<DbHistoryEntry>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<HistoryEntry>, _>>()?;

        Ok(entries)
    }
}

impl HistoryWriter for DieselRepository {
    fn log_history(&self, entry: &NewHistoryEntry) -> RepositoryResult<usize> {
        use crate::schema::history;

        let mut conn = self.conn()?;
        let db_entry: DbNewHistoryEntry = entry.clone().into();

        let affected = diesel::insert_into(history::table)
            .values(db_entry)
            .execute(&mut conn)?;

        Ok(affected)
    }
}
