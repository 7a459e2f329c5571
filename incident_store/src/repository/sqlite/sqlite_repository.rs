use std::marker::PhantomData;
use std::sync::MutexGuard;

use chrono::NaiveDateTime;
use log::debug;
use rusqlite::types::{ToSql, ValueRef};
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::error::StoreError;
use crate::repository::record_repository::RecordRepository;
use crate::repository::SharedSqliteConnection;
use crate::types::parse_timestamp;

/// Declares how one entity maps onto its table.
///
/// The column and table names end up verbatim in SQL text, so they must be
/// compile time constants; values always travel as bound parameters.
pub trait TableSchema {
    type Record;
    type NewRecord;
    type Key: ToSql + ?Sized;

    const TABLE: &'static str;
    /// Columns selected for `Record`, in the order `from_row()` reads them
    const COLUMNS: &'static [&'static str];
    /// Columns written by `insert()`, in the order `insert_params()` yields them
    const INSERT_COLUMNS: &'static [&'static str];
    /// Unique column used to address a single row
    const KEY_COLUMN: &'static str;
    /// The one column `update_status()` may change
    const MUTABLE_COLUMN: &'static str;
    const ORDER_BY: &'static str;

    fn insert_params(record: &Self::NewRecord) -> Vec<&dyn ToSql>;

    ///
    /// # Errors
    /// Fails if a column can not be converted into the field type
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self::Record>;
}

/// The one SQLite repository implementation, instantiated per entity with a `TableSchema`.
pub struct SqliteRepository<S: TableSchema> {
    connection: SharedSqliteConnection,
    schema: PhantomData<fn() -> S>,
}

impl<S: TableSchema> SqliteRepository<S> {
    pub fn new(connection: SharedSqliteConnection) -> Self {
        Self {
            connection,
            schema: PhantomData,
        }
    }

    pub(crate) fn lock(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.connection
            .lock()
            .map_err(|_| StoreError::LockPoisoned)
    }

    fn select_sql() -> String {
        format!("SELECT {} FROM {}", S::COLUMNS.join(", "), S::TABLE)
    }
}

impl<S: TableSchema> RecordRepository for SqliteRepository<S> {
    type Record = S::Record;
    type NewRecord = S::NewRecord;
    type Key = S::Key;

    fn insert(&self, record: &S::NewRecord) -> Result<i64, StoreError> {
        let placeholders = vec!["?"; S::INSERT_COLUMNS.len()].join(", ");
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({placeholders})",
            S::TABLE,
            S::INSERT_COLUMNS.join(", ")
        );

        let conn = self.lock()?;
        conn.execute(&sql, S::insert_params(record).as_slice())?;
        let id = conn.last_insert_rowid();
        debug!("Inserted row {id} into {}", S::TABLE);
        Ok(id)
    }

    fn get_all(&self) -> Result<Vec<S::Record>, StoreError> {
        let sql = format!("{} ORDER BY {}", Self::select_sql(), S::ORDER_BY);
        let conn = self.lock()?;
        let mut stmt = conn.prepare(&sql)?;
        let records = stmt
            .query_map([], |row| S::from_row(row))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(records)
    }

    fn find_by_key(&self, key: &S::Key) -> Result<Option<S::Record>, StoreError> {
        let sql = format!("{} WHERE {} = ?1", Self::select_sql(), S::KEY_COLUMN);
        let conn = self.lock()?;
        let record = conn
            .query_row(&sql, params![key], |row| S::from_row(row))
            .optional()?;
        Ok(record)
    }

    fn update_status(&self, key: &S::Key, new_value: &str) -> Result<usize, StoreError> {
        let sql = format!(
            "UPDATE {} SET {} = ?1 WHERE {} = ?2",
            S::TABLE,
            S::MUTABLE_COLUMN,
            S::KEY_COLUMN
        );
        let conn = self.lock()?;
        let updated = conn.execute(&sql, params![new_value, key])?;
        debug!(
            "Set {}.{} = {new_value}, {updated} row(s) updated",
            S::TABLE,
            S::MUTABLE_COLUMN
        );
        Ok(updated)
    }

    fn delete(&self, key: &S::Key) -> Result<usize, StoreError> {
        let sql = format!("DELETE FROM {} WHERE {} = ?1", S::TABLE, S::KEY_COLUMN);
        let conn = self.lock()?;
        let deleted = conn.execute(&sql, params![key])?;
        debug!("Deleted {deleted} row(s) from {}", S::TABLE);
        Ok(deleted)
    }

    fn count(&self) -> Result<i64, StoreError> {
        let conn = self.lock()?;
        let sql = format!("SELECT COUNT(*) FROM {}", S::TABLE);
        let count = conn.query_row(&sql, [], |row| row.get(0))?;
        Ok(count)
    }
}

/// Reads a `created_at` style column without failing on values a bulk load
/// may have put there.
pub(crate) fn timestamp_column(
    row: &Row<'_>,
    idx: usize,
) -> rusqlite::Result<Option<NaiveDateTime>> {
    Ok(match row.get_ref(idx)? {
        ValueRef::Text(text) => std::str::from_utf8(text).ok().and_then(parse_timestamp),
        _ => None,
    })
}
