use crate::error::StoreError;

/// The CRUD contract shared by incidents, tickets and users.
///
/// Every method issues a single statement which is committed before it returns.
/// Lookups by a key that matches nothing are not errors: updates and deletes
/// report `0` affected rows and `find_by_key()` returns `None`.
pub trait RecordRepository: Send + Sync {
    /// The row as read back from the store
    type Record;
    /// The fields needed to create a row; ids and timestamps are assigned by the store
    type NewRecord;
    /// The unique lookup key used by updates and deletes
    type Key: ?Sized;

    ///
    /// Persists a new record and returns the identifier assigned to it.
    ///
    /// # Errors
    /// * `StoreError::ConstraintViolation` if a unique column already holds the value.
    /// * Any other `StoreError` if the statement fails.
    fn insert(&self, record: &Self::NewRecord) -> Result<i64, StoreError>;

    ///
    /// Retrieves every record, in the order declared for the entity.
    ///
    /// # Errors
    /// Returns a `StoreError` if the query fails
    fn get_all(&self) -> Result<Vec<Self::Record>, StoreError>;

    /// # Errors
    /// Returns a `StoreError` if the query fails
    fn find_by_key(&self, key: &Self::Key) -> Result<Option<Self::Record>, StoreError>;

    ///
    /// Replaces the single mutable column of the record identified by `key`,
    /// i.e. `status` for incidents and tickets and `role` for users.
    ///
    /// # Returns
    /// The number of rows updated, `0` or `1`.
    ///
    /// # Errors
    /// Returns a `StoreError` if the statement fails
    fn update_status(&self, key: &Self::Key, new_value: &str) -> Result<usize, StoreError>;

    ///
    /// Removes the record identified by `key`.
    ///
    /// # Returns
    /// The number of rows removed, `0` or `1`.
    ///
    /// # Errors
    /// Returns a `StoreError` if the statement fails
    fn delete(&self, key: &Self::Key) -> Result<usize, StoreError>;

    /// # Errors
    /// Returns a `StoreError` if the query fails
    fn count(&self) -> Result<i64, StoreError>;
}
