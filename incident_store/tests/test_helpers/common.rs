use incident_store::{DatabaseConfig, DatabaseManager, StoreError};
use log::Level;

/// Creates a database manager backed by a fresh in-memory database
pub fn create_test_database() -> Result<DatabaseManager, StoreError> {
    // Safe to call from every test, only the first call initialises the logger
    ::common::configure_logging(Level::Debug);
    DatabaseManager::new(&DatabaseConfig::SqliteInMemory)
}
