use crate::error::StoreError;
use rusqlite::Connection;
use std::fs;
use std::path::Path;

pub mod schema;
pub mod sqlite_incident_repo;
pub mod sqlite_repository;
pub mod sqlite_ticket_repo;
pub mod sqlite_user_repo;

pub use sqlite_incident_repo::{IncidentTable, SqliteIncidentRepository};
pub use sqlite_repository::{SqliteRepository, TableSchema};
pub use sqlite_ticket_repo::{SqliteTicketRepository, TicketTable};
pub use sqlite_user_repo::{SqliteUserRepository, UserTable};

/// Opens the database file, creating any missing parent directories first.
pub(crate) fn create_connection(dbms_path: &Path) -> Result<Connection, StoreError> {
    if let Some(parent) = dbms_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }
    let connection = Connection::open(dbms_path)?;
    Ok(connection)
}

#[cfg(test)]
pub(crate) mod tests;
