use crate::error::StoreError;
use crate::loader::BulkLoader;
use crate::repository::sqlite::schema::ensure_schema;
use crate::repository::sqlite::{
    self, SqliteIncidentRepository, SqliteTicketRepository, SqliteUserRepository,
};
use crate::repository::SharedSqliteConnection;
use log::debug;
use rusqlite::Connection;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Represents parameters for initializing the database connection
#[derive(Debug, Clone, PartialEq)]
pub enum DatabaseConfig {
    /// SQLite database with a specific file path
    SqliteOnDisk { path: PathBuf },

    /// SQLite database that runs entirely in memory
    SqliteInMemory,
}

/// Owns the connection handle and hands it to every repository it creates.
pub struct DatabaseManager {
    connection: SharedSqliteConnection,
}

impl DatabaseManager {
    /// Opens the database described by `config` and makes sure all tables exist.
    ///
    /// # Errors
    /// Returns an error if the database can not be opened or the schema can not be created.
    pub fn new(config: &DatabaseConfig) -> Result<Self, StoreError> {
        let connection = match config {
            // SQLite (on-disk)
            DatabaseConfig::SqliteOnDisk { path } => {
                debug!("Opening database {}", path.display());
                sqlite::create_connection(path)?
            }

            // SQLite (in-memory)
            DatabaseConfig::SqliteInMemory => Connection::open_in_memory()?,
        };

        // reported_by is only a soft reference to users, the bundled build enforces by default
        connection.pragma_update(None, "foreign_keys", false)?;
        ensure_schema(&connection)?;

        Ok(Self {
            connection: Arc::new(Mutex::new(connection)),
        })
    }

    /// Provide access to the shared database connection.
    #[must_use]
    pub fn get_connection(&self) -> SharedSqliteConnection {
        self.connection.clone()
    }

    #[must_use]
    pub fn create_incident_repository(&self) -> Arc<SqliteIncidentRepository> {
        Arc::new(SqliteIncidentRepository::new(self.get_connection()))
    }

    #[must_use]
    pub fn create_ticket_repository(&self) -> Arc<SqliteTicketRepository> {
        Arc::new(SqliteTicketRepository::new(self.get_connection()))
    }

    #[must_use]
    pub fn create_user_repository(&self) -> Arc<SqliteUserRepository> {
        Arc::new(SqliteUserRepository::new(self.get_connection()))
    }

    /// A bulk loader reading files separated by `delimiter`
    #[must_use]
    pub fn create_bulk_loader(&self, delimiter: u8) -> BulkLoader {
        BulkLoader::new(self.get_connection()).with_delimiter(delimiter)
    }
}
