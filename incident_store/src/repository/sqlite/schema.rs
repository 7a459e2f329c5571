use log::debug;
use rusqlite::Connection;

use crate::error::StoreError;

/// SQL statement to create the `users` table.
const CREATE_USERS_TABLE_SQL: &str = r"
    CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        username TEXT NOT NULL UNIQUE,
        password_hash TEXT NOT NULL,
        role TEXT DEFAULT 'user',
        created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
    );
";

// The foreign key is declarative only, `PRAGMA foreign_keys` is left off
const CREATE_CYBER_INCIDENTS_TABLE_SQL: &str = r"
    CREATE TABLE IF NOT EXISTS cyber_incidents (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        date TEXT NOT NULL,
        incident_type TEXT NOT NULL,
        severity TEXT,
        status TEXT,
        description TEXT,
        reported_by TEXT,
        created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
        FOREIGN KEY (reported_by) REFERENCES users(username)
    );
";

const CREATE_DATASETS_METADATA_TABLE_SQL: &str = r"
    CREATE TABLE IF NOT EXISTS datasets_metadata (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        dataset_name TEXT NOT NULL,
        category TEXT,
        source TEXT,
        last_updated TEXT,
        record_count INTEGER,
        file_size_mb REAL,
        created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
    );
";

const CREATE_IT_TICKETS_TABLE_SQL: &str = r"
    CREATE TABLE IF NOT EXISTS it_tickets (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        ticket_id TEXT UNIQUE NOT NULL,
        priority TEXT,
        status TEXT,
        category TEXT,
        subject TEXT NOT NULL,
        description TEXT,
        created_date TEXT,
        resolved_date TEXT,
        assigned_to TEXT,
        created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
    );
";

/// Every table of the store with its DDL, in creation order.
pub const TABLES: [(&str, &str); 4] = [
    ("users", CREATE_USERS_TABLE_SQL),
    ("cyber_incidents", CREATE_CYBER_INCIDENTS_TABLE_SQL),
    ("datasets_metadata", CREATE_DATASETS_METADATA_TABLE_SQL),
    ("it_tickets", CREATE_IT_TICKETS_TABLE_SQL),
];

///
/// Creates all tables which do not exist yet.
///
/// Safe to call on every startup; existing tables and their rows are left alone.
///
/// # Errors
/// Any failure is returned to the caller, typically a `StoreError::Connectivity`
/// when the database file is unusable.
pub fn ensure_schema(connection: &Connection) -> Result<(), StoreError> {
    for (table, ddl) in TABLES {
        connection.execute(ddl, [])?;
        debug!("Table {table} is in place");
    }
    Ok(())
}
