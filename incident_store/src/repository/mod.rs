use rusqlite::Connection;
use std::sync::{Arc, Mutex};

// Storage agnostic repository contracts
pub mod incident_reports;
pub mod record_repository;
pub mod user_accounts;

// Database-related utilities and managers.
pub mod database_manager;
pub mod sqlite;

/// A shared connection to an ``SQLite`` database, injected into every repository
/// created by the same `DatabaseManager`.
pub type SharedSqliteConnection = Arc<Mutex<Connection>>;
