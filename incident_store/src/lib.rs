//! Data access for the incident desk: security incidents, IT tickets and users
//! stored in SQLite, bulk loading of CSV exports and a handful of incident reports.
//!
//! ```rust,ignore
//! use incident_store::repository::record_repository::RecordRepository;
//! use incident_store::{DatabaseConfig, DatabaseManager, NewIncident};
//!
//! let db_manager = DatabaseManager::new(&DatabaseConfig::SqliteInMemory)?;
//! let incidents = db_manager.create_incident_repository();
//! let id = incidents.insert(&NewIncident::new("2024-11-03", "Phishing").with_severity("High"))?;
//! incidents.update_status(&id, "Closed")?;
//! ```
pub mod config;
pub mod error;
pub mod loader;
pub mod password;
pub mod repository;
pub mod types;

pub use error::StoreError;
pub use repository::database_manager::{DatabaseConfig, DatabaseManager};
pub use types::{GroupCount, Incident, NewIncident, NewTicket, NewUser, Ticket, User};
