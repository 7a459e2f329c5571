use std::{io, path::PathBuf};

use rusqlite::ErrorCode;
use thiserror::Error;

#[allow(clippy::module_name_repetitions)]
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Unable to load the application configuration file {path:?}")]
    ApplicationConfig { path: PathBuf, source: io::Error },
    #[error("Unable to parse contents of {path}")]
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Unable to create configuration file {path}")]
    ConfigFileCreation { path: PathBuf },
    #[error("Directory creation failed")]
    CreateDir(#[from] io::Error),
    #[error("Database unavailable: {0}")]
    Connectivity(String),
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),
    #[error("SQL dbms error: {0}")]
    Sql(String),
    #[error("Mutex locking error")]
    LockPoisoned,
    #[error("Unable to read tabular file {path}: {reason}")]
    Csv { path: String, reason: String },
    #[error("No such table: {0}")]
    UnknownTable(String),
    #[error("Table {table} has no column named '{column}'")]
    UnknownColumn { table: String, column: String },
    #[error("Unable to hash or verify password: {0}")]
    PasswordHash(String),
    #[error("Invalid configuration: {0}")]
    BadConfig(String),
}

impl StoreError {
    /// Errors which mean the store itself is unusable, as opposed to a single bad
    /// statement or input file.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, StoreError::Connectivity(_) | StoreError::LockPoisoned)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        if let rusqlite::Error::InvalidPath(path) = &err {
            return StoreError::Connectivity(format!("invalid database path {}", path.display()));
        }
        match err.sqlite_error_code() {
            Some(ErrorCode::ConstraintViolation) => {
                StoreError::ConstraintViolation(format!("{err}"))
            }
            Some(
                ErrorCode::CannotOpen
                | ErrorCode::NotADatabase
                | ErrorCode::DatabaseCorrupt
                | ErrorCode::SystemIoFailure
                | ErrorCode::PermissionDenied
                | ErrorCode::DiskFull
                | ErrorCode::ReadOnly
                | ErrorCode::DatabaseBusy
                | ErrorCode::DatabaseLocked,
            ) => StoreError::Connectivity(format!("Sqlite error {err}")),
            _ => StoreError::Sql(format!("Sqlite error {err}")),
        }
    }
}

impl From<argon2::password_hash::Error> for StoreError {
    fn from(err: argon2::password_hash::Error) -> Self {
        StoreError::PasswordHash(format!("{err}"))
    }
}
