//! Appends the rows of delimited tabular files to the tables of the store.
//!
//! The loader never truncates or upserts: loading the same file twice stores its
//! rows twice. Each file is loaded in its own transaction, so a file either
//! contributes all of its rows or none of them.
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::MutexGuard;

use common::tabular::{self, DEFAULT_DELIMITER};
use log::{debug, error, info, warn};
use rusqlite::Connection;

use crate::error::StoreError;
use crate::repository::SharedSqliteConnection;

/// Source files of the default data directory and the tables they feed.
/// The misspelt incident file name is what the data set ships with.
pub const DEFAULT_SOURCES: [(&str, &str); 3] = [
    ("cyber_incedents.csv", "cyber_incidents"),
    ("datasets_metadata.csv", "datasets_metadata"),
    ("it_tickets.csv", "it_tickets"),
];

/// Resolves `DEFAULT_SOURCES` against `data_dir`
#[must_use]
pub fn default_sources(data_dir: &Path) -> Vec<(PathBuf, &'static str)> {
    DEFAULT_SOURCES
        .iter()
        .map(|(file_name, table)| (data_dir.join(file_name), *table))
        .collect()
}

pub struct BulkLoader {
    connection: SharedSqliteConnection,
    delimiter: u8,
}

impl BulkLoader {
    pub fn new(connection: SharedSqliteConnection) -> Self {
        BulkLoader {
            connection,
            delimiter: DEFAULT_DELIMITER,
        }
    }

    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    ///
    /// Appends every row of the file at `path` to `table_name`.
    ///
    /// The header row names the target columns and must match the table's columns
    /// exactly. Empty fields are stored as NULL.
    ///
    /// # Returns
    /// The number of rows loaded. A missing file, an unknown table or column, a
    /// malformed file and a rejected row are all reported in the log and count as
    /// zero rows; nothing from such a file is kept.
    ///
    /// # Errors
    /// Only failures which make the store itself unusable, see `StoreError::is_fatal()`.
    pub fn load_table_from_file(&self, path: &Path, table_name: &str) -> Result<usize, StoreError> {
        if !path.is_file() {
            warn!("Error: file '{}' does not exist.", path.display());
            return Ok(0);
        }

        match self.append_rows(path, table_name) {
            Ok(loaded) => {
                info!("Successfully loaded {loaded} rows into '{table_name}'.");
                Ok(loaded)
            }
            Err(err) if err.is_fatal() => Err(err),
            Err(err) => {
                error!(
                    "Error loading '{}' into '{table_name}', no rows loaded: {err}",
                    path.display()
                );
                Ok(0)
            }
        }
    }

    ///
    /// Loads each `(file, table)` pair in turn and returns the total number of rows loaded.
    ///
    /// Files which fail to load contribute zero and do not stop the batch.
    ///
    /// # Errors
    /// Stops at the first fatal error, see `load_table_from_file()`.
    pub fn load_all<P: AsRef<Path>>(&self, sources: &[(P, &str)]) -> Result<usize, StoreError> {
        let mut total_loaded = 0;
        for (path, table) in sources {
            total_loaded += self.load_table_from_file(path.as_ref(), table)?;
        }
        info!("Total rows loaded from files: {total_loaded}");
        Ok(total_loaded)
    }

    /// Loads the `DEFAULT_SOURCES` found in `data_dir`
    ///
    /// # Errors
    /// See `load_all()`
    pub fn load_all_from_dir(&self, data_dir: &Path) -> Result<usize, StoreError> {
        self.load_all(&default_sources(data_dir))
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.connection
            .lock()
            .map_err(|_| StoreError::LockPoisoned)
    }

    fn append_rows(&self, path: &Path, table_name: &str) -> Result<usize, StoreError> {
        let csv_error = |err: csv::Error| StoreError::Csv {
            path: path.display().to_string(),
            reason: err.to_string(),
        };

        let mut reader = tabular::open_csv_reader(path, self.delimiter).map_err(csv_error)?;
        let headers: Vec<String> = reader
            .headers()
            .map_err(csv_error)?
            .iter()
            .map(str::to_string)
            .collect();
        if headers.iter().all(String::is_empty) {
            return Err(StoreError::Csv {
                path: path.display().to_string(),
                reason: "no header row".to_string(),
            });
        }

        if let Some(duplicate) = duplicate_header(&headers) {
            return Err(StoreError::Csv {
                path: path.display().to_string(),
                reason: format!("duplicate column '{duplicate}'"),
            });
        }

        let mut conn = self.lock()?;
        let columns = table_columns(&conn, table_name)?;
        if let Some(unknown) = headers.iter().find(|header| !columns.contains(header)) {
            return Err(StoreError::UnknownColumn {
                table: table_name.to_string(),
                column: unknown.clone(),
            });
        }

        let sql = insert_sql(table_name, &headers);
        debug!("Loading '{}' with: {sql}", path.display());

        let tx = conn.transaction()?;
        let mut loaded = 0;
        {
            let mut stmt = tx.prepare(&sql)?;
            for record in reader.records() {
                let record = record.map_err(csv_error)?;
                let values = record
                    .iter()
                    .map(|field| if field.is_empty() { None } else { Some(field) });
                stmt.execute(rusqlite::params_from_iter(values))?;
                loaded += 1;
            }
        }
        tx.commit()?;
        Ok(loaded)
    }
}

/// The column names of `table_name`, which doubles as the check that the table exists.
fn table_columns(conn: &Connection, table_name: &str) -> Result<Vec<String>, StoreError> {
    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info(?1)")?;
    let columns = stmt
        .query_map([table_name], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;
    if columns.is_empty() {
        return Err(StoreError::UnknownTable(table_name.to_string()));
    }
    Ok(columns)
}

fn duplicate_header(headers: &[String]) -> Option<&String> {
    let mut seen = HashSet::new();
    headers.iter().find(|header| !seen.insert(header.as_str()))
}

/// Only called with names verified by `table_columns()`
fn insert_sql(table_name: &str, columns: &[String]) -> String {
    let column_list = columns
        .iter()
        .map(|c| quote_identifier(c))
        .collect::<Vec<_>>()
        .join(", ");
    let placeholders = vec!["?"; columns.len()].join(", ");
    format!(
        "INSERT INTO {} ({column_list}) VALUES ({placeholders})",
        quote_identifier(table_name)
    )
}

fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
