use crate::error::StoreError;
use crate::repository::database_manager::DatabaseConfig;
use directories::ProjectDirs;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

/// Value of `database.path` selecting a database which lives only in memory
pub const IN_MEMORY_PATH: &str = ":memory:";

/// Application configuration struct
/// Holds where the database lives and where bulk load files are picked up from
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone, Default)]
pub struct AppConfiguration {
    #[serde(default)]
    pub database: DatabaseSettings,

    #[serde(default)]
    pub bulk_load: BulkLoadSettings,
}

/// Holds the configuration for the `database` section of the Toml file
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
pub struct DatabaseSettings {
    /// Path to the Sqlite file, or `:memory:`
    pub path: String,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        DatabaseSettings {
            path: database_file().to_string_lossy().to_string(),
        }
    }
}

impl From<&DatabaseSettings> for DatabaseConfig {
    fn from(settings: &DatabaseSettings) -> Self {
        if settings.path == IN_MEMORY_PATH {
            DatabaseConfig::SqliteInMemory
        } else {
            DatabaseConfig::SqliteOnDisk {
                path: PathBuf::from(&settings.path),
            }
        }
    }
}

/// Holds the configuration for the `bulk_load` section of the Toml file
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
pub struct BulkLoadSettings {
    /// Directory holding the files listed in `loader::DEFAULT_SOURCES`
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
}

impl Default for BulkLoadSettings {
    fn default() -> Self {
        BulkLoadSettings {
            data_dir: default_data_dir(),
            delimiter: default_delimiter(),
        }
    }
}

impl BulkLoadSettings {
    /// # Errors
    /// Returns `StoreError::BadConfig` unless the delimiter is a single ASCII character
    pub fn delimiter_byte(&self) -> Result<u8, StoreError> {
        common::tabular::delimiter_byte(self.delimiter).ok_or_else(|| {
            StoreError::BadConfig(format!(
                "bulk_load.delimiter must be an ASCII character, not '{}'",
                self.delimiter
            ))
        })
    }
}

fn default_data_dir() -> String {
    "DATA".to_string()
}

fn default_delimiter() -> char {
    ','
}

/// Filename holding the application configuration parameters
#[must_use]
pub fn configuration_file() -> PathBuf {
    project_dirs().map_or_else(
        || PathBuf::from("incident_desk.toml"),
        |dirs| dirs.preference_dir().join("config.toml"),
    )
}

/// Filename of the Sqlite DBMS holding incidents, tickets and users
#[must_use]
pub fn database_file() -> PathBuf {
    project_dirs().map_or_else(
        || PathBuf::from("incidents.db"),
        |dirs| dirs.data_dir().join("incidents.db"),
    )
}

/// Reads the configuration file, falling back to the defaults if there is none.
///
/// # Errors
/// Returns an error if the file exists but can not be read or parsed
pub fn load() -> Result<AppConfiguration, StoreError> {
    let config_path = configuration_file();
    if !config_path.try_exists()? {
        debug!(
            "No configuration file {}, using defaults",
            config_path.display()
        );
        return Ok(AppConfiguration::default());
    }
    read(&config_path)
}

/// Reads the `AppConfiguration` struct from the supplied TOML file
///
/// # Errors
/// Returns an error if the file can not be read or parsed
pub fn read(path: &Path) -> Result<AppConfiguration, StoreError> {
    let mut file = File::open(path).map_err(|source| StoreError::ApplicationConfig {
        path: path.into(),
        source,
    })?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)
        .map_err(|source| StoreError::ApplicationConfig {
            path: path.into(),
            source,
        })?;
    toml::from_str::<AppConfiguration>(&contents).map_err(|source| StoreError::TomlParse {
        path: path.into(),
        source,
    })
}

/// Writes `cfg` to `path`, creating the parent directory if needed
///
/// # Errors
/// Returns an error if the directory or file can not be created
pub fn save(cfg: &AppConfiguration, path: &Path) -> Result<(), StoreError> {
    if let Some(directory) = path.parent() {
        if !directory.as_os_str().is_empty() && !directory.try_exists()? {
            fs::create_dir_all(directory)?;
        }
    }

    let toml = application_config_to_string(cfg)?;
    let mut file =
        File::create(path).map_err(|_| StoreError::ConfigFileCreation { path: path.into() })?;
    file.write_all(toml.as_bytes())?;
    Ok(())
}

/// # Errors
/// Returns an error if the configuration can not be serialized
pub fn application_config_to_string(cfg: &AppConfiguration) -> Result<String, StoreError> {
    toml::to_string::<AppConfiguration>(cfg)
        .map_err(|e| StoreError::BadConfig(format!("unable to serialize configuration: {e}")))
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "norn", "incident_desk")
}
