use std::path::Path;

use anyhow::Context;
use incident_store::{config, DatabaseConfig, DatabaseManager};
use log::{info, Level};

/// Creates the tables if needed and appends the default bulk load files to them.
fn main() -> anyhow::Result<()> {
    common::configure_logging(Level::Info);

    let app_config = config::load().context("Unable to load the configuration")?;
    let db_config = DatabaseConfig::from(&app_config.database);
    info!("Using database {:?}", db_config);

    let db_manager = DatabaseManager::new(&db_config).context("Unable to open the database")?;

    let delimiter = app_config.bulk_load.delimiter_byte()?;
    let data_dir = Path::new(&app_config.bulk_load.data_dir);
    let total = db_manager
        .create_bulk_loader(delimiter)
        .load_all_from_dir(data_dir)
        .with_context(|| format!("Bulk load from {} failed", data_dir.display()))?;

    println!("Total rows loaded from {}: {total}", data_dir.display());
    Ok(())
}
