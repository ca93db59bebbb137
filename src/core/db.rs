use crate::core::error::MealMaxError;
use crate::core::schemas;
use rusqlite::Connection;
use std::fs;
use std::path::{Path, PathBuf};

pub fn db_connect(db_path: &Path) -> Result<Connection, MealMaxError> {
    let conn = Connection::open(db_path)?;
    conn.busy_timeout(std::time::Duration::from_secs(5))
        .map_err(MealMaxError::RusqliteError)?;
    conn.query_row("PRAGMA journal_mode=WAL;", [], |_| Ok(()))
        .map_err(MealMaxError::RusqliteError)?;
    conn.execute("PRAGMA foreign_keys=ON;", [])
        .map_err(MealMaxError::RusqliteError)?;
    Ok(conn)
}

pub fn catalog_db_path(root: &Path) -> PathBuf {
    root.join(schemas::CATALOG_DB_NAME)
}

pub fn initialize_catalog_db(root: &Path) -> Result<(), MealMaxError> {
    let db_path = catalog_db_path(root);
    if let Some(parent_dir) = db_path.parent() {
        fs::create_dir_all(parent_dir).map_err(MealMaxError::IoError)?;
    }

    let conn = db_connect(&db_path)?;
    conn.execute(schemas::CATALOG_DB_SCHEMA, [])?;

    log::info!("Catalog database initialized at {}", db_path.display());
    Ok(())
}
