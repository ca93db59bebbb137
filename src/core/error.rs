use rusqlite;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MealMaxError {
    #[error("SQLite error: {0}")]
    RusqliteError(#[from] rusqlite::Error),
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Capacity error: {0}")]
    CapacityError(String),
    #[error("State error: {0}")]
    StateError(String),
    #[error("Invalid parameter: {0}")]
    InvalidParameterError(String),
}
