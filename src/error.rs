//! Crate-level error type and `Result` alias for structured error handling.
//! Converts underlying I/O, CSV, JSON and GDAL errors, and provides semantic
//! variants for table validation, workspace setup and engine failures.
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Settings error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("GDAL error: {0}")]
    Gdal(#[from] crate::io::GdalError),

    #[error("Missing required columns in {path:?}: {columns}")]
    MissingColumns { path: PathBuf, columns: String },

    #[error("Table {path:?} has {rows} data row(s); at least 2 are required")]
    TableTooShort { path: PathBuf, rows: usize },

    #[error("Required input not found: {0:?}")]
    MissingInput(PathBuf),

    #[error("Scratch directory already exists: {0:?}")]
    ScratchExists(PathBuf),

    #[error("Output already exists and overwrite is disabled: {0:?}")]
    OutputExists(PathBuf),

    #[error("Invalid extent: {0}")]
    InvalidExtent(String),

    #[error("No usable samples for field '{field}'")]
    NoSamples { field: String },

    #[error("Extension '{0}' is not available")]
    ExtensionUnavailable(String),

    #[error("Extension '{0}' is not checked out")]
    ExtensionNotCheckedOut(String),

    #[error("Invalid argument: {arg}={value}")]
    InvalidArgument { arg: &'static str, value: String },

    #[error("Processing error: {0}")]
    Processing(String),
}
