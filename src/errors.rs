//! Error type shared by the store, the domain logic and the command layer.
//!
//! Domain failures carry enough context to be printed as-is by `main`.

use crate::models::collection::Collection;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // io / encoding
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    // database-related
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    // store / workflow
    #[error("{collection} #{id} not found")]
    NotFound { collection: Collection, id: i64 },

    #[error("A timer is already running for this user")]
    AlreadyRunning,

    #[error("No timer is running for this user")]
    NotRunning,

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Location unavailable: {0}")]
    LocationUnavailable(String),

    #[error("Still referenced: {0}")]
    ReferentialIntegrity(String),

    #[error("Not allowed: {0}")]
    Forbidden(String),

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Partially applied: {0}")]
    PartialFailure(String),

    // parsing errors
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    // config errors
    #[error("Configuration error: {0}")]
    Config(String),

    // export errors
    #[error("Export error: {0}")]
    Export(String),

    // generic fallback
    #[error("Internal error: {0}")]
    Other(String),
}

impl AppError {
    pub fn not_found(collection: Collection, id: i64) -> Self {
        AppError::NotFound { collection, id }
    }
}

pub type AppResult<T> = Result<T, AppError>;
