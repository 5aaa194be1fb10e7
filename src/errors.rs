//! Unified application error type.
//! Every layer (core, db, remote, cli) returns AppError so the binary can
//! report failures the same way.

use crate::core::validation::ValidationError;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    // ---------------------------
    // Serialization
    // ---------------------------
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    // ---------------------------
    // Form input
    // ---------------------------
    #[error("{0}")]
    Validation(#[from] ValidationError),

    // ---------------------------
    // Roster logic
    // ---------------------------
    #[error("No employee with id {0}")]
    EmployeeNotFound(String),

    #[error("Roster variant mismatch: configured '{expected}', got '{found}'")]
    VariantMismatch { expected: String, found: String },

    // ---------------------------
    // Shared / persisted data
    // ---------------------------
    #[error("Malformed roster data: {0}")]
    DecodeMalformed(String),

    // ---------------------------
    // Remote sync
    // ---------------------------
    #[error("Remote request failed: {0}")]
    Remote(#[from] reqwest::Error),

    #[error("Remote insert rejected ({status}): {body}")]
    RemoteRejected { status: u16, body: String },

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),
}

pub type AppResult<T> = Result<T, AppError>;
