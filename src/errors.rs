//! Centralized error handling.
//!
//! Every failure in a run maps onto one of these variants and is propagated
//! to `main`, which logs it and exits non-zero.

use std::path::PathBuf;

use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    // Input file
    #[error("Cannot read input file {}: {source}", .path.display())]
    InputRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot parse input file {}: {source}", .path.display())]
    InputParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    // Database
    #[error("Database connection failed: {0}")]
    Connection(#[source] sea_orm::DbErr),

    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

impl AppError {
    /// Stable error code, logged alongside the message
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Config(_) => "CONFIG_ERROR",
            AppError::InputRead { .. } => "INPUT_READ_ERROR",
            AppError::InputParse { .. } => "INPUT_PARSE_ERROR",
            AppError::Connection(_) => "CONNECTION_ERROR",
            AppError::Database(_) => "DATABASE_ERROR",
        }
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Convenience constructors
impl AppError {
    pub fn config(msg: impl Into<String>) -> Self {
        AppError::Config(msg.into())
    }
}
