//! Application Error Types

use crate::core::validation::ValidationError;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("The specified configuration file does not exist: {}", .path.display())]
    ConfigNotFound { path: PathBuf },

    #[error("Error reading configuration file {}: {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error parsing configuration file {}: {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Validation(#[from] ValidationError),

    #[error("Failed to initialise logging: {message}")]
    Logging { message: String },

    #[error("Failed to serialise report: {0}")]
    Report(#[from] serde_json::Error),

    #[error("Demo {role} thread panicked")]
    ThreadPanic { role: &'static str },
}

/// Result type for application operations
pub type AppResult<T> = Result<T, AppError>;
