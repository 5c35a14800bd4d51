//! Error types for the staging uploader.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the application.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration value for '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    #[error("Missing required configuration: {0}")]
    MissingConfig(String),

    // Request errors
    #[error("No files or note provided")]
    EmptyRequest,

    #[error("Authentication required")]
    Unauthorized,

    #[error("Malformed multipart body: {0}")]
    Multipart(String),

    #[error("Upload exceeds the maximum accepted size: {0}")]
    PayloadTooLarge(String),

    // Staging errors
    #[error("Archive root does not exist: {}", .0.display())]
    ArchiveNotFound(PathBuf),

    #[error("Background task failed: {0}")]
    Task(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization errors
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

impl From<tokio::task::JoinError> for Error {
    fn from(err: tokio::task::JoinError) -> Self {
        Error::Task(err.to_string())
    }
}

/// Process exit codes.
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const CONFIG_ERROR: i32 = 3;
    pub const SERVER_ERROR: i32 = 4;
    pub const UNEXPECTED_ERROR: i32 = 5;
}
