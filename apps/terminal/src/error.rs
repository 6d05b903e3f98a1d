//! # App Error Type
//!
//! Unified error type for the terminal front end.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Till POS                               │
//! │                                                                         │
//! │  Startup                         Input loop                             │
//! │  ───────                         ──────────                             │
//! │  config file unreadable          unknown command / bad id               │
//! │  bad TOML / bad seed product     CoreError from the session             │
//! │         │                                │                              │
//! │         ▼                                ▼                              │
//! │  AppError → exit code 1          AppError → one line on the screen,     │
//! │                                  loop continues                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;
use till_core::{CoreError, ValidationError};

/// Result type alias for the terminal app.
pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Configuration loaded but failed validation.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Failed to read or parse the config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Failed to render the config as TOML.
    #[error("Failed to render config: {0}")]
    ConfigRenderFailed(String),

    // =========================================================================
    // Input Errors
    // =========================================================================
    /// The input line is not a command we understand.
    #[error("{0} (type `help` for commands)")]
    Usage(String),

    // =========================================================================
    // Wrapped Errors
    // =========================================================================
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AppError {
    pub fn usage(message: impl Into<String>) -> Self {
        AppError::Usage(message.into())
    }

    /// Whether the input loop can carry on after this error.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, AppError::Usage(_) | AppError::Core(_))
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::Core(CoreError::Validation(err))
    }
}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        AppError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for AppError {
    fn from(err: toml::ser::Error) -> Self {
        AppError::ConfigRenderFailed(err.to_string())
    }
}
