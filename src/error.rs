//! Error types for the Lately library.
//!
//! The scoring and ranking core never fails; errors only come from the
//! collaborators around it (record sources, configuration files, activation
//! handlers). All of them are represented by the [`LatelyError`] enum.
//!
//! # Examples
//!
//! ```
//! use lately::error::{LatelyError, Result};
//!
//! fn load_something() -> Result<()> {
//!     Err(LatelyError::history("history file is not readable"))
//! }
//!
//! match load_something() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for Lately operations.
#[derive(Error, Debug)]
pub enum LatelyError {
    /// I/O errors (file operations, process spawning, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration values that cannot be used
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Record source errors (unreadable history files, etc.)
    #[error("History error: {0}")]
    History(String),

    /// A result could not be opened
    #[error("Activation error: {0}")]
    Activation(String),

    /// Provider registration errors
    #[error("Provider error: {0}")]
    Provider(String),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Errors bubbled up from user supplied callbacks
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with LatelyError.
pub type Result<T> = std::result::Result<T, LatelyError>;

impl LatelyError {
    /// Create a new invalid configuration error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        LatelyError::InvalidConfig(msg.into())
    }

    /// Create a new history error.
    pub fn history<S: Into<String>>(msg: S) -> Self {
        LatelyError::History(msg.into())
    }

    /// Create a new activation error.
    pub fn activation<S: Into<String>>(msg: S) -> Self {
        LatelyError::Activation(msg.into())
    }

    /// Create a new provider error.
    pub fn provider<S: Into<String>>(msg: S) -> Self {
        LatelyError::Provider(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        LatelyError::Other(msg.into())
    }
}
