//! Error types for the settings codec

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for loading, encoding and saving settings files.
///
/// Parse-level anomalies (malformed lines, ambiguous values) are not
/// errors: they are recovered locally by dropping the line or degrading
/// to a less-structured value. Only path/IO failures and encode
/// contract violations surface here.
#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid settings path (must exist and end in .txt): {}", path.display())]
    InvalidPath { path: PathBuf },

    #[error("Cannot encode value for key '{key}': {message}")]
    Encode { key: String, message: String },

    #[error("Settings error: {message}")]
    Settings { message: String },
}

impl Error {
    pub fn invalid_path(path: impl Into<PathBuf>) -> Self {
        Self::InvalidPath { path: path.into() }
    }

    pub fn encode(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Encode {
            key: key.into(),
            message: message.into(),
        }
    }

    pub fn settings(message: impl Into<String>) -> Self {
        Self::Settings {
            message: message.into(),
        }
    }

    /// Check if this error should abort the whole load/save operation.
    ///
    /// All current variants are fatal to the operation that produced
    /// them; recoverable anomalies never construct an `Error`.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Error::Io(_) | Error::InvalidPath { .. } | Error::Encode { .. } | Error::Settings { .. }
        )
    }
}

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", context.into(), err);
            err
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", f(), err);
            err
        })
    }
}
