//! Error types for srcprint.
//!
//! Library crates use [`SrcprintError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all srcprint operations.
#[derive(Debug, thiserror::Error)]
pub enum SrcprintError {
    /// No highlighting grammar matches the file name.
    #[error("unsupported file type: no grammar matches {path:?}")]
    UnsupportedFileType { path: PathBuf },

    /// Filesystem I/O error (input unreadable, output unwritable).
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The run was started without any input files.
    #[error("no input files")]
    NoInputFiles,

    /// The requested highlighting style does not exist.
    #[error("unknown style '{name}' (available: {})", .available.join(", "))]
    UnknownStyle {
        name: String,
        available: Vec<String>,
    },

    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Invalid option value (e.g. a zero wrap width).
    #[error("validation error: {message}")]
    Validation { message: String },

    /// Failure inside the highlighting engine.
    #[error("highlight error: {0}")]
    Highlight(String),
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, SrcprintError>;

impl SrcprintError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a validation error from any displayable message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create an unsupported-file-type error for `path`.
    pub fn unsupported(path: impl Into<PathBuf>) -> Self {
        Self::UnsupportedFileType { path: path.into() }
    }
}
