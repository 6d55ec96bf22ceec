//! Error types and handling infrastructure for movewatch.
//!
//! This module provides a centralized error handling system using `thiserror` for
//! custom error types. The binary layers `anyhow` on top for context at the edges.
//!
//! Recognition itself never fails: timer-driven transitions are self-recovering and a
//! frame can always be processed. Errors only surface at the authoring boundary
//! (tokens, move configs, move books) and in the terminal host.

use thiserror::Error;

/// The main error type for movewatch operations.
#[derive(Error, Debug)]
pub enum MovewatchError {
    /// A token outside the closed input vocabulary
    #[error("Unknown input token: {token}")]
    UnknownToken { token: String },

    /// A button combo string that is empty or names a non-button token
    #[error("Invalid button combo: {combo}")]
    InvalidButtonCombo { combo: String },

    /// Move config declared a kind other than `sequence` or `charge`
    #[error("Unknown move kind '{kind}' for move {move_id}")]
    UnknownMoveKind { move_id: String, kind: String },

    /// Charge move without a hold duration
    #[error("Charge move {move_id} requires a charge time")]
    MissingChargeTime { move_id: String },

    /// Charge index does not point into the directional pattern
    #[error("Charge index {index} is out of range for move {move_id} ({len} directions)")]
    ChargeIndexOutOfRange {
        move_id: String,
        index: usize,
        len: usize,
    },

    /// Operation referenced a move that was never registered
    #[error("Move {move_id} is not registered")]
    UnknownMove { move_id: String },

    /// Inversion mode other than x, y or xy
    #[error("Unknown inversion mode: {mode}")]
    UnknownInvertMode { mode: String },

    /// Host line that does not parse as a frame or command
    #[error("Invalid command: {message}")]
    InvalidCommand { message: String },

    /// Move book or settings could not be parsed
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// File system related errors while loading move books
    #[error("File operation failed: {message}")]
    FileError {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

/// Standard Result type for movewatch operations.
pub type Result<T> = std::result::Result<T, MovewatchError>;

impl MovewatchError {
    /// Create an UnknownToken error for the offending text
    pub fn unknown_token(token: impl Into<String>) -> Self {
        Self::UnknownToken {
            token: token.into(),
        }
    }

    /// Create an InvalidCommand error with a descriptive message
    pub fn invalid_command(message: impl Into<String>) -> Self {
        Self::InvalidCommand {
            message: message.into(),
        }
    }

    /// Create a ConfigError with a descriptive message
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Create a FileError from an io::Error with additional context
    pub fn file_error(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::FileError {
            message: message.into(),
            source,
        }
    }
}

impl From<std::io::Error> for MovewatchError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::FileError {
                message: "File not found".to_string(),
                source: err,
            },
            std::io::ErrorKind::PermissionDenied => Self::FileError {
                message: "Permission denied".to_string(),
                source: err,
            },
            _ => Self::FileError {
                message: "IO operation failed".to_string(),
                source: err,
            },
        }
    }
}
