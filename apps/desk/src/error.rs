//! # Desk Error Type
//!
//! Errors of the desk host application.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Error Flow in the Desk                             │
//! │                                                                         │
//! │  startup                                                                │
//! │  ├── config file unreadable / bad TOML ─► DeskError::Config ─► exit 1  │
//! │  ├── inventory unreadable / bad JSON ───► DeskError::Inventory ► exit 1│
//! │  └── invalid prefix / tax ──────────────► DeskError::Core ───► exit 1  │
//! │                                                                         │
//! │  console loop                                                           │
//! │  ├── unknown command / bad args ────────► DeskError::Usage  ─► printed │
//! │  └── bad line index, empty save ────────► DeskError::Editor ─► printed │
//! │                                                                         │
//! │  Only startup errors end the process; console errors are shown and    │
//! │  the loop carries on.                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use tally_core::{CoreError, ValidationError};
use tally_editor::EditorError;
use thiserror::Error;

/// Result type alias for desk operations.
pub type DeskResult<T> = Result<T, DeskError>;

#[derive(Debug, Error)]
pub enum DeskError {
    // =========================================================================
    // Startup Errors
    // =========================================================================
    /// Config file could not be read or parsed.
    #[error("Failed to load config {path}: {reason}")]
    Config { path: PathBuf, reason: String },

    /// Inventory file could not be read or parsed.
    #[error("Failed to load inventory {path}: {reason}")]
    Inventory { path: PathBuf, reason: String },

    /// Invalid configuration value.
    #[error("Invalid configuration: {0}")]
    Validation(#[from] ValidationError),

    /// Core error (e.g. estimate number sequence).
    #[error(transparent)]
    Core(#[from] CoreError),

    // =========================================================================
    // Console Errors
    // =========================================================================
    /// Unknown console command or bad arguments.
    #[error("{0}")]
    Usage(String),

    /// Editor rejected an operation.
    #[error(transparent)]
    Editor(#[from] EditorError),

    // =========================================================================
    // Runtime Errors
    // =========================================================================
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The receiver task panicked or was cancelled.
    #[error("Receiver task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl DeskError {
    pub fn usage(message: impl Into<String>) -> Self {
        DeskError::Usage(message.into())
    }

    /// Whether the console should report this and keep going.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, DeskError::Usage(_) | DeskError::Editor(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recoverable_errors() {
        assert!(DeskError::usage("unknown command").is_recoverable());
        assert!(DeskError::from(EditorError::EmptyEstimate).is_recoverable());
        assert!(!DeskError::Config {
            path: PathBuf::from("desk.toml"),
            reason: "bad".into()
        }
        .is_recoverable());
    }

    #[test]
    fn test_editor_message_passes_through() {
        let err = DeskError::from(EditorError::EmptyEstimate);
        assert_eq!(err.to_string(), "Please add at least one item to the estimate");
    }
}
