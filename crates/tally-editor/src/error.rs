//! # Editor Error Types
//!
//! Errors surfaced by the estimate editor.
//!
//! Numeric input never fails (see `tally_core::validation`), and delivery
//! to the host is fire-and-forget, so the list is short.

use tally_core::CoreError;
use thiserror::Error;

/// Result type alias for editor operations.
pub type EditorResult<T> = Result<T, EditorError>;

/// Editor error type.
#[derive(Debug, Error)]
pub enum EditorError {
    /// Save was requested with no lines.
    ///
    /// No payload is emitted and the session stays in `Editing`.
    #[error("Please add at least one item to the estimate")]
    EmptyEstimate,

    /// A suggestion was picked while no autocomplete list is open.
    #[error("No suggestions are open")]
    NoSuggestions,

    /// A suggestion index past the end of the open list.
    #[error("Suggestion {index} does not exist ({len} shown)")]
    SuggestionOutOfRange { index: usize, len: usize },

    /// A host message could not be encoded or decoded.
    #[error("Malformed host message: {0}")]
    Message(#[from] serde_json::Error),

    /// Line model error (bad line index, validation).
    #[error(transparent)]
    Core(#[from] CoreError),
}
