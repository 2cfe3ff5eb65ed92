//! # Error Types
//!
//! Domain-specific error types for tally-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  tally-core errors (this file)                                         │
//! │  ├── CoreError        - Line model / catalog failures                  │
//! │  └── ValidationError  - Configuration and identifier validation        │
//! │                                                                         │
//! │  tally-editor errors (separate crate)                                  │
//! │  └── EditorError      - Save rejections, selection failures            │
//! │                                                                         │
//! │  desk errors (in app)                                                  │
//! │  └── DeskError        - Config files, inventory files, console usage   │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → EditorError → DeskError           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Numeric field input never produces an error here: garbage input is
//! coerced to zero by [`crate::validation::parse_numeric_or_zero`].

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A line index does not address an existing line.
    ///
    /// ## When This Occurs
    /// - Removing or editing a line that was already removed
    /// - A stale index held across a full refresh of the line list
    ///
    /// `index` is zero-based; the message shows the 1-based line number.
    #[error("Line {} does not exist (estimate has {len} lines)", .index + 1)]
    LineOutOfRange { index: usize, len: usize },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Used for configuration values and identifiers, never for the numeric
/// fields of a line.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., invalid UUID, bad prefix characters).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::LineOutOfRange { index: 4, len: 2 };
        assert_eq!(err.to_string(), "Line 5 does not exist (estimate has 2 lines)");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "prefix".to_string(),
        };
        assert_eq!(err.to_string(), "prefix is required");

        let err = ValidationError::TooLong {
            field: "prefix".to_string(),
            max: 10,
        };
        assert_eq!(err.to_string(), "prefix must be at most 10 characters");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "prefix".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
