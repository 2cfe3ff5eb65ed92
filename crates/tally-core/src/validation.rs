//! # Validation Module
//!
//! Input policy and validation utilities for Tally.
//!
//! ## Two Kinds of Input
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Input Handling                                     │
//! │                                                                         │
//! │  Line fields (quantity, rate, discount, global %)                      │
//! │  ├── LENIENT: never rejected                                           │
//! │  ├── garbage → 0      (parse_numeric_or_zero)                          │
//! │  └── out of range → clamped (clamp_amount, Percent::new)               │
//! │                                                                         │
//! │  Configuration (estimate prefix, default tax)                          │
//! │  ├── STRICT: rejected with ValidationError                             │
//! │  └── checked once when the desk loads its config                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use tally_core::validation::{parse_numeric_or_zero, validate_estimate_prefix};
//! use rust_decimal::Decimal;
//!
//! assert_eq!(parse_numeric_or_zero("abc"), Decimal::ZERO);
//! assert!(validate_estimate_prefix("EST").is_ok());
//! ```

use rust_decimal::Decimal;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::{MAX_NUMERIC_INPUT, MIN_SEARCH_TERM_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest accepted estimate number prefix.
pub const MAX_PREFIX_LEN: usize = 10;

// =============================================================================
// Lenient Numeric Policy
// =============================================================================

/// Parses a numeric field, coercing anything unparseable to zero.
///
/// This is the editor's deliberate leniency policy: a user typing garbage
/// into a quantity, rate or percentage field is never blocked, the field
/// simply counts as zero.
///
/// ## Accepted Forms
/// - Plain decimals: `"2"`, `"35000"`, `"12.50"`, `"-4"`
/// - Scientific notation: `"1e3"`, `"2.5E-1"`
/// - Surrounding whitespace is ignored
///
/// Well-formed numbers beyond the range of `Decimal` (`"1e40"`) saturate
/// by sign; values too small to represent become zero. Everything else
/// (empty, `"abc"`, `"1,000"`, `"NaN"`) returns zero.
///
/// ## Example
/// ```rust
/// use tally_core::validation::parse_numeric_or_zero;
/// use rust_decimal::Decimal;
///
/// assert_eq!(parse_numeric_or_zero(" 12.5 "), Decimal::new(125, 1));
/// assert_eq!(parse_numeric_or_zero("1e3"), Decimal::from(1000));
/// assert_eq!(parse_numeric_or_zero(""), Decimal::ZERO);
/// assert_eq!(parse_numeric_or_zero("12abc"), Decimal::ZERO);
/// assert_eq!(parse_numeric_or_zero("1e40"), Decimal::MAX);
/// ```
pub fn parse_numeric_or_zero(raw: &str) -> Decimal {
    let raw = raw.trim();
    if raw.is_empty() {
        return Decimal::ZERO;
    }

    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()
        .or_else(|| saturate_out_of_range(raw))
        .unwrap_or(Decimal::ZERO)
}

/// Resolves a numeric literal that `Decimal` could not hold.
///
/// Returns `None` when `raw` is not a plain or scientific number at all.
fn saturate_out_of_range(raw: &str) -> Option<Decimal> {
    let (negative, unsigned) = match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw.strip_prefix('+').unwrap_or(raw)),
    };

    let (mantissa, exponent) = match unsigned.split_once(|c| c == 'e' || c == 'E') {
        Some((mantissa, exponent)) => (mantissa, exponent.parse::<i64>().ok()?),
        None => (unsigned, 0),
    };

    let (whole, frac) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    if whole.is_empty() && frac.is_empty() {
        return None;
    }
    if !whole.chars().chain(frac.chars()).all(|c| c.is_ascii_digit()) {
        return None;
    }
    if whole.chars().chain(frac.chars()).all(|c| c == '0') {
        return Some(Decimal::ZERO);
    }

    // Position of the leading significant digit relative to the decimal point
    let significant_whole = whole.trim_start_matches('0').len();
    let magnitude = if significant_whole > 0 {
        i64::try_from(significant_whole).unwrap_or(i64::MAX)
    } else {
        let leading_zeros = frac.chars().take_while(|&c| c == '0').count();
        -i64::try_from(leading_zeros).unwrap_or(i64::MAX)
    }
    .saturating_add(exponent);

    let value = match (magnitude > 0, negative) {
        (false, _) => Decimal::ZERO,
        (true, false) => Decimal::MAX,
        (true, true) => Decimal::MIN,
    };
    Some(value)
}

/// Clamps a quantity or rate into `[0, MAX_NUMERIC_INPUT]`.
///
/// ## Example
/// ```rust
/// use tally_core::validation::clamp_amount;
/// use rust_decimal::Decimal;
///
/// assert_eq!(clamp_amount(Decimal::from(-5)), Decimal::ZERO);
/// assert_eq!(clamp_amount(Decimal::from(42)), Decimal::from(42));
/// ```
pub fn clamp_amount(value: Decimal) -> Decimal {
    value.clamp(Decimal::ZERO, Decimal::from(MAX_NUMERIC_INPUT))
}

// =============================================================================
// Search Terms
// =============================================================================

/// Normalizes an autocomplete search term.
///
/// ## Rules
/// - Surrounding whitespace is ignored
/// - Terms shorter than [`MIN_SEARCH_TERM_LEN`] characters yield `None`
/// - The returned term is lowercased for case-insensitive matching
pub fn normalize_search_term(term: &str) -> Option<String> {
    let term = term.trim();
    if term.chars().count() < MIN_SEARCH_TERM_LEN {
        return None;
    }
    Some(term.to_lowercase())
}

// =============================================================================
// Configuration Validators
// =============================================================================

/// Validates an estimate number prefix (e.g. `EST` in `EST-0001`).
///
/// ## Rules
/// - Must not be empty
/// - At most [`MAX_PREFIX_LEN`] characters
/// - Only letters, digits, hyphens and underscores
///
/// ## Example
/// ```rust
/// use tally_core::validation::validate_estimate_prefix;
///
/// assert!(validate_estimate_prefix("EST").is_ok());
/// assert!(validate_estimate_prefix("").is_err());
/// assert!(validate_estimate_prefix("EST 2024").is_err());
/// ```
pub fn validate_estimate_prefix(prefix: &str) -> ValidationResult<()> {
    let prefix = prefix.trim();

    if prefix.is_empty() {
        return Err(ValidationError::Required {
            field: "estimate prefix".to_string(),
        });
    }

    if prefix.chars().count() > MAX_PREFIX_LEN {
        return Err(ValidationError::TooLong {
            field: "estimate prefix".to_string(),
            max: MAX_PREFIX_LEN,
        });
    }

    if !prefix
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "estimate prefix".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

/// Validates a whole-number percentage from configuration.
pub fn validate_percentage(field: &str, value: u32) -> ValidationResult<()> {
    if value > 100 {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: 100,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
