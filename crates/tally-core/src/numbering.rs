//! # Estimate Numbering
//!
//! Issues human-readable estimate numbers such as `EST-0001`.
//!
//! The host owns the sequence; the editor never sees it. Numbers are
//! zero-padded to four digits and simply grow wider past `9999`.

use serde::{Deserialize, Serialize};

use crate::error::CoreResult;
use crate::validation::validate_estimate_prefix;

/// A monotonically increasing estimate number sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstimateNumberSequence {
    prefix: String,
    next: u32,
}

impl EstimateNumberSequence {
    /// Creates a sequence whose first issued number is `next`.
    ///
    /// A `next` of zero starts at 1.
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::numbering::EstimateNumberSequence;
    ///
    /// let mut seq = EstimateNumberSequence::new("EST", 7).unwrap();
    /// assert_eq!(seq.issue(), "EST-0007");
    /// assert_eq!(seq.issue(), "EST-0008");
    /// ```
    pub fn new(prefix: &str, next: u32) -> CoreResult<Self> {
        validate_estimate_prefix(prefix)?;

        Ok(EstimateNumberSequence {
            prefix: prefix.trim().to_string(),
            next: next.max(1),
        })
    }

    /// Returns the next number and advances the sequence.
    pub fn issue(&mut self) -> String {
        let number = self.peek();
        self.next = self.next.saturating_add(1);
        number
    }

    /// Returns the number the next call to [`issue`](Self::issue) yields.
    pub fn peek(&self) -> String {
        format!("{}-{:04}", self.prefix, self.next)
    }

    #[inline]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}
