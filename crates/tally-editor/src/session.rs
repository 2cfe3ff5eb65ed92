//! # Estimate Session
//!
//! The editable state of one estimate: its lines plus the global discount
//! and tax.
//!
//! ## Lifecycle
//! ```text
//!   new(default_tax) ──► [1 blank line, discount 0, tax = default]
//!          │
//!          ▼
//!   add / remove / update / set global %  (totals recomputed on read)
//!          │
//!          ├── snapshot() ──► EstimatePayload (save)
//!          │
//!          └── clear() ────► [1 blank line, discount 0, tax = default]
//! ```

use tally_core::{
    compute_totals, CatalogItem, CoreResult, EstimatePayload, LineField, LineItem, LineItems,
    Percent, Totals,
};

/// One editor session's estimate state.
#[derive(Debug, Clone, PartialEq)]
pub struct EstimateSession {
    lines: LineItems,
    global_discount: Percent,
    global_tax: Percent,
    default_tax: Percent,
}

impl EstimateSession {
    /// Starts a session with one blank line.
    pub fn new(default_tax: Percent) -> Self {
        EstimateSession {
            lines: LineItems::with_blank_line(),
            global_discount: Percent::zero(),
            global_tax: default_tax,
            default_tax,
        }
    }

    pub fn add_line(&mut self) -> usize {
        self.lines.add_line()
    }

    pub fn remove_line(&mut self, index: usize) -> CoreResult<LineItem> {
        self.lines.remove_line(index)
    }

    pub fn update_field(&mut self, index: usize, field: LineField, raw: &str) -> CoreResult<()> {
        self.lines.update_field(index, field, raw)
    }

    pub fn apply_catalog_item(&mut self, index: usize, item: &CatalogItem) -> CoreResult<()> {
        self.lines.apply_catalog_item(index, item)
    }

    /// Sets the global discount from raw input (lenient, clamped).
    pub fn set_global_discount(&mut self, raw: &str) {
        self.global_discount = Percent::from_input(raw);
    }

    /// Sets the global tax from raw input (lenient, clamped).
    pub fn set_global_tax(&mut self, raw: &str) {
        self.global_tax = Percent::from_input(raw);
    }

    /// Current totals, computed fresh from the lines.
    pub fn totals(&self) -> Totals {
        compute_totals(self.lines.as_slice(), self.global_discount, self.global_tax)
    }

    /// Freezes the current state into a payload.
    pub fn snapshot(&self) -> EstimatePayload {
        EstimatePayload::new(self.lines.snapshot(), self.global_discount, self.global_tax)
    }

    /// Back to one blank line, no discount and the default tax.
    pub fn clear(&mut self) {
        self.lines.reset();
        self.global_discount = Percent::zero();
        self.global_tax = self.default_tax;
    }

    #[inline]
    pub fn lines(&self) -> &[LineItem] {
        self.lines.as_slice()
    }

    #[inline]
    pub fn line(&self, index: usize) -> Option<&LineItem> {
        self.lines.get(index)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    #[inline]
    pub fn global_discount(&self) -> Percent {
        self.global_discount
    }

    #[inline]
    pub fn global_tax(&self) -> Percent {
        self.global_tax
    }

    #[inline]
    pub fn default_tax(&self) -> Percent {
        self.default_tax
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    #[test]
    fn test_new_session() {
        let session = EstimateSession::new(Percent::from_whole(18));
        assert_eq!(session.len(), 1);
        assert!(session.global_discount().is_zero());
        assert_eq!(session.global_tax().value(), dec!(18));
        assert!(session.totals().grand_total.is_zero());
    }

    #[test]
    fn test_clear_restores_configured_default() {
        let mut session = EstimateSession::new(Percent::from_whole(18));
        session.add_line();
        session.add_line();
        session.update_field(2, LineField::Quantity, "4").unwrap();
        session.update_field(2, LineField::Rate, "250").unwrap();
        session.set_global_discount("15");
        session.set_global_tax("0");

        session.clear();

        assert_eq!(session.len(), 1);
        let line = session.line(0).unwrap();
        assert_eq!(line.serial(), 1);
        assert_eq!(line.quantity(), Decimal::ZERO);
        assert!(line.rate().is_zero());
        assert!(line.discount().is_zero());
        assert!(session.global_discount().is_zero());
        assert_eq!(session.global_tax().value(), dec!(18));
        assert_eq!(session.totals().grand_total.to_string(), "0.00");
    }

    #[test]
    fn test_clear_uses_non_default_configuration() {
        let mut session = EstimateSession::new(Percent::from_whole(5));
        session.set_global_tax("12");
        session.clear();
        assert_eq!(session.global_tax().value(), dec!(5));
    }

    #[test]
    fn test_snapshot_matches_state() {
        let mut session = EstimateSession::new(Percent::from_whole(18));
        session.update_field(0, LineField::Quantity, "2").unwrap();
        session.update_field(0, LineField::Rate, "35000").unwrap();
        session.update_field(0, LineField::Discount, "5").unwrap();
        session.set_global_discount("10");

        let payload = session.snapshot();
        assert_eq!(payload.lines(), session.lines());
        assert_eq!(payload.global_discount().value(), dec!(10));
        assert_eq!(payload.global_tax().value(), dec!(18));

        // Later edits do not reach an already-built payload
        session.update_field(0, LineField::Quantity, "9").unwrap();
        assert_eq!(payload.lines()[0].quantity(), dec!(2));
    }

    #[test]
    fn test_global_percent_input_is_lenient() {
        let mut session = EstimateSession::new(Percent::from_whole(18));
        session.set_global_discount("ten");
        session.set_global_tax("250");
        assert!(session.global_discount().is_zero());
        assert_eq!(session.global_tax().value(), dec!(100));
    }
}
