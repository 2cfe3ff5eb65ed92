//! # Line Model
//!
//! The ordered rows of an estimate and their edit operations.
//!
//! ## Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          LineItems                                      │
//! │                                                                         │
//! │  add_line()              push blank line, serial = len + 1              │
//! │  remove_line(i)          delete, then renumber 1..=len (full refresh)   │
//! │  update_field(i, f, v)   set field; numeric fields recompute amount     │
//! │  apply_catalog_item(i)   overwrite item / rate / discount from catalog  │
//! │  reset()                 exactly one blank line                         │
//! │                                                                         │
//! │  Invariant after every operation:                                       │
//! │    lines[k].serial == k + 1                                             │
//! │    lines[k].amount == quantity × rate × (1 − discount/100)              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::{CoreError, CoreResult};
use crate::money::{Money, Percent};
use crate::types::{CatalogItem, LineField, LineItem};
use crate::validation::parse_numeric_or_zero;

/// The line sequence of one estimate session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineItems {
    lines: Vec<LineItem>,
}

impl LineItems {
    /// An empty sequence (a session that was emptied by removals).
    pub fn new() -> Self {
        LineItems { lines: Vec::new() }
    }

    /// A fresh session: exactly one blank line.
    pub fn with_blank_line() -> Self {
        let mut lines = LineItems::new();
        lines.add_line();
        lines
    }

    /// Appends a blank line and returns its index.
    pub fn add_line(&mut self) -> usize {
        let serial = self.next_serial();
        self.lines.push(LineItem::blank(serial));
        self.lines.len() - 1
    }

    /// Removes the line at `index` and renumbers the rest from 1.
    ///
    /// Every line after `index` gets a new serial, so any index or serial
    /// held by a caller for those lines is stale afterwards.
    pub fn remove_line(&mut self, index: usize) -> CoreResult<LineItem> {
        self.check_index(index)?;
        let removed = self.lines.remove(index);
        self.renumber();
        Ok(removed)
    }

    /// Sets a field from raw user input.
    ///
    /// Numeric fields go through the lenient policy: unparseable input
    /// becomes zero, quantity and rate are clamped to be non-negative and
    /// the discount to `[0, 100]`. The amount is recomputed for any numeric
    /// field.
    pub fn update_field(&mut self, index: usize, field: LineField, raw: &str) -> CoreResult<()> {
        let line = self.line_mut(index)?;

        match field {
            LineField::Item => line.set_item(raw),
            LineField::Quantity => line.set_quantity(parse_numeric_or_zero(raw)),
            LineField::Rate => line.set_rate(Money::from_input(raw)),
            LineField::Discount => line.set_discount(Percent::from_input(raw)),
        }

        Ok(())
    }

    /// Fills a line from a selected catalog item.
    ///
    /// Overwrites the label, rate and discount (including values the user
    /// typed by hand) and recomputes the amount. Quantity is kept.
    pub fn apply_catalog_item(&mut self, index: usize, item: &CatalogItem) -> CoreResult<()> {
        let line = self.line_mut(index)?;
        line.set_item(item.label());
        line.set_rate(item.rate());
        line.set_discount(item.default_discount_rate);
        Ok(())
    }

    /// Drops every line and starts over with one blank line.
    pub fn reset(&mut self) {
        self.lines.clear();
        self.add_line();
    }

    #[inline]
    pub fn as_slice(&self) -> &[LineItem] {
        &self.lines
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&LineItem> {
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

    /// Copies the current lines for a payload.
    pub fn snapshot(&self) -> Vec<LineItem> {
        self.lines.clone()
    }

    fn next_serial(&self) -> u32 {
        u32::try_from(self.lines.len() + 1).unwrap_or(u32::MAX)
    }

    fn renumber(&mut self) {
        for (serial, line) in (1u32..).zip(self.lines.iter_mut()) {
            line.set_serial(serial);
        }
    }

    fn check_index(&self, index: usize) -> CoreResult<()> {
        if index < self.lines.len() {
            Ok(())
        } else {
            Err(CoreError::LineOutOfRange {
                index,
                len: self.lines.len(),
            })
        }
    }

    fn line_mut(&mut self, index: usize) -> CoreResult<&mut LineItem> {
        let len = self.lines.len();
        self.lines
            .get_mut(index)
            .ok_or(CoreError::LineOutOfRange { index, len })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn filled(lines: &mut LineItems, index: usize, qty: &str, rate: &str, disc: &str) {
        lines.update_field(index, LineField::Quantity, qty).unwrap();
        lines.update_field(index, LineField::Rate, rate).unwrap();
        lines.update_field(index, LineField::Discount, disc).unwrap();
    }

    fn serials(lines: &LineItems) -> Vec<u32> {
        lines.as_slice().iter().map(|l| l.serial()).collect()
    }

    #[test]
    fn test_new_session_has_one_blank_line() {
        let lines = LineItems::with_blank_line();
        assert_eq!(lines.len(), 1);

        let line = lines.get(0).unwrap();
        assert_eq!(line.serial(), 1);
        assert_eq!(line.item(), "");
        assert_eq!(line.quantity(), Decimal::ZERO);
        assert!(line.amount().is_zero());
    }

    #[test]
    fn test_add_line_assigns_next_serial() {
        let mut lines = LineItems::with_blank_line();
        assert_eq!(lines.add_line(), 1);
        assert_eq!(lines.add_line(), 2);
        assert_eq!(serials(&lines), vec![1, 2, 3]);
    }

    #[test]
    fn test_update_field_recomputes_amount() {
        let mut lines = LineItems::with_blank_line();
        filled(&mut lines, 0, "2", "35000", "5");
        assert_eq!(lines.get(0).unwrap().amount().decimal(), dec!(66500));

        lines.update_field(0, LineField::Quantity, "3").unwrap();
        assert_eq!(lines.get(0).unwrap().amount().decimal(), dec!(99750));
    }

    #[test]
    fn test_item_label_does_not_touch_amount() {
        let mut lines = LineItems::with_blank_line();
        filled(&mut lines, 0, "1", "100", "0");
        lines.update_field(0, LineField::Item, "Consulting").unwrap();

        let line = lines.get(0).unwrap();
        assert_eq!(line.item(), "Consulting");
        assert_eq!(line.amount().decimal(), dec!(100));
    }

    #[test]
    fn test_garbage_input_becomes_zero() {
        let mut lines = LineItems::with_blank_line();
        filled(&mut lines, 0, "2", "35000", "5");

        lines.update_field(0, LineField::Rate, "lots").unwrap();
        let line = lines.get(0).unwrap();
        assert!(line.rate().is_zero());
        assert!(line.amount().is_zero());
    }

    #[test]
    fn test_out_of_range_input_is_clamped() {
        let mut lines = LineItems::with_blank_line();
        filled(&mut lines, 0, "-3", "100", "150");

        let line = lines.get(0).unwrap();
        assert_eq!(line.quantity(), Decimal::ZERO);
        assert_eq!(line.discount().value(), dec!(100));
        assert!(line.amount().is_zero());
    }

    #[test]
    fn test_huge_input_clamps_to_maximum() {
        let mut lines = LineItems::with_blank_line();
        filled(&mut lines, 0, "1e40", &"9".repeat(33), "0");

        let max = Decimal::from(crate::MAX_NUMERIC_INPUT);
        let line = lines.get(0).unwrap();
        assert_eq!(line.quantity(), max);
        assert_eq!(line.rate().decimal(), max);
        assert_eq!(line.amount().decimal(), max * max);
    }

    #[test]
    fn test_remove_line_renumbers_and_keeps_amounts() {
        let mut lines = LineItems::with_blank_line();
        lines.add_line();
        lines.add_line();
        filled(&mut lines, 0, "1", "10", "0");
        filled(&mut lines, 1, "1", "20", "0");
        filled(&mut lines, 2, "1", "30", "0");

        let removed = lines.remove_line(1).unwrap();
        assert_eq!(removed.amount().decimal(), dec!(20));

        assert_eq!(serials(&lines), vec![1, 2]);
        let amounts: Vec<_> = lines.as_slice().iter().map(|l| l.amount().decimal()).collect();
        assert_eq!(amounts, vec![dec!(10), dec!(30)]);
    }

    #[test]
    fn test_remove_last_line_leaves_empty_sequence() {
        let mut lines = LineItems::with_blank_line();
        lines.remove_line(0).unwrap();
        assert!(lines.is_empty());

        // Adding again starts from serial 1
        lines.add_line();
        assert_eq!(serials(&lines), vec![1]);
    }

    #[test]
    fn test_out_of_range_index_is_an_error() {
        let mut lines = LineItems::with_blank_line();
        assert!(matches!(
            lines.remove_line(3),
            Err(CoreError::LineOutOfRange { index: 3, len: 1 })
        ));
        assert!(lines.update_field(1, LineField::Rate, "5").is_err());
    }

    #[test]
    fn test_apply_catalog_item_overwrites_manual_values() {
        let item: CatalogItem = serde_json::from_str(
            r#"{"id": 4, "sku": "MONITOR001", "name": "4K Monitor", "price": 35000,
                "default_discount_rate": 5, "display_text": "4K Monitor (MONITOR001)"}"#,
        )
        .unwrap();

        let mut lines = LineItems::with_blank_line();
        filled(&mut lines, 0, "2", "999", "50");
        lines.apply_catalog_item(0, &item).unwrap();

        let line = lines.get(0).unwrap();
        assert_eq!(line.item(), "4K Monitor (MONITOR001)");
        assert_eq!(line.quantity(), dec!(2));
        assert_eq!(line.rate().decimal(), dec!(35000));
        assert_eq!(line.discount().value(), dec!(5));
        assert_eq!(line.amount().decimal(), dec!(66500));
    }

    #[test]
    fn test_reset_leaves_one_blank_line() {
        let mut lines = LineItems::with_blank_line();
        lines.add_line();
        lines.add_line();
        filled(&mut lines, 2, "4", "10", "0");

        lines.reset();
        assert_eq!(lines, LineItems::with_blank_line());
    }
}
