//! # Display Formatting
//!
//! Text views of the editor state. Every monetary figure uses the
//! `<currency_symbol><amount fixed to 2 decimals>` form.

use std::fmt;

use tally_core::{LineItem, Totals};

use crate::session::EstimateSession;

/// Formatted totals block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TotalsView {
    pub subtotal: String,
    pub discount: String,
    pub tax: String,
    pub grand_total: String,
}

impl TotalsView {
    pub fn new(totals: &Totals, symbol: &str) -> Self {
        TotalsView {
            subtotal: totals.subtotal.format_with(symbol),
            discount: totals.discount_amount.format_with(symbol),
            tax: totals.tax_amount.format_with(symbol),
            grand_total: totals.grand_total.format_with(symbol),
        }
    }
}

/// One formatted line row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineView {
    pub serial: u32,
    pub item: String,
    pub quantity: String,
    pub rate: String,
    pub discount: String,
    pub amount: String,
}

impl LineView {
    pub fn new(line: &LineItem, symbol: &str) -> Self {
        LineView {
            serial: line.serial(),
            item: line.item().to_string(),
            quantity: line.quantity().normalize().to_string(),
            rate: line.rate().format_with(symbol),
            discount: line.discount().to_string(),
            amount: line.amount().format_with(symbol),
        }
    }
}

/// The whole editor as text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorView {
    pub lines: Vec<LineView>,
    pub global_discount: String,
    pub global_tax: String,
    pub totals: TotalsView,
}

impl EditorView {
    pub fn new(session: &EstimateSession, symbol: &str) -> Self {
        EditorView {
            lines: session
                .lines()
                .iter()
                .map(|line| LineView::new(line, symbol))
                .collect(),
            global_discount: session.global_discount().to_string(),
            global_tax: session.global_tax().to_string(),
            totals: TotalsView::new(&session.totals(), symbol),
        }
    }
}

impl fmt::Display for EditorView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:>3}  {:<32} {:>8} {:>14} {:>6} {:>16}",
            "#", "Item", "Qty", "Rate", "Disc", "Amount"
        )?;
        for line in &self.lines {
            writeln!(
                f,
                "{:>3}  {:<32} {:>8} {:>14} {:>6} {:>16}",
                line.serial, line.item, line.quantity, line.rate, line.discount, line.amount
            )?;
        }
        writeln!(f, "Subtotal:                 {}", self.totals.subtotal)?;
        writeln!(
            f,
            "Discount ({}):{:pad$}{}",
            self.global_discount,
            "",
            self.totals.discount,
            pad = 14usize.saturating_sub(self.global_discount.chars().count())
        )?;
        writeln!(
            f,
            "Tax ({}):{:pad$}{}",
            self.global_tax,
            "",
            self.totals.tax,
            pad = 19usize.saturating_sub(self.global_tax.chars().count())
        )?;
        write!(f, "Grand Total:              {}", self.totals.grand_total)
    }
}
