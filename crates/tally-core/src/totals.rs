//! # Totals Engine
//!
//! Aggregates line amounts into the estimate figures.
//!
//! ## Formula Order
//! ```text
//! subtotal        = Σ line.amount
//! discount_amount = subtotal × globalDiscount / 100
//! after_discount  = subtotal − discount_amount
//! tax_amount      = after_discount × globalTax / 100     ◄── tax AFTER discount
//! grand_total     = after_discount + tax_amount
//! ```
//!
//! Every figure is kept at full precision; [`Money`]'s `Display` rounds to
//! two decimals only when shown.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::{Money, Percent};
use crate::types::LineItem;

/// Computed estimate figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub subtotal: Money,
    pub discount_amount: Money,
    pub after_discount: Money,
    pub tax_amount: Money,
    pub grand_total: Money,
}

/// Computes totals for a set of lines.
///
/// Pure and cheap; callers recompute after every mutation instead of
/// caching.
///
/// ## Example
/// ```rust
/// use tally_core::money::Percent;
/// use tally_core::totals::compute_totals;
///
/// let totals = compute_totals(&[], Percent::from_whole(10), Percent::from_whole(18));
/// assert_eq!(totals.grand_total.format_with("₹"), "₹0.00");
/// ```
pub fn compute_totals(lines: &[LineItem], global_discount: Percent, global_tax: Percent) -> Totals {
    let subtotal: Money = lines.iter().map(LineItem::amount).sum();
    let discount_amount = subtotal.percentage_of(global_discount);
    let after_discount = subtotal - discount_amount;
    let tax_amount = after_discount.percentage_of(global_tax);
    let grand_total = after_discount + tax_amount;

    Totals {
        subtotal,
        discount_amount,
        after_discount,
        tax_amount,
        grand_total,
    }
}
