//! # Domain Types
//!
//! Core domain types used throughout Tally.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────────┐   │
//! │  │  CatalogItem    │   │    LineItem     │   │  EstimatePayload    │   │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────────  │   │
//! │  │  sku, name      │──►│  serial         │──►│  lines              │   │
//! │  │  price          │   │  item, quantity │   │  globalDiscount     │   │
//! │  │  default disc.  │   │  rate, discount │   │  globalTax          │   │
//! │  │  (read-only)    │   │  amount (derived│   │  (immutable)        │   │
//! │  └─────────────────┘   └─────────────────┘   └──────────┬──────────┘   │
//! │                                                          │ host side    │
//! │                                                          ▼              │
//! │                        ┌─────────────────┐   ┌─────────────────────┐   │
//! │                        │ EstimateStatus  │◄──│      Estimate       │   │
//! │                        │  Draft / Sent   │   │  number, customer   │   │
//! │                        │  Paid/Cancelled │   │  totals, items      │   │
//! │                        └─────────────────┘   └─────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::money::{Money, Percent};
use crate::totals::compute_totals;
use crate::validation::clamp_amount;

// =============================================================================
// Catalog Item
// =============================================================================

/// An inventory record offered for autocomplete selection.
///
/// Supplied by the host and never modified by the editor. Only `sku`,
/// `name` and `price` are required in the inventory JSON; everything else
/// falls back to a default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    /// Inventory id assigned by the host.
    pub id: i64,

    /// Stock Keeping Unit - business identifier.
    pub sku: String,

    /// Display name.
    pub name: String,

    #[serde(default)]
    pub description: String,

    /// Unit price. Becomes the line rate on selection.
    pub price: Money,

    /// Item tax rate (informational; estimates use the global tax).
    #[serde(default = "default_item_tax_rate")]
    pub tax_rate: Percent,

    /// Becomes the line discount on selection.
    #[serde(default)]
    pub default_discount_rate: Percent,

    #[serde(default)]
    pub category: String,

    /// Unit of measure (`nos`, `kg`, `m`, ...).
    #[serde(default = "default_unit")]
    pub unit: String,

    #[serde(default)]
    pub stock_quantity: i64,

    /// Label written into the line on selection.
    #[serde(default)]
    pub display_text: String,
}

fn default_item_tax_rate() -> Percent {
    Percent::from_whole(crate::DEFAULT_GLOBAL_TAX_PERCENT)
}

fn default_unit() -> String {
    "nos".to_string()
}

impl CatalogItem {
    /// Returns the label a selected line shows.
    ///
    /// Falls back to [`CatalogItem::compose_display_text`] when the host did
    /// not supply a `display_text`.
    pub fn label(&self) -> String {
        if self.display_text.trim().is_empty() {
            Self::compose_display_text(&self.name, &self.sku)
        } else {
            self.display_text.clone()
        }
    }

    /// Builds the conventional `"Name (SKU)"` label.
    pub fn compose_display_text(name: &str, sku: &str) -> String {
        format!("{} ({})", name, sku)
    }

    /// Price clamped into the accepted rate range.
    pub fn rate(&self) -> Money {
        Money::from_decimal(clamp_amount(self.price.decimal()))
    }
}

// =============================================================================
// Line Field
// =============================================================================

/// The editable fields of a line, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineField {
    Item,
    Quantity,
    Rate,
    Discount,
}

impl LineField {
    /// Fields of a line in focus order.
    pub const ORDER: [LineField; 4] = [
        LineField::Item,
        LineField::Quantity,
        LineField::Rate,
        LineField::Discount,
    ];

    /// Whether editing this field changes the line amount.
    #[inline]
    pub const fn is_numeric(&self) -> bool {
        !matches!(self, LineField::Item)
    }

    /// The next field in the same line, `None` after the last one.
    pub fn next(&self) -> Option<LineField> {
        match self {
            LineField::Item => Some(LineField::Quantity),
            LineField::Quantity => Some(LineField::Rate),
            LineField::Rate => Some(LineField::Discount),
            LineField::Discount => None,
        }
    }

    /// The previous field in the same line, `None` before the first one.
    pub fn prev(&self) -> Option<LineField> {
        match self {
            LineField::Item => None,
            LineField::Quantity => Some(LineField::Item),
            LineField::Rate => Some(LineField::Quantity),
            LineField::Discount => Some(LineField::Rate),
        }
    }
}

impl std::fmt::Display for LineField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LineField::Item => write!(f, "item"),
            LineField::Quantity => write!(f, "quantity"),
            LineField::Rate => write!(f, "rate"),
            LineField::Discount => write!(f, "discount"),
        }
    }
}

impl std::str::FromStr for LineField {
    type Err = crate::error::ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "item" | "name" => Ok(LineField::Item),
            "quantity" | "qty" => Ok(LineField::Quantity),
            "rate" | "price" => Ok(LineField::Rate),
            "discount" | "disc" => Ok(LineField::Discount),
            other => Err(crate::error::ValidationError::InvalidFormat {
                field: "line field".to_string(),
                reason: format!("unknown field '{}' (item, qty, rate, disc)", other),
            }),
        }
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// One row of an estimate.
///
/// ## Invariant
/// `amount = quantity × rate × (1 − discount / 100)`, recomputed by the line
/// model whenever quantity, rate or discount changes. Fields are private so
/// the amount cannot drift from its inputs. Deserialization applies the
/// same clamps and recomputes `amount`; a sent amount is ignored.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    serial: u32,
    item: String,
    #[ts(type = "number")]
    quantity: Decimal,
    rate: Money,
    discount: Percent,
    amount: Money,
}

impl LineItem {
    /// A new line with empty label and all numeric fields zero.
    pub fn blank(serial: u32) -> Self {
        LineItem {
            serial,
            item: String::new(),
            quantity: Decimal::ZERO,
            rate: Money::zero(),
            discount: Percent::zero(),
            amount: Money::zero(),
        }
    }

    /// Computes a line amount at full precision.
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::types::LineItem;
    /// use tally_core::money::{Money, Percent};
    /// use rust_decimal::Decimal;
    ///
    /// let amount = LineItem::compute_amount(
    ///     Decimal::from(2),
    ///     Money::from_input("35000"),
    ///     Percent::from_input("5"),
    /// );
    /// assert_eq!(amount.to_string(), "66500.00");
    /// ```
    pub fn compute_amount(quantity: Decimal, rate: Money, discount: Percent) -> Money {
        Money::from_decimal(quantity * rate.decimal() * (Decimal::ONE - discount.fraction()))
    }

    #[inline]
    pub fn serial(&self) -> u32 {
        self.serial
    }

    #[inline]
    pub fn item(&self) -> &str {
        &self.item
    }

    #[inline]
    pub fn quantity(&self) -> Decimal {
        self.quantity
    }

    #[inline]
    pub fn rate(&self) -> Money {
        self.rate
    }

    #[inline]
    pub fn discount(&self) -> Percent {
        self.discount
    }

    #[inline]
    pub fn amount(&self) -> Money {
        self.amount
    }

    pub(crate) fn set_serial(&mut self, serial: u32) {
        self.serial = serial;
    }

    pub(crate) fn set_item(&mut self, item: impl Into<String>) {
        self.item = item.into();
    }

    pub(crate) fn set_quantity(&mut self, quantity: Decimal) {
        self.quantity = clamp_amount(quantity);
        self.recompute();
    }

    pub(crate) fn set_rate(&mut self, rate: Money) {
        self.rate = Money::from_decimal(clamp_amount(rate.decimal()));
        self.recompute();
    }

    pub(crate) fn set_discount(&mut self, discount: Percent) {
        self.discount = discount;
        self.recompute();
    }

    fn recompute(&mut self) {
        self.amount = Self::compute_amount(self.quantity, self.rate, self.discount);
    }
}

/// Wire form of a line as received by a host.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LineItemRecord {
    serial: u32,
    #[serde(default)]
    item: String,
    quantity: Decimal,
    rate: Money,
    discount: Percent,
}

impl<'de> Deserialize<'de> for LineItem {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let record = LineItemRecord::deserialize(deserializer)?;

        let mut line = LineItem::blank(record.serial);
        line.set_item(record.item);
        line.set_quantity(record.quantity);
        line.set_rate(record.rate);
        line.set_discount(record.discount);
        Ok(line)
    }
}

// =============================================================================
// Estimate Payload
// =============================================================================

/// The finalized estimate handed to the host on save.
///
/// Built once at the save boundary from a snapshot of the session and never
/// mutated afterwards.
///
/// ## Wire Format
/// ```json
/// { "lines": [ { "serial": 1, "item": "4K Monitor (MONITOR001)",
///                "quantity": 2, "rate": 35000, "discount": 5, "amount": 66500 } ],
///   "globalDiscount": 10, "globalTax": 18 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct EstimatePayload {
    lines: Vec<LineItem>,
    global_discount: Percent,
    global_tax: Percent,
}

impl EstimatePayload {
    pub fn new(lines: Vec<LineItem>, global_discount: Percent, global_tax: Percent) -> Self {
        EstimatePayload {
            lines,
            global_discount,
            global_tax,
        }
    }

    #[inline]
    pub fn lines(&self) -> &[LineItem] {
        &self.lines
    }

    #[inline]
    pub fn global_discount(&self) -> Percent {
        self.global_discount
    }

    #[inline]
    pub fn global_tax(&self) -> Percent {
        self.global_tax
    }
}

// =============================================================================
// Estimate Status
// =============================================================================

/// Lifecycle of an estimate on the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum EstimateStatus {
    /// Freshly saved from the editor.
    #[default]
    Draft,
    /// Delivered to the customer.
    Sent,
    /// Accepted and paid.
    Paid,
    /// Withdrawn.
    Cancelled,
}

impl std::fmt::Display for EstimateStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EstimateStatus::Draft => write!(f, "draft"),
            EstimateStatus::Sent => write!(f, "sent"),
            EstimateStatus::Paid => write!(f, "paid"),
            EstimateStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

// =============================================================================
// Estimate (host record)
// =============================================================================

/// A line of a host-side estimate record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateItem {
    pub name: String,
    pub quantity: Decimal,
    pub unit_price: Money,
    pub discount_rate: Percent,
    pub line_total: Money,
}

/// The record a host keeps for a saved estimate.
///
/// Line totals come from the payload, whose amounts were recomputed from
/// quantity, rate and discount when it was decoded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Estimate {
    /// Unique identifier (UUID v4).
    pub estimate_id: String,

    /// Human-readable number, e.g. `EST-0001`.
    pub estimate_number: String,

    pub customer_name: Option<String>,

    pub date: NaiveDate,

    pub subtotal: Money,
    pub global_discount_rate: Percent,
    pub global_discount_amount: Money,
    pub tax_rate: Percent,
    pub total_tax: Money,
    pub grand_total: Money,

    pub status: EstimateStatus,

    pub items: Vec<EstimateItem>,

    pub created_at: DateTime<Utc>,
}

impl Estimate {
    /// Builds a draft estimate record from a saved payload.
    pub fn from_payload(
        payload: &EstimatePayload,
        estimate_number: impl Into<String>,
        customer_name: Option<String>,
        date: NaiveDate,
    ) -> Self {
        let totals = compute_totals(
            payload.lines(),
            payload.global_discount(),
            payload.global_tax(),
        );

        let items = payload
            .lines()
            .iter()
            .map(|line| EstimateItem {
                name: line.item().to_string(),
                quantity: line.quantity(),
                unit_price: line.rate(),
                discount_rate: line.discount(),
                line_total: line.amount(),
            })
            .collect();

        Estimate {
            estimate_id: Uuid::new_v4().to_string(),
            estimate_number: estimate_number.into(),
            customer_name,
            date,
            subtotal: totals.subtotal,
            global_discount_rate: payload.global_discount(),
            global_discount_amount: totals.discount_amount,
            tax_rate: payload.global_tax(),
            total_tax: totals.tax_amount,
            grand_total: totals.grand_total,
            status: EstimateStatus::Draft,
            items,
            created_at: Utc::now(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn monitor() -> CatalogItem {
        CatalogItem {
            id: 4,
            sku: "MONITOR001".to_string(),
            name: "4K Monitor".to_string(),
            description: "27-inch 4K UHD monitor with HDR support".to_string(),
            price: Money::from_decimal(dec!(35000)),
            tax_rate: Percent::from_whole(18),
            default_discount_rate: Percent::from_whole(5),
            category: "Electronics".to_string(),
            unit: "nos".to_string(),
            stock_quantity: 8,
            display_text: String::new(),
        }
    }

    #[test]
    fn test_catalog_label_falls_back_to_name_and_sku() {
        let mut item = monitor();
        assert_eq!(item.label(), "4K Monitor (MONITOR001)");

        item.display_text = "Monitor 27\"".to_string();
        assert_eq!(item.label(), "Monitor 27\"");
    }

    #[test]
    fn test_catalog_item_minimal_json() {
        let item: CatalogItem =
            serde_json::from_str(r#"{"id": 1, "sku": "KB001", "name": "Keyboard", "price": 5500}"#)
                .unwrap();
        assert_eq!(item.unit, "nos");
        assert_eq!(item.tax_rate, Percent::from_whole(18));
        assert!(item.default_discount_rate.is_zero());
        assert_eq!(item.rate().decimal(), dec!(5500));
    }

    #[test]
    fn test_line_amount_recomputes() {
        let mut line = LineItem::blank(1);
        line.set_quantity(dec!(2));
        assert!(line.amount().is_zero());

        line.set_rate(Money::from_decimal(dec!(35000)));
        assert_eq!(line.amount().decimal(), dec!(70000));

        line.set_discount(Percent::from_whole(5));
        assert_eq!(line.amount().decimal(), dec!(66500));
    }

    #[test]
    fn test_line_field_parsing() {
        assert_eq!("qty".parse::<LineField>().unwrap(), LineField::Quantity);
        assert_eq!("Rate".parse::<LineField>().unwrap(), LineField::Rate);
        assert_eq!("disc".parse::<LineField>().unwrap(), LineField::Discount);
        assert!("amount".parse::<LineField>().is_err());
    }

    #[test]
    fn test_payload_json_shape() {
        let mut line = LineItem::blank(1);
        line.set_item("4K Monitor (MONITOR001)");
        line.set_quantity(dec!(2));
        line.set_rate(Money::from_decimal(dec!(35000)));
        line.set_discount(Percent::from_whole(5));

        let payload =
            EstimatePayload::new(vec![line], Percent::from_whole(10), Percent::from_whole(18));
        let json = serde_json::to_value(&payload).unwrap();

        assert_eq!(json["globalDiscount"].as_f64(), Some(10.0));
        assert_eq!(json["globalTax"].as_f64(), Some(18.0));
        assert_eq!(json["lines"][0]["serial"], 1);
        assert_eq!(json["lines"][0]["item"], "4K Monitor (MONITOR001)");
        assert_eq!(json["lines"][0]["amount"].as_f64(), Some(66500.0));
    }

    #[test]
    fn test_estimate_from_payload() {
        let mut line = LineItem::blank(1);
        line.set_item("4K Monitor (MONITOR001)");
        line.set_quantity(dec!(2));
        line.set_rate(Money::from_decimal(dec!(35000)));
        line.set_discount(Percent::from_whole(5));
        let payload =
            EstimatePayload::new(vec![line], Percent::from_whole(10), Percent::from_whole(18));

        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let estimate = Estimate::from_payload(
            &payload,
            "EST-0001",
            Some("Tech Solutions Pvt Ltd".to_string()),
            date,
        );

        assert_eq!(estimate.estimate_number, "EST-0001");
        assert_eq!(estimate.status, EstimateStatus::Draft);
        assert_eq!(estimate.subtotal.decimal(), dec!(66500));
        assert_eq!(estimate.global_discount_amount.decimal(), dec!(6650));
        assert_eq!(estimate.total_tax.decimal(), dec!(10773));
        assert_eq!(estimate.grand_total.decimal(), dec!(70623));
        assert_eq!(estimate.items.len(), 1);
        assert_eq!(estimate.items[0].line_total.decimal(), dec!(66500));
        assert!(uuid::Uuid::parse_str(&estimate.estimate_id).is_ok());
    }

    #[test]
    fn test_decoded_line_recomputes_amount() {
        let line: LineItem = serde_json::from_value(serde_json::json!({
            "serial": 1, "item": "4K Monitor (MONITOR001)",
            "quantity": 2, "rate": 35000, "discount": 5, "amount": 1
        }))
        .unwrap();
        assert_eq!(line.amount().decimal(), dec!(66500));

        let line: LineItem = serde_json::from_value(serde_json::json!({
            "serial": 2, "item": "", "quantity": -3, "rate": 5e12, "discount": 250,
            "amount": 1e28
        }))
        .unwrap();
        assert_eq!(line.quantity(), Decimal::ZERO);
        assert_eq!(line.rate().decimal(), Decimal::from(crate::MAX_NUMERIC_INPUT));
        assert_eq!(line.discount().value(), dec!(100));
        assert!(line.amount().is_zero());
    }

    #[test]
    fn test_estimate_status_default() {
        assert_eq!(EstimateStatus::default(), EstimateStatus::Draft);
        assert_eq!(EstimateStatus::Cancelled.to_string(), "cancelled");
    }
}
