//! # tally-core: Pure Business Logic for Tally Estimates
//!
//! This crate is the **heart** of the estimate editor. It contains the line
//! math, the totals engine and the catalog search as pure functions with
//! zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Tally Architecture                               │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Host (apps/desk)                             │   │
//! │  │    Console ──► Editor ──► Save ──► Receiver ──► Estimate        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ tagged host messages                   │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    tally-editor                                 │   │
//! │  │    session, save protocol, keyboard navigation, autocomplete    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ tally-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌──────────┐ │   │
//! │  │   │  money  │ │ catalog │ │  lines  │ │ totals  │ │validation│ │   │
//! │  │   │  Money  │ │ Index   │ │LineItems│ │ Totals  │ │ parsing  │ │   │
//! │  │   │ Percent │ │ search  │ │ amounts │ │ engine  │ │  policy  │ │   │
//! │  │   └─────────┘ └─────────┘ └─────────┘ └─────────┘ └──────────┘ │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (CatalogItem, LineItem, EstimatePayload, Estimate)
//! - [`money`] - Money and Percent types with exact decimal arithmetic
//! - [`catalog`] - Inventory index (autocomplete search)
//! - [`lines`] - Line model (add / remove / update with amount recompute)
//! - [`totals`] - Totals engine (subtotal, discount, tax, grand total)
//! - [`validation`] - Lenient input policy and business rule validation
//! - [`numbering`] - Estimate number sequence
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use tally_core::lines::LineItems;
//! use tally_core::money::Percent;
//! use tally_core::totals::compute_totals;
//! use tally_core::types::LineField;
//!
//! let mut lines = LineItems::with_blank_line();
//! lines.update_field(0, LineField::Quantity, "2").unwrap();
//! lines.update_field(0, LineField::Rate, "35000").unwrap();
//! lines.update_field(0, LineField::Discount, "5").unwrap();
//!
//! let totals = compute_totals(lines.as_slice(), Percent::from_input("10"), Percent::from_input("18"));
//! assert_eq!(totals.grand_total.to_string(), "70623.00");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod error;
pub mod lines;
pub mod money;
pub mod numbering;
pub mod totals;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use catalog::InventoryIndex;
pub use error::{CoreError, CoreResult, ValidationError};
pub use lines::LineItems;
pub use money::{Money, Percent};
pub use totals::{compute_totals, Totals};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Global tax percentage applied when the host does not configure one.
///
/// This is only the fallback for configuration; the editor always receives
/// its default tax through `EditorConfig`.
pub const DEFAULT_GLOBAL_TAX_PERCENT: u32 = 18;

/// Largest quantity or rate accepted from user input.
///
/// Larger values are clamped so that summing many lines can never leave the
/// range of `Decimal`.
pub const MAX_NUMERIC_INPUT: i64 = 1_000_000_000_000;

/// Minimum search term length (in characters) before the catalog is queried.
pub const MIN_SEARCH_TERM_LEN: usize = 2;

/// Maximum number of autocomplete suggestions returned per search.
pub const MAX_SEARCH_RESULTS: usize = 5;
