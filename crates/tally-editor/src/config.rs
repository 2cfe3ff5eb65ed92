//! # Editor Configuration
//!
//! Inbound configuration handed to the editor by its host.
//!
//! ```json
//! { "currency_symbol": "₹", "default_global_tax": 18,
//!   "frame_height": 560, "inventory": [ ... ] }
//! ```
//!
//! Every field is optional. The editor does no I/O, so loading this from a
//! file is the host's job (see the desk app's `DeskConfig`).

use serde::{Deserialize, Serialize};
use tally_core::{CatalogItem, Percent, DEFAULT_GLOBAL_TAX_PERCENT};

/// Default frame height (pixels) announced to the host on mount.
pub const DEFAULT_FRAME_HEIGHT: u32 = 560;

/// Configuration for one editor instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Display-only currency symbol.
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,

    /// Global tax applied at mount and restored by clear.
    #[serde(default = "default_global_tax")]
    pub default_global_tax: Percent,

    /// Height announced once on mount.
    #[serde(default = "default_frame_height")]
    pub frame_height: u32,

    /// Catalog offered for autocomplete, in display order.
    #[serde(default)]
    pub inventory: Vec<CatalogItem>,
}

fn default_currency_symbol() -> String {
    "₹".to_string()
}

fn default_global_tax() -> Percent {
    Percent::from_whole(DEFAULT_GLOBAL_TAX_PERCENT)
}

fn default_frame_height() -> u32 {
    DEFAULT_FRAME_HEIGHT
}

impl Default for EditorConfig {
    fn default() -> Self {
        EditorConfig {
            currency_symbol: default_currency_symbol(),
            default_global_tax: default_global_tax(),
            frame_height: default_frame_height(),
            inventory: Vec::new(),
        }
    }
}

impl EditorConfig {
    pub fn with_inventory(mut self, inventory: Vec<CatalogItem>) -> Self {
        self.inventory = inventory;
        self
    }

    pub fn with_currency_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.currency_symbol = symbol.into();
        self
    }

    pub fn with_default_global_tax(mut self, tax: Percent) -> Self {
        self.default_global_tax = tax;
        self
    }

    pub fn with_frame_height(mut self, height: u32) -> Self {
        self.frame_height = height;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_defaults() {
        let config = EditorConfig::default();
        assert_eq!(config.currency_symbol, "₹");
        assert_eq!(config.default_global_tax.value(), dec!(18));
        assert_eq!(config.frame_height, 560);
        assert!(config.inventory.is_empty());
    }

    #[test]
    fn test_empty_json_uses_defaults() {
        let config: EditorConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, EditorConfig::default());
    }

    #[test]
    fn test_partial_json() {
        let config: EditorConfig = serde_json::from_str(
            r#"{"currency_symbol": "$", "default_global_tax": 7.25,
                "inventory": [{"id": 1, "sku": "KB001", "name": "Keyboard", "price": 55}]}"#,
        )
        .unwrap();
        assert_eq!(config.currency_symbol, "$");
        assert_eq!(config.default_global_tax.value(), dec!(7.25));
        assert_eq!(config.frame_height, DEFAULT_FRAME_HEIGHT);
        assert_eq!(config.inventory.len(), 1);
    }
}
