//! # Inventory Index
//!
//! Read-only catalog with substring search for line autocomplete.
//!
//! ## Search Flow
//! ```text
//! user types "mo" into a line's item field
//!        │
//!        ▼
//! normalize_search_term ── < 2 chars? ──► [] (no query at all)
//!        │
//!        ▼ "mo"
//! ┌──────────────────────────────────────────────┐
//! │  name / sku / description (lowercased once)  │
//! │  "gaming laptop" "laptop001" ...             │
//! │  "wireless mouse" "mouse001" ... ◄── match   │
//! │  "mechanical keyboard" "kb001" ...           │
//! │  "4k monitor" "monitor001" ...   ◄── match   │
//! │  "gaming chair" "chair001" ...               │
//! └──────────────────────────────────────────────┘
//!        │ catalog order, first 5
//!        ▼
//! [Wireless Mouse, 4K Monitor]
//! ```

use crate::types::CatalogItem;
use crate::validation::normalize_search_term;
use crate::MAX_SEARCH_RESULTS;

/// The inventory offered to the editor for autocomplete.
///
/// Built once from the host's catalog and never modified afterwards.
#[derive(Debug, Clone, Default)]
pub struct InventoryIndex {
    items: Vec<CatalogItem>,
    /// Lowercased name, SKU and description per item, parallel to `items`.
    haystacks: Vec<[String; 3]>,
}

impl InventoryIndex {
    /// Indexes a catalog, keeping its order.
    pub fn new(items: Vec<CatalogItem>) -> Self {
        let haystacks = items
            .iter()
            .map(|item| {
                [
                    item.name.to_lowercase(),
                    item.sku.to_lowercase(),
                    item.description.to_lowercase(),
                ]
            })
            .collect();

        InventoryIndex { items, haystacks }
    }

    /// Finds up to five items whose name, SKU or description contains `term`.
    ///
    /// Matching is case-insensitive. Terms shorter than two characters
    /// (after trimming) return nothing. Results keep catalog order.
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::catalog::InventoryIndex;
    /// use tally_core::types::CatalogItem;
    ///
    /// let items: Vec<CatalogItem> = serde_json::from_str(r#"[
    ///     {"id": 1, "sku": "MOUSE001", "name": "Wireless Mouse", "price": 2500},
    ///     {"id": 2, "sku": "MONITOR001", "name": "4K Monitor", "price": 35000}
    /// ]"#).unwrap();
    /// let index = InventoryIndex::new(items);
    ///
    /// assert_eq!(index.search("MO").len(), 2);
    /// assert_eq!(index.search("mouse")[0].sku, "MOUSE001");
    /// assert!(index.search("m").is_empty());
    /// ```
    pub fn search(&self, term: &str) -> Vec<&CatalogItem> {
        let Some(needle) = normalize_search_term(term) else {
            return Vec::new();
        };

        self.items
            .iter()
            .zip(&self.haystacks)
            .filter(|(_, fields)| fields.iter().any(|field| field.contains(&needle)))
            .map(|(item, _)| item)
            .take(MAX_SEARCH_RESULTS)
            .collect()
    }

    /// Looks up an item by exact SKU.
    pub fn find_by_sku(&self, sku: &str) -> Option<&CatalogItem> {
        self.items.iter().find(|item| item.sku == sku)
    }

    #[inline]
    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl From<Vec<CatalogItem>> for InventoryIndex {
    fn from(items: Vec<CatalogItem>) -> Self {
        InventoryIndex::new(items)
    }
}
