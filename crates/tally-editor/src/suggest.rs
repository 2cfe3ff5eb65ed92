//! # Autocomplete List
//!
//! The suggestion list shown under a line's item field while typing.
//!
//! ```text
//!  line 2 item: "mo"
//!  ┌───────────────────────────┐
//!  │   Wireless Mouse (MOUSE001)│   highlight: None until Up/Down
//!  │ ▶ 4K Monitor (MONITOR001)  │   Down past the end stays on the last
//!  └───────────────────────────┘   Up past the top stays on the first
//! ```

use tally_core::CatalogItem;

/// An open suggestion list bound to one line.
#[derive(Debug, Clone, PartialEq)]
pub struct SuggestionList {
    line: usize,
    items: Vec<CatalogItem>,
    highlight: Option<usize>,
}

impl SuggestionList {
    /// Opens a list for `line`; `None` when there is nothing to show.
    pub fn open(line: usize, items: Vec<CatalogItem>) -> Option<Self> {
        if items.is_empty() {
            return None;
        }
        Some(SuggestionList {
            line,
            items,
            highlight: None,
        })
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&CatalogItem> {
        self.items.get(index)
    }

    pub fn highlight(&self) -> Option<usize> {
        self.highlight
    }

    pub fn highlighted(&self) -> Option<&CatalogItem> {
        self.highlight.and_then(|i| self.items.get(i))
    }

    /// Moves the highlight down, starting at the first entry.
    pub fn move_down(&mut self) -> Option<usize> {
        let last = self.items.len().saturating_sub(1);
        self.highlight = Some(match self.highlight {
            None => 0,
            Some(i) => (i + 1).min(last),
        });
        self.highlight
    }

    /// Moves the highlight up, starting at the first entry.
    pub fn move_up(&mut self) -> Option<usize> {
        self.highlight = Some(self.highlight.map_or(0, |i| i.saturating_sub(1)));
        self.highlight
    }
}
