//! # Estimate Editor
//!
//! One mounted editor instance: session state, keyboard focus, the
//! autocomplete list and the save protocol.
//!
//! ## Save Protocol
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Save State Machine                                │
//! │                                                                         │
//! │              save() with ≥1 line                                       │
//! │   ┌─────────┐ ─────────────────────────► ┌─────────┐                    │
//! │   │ Editing │                            │  Saved  │ ── save() again ──┐│
//! │   └─────────┘ ◄───────────────────────── └─────────┘ ◄─────────────────┘│
//! │     │    ▲        any edit / clear          │                          │
//! │     │    │                                  └─► one tally:estimate-saved│
//! │     └────┘ save() with 0 lines                  per save, no ack        │
//! │            notice set, nothing emitted                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All operations are synchronous; posting to the host never waits.

use tally_core::{CatalogItem, EstimatePayload, InventoryIndex, LineField, LineItem, Totals};
use tracing::{debug, info, warn};

use crate::channel::HostLink;
use crate::config::EditorConfig;
use crate::display::{EditorView, TotalsView};
use crate::error::{EditorError, EditorResult};
use crate::navigation::{FocusTarget, Key};
use crate::protocol::HostMessage;
use crate::session::EstimateSession;
use crate::suggest::SuggestionList;

/// Where the save protocol stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SaveState {
    #[default]
    Editing,
    Saved,
}

/// What a key press did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Focus moved (or stayed) at this target.
    Focus(FocusTarget),
    /// Enter on AddLine appended a line.
    LineAdded { index: usize },
    /// The highlighted suggestion was applied to a line.
    SuggestionSelected { line: usize },
    /// The suggestion list closed without a selection.
    SuggestionsClosed,
    /// The suggestion highlight moved.
    Highlight(Option<usize>),
    /// Enter on Save emitted a payload.
    Saved,
    /// Enter on Save with no lines; a notice is showing.
    SaveRejected,
    /// Enter on Clear reset the session.
    Cleared,
    /// Nothing to do for this key here.
    Ignored,
}

/// A mounted estimate editor.
#[derive(Debug)]
pub struct EstimateEditor {
    currency_symbol: String,
    inventory: InventoryIndex,
    session: EstimateSession,
    focus: FocusTarget,
    suggestions: Option<SuggestionList>,
    save_state: SaveState,
    notice: Option<String>,
    link: HostLink,
}

impl EstimateEditor {
    /// Mounts an editor and announces its frame height to the host.
    pub fn mount(config: EditorConfig, link: HostLink) -> Self {
        let session = EstimateSession::new(config.default_global_tax);
        let focus = FocusTarget::first(session.len());

        info!(
            items = config.inventory.len(),
            default_tax = %config.default_global_tax,
            "Estimate editor mounted"
        );
        link.post(&HostMessage::FrameHeight {
            height: config.frame_height,
        });

        EstimateEditor {
            currency_symbol: config.currency_symbol,
            inventory: InventoryIndex::new(config.inventory),
            session,
            focus,
            suggestions: None,
            save_state: SaveState::Editing,
            notice: None,
            link,
        }
    }

    /// Detaches from the host. Further saves are not delivered.
    pub fn unmount(&mut self) {
        self.link.deregister();
        info!("Estimate editor unmounted");
    }

    // =========================================================================
    // Line Operations
    // =========================================================================

    /// Appends a blank line and focuses its item field.
    pub fn add_line(&mut self) -> usize {
        let index = self.session.add_line();
        self.focus = FocusTarget::Line {
            index,
            field: LineField::Item,
        };
        self.touch();
        debug!(line = index + 1, "Line added");
        index
    }

    /// Removes a line. Remaining lines renumber from 1.
    pub fn remove_line(&mut self, index: usize) -> EditorResult<LineItem> {
        let removed = self.session.remove_line(index)?;
        self.suggestions = None;
        self.focus = self.focus.clamp(self.session.len());
        self.touch();
        debug!(line = index + 1, remaining = self.session.len(), "Line removed");
        Ok(removed)
    }

    /// Sets a line field from raw input.
    pub fn update_field(&mut self, index: usize, field: LineField, raw: &str) -> EditorResult<()> {
        self.session.update_field(index, field, raw)?;
        self.touch();
        debug!(line = index + 1, %field, value = raw, "Line field updated");
        Ok(())
    }

    /// Types into a line's item field and refreshes the suggestion list.
    ///
    /// Returns how many suggestions are showing.
    pub fn type_item(&mut self, index: usize, text: &str) -> EditorResult<usize> {
        self.update_field(index, LineField::Item, text)?;
        self.focus = FocusTarget::Line {
            index,
            field: LineField::Item,
        };

        let found: Vec<CatalogItem> = self.inventory.search(text).into_iter().cloned().collect();
        self.suggestions = SuggestionList::open(index, found);

        let shown = self.suggestions.as_ref().map_or(0, SuggestionList::len);
        debug!(line = index + 1, term = text, shown, "Inventory searched");
        Ok(shown)
    }

    /// Applies the `k`-th open suggestion to its line.
    ///
    /// Overwrites the line's label, rate and discount, closes the list and
    /// moves focus to the line's quantity.
    pub fn select_suggestion(&mut self, k: usize) -> EditorResult<()> {
        let list = self.suggestions.as_ref().ok_or(EditorError::NoSuggestions)?;
        let item = list
            .get(k)
            .cloned()
            .ok_or(EditorError::SuggestionOutOfRange {
                index: k,
                len: list.len(),
            })?;
        let line = list.line();

        self.session.apply_catalog_item(line, &item)?;
        self.suggestions = None;
        self.focus = FocusTarget::Line {
            index: line,
            field: LineField::Quantity,
        };
        self.touch();
        debug!(line = line + 1, sku = %item.sku, "Catalog item selected");
        Ok(())
    }

    /// Closes the suggestion list without selecting.
    pub fn close_suggestions(&mut self) {
        self.suggestions = None;
    }

    // =========================================================================
    // Global Fields
    // =========================================================================

    pub fn set_global_discount(&mut self, raw: &str) {
        self.session.set_global_discount(raw);
        self.touch();
        debug!(discount = %self.session.global_discount(), "Global discount set");
    }

    pub fn set_global_tax(&mut self, raw: &str) {
        self.session.set_global_tax(raw);
        self.touch();
        debug!(tax = %self.session.global_tax(), "Global tax set");
    }

    // =========================================================================
    // Save / Clear
    // =========================================================================

    /// Saves the estimate.
    ///
    /// With no lines nothing is emitted, a notice is set and
    /// [`EditorError::EmptyEstimate`] is returned. Otherwise exactly one
    /// `tally:estimate-saved` message is posted and the payload returned.
    pub fn save(&mut self) -> EditorResult<EstimatePayload> {
        if self.session.is_empty() {
            let err = EditorError::EmptyEstimate;
            warn!("Save rejected: estimate has no lines");
            self.notice = Some(err.to_string());
            self.save_state = SaveState::Editing;
            return Err(err);
        }

        let payload = self.session.snapshot();
        self.link.post(&HostMessage::EstimateSaved(payload.clone()));
        self.save_state = SaveState::Saved;
        self.notice = None;

        info!(
            lines = payload.lines().len(),
            grand_total = %self.totals().grand_total,
            "Estimate saved"
        );
        Ok(payload)
    }

    /// Resets to one blank line, zero discount and the default tax.
    ///
    /// Local only; nothing is sent to the host.
    pub fn clear(&mut self) {
        self.session.clear();
        self.suggestions = None;
        self.focus = FocusTarget::first(self.session.len());
        self.save_state = SaveState::Editing;
        self.notice = None;
        debug!("Estimate cleared");
    }

    // =========================================================================
    // Keyboard
    // =========================================================================

    /// Handles a key press at the current focus.
    pub fn handle_key(&mut self, key: Key) -> EditorResult<KeyOutcome> {
        if self.suggestions.is_some() {
            return self.handle_list_key(key);
        }

        let count = self.session.len();
        let outcome = match key {
            Key::Tab => {
                self.focus = self.focus.next(count);
                KeyOutcome::Focus(self.focus)
            }
            Key::BackTab => {
                self.focus = self.focus.prev(count);
                KeyOutcome::Focus(self.focus)
            }
            Key::Enter => self.handle_enter()?,
            Key::Escape | Key::Up | Key::Down => KeyOutcome::Ignored,
        };
        Ok(outcome)
    }

    fn handle_list_key(&mut self, key: Key) -> EditorResult<KeyOutcome> {
        let count = self.session.len();
        let outcome = match key {
            Key::Up => KeyOutcome::Highlight(self.list_mut().and_then(SuggestionList::move_up)),
            Key::Down => KeyOutcome::Highlight(self.list_mut().and_then(SuggestionList::move_down)),
            Key::Escape => {
                self.suggestions = None;
                KeyOutcome::SuggestionsClosed
            }
            Key::Tab => {
                self.suggestions = None;
                self.focus = self.focus.next(count);
                KeyOutcome::Focus(self.focus)
            }
            Key::BackTab => {
                self.suggestions = None;
                self.focus = self.focus.prev(count);
                KeyOutcome::Focus(self.focus)
            }
            Key::Enter => {
                let highlighted = self.suggestions.as_ref().and_then(|list| {
                    list.highlight().map(|k| (k, list.line()))
                });
                match highlighted {
                    Some((k, line)) => {
                        self.select_suggestion(k)?;
                        KeyOutcome::SuggestionSelected { line }
                    }
                    None => {
                        self.suggestions = None;
                        self.focus = self.focus.enter_target();
                        KeyOutcome::Focus(self.focus)
                    }
                }
            }
        };
        Ok(outcome)
    }

    fn handle_enter(&mut self) -> EditorResult<KeyOutcome> {
        let outcome = match self.focus {
            FocusTarget::AddLine => KeyOutcome::LineAdded {
                index: self.add_line(),
            },
            FocusTarget::Save => match self.save() {
                Ok(_) => KeyOutcome::Saved,
                Err(EditorError::EmptyEstimate) => KeyOutcome::SaveRejected,
                Err(e) => return Err(e),
            },
            FocusTarget::Clear => {
                self.clear();
                KeyOutcome::Cleared
            }
            target => {
                self.focus = target.enter_target();
                KeyOutcome::Focus(self.focus)
            }
        };
        Ok(outcome)
    }

    fn list_mut(&mut self) -> Option<&mut SuggestionList> {
        self.suggestions.as_mut()
    }

    /// Any edit leaves the saved state.
    fn touch(&mut self) {
        self.save_state = SaveState::Editing;
        self.notice = None;
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn session(&self) -> &EstimateSession {
        &self.session
    }

    pub fn totals(&self) -> Totals {
        self.session.totals()
    }

    pub fn totals_view(&self) -> TotalsView {
        TotalsView::new(&self.totals(), &self.currency_symbol)
    }

    pub fn view(&self) -> EditorView {
        EditorView::new(&self.session, &self.currency_symbol)
    }

    pub fn focus(&self) -> FocusTarget {
        self.focus
    }

    /// Moves focus directly (a click on a control).
    pub fn set_focus(&mut self, target: FocusTarget) {
        self.focus = target.clamp(self.session.len());
        self.suggestions = None;
    }

    pub fn suggestions(&self) -> Option<&SuggestionList> {
        self.suggestions.as_ref()
    }

    pub fn save_state(&self) -> SaveState {
        self.save_state
    }

    /// The blocking notice shown to the user, if any.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn inventory(&self) -> &InventoryIndex {
        &self.inventory
    }

    pub fn currency_symbol(&self) -> &str {
        &self.currency_symbol
    }

    pub fn is_mounted(&self) -> bool {
        self.link.is_registered()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
