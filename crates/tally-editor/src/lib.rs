//! # tally-editor: Estimate Editor for Tally
//!
//! The line-item estimate editor: a live session over `tally-core`, keyboard
//! navigation with inventory autocomplete, and the save protocol that hands
//! finished estimates to the host application.
//!
//! ## Architecture Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Editor Architecture                              │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                 EstimateEditor (editor.rs)                       │  │
//! │  │                                                                  │  │
//! │  │  mount() ── posts frame height once                              │  │
//! │  │  edits  ── session + focus + suggestion list                     │  │
//! │  │  save() ── one tally:estimate-saved per save, no ack             │  │
//! │  └────────────────────────────┬─────────────────────────────────────┘  │
//! │                               │                                         │
//! │         ┌─────────────────────┼─────────────────────┐                  │
//! │         ▼                     ▼                     ▼                   │
//! │  ┌────────────────┐  ┌────────────────┐  ┌────────────────────────┐    │
//! │  │ EstimateSession│  │  navigation /  │  │  HostLink ──► Receiver │    │
//! │  │                │  │  suggest       │  │                        │    │
//! │  │ lines, global  │  │ tab order,     │  │ unbounded mpsc of      │    │
//! │  │ discount & tax │  │ autocomplete   │  │ tagged JSON messages   │    │
//! │  └────────────────┘  └────────────────┘  └───────────┬────────────┘    │
//! │                                                      ▼                  │
//! │                                          ┌────────────────────────┐    │
//! │                                          │  HostInbox (host side) │    │
//! │                                          │  latest payload wins   │    │
//! │                                          └────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//! - [`editor`] - `EstimateEditor`, save state machine, key handling
//! - [`session`] - Lines plus global discount / tax
//! - [`protocol`] - Tagged host messages and the host inbox
//! - [`channel`] - One-way host link
//! - [`navigation`] - Focus targets and tab order
//! - [`suggest`] - Autocomplete list state
//! - [`display`] - Currency-formatted views
//! - [`config`] - Editor configuration
//! - [`error`] - Editor error types
//!
//! ## Example
//! ```rust
//! use tally_editor::{host_channel, EditorConfig, EstimateEditor, HostInbox};
//! use tally_core::LineField;
//!
//! let (link, mut receiver) = host_channel();
//! let mut editor = EstimateEditor::mount(EditorConfig::default(), link);
//! editor.update_field(0, LineField::Quantity, "2").unwrap();
//! editor.update_field(0, LineField::Rate, "35000").unwrap();
//! editor.save().unwrap();
//!
//! let mut inbox = HostInbox::new();
//! while let Some(message) = receiver.try_recv() {
//!     inbox.accept(&message);
//! }
//! assert_eq!(inbox.latest().unwrap().lines().len(), 1);
//! ```

pub mod channel;
pub mod config;
pub mod display;
pub mod editor;
pub mod error;
pub mod navigation;
pub mod protocol;
pub mod session;
pub mod suggest;

pub use channel::{host_channel, HostLink, HostReceiver};
pub use config::EditorConfig;
pub use display::{EditorView, LineView, TotalsView};
pub use editor::{EstimateEditor, KeyOutcome, SaveState};
pub use error::{EditorError, EditorResult};
pub use navigation::{FocusTarget, Key};
pub use protocol::{Accepted, HostInbox, HostMessage, ESTIMATE_SAVED_TAG, FRAME_HEIGHT_TAG};
pub use session::EstimateSession;
pub use suggest::SuggestionList;
