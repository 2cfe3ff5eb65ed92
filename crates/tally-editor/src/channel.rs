//! # Host Channel
//!
//! One-way, fire-and-forget link from an editor to its host.
//!
//! ## Shape
//! ```text
//! ┌──────────────┐   post(&HostMessage)    ┌──────────────┐
//! │   HostLink   │ ──── JSON Value ──────► │ HostReceiver │ ──► HostInbox
//! │ (editor end) │   unbounded mpsc        │  (host end)  │
//! └──────────────┘   no ack, no retry      └──────────────┘
//! ```
//!
//! The channel carries raw `serde_json::Value`s so the host sees exactly
//! what it would see from any other producer and must filter by tag.
//! Posting never blocks. A closed receiver is not reported to the editor.
//! Deregistering (or dropping) the link closes the channel, so the host's
//! `recv` loop ends once it has drained what was already posted.

use serde_json::Value;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::protocol::HostMessage;

/// Creates a connected link/receiver pair.
pub fn host_channel() -> (HostLink, HostReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (HostLink { tx: Some(tx) }, HostReceiver { rx })
}

// =============================================================================
// Editor End
// =============================================================================

/// The editor's end of the host channel.
///
/// Not `Clone`: one registered listener per editor instance.
#[derive(Debug)]
pub struct HostLink {
    tx: Option<mpsc::UnboundedSender<Value>>,
}

impl HostLink {
    /// A link with no host behind it. Posts go nowhere.
    pub fn detached() -> Self {
        HostLink { tx: None }
    }

    /// Posts a message without waiting for the host.
    ///
    /// Delivery failures (host gone, link deregistered) are swallowed.
    pub fn post(&self, message: &HostMessage) {
        let Some(tx) = &self.tx else {
            debug!(tag = message.tag(), "No host registered, message dropped");
            return;
        };

        let value = match message.to_value() {
            Ok(value) => value,
            Err(e) => {
                warn!(tag = message.tag(), error = %e, "Failed to encode host message");
                return;
            }
        };

        if tx.send(value).is_err() {
            debug!(tag = message.tag(), "Host receiver closed, message dropped");
        }
    }

    /// Detaches from the host. Later posts are dropped.
    pub fn deregister(&mut self) {
        if self.tx.take().is_some() {
            debug!("Host link deregistered");
        }
    }

    pub fn is_registered(&self) -> bool {
        self.tx.is_some()
    }
}

// =============================================================================
// Host End
// =============================================================================

/// The host's end of the channel.
#[derive(Debug)]
pub struct HostReceiver {
    rx: mpsc::UnboundedReceiver<Value>,
}

impl HostReceiver {
    /// Waits for the next message; `None` once the link is gone and the
    /// queue is drained.
    pub async fn recv(&mut self) -> Option<Value> {
        self.rx.recv().await
    }

    /// Takes a queued message without waiting.
    pub fn try_recv(&mut self) -> Option<Value> {
        self.rx.try_recv().ok()
    }
}
