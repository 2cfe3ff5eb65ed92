//! # Host Messages
//!
//! Messages the editor posts to its host, and the host's receiving side.
//!
//! ## Protocol Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Editor → Host Messages                             │
//! │                                                                         │
//! │  MOUNT (once)                                                          │
//! │  ────────────                                                          │
//! │  EDITOR ───► tally:frame-height { height }                             │
//! │                                                                         │
//! │  SAVE (once per save action, never acknowledged)                       │
//! │  ───────────────────────────────────────────────                       │
//! │  EDITOR ───► tally:estimate-saved { lines, globalDiscount, globalTax } │
//! │                                                                         │
//! │  HOST SIDE (HostInbox)                                                 │
//! │  ─────────────────────                                                 │
//! │  untagged / foreign "type"  ──► ignored                                │
//! │  estimate-saved             ──► replaces any earlier payload           │
//! │  nothing received           ──► "no estimate saved yet"                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Format
//! Adjacently tagged JSON:
//! ```json
//! { "type": "tally:estimate-saved", "payload": { "lines": [...], "globalDiscount": 10, "globalTax": 18 } }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tally_core::EstimatePayload;
use tracing::{debug, warn};
use ts_rs::TS;

use crate::error::EditorResult;

/// Discriminator of the saved-estimate message.
pub const ESTIMATE_SAVED_TAG: &str = "tally:estimate-saved";

/// Discriminator of the mount-time height announcement.
pub const FRAME_HEIGHT_TAG: &str = "tally:frame-height";

// =============================================================================
// Message Enum (Tagged Union)
// =============================================================================

/// All editor-to-host messages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "type", content = "payload")]
pub enum HostMessage {
    /// The authoritative saved estimate.
    #[serde(rename = "tally:estimate-saved")]
    EstimateSaved(EstimatePayload),

    /// Height the host should give the editor frame.
    #[serde(rename = "tally:frame-height")]
    FrameHeight { height: u32 },
}

impl HostMessage {
    /// The `type` discriminator this message carries.
    pub fn tag(&self) -> &'static str {
        match self {
            HostMessage::EstimateSaved(_) => ESTIMATE_SAVED_TAG,
            HostMessage::FrameHeight { .. } => FRAME_HEIGHT_TAG,
        }
    }

    /// Encodes to the JSON value posted on the channel.
    pub fn to_value(&self) -> EditorResult<Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Decodes a JSON value known to carry one of our tags.
    pub fn from_value(value: &Value) -> EditorResult<Self> {
        Ok(HostMessage::deserialize(value)?)
    }

    /// Whether a raw message carries one of the editor's tags.
    pub fn is_tagged(value: &Value) -> bool {
        matches!(
            value.get("type").and_then(Value::as_str),
            Some(ESTIMATE_SAVED_TAG) | Some(FRAME_HEIGHT_TAG)
        )
    }
}

// =============================================================================
// Host Inbox
// =============================================================================

/// What [`HostInbox::accept`] did with a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accepted {
    /// A saved estimate replaced the previous one.
    EstimateSaved,
    /// The editor announced its height.
    FrameHeight(u32),
    /// Untagged, foreign or malformed; nothing changed.
    Ignored,
}

/// The host's receiving contract.
///
/// Keeps only the most recent saved payload. `latest()` returning `None`
/// means no estimate has been saved yet.
#[derive(Debug, Clone, Default)]
pub struct HostInbox {
    latest: Option<EstimatePayload>,
    frame_height: Option<u32>,
    saves_received: usize,
}

impl HostInbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handles one raw message from the channel.
    pub fn accept(&mut self, message: &Value) -> Accepted {
        if !HostMessage::is_tagged(message) {
            debug!("Ignoring message without a tally tag");
            return Accepted::Ignored;
        }

        let parsed = match HostMessage::from_value(message) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!(error = %e, "Dropping malformed host message");
                return Accepted::Ignored;
            }
        };

        match parsed {
            HostMessage::EstimateSaved(payload) => {
                debug!(lines = payload.lines().len(), "Estimate payload received");
                self.latest = Some(payload);
                self.saves_received += 1;
                Accepted::EstimateSaved
            }
            HostMessage::FrameHeight { height } => {
                self.frame_height = Some(height);
                Accepted::FrameHeight(height)
            }
        }
    }

    /// The authoritative saved estimate, if any.
    pub fn latest(&self) -> Option<&EstimatePayload> {
        self.latest.as_ref()
    }

    pub fn frame_height(&self) -> Option<u32> {
        self.frame_height
    }

    /// Number of saved-estimate messages accepted so far.
    pub fn saves_received(&self) -> usize {
        self.saves_received
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tally_core::{LineField, LineItems, Percent};

    fn payload(qty: &str) -> EstimatePayload {
        let mut lines = LineItems::with_blank_line();
        lines.update_field(0, LineField::Item, "4K Monitor (MONITOR001)").unwrap();
        lines.update_field(0, LineField::Quantity, qty).unwrap();
        lines.update_field(0, LineField::Rate, "35000").unwrap();
        lines.update_field(0, LineField::Discount, "5").unwrap();
        EstimatePayload::new(lines.snapshot(), Percent::from_whole(10), Percent::from_whole(18))
    }

    #[test]
    fn test_wire_shape() {
        let value = HostMessage::EstimateSaved(payload("2")).to_value().unwrap();

        assert_eq!(value["type"], ESTIMATE_SAVED_TAG);
        assert_eq!(value["payload"]["globalDiscount"].as_f64(), Some(10.0));
        assert_eq!(value["payload"]["globalTax"].as_f64(), Some(18.0));
        assert_eq!(value["payload"]["lines"][0]["quantity"].as_f64(), Some(2.0));
        assert_eq!(value["payload"]["lines"][0]["amount"].as_f64(), Some(66500.0));

        let height = HostMessage::FrameHeight { height: 560 }.to_value().unwrap();
        assert_eq!(height, json!({"type": FRAME_HEIGHT_TAG, "payload": {"height": 560}}));
    }

    #[test]
    fn test_inbox_ignores_foreign_messages() {
        let mut inbox = HostInbox::new();

        assert_eq!(inbox.accept(&json!({"lines": []})), Accepted::Ignored);
        assert_eq!(inbox.accept(&json!({"type": "streamlit:render"})), Accepted::Ignored);
        assert_eq!(inbox.accept(&json!("tally:estimate-saved")), Accepted::Ignored);
        assert!(inbox.latest().is_none());
    }

    #[test]
    fn test_inbox_ignores_malformed_tagged_message() {
        let mut inbox = HostInbox::new();
        let bad = json!({"type": ESTIMATE_SAVED_TAG, "payload": {"lines": "nope"}});
        assert_eq!(inbox.accept(&bad), Accepted::Ignored);
        assert!(inbox.latest().is_none());
    }

    #[test]
    fn test_inbox_latest_overwrites() {
        let mut inbox = HostInbox::new();

        let first = HostMessage::EstimateSaved(payload("1")).to_value().unwrap();
        let second = HostMessage::EstimateSaved(payload("3")).to_value().unwrap();

        assert_eq!(inbox.accept(&first), Accepted::EstimateSaved);
        assert_eq!(inbox.accept(&second), Accepted::EstimateSaved);

        let latest = inbox.latest().unwrap();
        assert_eq!(latest.lines()[0].quantity(), rust_decimal::Decimal::from(3));
        assert_eq!(inbox.saves_received(), 2);
    }

    #[test]
    fn test_inbox_records_frame_height() {
        let mut inbox = HostInbox::new();
        let msg = HostMessage::FrameHeight { height: 640 }.to_value().unwrap();
        assert_eq!(inbox.accept(&msg), Accepted::FrameHeight(640));
        assert_eq!(inbox.frame_height(), Some(640));
        assert!(inbox.latest().is_none());
    }

    #[test]
    fn test_round_trip_preserves_payload() {
        let original = HostMessage::EstimateSaved(payload("2"));
        let decoded = HostMessage::from_value(&original.to_value().unwrap()).unwrap();
        assert_eq!(decoded, original);
    }
}
