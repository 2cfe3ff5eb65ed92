//! # Host Receiver
//!
//! The desk's side of the save protocol. Every message from the editor
//! passes through a [`HostInbox`]; each accepted save becomes a numbered
//! [`Estimate`] record.
//!
//! ```text
//!   HostReceiver ──► HostInbox::accept ──► EstimateSaved? ──► Estimate
//!                        │                                     │
//!                        └── frame height / foreign: logged    └── summary printed
//! ```

use std::fmt;

use chrono::{Local, NaiveDate};
use tally_core::numbering::EstimateNumberSequence;
use tally_core::Estimate;
use tally_editor::{Accepted, HostInbox, HostReceiver};
use tracing::{debug, info, warn};

use crate::config::DeskConfig;
use crate::error::DeskResult;

/// Turns saved payloads into numbered estimates.
#[derive(Debug)]
pub struct EstimateRecorder {
    sequence: EstimateNumberSequence,
    customer: Option<String>,
    business_name: String,
    currency_symbol: String,
    terms: String,
    inbox: HostInbox,
    estimates: Vec<Estimate>,
}

impl EstimateRecorder {
    pub fn new(config: &DeskConfig, customer: Option<String>) -> DeskResult<Self> {
        let sequence =
            EstimateNumberSequence::new(&config.estimate.prefix, config.estimate.next_number)?;

        Ok(EstimateRecorder {
            sequence,
            customer: customer.filter(|name| !name.trim().is_empty()),
            business_name: config.business.name.clone(),
            currency_symbol: config.business.currency_symbol.clone(),
            terms: config.estimate.terms.clone(),
            inbox: HostInbox::new(),
            estimates: Vec::new(),
        })
    }

    /// Handles one raw message, returning the estimate it produced.
    pub fn handle(&mut self, message: &serde_json::Value) -> Option<&Estimate> {
        self.handle_on(message, Local::now().date_naive())
    }

    fn handle_on(&mut self, message: &serde_json::Value, date: NaiveDate) -> Option<&Estimate> {
        match self.inbox.accept(message) {
            Accepted::EstimateSaved => {}
            Accepted::FrameHeight(height) => {
                debug!(height, "Editor frame height received");
                return None;
            }
            Accepted::Ignored => return None,
        }

        let payload = self.inbox.latest()?;

        if self.customer.is_none() {
            warn!("No customer name given, recording estimate without one");
        }

        let number = self.sequence.issue();
        let estimate = Estimate::from_payload(payload, number, self.customer.clone(), date);

        info!(
            estimate_number = %estimate.estimate_number,
            items = estimate.items.len(),
            grand_total = %estimate.grand_total,
            "Estimate recorded"
        );

        self.estimates.push(estimate);
        self.estimates.last()
    }

    /// Summary of an estimate for the console.
    pub fn summary<'a>(&'a self, estimate: &'a Estimate) -> EstimateSummary<'a> {
        EstimateSummary {
            business_name: &self.business_name,
            currency_symbol: &self.currency_symbol,
            terms: &self.terms,
            estimate,
        }
    }

    /// Number the next recorded estimate will get.
    pub fn next_number(&self) -> String {
        self.sequence.peek()
    }

    pub fn estimates(&self) -> &[Estimate] {
        &self.estimates
    }
}

/// Printable estimate summary with grouped currency.
#[derive(Debug, Clone, Copy)]
pub struct EstimateSummary<'a> {
    business_name: &'a str,
    currency_symbol: &'a str,
    terms: &'a str,
    estimate: &'a Estimate,
}

impl fmt::Display for EstimateSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = self.currency_symbol;
        let estimate = self.estimate;

        writeln!(f, "=== {} ===", self.business_name)?;
        writeln!(
            f,
            "Estimate {} ({}) dated {}",
            estimate.estimate_number, estimate.status, estimate.date
        )?;
        writeln!(
            f,
            "Customer: {}",
            estimate.customer_name.as_deref().unwrap_or("-")
        )?;

        for (i, item) in estimate.items.iter().enumerate() {
            writeln!(
                f,
                "  {}. {} x{} @ {} less {} = {}",
                i + 1,
                item.name,
                item.quantity.normalize(),
                item.unit_price.format_grouped(symbol),
                item.discount_rate,
                item.line_total.format_grouped(symbol)
            )?;
        }

        writeln!(f, "Subtotal: {}", estimate.subtotal.format_grouped(symbol))?;
        writeln!(
            f,
            "Discount ({}): {}",
            estimate.global_discount_rate,
            estimate.global_discount_amount.format_grouped(symbol)
        )?;
        writeln!(
            f,
            "Tax ({}): {}",
            estimate.tax_rate,
            estimate.total_tax.format_grouped(symbol)
        )?;
        writeln!(f, "Grand Total: {}", estimate.grand_total.format_grouped(symbol))?;
        write!(f, "Terms: {}", self.terms)
    }
}

/// Consumes host messages until the editor deregisters, printing a summary
/// for every recorded estimate.
pub async fn receive_estimates(
    mut receiver: HostReceiver,
    mut recorder: EstimateRecorder,
) -> EstimateRecorder {
    while let Some(message) = receiver.recv().await {
        if let Some(estimate) = recorder.handle(&message).cloned() {
            println!("{}", recorder.summary(&estimate));
        }
    }

    debug!(recorded = recorder.estimates().len(), "Host channel closed");
    recorder
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tally_core::EstimateStatus;

    fn saved(rate: u32) -> serde_json::Value {
        json!({
            "type": "tally:estimate-saved",
            "payload": {
                "lines": [{"serial": 1, "item": "4K Monitor (MONITOR001)", "quantity": 2,
                           "rate": rate, "discount": 5, "amount": 2 * rate * 95 / 100}],
                "globalDiscount": 10,
                "globalTax": 18
            }
        })
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    #[test]
    fn test_saves_are_numbered_in_order() {
        let mut recorder =
            EstimateRecorder::new(&DeskConfig::default(), Some("Asha".into())).unwrap();
        assert_eq!(recorder.next_number(), "EST-0001");

        let first = recorder.handle_on(&saved(35000), date()).unwrap();
        assert_eq!(first.estimate_number, "EST-0001");
        assert_eq!(first.status, EstimateStatus::Draft);
        assert_eq!(first.grand_total.to_string(), "70623.00");

        let second = recorder.handle_on(&saved(100), date()).unwrap();
        assert_eq!(second.estimate_number, "EST-0002");
        assert_eq!(recorder.estimates().len(), 2);
    }

    #[test]
    fn test_non_save_messages_record_nothing() {
        let mut recorder = EstimateRecorder::new(&DeskConfig::default(), None).unwrap();

        let frame = json!({"type": "tally:frame-height", "payload": {"height": 560}});
        assert!(recorder.handle_on(&frame, date()).is_none());
        assert!(recorder.handle_on(&json!({"hello": "world"}), date()).is_none());
        assert!(recorder.estimates().is_empty());
        assert_eq!(recorder.next_number(), "EST-0001");
    }

    #[test]
    fn test_blank_customer_is_none() {
        let mut recorder = EstimateRecorder::new(&DeskConfig::default(), Some("  ".into())).unwrap();
        let estimate = recorder.handle_on(&saved(35000), date()).unwrap();
        assert!(estimate.customer_name.is_none());
    }

    #[test]
    fn test_summary_uses_grouped_currency() {
        let mut config = DeskConfig::default();
        config.business.name = "Acme Traders".into();
        let mut recorder = EstimateRecorder::new(&config, Some("Asha".into())).unwrap();

        let estimate = recorder.handle_on(&saved(35000), date()).unwrap().clone();
        let summary = recorder.summary(&estimate).to_string();

        assert!(summary.contains("=== Acme Traders ==="));
        assert!(summary.contains("Estimate EST-0001 (draft) dated 2024-03-01"));
        assert!(summary.contains("Customer: Asha"));
        assert!(summary.contains("4K Monitor (MONITOR001) x2 @ ₹35,000.00 less 5% = ₹66,500.00"));
        assert!(summary.contains("Subtotal: ₹66,500.00"));
        assert!(summary.contains("Discount (10%): ₹6,650.00"));
        assert!(summary.contains("Tax (18%): ₹10,773.00"));
        assert!(summary.contains("Grand Total: ₹70,623.00"));
        assert!(summary.ends_with("Terms: Payment is due within 30 days from the date of invoice."));
    }

    #[test]
    fn test_recorder_rejects_bad_prefix() {
        let mut config = DeskConfig::default();
        config.estimate.prefix = String::new();
        assert!(EstimateRecorder::new(&config, None).is_err());
    }
}
