//! Alert Sinks
//!
//! Where triggered alerts go. The log sink is what the CLI uses; tests
//! plug in a collecting sink.

use super::types::AlertEvent;
use crate::logic::alert::Language;

/// Receives each triggered alert in order
pub trait AlertSink {
    fn emit(&mut self, event: &AlertEvent);
}

/// Sink that writes the full alert block to the operator log
pub struct LogSink;

impl AlertSink for LogSink {
    fn emit(&mut self, event: &AlertEvent) {
        let verdict = &event.assessment.verdict;
        let alerts = &event.assessment.alerts;

        log::warn!(
            "ALERT TRIGGERED at {:.1}s | Location: {} | Type: {} | Severity: {}",
            event.stream_time_secs,
            event.location,
            verdict.hazard_type.as_str().to_uppercase(),
            verdict.severity.as_str().to_uppercase(),
        );
        log::warn!("Protocol: {}", event.assessment.protocol.text);
        log::warn!("Alert (EN): {}", alerts.alert(Language::En));
        log::warn!("Alert (HI): {}", alerts.alert(Language::Hi));
        log::warn!("Alert (MR): {}", alerts.alert(Language::Mr));
        log::warn!("Public tweet: {}", alerts.tweet_public);
        log::warn!("Authority tweet: {}", alerts.tweet_authority);
    }
}

/// Sink that keeps every event; used by tests and batch callers
#[derive(Default)]
pub struct CollectingSink {
    pub events: Vec<AlertEvent>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AlertSink for CollectingSink {
    fn emit(&mut self, event: &AlertEvent) {
        self.events.push(event.clone());
    }
}
