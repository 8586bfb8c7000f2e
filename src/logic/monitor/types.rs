//! Stream Monitoring Types

use serde::{Deserialize, Serialize};

use crate::logic::pipeline::Assessment;
use crate::logic::vision::{HazardVerdict, ImageInput, Severity};
use crate::constants;

// ============================================================================
// STREAM INFO / FRAMES
// ============================================================================

/// Metadata reported by a frame source at start
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StreamInfo {
    pub fps: f32,
    pub frame_count: u64,
    pub duration_secs: f32,
}

/// One decoded frame handed to the pipeline
#[derive(Debug, Clone)]
pub struct Frame {
    pub index: u64,
    pub input: ImageInput,
}

// ============================================================================
// CONFIG
// ============================================================================

/// Monitoring session configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// Human-readable location attached to alerts
    pub location: String,
    /// Seconds of stream time between analyzed samples
    pub sample_interval_secs: u64,
    /// Severities that trigger an operator alert
    pub alert_on: Vec<Severity>,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            location: constants::DEFAULT_LOCATION.to_string(),
            sample_interval_secs: constants::DEFAULT_SAMPLE_INTERVAL_SECS,
            alert_on: vec![Severity::High, Severity::Medium],
        }
    }
}

// ============================================================================
// MONITOR STATE (alert de-duplication)
// ============================================================================

/// What a sample did to the alert state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Alert-worthy severity differing from the last alerted one
    Alert,
    /// Situation cleared (hazard gone, or dropped below alert-worthy)
    Cleared,
    /// Nothing to do
    NoChange,
}

/// The one piece of state that persists across assessments in a session.
/// Owned and mutated only by the monitor.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MonitorState {
    pub last_alerted_severity: Option<Severity>,
}

impl MonitorState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply the alert-transition rule for one sampled verdict.
    ///
    /// A sustained constant-severity hazard alerts exactly once per
    /// severity level; re-alerting on every sample is the bug this rule
    /// prevents. A hazard-true sample that is not alert-worthy clears the
    /// state, so a later escalation re-alerts.
    pub fn observe(&mut self, verdict: &HazardVerdict, alert_on: &[Severity]) -> Transition {
        if !verdict.hazard {
            return if self.last_alerted_severity.take().is_some() {
                Transition::Cleared
            } else {
                Transition::NoChange
            };
        }

        if alert_on.contains(&verdict.severity) {
            if self.last_alerted_severity != Some(verdict.severity) {
                self.last_alerted_severity = Some(verdict.severity);
                return Transition::Alert;
            }
            Transition::NoChange
        } else if self.last_alerted_severity.take().is_some() {
            Transition::Cleared
        } else {
            Transition::NoChange
        }
    }
}

// ============================================================================
// EVENTS / REPORT
// ============================================================================

/// One triggered alert within a monitoring session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertEvent {
    pub location: String,
    pub frame_index: u64,
    /// Position in the stream, seconds
    pub stream_time_secs: f32,
    pub assessment: Assessment,
}

/// Final tally of a monitoring session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorReport {
    pub frames_seen: u64,
    pub samples_analyzed: u64,
    pub duration_secs: f32,
    pub cancelled: bool,
    pub alerts: Vec<AlertEvent>,
}

// ============================================================================
// ERRORS
// ============================================================================

/// Failure opening a frame source
#[derive(Debug, Clone)]
pub enum MonitorError {
    /// Source path does not exist
    SourceNotFound { path: String },
    /// Source exists but cannot be opened as a frame stream
    OpenFailed { path: String, message: String },
}

impl std::fmt::Display for MonitorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MonitorError::SourceNotFound { path } => write!(f, "Source not found: {}", path),
            MonitorError::OpenFailed { path, message } =>
                write!(f, "Could not open source {}: {}", path, message),
        }
    }
}

impl std::error::Error for MonitorError {}
