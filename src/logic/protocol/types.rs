//! Protocol Resolution Types

use serde::{Deserialize, Serialize};

use crate::logic::vision::HazardType;

// ============================================================================
// PROTOCOL TEXT
// ============================================================================

/// Where a protocol answer came from. Callers branch on this tag instead
/// of inspecting string content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProtocolSource {
    /// Synthesized from the knowledge base
    Retrieved,
    /// No hazard - fixed text, no lookup was performed
    NoActionRequired,
    /// Knowledge base absent/empty or synthesis failed
    LookupFailed,
}

/// Guidance text for a hazard, tagged with its provenance.
/// Non-empty whenever a hazard is present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProtocolText {
    pub source: ProtocolSource,
    pub text: String,
}

impl ProtocolText {
    /// Fixed no-hazard text (short-circuit path)
    pub fn no_action() -> Self {
        Self {
            source: ProtocolSource::NoActionRequired,
            text: "No disaster detected. No action required.".to_string(),
        }
    }

    /// Fixed lookup-failed text for a concrete hazard type
    pub fn lookup_failed(hazard_type: HazardType) -> Self {
        Self {
            source: ProtocolSource::LookupFailed,
            text: format!(
                "Protocol lookup failed. Manual response required for {}.",
                hazard_type.as_str()
            ),
        }
    }

    /// Text synthesized from retrieved documents
    pub fn retrieved(text: String) -> Self {
        Self {
            source: ProtocolSource::Retrieved,
            text,
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.source == ProtocolSource::LookupFailed
    }
}

// ============================================================================
// ERRORS
// ============================================================================

/// Knowledge base failure
#[derive(Debug, Clone)]
pub enum KbError {
    /// Document directory does not exist
    MissingDir { path: String },
    /// Directory exists but holds no readable documents
    EmptyDir { path: String },
    /// Filesystem error while reading documents
    ReadError { message: String },
}

impl std::fmt::Display for KbError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KbError::MissingDir { path } =>
                write!(f, "Knowledge base directory '{}' does not exist", path),
            KbError::EmptyDir { path } =>
                write!(f, "Knowledge base directory '{}' has no documents", path),
            KbError::ReadError { message } => write!(f, "Knowledge base read error: {}", message),
        }
    }
}

impl std::error::Error for KbError {}
