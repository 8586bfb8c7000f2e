//! Assessment Record

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::logic::alert::AlertBundle;
use crate::logic::protocol::ProtocolText;
use crate::logic::vision::HazardVerdict;

/// The unit of work: one classified image with its protocol and alerts.
/// Immutable once returned; ownership passes to the caller (CLI, incident
/// log, monitor).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    /// Where the image came from (path, or "<memory>" for raw bytes)
    pub source_ref: String,
    pub verdict: HazardVerdict,
    pub protocol: ProtocolText,
    pub alerts: AlertBundle,
    pub timestamp: DateTime<Utc>,
}
