//! Incident Log Types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::logic::pipeline::Assessment;

/// Human-in-the-loop gate: nothing is published until an operator approves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApprovalStatus {
    Pending,
    Approved,
    Rejected,
}

/// One assessment pinned to a location, awaiting operator review
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncidentRecord {
    pub id: Uuid,
    pub location: String,
    pub assessment: Assessment,
    pub approval: ApprovalStatus,
    pub created_at: DateTime<Utc>,
}

impl IncidentRecord {
    pub fn new(assessment: Assessment, location: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            location,
            assessment,
            approval: ApprovalStatus::Pending,
            created_at: Utc::now(),
        }
    }
}
