//! Incident Log
//!
//! Append-only, session-scoped record of assessments with the operator
//! approval gate. No persistence: state lives for the life of the owning
//! session. The alert-bundle length invariant is enforced here, at the
//! boundary where bundles become publishable records.

use parking_lot::RwLock;
use uuid::Uuid;

use super::types::{ApprovalStatus, IncidentRecord};
use crate::logic::pipeline::Assessment;

/// In-memory incident log, shareable between the monitor and a viewer
#[derive(Default)]
pub struct IncidentLog {
    records: RwLock<Vec<IncidentRecord>>,
}

impl IncidentLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an assessment as a PENDING record and return its id.
    /// Alert text is clamped to the publishable length limits here.
    pub fn record(&self, mut assessment: Assessment, location: &str) -> Uuid {
        assessment.alerts.clamp_lengths();

        let record = IncidentRecord::new(assessment, location.to_string());
        let id = record.id;
        log::info!(
            "Incident {} recorded at {} ({})",
            id,
            location,
            record.assessment.verdict.hazard_type
        );
        self.records.write().push(record);
        id
    }

    /// Approve a pending record for publishing
    pub fn approve(&self, id: Uuid) -> bool {
        self.set_status(id, ApprovalStatus::Approved)
    }

    /// Reject a pending record
    pub fn reject(&self, id: Uuid) -> bool {
        self.set_status(id, ApprovalStatus::Rejected)
    }

    fn set_status(&self, id: Uuid, status: ApprovalStatus) -> bool {
        let mut records = self.records.write();
        match records.iter_mut().find(|r| r.id == id) {
            Some(record) => {
                record.approval = status;
                true
            }
            None => {
                log::warn!("Unknown incident id: {}", id);
                false
            }
        }
    }

    pub fn get(&self, id: Uuid) -> Option<IncidentRecord> {
        self.records.read().iter().find(|r| r.id == id).cloned()
    }

    /// All records, newest first
    pub fn all(&self) -> Vec<IncidentRecord> {
        let mut list: Vec<IncidentRecord> = self.records.read().clone();
        list.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        list
    }

    /// Records cleared for publishing
    pub fn approved(&self) -> Vec<IncidentRecord> {
        self.records
            .read()
            .iter()
            .filter(|r| r.approval == ApprovalStatus::Approved)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::alert::{AlertBundle, Language, MAX_TWEET_CHARS};
    use crate::logic::protocol::ProtocolText;
    use crate::logic::vision::{HazardType, HazardVerdict, Severity};
    use chrono::Utc;

    fn assessment() -> Assessment {
        let mut alerts = AlertBundle::empty();
        alerts.set_alert(Language::En, "Flood alert".to_string());
        alerts.tweet_public = "x".repeat(400);

        Assessment {
            source_ref: "frame.jpg".to_string(),
            verdict: HazardVerdict {
                hazard: true,
                hazard_type: HazardType::Flood,
                severity: Severity::High,
                confidence: 0.9,
            },
            protocol: ProtocolText::lookup_failed(HazardType::Flood),
            alerts,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn test_record_starts_pending_and_clamps_lengths() {
        let log = IncidentLog::new();
        let id = log.record(assessment(), "Kurla");

        let record = log.get(id).unwrap();
        assert_eq!(record.approval, ApprovalStatus::Pending);
        assert_eq!(record.location, "Kurla");
        assert_eq!(
            record.assessment.alerts.tweet_public.chars().count(),
            MAX_TWEET_CHARS
        );
    }

    #[test]
    fn test_approval_gate() {
        let log = IncidentLog::new();
        let a = log.record(assessment(), "Kurla");
        let b = log.record(assessment(), "Dadar");

        assert!(log.approved().is_empty());

        assert!(log.approve(a));
        assert!(log.reject(b));

        let approved = log.approved();
        assert_eq!(approved.len(), 1);
        assert_eq!(approved[0].id, a);
        assert_eq!(log.get(b).unwrap().approval, ApprovalStatus::Rejected);
    }

    #[test]
    fn test_unknown_id_is_rejected() {
        let log = IncidentLog::new();
        assert!(!log.approve(Uuid::new_v4()));
    }

    #[test]
    fn test_all_is_newest_first() {
        let log = IncidentLog::new();
        let first = log.record(assessment(), "Kurla");
        std::thread::sleep(std::time::Duration::from_millis(5));
        let second = log.record(assessment(), "Dadar");

        let all = log.all();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, second);
        assert_eq!(all[1].id, first);
    }
}
