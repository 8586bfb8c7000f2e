//! Incident Module - Approval-Gated Session Log
//!
//! Accumulates assessments into an ordered, append-only log with a
//! human-in-the-loop approval status per record.

pub mod manager;
pub mod types;

pub use manager::IncidentLog;
pub use types::{ApprovalStatus, IncidentRecord};
