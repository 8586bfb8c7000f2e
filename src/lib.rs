//! Nivaran Core - Disaster Response Pipeline
//!
//! Ingests a visual feed (single image or sampled frame stream) from a
//! disaster-prone site, classifies hazards, looks up official response
//! protocols, and produces multilingual alert text plus social-media
//! drafts, with an operator approval gate before anything is published.

pub mod constants;
pub mod logic;

pub use logic::alert::{AlertBundle, AlertComposer, Language};
pub use logic::incident::{ApprovalStatus, IncidentLog, IncidentRecord};
pub use logic::monitor::{
    FrameDirSource, FrameSource, MonitorConfig, MonitorReport, StreamMonitor,
};
pub use logic::pipeline::{Assessment, Pipeline};
pub use logic::protocol::{KnowledgeBase, ProtocolResolver, ProtocolText};
pub use logic::vision::{HazardClassifier, HazardVerdict, ImageInput};
