//! Logic Module - Pipeline Engines
//!
//! The assessment pipeline and its temporal wrapper:
//! - `llm` - model access seams (vision + text)
//! - `vision` - hazard classification
//! - `protocol` - knowledge-base protocol lookup
//! - `alert` - multilingual alert composition
//! - `pipeline` - Classify -> Resolve -> Compose orchestration
//! - `monitor` - sampled stream monitoring with alert de-duplication
//! - `incident` - approval-gated session incident log

pub mod alert;
pub mod incident;
pub mod llm;
pub mod monitor;
pub mod pipeline;
pub mod protocol;
pub mod vision;
