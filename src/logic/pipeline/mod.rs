//! Pipeline Module - Assessment Orchestration
//!
//! Sequences Classify -> Resolve -> Compose into one Assessment. Each stage
//! is total by contract (its fallbacks are embedded in its own module), so
//! the orchestrator is a straight-line composition: no retries, no catch
//! logic, no state retained across invocations.
//!
//! ## Usage
//! ```ignore
//! let pipeline = Pipeline::new(classifier, resolver, composer);
//! let assessment = pipeline.assess(&ImageInput::from_path("cctv/frame.jpg"));
//! ```

pub mod types;

#[cfg(test)]
mod tests;

pub use types::Assessment;

use chrono::Utc;

use crate::logic::alert::AlertComposer;
use crate::logic::protocol::ProtocolResolver;
use crate::logic::vision::{HazardClassifier, ImageInput};

/// The linear assessment pipeline
pub struct Pipeline {
    classifier: HazardClassifier,
    resolver: ProtocolResolver,
    composer: AlertComposer,
}

impl Pipeline {
    pub fn new(
        classifier: HazardClassifier,
        resolver: ProtocolResolver,
        composer: AlertComposer,
    ) -> Self {
        Self {
            classifier,
            resolver,
            composer,
        }
    }

    /// Run one image through all three stages.
    ///
    /// Each stage receives only what its contract requires: Resolve sees
    /// the verdict type, Compose sees type + severity + protocol text.
    pub fn assess(&self, input: &ImageInput) -> Assessment {
        let source_ref = input.source_ref();
        log::debug!("Assessing {}", source_ref);

        // 1. Classify
        let verdict = self.classifier.classify(input);

        // 2. Resolve protocol
        let protocol = self.resolver.resolve(verdict.hazard_type);

        // 3. Compose alerts
        let alerts = self.composer.compose(verdict.hazard_type, verdict.severity, &protocol);

        Assessment {
            source_ref,
            verdict,
            protocol,
            alerts,
            timestamp: Utc::now(),
        }
    }
}
