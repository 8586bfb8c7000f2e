use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use super::Pipeline;
use crate::logic::alert::composer::fallback_bundle;
use crate::logic::alert::{AlertComposer, Language};
use crate::logic::llm::{LlmError, TextModel, VisionModel};
use crate::logic::protocol::{KnowledgeBase, ProtocolResolver, ProtocolSource};
use crate::logic::vision::{HazardClassifier, HazardType, ImageInput, Severity};

struct FixedVision(String);

impl VisionModel for FixedVision {
    fn analyze(&self, _prompt: &str, _image: &[u8], _mime: &str) -> Result<String, LlmError> {
        Ok(self.0.clone())
    }
}

struct FailingText {
    calls: Arc<AtomicU32>,
}

impl TextModel for FailingText {
    fn generate(&self, _prompt: &str) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(LlmError::ApiStatus {
            status: 503,
            message: "unavailable".to_string(),
        })
    }
}

fn bytes_input() -> ImageInput {
    ImageInput::Bytes {
        data: vec![1, 2, 3],
        mime: "image/jpeg".to_string(),
    }
}

/// The fully degraded scenario: confident flood verdict, no knowledge
/// base, failing composer. The assessment must still assemble all three
/// stage outputs.
#[test]
fn test_degraded_flood_assessment_assembles() {
    let classifier = HazardClassifier::new(Box::new(FixedVision(
        r#"{"hazard": true, "type": "flood", "severity": "high", "confidence": 0.9}"#.to_string(),
    )));
    let resolver = ProtocolResolver::new(
        KnowledgeBase::new("/missing/ndma_docs"),
        Box::new(FailingText { calls: Arc::new(AtomicU32::new(0)) }),
    );
    let composer = AlertComposer::new(Box::new(FailingText { calls: Arc::new(AtomicU32::new(0)) }));

    let pipeline = Pipeline::new(classifier, resolver, composer);
    let assessment = pipeline.assess(&bytes_input());

    assert!(assessment.verdict.hazard);
    assert_eq!(assessment.verdict.hazard_type, HazardType::Flood);
    assert_eq!(assessment.verdict.severity, Severity::High);

    assert_eq!(assessment.protocol.source, ProtocolSource::LookupFailed);
    assert!(assessment.protocol.text.contains("Manual response required for flood"));

    assert_eq!(
        assessment.alerts,
        fallback_bundle(HazardType::Flood, Severity::High)
    );
    assert!(assessment.alerts.alert(Language::En).contains("Flood"));
    assert!(assessment.alerts.tweet_public.contains("#Nivaran"));
    assert!(assessment.alerts.tweet_authority.contains("#NivaranAlert"));

    assert_eq!(assessment.source_ref, "<memory>");
}

/// A no-hazard frame flows through with zero downstream model calls and
/// the canonical empty bundle.
#[test]
fn test_clear_frame_produces_empty_bundle_with_no_calls() {
    let classifier = HazardClassifier::new(Box::new(FixedVision(
        r#"{"hazard": false, "type": "none", "confidence": 0.95}"#.to_string(),
    )));

    let resolver_calls = Arc::new(AtomicU32::new(0));
    let composer_calls = Arc::new(AtomicU32::new(0));
    let resolver = ProtocolResolver::new(
        KnowledgeBase::new("/missing/ndma_docs"),
        Box::new(FailingText { calls: resolver_calls.clone() }),
    );
    let composer = AlertComposer::new(Box::new(FailingText { calls: composer_calls.clone() }));

    let pipeline = Pipeline::new(classifier, resolver, composer);
    let assessment = pipeline.assess(&bytes_input());

    assert!(!assessment.verdict.hazard);
    assert_eq!(assessment.protocol.source, ProtocolSource::NoActionRequired);
    assert!(assessment.alerts.is_empty());
    assert_eq!(resolver_calls.load(Ordering::SeqCst), 0);
    assert_eq!(composer_calls.load(Ordering::SeqCst), 0);
}

/// Missing input file degrades to a structurally valid assessment
#[test]
fn test_missing_file_assessment_is_structurally_valid() {
    let classifier = HazardClassifier::new(Box::new(FixedVision("unused".to_string())));
    let resolver = ProtocolResolver::new(
        KnowledgeBase::new("/missing/ndma_docs"),
        Box::new(FailingText { calls: Arc::new(AtomicU32::new(0)) }),
    );
    let composer = AlertComposer::new(Box::new(FailingText { calls: Arc::new(AtomicU32::new(0)) }));

    let pipeline = Pipeline::new(classifier, resolver, composer);
    let assessment = pipeline.assess(&ImageInput::from_path("/no/such/frame.jpg"));

    assert_eq!(assessment.verdict.hazard_type, HazardType::FileNotFound);
    assert_eq!(assessment.protocol.source, ProtocolSource::NoActionRequired);
    assert!(assessment.alerts.is_empty());
    assert_eq!(assessment.source_ref, "/no/such/frame.jpg");
}
