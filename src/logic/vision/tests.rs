use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use super::classifier::{extract_json_object, parse_verdict, HazardClassifier};
use super::types::{HazardType, HazardVerdict, ImageInput, Severity};
use crate::logic::llm::{LlmError, VisionModel};

/// Vision model stub: fixed response, counts calls
struct FixedVision {
    response: Result<String, LlmError>,
    calls: Arc<AtomicU32>,
}

impl FixedVision {
    fn ok(response: &str) -> Self {
        Self {
            response: Ok(response.to_string()),
            calls: Arc::new(AtomicU32::new(0)),
        }
    }

    fn failing() -> Self {
        Self {
            response: Err(LlmError::NetworkError {
                message: "connection reset".to_string(),
            }),
            calls: Arc::new(AtomicU32::new(0)),
        }
    }
}

impl VisionModel for FixedVision {
    fn analyze(&self, _prompt: &str, _image: &[u8], _mime: &str) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.response.clone()
    }
}

fn bytes_input() -> ImageInput {
    ImageInput::Bytes {
        data: vec![0xFF, 0xD8, 0xFF],
        mime: "image/jpeg".to_string(),
    }
}

#[test]
fn test_classify_strict_json() {
    let classifier = HazardClassifier::new(Box::new(FixedVision::ok(
        r#"{"hazard": true, "type": "flood", "severity": "high", "confidence": 0.9}"#,
    )));

    let verdict = classifier.classify(&bytes_input());

    assert!(verdict.hazard);
    assert_eq!(verdict.hazard_type, HazardType::Flood);
    assert_eq!(verdict.severity, Severity::High);
    assert!((verdict.confidence - 0.9).abs() < 1e-6);
}

#[test]
fn test_classify_json_wrapped_in_prose() {
    let classifier = HazardClassifier::new(Box::new(FixedVision::ok(
        "Here is my assessment:\n```json\n{\"hazard\": true, \"type\": \"fire\", \
         \"severity\": \"medium\", \"confidence\": 0.75}\n```\nStay safe.",
    )));

    let verdict = classifier.classify(&bytes_input());

    assert!(verdict.hazard);
    assert_eq!(verdict.hazard_type, HazardType::Fire);
    assert_eq!(verdict.severity, Severity::Medium);
}

#[test]
fn test_classify_garbled_response_is_unknown() {
    let classifier =
        HazardClassifier::new(Box::new(FixedVision::ok("I cannot analyze this image.")));

    let verdict = classifier.classify(&bytes_input());

    assert_eq!(verdict, HazardVerdict::unparseable());
    assert!(!verdict.hazard);
    assert_eq!(verdict.hazard_type, HazardType::Unknown);
}

#[test]
fn test_hazard_without_severity_is_repaired_to_fallback() {
    // hazard=true but no severity violates the verdict invariant
    let classifier = HazardClassifier::new(Box::new(FixedVision::ok(
        r#"{"hazard": true, "type": "flood"}"#,
    )));

    let verdict = classifier.classify(&bytes_input());

    assert_eq!(verdict, HazardVerdict::unparseable());
}

#[test]
fn test_hazard_with_none_type_is_repaired_to_fallback() {
    let classifier = HazardClassifier::new(Box::new(FixedVision::ok(
        r#"{"hazard": true, "type": "none", "severity": "high", "confidence": 0.8}"#,
    )));

    let verdict = classifier.classify(&bytes_input());

    assert_eq!(verdict, HazardVerdict::unparseable());
}

#[test]
fn test_missing_file_skips_model_call() {
    let model = FixedVision::ok(
        r#"{"hazard": false, "type": "none", "severity": "low", "confidence": 1.0}"#,
    );
    let calls = model.calls.clone();
    let classifier = HazardClassifier::new(Box::new(model));

    let verdict = classifier.classify(&ImageInput::from_path("/nonexistent/frame.jpg"));

    assert_eq!(verdict, HazardVerdict::file_not_found());
    assert_eq!(verdict.hazard_type, HazardType::FileNotFound);
    // Model must never be invoked for a missing file
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_model_failure_gives_error_verdict() {
    let classifier = HazardClassifier::new(Box::new(FixedVision::failing()));

    let verdict = classifier.classify(&bytes_input());

    assert_eq!(verdict, HazardVerdict::call_failed());
    assert_eq!(verdict.hazard_type, HazardType::Error);
    assert_eq!(verdict.confidence, 0.0);
}

#[test]
fn test_confidence_is_clamped() {
    let verdict = parse_verdict(
        r#"{"hazard": true, "type": "flood", "severity": "low", "confidence": 3.5}"#,
    )
    .unwrap();
    assert_eq!(verdict.confidence, 1.0);
}

#[test]
fn test_extract_balanced_object() {
    let text = "noise {\"a\": {\"b\": 1}} trailing";
    assert_eq!(extract_json_object(text), Some("{\"a\": {\"b\": 1}}"));
}

#[test]
fn test_extract_ignores_braces_in_strings() {
    let text = "x {\"note\": \"a } inside\", \"n\": 1} y";
    assert_eq!(
        extract_json_object(text),
        Some("{\"note\": \"a } inside\", \"n\": 1}")
    );
}

#[test]
fn test_extract_unbalanced_is_none() {
    assert_eq!(extract_json_object("{\"a\": 1"), None);
    assert_eq!(extract_json_object("no braces here"), None);
}
