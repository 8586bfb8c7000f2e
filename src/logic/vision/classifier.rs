//! Hazard Classifier
//!
//! Maps one image to a HazardVerdict. Total by contract: every failure mode
//! (missing file, failed call, garbled response) collapses to a typed
//! fallback verdict instead of an error crossing the component boundary.

use serde::Deserialize;
use std::fs;

use super::types::{mime_for_path, HazardType, HazardVerdict, ImageInput, Severity};
use crate::logic::llm::VisionModel;

// ============================================================================
// PROMPT
// ============================================================================

const CLASSIFY_PROMPT: &str = "\
You are a disaster detection AI.

Analyze the image for disaster conditions.

Respond ONLY in raw JSON format:
{
    \"hazard\": true/false,
    \"type\": \"flood/landslide/fire/infrastructure/none\",
    \"severity\": \"low/medium/high\",
    \"confidence\": 0.0-1.0
}";

// ============================================================================
// CLASSIFIER
// ============================================================================

/// Classifier over an injected vision model
pub struct HazardClassifier {
    model: Box<dyn VisionModel>,
}

impl HazardClassifier {
    pub fn new(model: Box<dyn VisionModel>) -> Self {
        Self { model }
    }

    /// Classify one image. Never returns an error; see the fallback
    /// constructors on HazardVerdict for the degraded outcomes.
    pub fn classify(&self, input: &ImageInput) -> HazardVerdict {
        let (data, mime): (Vec<u8>, String) = match input {
            ImageInput::Path(path) => {
                if !path.exists() {
                    log::warn!("Image not found: {}", path.display());
                    return HazardVerdict::file_not_found();
                }
                match fs::read(path) {
                    Ok(bytes) => (bytes, mime_for_path(path).to_string()),
                    Err(e) => {
                        log::warn!("Failed to read image {}: {}", path.display(), e);
                        return HazardVerdict::file_not_found();
                    }
                }
            }
            ImageInput::Bytes { data, mime } => (data.clone(), mime.clone()),
        };

        let response = match self.model.analyze(CLASSIFY_PROMPT, &data, &mime) {
            Ok(text) => text,
            Err(e) => {
                log::warn!("Vision model call failed: {}", e);
                return HazardVerdict::call_failed();
            }
        };

        match parse_verdict(&response) {
            Some(verdict) => verdict,
            None => {
                log::warn!("Unparseable vision response: {:.120}", response);
                HazardVerdict::unparseable()
            }
        }
    }
}

// ============================================================================
// RESPONSE PARSING
// ============================================================================

/// Raw JSON shape the model is asked to emit
#[derive(Debug, Deserialize)]
struct RawVerdict {
    #[serde(default)]
    hazard: bool,
    #[serde(rename = "type", default)]
    hazard_type: Option<String>,
    #[serde(default)]
    severity: Option<String>,
    #[serde(default)]
    confidence: Option<f32>,
}

/// Parse a model response into a verdict.
///
/// Tries the whole trimmed text as JSON first, then the first balanced
/// `{...}` substring. Returns None when nothing parses or when the parsed
/// object violates the hazard invariant (hazard=true needs an actionable
/// type and a concrete severity).
pub fn parse_verdict(text: &str) -> Option<HazardVerdict> {
    let trimmed = text.trim();

    let raw: RawVerdict = match serde_json::from_str(trimmed) {
        Ok(v) => v,
        Err(_) => {
            let candidate = extract_json_object(trimmed)?;
            serde_json::from_str(candidate).ok()?
        }
    };

    let hazard_type = raw
        .hazard_type
        .as_deref()
        .map(HazardType::from_model_str)
        .unwrap_or(HazardType::Unknown);

    let severity = raw
        .severity
        .as_deref()
        .map(Severity::from_model_str)
        .unwrap_or(Severity::Unknown);

    let confidence = raw.confidence.unwrap_or(0.0).clamp(0.0, 1.0);

    if raw.hazard {
        // Invariant: hazard=true requires a concrete disaster type and
        // severity. A response violating it is treated as a parse failure.
        if !hazard_type.is_actionable() || !severity.is_concrete() {
            return None;
        }
        Some(HazardVerdict {
            hazard: true,
            hazard_type,
            severity,
            confidence,
        })
    } else {
        Some(HazardVerdict {
            hazard: false,
            hazard_type,
            severity: Severity::Unknown,
            confidence,
        })
    }
}

/// Extract the first balanced `{...}` substring, skipping braces inside
/// JSON string literals.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + offset + ch.len_utf8()]);
                }
            }
            _ => {}
        }
    }
    None
}
