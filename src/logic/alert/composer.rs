//! Alert Composer
//!
//! Maps (hazard type, severity, protocol text) to the multilingual alert
//! bundle. One structured-generation call with a fixed line grammar; on
//! any failure the deterministic templated fallback is returned in the
//! same shape, so callers cannot tell degraded from full output except by
//! content quality.

use super::parser::parse_tagged;
use super::types::{AlertBundle, Language};
use crate::logic::llm::TextModel;
use crate::logic::protocol::ProtocolText;
use crate::logic::vision::{HazardType, Severity};

// ============================================================================
// COMPOSER
// ============================================================================

/// Composer over an injected text model
pub struct AlertComposer {
    model: Box<dyn TextModel>,
}

impl AlertComposer {
    pub fn new(model: Box<dyn TextModel>) -> Self {
        Self { model }
    }

    /// Compose the alert bundle. Never returns an error.
    ///
    /// Non-actionable types return the empty bundle with no model call.
    pub fn compose(
        &self,
        hazard_type: HazardType,
        severity: Severity,
        protocol: &ProtocolText,
    ) -> AlertBundle {
        if !hazard_type.is_actionable() {
            return AlertBundle::empty();
        }

        let prompt = build_prompt(hazard_type, severity, protocol);

        match self.model.generate(&prompt) {
            Ok(response) => {
                let bundle = parse_tagged(&response);
                if bundle.is_empty() {
                    // No recognized tag at all: treat as garbled output
                    log::warn!("Composer response had no recognized tags, using fallback");
                    fallback_bundle(hazard_type, severity)
                } else {
                    bundle
                }
            }
            Err(e) => {
                log::warn!("Alert composition failed for {}: {}", hazard_type, e);
                fallback_bundle(hazard_type, severity)
            }
        }
    }
}

// ============================================================================
// PROMPT
// ============================================================================

fn build_prompt(hazard_type: HazardType, severity: Severity, protocol: &ProtocolText) -> String {
    format!(
        "You are Nivaran AI, drafting public disaster alerts.\n\
         \n\
         Incident: {} (severity: {}).\n\
         Official protocol guidance:\n{}\n\
         \n\
         Produce EXACTLY five lines, one per field, each formatted as 'TAG: content'.\n\
         Tags, in this order:\n\
         ALERT_EN: one-sentence public alert in English (max 200 characters)\n\
         ALERT_HI: the same alert in Hindi (max 200 characters)\n\
         ALERT_MR: the same alert in Marathi (max 200 characters)\n\
         TWEET_PUBLIC: tweet for the public, calm and actionable, ending with #Nivaran (max 280 characters)\n\
         TWEET_AUTHORITY: tweet addressed to response authorities, ending with #NivaranAlert (max 280 characters)\n\
         \n\
         Output no other lines.",
        hazard_type.display_name(),
        severity,
        protocol.text
    )
}

// ============================================================================
// FALLBACK TEMPLATE
// ============================================================================

/// Deterministic bundle built only from (type, severity). Used whenever
/// the generation call fails or returns nothing parseable.
pub fn fallback_bundle(hazard_type: HazardType, severity: Severity) -> AlertBundle {
    let name = hazard_type.display_name();
    let mut bundle = AlertBundle::empty();

    bundle.set_alert(
        Language::En,
        format!(
            "{} alert ({} severity). Move to safety and follow official instructions.",
            name, severity
        ),
    );
    bundle.set_alert(
        Language::Hi,
        "आपदा चेतावनी। कृपया सुरक्षित स्थान पर जाएँ और आधिकारिक निर्देशों का पालन करें।".to_string(),
    );
    bundle.set_alert(
        Language::Mr,
        "आपत्ती इशारा. कृपया सुरक्षित ठिकाणी जा आणि अधिकृत सूचनांचे पालन करा.".to_string(),
    );
    bundle.tweet_public = format!(
        "⚠️ {} reported (severity: {}). Please avoid the area and follow official guidance. #Nivaran",
        name, severity
    );
    bundle.tweet_authority = format!(
        "🚨 {} | Severity: {}. Immediate response requested per standard protocol. #NivaranAlert",
        name.to_uppercase(),
        severity.as_str().to_uppercase()
    );

    bundle
}
