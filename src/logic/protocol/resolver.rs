//! Protocol Resolver
//!
//! Maps a hazard type to official guidance text. Short-circuits for
//! non-hazard types (no lookup is performed or billed), otherwise retrieves
//! context from the knowledge base and synthesizes one answer through the
//! text model. Total by contract: every failure collapses to the tagged
//! LookupFailed text.

use super::index::KnowledgeBase;
use super::types::ProtocolText;
use crate::logic::llm::TextModel;
use crate::logic::vision::HazardType;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Chunks of context handed to the synthesis call
const RETRIEVE_TOP_K: usize = 5;

const SYSTEM_PROMPT: &str = "\
You are Nivaran AI, a disaster management assistant.

Rules:
- Answer ONLY using the provided NDMA documents.
- Do NOT use general knowledge.
- Do NOT guess.
- Be concise and actionable. Focus on immediate safety steps.";

// ============================================================================
// RESOLVER
// ============================================================================

/// Resolver over an injected knowledge base and text model
pub struct ProtocolResolver {
    kb: KnowledgeBase,
    model: Box<dyn TextModel>,
}

impl ProtocolResolver {
    pub fn new(kb: KnowledgeBase, model: Box<dyn TextModel>) -> Self {
        Self { kb, model }
    }

    /// Resolve guidance for a hazard type. Never returns an error.
    ///
    /// Non-actionable types (none/unknown/error/file_not_found) return the
    /// fixed no-action text without touching the knowledge base.
    pub fn resolve(&self, hazard_type: HazardType) -> ProtocolText {
        if !hazard_type.is_actionable() {
            return ProtocolText::no_action();
        }

        let index = match self.kb.ensure_ready() {
            Ok(index) => index,
            Err(e) => {
                log::warn!("Knowledge base unavailable: {}", e);
                return ProtocolText::lookup_failed(hazard_type);
            }
        };

        let question = build_question(hazard_type);
        let context: Vec<String> = index
            .retrieve(&question, RETRIEVE_TOP_K)
            .iter()
            .map(|c| format!("[{}] {}", c.source, c.text))
            .collect();

        let prompt = format!(
            "{}\n\nContext:\n{}\n\nQuestion: {}\nAnswer:",
            SYSTEM_PROMPT,
            context.join("\n\n"),
            question
        );

        match self.model.generate(&prompt) {
            Ok(answer) if !answer.trim().is_empty() => {
                ProtocolText::retrieved(answer.trim().to_string())
            }
            Ok(_) => {
                log::warn!("Empty protocol synthesis for {}", hazard_type);
                ProtocolText::lookup_failed(hazard_type)
            }
            Err(e) => {
                log::warn!("Protocol synthesis failed for {}: {}", hazard_type, e);
                ProtocolText::lookup_failed(hazard_type)
            }
        }
    }
}

/// Templated knowledge-base question for a hazard type
fn build_question(hazard_type: HazardType) -> String {
    format!(
        "What are the immediate safety steps and emergency protocol for a {}?",
        hazard_type.as_str()
    )
}
