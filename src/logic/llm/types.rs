//! Model Client Types

use serde::{Deserialize, Serialize};

// ============================================================================
// ERRORS
// ============================================================================

/// Error from a model API call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum LlmError {
    /// API key not configured
    MissingApiKey,
    /// Non-2xx HTTP status from the API
    ApiStatus { status: u16, message: String },
    /// Transport-level failure (DNS, timeout, connection reset)
    NetworkError { message: String },
    /// Response body did not match the expected shape
    ParseError { message: String },
}

impl std::fmt::Display for LlmError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LlmError::MissingApiKey => write!(f, "API key not configured"),
            LlmError::ApiStatus { status, message } =>
                write!(f, "API returned status {}: {}", status, message),
            LlmError::NetworkError { message } => write!(f, "Network error: {}", message),
            LlmError::ParseError { message } => write!(f, "Parse error: {}", message),
        }
    }
}

impl std::error::Error for LlmError {}

// ============================================================================
// GEMINI WIRE TYPES
// ============================================================================

/// generateContent response envelope (only the fields we read)
#[derive(Debug, Deserialize)]
pub struct GeminiResponse {
    #[serde(default)]
    pub candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
pub struct GeminiCandidate {
    pub content: GeminiContent,
}

#[derive(Debug, Deserialize)]
pub struct GeminiContent {
    #[serde(default)]
    pub parts: Vec<GeminiPart>,
}

#[derive(Debug, Deserialize)]
pub struct GeminiPart {
    #[serde(default)]
    pub text: Option<String>,
}

impl GeminiResponse {
    /// First text part of the first candidate, if any
    pub fn first_text(&self) -> Option<&str> {
        self.candidates
            .first()?
            .content
            .parts
            .iter()
            .find_map(|p| p.text.as_deref())
    }
}

// ============================================================================
// OPENAI-COMPATIBLE WIRE TYPES (Groq)
// ============================================================================

#[derive(Debug, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoiceMessage {
    pub content: String,
}
