//! Model API Clients
//!
//! Blocking HTTP clients for the hosted vision and text models.
//! No retry logic lives here - any retry policy is the caller's choice.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};

use super::types::{ChatMessage, ChatRequest, ChatResponse, GeminiResponse, LlmError};
use super::{TextModel, VisionModel};

// ============================================================================
// CONSTANTS
// ============================================================================

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
const GROQ_API_BASE: &str = "https://api.groq.com/openai/v1";

// ============================================================================
// GEMINI VISION CLIENT
// ============================================================================

/// Vision client backed by the Gemini generateContent API
pub struct GeminiVisionClient {
    api_key: String,
    model: String,
}

impl GeminiVisionClient {
    pub fn new(api_key: String, model: String) -> Self {
        Self { api_key, model }
    }
}

impl VisionModel for GeminiVisionClient {
    fn analyze(&self, prompt: &str, image: &[u8], mime: &str) -> Result<String, LlmError> {
        if self.api_key.is_empty() {
            return Err(LlmError::MissingApiKey);
        }

        let url = format!(
            "{}/models/{}:generateContent?key={}",
            GEMINI_API_BASE, self.model, self.api_key
        );

        let body = serde_json::json!({
            "contents": [{
                "parts": [
                    { "text": prompt },
                    { "inline_data": { "mime_type": mime, "data": BASE64.encode(image) } }
                ]
            }]
        });

        let response = ureq::post(&url)
            .set("Content-Type", "application/json")
            .send_json(body);

        match response {
            Ok(resp) => {
                let text = resp.into_string()
                    .map_err(|e| LlmError::ParseError { message: e.to_string() })?;

                let parsed: GeminiResponse = serde_json::from_str(&text)
                    .map_err(|e| LlmError::ParseError { message: e.to_string() })?;

                parsed
                    .first_text()
                    .map(|s| s.to_string())
                    .ok_or_else(|| LlmError::ParseError {
                        message: "No text candidate in response".to_string(),
                    })
            }
            Err(ureq::Error::Status(status, resp)) => Err(LlmError::ApiStatus {
                status,
                message: resp.into_string().unwrap_or_default(),
            }),
            Err(e) => Err(LlmError::NetworkError { message: e.to_string() }),
        }
    }
}

// ============================================================================
// GROQ TEXT CLIENT
// ============================================================================

/// Text-generation client backed by the Groq chat completions API
pub struct GroqTextClient {
    api_key: String,
    model: String,
}

impl GroqTextClient {
    pub fn new(api_key: String, model: String) -> Self {
        Self { api_key, model }
    }
}

impl TextModel for GroqTextClient {
    fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        if self.api_key.is_empty() {
            return Err(LlmError::MissingApiKey);
        }

        let url = format!("{}/chat/completions", GROQ_API_BASE);

        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
        };

        let response = ureq::post(&url)
            .set("Authorization", &format!("Bearer {}", self.api_key))
            .set("Content-Type", "application/json")
            .send_json(serde_json::to_value(&request).map_err(|e| LlmError::ParseError {
                message: e.to_string(),
            })?);

        match response {
            Ok(resp) => {
                let text = resp.into_string()
                    .map_err(|e| LlmError::ParseError { message: e.to_string() })?;

                let parsed: ChatResponse = serde_json::from_str(&text)
                    .map_err(|e| LlmError::ParseError { message: e.to_string() })?;

                parsed
                    .choices
                    .into_iter()
                    .next()
                    .map(|c| c.message.content)
                    .ok_or_else(|| LlmError::ParseError {
                        message: "No choices in response".to_string(),
                    })
            }
            Err(ureq::Error::Status(status, resp)) => Err(LlmError::ApiStatus {
                status,
                message: resp.into_string().unwrap_or_default(),
            }),
            Err(e) => Err(LlmError::NetworkError { message: e.to_string() }),
        }
    }
}
