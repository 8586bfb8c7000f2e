//! Model Access Layer
//!
//! Narrow trait seams over the hosted vision and text models, so that every
//! pipeline stage can be exercised against scripted fakes in tests.
//!
//! ## Structure
//! - `types`: error enum and wire-format structs
//! - `client`: blocking `ureq` clients (Gemini vision, Groq text)

pub mod client;
pub mod types;

pub use client::{GeminiVisionClient, GroqTextClient};
pub use types::LlmError;

/// One image in, one text response out
pub trait VisionModel: Send + Sync {
    fn analyze(&self, prompt: &str, image: &[u8], mime: &str) -> Result<String, LlmError>;
}

/// One prompt in, one text response out
pub trait TextModel: Send + Sync {
    fn generate(&self, prompt: &str) -> Result<String, LlmError>;
}
