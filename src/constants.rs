//! Central Configuration Constants
//!
//! Single source of truth for all configuration defaults.
//! To change a default model or path, only edit this file.

/// Default vision model for hazard classification
pub const DEFAULT_VISION_MODEL: &str = "gemini-2.5-flash";

/// Default text model for protocol synthesis and alert composition
pub const DEFAULT_TEXT_MODEL: &str = "llama-3.1-8b-instant";

/// Default knowledge base directory (NDMA documents)
pub const DEFAULT_KB_DIR: &str = "./data/ndma_docs";

/// Default monitored location name
pub const DEFAULT_LOCATION: &str = "Mumbai Railway Station";

/// Default video sampling interval (seconds of stream time)
pub const DEFAULT_SAMPLE_INTERVAL_SECS: u64 = 5;

/// Assumed FPS when the frame source cannot report one
pub const DEFAULT_FALLBACK_FPS: f32 = 25.0;

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "Nivaran";

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Get the Google API key (required for vision calls)
pub fn get_google_api_key() -> Option<String> {
    std::env::var("GOOGLE_API_KEY").ok().filter(|k| !k.is_empty())
}

/// Get the Groq API key (required for text generation)
pub fn get_groq_api_key() -> Option<String> {
    std::env::var("GROQ_API_KEY").ok().filter(|k| !k.is_empty())
}

/// Get vision model name from environment or use default
pub fn get_vision_model() -> String {
    std::env::var("NIVARAN_VISION_MODEL")
        .unwrap_or_else(|_| DEFAULT_VISION_MODEL.to_string())
}

/// Get text model name from environment or use default
pub fn get_text_model() -> String {
    std::env::var("NIVARAN_TEXT_MODEL")
        .unwrap_or_else(|_| DEFAULT_TEXT_MODEL.to_string())
}

/// Get knowledge base directory from environment or use default
pub fn get_kb_dir() -> String {
    std::env::var("NIVARAN_KB_DIR")
        .unwrap_or_else(|_| DEFAULT_KB_DIR.to_string())
}

/// Get sampling interval from environment or use default
pub fn get_sample_interval() -> u64 {
    std::env::var("NIVARAN_SAMPLE_INTERVAL")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_SAMPLE_INTERVAL_SECS)
}
