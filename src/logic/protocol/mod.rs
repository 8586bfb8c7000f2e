//! Protocol Module - Knowledge Base Lookup
//!
//! Maps a hazard type to official response guidance, with a lazily-built
//! document index and deterministic fallbacks.
//!
//! ## Structure
//! - `types`: ProtocolText (tagged result), KbError
//! - `index`: KnowledgeBase handle + chunk index (built once per handle)
//! - `resolver`: short-circuit + retrieve + synthesize logic

pub mod index;
pub mod resolver;
pub mod types;


pub use index::KnowledgeBase;
pub use resolver::ProtocolResolver;
pub use types::{KbError, ProtocolSource, ProtocolText};
