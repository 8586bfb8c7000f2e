//! Alert Module - Multilingual Alert Composition
//!
//! Turns a verdict and its protocol text into the fixed alert bundle:
//! three alert languages plus the two tweet drafts.
//!
//! ## Structure
//! - `types`: Language, AlertBundle, boundary length limits
//! - `parser`: table-driven `TAG: content` line parser
//! - `composer`: generation call + deterministic fallback template

pub mod composer;
pub mod parser;
pub mod types;


pub use composer::AlertComposer;
pub use parser::parse_tagged;
pub use types::{AlertBundle, Language, MAX_ALERT_LINE_CHARS, MAX_TWEET_CHARS};
