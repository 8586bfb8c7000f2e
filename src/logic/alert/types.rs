//! Alert Bundle Types

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Max characters per alert line (boundary invariant, not enforced by the
/// composer itself)
pub const MAX_ALERT_LINE_CHARS: usize = 200;

/// Max characters per tweet field (boundary invariant)
pub const MAX_TWEET_CHARS: usize = 280;

// ============================================================================
// LANGUAGE
// ============================================================================

/// Alert languages: English plus the two locale languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Hi,
    Mr,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::En, Language::Hi, Language::Mr];

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Hi => "hi",
            Language::Mr => "mr",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// ALERT BUNDLE
// ============================================================================

/// Multilingual alert text plus the two social-media drafts.
/// The empty bundle is the canonical representation of "no hazard".
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AlertBundle {
    pub alert_text: BTreeMap<Language, String>,
    pub tweet_public: String,
    pub tweet_authority: String,
}

impl AlertBundle {
    /// Canonical no-hazard bundle
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.alert_text.values().all(|v| v.trim().is_empty())
            && self.tweet_public.trim().is_empty()
            && self.tweet_authority.trim().is_empty()
    }

    /// Alert line for a language, empty string when absent
    pub fn alert(&self, language: Language) -> &str {
        self.alert_text
            .get(&language)
            .map(|s| s.as_str())
            .unwrap_or("")
    }

    pub fn set_alert(&mut self, language: Language, text: String) {
        self.alert_text.insert(language, text);
    }

    /// Enforce the boundary length limits, truncating on a char boundary.
    /// Applied where a bundle crosses into the incident log, not inside
    /// the composer.
    pub fn clamp_lengths(&mut self) {
        for value in self.alert_text.values_mut() {
            truncate_chars(value, MAX_ALERT_LINE_CHARS);
        }
        truncate_chars(&mut self.tweet_public, MAX_TWEET_CHARS);
        truncate_chars(&mut self.tweet_authority, MAX_TWEET_CHARS);
    }
}

fn truncate_chars(s: &mut String, max_chars: usize) {
    if s.chars().count() <= max_chars {
        return;
    }
    let keep: String = s.chars().take(max_chars).collect();
    *s = keep;
}

// ============================================================================
// TESTS
// ============================================================================
