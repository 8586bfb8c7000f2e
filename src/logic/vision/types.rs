//! Hazard Verdict Types
//!
//! Core types for hazard classification. No logic beyond small helpers -
//! the closed enums exist so downstream code cannot mis-compare on casing
//! or typos in free-form model output.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// HAZARD TYPE
// ============================================================================

/// Hazard categories the classifier can report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HazardType {
    Flood,
    Landslide,
    Fire,
    Infrastructure,
    /// Frame analyzed, nothing hazardous in it
    None,
    /// Model response was unusable
    Unknown,
    /// Model call itself failed
    Error,
    /// Input image missing or unreadable
    FileNotFound,
}

impl HazardType {
    pub fn as_str(&self) -> &'static str {
        match self {
            HazardType::Flood => "flood",
            HazardType::Landslide => "landslide",
            HazardType::Fire => "fire",
            HazardType::Infrastructure => "infrastructure",
            HazardType::None => "none",
            HazardType::Unknown => "unknown",
            HazardType::Error => "error",
            HazardType::FileNotFound => "file_not_found",
        }
    }

    /// Capitalized name for alert text ("Flood", "Landslide", ...)
    pub fn display_name(&self) -> &'static str {
        match self {
            HazardType::Flood => "Flood",
            HazardType::Landslide => "Landslide",
            HazardType::Fire => "Fire",
            HazardType::Infrastructure => "Infrastructure failure",
            HazardType::None => "None",
            HazardType::Unknown => "Unknown",
            HazardType::Error => "Error",
            HazardType::FileNotFound => "File not found",
        }
    }

    /// True for the concrete disaster categories that warrant a protocol
    /// lookup and alert composition
    pub fn is_actionable(&self) -> bool {
        matches!(
            self,
            HazardType::Flood
                | HazardType::Landslide
                | HazardType::Fire
                | HazardType::Infrastructure
        )
    }

    /// Parse a model-supplied type string; anything unrecognized is Unknown
    pub fn from_model_str(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "flood" => HazardType::Flood,
            "landslide" => HazardType::Landslide,
            "fire" => HazardType::Fire,
            "infrastructure" => HazardType::Infrastructure,
            "none" => HazardType::None,
            _ => HazardType::Unknown,
        }
    }
}

impl std::fmt::Display for HazardType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// SEVERITY
// ============================================================================

/// Severity levels for a detected hazard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
    Unknown,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Unknown => "unknown",
        }
    }

    pub fn level(&self) -> u8 {
        match self {
            Severity::Unknown => 0,
            Severity::Low => 1,
            Severity::Medium => 2,
            Severity::High => 3,
        }
    }

    /// Concrete severity (valid when a hazard is present)
    pub fn is_concrete(&self) -> bool {
        !matches!(self, Severity::Unknown)
    }

    /// Parse a model-supplied severity string; unrecognized is Unknown
    pub fn from_model_str(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "low" => Severity::Low,
            "medium" => Severity::Medium,
            "high" => Severity::High,
            _ => Severity::Unknown,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// HAZARD VERDICT
// ============================================================================

/// Structured result of classifying one image.
///
/// Invariant: `hazard == true` implies an actionable `hazard_type` and a
/// concrete severity. The classifier repairs violations at parse time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HazardVerdict {
    pub hazard: bool,
    #[serde(rename = "type")]
    pub hazard_type: HazardType,
    pub severity: Severity,
    pub confidence: f32,
}

impl HazardVerdict {
    /// Non-hazard verdict for a given bookkeeping type
    pub fn clear(hazard_type: HazardType) -> Self {
        Self {
            hazard: false,
            hazard_type,
            severity: Severity::Unknown,
            confidence: 0.0,
        }
    }

    /// Input image missing or unreadable
    pub fn file_not_found() -> Self {
        Self::clear(HazardType::FileNotFound)
    }

    /// Vision-model call failed
    pub fn call_failed() -> Self {
        Self::clear(HazardType::Error)
    }

    /// Model responded but the response was unusable
    pub fn unparseable() -> Self {
        Self::clear(HazardType::Unknown)
    }
}

// ============================================================================
// IMAGE INPUT
// ============================================================================

/// Image handed to the classifier: a path on disk or raw bytes
#[derive(Debug, Clone)]
pub enum ImageInput {
    Path(PathBuf),
    Bytes { data: Vec<u8>, mime: String },
}

impl ImageInput {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        ImageInput::Path(path.into())
    }

    /// Stable reference string recorded on the Assessment
    pub fn source_ref(&self) -> String {
        match self {
            ImageInput::Path(p) => p.display().to_string(),
            ImageInput::Bytes { .. } => "<memory>".to_string(),
        }
    }
}

/// Guess a MIME type from a file extension
pub fn mime_for_path(path: &std::path::Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_parsing_is_case_insensitive() {
        assert_eq!(HazardType::from_model_str(" FLOOD "), HazardType::Flood);
        assert_eq!(HazardType::from_model_str("Fire"), HazardType::Fire);
        assert_eq!(HazardType::from_model_str("earthquake"), HazardType::Unknown);
        assert_eq!(HazardType::from_model_str(""), HazardType::Unknown);
    }

    #[test]
    fn test_actionable_types() {
        assert!(HazardType::Flood.is_actionable());
        assert!(HazardType::Infrastructure.is_actionable());
        assert!(!HazardType::None.is_actionable());
        assert!(!HazardType::Unknown.is_actionable());
        assert!(!HazardType::Error.is_actionable());
        assert!(!HazardType::FileNotFound.is_actionable());
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::High.level() > Severity::Medium.level());
        assert!(Severity::Medium.level() > Severity::Low.level());
        assert!(Severity::Low.level() > Severity::Unknown.level());
    }

    #[test]
    fn test_mime_guessing() {
        use std::path::Path;
        assert_eq!(mime_for_path(Path::new("a/frame.JPG")), "image/jpeg");
        assert_eq!(mime_for_path(Path::new("a/frame.png")), "image/png");
        assert_eq!(mime_for_path(Path::new("a/frame")), "application/octet-stream");
    }
}
