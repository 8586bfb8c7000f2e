//! Vision Module - Hazard Classification
//!
//! Maps one image to a structured hazard verdict via the vision model.
//!
//! ## Structure
//! - `types`: HazardType, Severity, HazardVerdict, ImageInput
//! - `classifier`: classification logic + response repair
//!
//! ## Usage
//! ```ignore
//! let classifier = HazardClassifier::new(Box::new(vision_client));
//! let verdict = classifier.classify(&ImageInput::from_path("cctv/frame.jpg"));
//! if verdict.hazard {
//!     println!("{} ({})", verdict.hazard_type, verdict.severity);
//! }
//! ```

pub mod classifier;
pub mod types;

#[cfg(test)]
mod tests;

pub use classifier::HazardClassifier;
pub use types::{HazardType, HazardVerdict, ImageInput, Severity};
