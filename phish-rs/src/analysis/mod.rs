//! Analysis pipeline
//!
//! [`PhishingDetector`] turns one snapshot into one [`AnalysisResult`];
//! [`AnalysisEngine`] wraps it in a single-worker queue with duplicate
//! shedding for callers that submit snapshots as they arrive.

pub mod detector;
pub mod engine;
pub mod types;

pub use detector::{PhishingDetector, FALLBACK_SCORE, PHISHING_THRESHOLD};
pub use engine::{AnalysisCallback, AnalysisEngine};
pub use types::AnalysisResult;
