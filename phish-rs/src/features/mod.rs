//! Feature extraction
//!
//! Turns a [`crate::snapshot::PageSnapshot`] into a named raw feature map:
//! URL lexical structure, word segmentation, dictionary membership, DOM
//! signals, and the DNS-backed blocklist check.

pub mod extractor;
pub mod lists;
pub mod report;
pub mod types;

pub use extractor::FeatureExtractor;
pub use report::StatisticalReporter;
pub use types::RawFeatureMap;
