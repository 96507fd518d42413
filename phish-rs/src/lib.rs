//! phish-rs: Phishing risk assessment for page snapshots
//!
//! Turns a frozen capture of a web page (URL plus rendered-DOM signals) into
//! a phishing verdict: a probability score, a boolean decision and a list of
//! human-readable risk factors.
//!
//! # Pipeline
//!
//! - **Feature extraction**: lexical URL statistics, dictionary lookups
//!   (brands, suspicious TLDs, shorteners, phishing hint words) and DOM
//!   heuristics, plus one blocklist/DNS signal
//! - **Preprocessing**: robust scaling against parameters fitted offline,
//!   producing a fixed-length vector in training column order
//! - **Inference**: pluggable model backend (quantized linear scorer or
//!   interpreted dense network) behind a never-panicking contract
//! - **Decision**: fixed threshold with a heuristic fallback when the model
//!   is unavailable
//!
//! # Example
//!
//! ```no_run
//! use phish_rs::analysis::PhishingDetector;
//! use phish_rs::features::{FeatureExtractor, StatisticalReporter};
//! use phish_rs::scaler::ScalerConfig;
//! use phish_rs::snapshot::PageSnapshot;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let scaler = Arc::new(ScalerConfig::load(
//!         "assets/scaler_params.json",
//!         "assets/feature_info.json",
//!     )?);
//!     let detector = PhishingDetector::new(
//!         FeatureExtractor::new()?,
//!         StatisticalReporter::new()?,
//!         scaler,
//!         None,
//!     );
//!
//!     let snapshot = PageSnapshot::from_json(r#"{"url": "http://example.com"}"#)?;
//!     let result = detector.analyze(&snapshot).await;
//!     println!("phishing: {}", result.is_phishing);
//!     Ok(())
//! }
//! ```

pub mod analysis;
pub mod config;
pub mod error;
pub mod features;
pub mod inference;
pub mod scaler;
pub mod snapshot;

pub use analysis::{AnalysisEngine, AnalysisResult, PhishingDetector};
pub use error::{PhishError, Result};
