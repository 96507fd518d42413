//! Analysis outcome types

use serde::Serialize;

use crate::features::RawFeatureMap;

/// Verdict for one analyzed snapshot.
///
/// Always produced, even when the model backend is unavailable; in that case
/// `confidence_score` carries the fallback value and the verdict leans on the
/// heuristic risk factors alone.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    /// URL the verdict applies to; `None` when the snapshot carried no URL.
    pub inspected_url: Option<String>,
    pub is_phishing: bool,
    /// Phishing probability in [0, 1], or the fallback score.
    pub confidence_score: f64,
    /// Human-readable heuristic findings, independent of the model.
    pub risk_factors: Vec<String>,
    pub raw_features: RawFeatureMap,
}
