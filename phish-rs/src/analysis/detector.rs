//! Verdict computation
//!
//! Runs the full pipeline for one snapshot: feature extraction, blocklist/DNS
//! lookup, scaling, model inference and the final decision rule. Heuristic
//! risk factors are computed from the raw features regardless of whether the
//! model produced a score, so a degraded backend still yields an explainable
//! verdict.

use std::sync::Arc;
use tracing::debug;

use crate::features::{FeatureExtractor, RawFeatureMap, StatisticalReporter};
use crate::inference::ModelBackend;
use crate::scaler::{preprocess, ScalerConfig};
use crate::snapshot::PageSnapshot;

use super::types::AnalysisResult;

/// Model scores at or above this are flagged as phishing.
pub const PHISHING_THRESHOLD: f64 = 0.55;
/// Score reported when the backend is unavailable but heuristics fired.
pub const FALLBACK_SCORE: f64 = 0.6;

pub struct PhishingDetector {
    extractor: FeatureExtractor,
    reporter: StatisticalReporter,
    scaler: Arc<ScalerConfig>,
    backend: Option<Arc<ModelBackend>>,
}

impl PhishingDetector {
    /// `backend: None` means the model never loaded; analysis still runs and
    /// falls back to the heuristic decision rule.
    pub fn new(
        extractor: FeatureExtractor,
        reporter: StatisticalReporter,
        scaler: Arc<ScalerConfig>,
        backend: Option<Arc<ModelBackend>>,
    ) -> Self {
        Self {
            extractor,
            reporter,
            scaler,
            backend,
        }
    }

    pub async fn analyze(&self, snapshot: &PageSnapshot) -> AnalysisResult {
        let mut features = self.extractor.extract(snapshot);
        let report = self.reporter.report(&snapshot.url, &snapshot.hostname).await;
        features.insert("statistical_report", report);

        let vector = preprocess(&features, &self.scaler);
        let probability = self
            .backend
            .as_ref()
            .and_then(|backend| backend.predict(&vector));

        let risk_factors = risk_factors(&features);
        let (confidence_score, is_phishing) = decide(probability, &risk_factors);
        debug!(
            url = %snapshot.url,
            score = confidence_score,
            phishing = is_phishing,
            "analysis complete"
        );

        AnalysisResult {
            inspected_url: if snapshot.url.is_empty() {
                None
            } else {
                Some(snapshot.url.clone())
            },
            is_phishing,
            confidence_score,
            risk_factors,
            raw_features: features,
        }
    }
}

/// Final decision rule.
///
/// `None` means the backend could not score the vector; the verdict then
/// depends only on whether any heuristic fired.
pub fn decide(probability: Option<f32>, risk_factors: &[String]) -> (f64, bool) {
    match probability {
        Some(p) => {
            let score = p as f64;
            (score, score >= PHISHING_THRESHOLD)
        }
        None if risk_factors.is_empty() => (0.0, false),
        None => (FALLBACK_SCORE, true),
    }
}

/// Heuristic findings surfaced alongside the score.
pub fn risk_factors(features: &RawFeatureMap) -> Vec<String> {
    let mut factors = Vec::new();
    if features.flag("shortening_service") {
        factors.push("URL uses a link shortening service".to_string());
    }
    if features.flag("suspecious_tld") {
        factors.push("Domain uses a TLD frequently seen in phishing".to_string());
    }
    if features.flag("domain_in_brand") {
        factors.push("Domain name impersonates a well-known brand".to_string());
    }
    if features.flag("brand_in_path") {
        factors.push("Well-known brand name appears in the URL path".to_string());
    }
    if features.flag("login_form") {
        factors.push("Page contains a credential entry form".to_string());
    }
    if features.get("nb_redirection").unwrap_or(0.0) >= 3.0 {
        factors.push("Page was reached through repeated redirections".to_string());
    }
    if features.get("statistical_report") == Some(1.0) {
        factors.push("URL or its address appears on a blocklist".to_string());
    }
    factors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decide_threshold_boundary() {
        let (score, phishing) = decide(Some(0.55), &[]);
        assert!(phishing);
        assert!(score >= PHISHING_THRESHOLD);

        let (score, phishing) = decide(Some(0.549), &[]);
        assert!(!phishing);
        assert!(score < PHISHING_THRESHOLD);
    }

    #[test]
    fn test_decide_extremes() {
        assert_eq!(decide(Some(0.0), &[]), (0.0, false));
        assert_eq!(decide(Some(1.0), &[]), (1.0, true));
    }

    #[test]
    fn test_fallback_with_findings_is_phishing() {
        let factors = vec!["Page contains a credential entry form".to_string()];
        assert_eq!(decide(None, &factors), (FALLBACK_SCORE, true));
    }

    #[test]
    fn test_fallback_without_findings_is_clean() {
        assert_eq!(decide(None, &[]), (0.0, false));
    }

    #[test]
    fn test_risk_factors_from_flags() {
        let mut features = RawFeatureMap::new();
        features.insert("shortening_service", 1.0);
        features.insert("login_form", 1.0);
        features.insert("nb_redirection", 4.0);
        features.insert("suspecious_tld", 0.0);
        let factors = risk_factors(&features);
        assert_eq!(factors.len(), 3);
        assert!(factors.iter().any(|f| f.contains("shortening")));
        assert!(factors.iter().any(|f| f.contains("redirections")));
    }

    #[test]
    fn test_dns_neutral_report_is_not_a_risk_factor() {
        let mut features = RawFeatureMap::new();
        features.insert("statistical_report", 2.0);
        assert!(risk_factors(&features).is_empty());
    }
}
