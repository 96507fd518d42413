//! Scaler parameter loading
//!
//! Two JSON documents are loaded once at startup: `scaler_params.json` with
//! the RobustScaler columns and their center/scale constants, and
//! `feature_info.json` with the canonical feature order. Malformed or missing
//! files are fatal; the pipeline must not run on partial configuration.

use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tracing::{info, warn};

use crate::error::{PhishError, Result};

#[derive(Debug, Deserialize)]
struct ScalerParamsFile {
    robust_cols: Vec<String>,
    robust_center: Vec<f32>,
    robust_scale: Vec<f32>,
    raw_cols: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct FeatureInfoFile {
    feature_columns: Vec<String>,
}

/// Immutable normalization parameters, shared read-only process-wide.
#[derive(Debug)]
pub struct ScalerConfig {
    /// feature name -> (center, scale) for RobustScaler columns
    robust: HashMap<String, (f32, f32)>,
    raw: HashSet<String>,
    feature_order: Vec<String>,
}

impl ScalerConfig {
    pub fn load<P: AsRef<Path>>(params_path: P, feature_info_path: P) -> Result<Self> {
        let params_text = std::fs::read_to_string(&params_path).map_err(|e| {
            PhishError::Scaler(format!(
                "cannot read {}: {e}",
                params_path.as_ref().display()
            ))
        })?;
        let params: ScalerParamsFile = serde_json::from_str(&params_text)
            .map_err(|e| PhishError::Scaler(format!("malformed scaler params: {e}")))?;

        let info_text = std::fs::read_to_string(&feature_info_path).map_err(|e| {
            PhishError::Scaler(format!(
                "cannot read {}: {e}",
                feature_info_path.as_ref().display()
            ))
        })?;
        let info: FeatureInfoFile = serde_json::from_str(&info_text)
            .map_err(|e| PhishError::Scaler(format!("malformed feature info: {e}")))?;

        Self::from_parts(
            params.robust_cols,
            params.robust_center,
            params.robust_scale,
            params.raw_cols,
            info.feature_columns,
        )
    }

    pub fn from_parts(
        robust_cols: Vec<String>,
        robust_center: Vec<f32>,
        robust_scale: Vec<f32>,
        raw_cols: Vec<String>,
        feature_order: Vec<String>,
    ) -> Result<Self> {
        if robust_cols.len() != robust_center.len() || robust_cols.len() != robust_scale.len() {
            return Err(PhishError::Scaler(format!(
                "robust column/center/scale length mismatch: {}/{}/{}",
                robust_cols.len(),
                robust_center.len(),
                robust_scale.len()
            )));
        }

        let raw: HashSet<String> = raw_cols.into_iter().collect();
        let mut robust = HashMap::new();
        for (i, name) in robust_cols.into_iter().enumerate() {
            if raw.contains(&name) {
                return Err(PhishError::Scaler(format!(
                    "feature {name} listed as both robust and raw"
                )));
            }
            robust.insert(name, (robust_center[i], robust_scale[i]));
        }

        for name in &feature_order {
            if !robust.contains_key(name) && !raw.contains(name) {
                warn!("feature order entry {name} is in neither column set");
            }
        }

        info!(
            "Scaler parameters loaded: {} robust, {} raw, {} ordered features",
            robust.len(),
            raw.len(),
            feature_order.len()
        );

        Ok(Self { robust, raw, feature_order })
    }

    pub fn feature_order(&self) -> &[String] {
        &self.feature_order
    }

    pub fn robust_params(&self, name: &str) -> Option<(f32, f32)> {
        self.robust.get(name).copied()
    }

    pub fn is_raw(&self, name: &str) -> bool {
        self.raw.contains(name)
    }

    pub fn input_size(&self) -> usize {
        self.feature_order.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{content}").unwrap();
        file
    }

    #[test]
    fn test_load_from_files() {
        let params = write_temp(
            r#"{"robust_cols": ["length_url"], "robust_center": [40.0],
                "robust_scale": [25.0], "raw_cols": ["https_token"]}"#,
        );
        let info = write_temp(r#"{"feature_columns": ["length_url", "https_token"]}"#);

        let scaler = ScalerConfig::load(params.path(), info.path()).unwrap();
        assert_eq!(scaler.input_size(), 2);
        assert_eq!(scaler.robust_params("length_url"), Some((40.0, 25.0)));
        assert!(scaler.is_raw("https_token"));
    }

    #[test]
    fn test_length_mismatch_is_fatal() {
        let result = ScalerConfig::from_parts(
            vec!["a".to_string(), "b".to_string()],
            vec![1.0],
            vec![1.0, 2.0],
            vec![],
            vec![],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_overlapping_column_sets_are_fatal() {
        let result = ScalerConfig::from_parts(
            vec!["a".to_string()],
            vec![1.0],
            vec![2.0],
            vec!["a".to_string()],
            vec!["a".to_string()],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_file_is_fatal() {
        assert!(ScalerConfig::load("/nonexistent/params.json", "/nonexistent/info.json").is_err());
    }

    #[test]
    fn test_malformed_json_is_fatal() {
        let params = write_temp("not json");
        let info = write_temp(r#"{"feature_columns": []}"#);
        assert!(ScalerConfig::load(params.path(), info.path()).is_err());
    }
}
