//! RobustScaler preprocessing
//!
//! Maps a raw feature map to the model's fixed-order input vector. The output
//! length always equals the configured feature order length; the inference
//! backend relies on that without re-validating.

use tracing::warn;

use super::params::ScalerConfig;
use super::FeatureVector;
use crate::features::RawFeatureMap;

/// Build the model input vector from raw features.
///
/// Robust columns are scaled with `(x - center) / scale` using the column's
/// own parameters; a zero scale falls back to `x - center`. Raw columns pass
/// through unchanged. Missing entries and names outside both column sets
/// substitute 0 so one absent signal never fails the whole vector.
pub fn preprocess(features: &RawFeatureMap, scaler: &ScalerConfig) -> FeatureVector {
    scaler
        .feature_order()
        .iter()
        .map(|name| {
            let value = features.get(name).unwrap_or(0.0);

            if let Some((center, scale)) = scaler.robust_params(name) {
                if scale != 0.0 {
                    (value - center) / scale
                } else {
                    value - center
                }
            } else if scaler.is_raw(name) {
                value
            } else {
                warn!("feature {name} belongs to neither column set, using 0");
                0.0
            }
        })
        .collect()
}
