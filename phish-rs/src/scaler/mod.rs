//! Feature normalization
//!
//! Loads the RobustScaler parameters and canonical feature order once at
//! startup and turns raw feature maps into fixed-length model input vectors.

pub mod params;
pub mod preprocess;

pub use params::ScalerConfig;
pub use preprocess::preprocess;

/// Fixed-order model input; position i corresponds to `feature_order[i]`.
pub type FeatureVector = Vec<f32>;
