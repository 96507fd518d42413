use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub scaler: ScalerFilesConfig,
    pub model: ModelConfig,
    pub logging: LoggingConfig,
}

/// Paths to the scaler parameter documents loaded at startup.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScalerFilesConfig {
    pub params_path: String,
    pub feature_info_path: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ModelConfig {
    /// Which inference backend to load: "quantized" or "interpreted"
    pub backend: String,
    pub model_path: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| crate::error::PhishError::Config(e.to_string()))?;

        toml::from_str(&content)
            .map_err(|e| crate::error::PhishError::Config(e.to_string()))
    }

    pub fn default() -> Self {
        Self {
            scaler: ScalerFilesConfig {
                params_path: "assets/scaler_params.json".to_string(),
                feature_info_path: "assets/feature_info.json".to_string(),
            },
            model: ModelConfig {
                backend: "quantized".to_string(),
                model_path: "assets/phishing_classifier.pqm".to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                format: "pretty".to_string(),
            },
        }
    }
}
