//! Inference backends
//!
//! One polymorphic scoring capability with two interchangeable variants,
//! selected at configuration time: the primary quantized linear scorer
//! ([`quantized::QuantizedModel`]) and the secondary interpreted multi-layer
//! model ([`interpreted::InterpretedModel`]).
//!
//! The contract is deliberately narrow: fixed-length float vector in, one
//! probability out, or `None` when the backend is unavailable. `predict`
//! never panics and never returns an error; every internal fault (including
//! an input shape mismatch) marks that backend instance unavailable for the
//! remainder of the process. Load failure at startup is terminal the same
//! way; there is no per-call retry.

pub mod interpreted;
pub mod quantized;

use tracing::{error, info, warn};

use crate::config::ModelConfig;
use crate::error::{PhishError, Result};
pub use interpreted::InterpretedModel;
pub use quantized::QuantizedModel;

pub enum ModelBackend {
    Quantized(QuantizedModel),
    Interpreted(InterpretedModel),
}

impl ModelBackend {
    /// Load the backend selected in the configuration.
    pub fn load(config: &ModelConfig) -> Result<Self> {
        let backend = match config.backend.as_str() {
            "quantized" => ModelBackend::Quantized(QuantizedModel::load(&config.model_path)?),
            "interpreted" => {
                ModelBackend::Interpreted(InterpretedModel::load(&config.model_path)?)
            }
            other => {
                return Err(PhishError::Config(format!(
                    "unknown inference backend {other:?} (expected \"quantized\" or \"interpreted\")"
                )))
            }
        };
        info!(
            "Inference backend ready: {} ({} inputs)",
            backend.name(),
            backend.input_size()
        );
        Ok(backend)
    }

    /// Score a preprocessed vector; `None` means unavailable.
    pub fn predict(&self, vector: &[f32]) -> Option<f32> {
        if vector.len() != self.input_size() {
            error!(
                "{}: input length mismatch (expected {}, got {})",
                self.name(),
                self.input_size(),
                vector.len()
            );
            self.mark_unavailable();
            return None;
        }

        let probability = match self {
            ModelBackend::Quantized(model) => model.predict(vector),
            ModelBackend::Interpreted(model) => model.predict(vector),
        };

        if probability.is_none() {
            warn!("{}: inference fault, backend now unavailable", self.name());
        }
        probability
    }

    pub fn input_size(&self) -> usize {
        match self {
            ModelBackend::Quantized(model) => model.input_size(),
            ModelBackend::Interpreted(model) => model.input_size(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ModelBackend::Quantized(_) => "quantized",
            ModelBackend::Interpreted(_) => "interpreted",
        }
    }

    fn mark_unavailable(&self) {
        match self {
            ModelBackend::Quantized(model) => model.mark_unavailable(),
            ModelBackend::Interpreted(model) => model.mark_unavailable(),
        }
    }
}

pub(crate) fn sigmoid(z: f32) -> f32 {
    1.0 / (1.0 + (-z).exp())
}
