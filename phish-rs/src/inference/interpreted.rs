//! Interpreted multi-layer scorer (secondary backend)
//!
//! Executes a small dense network described by a JSON artifact instead of a
//! compiled model, useful as a cross-check or when the quantized artifact is
//! not packaged. Layer shapes are validated once at load; inference itself is
//! a plain forward pass.

use serde::Deserialize;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, error};

use crate::error::{PhishError, Result};

#[derive(Debug, Deserialize)]
struct ModelFile {
    input_size: usize,
    layers: Vec<LayerSpec>,
}

#[derive(Debug, Deserialize)]
struct LayerSpec {
    /// Row-major weights, one row per output unit.
    weights: Vec<Vec<f32>>,
    bias: Vec<f32>,
    activation: Activation,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
enum Activation {
    Linear,
    Relu,
    Sigmoid,
}

pub struct InterpretedModel {
    input_size: usize,
    layers: Vec<LayerSpec>,
    unavailable: AtomicBool,
}

impl InterpretedModel {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let raw = std::fs::read_to_string(&path).map_err(|e| {
            PhishError::Model(format!("cannot read {}: {e}", path.as_ref().display()))
        })?;
        let model = Self::from_json(&raw)?;
        debug!(
            "interpreted model loaded: {} layers from {}",
            model.layers.len(),
            path.as_ref().display()
        );
        Ok(model)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let file: ModelFile = serde_json::from_str(raw)
            .map_err(|e| PhishError::Model(format!("malformed interpreted model: {e}")))?;

        if file.layers.is_empty() {
            return Err(PhishError::Model("interpreted model has no layers".to_string()));
        }

        // Validate the shape chain once so predict never has to.
        let mut width = file.input_size;
        for (i, layer) in file.layers.iter().enumerate() {
            if layer.weights.len() != layer.bias.len() {
                return Err(PhishError::Model(format!(
                    "layer {i}: {} weight rows but {} biases",
                    layer.weights.len(),
                    layer.bias.len()
                )));
            }
            for row in &layer.weights {
                if row.len() != width {
                    return Err(PhishError::Model(format!(
                        "layer {i}: expected rows of width {width}, found {}",
                        row.len()
                    )));
                }
            }
            width = layer.weights.len();
        }
        if width != 1 {
            return Err(PhishError::Model(format!(
                "interpreted model must end in a single output unit, found {width}"
            )));
        }

        Ok(Self {
            input_size: file.input_size,
            layers: file.layers,
            unavailable: AtomicBool::new(false),
        })
    }

    pub fn input_size(&self) -> usize {
        self.input_size
    }

    pub fn predict(&self, vector: &[f32]) -> Option<f32> {
        if self.unavailable.load(Ordering::Relaxed) {
            return None;
        }

        let mut activations = vector.to_vec();
        for layer in &self.layers {
            activations = layer
                .weights
                .iter()
                .zip(&layer.bias)
                .map(|(row, &bias)| {
                    let z = bias
                        + row
                            .iter()
                            .zip(&activations)
                            .map(|(&w, &x)| w * x)
                            .sum::<f32>();
                    match layer.activation {
                        Activation::Linear => z,
                        Activation::Relu => z.max(0.0),
                        Activation::Sigmoid => super::sigmoid(z),
                    }
                })
                .collect();
        }

        let probability = activations[0];
        if !probability.is_finite() {
            error!("interpreted model produced a non-finite score");
            self.mark_unavailable();
            return None;
        }
        Some(probability.clamp(0.0, 1.0))
    }

    pub fn mark_unavailable(&self) {
        self.unavailable.store(true, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_sigmoid_layer() {
        let model = InterpretedModel::from_json(
            r#"{"input_size": 2,
                "layers": [{"weights": [[1.0, -1.0]], "bias": [0.0], "activation": "sigmoid"}]}"#,
        )
        .unwrap();
        // z = 3 - 3 = 0 -> 0.5
        assert_eq!(model.predict(&[3.0, 3.0]), Some(0.5));
    }

    #[test]
    fn test_two_layer_network() {
        let model = InterpretedModel::from_json(
            r#"{"input_size": 1,
                "layers": [
                    {"weights": [[2.0], [-2.0]], "bias": [0.0, 0.0], "activation": "relu"},
                    {"weights": [[0.5, 0.5]], "bias": [0.0], "activation": "linear"}
                ]}"#,
        )
        .unwrap();
        // relu([2, -2]) = [2, 0]; 0.5*2 + 0.5*0 = 1.0
        assert_eq!(model.predict(&[1.0]), Some(1.0));
    }

    #[test]
    fn test_shape_chain_validated_at_load() {
        let result = InterpretedModel::from_json(
            r#"{"input_size": 3,
                "layers": [{"weights": [[1.0, 2.0]], "bias": [0.0], "activation": "linear"}]}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_must_end_in_single_output() {
        let result = InterpretedModel::from_json(
            r#"{"input_size": 1,
                "layers": [{"weights": [[1.0], [2.0]], "bias": [0.0, 0.0], "activation": "linear"}]}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_malformed_json_is_load_error() {
        assert!(InterpretedModel::from_json("{").is_err());
    }
}
