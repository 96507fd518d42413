//! Quantized linear scorer (primary backend)
//!
//! Loads a compact binary artifact: int8 weights with a shared dequantization
//! scale, a bias, and a sigmoid output head. The whole artifact is read into
//! memory once at startup.
//!
//! Artifact layout (little-endian):
//! `"PQM1"` magic, `u32` feature count, `f32` bias, `f32` weight scale,
//! then one `i8` weight per feature.

use bytes::Buf;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, error};

use crate::error::{PhishError, Result};

const MAGIC: &[u8; 4] = b"PQM1";

pub struct QuantizedModel {
    weights: Vec<i8>,
    weight_scale: f32,
    bias: f32,
    unavailable: AtomicBool,
}

impl QuantizedModel {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let raw = std::fs::read(&path).map_err(|e| {
            PhishError::Model(format!("cannot read {}: {e}", path.as_ref().display()))
        })?;
        let model = Self::from_bytes(&raw)?;
        debug!(
            "quantized model loaded: {} weights from {}",
            model.weights.len(),
            path.as_ref().display()
        );
        Ok(model)
    }

    pub fn from_bytes(raw: &[u8]) -> Result<Self> {
        let mut buf = raw;

        if buf.remaining() < 4 || &buf[..4] != MAGIC {
            return Err(PhishError::Model("bad quantized model magic".to_string()));
        }
        buf.advance(4);

        if buf.remaining() < 12 {
            return Err(PhishError::Model("truncated quantized model header".to_string()));
        }
        let n_features = buf.get_u32_le() as usize;
        let bias = buf.get_f32_le();
        let weight_scale = buf.get_f32_le();

        if buf.remaining() != n_features {
            return Err(PhishError::Model(format!(
                "quantized model declares {n_features} weights but carries {}",
                buf.remaining()
            )));
        }
        let weights: Vec<i8> = buf.chunk().iter().map(|&b| b as i8).collect();

        Ok(Self {
            weights,
            weight_scale,
            bias,
            unavailable: AtomicBool::new(false),
        })
    }

    pub fn input_size(&self) -> usize {
        self.weights.len()
    }

    pub fn predict(&self, vector: &[f32]) -> Option<f32> {
        if self.unavailable.load(Ordering::Relaxed) {
            return None;
        }

        let z = self.bias
            + self
                .weights
                .iter()
                .zip(vector)
                .map(|(&w, &x)| w as f32 * self.weight_scale * x)
                .sum::<f32>();

        let probability = super::sigmoid(z);
        if !probability.is_finite() {
            error!("quantized model produced a non-finite score");
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
pub(crate) mod tests {
    use super::*;

    pub(crate) fn model_bytes(n: u32, bias: f32, scale: f32, weights: &[i8]) -> Vec<u8> {
        let mut raw = Vec::new();
        raw.extend_from_slice(MAGIC);
        raw.extend_from_slice(&n.to_le_bytes());
        raw.extend_from_slice(&bias.to_le_bytes());
        raw.extend_from_slice(&scale.to_le_bytes());
        raw.extend(weights.iter().map(|&w| w as u8));
        raw
    }

    #[test]
    fn test_predict_known_value() {
        // z = 0 + (1 * 1.0 * 0.0) = 0 -> sigmoid(0) = 0.5
        let model = QuantizedModel::from_bytes(&model_bytes(1, 0.0, 1.0, &[1])).unwrap();
        assert_eq!(model.predict(&[0.0]), Some(0.5));
    }

    #[test]
    fn test_predict_weighted_sum() {
        // z = 0.5 + 2*0.25*1 + (-4)*0.25*0.5 = 0.5
        let model = QuantizedModel::from_bytes(&model_bytes(2, 0.5, 0.25, &[2, -4])).unwrap();
        let p = model.predict(&[1.0, 0.5]).unwrap();
        assert!((p - super::super::sigmoid(0.5)).abs() < 1e-6);
    }

    #[test]
    fn test_bad_magic() {
        let mut raw = model_bytes(1, 0.0, 1.0, &[1]);
        raw[0] = b'X';
        assert!(QuantizedModel::from_bytes(&raw).is_err());
    }

    #[test]
    fn test_truncated_weights() {
        let raw = model_bytes(5, 0.0, 1.0, &[1, 2]);
        assert!(QuantizedModel::from_bytes(&raw).is_err());
    }

    #[test]
    fn test_missing_file() {
        assert!(QuantizedModel::load("/nonexistent/model.pqm").is_err());
    }

    #[test]
    fn test_unavailable_latch() {
        let model = QuantizedModel::from_bytes(&model_bytes(1, 0.0, 1.0, &[1])).unwrap();
        model.mark_unavailable();
        assert_eq!(model.predict(&[0.0]), None);
    }
}
