//! Raw feature map produced by the extractor

use serde::Serialize;
use std::collections::BTreeMap;

/// Named raw features for one snapshot.
///
/// Produced fresh per analysis and never mutated after extraction completes.
/// Absent entries mean the signal could not be computed; the preprocessor
/// substitutes 0 for them.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RawFeatureMap {
    values: BTreeMap<String, f32>,
}

impl RawFeatureMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: &str, value: f32) {
        self.values.insert(name.to_string(), value);
    }

    pub fn get(&self, name: &str) -> Option<f32> {
        self.values.get(name).copied()
    }

    /// True when the named boolean feature is set to 1.
    pub fn flag(&self, name: &str) -> bool {
        self.get(name) == Some(1.0)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &f32)> {
        self.values.iter()
    }
}

impl PartialEq for RawFeatureMap {
    fn eq(&self, other: &Self) -> bool {
        self.values == other.values
    }
}
