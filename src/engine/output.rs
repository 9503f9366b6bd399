//! Prediction output types.
//!
//! Output is always a mapping from output-head name to a plain numeric
//! sequence. Runtime-native tensor types never cross this boundary.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Result of one prediction: named output heads, each a flat numeric sequence.
///
/// BTreeMap keeps head ordering stable across serializations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    heads: BTreeMap<String, Vec<f64>>,
}

impl Prediction {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style head insertion.
    pub fn with_head(mut self, name: impl Into<String>, values: Vec<f64>) -> Self {
        self.heads.insert(name.into(), values);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, values: Vec<f64>) {
        self.heads.insert(name.into(), values);
    }

    pub fn head(&self, name: &str) -> Option<&[f64]> {
        self.heads.get(name).map(Vec::as_slice)
    }

    pub fn head_names(&self) -> impl Iterator<Item = &str> {
        self.heads.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.heads.is_empty()
    }
}
