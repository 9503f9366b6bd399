//! Dense affine model adapter.
//!
//! Executes `y = W·x + b` over each record, loaded from a JSON artifact.
//! Single-output models expose a `value` head; multi-output models expose
//! `label` (argmax) and `score` (winning logit) heads.

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

use super::input::RecordBatch;
use super::output::Prediction;
use super::runtime::{InferenceModel, RuntimeError, RuntimeKind};

#[derive(Debug, Error)]
pub enum LinearLoadError {
    #[error("artifact is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("inconsistent dimensions: {0}")]
    Dimensions(String),
}

/// On-disk artifact layout: row-major weights, one row per output.
#[derive(Debug, Deserialize)]
struct LinearSpec {
    input_dim: usize,
    weights: Vec<Vec<f64>>,
    bias: Vec<f64>,
}

/// A loaded affine model. Immutable after load; `predict` is pure compute.
pub struct LinearModel {
    input_dim: usize,
    weights: Vec<Vec<f64>>,
    bias: Vec<f64>,
}

impl LinearModel {
    /// Materialize a model from raw artifact bytes.
    pub fn from_json(bytes: &[u8]) -> Result<Self, LinearLoadError> {
        let spec: LinearSpec = serde_json::from_slice(bytes)?;

        if spec.input_dim == 0 {
            return Err(LinearLoadError::Dimensions("input_dim must be > 0".into()));
        }
        if spec.weights.is_empty() {
            return Err(LinearLoadError::Dimensions("weights cannot be empty".into()));
        }
        if spec.bias.len() != spec.weights.len() {
            return Err(LinearLoadError::Dimensions(format!(
                "bias has {} entries, weights have {} rows",
                spec.bias.len(),
                spec.weights.len()
            )));
        }
        for (i, row) in spec.weights.iter().enumerate() {
            if row.len() != spec.input_dim {
                return Err(LinearLoadError::Dimensions(format!(
                    "weight row {} has {} columns, input_dim is {}",
                    i,
                    row.len(),
                    spec.input_dim
                )));
            }
        }

        Ok(Self {
            input_dim: spec.input_dim,
            weights: spec.weights,
            bias: spec.bias,
        })
    }

    pub fn output_dim(&self) -> usize {
        self.weights.len()
    }

    fn scores(&self, row: &[f64]) -> Vec<f64> {
        self.weights
            .iter()
            .zip(&self.bias)
            .map(|(w, b)| w.iter().zip(row).map(|(wi, xi)| wi * xi).sum::<f64>() + b)
            .collect()
    }
}

#[async_trait]
impl InferenceModel for LinearModel {
    fn runtime(&self) -> RuntimeKind {
        RuntimeKind::Linear
    }

    fn input_dim(&self) -> usize {
        self.input_dim
    }

    async fn predict(&self, batch: &RecordBatch) -> Result<Prediction, RuntimeError> {
        let rows = batch.to_rows(self.input_dim)?;

        if self.output_dim() == 1 {
            let values = rows.iter().map(|row| self.scores(row)[0]).collect();
            return Ok(Prediction::new().with_head("value", values));
        }

        let mut labels = Vec::with_capacity(rows.len());
        let mut winning = Vec::with_capacity(rows.len());
        for row in &rows {
            let scores = self.scores(row);
            let (label, score) = scores
                .iter()
                .enumerate()
                .max_by(|a, b| a.1.total_cmp(b.1))
                .map(|(i, s)| (i as f64, *s))
                .ok_or_else(|| RuntimeError::InvalidInput("model has no outputs".into()))?;
            labels.push(label);
            winning.push(score);
        }

        Ok(Prediction::new()
            .with_head("label", labels)
            .with_head("score", winning))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn classifier_bytes() -> Vec<u8> {
        // Two inputs, three classes. Class index equals whichever weight
        // row dominates the record.
        json!({
            "input_dim": 2,
            "weights": [[1.0, 0.0], [0.0, 1.0], [-1.0, -1.0]],
            "bias": [0.0, 0.0, 0.5]
        })
        .to_string()
        .into_bytes()
    }

    #[tokio::test]
    async fn test_classifier_argmax_heads() {
        let model = LinearModel::from_json(&classifier_bytes()).unwrap();
        let batch = RecordBatch::from_value(json!([[3.0, 1.0], [0.0, 2.0]]), 32).unwrap();

        let prediction = model.predict(&batch).await.unwrap();
        assert_eq!(prediction.head("label"), Some(&[0.0, 1.0][..]));
        assert_eq!(prediction.head("score"), Some(&[3.0, 2.0][..]));
    }

    #[tokio::test]
    async fn test_single_output_value_head() {
        let bytes = json!({"input_dim": 2, "weights": [[2.0, 1.0]], "bias": [1.0]})
            .to_string()
            .into_bytes();
        let model = LinearModel::from_json(&bytes).unwrap();
        let batch = RecordBatch::from_value(json!([[1.0, 1.0]]), 32).unwrap();

        let prediction = model.predict(&batch).await.unwrap();
        assert_eq!(prediction.head("value"), Some(&[4.0][..]));
    }

    #[tokio::test]
    async fn test_wrong_arity_is_invalid_input() {
        let model = LinearModel::from_json(&classifier_bytes()).unwrap();
        let batch = RecordBatch::from_value(json!([[1.0, 2.0, 3.0]]), 32).unwrap();

        let err = model.predict(&batch).await.unwrap_err();
        assert!(matches!(err, RuntimeError::InvalidInput(_)));
    }

    #[test]
    fn test_rejects_mismatched_bias() {
        let bytes = json!({"input_dim": 2, "weights": [[1.0, 0.0]], "bias": [0.0, 1.0]})
            .to_string()
            .into_bytes();
        assert!(matches!(
            LinearModel::from_json(&bytes),
            Err(LinearLoadError::Dimensions(_))
        ));
    }

    #[test]
    fn test_rejects_garbage_bytes() {
        assert!(matches!(
            LinearModel::from_json(b"not json"),
            Err(LinearLoadError::Json(_))
        ));
    }
}
