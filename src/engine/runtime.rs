//! Runtime adapter contract.
//!
//! The registry and dispatcher depend only on this trait; concrete runtime
//! types never leak past it.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::input::RecordBatch;
use super::output::Prediction;

/// Model runtime kind, recorded on each published variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeKind {
    /// Dense affine model executed in-process.
    Linear,
    /// ONNX graph executed via Candle.
    Onnx,
}

impl RuntimeKind {
    pub fn name(&self) -> &'static str {
        match self {
            RuntimeKind::Linear => "linear",
            RuntimeKind::Onnx => "onnx",
        }
    }
}

/// Errors an adapter may return from `predict`.
///
/// `InvalidInput` covers the runtime rejecting the converted input (wrong
/// shape or dtype); the dispatcher surfaces it under the same public kind
/// as its own structural validation. Anything else is an execution failure
/// and gets wrapped with its cause retained.
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("execution failed: {source}")]
    Execution {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl RuntimeError {
    pub fn execution<E>(source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Execution { source: Box::new(source) }
    }
}

/// A runnable model artifact.
///
/// Implementations convert the validated record batch into their native
/// representation, run one prediction, and return plain numeric heads.
/// `predict` must not mutate the model or any shared state; a published
/// model is invoked concurrently without synchronization.
#[async_trait]
pub trait InferenceModel: Send + Sync {
    /// Which runtime executes this model.
    fn runtime(&self) -> RuntimeKind;

    /// Number of input fields each record must carry.
    fn input_dim(&self) -> usize;

    /// Run one prediction over the batch.
    async fn predict(&self, batch: &RecordBatch) -> Result<Prediction, RuntimeError>;
}
