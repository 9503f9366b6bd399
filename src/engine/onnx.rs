//! ONNX artifact backend using Candle.
//!
//! Reserved runtime slot: the adapter trait is runtime-agnostic and this
//! module anchors the second kind. Graph execution lands with the candle
//! implementation behind the `onnx` feature.

use std::sync::Arc;

use thiserror::Error;

use super::runtime::InferenceModel;

#[derive(Debug, Error)]
pub enum OnnxLoadError {
    #[error("ONNX support not compiled in; enable the `onnx` feature")]
    NotCompiled,

    #[error("ONNX load failed: {0}")]
    Load(String),
}

/// Materialize an ONNX graph from raw artifact bytes.
#[cfg(feature = "onnx")]
pub fn load_onnx_model(_bytes: &[u8]) -> Result<Arc<dyn InferenceModel>, OnnxLoadError> {
    // Candle graph construction goes here once candle-onnx wiring lands.
    Err(OnnxLoadError::Load(
        "ONNX graph loading requires the candle implementation".into(),
    ))
}

/// Stub for non-onnx builds.
#[cfg(not(feature = "onnx"))]
pub fn load_onnx_model(_bytes: &[u8]) -> Result<Arc<dyn InferenceModel>, OnnxLoadError> {
    Err(OnnxLoadError::NotCompiled)
}
