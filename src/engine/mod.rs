//! Inference engine module.
//!
//! Defines the runtime adapter contract, input/output contracts, the public
//! error taxonomy, and the dispatcher that ties them to the model registry.

pub mod onnx;

mod dispatch;
mod error;
mod input;
mod linear;
mod output;
mod runtime;

pub use dispatch::{DispatchConfig, InferenceDispatcher, PredictOptions};
pub use error::{ErrorClass, InferenceError};
pub use input::{RecordBatch, DEFAULT_MAX_RECORDS};
pub use linear::{LinearLoadError, LinearModel};
pub use output::Prediction;
pub use runtime::{InferenceModel, RuntimeError, RuntimeKind};

pub use onnx::{load_onnx_model, OnnxLoadError};
