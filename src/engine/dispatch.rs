//! Inference dispatch: the public prediction entry point.
//!
//! Resolves (model name, stage, variant id) against the registry, validates
//! caller input, invokes the selected variant, and maps runtime failures
//! into the public taxonomy.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;

use crate::models::ModelRegistry;
use crate::telemetry::{record_predict_failure, record_predict_success};

use super::error::InferenceError;
use super::input::{RecordBatch, DEFAULT_MAX_RECORDS};
use super::output::Prediction;
use super::runtime::RuntimeError;

/// Dispatcher configuration, typically built from [`crate::config::load`].
#[derive(Debug, Clone)]
pub struct DispatchConfig {
    /// Stage tag used when the caller does not name one.
    pub default_stage: String,
    /// Deadline applied when the caller supplies none. `None` disables it.
    pub default_timeout: Option<Duration>,
    /// Upper bound on records per request.
    pub max_batch_records: usize,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            default_stage: "production".to_string(),
            default_timeout: Some(Duration::from_millis(30_000)),
            max_batch_records: DEFAULT_MAX_RECORDS,
        }
    }
}

/// Per-request selection options.
#[derive(Debug, Clone, Default)]
pub struct PredictOptions {
    /// Stage tag to fall back to; dispatcher default when `None`.
    pub stage: Option<String>,
    /// Calibrated variant id; empty string means "use the stage tag".
    pub variant_id: String,
    /// Caller-supplied deadline overriding the dispatcher default.
    pub timeout: Option<Duration>,
}

impl PredictOptions {
    pub fn stage(mut self, stage: impl Into<String>) -> Self {
        self.stage = Some(stage.into());
        self
    }

    pub fn variant_id(mut self, variant_id: impl Into<String>) -> Self {
        self.variant_id = variant_id.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// The single public entry point for predictions.
///
/// Holds no lock during model invocation: variant resolution clones an
/// `Arc` under a read lock and releases it before compute starts, so a
/// concurrent publish never waits on an in-flight prediction.
pub struct InferenceDispatcher {
    registry: Arc<ModelRegistry>,
    config: DispatchConfig,
}

impl InferenceDispatcher {
    pub fn new(registry: Arc<ModelRegistry>, config: DispatchConfig) -> Self {
        Self { registry, config }
    }

    pub fn registry(&self) -> &Arc<ModelRegistry> {
        &self.registry
    }

    /// Run a prediction against `model_name`.
    ///
    /// Selection policy: a non-empty `variant_id` present among the model's
    /// tags wins; otherwise the stage tag is used; if neither resolves the
    /// call fails with `VariantNotFound`.
    pub async fn predict(
        &self,
        model_name: &str,
        input: Value,
        opts: PredictOptions,
    ) -> Result<Prediction, InferenceError> {
        let result = self.predict_inner(model_name, input, opts).await;
        match &result {
            Ok(_) => record_predict_success(model_name),
            Err(e) => {
                record_predict_failure(model_name, e.class());
                tracing::debug!(model = model_name, error = %e, "predict failed");
            }
        }
        result
    }

    async fn predict_inner(
        &self,
        model_name: &str,
        input: Value,
        opts: PredictOptions,
    ) -> Result<Prediction, InferenceError> {
        let named = self
            .registry
            .resolve(model_name)
            .await
            .ok_or_else(|| InferenceError::ModelNotFound(model_name.to_string()))?;

        let stage = opts
            .stage
            .unwrap_or_else(|| self.config.default_stage.clone());

        let variant = named.select(&stage, &opts.variant_id).await.ok_or_else(|| {
            InferenceError::VariantNotFound {
                model: model_name.to_string(),
                stage: stage.clone(),
                variant_id: opts.variant_id.clone(),
            }
        })?;

        // Structural validation happens before the adapter sees anything.
        let batch = RecordBatch::from_value(input, self.config.max_batch_records)?;

        let model = variant.model();
        let outcome = match opts.timeout.or(self.config.default_timeout) {
            Some(deadline) => tokio::time::timeout(deadline, model.predict(&batch))
                .await
                .map_err(|_| InferenceError::Timeout(deadline.as_millis() as u64))?,
            None => model.predict(&batch).await,
        };

        outcome.map_err(|e| match e {
            RuntimeError::InvalidInput(msg) => InferenceError::InvalidInput(msg),
            RuntimeError::Execution { source } => InferenceError::Failure { source },
        })
    }
}
