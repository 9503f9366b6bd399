//! Serving core: model registry and hot-swap inference dispatch.
//!
//! Holds multiple named models, each with tagged variants (`production`,
//! `staging`, ad-hoc calibrated ids), serves predictions against a chosen
//! variant, and lets the update path atomically replace a variant while
//! request traffic keeps flowing.
//!
//! # Boundaries
//!
//! - Serving surface (HTTP/RPC translation) wraps [`engine::InferenceDispatcher`].
//! - The artifact connector implements [`connector::ArtifactSource`] and
//!   feeds [`models::PublishGateway`]; the core makes no network calls.
//! - Runtimes plug in behind [`engine::InferenceModel`]; native tensor
//!   types never cross the public contract.

pub mod config;
pub mod connector;
pub mod engine;
pub mod models;
pub mod telemetry;

use std::sync::Arc;

use engine::{InferenceDispatcher, PredictOptions};
use models::{ModelRegistry, PublishGateway};

/// One serving process worth of core state, wired together.
///
/// The registry is constructed once and shared explicitly; the dispatcher
/// reads from it, the gateway writes to it.
pub struct ServingRuntime {
    pub registry: Arc<ModelRegistry>,
    pub dispatcher: InferenceDispatcher,
    pub gateway: PublishGateway,
}

impl ServingRuntime {
    /// Build a runtime from loaded configuration.
    pub fn new(config: &config::EnvConfig) -> Self {
        let registry = Arc::new(ModelRegistry::new());
        let dispatcher = InferenceDispatcher::new(registry.clone(), config.dispatch.clone());
        let gateway = PublishGateway::new(registry.clone());
        Self {
            registry,
            dispatcher,
            gateway,
        }
    }

    /// Shorthand for a prediction with default options.
    pub async fn predict(
        &self,
        model_name: &str,
        input: serde_json::Value,
    ) -> Result<engine::Prediction, engine::InferenceError> {
        self.dispatcher
            .predict(model_name, input, PredictOptions::default())
            .await
    }
}
