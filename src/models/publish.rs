//! Update gateway: the write path used by the connector.
//!
//! Materializes pushed artifacts into runnable models and swaps them into
//! the registry. A failed load leaves any previously published variant for
//! the tag untouched.

use std::path::Path;
use std::sync::Arc;

use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::engine::{load_onnx_model, InferenceModel, LinearModel, RuntimeKind};
use crate::telemetry::record_publish;

use super::registry::ModelRegistry;
use super::variant::ModelVariant;

/// Wire format of a pushed artifact payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactFormat {
    /// JSON-encoded dense affine model.
    LinearJson,
    /// Serialized ONNX graph.
    Onnx,
}

impl ArtifactFormat {
    pub fn extensions(&self) -> &[&str] {
        match self {
            ArtifactFormat::LinearJson => &["json"],
            ArtifactFormat::Onnx => &["onnx"],
        }
    }

    /// Infer the format from a file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        [ArtifactFormat::LinearJson, ArtifactFormat::Onnx]
            .into_iter()
            .find(|f| f.extensions().contains(&ext))
    }

    pub fn name(&self) -> &'static str {
        match self {
            ArtifactFormat::LinearJson => "linear-json",
            ArtifactFormat::Onnx => "onnx",
        }
    }
}

/// Raw model artifact delivered by the connector.
#[derive(Debug, Clone)]
pub struct Artifact {
    pub format: ArtifactFormat,
    pub bytes: Vec<u8>,
}

impl Artifact {
    pub fn new(format: ArtifactFormat, bytes: Vec<u8>) -> Self {
        Self { format, bytes }
    }

    /// Read an artifact from disk, inferring the format from the extension.
    pub fn from_file(path: &Path) -> Result<Self, PublishError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        let format = ArtifactFormat::from_extension(ext).ok_or_else(|| {
            PublishError::UnsupportedFormat(format!("unrecognized extension `{}`", ext))
        })?;
        let bytes = std::fs::read(path)
            .map_err(|e| PublishError::ArtifactLoad(format!("read {}: {}", path.display(), e)))?;
        Ok(Self { format, bytes })
    }

    /// Hex SHA-256 of the payload.
    pub fn digest(&self) -> String {
        hex::encode(Sha256::digest(&self.bytes))
    }
}

#[derive(Debug, Error)]
pub enum PublishError {
    #[error("artifact load failed: {0}")]
    ArtifactLoad(String),

    #[error("unsupported artifact format: {0}")]
    UnsupportedFormat(String),
}

/// Outcome of a successful publish.
#[derive(Debug, Clone)]
pub struct PublishReceipt {
    pub model_name: String,
    pub tag: String,
    pub runtime: RuntimeKind,
    pub digest: Option<String>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
    /// True when the publish replaced an existing variant under the tag.
    pub replaced: bool,
}

/// Entry point for pushing new or replacement variants into the registry.
///
/// Concurrent publishes to the same tag never fail; the last `put` to
/// complete wins. Missing model names are lazily created.
pub struct PublishGateway {
    registry: Arc<ModelRegistry>,
}

impl PublishGateway {
    pub fn new(registry: Arc<ModelRegistry>) -> Self {
        Self { registry }
    }

    /// Materialize `artifact` and publish it under `(model_name, tag)`.
    ///
    /// Load failure returns before the registry is touched, so the prior
    /// variant for the tag stays active.
    pub async fn publish(
        &self,
        model_name: &str,
        tag: &str,
        artifact: Artifact,
    ) -> Result<PublishReceipt, PublishError> {
        let digest = artifact.digest();
        let model = match materialize(&artifact) {
            Ok(model) => model,
            Err(e) => {
                tracing::warn!(
                    model = model_name,
                    tag,
                    format = artifact.format.name(),
                    error = %e,
                    "artifact load failed; prior variant remains active"
                );
                return Err(e);
            }
        };

        let variant = ModelVariant::new(model).with_digest(digest);
        Ok(self.install(model_name, tag, variant).await)
    }

    /// Publish an already-materialized model handle (push-style connectors).
    pub async fn publish_model(
        &self,
        model_name: &str,
        tag: &str,
        model: Arc<dyn InferenceModel>,
    ) -> PublishReceipt {
        self.install(model_name, tag, ModelVariant::new(model)).await
    }

    async fn install(&self, model_name: &str, tag: &str, variant: ModelVariant) -> PublishReceipt {
        let receipt = PublishReceipt {
            model_name: model_name.to_string(),
            tag: tag.to_string(),
            runtime: variant.runtime(),
            digest: variant.digest().map(str::to_string),
            updated_at: variant.updated_at(),
            replaced: false,
        };

        let named = self.registry.get_or_create(model_name).await;
        let replaced = named.put(tag, Arc::new(variant)).await.is_some();

        record_publish(model_name, replaced);
        tracing::info!(
            model = model_name,
            tag,
            runtime = receipt.runtime.name(),
            replaced,
            "variant published"
        );

        PublishReceipt { replaced, ..receipt }
    }
}

fn materialize(artifact: &Artifact) -> Result<Arc<dyn InferenceModel>, PublishError> {
    match artifact.format {
        ArtifactFormat::LinearJson => LinearModel::from_json(&artifact.bytes)
            .map(|m| Arc::new(m) as Arc<dyn InferenceModel>)
            .map_err(|e| PublishError::ArtifactLoad(e.to_string())),
        ArtifactFormat::Onnx => {
            load_onnx_model(&artifact.bytes).map_err(|e| PublishError::ArtifactLoad(e.to_string()))
        }
    }
}
