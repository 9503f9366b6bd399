//! A single published model variant.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::engine::{InferenceModel, RuntimeKind};

/// One runnable model artifact plus publication metadata.
///
/// Immutable once published into a [`super::NamedModel`]: replacement is a
/// whole-value swap, so concurrent readers never observe a partial update.
/// The artifact is released when the last in-flight invocation drops its
/// `Arc` after the variant has been superseded.
pub struct ModelVariant {
    model: Arc<dyn InferenceModel>,
    digest: Option<String>,
    updated_at: DateTime<Utc>,
}

impl ModelVariant {
    /// Wrap a materialized model, stamping the current time.
    pub fn new(model: Arc<dyn InferenceModel>) -> Self {
        Self {
            model,
            digest: None,
            updated_at: Utc::now(),
        }
    }

    /// Attach the hex SHA-256 of the source artifact bytes.
    pub fn with_digest(mut self, digest: String) -> Self {
        self.digest = Some(digest);
        self
    }

    pub fn model(&self) -> Arc<dyn InferenceModel> {
        self.model.clone()
    }

    pub fn runtime(&self) -> RuntimeKind {
        self.model.runtime()
    }

    /// Digest of the artifact this variant was loaded from, when published
    /// from raw bytes.
    pub fn digest(&self) -> Option<&str> {
        self.digest.as_deref()
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

impl std::fmt::Debug for ModelVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelVariant")
            .field("runtime", &self.model.runtime())
            .field("digest", &self.digest)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}
