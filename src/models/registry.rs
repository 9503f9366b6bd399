//! Process-wide registry of named models.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;

use crate::engine::RuntimeKind;

use super::named::NamedModel;

/// Serializable summary of one tagged variant, for introspection endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct TagDescription {
    pub tag: String,
    pub runtime: RuntimeKind,
    pub input_dim: usize,
    pub digest: Option<String>,
    pub updated_at: DateTime<Utc>,
}

/// Serializable summary of a named model and its tags.
#[derive(Debug, Clone, Serialize)]
pub struct ModelDescription {
    pub name: String,
    pub tags: Vec<TagDescription>,
}

/// The sole owner of all named models in the process.
///
/// One instance per serving process, constructed at startup and passed
/// explicitly to the dispatcher and the publish gateway. No globals.
pub struct ModelRegistry {
    models: RwLock<HashMap<String, Arc<NamedModel>>>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self {
            models: RwLock::new(HashMap::new()),
        }
    }

    /// Install a fresh, empty named model under `name` and return it.
    ///
    /// Overwrite-on-register: registering an existing name replaces the
    /// prior named model. Registration normally happens once per name at
    /// startup; the publish path uses [`Self::get_or_create`] instead.
    pub async fn register(&self, name: impl Into<String>) -> Arc<NamedModel> {
        let name = name.into();
        let named = Arc::new(NamedModel::new(name.clone()));
        let replaced = self
            .models
            .write()
            .await
            .insert(name.clone(), named.clone());
        if replaced.is_some() {
            tracing::warn!(model = %name, "register replaced an existing named model");
        }
        named
    }

    /// Look up `name`, creating an empty named model on first use.
    pub async fn get_or_create(&self, name: &str) -> Arc<NamedModel> {
        if let Some(named) = self.resolve(name).await {
            return named;
        }
        let mut models = self.models.write().await;
        // Re-check under the write lock: a concurrent caller may have won.
        models
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(NamedModel::new(name)))
            .clone()
    }

    /// Read-only lookup.
    pub async fn resolve(&self, name: &str) -> Option<Arc<NamedModel>> {
        self.models.read().await.get(name).cloned()
    }

    pub async fn contains(&self, name: &str) -> bool {
        self.models.read().await.contains_key(name)
    }

    /// Names of all registered models, point-in-time.
    pub async fn model_names(&self) -> Vec<String> {
        self.models.read().await.keys().cloned().collect()
    }

    pub async fn count(&self) -> usize {
        self.models.read().await.len()
    }

    /// Summarize a model's tags for listing endpoints.
    pub async fn describe(&self, name: &str) -> Option<ModelDescription> {
        let named = self.resolve(name).await?;
        let mut tags = Vec::new();
        for tag in named.tags().await {
            if let Some(variant) = named.get(&tag).await {
                tags.push(TagDescription {
                    tag,
                    runtime: variant.runtime(),
                    input_dim: variant.model().input_dim(),
                    digest: variant.digest().map(str::to_string),
                    updated_at: variant.updated_at(),
                });
            }
        }
        tags.sort_by(|a, b| a.tag.cmp(&b.tag));
        Some(ModelDescription {
            name: named.name().to_string(),
            tags,
        })
    }
}

impl Default for ModelRegistry {
    fn default() -> Self {
        Self::new()
    }
}
