//! Tagged variant collection for one logical model name.
//!
//! The tag map is the only shared mutable state on the read path. The
//! discipline is many concurrent readers, single writer, swap-not-mutate:
//! `put` replaces the whole `Arc<ModelVariant>` under a short write lock,
//! and readers clone the `Arc` out so no lock is held during invocation.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use super::variant::ModelVariant;

/// All variants sharing one logical model name, keyed by tag.
///
/// `"production"` and `"staging"` are conventional tags, not a fixed set;
/// any string works. An absent tag is a not-found outcome, never an
/// implicit default.
pub struct NamedModel {
    name: String,
    variants: RwLock<HashMap<String, Arc<ModelVariant>>>,
}

impl NamedModel {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            variants: RwLock::new(HashMap::new()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Look up the variant for `tag`.
    pub async fn get(&self, tag: &str) -> Option<Arc<ModelVariant>> {
        self.variants.read().await.get(tag).cloned()
    }

    /// Atomically associate `tag` with `variant`, returning the replaced
    /// variant if the tag already existed.
    ///
    /// Readers racing this call observe either the old variant or the new
    /// one; a pre-existing tag is never transiently absent.
    pub async fn put(&self, tag: impl Into<String>, variant: Arc<ModelVariant>) -> Option<Arc<ModelVariant>> {
        self.variants.write().await.insert(tag.into(), variant)
    }

    /// Remove `tag`, returning its variant if present. Same atomicity as `put`.
    pub async fn remove(&self, tag: &str) -> Option<Arc<ModelVariant>> {
        self.variants.write().await.remove(tag)
    }

    /// Resolve a variant per the dispatch selection policy: a non-empty
    /// `variant_id` present in the map wins, otherwise the stage tag.
    ///
    /// One read lock covers both lookups, so the decision is taken against
    /// a single consistent snapshot of the tag map.
    pub async fn select(&self, stage: &str, variant_id: &str) -> Option<Arc<ModelVariant>> {
        let variants = self.variants.read().await;
        if !variant_id.is_empty() {
            if let Some(variant) = variants.get(variant_id) {
                return Some(variant.clone());
            }
        }
        variants.get(stage).cloned()
    }

    /// Point-in-time snapshot of the tag set.
    pub async fn tags(&self) -> Vec<String> {
        self.variants.read().await.keys().cloned().collect()
    }

    pub async fn contains(&self, tag: &str) -> bool {
        self.variants.read().await.contains_key(tag)
    }

    pub async fn variant_count(&self) -> usize {
        self.variants.read().await.len()
    }

    /// Most recent publication time across all variants.
    pub async fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.variants
            .read()
            .await
            .values()
            .map(|v| v.updated_at())
            .max()
    }
}

impl std::fmt::Debug for NamedModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NamedModel").field("name", &self.name).finish()
    }
}
