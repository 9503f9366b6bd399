//! Connector boundary.
//!
//! The core never initiates network calls. An external registry-sync
//! component implements [`ArtifactSource`] and either hands artifacts to
//! [`sync_latest`] or pushes materialized handles straight to the gateway.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Artifact, PublishError, PublishGateway, PublishReceipt};

#[derive(Debug, Error)]
pub enum ConnectorError {
    #[error("registry service unavailable: {0}")]
    Unavailable(String),

    #[error("malformed registry response: {0}")]
    Malformed(String),
}

/// Capability the external model-registry connector provides.
#[async_trait]
pub trait ArtifactSource: Send + Sync {
    /// Fetch the newest artifact for `(model_name, stage)`, if any exists.
    async fn fetch_latest(
        &self,
        model_name: &str,
        stage: &str,
    ) -> Result<Option<Artifact>, ConnectorError>;
}

#[derive(Debug, Error)]
pub enum SyncError {
    #[error(transparent)]
    Connector(#[from] ConnectorError),

    #[error(transparent)]
    Publish(#[from] PublishError),
}

/// Pull the latest artifact for `(model_name, stage)` and publish it under
/// the stage tag. Returns `None` when the source has nothing for the pair.
pub async fn sync_latest(
    source: &dyn ArtifactSource,
    gateway: &PublishGateway,
    model_name: &str,
    stage: &str,
) -> Result<Option<PublishReceipt>, SyncError> {
    match source.fetch_latest(model_name, stage).await? {
        Some(artifact) => {
            let receipt = gateway.publish(model_name, stage, artifact).await?;
            Ok(Some(receipt))
        }
        None => {
            tracing::debug!(model = model_name, stage, "no artifact available upstream");
            Ok(None)
        }
    }
}
