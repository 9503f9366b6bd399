//! Public error taxonomy for the serving core.
//!
//! Every error carries a machine-checkable kind so the request/response
//! layer can branch without string matching.

use thiserror::Error;

/// Errors surfaced to callers of the inference dispatcher.
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("model not found: {0}")]
    ModelNotFound(String),

    #[error("variant not found for model {model}: stage `{stage}`, variant id `{variant_id}`")]
    VariantNotFound {
        model: String,
        stage: String,
        variant_id: String,
    },

    #[error("invalid input format: {0}")]
    InvalidInput(String),

    #[error("inference failed: {source}")]
    Failure {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("inference timed out after {0}ms")]
    Timeout(u64),
}

/// Coarse classification used by the serving layer to pick a status class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    NotFound,
    ClientError,
    ServerError,
    Timeout,
}

impl InferenceError {
    /// Wrap an unclassified runtime failure, retaining the original cause.
    pub fn failure<E>(source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Failure { source: Box::new(source) }
    }

    pub fn class(&self) -> ErrorClass {
        match self {
            Self::ModelNotFound(_) | Self::VariantNotFound { .. } => ErrorClass::NotFound,
            Self::InvalidInput(_) => ErrorClass::ClientError,
            Self::Failure { .. } => ErrorClass::ServerError,
            Self::Timeout(_) => ErrorClass::Timeout,
        }
    }

    /// Returns true if retrying with the same request cannot succeed.
    pub fn is_deterministic(&self) -> bool {
        matches!(
            self,
            Self::ModelNotFound(_) | Self::VariantNotFound { .. } | Self::InvalidInput(_)
        )
    }
}
