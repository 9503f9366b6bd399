//! Model management: variants, tagged named models, the process-wide
//! registry, and the publish gateway that hot-swaps variants into it.

mod named;
mod publish;
mod registry;
mod variant;

pub use named::NamedModel;
pub use publish::{Artifact, ArtifactFormat, PublishError, PublishGateway, PublishReceipt};
pub use registry::{ModelDescription, ModelRegistry, TagDescription};
pub use variant::ModelVariant;
