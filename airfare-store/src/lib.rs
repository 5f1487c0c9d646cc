pub mod app_config;
pub mod reference_repo;
pub mod artifact_cache;
pub mod model_repo;

pub use app_config::Config;
pub use reference_repo::{ReferenceData, RouteMetrics};
pub use artifact_cache::ArtifactCache;
pub use model_repo::{DiskModelRepository, InMemoryModelRepository};
