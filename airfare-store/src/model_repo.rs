use airfare_core::{CabinEncoder, FareError, FareModel, FareResult, ModelRepository};
use airfare_model::{CabinBinarizer, FeedForwardNetwork, TreePipeline};
use std::sync::Arc;

use crate::app_config::ArtifactConfig;
use crate::artifact_cache::ArtifactCache;

/// Model artifacts read from disk on first use and kept for the process
pub struct DiskModelRepository {
    artifacts: ArtifactConfig,
    pipelines: ArtifactCache<TreePipeline>,
    networks: ArtifactCache<FeedForwardNetwork>,
    encoders: ArtifactCache<CabinBinarizer>,
}

impl DiskModelRepository {
    pub fn new(artifacts: ArtifactConfig) -> Self {
        Self {
            artifacts,
            pipelines: ArtifactCache::new(),
            networks: ArtifactCache::new(),
            encoders: ArtifactCache::new(),
        }
    }

    /// Number of artifacts currently held in memory
    pub fn loaded_artifacts(&self) -> usize {
        self.pipelines.len() + self.networks.len() + self.encoders.len()
    }
}

impl ModelRepository for DiskModelRepository {
    fn direct_fare_model(&self) -> FareResult<Arc<dyn FareModel>> {
        let model: Arc<dyn FareModel> = self
            .pipelines
            .get_or_load(&self.artifacts.direct_fare_model, TreePipeline::load)?;
        Ok(model)
    }

    fn return_fare_model(&self) -> FareResult<Arc<dyn FareModel>> {
        let model: Arc<dyn FareModel> = self
            .pipelines
            .get_or_load(&self.artifacts.return_fare_model, TreePipeline::load)?;
        Ok(model)
    }

    fn multihop_model(&self) -> FareResult<Arc<dyn FareModel>> {
        let model: Arc<dyn FareModel> = self
            .networks
            .get_or_load(&self.artifacts.multihop_network, FeedForwardNetwork::load)?;
        Ok(model)
    }

    fn cabin_encoder(&self) -> FareResult<Arc<dyn CabinEncoder>> {
        let encoder: Arc<dyn CabinEncoder> = self
            .encoders
            .get_or_load(&self.artifacts.cabin_encoder, CabinBinarizer::load)?;
        Ok(encoder)
    }
}

/// Repository over caller-supplied models, for embedding and stub testing
#[derive(Default)]
pub struct InMemoryModelRepository {
    direct: Option<Arc<dyn FareModel>>,
    return_leg: Option<Arc<dyn FareModel>>,
    multihop: Option<Arc<dyn FareModel>>,
    encoder: Option<Arc<dyn CabinEncoder>>,
}

impl InMemoryModelRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_direct_model(mut self, model: Arc<dyn FareModel>) -> Self {
        self.direct = Some(model);
        self
    }

    pub fn with_return_model(mut self, model: Arc<dyn FareModel>) -> Self {
        self.return_leg = Some(model);
        self
    }

    pub fn with_multihop_model(mut self, model: Arc<dyn FareModel>) -> Self {
        self.multihop = Some(model);
        self
    }

    pub fn with_cabin_encoder(mut self, encoder: Arc<dyn CabinEncoder>) -> Self {
        self.encoder = Some(encoder);
        self
    }
}

fn not_registered<T: ?Sized>(slot: &Option<Arc<T>>, name: &str) -> FareResult<Arc<T>> {
    slot.clone().ok_or_else(|| FareError::ModelNotFound {
        path: format!("memory://{}", name),
    })
}

impl ModelRepository for InMemoryModelRepository {
    fn direct_fare_model(&self) -> FareResult<Arc<dyn FareModel>> {
        not_registered(&self.direct, "direct_fare_model")
    }

    fn return_fare_model(&self) -> FareResult<Arc<dyn FareModel>> {
        not_registered(&self.return_leg, "return_fare_model")
    }

    fn multihop_model(&self) -> FareResult<Arc<dyn FareModel>> {
        not_registered(&self.multihop, "multihop_network")
    }

    fn cabin_encoder(&self) -> FareResult<Arc<dyn CabinEncoder>> {
        not_registered(&self.encoder, "cabin_encoder")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use airfare_core::{ConstantFareModel, FeatureRow};
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_missing_artifact_on_disk() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path();
        let repo = DiskModelRepository::new(ArtifactConfig {
            direct_fare_model: dir.join("direct.json"),
            return_fare_model: dir.join("return.json"),
            multihop_network: dir.join("network.json"),
            cabin_encoder: dir.join("cabins.json"),
        });

        assert!(matches!(repo.direct_fare_model(), Err(FareError::ModelNotFound { .. })));
        assert!(matches!(repo.multihop_model(), Err(FareError::ModelNotFound { .. })));
        assert!(matches!(repo.cabin_encoder(), Err(FareError::ModelNotFound { .. })));
        assert_eq!(repo.loaded_artifacts(), 0);
    }

    #[test]
    fn test_encoder_cached_after_first_load() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("cabins.json");
        std::fs::write(&path, r#"{"classes": ["business", "coach"]}"#).unwrap();

        let repo = DiskModelRepository::new(ArtifactConfig {
            direct_fare_model: PathBuf::from("unused"),
            return_fare_model: PathBuf::from("unused"),
            multihop_network: PathBuf::from("unused"),
            cabin_encoder: path.clone(),
        });

        let first = repo.cabin_encoder().unwrap();
        // Served from memory even after the file is gone
        std::fs::remove_file(&path).unwrap();
        let second = repo.cabin_encoder().unwrap();

        assert_eq!(first.classes(), second.classes());
        assert_eq!(repo.loaded_artifacts(), 1);
    }

    #[test]
    fn test_in_memory_repository() {
        let repo = InMemoryModelRepository::new().with_direct_model(Arc::new(ConstantFareModel::new(99.5)));
        let model = repo.direct_fare_model().unwrap();
        assert_eq!(model.predict(&FeatureRow::new()).unwrap(), 99.5);
        assert!(matches!(repo.return_fare_model(), Err(FareError::ModelNotFound { .. })));
    }
}
