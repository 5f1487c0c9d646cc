use airfare_core::FareError;
use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub artifacts: ArtifactConfig,
    pub reference: ReferenceConfig,
    #[serde(default)]
    pub estimator: EstimatorSettings,
}

/// Model artifact locations, versioned by filename
#[derive(Debug, Deserialize, Clone)]
pub struct ArtifactConfig {
    pub direct_fare_model: PathBuf,
    pub return_fare_model: PathBuf,
    pub multihop_network: PathBuf,
    pub cabin_encoder: PathBuf,
}

/// Static lookup tables produced offline
#[derive(Debug, Deserialize, Clone)]
pub struct ReferenceConfig {
    pub distance_table: PathBuf,
    pub duration_table: PathBuf,
    pub airport_names: PathBuf,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct EstimatorSettings {
    /// Year fed to the return-leg model. Fixed rather than taken from the
    /// departure date; the model was only ever trained on this year.
    #[serde(default = "default_return_model_year")]
    pub return_model_year: i32,
    /// Accept multi-hop quotes whose departure precedes the search date
    #[serde(default)]
    pub allow_negative_lead_time: bool,
}

fn default_return_model_year() -> i32 { 2024 }

impl Default for EstimatorSettings {
    fn default() -> Self {
        Self {
            return_model_year: default_return_model_year(),
            allow_negative_lead_time: false,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, FareError> {
        Self::load_from(Path::new("config"))
    }

    /// Layered load rooted at `dir`: `default`, then the `RUN_MODE` file,
    /// then `local`, then `AIRFARE__*` environment variables.
    pub fn load_from(dir: &Path) -> Result<Self, FareError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::from(dir.join("default")))
            // Optional per-environment overrides
            .add_source(config::File::from(dir.join(&run_mode)).required(false))
            // Not checked in
            .add_source(config::File::from(dir.join("local")).required(false))
            // Eg.. `AIRFARE__ESTIMATOR__RETURN_MODEL_YEAR=2025`
            .add_source(config::Environment::with_prefix("AIRFARE").separator("__"))
            .build()
            .map_err(|e| FareError::Config(e.to_string()))?;

        s.try_deserialize().map_err(|e| FareError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_layered_load_with_defaults() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path();
        std::fs::write(
            dir.join("default.toml"),
            r#"
[artifacts]
direct_fare_model = "models/direct_fare_pipeline.json"
return_fare_model = "models/return_fare_pipeline.json"
multihop_network = "models/multihop_network.json"
cabin_encoder = "models/cabin_encoder.json"

[reference]
distance_table = "models/distance_data.json"
duration_table = "models/travel_duration_data.json"
airport_names = "models/names_data.json"
"#,
        )
        .unwrap();
        std::fs::write(dir.join("local.toml"), "[estimator]\nallow_negative_lead_time = true\n").unwrap();

        let config = Config::load_from(dir).unwrap();
        assert_eq!(config.artifacts.cabin_encoder, PathBuf::from("models/cabin_encoder.json"));
        assert_eq!(config.estimator.return_model_year, 2024);
        assert!(config.estimator.allow_negative_lead_time);
    }

    #[test]
    fn test_missing_default_file_is_config_error() {
        let empty = TempDir::new().unwrap();
        assert!(matches!(Config::load_from(empty.path()), Err(FareError::Config(_))));
    }
}
