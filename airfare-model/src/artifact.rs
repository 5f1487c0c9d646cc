use airfare_core::{FareError, FareResult};
use serde::de::DeserializeOwned;
use std::io::ErrorKind;
use std::path::Path;

/// Read and deserialize a JSON model artifact.
///
/// A missing file is reported as `ModelNotFound`; anything else that goes
/// wrong while reading or parsing is an inference failure for that artifact.
pub fn load_json_artifact<T: DeserializeOwned>(path: &Path) -> FareResult<T> {
    let bytes = std::fs::read(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => FareError::ModelNotFound {
            path: path.display().to_string(),
        },
        _ => FareError::inference(path.display().to_string(), format!("failed to read artifact: {}", e)),
    })?;

    serde_json::from_slice(&bytes).map_err(|e| {
        FareError::inference(path.display().to_string(), format!("invalid artifact: {}", e))
    })
}
