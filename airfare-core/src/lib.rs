pub mod iata;
pub mod trip;
pub mod features;
pub mod encoding;
pub mod itinerary;
pub mod repository;

pub use iata::AirportCode;
pub use trip::{CabinClass, TripLeg};
pub use features::{FeatureRow, FeatureTable, FeatureValue};
pub use encoding::{cyclical, Trig};
pub use itinerary::Itinerary;
pub use repository::{CabinEncoder, ConstantFareModel, FareModel, ModelRepository};

#[derive(Debug, thiserror::Error)]
pub enum FareError {
    #[error("Model artifact not found: {path}")]
    ModelNotFound { path: String },
    #[error("Model inference failed ({model}): {reason}")]
    ModelInferenceFailure { model: String, reason: String },
    #[error("Malformed input: {0}")]
    MalformedInput(String),
    #[error("No route data for {origin} -> {destination}")]
    RouteNotFound { origin: String, destination: String },
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Reference data unavailable: {0}")]
    ReferenceData(String),
    #[error("Configuration error: {0}")]
    Config(String),
}

impl FareError {
    pub fn inference(model: impl Into<String>, reason: impl ToString) -> Self {
        FareError::ModelInferenceFailure {
            model: model.into(),
            reason: reason.to_string(),
        }
    }
}

pub type FareResult<T> = Result<T, FareError>;
