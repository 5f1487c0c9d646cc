use std::sync::Arc;

use crate::features::FeatureRow;
use crate::FareResult;

/// Pre-trained regressor with a `predict(row) -> fare` contract
pub trait FareModel: Send + Sync {
    /// Predict a fare for one feature row
    fn predict(&self, row: &FeatureRow) -> FareResult<f64>;

    /// Artifact name, used in logs and error messages
    fn name(&self) -> &str;

    /// Ordered input columns the model was trained on, when the artifact
    /// declares them
    fn input_schema(&self) -> Option<&[String]> {
        None
    }
}

/// Fitted multi-label encoder over cabin labels
pub trait CabinEncoder: Send + Sync {
    /// Known labels, in indicator column order
    fn classes(&self) -> &[String];

    /// One indicator per known class; unknown labels are an error
    fn transform(&self, labels: &[&str]) -> FareResult<Vec<f64>>;

    /// Labels whose indicator is set, in class order
    fn inverse_transform(&self, indicators: &[f64]) -> FareResult<Vec<String>>;

    /// Indicator row keyed by class label
    fn transform_named(&self, labels: &[&str]) -> FareResult<FeatureRow> {
        let indicators = self.transform(labels)?;
        let mut row = FeatureRow::new();
        for (class, value) in self.classes().iter().zip(indicators) {
            row.set(class, value);
        }
        Ok(row)
    }
}

/// Access to the model artifacts each estimator needs
pub trait ModelRepository: Send + Sync {
    fn direct_fare_model(&self) -> FareResult<Arc<dyn FareModel>>;

    fn return_fare_model(&self) -> FareResult<Arc<dyn FareModel>>;

    fn multihop_model(&self) -> FareResult<Arc<dyn FareModel>>;

    fn cabin_encoder(&self) -> FareResult<Arc<dyn CabinEncoder>>;
}

/// Model that ignores its input and always returns the same fare
pub struct ConstantFareModel {
    fare: f64,
    name: String,
}

impl ConstantFareModel {
    pub fn new(fare: f64) -> Self {
        Self {
            fare,
            name: format!("constant({})", fare),
        }
    }
}

impl FareModel for ConstantFareModel {
    fn predict(&self, row: &FeatureRow) -> FareResult<f64> {
        tracing::debug!("{} predicting over {} features", self.name, row.len());
        Ok(self.fare)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
