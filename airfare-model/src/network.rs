use airfare_core::{FareError, FareModel, FareResult, FeatureRow};
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::artifact::load_json_artifact;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Activation {
    Relu,
    Linear,
    Sigmoid,
    Tanh,
}

impl Activation {
    fn apply(&self, x: f64) -> f64 {
        match self {
            Activation::Relu => x.max(0.0),
            Activation::Linear => x,
            Activation::Sigmoid => 1.0 / (1.0 + (-x).exp()),
            Activation::Tanh => x.tanh(),
        }
    }
}

/// On-disk shape of one dense layer; `weights` is `inputs × units`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayerSpec {
    pub weights: Vec<Vec<f64>>,
    pub bias: Vec<f64>,
    pub activation: Activation,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkSpec {
    pub name: String,
    #[serde(default)]
    pub input_schema: Option<Vec<String>>,
    pub layers: Vec<LayerSpec>,
}

#[derive(Debug, Clone)]
struct DenseLayer {
    weights: Array2<f64>,
    bias: Array1<f64>,
    activation: Activation,
}

/// Dense feed-forward regressor with a single output unit
#[derive(Debug, Clone)]
pub struct FeedForwardNetwork {
    name: String,
    input_schema: Option<Vec<String>>,
    layers: Vec<DenseLayer>,
}

impl TryFrom<NetworkSpec> for FeedForwardNetwork {
    type Error = String;

    fn try_from(spec: NetworkSpec) -> Result<Self, Self::Error> {
        if spec.layers.is_empty() {
            return Err("network has no layers".to_string());
        }

        let mut layers = Vec::with_capacity(spec.layers.len());
        let mut expected_inputs: Option<usize> = None;

        for (idx, layer) in spec.layers.into_iter().enumerate() {
            let inputs = layer.weights.len();
            let units = layer.bias.len();

            if let Some(expected) = expected_inputs {
                if inputs != expected {
                    return Err(format!("layer {} expects {} inputs but receives {}", idx, inputs, expected));
                }
            }
            if inputs == 0 || units == 0 {
                return Err(format!("layer {} is empty", idx));
            }
            if layer.weights.iter().any(|w| w.len() != units) {
                return Err(format!("layer {} weights do not match its {} units", idx, units));
            }

            let flat: Vec<f64> = layer.weights.into_iter().flatten().collect();
            let weights = Array2::from_shape_vec((inputs, units), flat).map_err(|e| e.to_string())?;

            layers.push(DenseLayer {
                weights,
                bias: Array1::from(layer.bias),
                activation: layer.activation,
            });
            expected_inputs = Some(units);
        }

        if expected_inputs != Some(1) {
            return Err("final layer must have exactly one unit".to_string());
        }

        let network = FeedForwardNetwork {
            name: spec.name,
            input_schema: spec.input_schema,
            layers,
        };

        if let Some(schema) = &network.input_schema {
            if schema.len() != network.input_dim() {
                return Err(format!(
                    "input schema names {} columns but the network takes {}",
                    schema.len(),
                    network.input_dim()
                ));
            }
        }

        Ok(network)
    }
}

impl FeedForwardNetwork {
    pub fn load(path: &Path) -> FareResult<Self> {
        let spec: NetworkSpec = load_json_artifact(path)?;
        let name = spec.name.clone();
        let network = FeedForwardNetwork::try_from(spec).map_err(|e| FareError::inference(name, e))?;

        tracing::info!(
            "Loaded network {} ({} layers, {} inputs)",
            network.name,
            network.layers.len(),
            network.input_dim()
        );
        Ok(network)
    }

    pub fn input_dim(&self) -> usize {
        self.layers.first().map(|l| l.weights.nrows()).unwrap_or(0)
    }

    pub fn forward(&self, input: &[f64]) -> FareResult<f64> {
        if input.len() != self.input_dim() {
            return Err(FareError::inference(
                &self.name,
                format!("expected {} inputs, got {}", self.input_dim(), input.len()),
            ));
        }

        let mut activations = Array1::from(input.to_vec());
        for layer in &self.layers {
            let z = activations.dot(&layer.weights) + &layer.bias;
            activations = z.mapv(|v| layer.activation.apply(v));
        }

        let output = activations[0];
        if !output.is_finite() {
            return Err(FareError::inference(&self.name, "network produced a non-finite fare"));
        }
        Ok(output)
    }
}

impl FareModel for FeedForwardNetwork {
    /// Consumes the row positionally; callers align it to
    /// [`FareModel::input_schema`] first.
    fn predict(&self, row: &FeatureRow) -> FareResult<f64> {
        let input = row
            .iter()
            .map(|(name, value)| {
                value.as_f64().ok_or_else(|| {
                    FareError::inference(&self.name, format!("column '{}' is not numeric", name))
                })
            })
            .collect::<FareResult<Vec<f64>>>()?;

        self.forward(&input)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn input_schema(&self) -> Option<&[String]> {
        self.input_schema.as_deref()
    }
}
