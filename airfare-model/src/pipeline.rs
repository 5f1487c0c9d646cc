use airfare_core::encoding::cyclical_pair;
use airfare_core::{FareError, FareModel, FareResult, FeatureRow, FeatureValue};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::artifact::load_json_artifact;
use crate::ensemble::TreeEnsemble;

/// How one named input column becomes model features
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ColumnTransform {
    /// One indicator per category; unseen categories encode as all zeros
    OneHot { categories: Vec<String> },
    /// Sine and cosine of the value over `period`
    Cyclical { period: f64 },
    /// Passed through as a number
    Numeric,
}

impl ColumnTransform {
    pub fn width(&self) -> usize {
        match self {
            ColumnTransform::OneHot { categories } => categories.len(),
            ColumnTransform::Cyclical { .. } => 2,
            ColumnTransform::Numeric => 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PipelineColumn {
    pub name: String,
    pub transform: ColumnTransform,
}

/// Column preprocessing followed by a gradient-boosted tree ensemble.
///
/// Input columns the pipeline does not name are ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TreePipeline {
    pub name: String,
    pub columns: Vec<PipelineColumn>,
    pub ensemble: TreeEnsemble,
}

impl TreePipeline {
    pub fn load(path: &Path) -> FareResult<Self> {
        let pipeline: TreePipeline = load_json_artifact(path)?;
        pipeline
            .ensemble
            .validate(pipeline.width())
            .map_err(|e| FareError::inference(&pipeline.name, e))?;

        tracing::info!(
            "Loaded tree pipeline {} ({} trees, {} features)",
            pipeline.name,
            pipeline.ensemble.trees.len(),
            pipeline.width()
        );
        Ok(pipeline)
    }

    /// Number of features after preprocessing
    pub fn width(&self) -> usize {
        self.columns.iter().map(|c| c.transform.width()).sum()
    }

    pub fn transform(&self, row: &FeatureRow) -> FareResult<Vec<f64>> {
        let mut features = Vec::with_capacity(self.width());

        for column in &self.columns {
            let value = row.get(&column.name).ok_or_else(|| {
                FareError::inference(&self.name, format!("missing feature column '{}'", column.name))
            })?;

            match &column.transform {
                ColumnTransform::OneHot { categories } => {
                    let category = value.to_string();
                    features.extend(categories.iter().map(|c| if *c == category { 1.0 } else { 0.0 }));
                }
                ColumnTransform::Cyclical { period } => {
                    let (sin, cos) = cyclical_pair(self.numeric(&column.name, value)?, *period);
                    features.push(sin);
                    features.push(cos);
                }
                ColumnTransform::Numeric => features.push(self.numeric(&column.name, value)?),
            }
        }

        Ok(features)
    }

    fn numeric(&self, column: &str, value: &FeatureValue) -> FareResult<f64> {
        value.as_f64().ok_or_else(|| {
            FareError::inference(&self.name, format!("column '{}' is not numeric: '{}'", column, value))
        })
    }
}

impl FareModel for TreePipeline {
    fn predict(&self, row: &FeatureRow) -> FareResult<f64> {
        let features = self.transform(row)?;
        self.ensemble
            .predict(&features)
            .map_err(|e| FareError::inference(&self.name, e))
    }

    fn name(&self) -> &str {
        &self.name
    }
}
