use airfare_core::{CabinEncoder, FareError, FareResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

use crate::artifact::load_json_artifact;

/// Multi-label indicator encoder for the cabin codes of an itinerary
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CabinBinarizer {
    classes: Vec<String>,
}

impl CabinBinarizer {
    /// Fit the vocabulary: every distinct label, sorted
    pub fn fit<'a>(labels: impl IntoIterator<Item = &'a str>) -> Self {
        let classes: BTreeSet<String> = labels.into_iter().map(normalize).collect();
        Self {
            classes: classes.into_iter().collect(),
        }
    }

    pub fn load(path: &Path) -> FareResult<Self> {
        let encoder: CabinBinarizer = load_json_artifact(path)?;
        encoder
            .check_classes()
            .map_err(|reason| FareError::inference(path.display().to_string(), reason))?;

        tracing::info!("Loaded cabin encoder with classes {:?}", encoder.classes);
        Ok(encoder)
    }

    /// Classes must be what `fit` produces: non-empty, normalized, strictly
    /// ascending
    fn check_classes(&self) -> Result<(), String> {
        if self.classes.is_empty() {
            return Err("cabin encoder has no classes".to_string());
        }
        if let Some(bad) = self.classes.iter().find(|c| normalize(c) != **c) {
            return Err(format!("cabin encoder class '{}' is not lowercase and trimmed", bad));
        }
        if self.classes.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err("cabin encoder classes must be sorted and unique".to_string());
        }
        Ok(())
    }
}

fn normalize(label: &str) -> String {
    label.trim().to_lowercase()
}

impl CabinEncoder for CabinBinarizer {
    fn classes(&self) -> &[String] {
        &self.classes
    }

    fn transform(&self, labels: &[&str]) -> FareResult<Vec<f64>> {
        let mut indicators = vec![0.0; self.classes.len()];
        for label in labels {
            let label = normalize(label);
            let idx = self
                .classes
                .iter()
                .position(|c| *c == label)
                .ok_or_else(|| FareError::MalformedInput(format!("cabin label '{}' unknown to encoder", label)))?;
            indicators[idx] = 1.0;
        }
        Ok(indicators)
    }

    fn inverse_transform(&self, indicators: &[f64]) -> FareResult<Vec<String>> {
        if indicators.len() != self.classes.len() {
            return Err(FareError::MalformedInput(format!(
                "expected {} cabin indicators, got {}",
                self.classes.len(),
                indicators.len()
            )));
        }

        let mut labels = Vec::new();
        for (class, value) in self.classes.iter().zip(indicators) {
            if *value == 1.0 {
                labels.push(class.clone());
            } else if *value != 0.0 {
                return Err(FareError::MalformedInput(format!("indicator {} is not binary", value)));
            }
        }
        Ok(labels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoder() -> CabinBinarizer {
        CabinBinarizer::fit(["coach", "premium coach", "business", "first", "coach"])
    }

    #[test]
    fn test_fit_sorts_and_dedups() {
        assert_eq!(encoder().classes(), &["business", "coach", "first", "premium coach"]);
    }

    #[test]
    fn test_round_trip_recovers_label_set() {
        let enc = encoder();
        let indicators = enc.transform(&["first", "Coach", "coach"]).unwrap();
        assert_eq!(indicators, vec![0.0, 1.0, 1.0, 0.0]);

        let labels = enc.inverse_transform(&indicators).unwrap();
        assert_eq!(labels, vec!["coach".to_string(), "first".to_string()]);
    }

    #[test]
    fn test_unknown_label_is_malformed() {
        let err = encoder().transform(&["coach", "lounge"]).unwrap_err();
        assert!(matches!(err, FareError::MalformedInput(_)));
    }

    #[test]
    fn test_named_indicator_row() {
        let row = encoder().transform_named(&["business"]).unwrap();
        let names: Vec<&str> = row.names().collect();
        assert_eq!(names, vec!["business", "coach", "first", "premium coach"]);
        assert_eq!(row.get("business").and_then(|v| v.as_f64()), Some(1.0));
    }

    fn load_classes(json: &str) -> FareResult<CabinBinarizer> {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), json).unwrap();
        CabinBinarizer::load(file.path())
    }

    #[test]
    fn test_load_rejects_unnormalized_classes() {
        let enc = load_classes(r#"{"classes": ["business", "coach", "first"]}"#).unwrap();
        assert_eq!(enc.transform(&["Coach"]).unwrap(), vec![0.0, 1.0, 0.0]);

        for bad in [
            r#"{"classes": []}"#,
            r#"{"classes": ["Coach", "First"]}"#,
            r#"{"classes": ["first", "coach"]}"#,
            r#"{"classes": ["coach", "coach"]}"#,
        ] {
            let err = load_classes(bad).unwrap_err();
            assert!(matches!(err, FareError::ModelInferenceFailure { .. }), "{}", bad);
        }
    }

    #[test]
    fn test_inverse_rejects_wrong_shape() {
        assert!(encoder().inverse_transform(&[1.0]).is_err());
        assert!(encoder().inverse_transform(&[0.5, 0.0, 0.0, 0.0]).is_err());
    }
}
