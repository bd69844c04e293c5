//! Classifier seam and the artifact-backed logistic implementation

use crate::error::ModelError;
use crate::metadata::ModelMetadata;
use alzdx_schema::{Field, FIELD_COUNT};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Pre-trained binary classifier consumed as an opaque scoring function.
///
/// Implementations must be immutable after loading so a single instance can
/// serve every request.
pub trait Classifier: Send + Sync {
    fn name(&self) -> &str;

    /// Column order the classifier was trained with.
    fn input_schema(&self) -> &[Field];

    /// Scores one assembled row, returning the positive-class probability.
    fn predict(&self, row: &[f64]) -> Result<f64, ModelError>;
}

/// Rejects outputs that are not a probability.
pub fn check_probability(p: f64) -> Result<f64, ModelError> {
    if p.is_finite() && (0.0..=1.0).contains(&p) {
        Ok(p)
    } else {
        Err(ModelError::OutputOutOfRange(p))
    }
}

/// Logistic model `sigmoid(w . x + b)` loaded from a JSON artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticClassifier {
    pub metadata: ModelMetadata,
    pub feature_order: Vec<Field>,
    pub weights: Vec<f64>,
    pub bias: f64,
}

impl LogisticClassifier {
    pub fn new(
        metadata: ModelMetadata,
        feature_order: Vec<Field>,
        weights: Vec<f64>,
        bias: f64,
    ) -> Result<Self, ModelError> {
        let model = Self {
            metadata,
            feature_order,
            weights,
            bias,
        };
        model.check()?;
        Ok(model)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ModelError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let model: LogisticClassifier = serde_json::from_str(&text)?;
        model.check()?;
        log::info!(
            "loaded classifier {} from {}",
            model.metadata,
            path.as_ref().display()
        );
        Ok(model)
    }

    fn check(&self) -> Result<(), ModelError> {
        if self.feature_order.len() != FIELD_COUNT {
            return Err(ModelError::InvalidArtifact(format!(
                "feature_order lists {} columns, expected {FIELD_COUNT}",
                self.feature_order.len()
            )));
        }
        let mut seen = HashSet::new();
        if let Some(dup) = self.feature_order.iter().find(|f| !seen.insert(**f)) {
            return Err(ModelError::InvalidArtifact(format!(
                "feature_order lists {dup} more than once"
            )));
        }
        if let Some((position, (found, expected))) = self
            .feature_order
            .iter()
            .zip(Field::ALL.iter())
            .enumerate()
            .find(|(_, (f, e))| f != e)
        {
            return Err(ModelError::InvalidArtifact(format!(
                "feature_order position {position} is {found}, expected {expected}"
            )));
        }
        if self.weights.len() != self.feature_order.len() {
            return Err(ModelError::InvalidArtifact(format!(
                "{} weights for {} features",
                self.weights.len(),
                self.feature_order.len()
            )));
        }
        if !self.bias.is_finite() || self.weights.iter().any(|w| !w.is_finite()) {
            return Err(ModelError::InvalidArtifact(
                "weights and bias must be finite".into(),
            ));
        }
        Ok(())
    }
}

impl Classifier for LogisticClassifier {
    fn name(&self) -> &str {
        &self.metadata.name
    }

    fn input_schema(&self) -> &[Field] {
        &self.feature_order
    }

    fn predict(&self, row: &[f64]) -> Result<f64, ModelError> {
        if row.len() != self.weights.len() {
            return Err(ModelError::InvalidInput(format!(
                "Expected {} features, got {}",
                self.weights.len(),
                row.len()
            )));
        }
        let z: f64 = self
            .weights
            .iter()
            .zip(row.iter())
            .map(|(w, x)| w * x)
            .sum::<f64>()
            + self.bias;
        check_probability(sigmoid(z))
    }
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::ModelVersion;

    fn meta() -> ModelMetadata {
        ModelMetadata::new("m", "test", ModelVersion::new(0, 1, 0))
    }

    #[test]
    fn zero_weights_give_even_odds() {
        let model =
            LogisticClassifier::new(meta(), Field::ALL.to_vec(), vec![0.0; FIELD_COUNT], 0.0)
                .unwrap();
        let p = model.predict(&[1.0; FIELD_COUNT]).unwrap();
        assert!((p - 0.5).abs() < 1e-12);
    }

    #[test]
    fn weights_shift_probability() {
        let mut weights = vec![0.0; FIELD_COUNT];
        weights[Field::MemoryComplaints.index()] = 2.0;
        let model = LogisticClassifier::new(meta(), Field::ALL.to_vec(), weights, -1.0).unwrap();
        let mut row = [0.0; FIELD_COUNT];
        assert!(model.predict(&row).unwrap() < 0.5);
        row[Field::MemoryComplaints.index()] = 1.0;
        assert!(model.predict(&row).unwrap() > 0.5);
    }

    #[test]
    fn wrong_row_length_is_rejected() {
        let model =
            LogisticClassifier::new(meta(), Field::ALL.to_vec(), vec![0.0; FIELD_COUNT], 0.0)
                .unwrap();
        assert!(matches!(
            model.predict(&[0.0; 3]),
            Err(ModelError::InvalidInput(_))
        ));
    }

    #[test]
    fn artifact_with_duplicate_feature_is_rejected() {
        let mut order = Field::ALL.to_vec();
        order[1] = Field::Age;
        let err = LogisticClassifier::new(meta(), order, vec![0.0; FIELD_COUNT], 0.0).unwrap_err();
        assert!(err.to_string().contains("Age more than once"), "{err}");
    }

    #[test]
    fn artifact_with_permuted_features_is_rejected() {
        let mut order = Field::ALL.to_vec();
        order.swap(0, 2);
        let err = LogisticClassifier::new(meta(), order.clone(), vec![0.0; FIELD_COUNT], 0.0)
            .unwrap_err();
        assert!(
            err.to_string().contains("position 0 is BMI, expected Age"),
            "{err}"
        );

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("permuted.json");
        let json = serde_json::json!({
            "metadata": meta(),
            "feature_order": order,
            "weights": vec![0.0; FIELD_COUNT],
            "bias": 0.0,
        });
        std::fs::write(&path, json.to_string()).unwrap();
        assert!(matches!(
            LogisticClassifier::load(&path),
            Err(ModelError::InvalidArtifact(_))
        ));
    }

    #[test]
    fn artifact_with_short_weights_is_rejected() {
        let err = LogisticClassifier::new(meta(), Field::ALL.to_vec(), vec![0.1; 24], 0.0)
            .unwrap_err();
        assert!(matches!(err, ModelError::InvalidArtifact(_)));
    }

    #[test]
    fn probability_guard() {
        assert!(check_probability(0.0).is_ok());
        assert!(check_probability(1.0).is_ok());
        assert!(check_probability(1.2).is_err());
        assert!(check_probability(f64::NAN).is_err());
    }

    #[test]
    fn load_from_json_file() {
        let tmp = tempfile::tempdir().expect("tmpdir");
        let path = tmp.path().join("model.json");
        let model =
            LogisticClassifier::new(meta(), Field::ALL.to_vec(), vec![0.1; FIELD_COUNT], -0.2)
                .unwrap();
        std::fs::write(&path, serde_json::to_string(&model).unwrap()).expect("write");
        let loaded = LogisticClassifier::load(&path).expect("load");
        assert_eq!(loaded.name(), "test");
        assert_eq!(loaded.input_schema(), &Field::ALL[..]);
        assert_eq!(loaded.weights, vec![0.1; FIELD_COUNT]);
    }
}
