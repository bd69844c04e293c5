//! The diagnosis service: validate, assemble, score, render.

use std::sync::Arc;

use alzdx_model::{
    check_column_order, check_probability, AssemblyError, Classifier, FeatureAssembler,
    FittedScaler, LogisticClassifier, ModelError, PredictionResult, ScalerError,
};
use alzdx_report::{RenderError, ReportRenderer};
use alzdx_schema::{Identity, PatientRecord, ValidationError};
use thiserror::Error;

use crate::config::{AppConfig, ConfigError};

#[derive(Debug, Error)]
pub enum DiagnosisError {
    #[error("invalid patient record: {0}")]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Assembly(#[from] AssemblyError),
    #[error("failed to load scaler: {0}")]
    Scaler(#[from] ScalerError),
    #[error("prediction failed: {0}")]
    Model(#[from] ModelError),
    #[error("report rendering failed: {0}")]
    Render(#[from] RenderError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Prediction outcome together with the rendered report.
#[derive(Debug, Clone)]
pub struct Diagnosis {
    pub result: PredictionResult,
    pub pdf: Vec<u8>,
}

/// Holds the loaded classifier, scaler and renderer for the life of the
/// process. Nothing here is mutated after construction.
pub struct DiagnosisService {
    classifier: Arc<dyn Classifier>,
    assembler: FeatureAssembler,
    renderer: ReportRenderer,
}

impl DiagnosisService {
    /// Fails when the classifier was trained on a different column order
    /// than the one records are assembled in.
    pub fn new(
        classifier: Arc<dyn Classifier>,
        scaler: Arc<FittedScaler>,
        renderer: ReportRenderer,
    ) -> Result<Self, DiagnosisError> {
        let assembler = FeatureAssembler::new(scaler, classifier.input_schema())?;
        log::debug!(
            "diagnosis service ready with classifier '{}'",
            classifier.name()
        );
        Ok(Self {
            classifier,
            assembler,
            renderer,
        })
    }

    /// Loads the artifacts named by `config`.
    pub fn from_config(config: &AppConfig) -> Result<Self, DiagnosisError> {
        let classifier = LogisticClassifier::load(&config.model.path)?;
        let scaler = FittedScaler::load(&config.scaler.path)?;
        let renderer = config.renderer()?;
        Self::new(Arc::new(classifier), Arc::new(scaler), renderer)
    }

    pub fn classifier(&self) -> &dyn Classifier {
        self.classifier.as_ref()
    }

    pub fn renderer(&self) -> &ReportRenderer {
        &self.renderer
    }

    /// Scores one record. The classifier is called exactly once.
    pub fn predict(
        &self,
        record: &PatientRecord,
        identity: Identity,
    ) -> Result<PredictionResult, DiagnosisError> {
        record.validate()?;
        let row = self.assembler.assemble(record);
        check_column_order(row.columns(), self.classifier.input_schema())?;
        log::debug!("assembled row: {} columns", row.len());

        let probability = check_probability(self.classifier.predict(row.values())?)?;
        let result = PredictionResult::new(probability, identity);
        log::info!(
            "prediction: probability={:.4}, label={}",
            result.probability,
            result.label
        );
        Ok(result)
    }

    /// Renders the report for a completed prediction.
    pub fn report(
        &self,
        record: &PatientRecord,
        result: &PredictionResult,
    ) -> Result<Vec<u8>, DiagnosisError> {
        let pdf = self
            .renderer
            .render(record, result.probability, &result.identity)?;
        Ok(pdf)
    }

    pub fn diagnose(
        &self,
        record: &PatientRecord,
        identity: Identity,
    ) -> Result<Diagnosis, DiagnosisError> {
        let result = self.predict(record, identity)?;
        let pdf = self.report(record, &result)?;
        Ok(Diagnosis { result, pdf })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alzdx_model::{ModelMetadata, ModelVersion, ScaledColumn};
    use alzdx_schema::Field;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Fixed {
        schema: Vec<Field>,
        output: f64,
        calls: AtomicUsize,
    }

    impl Fixed {
        fn new(output: f64) -> Self {
            Self {
                schema: Field::ALL.to_vec(),
                output,
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl Classifier for Fixed {
        fn name(&self) -> &str {
            "fixed"
        }

        fn input_schema(&self) -> &[Field] {
            &self.schema
        }

        fn predict(&self, _row: &[f64]) -> Result<f64, ModelError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.output)
        }
    }

    fn scaler() -> Arc<FittedScaler> {
        Arc::new(
            FittedScaler::new(vec![ScaledColumn {
                field: Field::Age,
                mean: 70.0,
                std: 10.0,
            }])
            .unwrap(),
        )
    }

    fn record() -> PatientRecord {
        PatientRecord::from_fn(|f| match f.kind() {
            alzdx_schema::FieldKind::Continuous { min, .. } => min,
            alzdx_schema::FieldKind::Flag => 0.0,
        })
    }

    #[test]
    fn predict_calls_classifier_once() {
        let classifier = Arc::new(Fixed::new(0.3));
        let service =
            DiagnosisService::new(classifier.clone(), scaler(), ReportRenderer::default()).unwrap();
        let result = service.predict(&record(), Identity::new("Ada", "a@b.c")).unwrap();
        assert_eq!(result.label, 0);
        assert_eq!(result.confidence(), "0.30");
        assert_eq!(classifier.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn invalid_record_never_reaches_classifier() {
        let classifier = Arc::new(Fixed::new(0.9));
        let service =
            DiagnosisService::new(classifier.clone(), scaler(), ReportRenderer::default()).unwrap();
        let bad = record().with(Field::Smoking, 2.0);
        let err = service.predict(&bad, Identity::default()).unwrap_err();
        assert!(matches!(err, DiagnosisError::Validation(_)));
        assert_eq!(classifier.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn out_of_range_output_is_rejected() {
        let service =
            DiagnosisService::new(Arc::new(Fixed::new(1.7)), scaler(), ReportRenderer::default())
                .unwrap();
        let err = service.predict(&record(), Identity::default()).unwrap_err();
        assert!(matches!(
            err,
            DiagnosisError::Model(ModelError::OutputOutOfRange(_))
        ));
    }

    #[test]
    fn mismatched_schema_fails_at_construction() {
        let mut classifier = Fixed::new(0.5);
        classifier.schema.swap(0, 1);
        let err = DiagnosisService::new(Arc::new(classifier), scaler(), ReportRenderer::default())
            .err()
            .unwrap();
        assert!(matches!(
            err,
            DiagnosisError::Assembly(AssemblyError::SchemaMismatch { position: 0, .. })
        ));
    }

    #[test]
    fn diagnose_returns_pdf() {
        let service =
            DiagnosisService::new(Arc::new(Fixed::new(0.82)), scaler(), ReportRenderer::default())
                .unwrap();
        let diagnosis = service.diagnose(&record(), Identity::new("Ada", "a@b.c")).unwrap();
        assert!(diagnosis.result.is_positive());
        assert!(diagnosis.pdf.starts_with(b"%PDF-"));
    }

    #[test]
    fn from_config_loads_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let model = LogisticClassifier::new(
            ModelMetadata::new("lr-1", "logistic", ModelVersion::new(1, 0, 0)),
            Field::ALL.to_vec(),
            vec![0.0; Field::ALL.len()],
            0.0,
        )
        .unwrap();
        let model_path = dir.path().join("classifier.json");
        std::fs::write(&model_path, serde_json::to_string(&model).unwrap()).unwrap();
        let scaler_path = dir.path().join("scaler.json");
        scaler().save(&scaler_path).unwrap();

        let mut config = AppConfig::default();
        config.model.path = model_path;
        config.scaler.path = scaler_path;
        let service = DiagnosisService::from_config(&config).unwrap();
        let result = service.predict(&record(), Identity::default()).unwrap();
        assert_eq!(result.probability, 0.5);
        assert_eq!(result.label, 0);
    }

    #[test]
    fn missing_artifact_is_reported() {
        let mut config = AppConfig::default();
        config.model.path = "/nonexistent/classifier.json".into();
        assert!(matches!(
            DiagnosisService::from_config(&config),
            Err(DiagnosisError::Model(ModelError::Io(_)))
        ));
    }
}
