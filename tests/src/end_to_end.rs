use std::sync::Arc;

use alzdx::{parse_config, DiagnosisError, DiagnosisService};
use alzdx_model::{fit_from_csv, AssemblyError, FittedScaler};
use alzdx_report::ReportRenderer;
use alzdx_schema::{Field, Identity, Section};
use pretty_assertions::assert_eq;

use crate::fixtures::{scenario_record, training_csv, RecordingClassifier};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn persisted_scaler(dir: &std::path::Path) -> Arc<FittedScaler> {
    let fitted = fit_from_csv(&training_csv(12), &Field::DEFAULT_SCALED).unwrap();
    let path = dir.join("scaler.json");
    fitted.save(&path).unwrap();
    Arc::new(FittedScaler::load(&path).unwrap())
}

#[test]
fn scenario_positive_prediction_end_to_end() {
    init_logger();
    let dir = tempfile::tempdir().unwrap();
    let scaler = persisted_scaler(dir.path());
    let classifier = Arc::new(RecordingClassifier::new(0.82));
    let service = DiagnosisService::new(
        classifier.clone(),
        scaler.clone(),
        ReportRenderer::default(),
    )
    .unwrap();

    let record = scenario_record();
    let identity = Identity::new("Jane Roe", "jane@example.org");
    let diagnosis = service.diagnose(&record, identity).unwrap();

    assert_eq!(classifier.calls(), 1);
    assert_eq!(diagnosis.result.label, 1);
    assert_eq!(diagnosis.result.confidence(), "0.82");

    let row = classifier.last_row();
    assert_eq!(row.len(), Field::ALL.len());
    assert_eq!(row[Field::Age.index()], scaler.transform(Field::Age, 75.0));
    assert_ne!(row[Field::Age.index()], 75.0);
    assert_eq!(row[Field::Bmi.index()], scaler.transform(Field::Bmi, 27.5));
    assert_eq!(row[Field::Mmse.index()], 28.0);
    for field in Field::ALL.iter().filter(|f| f.is_flag()) {
        assert_eq!(row[field.index()], 0.0, "{field}");
    }

    let pages = service
        .renderer()
        .layout(&record, diagnosis.result.probability, &diagnosis.result.identity)
        .unwrap();
    let lines: Vec<&str> = pages.iter().flat_map(|p| p.texts()).collect();
    assert!(lines.contains(&"Prediction (0: No Alzheimer's, 1: Alzheimer's): 1"));
    assert_eq!(lines.last(), Some(&"Confidence Score: 0.82"));
    assert!(lines.contains(&"Age: 75"));

    assert!(diagnosis.pdf.starts_with(b"%PDF-"));
}

#[test]
fn schema_mismatch_fails_before_any_prediction() {
    let dir = tempfile::tempdir().unwrap();
    let mut schema = Field::ALL.to_vec();
    schema.swap(2, 3);
    let classifier = Arc::new(RecordingClassifier::with_schema(0.82, schema));
    let result = DiagnosisService::new(
        classifier.clone(),
        persisted_scaler(dir.path()),
        ReportRenderer::default(),
    );
    match result {
        Err(DiagnosisError::Assembly(AssemblyError::SchemaMismatch {
            position,
            expected,
            found,
        })) => {
            assert_eq!(position, 2);
            assert_eq!(expected, Field::Smoking);
            assert_eq!(found, Field::Bmi);
        }
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("mismatched schema was accepted"),
    }
    assert_eq!(classifier.calls(), 0);
}

#[test]
fn boundary_probability_is_negative() {
    let dir = tempfile::tempdir().unwrap();
    let service = DiagnosisService::new(
        Arc::new(RecordingClassifier::new(0.5)),
        persisted_scaler(dir.path()),
        ReportRenderer::default(),
    )
    .unwrap();
    let diagnosis = service
        .diagnose(&scenario_record(), Identity::new("A", "a@b.c"))
        .unwrap();
    assert_eq!(diagnosis.result.label, 0);
    assert_eq!(diagnosis.result.confidence(), "0.50");
    assert!(diagnosis.pdf.starts_with(b"%PDF-"));
}

#[test]
fn configured_renderer_prints_section_descriptions() {
    let dir = tempfile::tempdir().unwrap();
    let config = parse_config("[report]\ndescribe_sections = true\n").unwrap();
    let service = DiagnosisService::new(
        Arc::new(RecordingClassifier::new(0.2)),
        persisted_scaler(dir.path()),
        config.renderer().unwrap(),
    )
    .unwrap();
    let record = scenario_record();
    let result = service.predict(&record, Identity::default()).unwrap();
    let pages = service
        .renderer()
        .layout(&record, result.probability, &result.identity)
        .unwrap();
    let text: String = pages
        .iter()
        .flat_map(|p| p.texts())
        .collect::<Vec<_>>()
        .join(" ");
    let first_word = Section::Symptoms.description().split(' ').next().unwrap();
    assert!(text.contains(first_word));
    assert!(text.ends_with("Confidence Score: 0.20"));

    let plain = ReportRenderer::default()
        .layout(&record, result.probability, &result.identity)
        .unwrap();
    let count = |pages: &[alzdx_report::Page]| pages.iter().map(|p| p.lines.len()).sum::<usize>();
    assert!(count(&pages) >= count(&plain) + Section::ALL.len());
}

#[test]
fn single_row_training_cannot_produce_a_scaler() {
    assert!(fit_from_csv(&training_csv(1), &Field::DEFAULT_SCALED).is_err());
}

#[test]
fn demo_configuration_runs() {
    let demos = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../demos");
    let config = alzdx::load_config(&demos.join("alzdx.toml")).unwrap();
    let service = DiagnosisService::from_config(&config).unwrap();
    let text = std::fs::read_to_string(demos.join("patient.json")).unwrap();
    let record: alzdx_schema::PatientRecord = serde_json::from_str(&text).unwrap();
    let diagnosis = service
        .diagnose(&record, Identity::new("Jane Roe", "jane@example.org"))
        .unwrap();
    assert_eq!(diagnosis.result.label, 0);
    assert!(diagnosis.pdf.starts_with(b"%PDF-"));
}
