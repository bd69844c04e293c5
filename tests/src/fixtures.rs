use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use alzdx_model::{Classifier, ModelError};
use alzdx_schema::{Field, PatientRecord};

/// Age 75, BMI 27.5, MMSE 28, every flag 0, mid-range elsewhere.
pub fn scenario_record() -> PatientRecord {
    PatientRecord::from_fn(|f| match f {
        Field::Age => 75.0,
        Field::Bmi => 27.5,
        Field::AlcoholConsumption => 4.0,
        Field::CholesterolTotal => 220.0,
        Field::CholesterolLdl => 140.0,
        Field::CholesterolHdl => 45.0,
        Field::CholesterolTriglycerides => 180.0,
        Field::Mmse => 28.0,
        Field::FunctionalAssessment => 7.0,
        Field::Adl => 8.0,
        _ => 0.0,
    })
}

/// Training export with the six scaled columns plus ignored extras.
pub fn training_csv(rows: usize) -> String {
    let mut csv = String::from(
        "PatientID,Age,Gender,BMI,CholesterolTotal,CholesterolLDL,CholesterolHDL,CholesterolTriglycerides,Diagnosis\n",
    );
    for i in 0..rows {
        let x = i as f64;
        csv.push_str(&format!(
            "{},{},{},{},{},{},{},{},{}\n",
            4751 + i,
            65.0 + 2.0 * x,
            i % 2,
            22.0 + 0.5 * x,
            190.0 + 5.0 * x,
            110.0 + 3.0 * x,
            45.0 + x,
            140.0 + 8.0 * x,
            i % 2
        ));
    }
    csv
}

/// Classifier returning a fixed probability and recording what it saw.
pub struct RecordingClassifier {
    schema: Vec<Field>,
    output: f64,
    calls: AtomicUsize,
    last_row: Mutex<Vec<f64>>,
}

impl RecordingClassifier {
    pub fn new(output: f64) -> Self {
        Self::with_schema(output, Field::ALL.to_vec())
    }

    pub fn with_schema(output: f64, schema: Vec<Field>) -> Self {
        Self {
            schema,
            output,
            calls: AtomicUsize::new(0),
            last_row: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_row(&self) -> Vec<f64> {
        self.last_row
            .lock()
            .map(|row| row.clone())
            .unwrap_or_default()
    }
}

impl Classifier for RecordingClassifier {
    fn name(&self) -> &str {
        "recording"
    }

    fn input_schema(&self) -> &[Field] {
        &self.schema
    }

    fn predict(&self, row: &[f64]) -> Result<f64, ModelError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_row.lock() {
            *last = row.to_vec();
        }
        Ok(self.output)
    }
}
