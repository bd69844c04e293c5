//! Feature assembly: patient record to classifier input row.

use crate::error::AssemblyError;
use crate::scaler::FittedScaler;
use alzdx_schema::{Field, PatientRecord};
use std::sync::Arc;

/// Classifier input derived from one patient record.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaledRecord {
    columns: Vec<Field>,
    values: Vec<f64>,
}

impl ScaledRecord {
    pub fn columns(&self) -> &[Field] {
        &self.columns
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn get(&self, field: Field) -> Option<f64> {
        self.columns
            .iter()
            .position(|&c| c == field)
            .map(|i| self.values[i])
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Compares an assembled column order with the classifier's expectation.
pub fn check_column_order(found: &[Field], expected: &[Field]) -> Result<(), AssemblyError> {
    if let Some((position, (&e, &f))) = expected
        .iter()
        .zip(found.iter())
        .enumerate()
        .find(|(_, (e, f))| e != f)
    {
        return Err(AssemblyError::SchemaMismatch {
            position,
            expected: e,
            found: f,
        });
    }
    if found.len() != expected.len() {
        return Err(AssemblyError::LengthMismatch {
            expected: expected.len(),
            found: found.len(),
        });
    }
    Ok(())
}

/// Builds classifier rows using a scaler fitted on the training
/// distribution. The canonical column order is `Field::ALL`.
#[derive(Debug, Clone)]
pub struct FeatureAssembler {
    scaler: Arc<FittedScaler>,
    columns: Vec<Field>,
}

impl FeatureAssembler {
    /// Creates an assembler for a classifier trained on `expected_schema`.
    ///
    /// Fails when the classifier's column order differs from the canonical
    /// record order, so a mismatched artifact is caught at startup rather
    /// than producing silently wrong predictions.
    pub fn new(scaler: Arc<FittedScaler>, expected_schema: &[Field]) -> Result<Self, AssemblyError> {
        let columns = Field::ALL.to_vec();
        check_column_order(&columns, expected_schema)?;
        log::debug!(
            "feature assembler ready: {} columns, scaling {:?}",
            columns.len(),
            scaler.fields().map(Field::key).collect::<Vec<_>>()
        );
        Ok(Self { scaler, columns })
    }

    pub fn columns(&self) -> &[Field] {
        &self.columns
    }

    pub fn scaler(&self) -> &FittedScaler {
        &self.scaler
    }

    /// Scales the declared continuous subset and passes every other
    /// column through unchanged.
    pub fn assemble(&self, record: &PatientRecord) -> ScaledRecord {
        let values = self
            .columns
            .iter()
            .map(|&field| self.scaler.transform(field, record.get(field)))
            .collect();
        ScaledRecord {
            columns: self.columns.clone(),
            values,
        }
    }
}
