use crate::field::{Field, FieldKind};
use crate::record::PatientRecord;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("missing field '{0}'")]
    Missing(Field),
    #[error("field '{0}' given more than once")]
    Duplicate(Field),
    #[error("unknown field '{0}'")]
    Unknown(String),
    #[error("{field} must be finite, got {value}")]
    NotFinite { field: Field, value: f64 },
    #[error("{field} must be within {min}..={max}, got {value}")]
    OutOfRange {
        field: Field,
        value: f64,
        min: f64,
        max: f64,
    },
    #[error("{field} must be 0 or 1, got {value}")]
    NotAFlag { field: Field, value: f64 },
}

/// Checks one value against its field's declared kind.
pub fn validate_value(field: Field, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NotFinite { field, value });
    }
    match field.kind() {
        FieldKind::Continuous { min, max } => {
            if value < min || value > max {
                return Err(ValidationError::OutOfRange {
                    field,
                    value,
                    min,
                    max,
                });
            }
        }
        FieldKind::Flag => {
            if value != 0.0 && value != 1.0 {
                return Err(ValidationError::NotAFlag { field, value });
            }
        }
    }
    Ok(())
}

/// Checks every field of a record, reporting the first violation in
/// schema order.
pub fn validate_record(record: &PatientRecord) -> Result<(), ValidationError> {
    record
        .iter()
        .try_for_each(|(field, value)| validate_value(field, value))
}
