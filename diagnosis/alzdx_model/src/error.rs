//! Error types for artifact loading, scaling, assembly and inference

use alzdx_schema::Field;
use thiserror::Error;

/// Errors raised while fitting, loading or applying the persisted scaler
#[derive(Debug, Error)]
pub enum ScalerError {
    #[error("failed to read or write scaler artifact: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed scaler artifact: {0}")]
    Json(#[from] serde_json::Error),
    #[error("column {field} is degenerate: {reason}")]
    Degenerate { field: Field, reason: String },
    #[error("column {0} is a flag and cannot be scaled")]
    NotContinuous(Field),
    #[error("column {0} appears more than once in the scaler")]
    DuplicateColumn(Field),
    #[error("training data line {line}: {message}")]
    Csv { line: usize, message: String },
}

/// Errors raised by classifier artifacts and inference
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("failed to read classifier artifact: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed classifier artifact: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid classifier artifact: {0}")]
    InvalidArtifact(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("classifier produced {0}, expected a probability in [0, 1]")]
    OutputOutOfRange(f64),
}

/// Errors raised while turning a patient record into classifier input
#[derive(Debug, Error)]
pub enum AssemblyError {
    #[error(
        "column order does not match the classifier schema at position {position}: \
         expected {expected}, found {found}"
    )]
    SchemaMismatch {
        position: usize,
        expected: Field,
        found: Field,
    },
    #[error("classifier expects {expected} columns, assembled record has {found}")]
    LengthMismatch { expected: usize, found: usize },
    #[error(transparent)]
    Scaler(#[from] ScalerError),
}
