use alzdx_schema::Field;
use thiserror::Error;

/// Errors that abort report generation. No partial document is produced.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RenderError {
    #[error("character {ch:?} in {text:?} cannot be drawn with the report font")]
    UnencodableText { text: String, ch: char },
    #[error("value of {field} is not a finite number: {value}")]
    NonFiniteValue { field: Field, value: f64 },
    #[error("probability {0} is outside [0, 1]")]
    InvalidProbability(f64),
    #[error("section '{section}' does not fit on the page")]
    LayoutOverflow { section: String },
    #[error("invalid page geometry: {0}")]
    InvalidGeometry(String),
    #[error("PDF backend error: {0}")]
    Pdf(String),
}
