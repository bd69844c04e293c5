//! Patient field schema for the alzdx screening pipeline.
//!
//! Defines the 25 input fields in the column order the classifier was
//! trained with, the record type holding one value per field, the section
//! table the report is laid out from, and input validation.

pub mod field;
pub mod record;
pub mod section;
pub mod validate;

pub use field::{Field, FieldKind, UnknownField, FIELD_COUNT};
pub use record::{Identity, PatientRecord};
pub use section::Section;
pub use validate::{validate_record, validate_value, ValidationError};
