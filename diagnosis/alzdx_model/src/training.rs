//! Offline scaler fitting from a training-set CSV export.

use crate::error::ScalerError;
use crate::scaler::FittedScaler;
use alzdx_schema::Field;
use csv::{Position, ReaderBuilder, Trim};

fn line_of(position: Option<&Position>) -> usize {
    position.map_or(1, |p| p.line() as usize)
}

/// Fits a scaler over `fields` from comma-separated training data.
///
/// The first record is the header. Columns not named in `fields`
/// (patient ids, doctor names, diagnosis labels) are ignored; every
/// cell of a selected column must parse as a finite number.
pub fn fit_from_csv(text: &str, fields: &[Field]) -> Result<FittedScaler, ScalerError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| ScalerError::Csv {
            line: line_of(e.position()),
            message: e.to_string(),
        })?
        .clone();
    let header_line = text
        .lines()
        .position(|l| !l.trim().is_empty())
        .map_or(1, |i| i + 1);
    if headers.iter().all(str::is_empty) {
        return Err(ScalerError::Csv {
            line: header_line,
            message: "training data is empty".to_string(),
        });
    }

    let mut positions = Vec::with_capacity(fields.len());
    for &field in fields {
        let pos = headers
            .iter()
            .position(|h| h == field.key())
            .ok_or_else(|| ScalerError::Csv {
                line: header_line,
                message: format!("header has no column '{}'", field.key()),
            })?;
        positions.push(pos);
    }

    let mut samples: Vec<Vec<f64>> = vec![Vec::new(); fields.len()];
    for result in reader.records() {
        let record = result.map_err(|e| ScalerError::Csv {
            line: line_of(e.position()),
            message: e.to_string(),
        })?;
        let line = line_of(record.position());
        for (col, &pos) in positions.iter().enumerate() {
            let raw = record.get(pos).unwrap_or_default();
            let value: f64 = raw.parse().map_err(|_| ScalerError::Csv {
                line,
                message: format!("'{raw}' in column {} is not a number", fields[col]),
            })?;
            if !value.is_finite() {
                return Err(ScalerError::Csv {
                    line,
                    message: format!("column {} holds non-finite value {raw}", fields[col]),
                });
            }
            samples[col].push(value);
        }
    }

    log::info!(
        "fitting scaler over {} columns from {} training rows",
        fields.len(),
        samples.first().map_or(0, Vec::len)
    );
    FittedScaler::fit(
        fields
            .iter()
            .copied()
            .zip(samples.iter().map(Vec::as_slice)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRAINING: &str = "\
PatientID,Age,Gender,BMI,Diagnosis
4751,70,0,20.0,0
4752,80,1,30.0,1

4753,90,0,25.0,0
";

    #[test]
    fn selected_columns_are_fitted_and_others_ignored() {
        let scaler = fit_from_csv(TRAINING, &[Field::Age, Field::Bmi]).unwrap();
        let age = &scaler.columns()[0];
        assert_eq!(age.field, Field::Age);
        assert!((age.mean - 80.0).abs() < 1e-12);
        assert!(!scaler.covers(Field::Gender));
    }

    #[test]
    fn missing_header_column_is_reported() {
        let err = fit_from_csv(TRAINING, &[Field::CholesterolLdl]).unwrap_err();
        assert!(err.to_string().contains("CholesterolLDL"), "{err}");
    }

    #[test]
    fn bad_cell_names_line() {
        let text = "Age,BMI\n70,20\nold,30\n";
        match fit_from_csv(text, &[Field::Age]).unwrap_err() {
            ScalerError::Csv { line, message } => {
                assert_eq!(line, 3);
                assert!(message.contains("'old'"));
            }
            other => panic!("unexpected error {other}"),
        }
    }

    #[test]
    fn empty_input_is_an_error() {
        assert!(matches!(
            fit_from_csv("  \n", &[Field::Age]),
            Err(ScalerError::Csv { line: 1, .. })
        ));
    }

    #[test]
    fn quoted_cells_with_commas_are_one_column() {
        let text = "PatientID,DoctorInCharge,Age\n1,\"Smith, J\",70\n2,\"Roe, A\",80\n";
        let scaler = fit_from_csv(text, &[Field::Age]).unwrap();
        assert!((scaler.columns()[0].mean - 75.0).abs() < 1e-12);
    }

    #[test]
    fn ragged_row_names_its_line() {
        let text = "Age,BMI\n70,20\n80\n";
        match fit_from_csv(text, &[Field::Age]).unwrap_err() {
            ScalerError::Csv { line, .. } => assert_eq!(line, 3),
            other => panic!("unexpected error {other}"),
        }
    }

    #[test]
    fn header_error_names_header_line_after_blank_lines() {
        let err = fit_from_csv("\n\nAge,BMI\n70,20\n80,25\n", &[Field::Mmse]).unwrap_err();
        match err {
            ScalerError::Csv { line, message } => {
                assert_eq!(line, 3);
                assert!(message.contains("MMSE"));
            }
            other => panic!("unexpected error {other}"),
        }
    }
}
