//! Standard scaler fitted offline on the training distribution and
//! persisted next to the classifier artifact.

use crate::error::ScalerError;
use alzdx_schema::Field;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Per-column affine transform `(x - mean) / std`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    pub mean: f64,
    pub std: f64,
}

impl StandardScaler {
    /// Fits mean and population standard deviation.
    ///
    /// Returns `None` when fewer than two samples are given or the samples
    /// have no spread, since the resulting transform would collapse every
    /// input to zero.
    pub fn fit(xs: &[f64]) -> Option<Self> {
        if xs.len() < 2 {
            return None;
        }
        let mean = xs.iter().sum::<f64>() / xs.len() as f64;
        let mut var = 0.0;
        for &x in xs {
            let d = x - mean;
            var += d * d;
        }
        var /= xs.len() as f64;
        let std = var.sqrt();
        if std > 0.0 && std.is_finite() {
            Some(Self { mean, std })
        } else {
            None
        }
    }

    pub fn transform(&self, x: f64) -> f64 {
        (x - self.mean) / self.std
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaledColumn {
    pub field: Field,
    pub mean: f64,
    pub std: f64,
}

impl ScaledColumn {
    fn scaler(&self) -> StandardScaler {
        StandardScaler {
            mean: self.mean,
            std: self.std,
        }
    }
}

/// Persisted scaler artifact covering the declared continuous subset.
///
/// Immutable once loaded; share it behind an `Arc`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittedScaler {
    columns: Vec<ScaledColumn>,
}

impl FittedScaler {
    /// Builds a scaler from explicit statistics, rejecting flag columns,
    /// duplicates, and non-positive spreads.
    pub fn new(columns: Vec<ScaledColumn>) -> Result<Self, ScalerError> {
        let scaler = Self { columns };
        scaler.check()?;
        Ok(scaler)
    }

    /// Fits one column per `(field, samples)` pair.
    pub fn fit<'a, I>(samples: I) -> Result<Self, ScalerError>
    where
        I: IntoIterator<Item = (Field, &'a [f64])>,
    {
        let mut columns = Vec::new();
        for (field, xs) in samples {
            let fitted = StandardScaler::fit(xs).ok_or_else(|| ScalerError::Degenerate {
                field,
                reason: if xs.len() < 2 {
                    format!("need at least 2 training samples, got {}", xs.len())
                } else {
                    "training samples have zero variance".to_string()
                },
            })?;
            log::debug!(
                "fitted {field}: mean={:.4} std={:.4} over {} samples",
                fitted.mean,
                fitted.std,
                xs.len()
            );
            columns.push(ScaledColumn {
                field,
                mean: fitted.mean,
                std: fitted.std,
            });
        }
        Self::new(columns)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ScalerError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let scaler: FittedScaler = serde_json::from_str(&text)?;
        scaler.check()?;
        log::info!(
            "loaded scaler for {} columns from {}",
            scaler.columns.len(),
            path.as_ref().display()
        );
        Ok(scaler)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ScalerError> {
        let text = serde_json::to_string_pretty(self)?;
        std::fs::write(path, text)?;
        Ok(())
    }

    pub fn columns(&self) -> &[ScaledColumn] {
        &self.columns
    }

    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.columns.iter().map(|c| c.field)
    }

    pub fn covers(&self, field: Field) -> bool {
        self.columns.iter().any(|c| c.field == field)
    }

    /// Scales `value` if `field` is covered, otherwise returns it unchanged.
    pub fn transform(&self, field: Field, value: f64) -> f64 {
        match self.columns.iter().find(|c| c.field == field) {
            Some(column) => column.scaler().transform(value),
            None => value,
        }
    }

    fn check(&self) -> Result<(), ScalerError> {
        let mut seen = HashSet::new();
        for column in &self.columns {
            if column.field.is_flag() {
                return Err(ScalerError::NotContinuous(column.field));
            }
            if !seen.insert(column.field) {
                return Err(ScalerError::DuplicateColumn(column.field));
            }
            if !column.mean.is_finite() {
                return Err(ScalerError::Degenerate {
                    field: column.field,
                    reason: format!("mean {} is not finite", column.mean),
                });
            }
            if !(column.std.is_finite() && column.std > 0.0) {
                return Err(ScalerError::Degenerate {
                    field: column.field,
                    reason: format!("std {} must be finite and positive", column.std),
                });
            }
        }
        Ok(())
    }
}
