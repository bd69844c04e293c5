//! Inference input pipeline for alzdx
//!
//! Provides the persisted standard scaler, the feature assembler that turns a
//! patient record into the classifier's input row, the pluggable classifier
//! seam with a logistic artifact backend, and the prediction result type.

pub mod assembler;
pub mod classifier;
pub mod error;
pub mod metadata;
pub mod prediction;
pub mod scaler;
pub mod training;

pub use assembler::{check_column_order, FeatureAssembler, ScaledRecord};
pub use classifier::{check_probability, Classifier, LogisticClassifier};
pub use error::{AssemblyError, ModelError, ScalerError};
pub use metadata::{ModelMetadata, ModelVersion};
pub use prediction::{format_confidence, label_for, PredictionResult, DECISION_THRESHOLD};
pub use scaler::{FittedScaler, ScaledColumn, StandardScaler};
pub use training::fit_from_csv;
