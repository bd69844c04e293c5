//! Alzheimer's risk screening service.
//!
//! Wires the persisted scaler, the classifier and the report renderer into
//! a [`DiagnosisService`], configured from `alzdx.toml`.

pub mod config;
pub mod pipeline;

pub use config::{generate_config, load_config, parse_config, AppConfig, ConfigError, CONFIG_FILE};
pub use pipeline::{Diagnosis, DiagnosisError, DiagnosisService};

pub use alzdx_model as model;
pub use alzdx_report as report;
pub use alzdx_schema as schema;
