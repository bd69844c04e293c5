//! `alzdx.toml` configuration.

use std::fmt;
use std::path::{Path, PathBuf};

use alzdx_report::{PageGeometry, RenderError, RenderOptions, ReportRenderer, REPORT_FILE_NAME};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const CONFIG_FILE: &str = "alzdx.toml";
pub const DEFAULT_MODEL_PATH: &str = "artifacts/classifier.json";
pub const DEFAULT_SCALER_PATH: &str = "artifacts/scaler.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("invalid [report.page] table: {0}")]
    Page(#[from] RenderError),
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    pub model: ModelConfig,
    pub scaler: ScalerConfig,
    pub report: ReportConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Classifier artifact (JSON).
    pub path: PathBuf,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_MODEL_PATH),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ScalerConfig {
    /// Fitted scaler artifact (JSON), as written by `alzdx fit-scaler`.
    pub path: PathBuf,
}

impl Default for ScalerConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_SCALER_PATH),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ReportConfig {
    pub output: PathBuf,
    pub describe_sections: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<PageGeometry>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from(REPORT_FILE_NAME),
            describe_sections: false,
            page: None,
        }
    }
}

impl AppConfig {
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Makes relative artifact paths relative to `base` instead of the
    /// working directory.
    pub fn resolve_paths(&mut self, base: &Path) {
        if self.model.path.is_relative() {
            self.model.path = base.join(&self.model.path);
        }
        if self.scaler.path.is_relative() {
            self.scaler.path = base.join(&self.scaler.path);
        }
    }

    /// Builds the report renderer, validating any `[report.page]` override.
    pub fn renderer(&self) -> Result<ReportRenderer, ConfigError> {
        let geometry = self.report.page.unwrap_or_default();
        let options = RenderOptions {
            describe_sections: self.report.describe_sections,
        };
        Ok(ReportRenderer::new(geometry, options)?)
    }
}

impl fmt::Display for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "model={}, scaler={}, output={}",
            self.model.path.display(),
            self.scaler.path.display(),
            self.report.output.display()
        )
    }
}

pub fn parse_config(text: &str) -> Result<AppConfig, ConfigError> {
    Ok(toml::from_str::<AppConfig>(text)?)
}

/// Reads and parses `path`. Relative artifact paths are resolved against
/// the directory holding the file.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut config = parse_config(&text)?;
    if let Some(dir) = path.parent() {
        config.resolve_paths(dir);
    }
    log::debug!("loaded {}: {config}", path.display());
    Ok(config)
}

/// Commented default configuration written by `alzdx init-config`.
pub fn generate_config() -> String {
    let mut out = String::new();
    out.push_str("# alzdx configuration\n");
    out.push_str("# Relative paths are resolved against this file's directory.\n");
    out.push_str("\n[model]\n");
    out.push_str("# Classifier artifact (JSON)\n");
    out.push_str(&format!("path = \"{DEFAULT_MODEL_PATH}\"\n"));
    out.push_str("\n[scaler]\n");
    out.push_str("# Produced by `alzdx fit-scaler`\n");
    out.push_str(&format!("path = \"{DEFAULT_SCALER_PATH}\"\n"));
    out.push_str("\n[report]\n");
    out.push_str(&format!("output = \"{REPORT_FILE_NAME}\"\n"));
    out.push_str("# Print an explanatory sentence under each section heading\n");
    out.push_str("describe_sections = false\n");
    out.push_str("\n# Page geometry in points; omitted keys keep the A4 defaults\n");
    out.push_str("# [report.page]\n");
    out.push_str("# width = 595.28\n");
    out.push_str("# height = 841.89\n");
    out.push_str("# line_height = 18.0\n");
    out
}
