//! Serializable report-run configuration.
//!
//! Orchestration settings only (where to look, where to write); the
//! analytics pipeline itself takes everything as explicit parameters.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportConfig {
    pub search: SearchConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchConfig {
    /// Directory the tester drops its result files under.
    pub base_dir: PathBuf,

    /// Glob patterns relative to `base_dir`, tried in order.
    #[serde(default = "default_patterns")]
    pub patterns: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutputConfig {
    /// Where the artifact copy, chart, and CSV exports land.
    #[serde(default = "default_report_dir")]
    pub report_dir: PathBuf,

    /// Disable to skip chart rendering.
    #[serde(default = "default_chart")]
    pub chart: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            report_dir: default_report_dir(),
            chart: default_chart(),
        }
    }
}

pub(crate) fn default_patterns() -> Vec<String> {
    vec!["Tester/Agent-*/MQL5/Files/backtest_*.json".to_string()]
}

fn default_report_dir() -> PathBuf {
    PathBuf::from("reports")
}

fn default_chart() -> bool {
    true
}

impl ReportConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_toml(&content)?)
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}
