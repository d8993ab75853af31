// src/config.rs
//! Study configuration loaded from `collabnet.toml`.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::{MinerError, Result};

/// Top-level configuration. Every field has a default, so a missing
/// config file yields the reference study setup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub study: StudyConfig,
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(skip)]
    pub verbose: bool,
}

/// The study span and its division into periods.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudyConfig {
    #[serde(default = "default_span_start")]
    pub span_start: String,
    #[serde(default = "default_span_end")]
    pub span_end: String,
    #[serde(default = "default_date_format")]
    pub date_format: String,
    #[serde(default = "default_periods")]
    pub periods: u32,
}

impl Default for StudyConfig {
    fn default() -> Self {
        Self {
            span_start: default_span_start(),
            span_end: default_span_end(),
            date_format: default_date_format(),
            periods: default_periods(),
        }
    }
}

/// Input and output locations for the pipeline stages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    #[serde(default = "default_participation")]
    pub participation: PathBuf,
    #[serde(default = "default_activity")]
    pub activity: PathBuf,
    #[serde(default = "default_assignments")]
    pub assignments: PathBuf,
    #[serde(default = "default_graph_dir")]
    pub graph_dir: PathBuf,
    #[serde(default = "default_identity_map")]
    pub identity_map: PathBuf,
    #[serde(default = "default_report")]
    pub report: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            participation: default_participation(),
            activity: default_activity(),
            assignments: default_assignments(),
            graph_dir: default_graph_dir(),
            identity_map: default_identity_map(),
            report: default_report(),
        }
    }
}

fn default_span_start() -> String {
    "2012-03-18 02:25:40".to_string()
}
fn default_span_end() -> String {
    "2015-02-06 05:18:19".to_string()
}
fn default_date_format() -> String {
    "%Y-%m-%d %H:%M:%S".to_string()
}
fn default_periods() -> u32 {
    5
}
fn default_participation() -> PathBuf {
    PathBuf::from("participation.csv")
}
fn default_activity() -> PathBuf {
    PathBuf::from("activity.csv")
}
fn default_assignments() -> PathBuf {
    PathBuf::from("assignments.csv")
}
fn default_graph_dir() -> PathBuf {
    PathBuf::from("graphs")
}
fn default_identity_map() -> PathBuf {
    PathBuf::from("author_mapping.json")
}
fn default_report() -> PathBuf {
    PathBuf::from("allmetrics.csv")
}

impl Config {
    /// Loads `collabnet.toml` from `path`; a missing file yields the
    /// defaults.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|e| MinerError::io(e, path))?;
        toml::from_str(&content).map_err(|e| MinerError::Config(e.to_string()))
    }

    /// Parses the configured study span.
    ///
    /// # Errors
    /// Returns an error if either bound does not match the configured
    /// date format.
    pub fn span(&self) -> Result<(NaiveDateTime, NaiveDateTime)> {
        let parse = |value: &str| {
            NaiveDateTime::parse_from_str(value, &self.study.date_format).map_err(|_| {
                MinerError::DateParse {
                    value: value.to_string(),
                    format: self.study.date_format.clone(),
                }
            })
        };
        Ok((parse(&self.study.span_start)?, parse(&self.study.span_end)?))
    }

    /// Pajek file path for one period, `graphs/graph<period>.net`.
    #[must_use]
    pub fn graph_path(&self, period: u32) -> PathBuf {
        self.paths.graph_dir.join(format!("graph{period}.net"))
    }
}
