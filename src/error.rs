// src/error.rs
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MinerError {
    #[error("I/O error: {source} (path: {path})")]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid date '{value}' (expected format '{format}')")]
    DateParse { value: String, format: String },

    #[error("invalid study span: start {start} is not before end {end}")]
    InvalidSpan { start: String, end: String },

    #[error("malformed Pajek data at line {line}: {reason}")]
    PajekParse { line: usize, reason: String },

    #[error("eigenvector centrality did not converge within {0} iterations")]
    NonConvergence(usize),

    #[error("config error: {0}")]
    Config(String),

    #[error("Generic error: {0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, MinerError>;

// Allow `?` on std::io::Error by converting to MinerError::Io with unknown path.
impl From<std::io::Error> for MinerError {
    fn from(source: std::io::Error) -> Self {
        MinerError::Io {
            source,
            path: PathBuf::from("<unknown>"),
        }
    }
}

impl From<serde_json::Error> for MinerError {
    fn from(e: serde_json::Error) -> Self {
        MinerError::Other(e.to_string())
    }
}

impl MinerError {
    /// Attaches a concrete path to a bare I/O error.
    #[must_use]
    pub fn io(source: std::io::Error, path: impl Into<PathBuf>) -> Self {
        MinerError::Io {
            source,
            path: path.into(),
        }
    }
}
