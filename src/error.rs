//! Error types surfaced by the progression pipeline
//!
//! The save store never lets these escape; it logs and returns a sentinel.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::schema::SchemaViolation;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("profile data not found at {path:?}")]
    DataNotFound { path: PathBuf },
    #[error("failed to read profile data from {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed JSON in {path:?} at line {line}, column {column}: {message}")]
    Malformed {
        path: PathBuf,
        line: usize,
        column: usize,
        message: String,
    },
    #[error("{path:?} failed schema validation:\n{}", format_violations(.violations))]
    Validation {
        path: PathBuf,
        violations: Vec<SchemaViolation>,
    },
    #[error("{path:?} is not a profile document: {source}")]
    Shape {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl PipelineError {
    /// Build a `Malformed` error carrying the parser's position
    pub fn malformed(path: impl Into<PathBuf>, err: &serde_json::Error) -> Self {
        PipelineError::Malformed {
            path: path.into(),
            line: err.line(),
            column: err.column(),
            message: err.to_string(),
        }
    }

    /// True for the "file is simply absent" case scenes degrade on
    pub fn is_not_found(&self) -> bool {
        matches!(self, PipelineError::DataNotFound { .. })
    }
}

fn format_violations(violations: &[SchemaViolation]) -> String {
    violations
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}
