use std::path::PathBuf;

use thiserror::Error;

/// Validation and contract errors exposed by `sectorscope-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("company name cannot be empty")]
    EmptyCompanyName,

    #[error("record must be a JSON object")]
    RecordNotObject,
    #[error("field '{field}' is missing")]
    MissingField { field: &'static str },
    #[error("field '{field}' must be a {expected}")]
    WrongFieldType {
        field: &'static str,
        expected: &'static str,
    },

    #[error("date must be ISO-8601 (YYYY-MM-DD or RFC3339): '{value}'")]
    InvalidDate { value: String },

    #[error("field '{field}' must be finite")]
    NonFiniteValue { field: &'static str },
    #[error("field '{field}' must be non-negative")]
    NegativeValue { field: &'static str },

    #[error("invalid sector '{value}', expected one of ai, oil")]
    InvalidSector { value: String },

    #[error("view window for '{view}' must be greater than zero")]
    EmptyWindow { view: &'static str },
    #[error("{view} {field} is not a usable canvas size")]
    InvalidCanvas {
        view: &'static str,
        field: &'static str,
    },

    #[error("request_id must be at least 8 characters")]
    InvalidRequestId,
    #[error("error code cannot be empty")]
    EmptyErrorCode,
    #[error("error message cannot be empty")]
    EmptyErrorMessage,
}

/// Fatal pipeline failures. Record-level problems never surface here; they are
/// collected as rejected records instead.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("dataset must be a JSON array of records, found {found}")]
    StructurallyInvalid { found: &'static str },

    #[error("failed to read dataset '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("dataset is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Errors raised while loading view configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}
