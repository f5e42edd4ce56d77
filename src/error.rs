//! Error handling for Climate TRACE processing operations.
//!
//! Provides error types with context for archive retrieval, schema
//! reconciliation, categorical validation and Parquet conversion failures.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CtraceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("ZIP archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("Network request failed for {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP {status} while fetching {url}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("Checksum mismatch for {path}: expected sha256:{expected}, found sha256:{actual}")]
    Integrity {
        path: PathBuf,
        expected: String,
        actual: String,
    },

    #[error("Unknown sector package '{package}' for gas '{gas}'")]
    UnknownPackage { gas: String, package: String },

    #[error("Entry '{entry}' not found in archive {archive}")]
    ArchiveEntryNotFound { archive: PathBuf, entry: String },

    #[error(
        "Schema mismatch in {table} table: missing columns {missing:?}, unrecognized columns {unexpected:?}"
    )]
    SchemaMismatch {
        table: String,
        missing: Vec<String>,
        unexpected: Vec<String>,
    },

    #[error("Invalid {argument} '{value}'. Valid choices are {valid:?}")]
    InvalidArgument {
        argument: String,
        value: String,
        valid: Vec<String>,
    },

    #[error("Could not parse required date column '{column}' from value '{value}'")]
    DateParse { column: String, value: String },

    #[error("Value '{value}' in column '{column}' is not a valid {vocabulary}")]
    Vocabulary {
        vocabulary: String,
        column: String,
        value: String,
    },

    #[error("Data validation failed: {message}")]
    DataValidation { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl CtraceError {
    /// Build an `InvalidArgument` error listing the accepted values
    pub fn invalid_argument<S: ToString>(
        argument: impl Into<String>,
        value: impl ToString,
        valid: impl IntoIterator<Item = S>,
    ) -> Self {
        Self::InvalidArgument {
            argument: argument.into(),
            value: value.to_string(),
            valid: valid.into_iter().map(|v| v.to_string()).collect(),
        }
    }

    pub fn data_validation(message: impl Into<String>) -> Self {
        Self::DataValidation {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CtraceError>;
