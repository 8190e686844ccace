//! Error types for the forecast dashboard.
//!
//! Every failure is either fatal (bad input, bad artifact, schema mismatch) or
//! represented as an explicit value downstream (see [`crate::services::forecast::Delta`]).

use std::path::PathBuf;

use chrono::NaiveDate;
use polars::prelude::PolarsError;

use crate::core::domain::Target;

/// Result type alias for dashboard operations.
pub type Result<T> = std::result::Result<T, OracleError>;

/// Errors raised while loading inputs or computing forecasts.
#[derive(Debug, thiserror::Error)]
pub enum OracleError {
    /// A file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The CSV reader rejected the metrics table.
    #[error("CSV error: {0}")]
    Csv(#[from] PolarsError),

    /// A required column is absent from the metrics table.
    #[error("missing column '{column}' in metrics table")]
    MissingColumn { column: String },

    /// A cell is null or not numeric.
    #[error("missing or non-numeric value in column '{column}' at row {row}")]
    MissingValue { column: String, row: usize },

    /// A date cell could not be parsed.
    #[error("invalid date '{value}' at row {row}")]
    InvalidDate { value: String, row: usize },

    /// Two rows share the same calendar date.
    #[error("duplicate date {0} in metrics table")]
    DuplicateDate(NaiveDate),

    /// The metrics table has no rows.
    #[error("metrics table is empty")]
    EmptyTable,

    /// A JSON artifact could not be deserialized.
    #[error("malformed artifact {path}: {message}")]
    Artifact { path: PathBuf, message: String },

    /// An artifact deserialized but is structurally inconsistent.
    #[error("invalid artifact: {0}")]
    InvalidArtifact(String),

    /// The feature columns do not match the fitted schema.
    #[error("feature schema mismatch: {0}")]
    SchemaMismatch(String),

    /// Vector length differs from what a component was fitted on.
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// A model produced NaN or infinity for a well-formed input.
    #[error("{target} model produced a non-finite forecast: {value}")]
    NonFiniteForecast { target: Target, value: f64 },

    /// Configuration file is unreadable or inconsistent.
    #[error("configuration error: {0}")]
    Config(String),

    #[error("failed to serialize report: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl OracleError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
