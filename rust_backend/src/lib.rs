//! Oráculo: single-shot MRR and churn forecasting with per-feature attributions.
//!
//! The pipeline is linear: load the metrics table and the fitted artifacts,
//! scale the latest row, predict both targets, compare against the trailing
//! baseline, explain each prediction and render the report.

pub mod api;
pub mod config;
pub mod core;
pub mod error;
pub mod explain;
pub mod io;
pub mod models;
pub mod parsing;
pub mod preprocessing;
pub mod services;

pub use error::{OracleError, Result};
