use std::fs;
use std::path::Path;

use crate::config::OracleConfig;
use crate::core::domain::MetricsTable;
use crate::error::{OracleError, Result};
use crate::io::checksum::calculate_checksum;
use crate::models::ModelBundle;
use crate::parsing::artifact_parser::{parse_model_json_str, parse_scaler_json_str};
use crate::parsing::csv_parser;

/// Unified interface for loading the fitted artifacts
pub struct ArtifactLoader;

impl ArtifactLoader {
    /// Load scaler and both models from the paths in `config`
    pub fn load_bundle(config: &OracleConfig) -> Result<ModelBundle> {
        Self::load_bundle_from_paths(
            &config.scaler_path(),
            &config.mrr_model_path(),
            &config.churn_model_path(),
        )
    }

    /// Load scaler and both models from explicit paths
    pub fn load_bundle_from_paths(
        scaler_path: &Path,
        mrr_path: &Path,
        churn_path: &Path,
    ) -> Result<ModelBundle> {
        let scaler_json = read(scaler_path)?;
        let mrr_json = read(mrr_path)?;
        let churn_json = read(churn_path)?;

        let fingerprint = calculate_checksum([
            scaler_json.as_bytes(),
            mrr_json.as_bytes(),
            churn_json.as_bytes(),
        ]);

        let scaler = parse_scaler_json_str(&scaler_json, scaler_path)?;
        let mrr = parse_model_json_str(&mrr_json, mrr_path)?;
        let churn = parse_model_json_str(&churn_json, churn_path)?;

        let bundle = ModelBundle::new(scaler, mrr, churn, fingerprint)?;
        log::info!(
            "Loaded model bundle: {} features, fingerprint {}",
            bundle.schema().len(),
            &bundle.fingerprint()[..12]
        );
        Ok(bundle)
    }
}

/// Unified interface for loading the daily metrics table
pub struct MetricsLoader;

impl MetricsLoader {
    /// Load the metrics table named in `config`
    pub fn load(config: &OracleConfig) -> Result<MetricsTable> {
        csv_parser::parse_metrics_csv(&config.data_path(), &config.data)
    }
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| OracleError::io(path, e))
}
