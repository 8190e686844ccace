use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::Path;

use crate::core::features::FeatureSchema;
use crate::error::{OracleError, Result};
use crate::models::RegressionModel;
use crate::preprocessing::{FeatureScaler, ScalerKind};

/// Raw JSON structure of a scaler artifact
#[derive(Debug, Deserialize)]
struct ScalerArtifact {
    feature_names: Vec<String>,
    transform: ScalerKind,
}

/// Deserialize JSON, reporting the path of the field that failed
fn deserialize_json<T: DeserializeOwned>(json_str: &str, source: &Path) -> Result<T> {
    let mut deserializer = serde_json::Deserializer::from_str(json_str);
    let value = serde_path_to_error::deserialize(&mut deserializer).map_err(|e| {
        OracleError::Artifact {
            path: source.to_path_buf(),
            message: format!("{} (at '{}')", e.inner(), e.path()),
        }
    })?;
    deserializer.end().map_err(|e| OracleError::Artifact {
        path: source.to_path_buf(),
        message: e.to_string(),
    })?;
    Ok(value)
}

/// Parse a scaler artifact from a JSON string
pub fn parse_scaler_json_str(json_str: &str, source: &Path) -> Result<FeatureScaler> {
    let artifact: ScalerArtifact = deserialize_json(json_str, source)?;
    let schema = FeatureSchema::new(artifact.feature_names)?;
    FeatureScaler::new(schema, artifact.transform)
}

/// Parse a model artifact from a JSON string
pub fn parse_model_json_str(json_str: &str, source: &Path) -> Result<RegressionModel> {
    let model: RegressionModel = deserialize_json(json_str, source)?;
    model.validate()?;
    Ok(model)
}

/// Parse a scaler artifact file
pub fn parse_scaler_json(path: &Path) -> Result<FeatureScaler> {
    let content = std::fs::read_to_string(path).map_err(|e| OracleError::io(path, e))?;
    parse_scaler_json_str(&content, path)
}

/// Parse a model artifact file
pub fn parse_model_json(path: &Path) -> Result<RegressionModel> {
    let content = std::fs::read_to_string(path).map_err(|e| OracleError::io(path, e))?;
    parse_model_json_str(&content, path)
}
