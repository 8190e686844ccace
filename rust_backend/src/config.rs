//! Dashboard configuration file support.
//!
//! Configuration is read from an optional `oraculo.toml`. Every setting has a
//! default, so the dashboard runs with no file as long as the artifacts sit in
//! the working directory under their default names.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{OracleError, Result};

/// File name searched for by [`OracleConfig::from_default_location`].
pub const CONFIG_FILE_NAME: &str = "oraculo.toml";

/// Full dashboard configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OracleConfig {
    #[serde(default)]
    pub data: DataSettings,
    #[serde(default)]
    pub models: ModelSettings,
    #[serde(default)]
    pub forecast: ForecastSettings,
    #[serde(default)]
    pub output: OutputSettings,
    /// Directory relative paths resolve against.
    #[serde(skip)]
    pub base_dir: PathBuf,
}

/// Metrics table location and column names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSettings {
    #[serde(default = "default_data_path")]
    pub path: PathBuf,
    #[serde(default = "default_date_column")]
    pub date_column: String,
    #[serde(default = "default_mrr_column")]
    pub mrr_column: String,
    #[serde(default = "default_churn_column")]
    pub churn_column: String,
}

/// Artifact locations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSettings {
    #[serde(default = "default_mrr_model_path")]
    pub mrr_path: PathBuf,
    #[serde(default = "default_churn_model_path")]
    pub churn_path: PathBuf,
    #[serde(default = "default_scaler_path")]
    pub scaler_path: PathBuf,
}

/// Baseline and explanation settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastSettings {
    #[serde(default = "default_baseline_window")]
    pub baseline_window: usize,
    #[serde(default = "default_horizon_days")]
    pub horizon_days: u32,
    #[serde(default = "default_top_features")]
    pub top_features: usize,
}

/// Report rendering settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(default)]
    pub format: OutputFormat,
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

fn default_data_path() -> PathBuf {
    PathBuf::from("base_modelo_diario.csv")
}

fn default_date_column() -> String {
    "Data".to_string()
}

fn default_mrr_column() -> String {
    "MRR_Total".to_string()
}

fn default_churn_column() -> String {
    "Churn_Total".to_string()
}

fn default_mrr_model_path() -> PathBuf {
    PathBuf::from("modelo_mrr.json")
}

fn default_churn_model_path() -> PathBuf {
    PathBuf::from("modelo_churn.json")
}

fn default_scaler_path() -> PathBuf {
    PathBuf::from("scaler.json")
}

fn default_baseline_window() -> usize {
    14
}

fn default_horizon_days() -> u32 {
    14
}

fn default_top_features() -> usize {
    3
}

fn default_currency_symbol() -> String {
    "R$".to_string()
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            path: default_data_path(),
            date_column: default_date_column(),
            mrr_column: default_mrr_column(),
            churn_column: default_churn_column(),
        }
    }
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            mrr_path: default_mrr_model_path(),
            churn_path: default_churn_model_path(),
            scaler_path: default_scaler_path(),
        }
    }
}

impl Default for ForecastSettings {
    fn default() -> Self {
        Self {
            baseline_window: default_baseline_window(),
            horizon_days: default_horizon_days(),
            top_features: default_top_features(),
        }
    }
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            currency_symbol: default_currency_symbol(),
        }
    }
}

impl OracleConfig {
    /// Load configuration from a TOML file.
    ///
    /// Relative paths in the file resolve against the file's directory.
    ///
    /// # Errors
    ///
    /// Returns [`OracleError::Io`] if the file cannot be read and
    /// [`OracleError::Config`] if it cannot be parsed or fails validation.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| OracleError::io(path, e))?;

        let mut config = Self::from_toml_str(&content)?;
        config.base_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        Ok(config)
    }

    /// Parse configuration from TOML text. Relative paths resolve against the
    /// current directory.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: OracleConfig = toml::from_str(content)
            .map_err(|e| OracleError::Config(format!("failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from the default location.
    ///
    /// Searches for `oraculo.toml` in:
    /// 1. Current directory
    /// 2. `config/` directory
    /// 3. Parent directory
    ///
    /// Falls back to [`OracleConfig::default`] when no file exists.
    pub fn from_default_location() -> Result<Self> {
        let search_paths = [
            PathBuf::from(CONFIG_FILE_NAME),
            PathBuf::from("config").join(CONFIG_FILE_NAME),
            PathBuf::from("..").join(CONFIG_FILE_NAME),
        ];

        for path in search_paths {
            if path.exists() {
                log::info!("Using configuration file {}", path.display());
                return Self::from_file(&path);
            }
        }

        log::info!("No {} found, using defaults", CONFIG_FILE_NAME);
        Ok(Self::default())
    }

    /// Checks ranges that serde cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.forecast.baseline_window == 0 {
            return Err(OracleError::Config(
                "forecast.baseline_window must be at least 1".to_string(),
            ));
        }
        if self.forecast.top_features == 0 {
            return Err(OracleError::Config(
                "forecast.top_features must be at least 1".to_string(),
            ));
        }
        if self.forecast.horizon_days == 0 {
            return Err(OracleError::Config(
                "forecast.horizon_days must be at least 1".to_string(),
            ));
        }
        let columns = [
            &self.data.date_column,
            &self.data.mrr_column,
            &self.data.churn_column,
        ];
        if columns.iter().any(|c| c.trim().is_empty()) {
            return Err(OracleError::Config(
                "data column names must not be empty".to_string(),
            ));
        }
        if columns[0] == columns[1] || columns[0] == columns[2] || columns[1] == columns[2] {
            return Err(OracleError::Config(
                "date, MRR and churn columns must be distinct".to_string(),
            ));
        }
        Ok(())
    }

    /// Resolves a configured path against [`OracleConfig::base_dir`].
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }

    pub fn data_path(&self) -> PathBuf {
        self.resolve(&self.data.path)
    }

    pub fn mrr_model_path(&self) -> PathBuf {
        self.resolve(&self.models.mrr_path)
    }

    pub fn churn_model_path(&self) -> PathBuf {
        self.resolve(&self.models.churn_path)
    }

    pub fn scaler_path(&self) -> PathBuf {
        self.resolve(&self.models.scaler_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = OracleConfig::from_toml_str("").unwrap();
        assert_eq!(config, OracleConfig::default());
        assert_eq!(config.forecast.baseline_window, 14);
        assert_eq!(config.forecast.top_features, 3);
        assert_eq!(config.data.date_column, "Data");
        assert_eq!(config.output.format, OutputFormat::Text);
    }

    #[test]
    fn test_partial_sections_fill_defaults() {
        let config = OracleConfig::from_toml_str(
            r#"
            [forecast]
            baseline_window = 7

            [output]
            format = "json"
            "#,
        )
        .unwrap();
        assert_eq!(config.forecast.baseline_window, 7);
        assert_eq!(config.forecast.horizon_days, 14);
        assert_eq!(config.output.format, OutputFormat::Json);
        assert_eq!(config.output.currency_symbol, "R$");
    }

    #[test]
    fn test_zero_window_is_rejected() {
        let err = OracleConfig::from_toml_str("[forecast]\nbaseline_window = 0\n").unwrap_err();
        assert!(err.to_string().contains("baseline_window"));
    }

    #[test]
    fn test_clashing_columns_are_rejected() {
        let err = OracleConfig::from_toml_str("[data]\nmrr_column = \"Data\"\n").unwrap_err();
        assert!(err.to_string().contains("distinct"));
    }

    #[test]
    fn test_paths_resolve_against_config_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "[models]\nscaler_path = \"artifacts/scaler.json\"\n").unwrap();

        let config = OracleConfig::from_file(&path).unwrap();
        assert_eq!(config.scaler_path(), dir.path().join("artifacts/scaler.json"));
        assert_eq!(config.data_path(), dir.path().join("base_modelo_diario.csv"));
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        assert!(OracleConfig::from_toml_str("[output]\nformat = \"html\"\n").is_err());
    }
}
