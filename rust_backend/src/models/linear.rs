//! Linear regression models.

use serde::{Deserialize, Serialize};

use super::Regressor;
use crate::error::{OracleError, Result};

/// A fitted linear model: `intercept + Σ coef_i * x_i`.
///
/// `background` is the reference point for attributions. When absent it is the
/// zero vector, which is the training mean of standard-scaled features.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    pub coefficients: Vec<f64>,
    #[serde(default)]
    pub intercept: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<Vec<f64>>,
}

impl LinearModel {
    pub fn new(coefficients: Vec<f64>, intercept: f64) -> Self {
        Self {
            coefficients,
            intercept,
            background: None,
        }
    }

    /// A model that ignores its inputs and always predicts `value`.
    pub fn constant(n_features: usize, value: f64) -> Self {
        Self::new(vec![0.0; n_features], value)
    }

    pub fn with_background(mut self, background: Vec<f64>) -> Self {
        self.background = Some(background);
        self
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.coefficients.is_empty() {
            return Err(OracleError::InvalidArtifact(
                "linear model has no coefficients".to_string(),
            ));
        }
        if let Some(background) = &self.background {
            if background.len() != self.coefficients.len() {
                return Err(OracleError::InvalidArtifact(format!(
                    "linear model background has {} entries, expected {}",
                    background.len(),
                    self.coefficients.len()
                )));
            }
        }
        let finite = self.intercept.is_finite()
            && self
                .coefficients
                .iter()
                .chain(self.background.iter().flatten())
                .all(|v| v.is_finite());
        if !finite {
            return Err(OracleError::InvalidArtifact(
                "linear model parameters must be finite".to_string(),
            ));
        }
        Ok(())
    }

    fn background_at(&self, i: usize) -> f64 {
        self.background.as_ref().map_or(0.0, |b| b[i])
    }
}

impl Regressor for LinearModel {
    fn n_features(&self) -> usize {
        self.coefficients.len()
    }

    fn predict(&self, x: &[f64]) -> f64 {
        self.intercept
            + self
                .coefficients
                .iter()
                .zip(x)
                .map(|(c, v)| c * v)
                .sum::<f64>()
    }

    fn expected_value(&self) -> f64 {
        self.intercept
            + self
                .coefficients
                .iter()
                .enumerate()
                .map(|(i, c)| c * self.background_at(i))
                .sum::<f64>()
    }

    /// Exact interventional SHAP values: `coef_i * (x_i - background_i)`.
    fn contributions(&self, x: &[f64]) -> Vec<f64> {
        self.coefficients
            .iter()
            .zip(x)
            .enumerate()
            .map(|(i, (c, v))| c * (v - self.background_at(i)))
            .collect()
    }
}
