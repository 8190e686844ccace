//! Regression models loaded from artifacts.
//!
//! [`Regressor`] is the seam between the forecast engine and whatever produced
//! the fitted model. The built-in families are [`LinearModel`] and
//! [`TreeEnsemble`], wrapped by [`Estimator`] for deserialization.

pub mod bundle;
pub mod linear;
pub mod tree;

use serde::{Deserialize, Serialize};

use crate::error::{OracleError, Result};

pub use bundle::ModelBundle;
pub use linear::LinearModel;
pub use tree::{Aggregation, SplitRule, Tree, TreeEnsemble, TreeNode};

/// A fitted single-output regressor with exact additive attributions.
///
/// Implementations may assume `x.len() == self.n_features()`; callers check it.
pub trait Regressor {
    /// Number of input features the model was fitted on.
    fn n_features(&self) -> usize;

    /// Point prediction for one row.
    fn predict(&self, x: &[f64]) -> f64;

    /// Output with no feature information, the base value of the attributions.
    fn expected_value(&self) -> f64;

    /// Per-feature contributions such that
    /// `expected_value() + Σ contributions(x) == predict(x)`.
    fn contributions(&self, x: &[f64]) -> Vec<f64>;
}

/// Supported model families.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Estimator {
    Linear(LinearModel),
    TreeEnsemble(TreeEnsemble),
}

impl Estimator {
    pub fn validate(&self) -> Result<()> {
        match self {
            Estimator::Linear(m) => m.validate(),
            Estimator::TreeEnsemble(m) => m.validate(),
        }
    }

    fn as_regressor(&self) -> &dyn Regressor {
        match self {
            Estimator::Linear(m) => m as &dyn Regressor,
            Estimator::TreeEnsemble(m) => m as &dyn Regressor,
        }
    }
}

impl Regressor for Estimator {
    fn n_features(&self) -> usize {
        self.as_regressor().n_features()
    }

    fn predict(&self, x: &[f64]) -> f64 {
        self.as_regressor().predict(x)
    }

    fn expected_value(&self) -> f64 {
        self.as_regressor().expected_value()
    }

    fn contributions(&self, x: &[f64]) -> Vec<f64> {
        self.as_regressor().contributions(x)
    }
}

/// Hold-out quality recorded when the model was fitted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QualityMetrics {
    /// Mean absolute error, in target units.
    pub mae: f64,
    /// Coefficient of determination.
    pub r2: f64,
}

/// A fitted model plus the metadata stored next to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionModel {
    #[serde(default)]
    pub name: String,
    /// Columns the model was fitted on, when the exporter recorded them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_names: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality: Option<QualityMetrics>,
    pub estimator: Estimator,
}

impl RegressionModel {
    pub fn new(name: impl Into<String>, estimator: Estimator) -> Self {
        Self {
            name: name.into(),
            feature_names: None,
            quality: None,
            estimator,
        }
    }

    pub fn with_quality(mut self, mae: f64, r2: f64) -> Self {
        self.quality = Some(QualityMetrics { mae, r2 });
        self
    }

    pub fn with_feature_names(mut self, names: Vec<String>) -> Self {
        self.feature_names = Some(names);
        self
    }

    /// Structural checks on the estimator and its metadata.
    pub fn validate(&self) -> Result<()> {
        self.estimator.validate()?;
        if let Some(names) = &self.feature_names {
            if names.len() != self.estimator.n_features() {
                return Err(OracleError::InvalidArtifact(format!(
                    "model '{}' lists {} feature names but expects {} features",
                    self.name,
                    names.len(),
                    self.estimator.n_features()
                )));
            }
        }
        Ok(())
    }
}

impl Regressor for RegressionModel {
    fn n_features(&self) -> usize {
        self.estimator.n_features()
    }

    fn predict(&self, x: &[f64]) -> f64 {
        self.estimator.predict(x)
    }

    fn expected_value(&self) -> f64 {
        self.estimator.expected_value()
    }

    fn contributions(&self, x: &[f64]) -> Vec<f64> {
        self.estimator.contributions(x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimator_deserializes_by_kind() {
        let json = r#"{
            "name": "mrr",
            "quality": {"mae": 29122.0, "r2": 0.988},
            "estimator": {"kind": "linear", "coefficients": [1.5, -2.0], "intercept": 3.0}
        }"#;
        let model: RegressionModel = serde_json::from_str(json).unwrap();
        assert_eq!(model.n_features(), 2);
        assert_eq!(model.predict(&[2.0, 1.0]), 4.0);
        assert_eq!(model.quality.unwrap().r2, 0.988);
    }

    #[test]
    fn test_tree_ensemble_deserializes_with_defaults() {
        let json = r#"{
            "estimator": {
                "kind": "tree_ensemble",
                "n_features": 1,
                "trees": [{"nodes": [
                    {"type": "split", "feature": 0, "threshold": 0.0, "left": 1, "right": 2, "cover": 2.0},
                    {"type": "leaf", "value": -1.0, "cover": 1.0},
                    {"type": "leaf", "value": 1.0, "cover": 1.0}
                ]}]
            }
        }"#;
        let model: RegressionModel = serde_json::from_str(json).unwrap();
        model.validate().unwrap();
        match &model.estimator {
            Estimator::TreeEnsemble(e) => {
                assert_eq!(e.aggregation, Aggregation::Sum);
                assert_eq!(e.split_rule, SplitRule::LessOrEqual);
            }
            other => panic!("unexpected estimator {:?}", other),
        }
        assert_eq!(model.predict(&[0.5]), 1.0);
    }

    #[test]
    fn test_feature_name_count_must_match() {
        let model = RegressionModel::new("churn", Estimator::Linear(LinearModel::constant(3, 1.0)))
            .with_feature_names(vec!["a".into(), "b".into()]);
        assert!(model.validate().is_err());
    }
}
