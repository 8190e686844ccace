//! The immutable set of fitted artifacts used for one run.

use crate::core::domain::Target;
use crate::core::features::FeatureSchema;
use crate::error::{OracleError, Result};
use crate::preprocessing::FeatureScaler;

use super::{RegressionModel, Regressor};

/// Scaler and both models, checked against one shared feature schema.
///
/// Built once at startup and passed by reference to the forecast engine.
#[derive(Debug, Clone)]
pub struct ModelBundle {
    scaler: FeatureScaler,
    mrr: RegressionModel,
    churn: RegressionModel,
    fingerprint: String,
}

impl ModelBundle {
    /// Validates both models against the scaler's schema.
    ///
    /// # Errors
    ///
    /// * [`OracleError::InvalidArtifact`] if a model fails its structural checks
    /// * [`OracleError::DimensionMismatch`] if a model expects a different
    ///   number of features than the scaler
    /// * [`OracleError::SchemaMismatch`] if a model's recorded feature names
    ///   differ from the scaler's
    pub fn new(
        scaler: FeatureScaler,
        mrr: RegressionModel,
        churn: RegressionModel,
        fingerprint: impl Into<String>,
    ) -> Result<Self> {
        for (target, model) in [(Target::Mrr, &mrr), (Target::Churn, &churn)] {
            model.validate()?;
            let schema = scaler.schema();
            if model.n_features() != schema.len() {
                return Err(OracleError::DimensionMismatch {
                    expected: schema.len(),
                    got: model.n_features(),
                });
            }
            if let Some(names) = &model.feature_names {
                schema.validate_columns(names).map_err(|e| match e {
                    OracleError::SchemaMismatch(detail) => {
                        OracleError::SchemaMismatch(format!("{} model vs scaler: {}", target, detail))
                    }
                    other => other,
                })?;
            }
        }

        Ok(Self {
            scaler,
            mrr,
            churn,
            fingerprint: fingerprint.into(),
        })
    }

    pub fn schema(&self) -> &FeatureSchema {
        self.scaler.schema()
    }

    pub fn scaler(&self) -> &FeatureScaler {
        &self.scaler
    }

    pub fn model(&self, target: Target) -> &RegressionModel {
        match target {
            Target::Mrr => &self.mrr,
            Target::Churn => &self.churn,
        }
    }

    /// SHA-256 over the artifact files, hex encoded.
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Estimator, LinearModel};

    fn schema() -> FeatureSchema {
        FeatureSchema::new(vec!["a".into(), "b".into()]).unwrap()
    }

    fn linear(n: usize) -> RegressionModel {
        RegressionModel::new("m", Estimator::Linear(LinearModel::constant(n, 1.0)))
    }

    #[test]
    fn test_consistent_bundle_is_accepted() {
        let bundle = ModelBundle::new(
            FeatureScaler::identity(schema()),
            linear(2),
            linear(2).with_feature_names(vec!["a".into(), "b".into()]),
            "abc",
        )
        .unwrap();
        assert_eq!(bundle.schema().len(), 2);
        assert_eq!(bundle.fingerprint(), "abc");
    }

    #[test]
    fn test_model_width_must_match_scaler() {
        let err = ModelBundle::new(FeatureScaler::identity(schema()), linear(3), linear(2), "")
            .unwrap_err();
        assert!(matches!(
            err,
            OracleError::DimensionMismatch {
                expected: 2,
                got: 3
            }
        ));
    }

    #[test]
    fn test_model_feature_names_must_match_scaler() {
        let err = ModelBundle::new(
            FeatureScaler::identity(schema()),
            linear(2),
            linear(2).with_feature_names(vec!["b".into(), "a".into()]),
            "",
        )
        .unwrap_err();
        assert!(err.to_string().contains("Churn model vs scaler"), "{}", err);
    }
}
