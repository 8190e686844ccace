//! Fitted feature scalers.
//!
//! A scaler is a column-wise linear transform fitted elsewhere. The fitted
//! parameters come from the scaler artifact and are checked against the
//! feature schema when loaded.

use serde::{Deserialize, Serialize};

use crate::core::features::{FeatureSchema, FeatureVector, ScaledFeatureVector};
use crate::error::{OracleError, Result};

/// Fitted parameters of a scaler, one entry per feature column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScalerKind {
    /// Passes values through unchanged.
    Identity,
    /// `(x - mean) / scale`
    Standard { mean: Vec<f64>, scale: Vec<f64> },
    /// `x * scale + min`
    MinMax { min: Vec<f64>, scale: Vec<f64> },
    /// `(x - center) / scale`
    Robust { center: Vec<f64>, scale: Vec<f64> },
}

impl ScalerKind {
    fn parameter_lengths(&self) -> Vec<(&'static str, usize)> {
        match self {
            ScalerKind::Identity => vec![],
            ScalerKind::Standard { mean, scale } => vec![("mean", mean.len()), ("scale", scale.len())],
            ScalerKind::MinMax { min, scale } => vec![("min", min.len()), ("scale", scale.len())],
            ScalerKind::Robust { center, scale } => {
                vec![("center", center.len()), ("scale", scale.len())]
            }
        }
    }
}

/// A fitted scaler bound to the schema it was fitted on.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureScaler {
    schema: FeatureSchema,
    kind: ScalerKind,
}

impl FeatureScaler {
    /// Binds fitted parameters to a schema.
    ///
    /// # Errors
    ///
    /// Returns [`OracleError::InvalidArtifact`] if any parameter vector length
    /// differs from the schema length, or if a parameter is not finite.
    pub fn new(schema: FeatureSchema, kind: ScalerKind) -> Result<Self> {
        for (param, len) in kind.parameter_lengths() {
            if len != schema.len() {
                return Err(OracleError::InvalidArtifact(format!(
                    "scaler parameter '{}' has {} entries, schema has {} features",
                    param,
                    len,
                    schema.len()
                )));
            }
        }

        let all_finite = match &kind {
            ScalerKind::Identity => true,
            ScalerKind::Standard { mean: a, scale: b }
            | ScalerKind::MinMax { min: a, scale: b }
            | ScalerKind::Robust { center: a, scale: b } => {
                a.iter().chain(b.iter()).all(|v| v.is_finite())
            }
        };
        if !all_finite {
            return Err(OracleError::InvalidArtifact(
                "scaler parameters must be finite".to_string(),
            ));
        }

        Ok(Self { schema, kind })
    }

    /// A pass-through scaler over `schema`.
    pub fn identity(schema: FeatureSchema) -> Self {
        Self {
            schema,
            kind: ScalerKind::Identity,
        }
    }

    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    pub fn kind(&self) -> &ScalerKind {
        &self.kind
    }

    /// Applies the fitted transform.
    ///
    /// The vector's columns must match the scaler's schema exactly.
    pub fn transform(&self, features: &FeatureVector) -> Result<ScaledFeatureVector> {
        self.schema.validate_columns(features.names())?;

        let x = features.values();
        let values = match &self.kind {
            ScalerKind::Identity => x.to_vec(),
            ScalerKind::Standard { mean, scale } => x
                .iter()
                .zip(mean.iter().zip(scale))
                .map(|(&v, (&m, &s))| (v - m) / guard_scale(s))
                .collect(),
            ScalerKind::MinMax { min, scale } => x
                .iter()
                .zip(min.iter().zip(scale))
                .map(|(&v, (&lo, &s))| v * s + lo)
                .collect(),
            ScalerKind::Robust { center, scale } => x
                .iter()
                .zip(center.iter().zip(scale))
                .map(|(&v, (&c, &s))| (v - c) / guard_scale(s))
                .collect(),
        };

        Ok(ScaledFeatureVector::new(features.names().to_vec(), values))
    }
}

/// Constant columns are fitted with a zero scale; dividing by one leaves them centred.
fn guard_scale(scale: f64) -> f64 {
    if scale == 0.0 {
        1.0
    } else {
        scale
    }
}
