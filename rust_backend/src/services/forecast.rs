//! Forecast engine: scale, predict, and compare against a trailing baseline.

use serde::Serialize;

use crate::core::domain::Target;
use crate::core::features::{FeatureVector, ScaledFeatureVector};
use crate::error::{OracleError, Result};
use crate::models::{ModelBundle, Regressor};

/// Point prediction for one target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Forecast {
    pub target: Target,
    pub value: f64,
}

/// Both forecasts plus the scaled row they were computed from.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastPair {
    pub scaled: ScaledFeatureVector,
    pub mrr: Forecast,
    pub churn: Forecast,
}

impl ForecastPair {
    pub fn get(&self, target: Target) -> Forecast {
        match target {
            Target::Mrr => self.mrr,
            Target::Churn => self.churn,
        }
    }
}

/// Scales `latest` and runs both models on it.
///
/// # Errors
///
/// * [`OracleError::SchemaMismatch`] if `latest` does not carry exactly the
///   bundle's feature columns in order
/// * [`OracleError::NonFiniteForecast`] if a model returns NaN or infinity
pub fn forecast(latest: &FeatureVector, bundle: &ModelBundle) -> Result<ForecastPair> {
    bundle.schema().validate_columns(latest.names())?;

    let scaled = bundle.scaler().transform(latest)?;
    log::debug!("Scaled features: {:?}", scaled.values());

    let predict = |target: Target| -> Result<Forecast> {
        let value = bundle.model(target).predict(scaled.values());
        log::debug!("{} raw prediction: {}", target, value);
        if !value.is_finite() {
            return Err(OracleError::NonFiniteForecast { target, value });
        }
        Ok(Forecast { target, value })
    };

    let mrr = predict(Target::Mrr)?;
    let churn = predict(Target::Churn)?;

    Ok(ForecastPair { scaled, mrr, churn })
}

/// Mean of the last `window` values, or of all values when fewer exist.
///
/// Returns `None` for an empty series or a zero window.
///
/// # Examples
///
/// ```
/// use oraculo::services::forecast::trailing_mean;
///
/// assert_eq!(trailing_mean(&[1.0, 2.0, 3.0, 4.0], 2), Some(3.5));
/// assert_eq!(trailing_mean(&[2.0, 4.0], 14), Some(3.0));
/// assert_eq!(trailing_mean(&[], 14), None);
/// ```
pub fn trailing_mean(values: &[f64], window: usize) -> Option<f64> {
    if values.is_empty() || window == 0 {
        return None;
    }
    let tail = &values[values.len().saturating_sub(window)..];
    Some(tail.iter().sum::<f64>() / tail.len() as f64)
}

/// Percentage change of a forecast against its baseline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Delta {
    Defined { percent: f64 },
    /// The baseline is missing or zero.
    Undefined,
}

impl Delta {
    /// `(forecast - baseline) / baseline * 100`, or [`Delta::Undefined`] when
    /// that is not a finite number.
    ///
    /// # Examples
    ///
    /// ```
    /// use oraculo::services::forecast::Delta;
    ///
    /// assert_eq!(Delta::against(110.0, Some(100.0)).percent().map(|p| p.round()), Some(10.0));
    /// assert_eq!(Delta::against(5.0, Some(0.0)), Delta::Undefined);
    /// ```
    pub fn against(forecast: f64, baseline: Option<f64>) -> Self {
        match baseline {
            Some(base) if base != 0.0 => {
                let percent = (forecast - base) / base * 100.0;
                if percent.is_finite() {
                    Delta::Defined { percent }
                } else {
                    Delta::Undefined
                }
            }
            _ => Delta::Undefined,
        }
    }

    pub fn percent(&self) -> Option<f64> {
        match self {
            Delta::Defined { percent } => Some(*percent),
            Delta::Undefined => None,
        }
    }

    pub fn is_defined(&self) -> bool {
        matches!(self, Delta::Defined { .. })
    }
}
