//! Report types produced by the dashboard service.
//!
//! Everything here is plain data with `Serialize`, so the same report feeds
//! both the text renderer and the JSON output.

use chrono::NaiveDate;
use serde::Serialize;

use crate::core::domain::Target;
use crate::explain::AttributionRanking;
use crate::models::QualityMetrics;
use crate::services::forecast::Delta;

/// Forecast, baseline comparison and drivers for one target.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TargetSummary {
    pub target: Target,
    pub forecast: f64,
    /// Trailing mean of the target over the baseline rows.
    pub baseline: Option<f64>,
    pub delta: Delta,
    pub drivers: AttributionRanking,
    /// Recorded when the model was fitted, not recomputed here.
    pub quality: Option<QualityMetrics>,
}

/// One raw input value shown next to the forecast.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InputFeature {
    pub name: String,
    pub value: f64,
}

/// Everything the dashboard displays for one run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardReport {
    /// Date of the row the forecast is computed from.
    pub as_of: NaiveDate,
    pub horizon_days: u32,
    /// Rows in the metrics table.
    pub history_rows: usize,
    /// Configured baseline window.
    pub baseline_window: usize,
    /// Rows actually averaged; below the window when history is short.
    pub baseline_rows: usize,
    pub mrr: TargetSummary,
    pub churn: TargetSummary,
    pub inputs: Vec<InputFeature>,
    pub fingerprint: String,
}

impl DashboardReport {
    pub fn summary(&self, target: Target) -> &TargetSummary {
        match target {
            Target::Mrr => &self.mrr,
            Target::Churn => &self.churn,
        }
    }
}
