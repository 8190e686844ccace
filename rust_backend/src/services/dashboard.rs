//! Dashboard service: one forecast run from loaded inputs to a report.

use crate::api::types::{DashboardReport, InputFeature, TargetSummary};
use crate::config::ForecastSettings;
use crate::core::domain::{MetricsTable, Target};
use crate::error::Result;
use crate::explain::explain;
use crate::models::ModelBundle;
use crate::services::forecast::{forecast, trailing_mean, Delta, ForecastPair};

/// Runs the forecast engine on the latest row of `table` and assembles the report.
pub fn build_dashboard(
    table: &MetricsTable,
    bundle: &ModelBundle,
    settings: &ForecastSettings,
) -> Result<DashboardReport> {
    let latest = table.latest_features();
    let pair = forecast(&latest, bundle)?;

    let baseline_rows = table.len().min(settings.baseline_window);
    if baseline_rows < settings.baseline_window {
        log::warn!(
            "Only {} daily records available; baseline uses all of them instead of {}",
            table.len(),
            settings.baseline_window
        );
    }

    let mrr = summarize(Target::Mrr, table, bundle, &pair, settings)?;
    let churn = summarize(Target::Churn, table, bundle, &pair, settings)?;

    let inputs = latest
        .iter()
        .map(|(name, value)| InputFeature {
            name: name.to_string(),
            value,
        })
        .collect();

    Ok(DashboardReport {
        as_of: table.latest().date,
        horizon_days: settings.horizon_days,
        history_rows: table.len(),
        baseline_window: settings.baseline_window,
        baseline_rows,
        mrr,
        churn,
        inputs,
        fingerprint: bundle.fingerprint().to_string(),
    })
}

fn summarize(
    target: Target,
    table: &MetricsTable,
    bundle: &ModelBundle,
    pair: &ForecastPair,
    settings: &ForecastSettings,
) -> Result<TargetSummary> {
    let model = bundle.model(target);
    let forecast = pair.get(target).value;

    let baseline = trailing_mean(&table.target_series(target), settings.baseline_window);
    let delta = Delta::against(forecast, baseline);
    if !delta.is_defined() {
        log::warn!(
            "{} baseline is {:?}; delta reported as undefined",
            target,
            baseline
        );
    }

    let drivers = explain(model, &pair.scaled, settings.top_features)?;

    Ok(TargetSummary {
        target,
        forecast,
        baseline,
        delta,
        drivers,
        quality: model.quality,
    })
}
