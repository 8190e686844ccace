//! Text and JSON rendering of a [`DashboardReport`].

use std::fmt::Write as _;

use crate::api::types::{DashboardReport, TargetSummary};
use crate::config::{OutputFormat, OutputSettings};
use crate::error::Result;
use crate::explain::AttributionRanking;
use crate::models::QualityMetrics;
use crate::services::forecast::Delta;

/// Renders `report` in the format chosen by `settings`.
pub fn render(report: &DashboardReport, settings: &OutputSettings) -> Result<String> {
    match settings.format {
        OutputFormat::Text => Ok(render_text(report, &settings.currency_symbol)),
        OutputFormat::Json => render_json(report),
    }
}

pub fn render_json(report: &DashboardReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Plain-text dashboard, one section per panel.
pub fn render_text(report: &DashboardReport, currency: &str) -> String {
    let mut out = String::new();

    // writeln! into a String cannot fail
    let _ = writeln!(
        out,
        "Oráculo: {}-day MRR and churn forecast (latest data {})",
        report.horizon_days, report.as_of
    );
    let _ = writeln!(out);

    let baseline_label = baseline_label(report);
    let _ = writeln!(
        out,
        "MRR forecast:   {}  ({} vs {})",
        format_currency(report.mrr.forecast, currency),
        format_delta(&report.mrr.delta),
        baseline_label
    );
    let _ = writeln!(
        out,
        "Churn forecast: {}  ({} vs {})",
        format_churn(report.churn.forecast),
        format_delta(&report.churn.delta),
        baseline_label
    );

    for summary in [&report.mrr, &report.churn] {
        let _ = writeln!(out);
        write_drivers(&mut out, summary);
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Model quality");
    let _ = writeln!(
        out,
        "  MRR   -> {}",
        report
            .mrr
            .quality
            .map(|q| format_mrr_quality(&q, currency))
            .unwrap_or_else(|| "not recorded".to_string())
    );
    let _ = writeln!(
        out,
        "  Churn -> {}",
        report
            .churn
            .quality
            .map(|q| format_churn_quality(&q))
            .unwrap_or_else(|| "not recorded".to_string())
    );

    let _ = writeln!(out);
    let _ = writeln!(out, "Input features");
    let width = report
        .inputs
        .iter()
        .map(|f| f.name.chars().count())
        .max()
        .unwrap_or(0);
    for feature in &report.inputs {
        let _ = writeln!(out, "  {:<width$}  {}", feature.name, feature.value);
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Artifact fingerprint: {}", report.fingerprint);
    out
}

fn baseline_label(report: &DashboardReport) -> String {
    if report.baseline_rows < report.baseline_window {
        format!("{}-row mean, short history", report.baseline_rows)
    } else {
        format!("{}-day mean", report.baseline_window)
    }
}

fn write_drivers(out: &mut String, summary: &TargetSummary) {
    let _ = writeln!(out, "Top drivers of the {} forecast", summary.target);
    write_ranking(out, &summary.drivers);
}

fn write_ranking(out: &mut String, ranking: &AttributionRanking) {
    if ranking.entries.is_empty() {
        let _ = writeln!(out, "  (no features)");
        return;
    }
    for entry in &ranking.entries {
        let _ = writeln!(
            out,
            "  {} {}: {} the forecast by {:.2}",
            entry.direction.arrow(),
            entry.feature,
            entry.direction,
            entry.magnitude()
        );
    }
}

/// Currency with thousands separators and no decimals: `R$ 1,234,567`,
/// `R$ -45,000`.
pub fn format_currency(value: f64, symbol: &str) -> String {
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{} {}{}", symbol, sign, group_thousands(&digits))
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Signed percentage with two decimals, or `n/a`.
pub fn format_delta(delta: &Delta) -> String {
    match delta.percent() {
        Some(percent) => format!("{:+.2}%", percent),
        None => "n/a".to_string(),
    }
}

/// Churn is already expressed in percent.
pub fn format_churn(value: f64) -> String {
    format!("{:.2}%", value)
}

pub fn format_mrr_quality(quality: &QualityMetrics, symbol: &str) -> String {
    format!(
        "MAE: {} | R²: {:.3}",
        format_currency(quality.mae, symbol),
        quality.r2
    )
}

pub fn format_churn_quality(quality: &QualityMetrics) -> String {
    format!("MAE: {:.3} p.p. | R²: {:.3}", quality.mae, quality.r2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(1000.0, "R$"), "R$ 1,000");
        assert_eq!(format_currency(999.6, "R$"), "R$ 1,000");
        assert_eq!(format_currency(0.0, "R$"), "R$ 0");
        assert_eq!(format_currency(123.0, "$"), "$ 123");
        assert_eq!(format_currency(1_234_567.4, "R$"), "R$ 1,234,567");
        assert_eq!(format_currency(-45_000.0, "R$"), "R$ -45,000");
        assert_eq!(format_currency(-0.4, "R$"), "R$ 0");
    }

    #[test]
    fn test_format_delta() {
        assert_eq!(
            format_delta(&Delta::against(1000.0, Some(900.0))),
            "+11.11%"
        );
        assert_eq!(format_delta(&Delta::against(90.0, Some(100.0))), "-10.00%");
        assert_eq!(format_delta(&Delta::Undefined), "n/a");
    }

    #[test]
    fn test_quality_strings() {
        let mrr = QualityMetrics {
            mae: 29122.0,
            r2: 0.988,
        };
        let churn = QualityMetrics {
            mae: 0.049,
            r2: 0.995,
        };
        assert_eq!(format_mrr_quality(&mrr, "R$"), "MAE: R$ 29,122 | R²: 0.988");
        assert_eq!(format_churn_quality(&churn), "MAE: 0.049 p.p. | R²: 0.995");
    }

    #[test]
    fn test_format_churn() {
        assert_eq!(format_churn(2.3456), "2.35%");
    }
}
