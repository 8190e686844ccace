//! Oráculo forecast dashboard
//!
//! Loads the daily metrics table and the fitted artifacts, forecasts MRR and
//! churn for the next horizon, and prints the report to stdout.
//!
//! # Usage
//!
//! ```bash
//! # Run from a directory containing oraculo.toml (or with the default file names)
//! cargo run --bin oraculo
//!
//! # More detail on stderr
//! RUST_LOG=debug cargo run --bin oraculo
//!
//! # Debug output from the forecast engine only
//! RUST_LOG=oraculo::services=debug cargo run --bin oraculo
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Log filter, e.g. `debug` or `oraculo::explain=debug` (default: info)

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use oraculo::api::render;
use oraculo::config::OracleConfig;
use oraculo::io::{ArtifactLoader, MetricsLoader};
use oraculo::services::build_dashboard;

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout carries only the report
    FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    info!("Starting Oráculo");

    let config = OracleConfig::from_default_location().context("Failed to load configuration")?;

    // Everything is loaded before any forecast is attempted
    let bundle = ArtifactLoader::load_bundle(&config).context("Failed to load model artifacts")?;
    let table = MetricsLoader::load(&config).with_context(|| {
        format!(
            "Failed to load metrics table from {}",
            config.data_path().display()
        )
    })?;

    let report =
        build_dashboard(&table, &bundle, &config.forecast).context("Failed to compute forecast")?;
    let rendered = render(&report, &config.output).context("Failed to render report")?;

    println!("{}", rendered.trim_end());
    Ok(())
}
