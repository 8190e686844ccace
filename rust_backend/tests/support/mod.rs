//! Shared fixtures for the integration tests: a temporary directory holding
//! an `oraculo.toml`, the three artifacts and a daily metrics CSV.

#![allow(dead_code)]

use std::fs;
use std::path::Path;

use chrono::{Days, NaiveDate};
use tempfile::TempDir;

use oraculo::api::DashboardReport;
use oraculo::config::OracleConfig;
use oraculo::io::{ArtifactLoader, MetricsLoader};
use oraculo::services::build_dashboard;

pub const IDENTITY_SCALER: &str =
    r#"{"feature_names": ["A", "B", "C"], "transform": {"kind": "identity"}}"#;

/// Always predicts 1000, whatever the inputs.
pub const CONSTANT_MRR_MODEL: &str = r#"{
    "name": "mrr",
    "feature_names": ["A", "B", "C"],
    "quality": {"mae": 29122.0, "r2": 0.988},
    "estimator": {"kind": "linear", "coefficients": [0.0, 0.0, 0.0], "intercept": 1000.0}
}"#;

/// 1 + 0.1·A + 0.2·B + 0.3·C, so 2.4 at A/B/C = 1/2/3.
pub const LINEAR_CHURN_MODEL: &str = r#"{
    "name": "churn",
    "feature_names": ["A", "B", "C"],
    "quality": {"mae": 0.049, "r2": 0.995},
    "estimator": {"kind": "linear", "coefficients": [0.1, 0.2, 0.3], "intercept": 1.0}
}"#;

/// Single stump on B: B <= 2.5 gives 2.0 (cover 3), otherwise 4.0 (cover 1).
pub const STUMP_CHURN_MODEL: &str = r#"{
    "name": "churn",
    "estimator": {
        "kind": "tree_ensemble",
        "n_features": 3,
        "trees": [{"nodes": [
            {"type": "split", "feature": 1, "threshold": 2.5, "left": 1, "right": 2, "cover": 4.0},
            {"type": "leaf", "value": 2.0, "cover": 3.0},
            {"type": "leaf", "value": 4.0, "cover": 1.0}
        ]}]
    }
}"#;

pub struct Fixture {
    pub dir: TempDir,
}

impl Fixture {
    /// Identity scaler, constant MRR model and linear churn model.
    pub fn new() -> Self {
        let fixture = Self {
            dir: TempDir::new().unwrap(),
        };
        fixture.write("oraculo.toml", "");
        fixture.write("scaler.json", IDENTITY_SCALER);
        fixture.write("modelo_mrr.json", CONSTANT_MRR_MODEL);
        fixture.write("modelo_churn.json", LINEAR_CHURN_MODEL);
        fixture
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn write(&self, name: &str, content: &str) {
        fs::write(self.dir.path().join(name), content).unwrap();
    }

    /// Writes the metrics CSV with one row per `mrr` entry, dated from
    /// 2024-01-01, every row carrying the same `features`.
    pub fn write_metrics(&self, features: &[(&str, f64)], mrr: &[f64], churn: f64) {
        self.write("base_modelo_diario.csv", &daily_csv(features, mrr, churn));
    }

    pub fn config(&self) -> OracleConfig {
        OracleConfig::from_file(self.dir.path().join("oraculo.toml")).unwrap()
    }

    pub fn run(&self) -> oraculo::Result<DashboardReport> {
        let config = self.config();
        let bundle = ArtifactLoader::load_bundle(&config)?;
        let table = MetricsLoader::load(&config)?;
        build_dashboard(&table, &bundle, &config.forecast)
    }
}

pub fn daily_csv(features: &[(&str, f64)], mrr: &[f64], churn: f64) -> String {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let mut csv = String::from("Data");
    for (name, _) in features {
        csv.push(',');
        csv.push_str(name);
    }
    csv.push_str(",MRR_Total,Churn_Total\n");

    for (i, value) in mrr.iter().enumerate() {
        let date = start + Days::new(i as u64);
        csv.push_str(&date.format("%Y-%m-%d").to_string());
        for (_, feature) in features {
            csv.push_str(&format!(",{}", feature));
        }
        csv.push_str(&format!(",{},{}\n", value, churn));
    }
    csv
}

/// 20 rows: six at 500 followed by fourteen at 900.
pub fn twenty_day_mrr() -> Vec<f64> {
    let mut mrr = vec![500.0; 6];
    mrr.extend(std::iter::repeat(900.0).take(14));
    mrr
}

pub const ABC: [(&str, f64); 3] = [("A", 1.0), ("B", 2.0), ("C", 3.0)];
