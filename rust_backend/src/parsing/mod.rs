//! Parsers for the dashboard's input files.
//!
//! # Parsers
//!
//! - [`csv_parser`]: Parse the daily business-metrics table
//! - [`artifact_parser`]: Parse fitted scaler and model artifacts (JSON)
//!
//! # Example
//!
//! ```no_run
//! use oraculo::config::DataSettings;
//! use oraculo::parsing::csv_parser::parse_metrics_csv;
//! use std::path::Path;
//!
//! let table = parse_metrics_csv(Path::new("base_modelo_diario.csv"), &DataSettings::default())
//!     .expect("Failed to parse metrics table");
//! println!("{} rows", table.len());
//! ```

pub mod artifact_parser;
pub mod csv_parser;
