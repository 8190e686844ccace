//! Domain models for the daily business-metrics table.
//!
//! A [`MetricsTable`] owns the ordered feature column names and the daily
//! records sorted by date. It is built once from the CSV source and never
//! mutated afterwards.

use std::collections::HashSet;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::features::FeatureVector;
use crate::error::{OracleError, Result};

/// The two forecast targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Target {
    /// Monthly recurring revenue, in currency units.
    Mrr,
    /// Churn, in percent.
    Churn,
}

impl Target {
    pub fn label(&self) -> &'static str {
        match self {
            Target::Mrr => "MRR",
            Target::Churn => "Churn",
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One row of the metrics table.
///
/// `features` are stored in the column order of the owning [`MetricsTable`].
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use oraculo::core::domain::{DailyRecord, Target};
///
/// let record = DailyRecord {
///     date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
///     features: vec![1.0, 2.0],
///     mrr_total: 1200.0,
///     churn_total: 2.5,
/// };
/// assert_eq!(record.target(Target::Mrr), 1200.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DailyRecord {
    pub date: NaiveDate,
    pub features: Vec<f64>,
    pub mrr_total: f64,
    pub churn_total: f64,
}

impl DailyRecord {
    /// Returns the value of the given target column.
    pub fn target(&self, target: Target) -> f64 {
        match target {
            Target::Mrr => self.mrr_total,
            Target::Churn => self.churn_total,
        }
    }
}

/// Daily records sorted by date ascending, with unique dates.
#[derive(Debug, Clone)]
pub struct MetricsTable {
    feature_names: Vec<String>,
    records: Vec<DailyRecord>,
}

impl MetricsTable {
    /// Builds a table, sorting records by date.
    ///
    /// # Errors
    ///
    /// * [`OracleError::EmptyTable`] if `records` is empty
    /// * [`OracleError::DuplicateDate`] if two records share a date
    /// * [`OracleError::DimensionMismatch`] if a record's feature count differs
    ///   from `feature_names`
    pub fn new(feature_names: Vec<String>, mut records: Vec<DailyRecord>) -> Result<Self> {
        if records.is_empty() {
            return Err(OracleError::EmptyTable);
        }

        if let Some(bad) = records
            .iter()
            .find(|r| r.features.len() != feature_names.len())
        {
            return Err(OracleError::DimensionMismatch {
                expected: feature_names.len(),
                got: bad.features.len(),
            });
        }

        records.sort_by_key(|r| r.date);

        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            if !seen.insert(record.date) {
                return Err(OracleError::DuplicateDate(record.date));
            }
        }

        Ok(Self {
            feature_names,
            records,
        })
    }

    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    pub fn records(&self) -> &[DailyRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The most recent record. Never fails because construction rejects empty tables.
    pub fn latest(&self) -> &DailyRecord {
        &self.records[self.records.len() - 1]
    }

    /// Feature values of the most recent record, paired with their column names.
    pub fn latest_features(&self) -> FeatureVector {
        FeatureVector::new(self.feature_names.clone(), self.latest().features.clone())
    }

    /// Target values in date order.
    pub fn target_series(&self, target: Target) -> Vec<f64> {
        self.records.iter().map(|r| r.target(target)).collect()
    }
}
