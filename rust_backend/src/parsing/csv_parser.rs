use chrono::{NaiveDate, NaiveDateTime};
use polars::prelude::*;
use std::path::Path;

use crate::config::DataSettings;
use crate::core::domain::{DailyRecord, MetricsTable};
use crate::error::{OracleError, Result};

/// Parse a CSV file into a Polars DataFrame
pub fn read_metrics_csv(csv_path: &Path) -> Result<DataFrame> {
    if !csv_path.exists() {
        return Err(OracleError::io(
            csv_path,
            std::io::Error::new(std::io::ErrorKind::NotFound, "file does not exist"),
        ));
    }

    // Infer dtypes from every row: integer-looking prefixes must not pin a
    // column to i64 when decimals appear later
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .try_into_reader_with_file_path(Some(csv_path.into()))?
        .finish()?;

    Ok(df)
}

/// Parse the daily metrics CSV into a [`MetricsTable`]
pub fn parse_metrics_csv(csv_path: &Path, columns: &DataSettings) -> Result<MetricsTable> {
    let df = read_metrics_csv(csv_path)?;
    let table = dataframe_to_table(&df, columns)?;
    log::info!(
        "Loaded {} daily records with {} features from {}",
        table.len(),
        table.feature_names().len(),
        csv_path.display()
    );
    Ok(table)
}

/// Convert a Polars DataFrame to a [`MetricsTable`].
///
/// Every column other than the date and the two targets is a feature, kept in
/// file order.
pub fn dataframe_to_table(df: &DataFrame, columns: &DataSettings) -> Result<MetricsTable> {
    let column_names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();

    for required in [&columns.date_column, &columns.mrr_column, &columns.churn_column] {
        if !column_names.contains(required) {
            return Err(OracleError::MissingColumn {
                column: required.clone(),
            });
        }
    }

    let feature_names: Vec<String> = column_names
        .iter()
        .filter(|name| {
            **name != columns.date_column
                && **name != columns.mrr_column
                && **name != columns.churn_column
        })
        .cloned()
        .collect();

    let height = df.height();

    let dates = df.column(&columns.date_column)?.cast(&DataType::String)?;
    let dates = dates.str()?;
    let mrr = numeric_column(df, &columns.mrr_column, height)?;
    let churn = numeric_column(df, &columns.churn_column, height)?;
    let features = feature_names
        .iter()
        .map(|name| numeric_column(df, name, height))
        .collect::<Result<Vec<_>>>()?;

    let mut records = Vec::with_capacity(height);
    for i in 0..height {
        let raw_date = dates.get(i).ok_or_else(|| OracleError::InvalidDate {
            value: String::new(),
            row: i,
        })?;

        records.push(DailyRecord {
            date: parse_date(raw_date, i)?,
            features: features.iter().map(|col| col[i]).collect(),
            mrr_total: mrr[i],
            churn_total: churn[i],
        });
    }

    MetricsTable::new(feature_names, records)
}

/// Extract a column as `f64`, failing on nulls and non-numeric cells.
fn numeric_column(df: &DataFrame, name: &str, height: usize) -> Result<Vec<f64>> {
    let casted = df.column(name)?.cast(&DataType::Float64)?;
    let values = casted.f64()?;

    (0..height)
        .map(|i| {
            values
                .get(i)
                .filter(|v| v.is_finite())
                .ok_or_else(|| OracleError::MissingValue {
                    column: name.to_string(),
                    row: i,
                })
        })
        .collect()
}

/// Accepts `YYYY-MM-DD`, `YYYY-MM-DD HH:MM:SS` (ISO `T` separator too) and `DD/MM/YYYY`.
pub(crate) fn parse_date(raw: &str, row: usize) -> Result<NaiveDate> {
    let trimmed = raw.trim();

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(datetime.date());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%d/%m/%Y") {
        return Ok(date);
    }

    Err(OracleError::InvalidDate {
        value: raw.to_string(),
        row,
    })
}
