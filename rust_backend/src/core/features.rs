//! Feature schema and feature vectors.
//!
//! The scaler and both models are fitted on one ordered list of feature
//! columns. [`FeatureSchema`] names that list so every consumer can check a
//! vector against it instead of trusting column positions.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{OracleError, Result};

/// Ordered feature names a scaler and its models were fitted on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureSchema {
    names: Vec<String>,
}

impl FeatureSchema {
    /// Creates a schema, rejecting empty or duplicated names.
    ///
    /// # Examples
    ///
    /// ```
    /// use oraculo::core::features::FeatureSchema;
    ///
    /// let schema = FeatureSchema::new(vec!["leads".into(), "trials".into()]).unwrap();
    /// assert_eq!(schema.len(), 2);
    /// assert!(FeatureSchema::new(vec!["a".into(), "a".into()]).is_err());
    /// ```
    pub fn new(names: Vec<String>) -> Result<Self> {
        if names.is_empty() {
            return Err(OracleError::InvalidArtifact(
                "feature schema has no columns".to_string(),
            ));
        }
        let mut seen = HashSet::with_capacity(names.len());
        for name in &names {
            if !seen.insert(name.as_str()) {
                return Err(OracleError::InvalidArtifact(format!(
                    "feature '{}' appears more than once in schema",
                    name
                )));
            }
        }
        Ok(Self { names })
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Checks that `columns` are exactly the schema columns in schema order.
    ///
    /// The error message lists missing and unexpected columns, or the first
    /// position where the order differs when the sets agree.
    pub fn validate_columns(&self, columns: &[String]) -> Result<()> {
        if columns == self.names.as_slice() {
            return Ok(());
        }

        let expected: HashSet<&str> = self.names.iter().map(String::as_str).collect();
        let got: HashSet<&str> = columns.iter().map(String::as_str).collect();

        let missing: Vec<&str> = self
            .names
            .iter()
            .map(String::as_str)
            .filter(|n| !got.contains(n))
            .collect();
        let unexpected: Vec<&str> = columns
            .iter()
            .map(String::as_str)
            .filter(|n| !expected.contains(n))
            .collect();

        let mut parts = Vec::new();
        if !missing.is_empty() {
            parts.push(format!("missing columns [{}]", missing.join(", ")));
        }
        if !unexpected.is_empty() {
            parts.push(format!("unexpected columns [{}]", unexpected.join(", ")));
        }
        if parts.is_empty() {
            if columns.len() != self.names.len() {
                parts.push(format!(
                    "expected {} columns, got {} (duplicated names)",
                    self.names.len(),
                    columns.len()
                ));
            } else if let Some((pos, (want, have))) = self
                .names
                .iter()
                .zip(columns)
                .enumerate()
                .find(|(_, (a, b))| a != b)
            {
                parts.push(format!(
                    "column order differs at position {}: expected '{}', got '{}'",
                    pos, want, have
                ));
            }
        }

        Err(OracleError::SchemaMismatch(parts.join("; ")))
    }
}

/// Raw feature values of one row, paired with their column names.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureVector {
    names: Vec<String>,
    values: Vec<f64>,
}

impl FeatureVector {
    pub fn new(names: Vec<String>, values: Vec<f64>) -> Self {
        Self { names, values }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// `(name, value)` pairs in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.names
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }
}

/// A [`FeatureVector`] after the fitted scaler transform.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScaledFeatureVector {
    names: Vec<String>,
    values: Vec<f64>,
}

impl ScaledFeatureVector {
    pub(crate) fn new(names: Vec<String>, values: Vec<f64>) -> Self {
        Self { names, values }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_exact_match_is_valid() {
        let schema = FeatureSchema::new(names(&["a", "b", "c"])).unwrap();
        assert!(schema.validate_columns(&names(&["a", "b", "c"])).is_ok());
    }

    #[test]
    fn test_missing_and_unexpected_are_named() {
        let schema = FeatureSchema::new(names(&["a", "b", "c"])).unwrap();
        let err = schema
            .validate_columns(&names(&["a", "c", "z"]))
            .unwrap_err()
            .to_string();
        assert!(err.contains("missing columns [b]"), "{}", err);
        assert!(err.contains("unexpected columns [z]"), "{}", err);
    }

    #[test]
    fn test_reordered_columns_are_rejected() {
        let schema = FeatureSchema::new(names(&["a", "b", "c"])).unwrap();
        let err = schema
            .validate_columns(&names(&["a", "c", "b"]))
            .unwrap_err()
            .to_string();
        assert!(
            err.contains("position 1: expected 'b', got 'c'"),
            "{}",
            err
        );
    }

    #[test]
    fn test_empty_schema_is_rejected() {
        assert!(FeatureSchema::new(vec![]).is_err());
    }

    #[test]
    fn test_feature_vector_iterates_pairs() {
        let v = FeatureVector::new(names(&["a", "b"]), vec![1.0, 2.0]);
        let pairs: Vec<(&str, f64)> = v.iter().collect();
        assert_eq!(pairs, vec![("a", 1.0), ("b", 2.0)]);
    }
}
