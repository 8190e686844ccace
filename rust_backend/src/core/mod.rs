//! Core domain models for the forecast dashboard.
//!
//! This module defines the daily metrics table, the forecast targets and the
//! feature vectors that flow between the scaler and the models.

pub mod domain;
pub mod features;

pub use domain::{DailyRecord, MetricsTable, Target};
pub use features::{FeatureSchema, FeatureVector, ScaledFeatureVector};
