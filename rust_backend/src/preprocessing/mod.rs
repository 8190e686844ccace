//! Preprocessing applied to raw features before prediction.

pub mod scaler;

pub use scaler::{FeatureScaler, ScalerKind};
