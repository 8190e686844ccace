//! Startup loading of the metrics table and the fitted artifacts.

pub mod checksum;
pub mod loaders;


pub use loaders::{ArtifactLoader, MetricsLoader};
