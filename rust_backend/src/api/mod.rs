//! # API Module
//!
//! Presentation layer of the dashboard. The engine hands over a
//! [`DashboardReport`]; this module turns it into text or JSON for stdout.
//!
//! - [`types`]: serializable report DTOs
//! - [`render`]: text layout and number formatting

pub mod render;
pub mod types;

pub use render::{render, render_json, render_text};
pub use types::*;
