//! conversion-chart: daily and weekly conversion-rate chart for A/B tests.
//!
//! The crate keeps a strict split between pure data processing (`core`),
//! zoom state (`interaction`), chart state and frame building (`api`) and
//! drawing backends (`render`). Everything except the GTK adapter runs
//! headless, so the whole chart can be driven and rendered from tests.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

#[cfg(feature = "gtk4-adapter")]
pub mod platform_gtk;

pub use api::{ChartConfig, ChartController};
pub use error::{ChartError, ChartResult};
