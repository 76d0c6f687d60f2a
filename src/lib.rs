//! line-visual: time-series line chart visual for dashboard hosts.
//!
//! The host hands over categorical data, a viewport and a settings bag on
//! every update; the visual reshapes the data into per-series points, cuts
//! each series at the current selection and renders an SVG line chart.

pub mod api;
pub mod core;
pub mod error;
pub mod render;
pub mod telemetry;

pub use api::{LineChartVisual, VisualConfig, VisualSettings, VisualUpdateOptions};
pub use error::{ChartError, ChartResult};
