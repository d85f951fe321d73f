//! # PaintBooth Charts
//! Comparison charts for the XML and Compose builds of the PaintBooth prototype.
//!
//! Benchmark results are stored as a long-form [`common::MeasurementTable`] and pivoted
//! into either grouped bar charts (min/median/max) or faceted percentile line charts,
//! which are then rendered to PNG or SVG.

/// Table, pivot, layout and rendering infrastructure shared by all charts.
pub mod common;

/// The benchmark results and the charts built from them.
pub mod datasets;
