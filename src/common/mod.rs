//! Common infrastructure shared by every benchmark chart
//!
//! This module provides reusable infrastructure for:
//! - The long-form measurement table
//! - Colour assignments and figure layout
//! - Pivoting measurements into bar and line series
//! - Rendering charts and printing value tables

pub mod data_structures;
pub mod layout;
pub mod palette;
pub mod pivot;
pub mod plots;
pub mod tables;

// Re-export commonly used items
pub use data_structures::{MeasurementTable, Statistic, Variant};
pub use layout::{ChartLayout, ValueFormat};
pub use pivot::{FacetSpec, FacetedLineChart, GroupedBarChart, PivotError, STAT_VARIANT_ORDER};
pub use plots::{Chart, ImageFormat, PlotError};
