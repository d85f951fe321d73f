//! Pivoting of long-form measurements into chart series
//!
//! Two chart shapes are produced:
//! - [`GroupedBarChart`]: one bar group per category, one series per `(statistic, variant)`
//!   pair in a fixed legend order.
//! - [`FacetedLineChart`]: one facet per category, one percentile line per variant.
//!
//! Both pivots account for every selected record. A record that has no place in the
//! requested chart shape is an error rather than a silently missing bar.

use super::data_structures::{Measurement, MeasurementTable, Statistic, Variant};
use super::layout::ChartLayout;
use super::palette::{bar_color, line_color, HexColor};
use serde::Serialize;
use thiserror::Error;

/// Errors that can occur while pivoting a table into chart series
#[derive(Error, Debug, PartialEq)]
pub enum PivotError {
    #[error("No measurements found for '{0}'")]
    EmptySelection(String),

    #[error("{statistic} ({variant}) value for '{category}' has no series in this chart")]
    UnplacedMeasurement {
        category: String,
        statistic: Statistic,
        variant: Variant,
    },

    #[error("Missing {statistic} ({variant}) value for '{category}'")]
    MissingValue {
        category: String,
        statistic: Statistic,
        variant: Variant,
    },

    #[error("Series {0} is listed more than once")]
    DuplicateSeries(String),

    #[error("A facet grid needs at least one column, got {0}")]
    InvalidGrid(usize),
}

type Result<T> = core::result::Result<T, PivotError>;

/// Identifies a bar series by the statistic and variant it shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SeriesKey {
    pub statistic: Statistic,
    pub variant: Variant,
}

impl SeriesKey {
    pub const fn new(statistic: Statistic, variant: Variant) -> Self {
        Self { statistic, variant }
    }

    /// Legend entry, e.g. `Median (Compose)`.
    pub fn name(&self) -> String {
        format!("{} ({})", self.statistic, self.variant)
    }

    pub fn color(&self) -> HexColor {
        bar_color(self.statistic, self.variant)
    }

    fn of(record: &Measurement) -> Self {
        Self::new(record.statistic, record.variant)
    }
}

/// Legend order of every min/median/max bar chart.
pub const STAT_VARIANT_ORDER: [SeriesKey; 6] = [
    SeriesKey::new(Statistic::Min, Variant::Xml),
    SeriesKey::new(Statistic::Median, Variant::Xml),
    SeriesKey::new(Statistic::Max, Variant::Xml),
    SeriesKey::new(Statistic::Min, Variant::Compose),
    SeriesKey::new(Statistic::Median, Variant::Compose),
    SeriesKey::new(Statistic::Max, Variant::Compose),
];

/// One legend entry of a grouped bar chart, with a value slot per category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarSeries {
    pub key: SeriesKey,
    pub name: String,
    pub color: HexColor,
    /// Aligned with [`GroupedBarChart::categories`]. `None` draws no bar.
    pub values: Vec<Option<f64>>,
}

/// Bars grouped by category, with series in a fixed legend order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupedBarChart {
    pub name: String,
    pub layout: ChartLayout,
    pub categories: Vec<String>,
    pub series: Vec<BarSeries>,
}

impl GroupedBarChart {
    /// Pivots the records of `sub_category` into grouped bars.
    ///
    /// # Arguments
    /// * `name` - Chart identifier, also used as the output file stem
    /// * `table` - Source measurements
    /// * `sub_category` - Selects the records shown in this chart
    /// * `order` - Legend order; each key becomes one series
    /// * `layout` - Presentation settings carried along with the data
    ///
    /// # Returns
    /// * `Ok(GroupedBarChart)` - Categories in first-appearance order, series in `order`
    /// * `Err(PivotError)` - If the selection is empty, `order` repeats a key, or a record
    ///   has no series in `order`
    pub fn pivot(
        name: impl Into<String>,
        table: &MeasurementTable,
        sub_category: &str,
        order: &[SeriesKey],
        layout: ChartLayout,
    ) -> Result<Self> {
        ensure_unique(order.iter().map(SeriesKey::name))?;

        let mut selected = table.select(Some(sub_category)).peekable();
        if selected.peek().is_none() {
            return Err(PivotError::EmptySelection(sub_category.to_string()));
        }

        if let Some(record) = selected.find(|r| !order.contains(&SeriesKey::of(r))) {
            return Err(PivotError::UnplacedMeasurement {
                category: record.category.clone(),
                statistic: record.statistic,
                variant: record.variant,
            });
        }

        let categories = table.categories(Some(sub_category));
        let series = order
            .iter()
            .map(|key| BarSeries {
                key: *key,
                name: key.name(),
                color: key.color(),
                values: categories
                    .iter()
                    .map(|category| table.get(category, sub_category, key.variant, key.statistic))
                    .collect(),
            })
            .collect();

        Ok(Self {
            name: name.into(),
            layout,
            categories,
            series,
        })
    }

    /// Number of bars that will be drawn.
    pub fn placed_values(&self) -> usize {
        self.series
            .iter()
            .map(|s| s.values.iter().flatten().count())
            .sum()
    }

    /// Largest value across all series.
    pub fn max_value(&self) -> Option<f64> {
        self.series
            .iter()
            .flat_map(|s| s.values.iter().flatten().copied())
            .reduce(f64::max)
    }
}

/// A percentile line of one variant inside a facet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PercentileLine {
    pub variant: Variant,
    pub name: String,
    pub color: HexColor,
    /// Aligned with [`FacetedLineChart::x_labels`].
    pub values: Vec<f64>,
    /// Only the first facet contributes legend entries.
    pub show_legend: bool,
}

/// One sub-chart of a [`FacetedLineChart`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Facet {
    pub category: String,
    pub title: String,
    pub row: usize,
    pub column: usize,
    pub lines: Vec<PercentileLine>,
}

/// A grid of percentile line charts, one facet per category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FacetedLineChart {
    pub name: String,
    pub layout: ChartLayout,
    pub x_labels: Vec<String>,
    pub rows: usize,
    pub columns: usize,
    pub facets: Vec<Facet>,
}

/// Settings for [`FacetedLineChart::pivot`].
pub struct FacetSpec<'a> {
    /// Selects the records shown in this chart.
    pub sub_category: &'a str,
    /// Line order inside each facet.
    pub variants: &'a [Variant],
    /// Shared x-axis.
    pub percentiles: &'a [Statistic],
    /// Number of facets per grid row.
    pub columns: usize,
    /// Builds a facet title from its category.
    pub facet_title: fn(&str) -> String,
}

impl FacetedLineChart {
    /// Pivots the records of `spec.sub_category` into a grid of percentile charts.
    ///
    /// # Returns
    /// * `Ok(FacetedLineChart)` - Facets in first-appearance order, laid out row-major
    /// * `Err(PivotError)` - If the grid has no columns, the selection is empty, a record
    ///   has no place in the grid, or a variant is missing a percentile
    pub fn pivot(
        name: impl Into<String>,
        table: &MeasurementTable,
        spec: &FacetSpec<'_>,
        layout: ChartLayout,
    ) -> Result<Self> {
        if spec.columns == 0 {
            return Err(PivotError::InvalidGrid(spec.columns));
        }

        ensure_unique(spec.variants.iter().map(|v| v.label().to_string()))?;
        ensure_unique(spec.percentiles.iter().map(|p| p.label().to_string()))?;

        let mut selected = table.select(Some(spec.sub_category)).peekable();
        if selected.peek().is_none() {
            return Err(PivotError::EmptySelection(spec.sub_category.to_string()));
        }

        if let Some(record) = selected.find(|r| {
            !spec.variants.contains(&r.variant) || !spec.percentiles.contains(&r.statistic)
        }) {
            return Err(PivotError::UnplacedMeasurement {
                category: record.category.clone(),
                statistic: record.statistic,
                variant: record.variant,
            });
        }

        let categories = table.categories(Some(spec.sub_category));
        let mut facets = Vec::with_capacity(categories.len());
        for (index, category) in categories.into_iter().enumerate() {
            let mut lines = Vec::with_capacity(spec.variants.len());
            for &variant in spec.variants {
                let values = spec
                    .percentiles
                    .iter()
                    .map(|&statistic| {
                        table
                            .get(&category, spec.sub_category, variant, statistic)
                            .ok_or_else(|| PivotError::MissingValue {
                                category: category.clone(),
                                statistic,
                                variant,
                            })
                    })
                    .collect::<Result<Vec<f64>>>()?;

                lines.push(PercentileLine {
                    variant,
                    name: variant.label().to_string(),
                    color: line_color(variant),
                    values,
                    show_legend: index == 0,
                });
            }

            facets.push(Facet {
                title: (spec.facet_title)(&category),
                category,
                row: index / spec.columns,
                column: index % spec.columns,
                lines,
            });
        }

        Ok(Self {
            name: name.into(),
            layout,
            x_labels: spec
                .percentiles
                .iter()
                .map(|p| p.label().to_string())
                .collect(),
            rows: facets.len().div_ceil(spec.columns),
            columns: spec.columns,
            facets,
        })
    }

    /// Legend entries of the whole figure, in drawing order.
    pub fn legend_entries(&self) -> Vec<&str> {
        self.facets
            .iter()
            .flat_map(|f| f.lines.iter())
            .filter(|l| l.show_legend)
            .map(|l| l.name.as_str())
            .collect()
    }

    /// Largest value across all facets.
    pub fn max_value(&self) -> Option<f64> {
        self.facets
            .iter()
            .flat_map(|f| f.lines.iter())
            .flat_map(|l| l.values.iter().copied())
            .reduce(f64::max)
    }
}

fn ensure_unique(names: impl Iterator<Item = String>) -> Result<()> {
    let mut seen: Vec<String> = Vec::new();
    for name in names {
        if seen.contains(&name) {
            return Err(PivotError::DuplicateSeries(name));
        }
        seen.push(name);
    }
    Ok(())
}
