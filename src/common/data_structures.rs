//! Long-form measurement table shared by every chart
//!
//! Benchmark results are stored one value per record, keyed by
//! `(category, sub_category, variant, statistic)`. Wide rows from the embedded
//! datasets are expanded into this shape before pivoting.

use core::fmt;
use serde::Serialize;
use thiserror::Error;

/// UI implementation variant being benchmarked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Variant {
    /// Classic view system with XML layouts.
    #[serde(rename = "XML")]
    Xml,

    /// Jetpack Compose.
    Compose,
}

impl Variant {
    /// Variants in their declared order.
    pub const ALL: [Variant; 2] = [Variant::Xml, Variant::Compose];

    /// Label used in legends and tables.
    pub fn label(self) -> &'static str {
        match self {
            Variant::Xml => "XML",
            Variant::Compose => "Compose",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A precomputed statistic of a benchmark metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Statistic {
    Min,
    Median,
    Max,
    P50,
    P90,
    P95,
    P99,
}

impl Statistic {
    /// Summary statistics, in legend order.
    pub const SUMMARY: [Statistic; 3] = [Statistic::Min, Statistic::Median, Statistic::Max];

    /// Percentile markers, in x-axis order.
    pub const PERCENTILES: [Statistic; 4] = [
        Statistic::P50,
        Statistic::P90,
        Statistic::P95,
        Statistic::P99,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Statistic::Min => "Min",
            Statistic::Median => "Median",
            Statistic::Max => "Max",
            Statistic::P50 => "P50",
            Statistic::P90 => "P90",
            Statistic::P95 => "P95",
            Statistic::P99 => "P99",
        }
    }
}

impl fmt::Display for Statistic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single benchmark value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Measurement {
    /// Activity, memory metric or UI test name. Becomes an x-axis group or a facet.
    pub category: String,
    /// Startup mode or value column. Used to select the rows of one chart.
    pub sub_category: String,
    /// Implementation variant the value was measured on.
    pub variant: Variant,
    /// Which statistic of the metric this value is.
    pub statistic: Statistic,
    /// The measured value.
    pub value: f64,
}

/// Errors raised while building a [`MeasurementTable`]
#[derive(Error, Debug, PartialEq)]
pub enum TableError {
    #[error("Duplicate {statistic} value for {category}/{sub_category} ({variant})")]
    DuplicateMeasurement {
        category: String,
        sub_category: String,
        variant: Variant,
        statistic: Statistic,
    },

    #[error("Value {value} for {category}/{sub_category} ({variant}) is not finite")]
    NonFiniteValue {
        category: String,
        sub_category: String,
        variant: Variant,
        value: f64,
    },
}

type Result<T> = core::result::Result<T, TableError>;

/// Long-form table of measurements.
///
/// Holds at most one value per `(category, sub_category, variant, statistic)`.
/// Insertion order is preserved, and is what defines category order in charts.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MeasurementTable {
    records: Vec<Measurement>,
}

impl MeasurementTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a single value.
    ///
    /// # Errors
    /// * [`TableError::DuplicateMeasurement`] if the key already has a value.
    /// * [`TableError::NonFiniteValue`] for NaN or infinite values.
    pub fn push(
        &mut self,
        category: &str,
        sub_category: &str,
        variant: Variant,
        statistic: Statistic,
        value: f64,
    ) -> Result<()> {
        if !value.is_finite() {
            return Err(TableError::NonFiniteValue {
                category: category.to_string(),
                sub_category: sub_category.to_string(),
                variant,
                value,
            });
        }

        if self.get(category, sub_category, variant, statistic).is_some() {
            return Err(TableError::DuplicateMeasurement {
                category: category.to_string(),
                sub_category: sub_category.to_string(),
                variant,
                statistic,
            });
        }

        self.records.push(Measurement {
            category: category.to_string(),
            sub_category: sub_category.to_string(),
            variant,
            statistic,
            value,
        });
        Ok(())
    }

    /// Expands a `[min, median, max]` row into three records.
    pub fn push_summary(
        &mut self,
        category: &str,
        sub_category: &str,
        variant: Variant,
        values: [f64; 3],
    ) -> Result<()> {
        for (statistic, value) in Statistic::SUMMARY.into_iter().zip(values) {
            self.push(category, sub_category, variant, statistic, value)?;
        }
        Ok(())
    }

    /// Expands a `[p50, p90, p95, p99]` row into four records.
    pub fn push_percentiles(
        &mut self,
        category: &str,
        sub_category: &str,
        variant: Variant,
        values: [f64; 4],
    ) -> Result<()> {
        for (statistic, value) in Statistic::PERCENTILES.into_iter().zip(values) {
            self.push(category, sub_category, variant, statistic, value)?;
        }
        Ok(())
    }

    /// Looks up a single value.
    pub fn get(
        &self,
        category: &str,
        sub_category: &str,
        variant: Variant,
        statistic: Statistic,
    ) -> Option<f64> {
        self.records
            .iter()
            .find(|r| {
                r.category == category
                    && r.sub_category == sub_category
                    && r.variant == variant
                    && r.statistic == statistic
            })
            .map(|r| r.value)
    }

    /// Records whose sub-category matches `sub_category`, or all records for `None`.
    pub fn select<'a>(
        &'a self,
        sub_category: Option<&'a str>,
    ) -> impl Iterator<Item = &'a Measurement> + 'a {
        self.records
            .iter()
            .filter(move |r| sub_category.map_or(true, |s| r.sub_category == s))
    }

    /// Distinct categories among the selected records, in first-appearance order.
    pub fn categories(&self, sub_category: Option<&str>) -> Vec<String> {
        let mut categories: Vec<String> = Vec::new();
        for record in self.select(sub_category) {
            if !categories.iter().any(|c| *c == record.category) {
                categories.push(record.category.clone());
            }
        }
        categories
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
