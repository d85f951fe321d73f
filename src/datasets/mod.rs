//! Benchmark results of the PaintBooth XML and Compose builds
//!
//! Every dataset exposes a `table()` holding its measurements and a `charts()` that
//! pivots that table into the figures for the benchmark.

pub mod memory;
pub mod scroll;
pub mod startup;
pub mod ui_response;

use crate::common::data_structures::TableError;
use crate::common::{
    Chart, ChartLayout, FacetSpec, FacetedLineChart, GroupedBarChart, MeasurementTable, PivotError,
    Statistic, Variant, STAT_VARIANT_ORDER,
};
use thiserror::Error;

/// Errors that can occur while assembling the datasets
#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("Invalid measurement: {0}")]
    Table(#[from] TableError),

    #[error("Unable to build chart: {0}")]
    Pivot(#[from] PivotError),
}

pub(crate) type Result<T> = core::result::Result<T, DatasetError>;

/// Frame metrics shared by the scroll and UI response benchmarks.
pub const FRAME_COUNT: &str = "frameCount";
pub const FRAME_CPU_DURATION: &str = "frameDurationCpuMs";
pub const FRAME_OVERRUN: &str = "frameOverrunMs";

type TableFn = fn() -> Result<MeasurementTable>;
type ChartsFn = fn(&MeasurementTable) -> Result<Vec<Chart>>;

const DATASETS: [(&str, TableFn, ChartsFn); 4] = [
    ("startup", startup::table, startup::charts),
    ("memory", memory::table, memory::charts),
    ("scroll", scroll::table, scroll::charts),
    ("ui_response", ui_response::table, ui_response::charts),
];

/// Tables of the datasets that produced at least one of `charts`, keyed by dataset name.
///
/// Chart names start with the name of their dataset, e.g. `scroll_frame_count`.
pub fn datasets_for(charts: &[Chart]) -> Result<Vec<(&'static str, MeasurementTable)>> {
    DATASETS
        .iter()
        .filter(|(name, _, _)| charts.iter().any(|c| belongs_to(c, name)))
        .map(|&(name, table, _)| table().map(|table| (name, table)))
        .collect()
}

fn belongs_to(chart: &Chart, dataset: &str) -> bool {
    matches!(chart.name().strip_prefix(dataset), Some(rest) if rest.starts_with('_'))
}

/// Every chart, in the order they are rendered.
pub fn catalogue() -> Result<Vec<Chart>> {
    let mut charts = Vec::new();
    for (_, table, build) in DATASETS {
        charts.extend(build(&table()?)?);
    }
    Ok(charts)
}

/// Min/median/max frame count bars.
pub(crate) fn frame_count_chart(
    name: &str,
    table: &MeasurementTable,
    sub_category: &str,
    layout: ChartLayout,
) -> Result<Chart> {
    Ok(GroupedBarChart::pivot(name, table, sub_category, &STAT_VARIANT_ORDER, layout)?.into())
}

/// P50..P99 lines of one frame metric, one facet per category.
pub(crate) fn percentile_chart(
    name: &str,
    table: &MeasurementTable,
    sub_category: &str,
    columns: usize,
    facet_title: fn(&str) -> String,
    layout: ChartLayout,
) -> Result<Chart> {
    let spec = FacetSpec {
        sub_category,
        variants: &Variant::ALL,
        percentiles: &Statistic::PERCENTILES,
        columns,
        facet_title,
    };
    Ok(FacetedLineChart::pivot(name, table, &spec, layout)?.into())
}
