//! UI response benchmarks
//!
//! Repeatedly opens a dialog (`showDialog`) and rewrites the toolbar (`updateToolbar`),
//! recording the same frame metrics as the scroll benchmarks.

use super::{frame_count_chart, percentile_chart, Result};
use super::{FRAME_COUNT, FRAME_CPU_DURATION, FRAME_OVERRUN};
use crate::common::{Chart, ChartLayout, MeasurementTable, Variant};
use Variant::{Compose, Xml};

/// `(test, variant, [min, median, max])`
#[rustfmt::skip]
const FRAME_COUNTS: [(&str, Variant, [f64; 3]); 4] = [
    ("showDialog", Xml, [126.0, 135.0, 143.0]),
    ("showDialog", Compose, [60.0, 62.5, 67.0]),
    ("updateToolbar", Xml, [182.0, 187.0, 197.0]),
    ("updateToolbar", Compose, [55.0, 57.0, 60.0]),
];

/// `(metric, test, variant, [p50, p90, p95, p99])` in milliseconds.
#[rustfmt::skip]
const FRAME_TIMINGS: [(&str, &str, Variant, [f64; 4]); 8] = [
    (FRAME_CPU_DURATION, "showDialog", Xml, [26.9, 35.7, 41.4, 55.4]),
    (FRAME_CPU_DURATION, "showDialog", Compose, [19.1, 54.8, 69.9, 106.5]),
    (FRAME_CPU_DURATION, "updateToolbar", Xml, [27.3, 31.5, 34.7, 47.7]),
    (FRAME_CPU_DURATION, "updateToolbar", Compose, [22.5, 44.3, 49.2, 72.3]),

    (FRAME_OVERRUN, "showDialog", Xml, [18.1, 94.6, 145.2, 206.4]),
    (FRAME_OVERRUN, "showDialog", Compose, [15.3, 176.2, 229.8, 459.3]),
    (FRAME_OVERRUN, "updateToolbar", Xml, [13.0, 27.3, 30.9, 914.1]),
    (FRAME_OVERRUN, "updateToolbar", Compose, [11.9, 38.1, 49.1, 519.2]),
];

/// Builds the UI response benchmark table.
pub fn table() -> Result<MeasurementTable> {
    let mut table = MeasurementTable::new();
    for (test, variant, values) in FRAME_COUNTS {
        table.push_summary(test, FRAME_COUNT, variant, values)?;
    }
    for (metric, test, variant, values) in FRAME_TIMINGS {
        table.push_percentiles(test, metric, variant, values)?;
    }
    Ok(table)
}

fn facet_title(test: &str) -> String {
    format!("{} Test", test)
}

fn timing_layout(title: &str) -> ChartLayout {
    ChartLayout::new(title, 900, 400).axes("", "(ms)")
}

/// Builds the frame count chart and the two side-by-side frame timing charts.
pub fn charts(table: &MeasurementTable) -> Result<Vec<Chart>> {
    let frame_count_layout = ChartLayout::new("UI Response Frame Count (XML vs Compose)", 700, 400)
        .axes("UI Response Test", "frameCount")
        .title_size(22);

    Ok(vec![
        frame_count_chart("ui_response_frame_count", table, FRAME_COUNT, frame_count_layout)?,
        percentile_chart(
            "ui_response_frame_cpu_duration",
            table,
            FRAME_CPU_DURATION,
            2,
            facet_title,
            timing_layout("UI Response Frame CPU Duration (XML vs Compose)"),
        )?,
        percentile_chart(
            "ui_response_frame_overrun",
            table,
            FRAME_OVERRUN,
            2,
            facet_title,
            timing_layout("UI Response Frame Overrun Duration (XML vs Compose)"),
        )?,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Statistic;

    #[test]
    fn test_table_holds_counts_and_timings() {
        let table = table().unwrap();
        assert_eq!(table.len(), FRAME_COUNTS.len() * 3 + FRAME_TIMINGS.len() * 4);
        assert_eq!(
            table.get("updateToolbar", FRAME_OVERRUN, Variant::Xml, Statistic::P99),
            Some(914.1)
        );
        assert_eq!(table.get("updateToolbar", FRAME_OVERRUN, Variant::Xml, Statistic::Max), None);
    }

    #[test]
    fn test_timing_charts_sit_side_by_side() {
        let table = table().unwrap();
        let charts = charts(&table).unwrap();
        assert_eq!(charts.len(), 3);
        assert_eq!(charts[0].layout().title_size, 22);

        let Chart::FacetedLines(cpu) = &charts[1] else {
            panic!("frame timing is a line chart");
        };
        assert_eq!((cpu.rows, cpu.columns), (1, 2));

        let titles: Vec<&str> = cpu.facets.iter().map(|f| f.title.as_str()).collect();
        assert_eq!(titles, vec!["showDialog Test", "updateToolbar Test"]);
        assert_eq!(cpu.facets[0].lines[1].values, vec![19.1, 54.8, 69.9, 106.5]);
        assert_eq!(cpu.legend_entries(), vec!["XML", "Compose"]);
    }
}
