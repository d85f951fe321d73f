//! Scroll benchmarks
//!
//! Each scrollable activity is flung through its list. Frame counts are reported as
//! min/median/max, frame timing as P50..P99 of `frameDurationCpuMs` and `frameOverrunMs`.

use super::{frame_count_chart, percentile_chart, Result};
use super::{FRAME_COUNT, FRAME_CPU_DURATION, FRAME_OVERRUN};
use crate::common::{Chart, ChartLayout, MeasurementTable, Variant};
use Variant::{Compose, Xml};

/// `(activity, variant, [min, median, max])`
#[rustfmt::skip]
const FRAME_COUNTS: [(&str, Variant, [f64; 3]); 8] = [
    ("CarUiListItemActivity", Xml, [535.0, 550.5, 563.0]),
    ("CarUiListItemActivity", Compose, [127.0, 134.5, 142.0]),
    ("GridCarUiRecyclerViewActivity", Xml, [204.0, 211.0, 220.0]),
    ("GridCarUiRecyclerViewActivity", Compose, [106.0, 109.0, 113.0]),
    ("CarUiRecyclerViewActivity", Xml, [321.0, 328.5, 337.0]),
    ("CarUiRecyclerViewActivity", Compose, [61.0, 65.0, 70.0]),
    ("PreferencesActivity", Xml, [358.0, 364.0, 370.0]),
    ("PreferencesActivity", Compose, [51.0, 53.0, 56.0]),
];

/// `(metric, activity, variant, [p50, p90, p95, p99])` in milliseconds.
#[rustfmt::skip]
const FRAME_TIMINGS: [(&str, &str, Variant, [f64; 4]); 16] = [
    (FRAME_CPU_DURATION, "CarUiListItemActivity", Xml, [26.8, 31.9, 33.7, 44.2]),
    (FRAME_CPU_DURATION, "CarUiListItemActivity", Compose, [29.0, 44.6, 55.2, 74.8]),
    (FRAME_CPU_DURATION, "CarUiRecyclerViewActivity", Xml, [25.5, 31.4, 33.4, 41.2]),
    (FRAME_CPU_DURATION, "CarUiRecyclerViewActivity", Compose, [34.8, 51.2, 55.7, 91.6]),
    (FRAME_CPU_DURATION, "GridCarUiRecyclerViewActivity", Xml, [26.8, 31.5, 33.3, 43.1]),
    (FRAME_CPU_DURATION, "GridCarUiRecyclerViewActivity", Compose, [29.7, 56.7, 90.5, 128.7]),
    (FRAME_CPU_DURATION, "PreferencesActivity", Xml, [23.5, 29.2, 32.0, 36.9]),
    (FRAME_CPU_DURATION, "PreferencesActivity", Compose, [37.6, 51.4, 54.4, 70.3]),

    (FRAME_OVERRUN, "CarUiListItemActivity", Xml, [12.5, 28.7, 31.3, 947.0]),
    (FRAME_OVERRUN, "CarUiListItemActivity", Compose, [17.4, 48.7, 60.9, 437.3]),
    (FRAME_OVERRUN, "CarUiRecyclerViewActivity", Xml, [11.3, 19.5, 30.0, 915.2]),
    (FRAME_OVERRUN, "CarUiRecyclerViewActivity", Compose, [31.9, 60.3, 68.1, 497.3]),
    (FRAME_OVERRUN, "GridCarUiRecyclerViewActivity", Xml, [12.4, 19.2, 30.1, 927.1]),
    (FRAME_OVERRUN, "GridCarUiRecyclerViewActivity", Compose, [15.4, 81.4, 143.0, 598.1]),
    (FRAME_OVERRUN, "PreferencesActivity", Xml, [10.0, 19.0, 28.6, 912.9]),
    (FRAME_OVERRUN, "PreferencesActivity", Compose, [35.9, 55.7, 71.0, 576.5]),
];

/// Builds the scroll benchmark table.
pub fn table() -> Result<MeasurementTable> {
    let mut table = MeasurementTable::new();
    for (activity, variant, values) in FRAME_COUNTS {
        table.push_summary(activity, FRAME_COUNT, variant, values)?;
    }
    for (metric, activity, variant, values) in FRAME_TIMINGS {
        table.push_percentiles(activity, metric, variant, values)?;
    }
    Ok(table)
}

/// `CarUiListItemActivity` -> `CarUiListItem Activity`
fn facet_title(activity: &str) -> String {
    activity.replace("Activity", " Activity")
}

fn timing_layout(metric_title: &str) -> ChartLayout {
    ChartLayout::new(
        format!("{} for Scroll Activities (XML vs Compose)", metric_title),
        800,
        800,
    )
    .axes("", "(ms)")
    .font_size(9)
}

/// Builds the frame count chart and the two 2x2 frame timing grids.
pub fn charts(table: &MeasurementTable) -> Result<Vec<Chart>> {
    let frame_count_layout = ChartLayout::new("Scroll Test Frame Count (XML vs Compose)", 740, 500)
        .axes("Activity", "frameCount");

    Ok(vec![
        frame_count_chart("scroll_frame_count", table, FRAME_COUNT, frame_count_layout)?,
        percentile_chart(
            "scroll_frame_cpu_duration",
            table,
            FRAME_CPU_DURATION,
            2,
            facet_title,
            timing_layout("Frame CPU Duration"),
        )?,
        percentile_chart(
            "scroll_frame_overrun",
            table,
            FRAME_OVERRUN,
            2,
            facet_title,
            timing_layout("Frame Overrun"),
        )?,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("CarUiListItemActivity", "CarUiListItem Activity")]
    #[case("PreferencesActivity", "Preferences Activity")]
    #[case("showDialog", "showDialog")]
    fn test_splits_activity_suffix(#[case] activity: &str, #[case] expected: &str) {
        assert_eq!(facet_title(activity), expected);
    }

    #[test]
    fn test_frame_count_keeps_listing_order() {
        let table = table().unwrap();
        let charts = charts(&table).unwrap();

        let Chart::GroupedBars(frames) = &charts[0] else {
            panic!("frame count is a bar chart");
        };
        assert_eq!(
            frames.categories,
            vec![
                "CarUiListItemActivity",
                "GridCarUiRecyclerViewActivity",
                "CarUiRecyclerViewActivity",
                "PreferencesActivity",
            ]
        );
        assert_eq!(frames.series[0].values[0], Some(535.0));
        assert_eq!(frames.placed_values(), FRAME_COUNTS.len() * 3);
    }

    #[test]
    fn test_timing_charts_are_two_by_two_grids() {
        let table = table().unwrap();
        let charts = charts(&table).unwrap();

        for chart in &charts[1..] {
            let Chart::FacetedLines(lines) = chart else {
                panic!("frame timing is a line chart");
            };
            assert_eq!((lines.rows, lines.columns), (2, 2));
            assert_eq!(lines.facets.len(), 4);
            assert_eq!(lines.facets[3].title, "Preferences Activity");
            assert_eq!(lines.legend_entries(), vec!["XML", "Compose"]);
        }

        let Chart::FacetedLines(overrun) = &charts[2] else {
            panic!("frame timing is a line chart");
        };
        assert_eq!(overrun.layout.title, "Frame Overrun for Scroll Activities (XML vs Compose)");
        assert_eq!(overrun.facets[0].lines[0].values, vec![12.5, 28.7, 31.3, 947.0]);
    }
}
