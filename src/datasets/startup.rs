//! Activity startup latency
//!
//! `timeToInitialDisplayMs` of every PaintBooth activity, measured under cold, warm
//! and hot startup. One grouped bar chart is produced per startup mode.

use super::{DatasetError, Result};
use crate::common::{Chart, ChartLayout, GroupedBarChart, MeasurementTable, Variant, STAT_VARIANT_ORDER};
use Variant::{Compose, Xml};

/// Startup modes, in chart order.
pub const MODES: [&str; 3] = ["Cold", "Warm", "Hot"];

/// `(activity, mode, variant, [min, median, max])` in milliseconds.
#[rustfmt::skip]
const STARTUP_TIMES: [(&str, &str, Variant, [f64; 3]); 42] = [
    ("MainActivity", "Cold", Xml, [635.3, 731.7, 1017.3]),
    ("MainActivity", "Cold", Compose, [820.9, 891.3, 1109.9]),
    ("MainActivity", "Warm", Xml, [206.0, 249.0, 314.8]),
    ("MainActivity", "Warm", Compose, [224.3, 252.6, 286.5]),
    ("MainActivity", "Hot", Xml, [158.1, 226.2, 312.6]),
    ("MainActivity", "Hot", Compose, [96.7, 131.6, 193.9]),

    ("ToolbarActivity", "Cold", Xml, [669.0, 784.7, 944.2]),
    ("ToolbarActivity", "Cold", Compose, [844.9, 933.6, 1038.7]),
    ("ToolbarActivity", "Warm", Xml, [224.7, 255.6, 301.6]),
    ("ToolbarActivity", "Warm", Compose, [240.2, 284.6, 310.8]),
    ("ToolbarActivity", "Hot", Xml, [128.8, 181.2, 232.8]),
    ("ToolbarActivity", "Hot", Compose, [94.2, 138.8, 185.5]),

    ("PreferenceActivity", "Cold", Xml, [631.2, 768.6, 1049.9]),
    ("PreferenceActivity", "Cold", Compose, [645.1, 785.9, 1316.4]),
    ("PreferenceActivity", "Warm", Xml, [188.2, 209.1, 378.8]),
    ("PreferenceActivity", "Warm", Compose, [211.9, 269.5, 359.4]),
    ("PreferenceActivity", "Hot", Xml, [139.9, 205.2, 277.3]),
    ("PreferenceActivity", "Hot", Compose, [110.4, 151.0, 198.1]),

    ("DialogsActivity", "Cold", Xml, [705.1, 808.7, 1336.2]),
    ("DialogsActivity", "Cold", Compose, [847.3, 979.6, 1364.6]),
    ("DialogsActivity", "Warm", Xml, [207.5, 243.9, 295.8]),
    ("DialogsActivity", "Warm", Compose, [240.4, 285.8, 345.0]),
    ("DialogsActivity", "Hot", Xml, [119.8, 144.3, 178.0]),
    ("DialogsActivity", "Hot", Compose, [91.9, 120.5, 158.1]),

    ("CarUiListItemActivity", "Cold", Xml, [708.4, 796.5, 1129.2]),
    ("CarUiListItemActivity", "Cold", Compose, [888.5, 995.7, 1418.0]),
    ("CarUiListItemActivity", "Warm", Xml, [238.9, 276.4, 438.4]),
    ("CarUiListItemActivity", "Warm", Compose, [290.9, 369.4, 470.6]),
    ("CarUiListItemActivity", "Hot", Xml, [146.1, 205.1, 308.2]),
    ("CarUiListItemActivity", "Hot", Compose, [137.9, 188.5, 257.3]),

    ("CarUiRecyclerViewActivity", "Cold", Xml, [636.0, 709.4, 967.1]),
    ("CarUiRecyclerViewActivity", "Cold", Compose, [830.6, 966.6, 1183.1]),
    ("CarUiRecyclerViewActivity", "Warm", Xml, [211.1, 240.8, 293.7]),
    ("CarUiRecyclerViewActivity", "Warm", Compose, [223.4, 268.0, 368.0]),
    ("CarUiRecyclerViewActivity", "Hot", Xml, [112.4, 141.6, 229.6]),
    ("CarUiRecyclerViewActivity", "Hot", Compose, [93.2, 129.3, 174.5]),

    ("GridCarUiRecyclerViewActivity", "Cold", Xml, [637.7, 689.0, 1256.1]),
    ("GridCarUiRecyclerViewActivity", "Cold", Compose, [851.6, 943.2, 1448.9]),
    ("GridCarUiRecyclerViewActivity", "Warm", Xml, [256.1, 302.7, 375.1]),
    ("GridCarUiRecyclerViewActivity", "Warm", Compose, [261.5, 301.1, 367.0]),
    ("GridCarUiRecyclerViewActivity", "Hot", Xml, [132.1, 186.9, 235.1]),
    ("GridCarUiRecyclerViewActivity", "Hot", Compose, [96.8, 139.4, 209.6]),
];

/// Builds the startup latency table.
pub fn table() -> Result<MeasurementTable> {
    let mut table = MeasurementTable::new();
    for (activity, mode, variant, values) in STARTUP_TIMES {
        table.push_summary(activity, mode, variant, values)?;
    }
    Ok(table)
}

/// Builds one grouped bar chart per startup mode.
pub fn charts(table: &MeasurementTable) -> Result<Vec<Chart>> {
    MODES
        .iter()
        .map(|&mode| {
            let layout = ChartLayout::new(format!("{} Startup Time (XML vs Compose)", mode), 1100, 400)
                .axes("Activity", "timeToInitialDisplayMs")
                .font_size(9);
            let name = format!("startup_{}", mode.to_ascii_lowercase());

            GroupedBarChart::pivot(name, table, mode, &STAT_VARIANT_ORDER, layout)
                .map(Chart::from)
                .map_err(DatasetError::from)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Statistic;

    #[test]
    fn test_table_holds_every_measurement() {
        let table = table().unwrap();
        assert_eq!(table.len(), STARTUP_TIMES.len() * 3);
        assert_eq!(table.categories(Some("Hot")).len(), 7);
        assert_eq!(
            table.get("DialogsActivity", "Warm", Variant::Compose, Statistic::Max),
            Some(345.0)
        );
    }

    #[test]
    fn test_one_chart_per_mode() {
        let table = table().unwrap();
        let charts = charts(&table).unwrap();

        let names: Vec<&str> = charts.iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["startup_cold", "startup_warm", "startup_hot"]);
        assert_eq!(charts[1].layout().title, "Warm Startup Time (XML vs Compose)");
        assert_eq!(charts[0].layout().y_title, "timeToInitialDisplayMs");
    }

    #[test]
    fn test_every_activity_has_all_six_bars() {
        let table = table().unwrap();
        for chart in charts(&table).unwrap() {
            let Chart::GroupedBars(bars) = chart else {
                panic!("startup charts are bar charts");
            };

            assert_eq!(bars.categories[0], "MainActivity");
            assert_eq!(bars.categories[6], "GridCarUiRecyclerViewActivity");
            assert_eq!(bars.series.len(), 6);
            assert!(bars.series.iter().all(|s| s.values.iter().all(Option::is_some)));
            assert_eq!(bars.placed_values(), 7 * 6);
        }
    }
}
