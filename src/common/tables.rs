//! ASCII value tables mirroring the charts
//!
//! Every chart can be printed as a table using the [`tabled`] crate, which makes
//! the plotted numbers easy to copy into reports or compare in a terminal.

use super::layout::ValueFormat;
use super::pivot::{FacetedLineChart, GroupedBarChart};
use bytesize::ByteSize;
use tabled::builder::Builder;

/// Formats a grouped bar chart as a table: one row per category, one column per series.
///
/// Empty slots are shown as `-`. Charts with [`ValueFormat::Kibibytes`] values also
/// show the size in binary units.
pub fn format_bar_table(chart: &GroupedBarChart) -> String {
    let mut builder = Builder::default();

    let mut header = vec![chart.layout.x_title.clone()];
    header.extend(chart.series.iter().map(|s| s.name.clone()));
    builder.push_record(header);

    for (index, category) in chart.categories.iter().enumerate() {
        let mut row = vec![category.clone()];
        row.extend(
            chart
                .series
                .iter()
                .map(|s| format_cell(s.values.get(index).copied().flatten(), chart.layout.value_format)),
        );
        builder.push_record(row);
    }

    with_title(&chart.layout.title, builder.build().to_string())
}

/// Formats a faceted percentile chart as a table: one row per facet and variant.
pub fn format_line_table(chart: &FacetedLineChart) -> String {
    let mut builder = Builder::default();

    let mut header = vec!["Facet".to_string(), "Variant".to_string()];
    header.extend(chart.x_labels.iter().cloned());
    builder.push_record(header);

    for facet in &chart.facets {
        for line in &facet.lines {
            let mut row = vec![facet.title.clone(), line.name.clone()];
            row.extend(
                line.values
                    .iter()
                    .map(|&v| format_cell(Some(v), chart.layout.value_format)),
            );
            builder.push_record(row);
        }
    }

    with_title(&chart.layout.title, builder.build().to_string())
}

fn format_cell(value: Option<f64>, format: ValueFormat) -> String {
    match (value, format) {
        (None, _) => "-".to_string(),
        (Some(value), ValueFormat::Kibibytes) => format!(
            "{} ({})",
            format.format(value),
            ByteSize::kib(value.round().max(0.0) as u64)
        ),
        (Some(value), format) => format.format(value),
    }
}

fn with_title(title: &str, table: String) -> String {
    format!("{}\n{}\n{}", title, "=".repeat(title.chars().count()), table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::data_structures::{MeasurementTable, Statistic, Variant};
    use crate::common::layout::ChartLayout;
    use crate::common::pivot::{FacetSpec, STAT_VARIANT_ORDER};

    #[test]
    fn test_bar_table_has_a_row_per_category() {
        let mut table = MeasurementTable::new();
        table.push_summary("showDialog", "fc", Variant::Xml, [126.0, 135.0, 143.0]).unwrap();
        table.push_summary("showDialog", "fc", Variant::Compose, [60.0, 62.5, 67.0]).unwrap();
        table.push_summary("updateToolbar", "fc", Variant::Xml, [182.0, 187.0, 197.0]).unwrap();

        let layout = ChartLayout::new("UI Response Frame Count", 700, 400).axes("UI Response Test", "frameCount");
        let chart = GroupedBarChart::pivot("fc", &table, "fc", &STAT_VARIANT_ORDER, layout).unwrap();
        let output = format_bar_table(&chart);

        assert!(output.starts_with("UI Response Frame Count\n======================="));
        assert!(output.contains("UI Response Test"));
        assert!(output.contains("Median (Compose)"));
        assert!(output.contains("62.5"));
        assert!(output.contains("updateToolbar"));
        // updateToolbar has no Compose rows
        assert!(output.contains(" - "));
    }

    #[test]
    fn test_misaligned_series_prints_empty_cells() {
        let mut table = MeasurementTable::new();
        table.push_summary("showDialog", "fc", Variant::Xml, [126.0, 135.0, 143.0]).unwrap();
        table.push_summary("updateToolbar", "fc", Variant::Xml, [182.0, 187.0, 197.0]).unwrap();

        let layout = ChartLayout::new("Frames", 700, 400).axes("Test", "frameCount");
        let mut chart = GroupedBarChart::pivot("fc", &table, "fc", &STAT_VARIANT_ORDER, layout).unwrap();
        chart.series[0].values.truncate(1);

        let output = format_bar_table(&chart);
        assert!(output.contains("126"));
        assert!(!output.contains("182"));
        assert!(output.contains("187"));
    }

    #[test]
    fn test_kibibyte_cells_include_binary_size() {
        let cell = format_cell(Some(10240.0), ValueFormat::Kibibytes);
        assert!(cell.starts_with("10,240 ("));
        assert!(cell.contains("MiB"));

        assert_eq!(format_cell(Some(10240.0), ValueFormat::Thousands), "10,240");
        assert_eq!(format_cell(None, ValueFormat::Kibibytes), "-");
    }

    #[test]
    fn test_line_table_has_a_row_per_facet_and_variant() {
        let mut table = MeasurementTable::new();
        table.push_percentiles("showDialog", "o", Variant::Xml, [18.1, 94.6, 145.2, 206.4]).unwrap();
        table.push_percentiles("showDialog", "o", Variant::Compose, [15.3, 176.2, 229.8, 459.3]).unwrap();

        let spec = FacetSpec {
            sub_category: "o",
            variants: &Variant::ALL,
            percentiles: &Statistic::PERCENTILES,
            columns: 2,
            facet_title: |c| format!("{c} Test"),
        };
        let chart = FacetedLineChart::pivot("o", &table, &spec, ChartLayout::new("Overrun", 900, 400)).unwrap();
        let output = format_line_table(&chart);

        assert!(output.contains("P99"));
        assert!(output.contains("showDialog Test"));
        assert!(output.contains("459.3"));
        assert_eq!(output.matches("showDialog Test").count(), 2);
    }
}
