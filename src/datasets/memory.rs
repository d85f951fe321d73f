//! Memory footprint
//!
//! Java heap size and anonymous RSS in KB, sampled as the last value of a run
//! (`lastSize`) and as the peak of a run (`maxSize`).

use super::{DatasetError, Result};
use crate::common::{
    Chart, ChartLayout, GroupedBarChart, MeasurementTable, ValueFormat, Variant, STAT_VARIANT_ORDER,
};
use Variant::{Compose, Xml};

/// `(value column, chart name, chart title)`
const METRICS: [(&str, &str, &str); 2] = [
    ("HeapSize", "memory_heap_size", "Heap Size Comparison (XML vs Compose)"),
    ("RssAnon", "memory_rss_anon", "RSS Anon Comparison (XML vs Compose)"),
];

/// `(sample, value column, variant, [min, median, max])` in KB.
#[rustfmt::skip]
const MEMORY_USAGE: [(&str, &str, Variant, [f64; 3]); 8] = [
    ("lastSize", "HeapSize", Xml, [7767.0, 7939.5, 8029.0]),
    ("lastSize", "HeapSize", Compose, [5859.0, 7295.0, 9212.0]),
    ("maxSize", "HeapSize", Xml, [10307.0, 10347.5, 10407.0]),
    ("maxSize", "HeapSize", Compose, [11092.0, 11626.0, 11747.0]),

    ("lastSize", "RssAnon", Xml, [74792.0, 75008.0, 75388.0]),
    ("lastSize", "RssAnon", Compose, [70776.0, 72450.0, 74444.0]),
    ("maxSize", "RssAnon", Xml, [76004.0, 76466.0, 77112.0]),
    ("maxSize", "RssAnon", Compose, [78844.0, 79382.0, 81224.0]),
];

/// Builds the memory usage table.
pub fn table() -> Result<MeasurementTable> {
    let mut table = MeasurementTable::new();
    for (sample, column, variant, values) in MEMORY_USAGE {
        table.push_summary(sample, column, variant, values)?;
    }
    Ok(table)
}

/// Builds one grouped bar chart per memory metric.
pub fn charts(table: &MeasurementTable) -> Result<Vec<Chart>> {
    METRICS
        .iter()
        .map(|&(column, name, title)| {
            let layout = ChartLayout::new(title, 600, 350)
                .axes("Metric Type", "Memory (KB)")
                .font_size(9)
                .value_format(ValueFormat::Kibibytes);

            GroupedBarChart::pivot(name, table, column, &STAT_VARIANT_ORDER, layout)
                .map(Chart::from)
                .map_err(DatasetError::from)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_charts_group_by_sample() {
        let table = table().unwrap();
        let charts = charts(&table).unwrap();
        assert_eq!(charts.len(), 2);

        let Chart::GroupedBars(heap) = &charts[0] else {
            panic!("memory charts are bar charts");
        };
        assert_eq!(heap.name, "memory_heap_size");
        assert_eq!(heap.categories, vec!["lastSize", "maxSize"]);
        assert_eq!(heap.series[1].values, vec![Some(7939.5), Some(10347.5)]);
        assert_eq!(heap.layout.value_format, ValueFormat::Kibibytes);
        assert_eq!(heap.layout.value_format.format(7939.5), "7,939");

        let Chart::GroupedBars(rss) = &charts[1] else {
            panic!("memory charts are bar charts");
        };
        assert_eq!(rss.series[5].values, vec![Some(74444.0), Some(81224.0)]);
        assert_eq!(rss.max_value(), Some(81224.0));
    }
}
