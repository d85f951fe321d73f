use argh::FromArgs;
use indicatif::{ProgressBar, ProgressStyle};
use paintbooth_charts::common::plots::{export_chart_json, export_table_json, render_chart};
use paintbooth_charts::common::tables::{format_bar_table, format_line_table};
use paintbooth_charts::common::{Chart, ImageFormat, PlotError};
use paintbooth_charts::datasets::{catalogue, datasets_for, DatasetError};
use std::path::PathBuf;
use std::time::Instant;
use thiserror::Error;

/// Renders the XML vs Compose benchmark comparison charts
#[derive(FromArgs, Debug)]
pub struct Args {
    /// directory the charts are written to, created if missing (default: charts)
    #[argh(option, short = 'o', default = "PathBuf::from(\"charts\")")]
    output: PathBuf,

    /// image format, png or svg (default: png)
    #[argh(option, short = 'f', default = "ImageFormat::Png")]
    format: ImageFormat,

    /// only render charts whose name contains this text, can be repeated
    #[argh(option, short = 'c')]
    chart: Vec<String>,

    /// list the available charts and exit
    #[argh(switch, short = 'l')]
    list: bool,

    /// also write each rendered chart, and the datasets behind them, as JSON
    #[argh(switch, short = 'j')]
    json: bool,

    /// print the values of each chart as a table
    #[argh(switch, short = 't')]
    tables: bool,
}

/// Errors that can occur while producing the charts
#[derive(Error, Debug)]
pub enum ChartsError {
    #[error("Dataset error: {0}")]
    Dataset(#[from] DatasetError),

    #[error("Plot error: {0}")]
    Plot(#[from] PlotError),

    #[error("Failed to create output directory: {0}")]
    OutputDirectory(#[from] std::io::Error),

    #[error("No chart name contains any of: {0}")]
    NoMatchingCharts(String),
}

type Result<T> = core::result::Result<T, ChartsError>;

fn main() -> Result<()> {
    let args: Args = argh::from_env();
    let charts = select_charts(catalogue()?, &args.chart)?;

    if args.list {
        for chart in &charts {
            println!("{:<32} {}", chart.name(), chart.layout().title);
        }
        return Ok(());
    }

    std::fs::create_dir_all(&args.output)?;
    println!("🎨 Rendering {} charts into {}", charts.len(), args.output.display());

    let start = Instant::now();
    let pb = ProgressBar::new(charts.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );

    let mut written = 0;
    for chart in &charts {
        pb.set_message(chart.name().to_string());

        let path = render_chart(chart, &args.output, args.format)?;
        pb.println(format!("✅ {}", path.display()));
        written += 1;

        if args.json {
            let path = export_chart_json(chart, &args.output)?;
            pb.println(format!("📄 {}", path.display()));
            written += 1;
        }

        if args.tables {
            let table = match chart {
                Chart::GroupedBars(bars) => format_bar_table(bars),
                Chart::FacetedLines(lines) => format_line_table(lines),
            };
            pb.println(format!("\n{}\n", table));
        }

        pb.inc(1);
    }
    pb.finish_and_clear();

    if args.json {
        for (name, table) in datasets_for(&charts)? {
            let path = args.output.join(format!("{}_measurements.json", name));
            export_table_json(&table, &path)?;
            println!("📄 {}", path.display());
            written += 1;
        }
    }

    println!(
        "📊 Wrote {} files for {} charts to {} in {:.2?}",
        written,
        charts.len(),
        args.output.display(),
        start.elapsed()
    );
    Ok(())
}

/// Keeps the charts whose name contains any of `filters`; no filters keeps everything.
fn select_charts(charts: Vec<Chart>, filters: &[String]) -> Result<Vec<Chart>> {
    if filters.is_empty() {
        return Ok(charts);
    }

    let selected: Vec<Chart> = charts
        .into_iter()
        .filter(|c| filters.iter().any(|f| c.name().contains(f.as_str())))
        .collect();

    if selected.is_empty() {
        return Err(ChartsError::NoMatchingCharts(filters.join(", ")));
    }
    Ok(selected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(&[], 11)]
    #[case(&["startup"], 3)]
    #[case(&["frame_count"], 2)]
    #[case(&["memory", "ui_response"], 5)]
    #[case(&["overrun"], 2)]
    fn test_filters_match_name_fragments(#[case] filters: &[&str], #[case] expected: usize) {
        let filters: Vec<String> = filters.iter().map(|f| f.to_string()).collect();
        let selected = select_charts(catalogue().unwrap(), &filters).unwrap();
        assert_eq!(selected.len(), expected);
    }

    #[test]
    fn test_unmatched_filter_is_an_error() {
        let filters = vec!["latency".to_string()];
        let result = select_charts(catalogue().unwrap(), &filters);
        assert!(matches!(result, Err(ChartsError::NoMatchingCharts(f)) if f == "latency"));
    }

    #[test]
    fn test_parses_output_options() {
        let args = Args::from_args(&["paintbooth-charts"], &["-o", "out", "-c", "scroll", "-c", "memory", "-j"])
            .unwrap();
        assert_eq!(args.output, PathBuf::from("out"));
        assert_eq!(args.format, ImageFormat::Png);
        assert_eq!(args.chart, vec!["scroll", "memory"]);
        assert!(args.json);
        assert!(!args.tables);
    }
}
