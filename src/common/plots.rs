//! Plotting infrastructure for grouped bar and faceted percentile charts
//!
//! This module renders pivoted charts using the [`plotters`] crate. Every figure is
//! laid out the same way: a title, a horizontal legend strip below it, then the plot
//! body. Figures are written as PNG, or as SVG when the `svg` feature is enabled.

use super::data_structures::MeasurementTable;
use super::layout::ChartLayout;
use super::palette::HexColor;
use super::pivot::{Facet, FacetedLineChart, GroupedBarChart};
use core::str::FromStr;
use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during plot generation
#[derive(Error, Debug)]
pub enum PlotError {
    #[error("Failed to create drawing area: {0}")]
    DrawingArea(String),

    #[error("Failed to configure chart: {0}")]
    ChartConfig(String),

    #[error("Failed to draw chart elements: {0}")]
    Drawing(String),

    #[error("Failed to save plot to file: {0}")]
    FileSave(#[from] std::io::Error),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

type Result<T> = core::result::Result<T, PlotError>;

/// Height of the legend strip below the title, in pixels.
const LEGEND_HEIGHT: i32 = 32;

/// Space left above the tallest value so labels and markers stay inside the plot.
const Y_HEADROOM: f64 = 1.15;

/// Width of a legend colour swatch, in pixels.
const SWATCH_WIDTH: i32 = 18;

/// Any chart the catalogue can produce.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Chart {
    GroupedBars(GroupedBarChart),
    FacetedLines(FacetedLineChart),
}

impl Chart {
    /// Identifier of the chart, used as the output file stem.
    pub fn name(&self) -> &str {
        match self {
            Chart::GroupedBars(chart) => &chart.name,
            Chart::FacetedLines(chart) => &chart.name,
        }
    }

    pub fn layout(&self) -> &ChartLayout {
        match self {
            Chart::GroupedBars(chart) => &chart.layout,
            Chart::FacetedLines(chart) => &chart.layout,
        }
    }

    /// Legend entries in drawing order.
    pub fn legend(&self) -> Vec<LegendEntry> {
        match self {
            Chart::GroupedBars(chart) => chart
                .series
                .iter()
                .map(|s| LegendEntry {
                    name: s.name.clone(),
                    color: s.color,
                    mark: LegendMark::Bar,
                })
                .collect(),
            Chart::FacetedLines(chart) => chart
                .facets
                .iter()
                .flat_map(|f| f.lines.iter())
                .filter(|l| l.show_legend)
                .map(|l| LegendEntry {
                    name: l.name.clone(),
                    color: l.color,
                    mark: LegendMark::Line,
                })
                .collect(),
        }
    }
}

impl From<GroupedBarChart> for Chart {
    fn from(chart: GroupedBarChart) -> Self {
        Chart::GroupedBars(chart)
    }
}

impl From<FacetedLineChart> for Chart {
    fn from(chart: FacetedLineChart) -> Self {
        Chart::FacetedLines(chart)
    }
}

/// Shape drawn next to a legend label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegendMark {
    Bar,
    Line,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegendEntry {
    pub name: String,
    pub color: HexColor,
    pub mark: LegendMark,
}

/// Output image format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageFormat {
    #[default]
    Png,

    #[cfg(feature = "svg")]
    Svg,
}

impl ImageFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            #[cfg(feature = "svg")]
            ImageFormat::Svg => "svg",
        }
    }
}

impl FromStr for ImageFormat {
    type Err = String;

    fn from_str(text: &str) -> core::result::Result<Self, Self::Err> {
        match text.to_ascii_lowercase().as_str() {
            "png" => Ok(ImageFormat::Png),
            #[cfg(feature = "svg")]
            "svg" => Ok(ImageFormat::Svg),
            #[cfg(not(feature = "svg"))]
            "svg" => Err("SVG output requires the 'svg' feature".to_string()),
            other => Err(format!("Unknown image format '{}', expected png or svg", other)),
        }
    }
}

/// Renders a chart into `output_dir` and returns the path of the written file
///
/// # Arguments
/// * `chart` - The pivoted chart to draw
/// * `output_dir` - Existing directory where the image should be saved
/// * `format` - Image format, which also decides the file extension
///
/// # Returns
/// * `Ok(PathBuf)` - Path of `<chart name>.<extension>`
/// * `Err(PlotError)` - If the chart has nothing to draw or rendering failed
pub fn render_chart(chart: &Chart, output_dir: &Path, format: ImageFormat) -> Result<PathBuf> {
    validate_chart(chart)?;

    let layout = chart.layout();
    let size = (layout.width, layout.height);
    let output_path = output_dir.join(format!("{}.{}", chart.name(), format.extension()));

    match format {
        ImageFormat::Png => {
            let root = BitMapBackend::new(&output_path, size).into_drawing_area();
            draw_chart(&root, chart)?;
            root.present()
                .map_err(|e| PlotError::Drawing(e.to_string()))?;
        }
        #[cfg(feature = "svg")]
        ImageFormat::Svg => {
            let root = SVGBackend::new(&output_path, size).into_drawing_area();
            draw_chart(&root, chart)?;
            root.present()
                .map_err(|e| PlotError::Drawing(e.to_string()))?;
        }
    }

    Ok(output_path)
}

/// Writes the pivoted chart as pretty-printed JSON next to the image.
pub fn export_chart_json(chart: &Chart, output_dir: &Path) -> Result<PathBuf> {
    let output_path = output_dir.join(format!("{}.json", chart.name()));
    let json = serde_json::to_string_pretty(chart)
        .map_err(|e| PlotError::InvalidData(format!("Failed to serialize chart: {}", e)))?;
    std::fs::write(&output_path, json)?;
    Ok(output_path)
}

/// Writes the source measurements of a dataset as pretty-printed JSON.
pub fn export_table_json(table: &MeasurementTable, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(table)
        .map_err(|e| PlotError::InvalidData(format!("Failed to serialize table: {}", e)))?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Checks that a chart can be drawn before any file is created.
fn validate_chart(chart: &Chart) -> Result<()> {
    let layout = chart.layout();
    if layout.width == 0 || layout.height == 0 {
        return Err(PlotError::InvalidData(format!(
            "Figure size {}x{} must be non-zero",
            layout.width, layout.height
        )));
    }

    match chart {
        Chart::GroupedBars(bars) => {
            if bars.placed_values() == 0 {
                return Err(PlotError::InvalidData(format!(
                    "Chart '{}' has no bars to draw",
                    bars.name
                )));
            }

            if let Some(series) = bars
                .series
                .iter()
                .find(|s| s.values.len() != bars.categories.len())
            {
                return Err(PlotError::InvalidData(format!(
                    "Series '{}' has {} values for {} categories",
                    series.name,
                    series.values.len(),
                    bars.categories.len()
                )));
            }

            if bars
                .series
                .iter()
                .flat_map(|s| s.values.iter().flatten())
                .any(|&v| v < 0.0)
            {
                return Err(PlotError::InvalidData(
                    "Bar values cannot be negative".to_string(),
                ));
            }
        }
        Chart::FacetedLines(lines) => {
            if lines.facets.is_empty() {
                return Err(PlotError::InvalidData(format!(
                    "Chart '{}' has no facets to draw",
                    lines.name
                )));
            }

            if lines
                .facets
                .iter()
                .any(|f| f.row >= lines.rows || f.column >= lines.columns)
            {
                return Err(PlotError::InvalidData(format!(
                    "Facets of '{}' do not fit a {}x{} grid",
                    lines.name, lines.rows, lines.columns
                )));
            }

            if lines
                .facets
                .iter()
                .flat_map(|f| f.lines.iter())
                .any(|l| l.values.len() != lines.x_labels.len())
            {
                return Err(PlotError::InvalidData(
                    "Every line needs one value per x-axis label".to_string(),
                ));
            }
        }
    }

    Ok(())
}

/// Draws title, legend and body of a chart onto any backend.
fn draw_chart<DB: DrawingBackend>(root: &DrawingArea<DB, Shift>, chart: &Chart) -> Result<()> {
    let layout = chart.layout();

    root.fill(&layout.paper_background.to_rgb())
        .map_err(|e| PlotError::DrawingArea(e.to_string()))?;

    let titled = root
        .titled(&layout.title, ("sans-serif", layout.title_size))
        .map_err(|e| PlotError::DrawingArea(e.to_string()))?;
    let (legend_area, body) = titled.split_vertically(LEGEND_HEIGHT);

    draw_legend(&legend_area, &chart.legend(), layout.font_size)?;

    match chart {
        Chart::GroupedBars(bars) => draw_grouped_bars(&body, bars),
        Chart::FacetedLines(lines) => draw_faceted_lines(&body, lines),
    }
}

/// Draws a centred, single-row legend.
fn draw_legend<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    entries: &[LegendEntry],
    font_size: u32,
) -> Result<()> {
    let style = TextStyle::from(("sans-serif", font_size).into_font())
        .pos(Pos::new(HPos::Left, VPos::Center));
    let spacing = font_size as i32;

    let mut widths = Vec::with_capacity(entries.len());
    for entry in entries {
        let (text_width, _) = area
            .estimate_text_size(&entry.name, &style)
            .map_err(|e| PlotError::DrawingArea(e.to_string()))?;
        widths.push(SWATCH_WIDTH + spacing / 2 + text_width as i32 + spacing);
    }

    let (width, height) = area.dim_in_pixel();
    let total: i32 = widths.iter().sum();
    let mut x = ((width as i32 - total) / 2).max(0);
    let y = height as i32 / 2;

    for (entry, entry_width) in entries.iter().zip(widths) {
        let color = entry.color.to_rgb();
        let swatch = match entry.mark {
            LegendMark::Bar => area.draw(&Rectangle::new(
                [(x, y - 5), (x + SWATCH_WIDTH, y + 5)],
                color.filled(),
            )),
            LegendMark::Line => area
                .draw(&PathElement::new(
                    vec![(x, y), (x + SWATCH_WIDTH, y)],
                    color.stroke_width(3),
                ))
                .and_then(|_| area.draw(&Circle::new((x + SWATCH_WIDTH / 2, y), 4, color.filled()))),
        };
        swatch.map_err(|e| PlotError::Drawing(e.to_string()))?;

        area.draw(&Text::new(
            entry.name.clone(),
            (x + SWATCH_WIDTH + spacing / 2, y),
            style.clone(),
        ))
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

        x += entry_width;
    }

    Ok(())
}

/// Horizontal extent of one bar inside its category.
///
/// Categories are one unit wide. `bar_gap` is taken off the group as a whole and
/// `bar_group_gap` off every bar slot inside the group.
fn bar_span(category: usize, slot: usize, slots: usize, layout: &ChartLayout) -> (f64, f64) {
    let group_width = 1.0 - layout.bar_gap;
    let slot_width = group_width / slots as f64;
    let bar_width = slot_width * (1.0 - layout.bar_group_gap);

    let left = category as f64
        + layout.bar_gap / 2.0
        + slot as f64 * slot_width
        + (slot_width - bar_width) / 2.0;
    (left, left + bar_width)
}

/// Number of x-axis key points requested for `categories` bar groups.
///
/// A `0..n` axis asked for `2n + 1` points steps by 0.5, which puts a key point on
/// every category centre.
fn bar_label_points(categories: usize) -> usize {
    2 * categories + 1
}

/// Category name for a key point at a category centre, empty for any other point.
fn category_label(categories: &[String], x: f64) -> String {
    if (x.fract() - 0.5).abs() > 1e-6 {
        return String::new();
    }
    categories.get(x.floor() as usize).cloned().unwrap_or_default()
}

/// Percentile name for a key point on an integer position, empty otherwise.
fn percentile_label(labels: &[String], x: f64) -> String {
    if x < -1e-6 || (x - x.round()).abs() > 1e-6 {
        return String::new();
    }
    labels.get(x.round() as usize).cloned().unwrap_or_default()
}

/// Builds the coordinate system of a grouped bar chart: categories `i` span `i..i + 1`.
fn bar_context<'a, DB: DrawingBackend>(
    area: &'a DrawingArea<DB, Shift>,
    chart: &GroupedBarChart,
) -> Result<ChartContext<'a, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>> {
    let y_max = chart.max_value().unwrap_or(1.0).max(1.0) * Y_HEADROOM;

    ChartBuilder::on(area)
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(70)
        .build_cartesian_2d(0f64..chart.categories.len() as f64, 0f64..y_max)
        .map_err(|e| PlotError::ChartConfig(e.to_string()))
}

/// Builds the coordinate system of one facet: percentile `i` sits at `x = i`.
fn facet_context<'a, DB: DrawingBackend>(
    area: &'a DrawingArea<DB, Shift>,
    chart: &FacetedLineChart,
    facet: &Facet,
) -> Result<ChartContext<'a, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>> {
    let last = chart.x_labels.len().saturating_sub(1) as f64;
    let y_max = facet
        .lines
        .iter()
        .flat_map(|l| l.values.iter().copied())
        .fold(1.0, f64::max)
        * Y_HEADROOM;

    ChartBuilder::on(area)
        .margin(12)
        .x_label_area_size(30)
        .y_label_area_size(55)
        .build_cartesian_2d(-0.25f64..last + 0.25, 0f64..y_max)
        .map_err(|e| PlotError::ChartConfig(e.to_string()))
}

fn draw_grouped_bars<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    chart: &GroupedBarChart,
) -> Result<()> {
    let layout = &chart.layout;
    let slots = chart.series.len();
    let mut chart_context = bar_context(area, chart)?;

    chart_context
        .plotting_area()
        .fill(&layout.plot_background.to_rgb())
        .map_err(|e| PlotError::DrawingArea(e.to_string()))?;

    let label = |x: &f64| category_label(&chart.categories, *x);

    chart_context
        .configure_mesh()
        .disable_x_mesh()
        .bold_line_style(WHITE)
        .light_line_style(WHITE.mix(0.5))
        .x_labels(bar_label_points(chart.categories.len()))
        .x_desc(layout.x_title.as_str())
        .y_desc(layout.y_title.as_str())
        .x_label_formatter(&label)
        .label_style(("sans-serif", layout.font_size))
        .axis_desc_style(("sans-serif", layout.font_size + 2))
        .draw()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    let value_style = TextStyle::from(("sans-serif", layout.font_size).into_font())
        .pos(Pos::new(HPos::Center, VPos::Bottom));

    for (slot, series) in chart.series.iter().enumerate() {
        let color = series.color.to_rgb();
        let bars: Vec<((f64, f64), f64)> = series
            .values
            .iter()
            .enumerate()
            .filter_map(|(category, value)| value.map(|v| (bar_span(category, slot, slots, layout), v)))
            .collect();

        chart_context
            .draw_series(
                bars.iter()
                    .map(|&((x0, x1), value)| Rectangle::new([(x0, 0.0), (x1, value)], color.filled())),
            )
            .map_err(|e| PlotError::Drawing(e.to_string()))?;

        chart_context
            .draw_series(bars.iter().map(|&((x0, x1), value)| {
                Text::new(
                    layout.value_format.format(value),
                    ((x0 + x1) / 2.0, value),
                    value_style.clone(),
                )
            }))
            .map_err(|e| PlotError::Drawing(e.to_string()))?;
    }

    Ok(())
}

fn draw_faceted_lines<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    chart: &FacetedLineChart,
) -> Result<()> {
    let layout = &chart.layout;
    let panels = area.split_evenly((chart.rows, chart.columns));
    let label = |x: &f64| percentile_label(&chart.x_labels, *x);

    for facet in &chart.facets {
        let panel = panels[facet.row * chart.columns + facet.column]
            .titled(&facet.title, ("sans-serif", layout.font_size + 6))
            .map_err(|e| PlotError::DrawingArea(e.to_string()))?;
        let mut chart_context = facet_context(&panel, chart, facet)?;

        chart_context
            .plotting_area()
            .fill(&layout.plot_background.to_rgb())
            .map_err(|e| PlotError::DrawingArea(e.to_string()))?;

        chart_context
            .configure_mesh()
            .bold_line_style(WHITE)
            .light_line_style(WHITE.mix(0.5))
            .x_labels(chart.x_labels.len())
            .y_desc(layout.y_title.as_str())
            .x_label_formatter(&label)
            .label_style(("sans-serif", layout.font_size))
            .axis_desc_style(("sans-serif", layout.font_size + 2))
            .draw()
            .map_err(|e| PlotError::Drawing(e.to_string()))?;

        for line in &facet.lines {
            let color = line.color.to_rgb();
            let points: Vec<(f64, f64)> = line
                .values
                .iter()
                .enumerate()
                .map(|(i, &v)| (i as f64, v))
                .collect();

            chart_context
                .draw_series(LineSeries::new(points.iter().copied(), color.stroke_width(3)))
                .map_err(|e| PlotError::Drawing(e.to_string()))?;

            chart_context
                .draw_series(points.iter().map(|&p| Circle::new(p, 4, color.filled())))
                .map_err(|e| PlotError::Drawing(e.to_string()))?;
        }
    }

    Ok(())
}
