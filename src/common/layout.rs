//! Per-chart presentation settings

use super::palette::{HexColor, PAPER_BACKGROUND, PLOT_BACKGROUND};
use serde::Serialize;

/// How bar value labels are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum ValueFormat {
    /// `535`, `635.3`: integral values without decimals, others with one.
    #[default]
    Decimal,

    /// `7,939`: truncated to an integer with thousands separators.
    Thousands,

    /// Printed like [`ValueFormat::Thousands`]; value tables also show the size in
    /// binary units.
    Kibibytes,
}

impl ValueFormat {
    pub fn format(self, value: f64) -> String {
        match self {
            ValueFormat::Decimal => {
                if value.fract() == 0.0 {
                    format!("{:.0}", value)
                } else {
                    format!("{:.1}", value)
                }
            }
            ValueFormat::Thousands | ValueFormat::Kibibytes => {
                format_thousands(value.trunc() as i64)
            }
        }
    }
}

fn format_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut output = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        output.push('-');
    }

    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            output.push(',');
        }
        output.push(digit);
    }
    output
}

/// Size, titles and styling of a single figure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartLayout {
    pub title: String,
    pub x_title: String,
    pub y_title: String,
    /// Figure width in pixels.
    pub width: u32,
    /// Figure height in pixels.
    pub height: u32,
    /// Base font size for labels and legends.
    pub font_size: u32,
    pub title_size: u32,
    /// Gap between neighbouring category groups, as a fraction of the category width.
    pub bar_gap: f64,
    /// Gap between bars of the same group, as a fraction of a bar slot.
    pub bar_group_gap: f64,
    pub plot_background: HexColor,
    pub paper_background: HexColor,
    pub value_format: ValueFormat,
}

impl ChartLayout {
    pub fn new(title: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            title: title.into(),
            x_title: String::new(),
            y_title: String::new(),
            width,
            height,
            font_size: 10,
            title_size: 18,
            bar_gap: 0.16,
            bar_group_gap: 0.06,
            plot_background: PLOT_BACKGROUND,
            paper_background: PAPER_BACKGROUND,
            value_format: ValueFormat::Decimal,
        }
    }

    pub fn axes(mut self, x_title: impl Into<String>, y_title: impl Into<String>) -> Self {
        self.x_title = x_title.into();
        self.y_title = y_title.into();
        self
    }

    pub fn font_size(mut self, font_size: u32) -> Self {
        self.font_size = font_size;
        self
    }

    pub fn title_size(mut self, title_size: u32) -> Self {
        self.title_size = title_size;
        self
    }

    pub fn value_format(mut self, value_format: ValueFormat) -> Self {
        self.value_format = value_format;
        self
    }
}
