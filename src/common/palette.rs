//! Colour assignments shared by every chart
//!
//! XML series are drawn in Material blue shades and Compose series in Material
//! green shades. A `(statistic, variant)` pair always maps to the same colour,
//! whichever chart it appears in.

use super::data_structures::{Statistic, Variant};
use core::fmt;
use plotters::style::RGBColor;
use serde::{Serialize, Serializer};

/// An sRGB colour, written as `#RRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HexColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl HexColor {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_rgb(self) -> RGBColor {
        RGBColor(self.r, self.g, self.b)
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl Serialize for HexColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// Material palette
const BLUE_500: HexColor = HexColor::new(0x21, 0x96, 0xF3);
const BLUE_800: HexColor = HexColor::new(0x15, 0x65, 0xC0);
const BLUE_900: HexColor = HexColor::new(0x0D, 0x47, 0xA1);
const GREEN_600: HexColor = HexColor::new(0x43, 0xA0, 0x47);
const GREEN_800: HexColor = HexColor::new(0x2E, 0x7D, 0x32);
const GREEN_900: HexColor = HexColor::new(0x1B, 0x5E, 0x20);

/// Colour of a bar series.
///
/// Percentile statistics have no dedicated shade and share the median colour.
pub fn bar_color(statistic: Statistic, variant: Variant) -> HexColor {
    match (statistic, variant) {
        (Statistic::Min, Variant::Xml) => BLUE_500,
        (Statistic::Max, Variant::Xml) => BLUE_900,
        (Statistic::Min, Variant::Compose) => GREEN_600,
        (Statistic::Max, Variant::Compose) => GREEN_900,
        (_, variant) => line_color(variant),
    }
}

/// Colour of a percentile line series.
pub fn line_color(variant: Variant) -> HexColor {
    match variant {
        Variant::Xml => BLUE_800,
        Variant::Compose => GREEN_800,
    }
}

/// Plot area background.
pub const PLOT_BACKGROUND: HexColor = HexColor::new(0xED, 0xED, 0xED);

/// Figure background.
pub const PAPER_BACKGROUND: HexColor = HexColor::new(0xFF, 0xFF, 0xFF);

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Statistic::Min, Variant::Xml, "#2196F3")]
    #[case(Statistic::Median, Variant::Xml, "#1565C0")]
    #[case(Statistic::Max, Variant::Xml, "#0D47A1")]
    #[case(Statistic::Min, Variant::Compose, "#43A047")]
    #[case(Statistic::Median, Variant::Compose, "#2E7D32")]
    #[case(Statistic::Max, Variant::Compose, "#1B5E20")]
    fn test_bar_colors_match_material_shades(
        #[case] statistic: Statistic,
        #[case] variant: Variant,
        #[case] expected: &str,
    ) {
        assert_eq!(bar_color(statistic, variant).to_string(), expected);
    }

    #[test]
    fn test_line_colors_match_median_bars() {
        for variant in Variant::ALL {
            assert_eq!(line_color(variant), bar_color(Statistic::Median, variant));
        }
        assert_eq!(line_color(Variant::Xml).to_string(), "#1565C0");
        assert_eq!(line_color(Variant::Compose).to_string(), "#2E7D32");
    }

    #[test]
    fn test_serializes_as_hex_string() {
        let json = serde_json::to_string(&PLOT_BACKGROUND).unwrap();
        assert_eq!(json, "\"#EDEDED\"");
    }
}
