//! Plot Configuration
//! Options shared read-only by every chart, plus the tooltip overlay look.

use chrono::DateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Series color used on every chart.
pub const SERIES_COLOR: HexColor = HexColor::new(0x00, 0x22, 0x67);

#[derive(Error, Debug, PartialEq)]
#[error("invalid color {0:?}, expected #rgb or #rrggbb")]
pub struct ColorParseError(String);

/// An sRGB color written as `#rgb` or `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl HexColor {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_egui(self) -> egui::Color32 {
        egui::Color32::from_rgb(self.r, self.g, self.b)
    }

    pub fn to_plotters(self) -> plotters::style::RGBColor {
        plotters::style::RGBColor(self.r, self.g, self.b)
    }
}

impl FromStr for HexColor {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ColorParseError(s.to_string());
        let hex = s.strip_prefix('#').ok_or_else(err)?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(err());
        }

        let channel = |i: usize, width: usize| -> Result<u8, ColorParseError> {
            let v = u8::from_str_radix(&hex[i * width..(i + 1) * width], 16).map_err(|_| err())?;
            // #fdd means #ffdddd
            Ok(if width == 1 { v * 17 } else { v })
        };

        match hex.len() {
            3 => Ok(Self::new(channel(0, 1)?, channel(1, 1)?, channel(2, 1)?)),
            6 => Ok(Self::new(channel(0, 2)?, channel(1, 2)?, channel(2, 2)?)),
            _ => Err(err()),
        }
    }
}

impl TryFrom<String> for HexColor {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<HexColor> for String {
    fn from(color: HexColor) -> Self {
        color.to_string()
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// How x values are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisMode {
    /// x is Unix milliseconds.
    #[default]
    Time,
    Linear,
}

impl AxisMode {
    /// Label for an x tick.
    pub fn format_tick(self, x: f64) -> String {
        match self {
            AxisMode::Time => DateTime::from_timestamp_millis(x.round() as i64)
                .map(|dt| dt.format("%b %-d, %Y").to_string())
                .unwrap_or_default(),
            AxisMode::Linear => {
                let formatted = format!("{:.2}", x);
                let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
                match trimmed {
                    "" | "-" => "0".to_string(),
                    _ => trimmed.to_string(),
                }
            }
        }
    }
}

/// Legend corner, compass style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegendPosition {
    Ne,
    #[default]
    Nw,
    Se,
    Sw,
}

impl LegendPosition {
    pub fn to_egui(self) -> egui_plot::Corner {
        match self {
            LegendPosition::Ne => egui_plot::Corner::RightTop,
            LegendPosition::Nw => egui_plot::Corner::LeftTop,
            LegendPosition::Se => egui_plot::Corner::RightBottom,
            LegendPosition::Sw => egui_plot::Corner::LeftBottom,
        }
    }

    pub fn to_plotters(self) -> plotters::chart::SeriesLabelPosition {
        use plotters::chart::SeriesLabelPosition;
        match self {
            LegendPosition::Ne => SeriesLabelPosition::UpperRight,
            LegendPosition::Nw => SeriesLabelPosition::UpperLeft,
            LegendPosition::Se => SeriesLabelPosition::LowerRight,
            LegendPosition::Sw => SeriesLabelPosition::LowerLeft,
        }
    }
}

/// Options every chart is drawn with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    pub x_axis_mode: AxisMode,
    pub legend_position: LegendPosition,
    /// Whether hover events are delivered to the tooltip.
    pub grid_hoverable: bool,
    /// Plot border in pixels; 0 draws no border.
    pub grid_border_width: u32,
    pub color: HexColor,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            x_axis_mode: AxisMode::Time,
            legend_position: LegendPosition::Nw,
            grid_hoverable: true,
            grid_border_width: 0,
            color: SERIES_COLOR,
        }
    }
}

/// Look and placement of the shared tooltip overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TooltipStyle {
    pub border_color: HexColor,
    pub border_width: f32,
    pub padding: f32,
    pub background: HexColor,
    pub opacity: f32,
    /// Distance right of and below the pointer, in pixels.
    pub offset: f64,
}

impl Default for TooltipStyle {
    fn default() -> Self {
        Self {
            border_color: HexColor::new(0xff, 0xdd, 0xdd),
            border_width: 1.0,
            padding: 2.0,
            background: HexColor::new(0xff, 0xee, 0xee),
            opacity: 0.80,
            offset: 5.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_short_and_long_hex() {
        assert_eq!("#002267".parse::<HexColor>(), Ok(SERIES_COLOR));
        assert_eq!("#fdd".parse::<HexColor>(), Ok(HexColor::new(0xff, 0xdd, 0xdd)));
        assert_eq!(HexColor::new(0xff, 0xee, 0xee).to_string(), "#ffeeee");
    }

    #[test]
    fn test_reject_bad_hex() {
        for bad in ["002267", "#00226", "#gg0000", "#", "#é12"] {
            assert!(bad.parse::<HexColor>().is_err(), "{bad} should not parse");
        }
    }

    #[test]
    fn test_defaults_match_page_options() {
        let config = PlotConfig::default();
        assert_eq!(config.x_axis_mode, AxisMode::Time);
        assert_eq!(config.legend_position, LegendPosition::Nw);
        assert!(config.grid_hoverable);
        assert_eq!(config.grid_border_width, 0);
        assert_eq!(config.color.to_string(), "#002267");
        assert_eq!(TooltipStyle::default().offset, 5.0);
    }

    #[test]
    fn test_time_ticks_are_dates() {
        assert_eq!(AxisMode::Time.format_tick(1_514_678_400_000.0), "Dec 31, 2017");
        assert_eq!(AxisMode::Linear.format_tick(12.50), "12.5");
        assert_eq!(AxisMode::Linear.format_tick(3.0), "3");
        assert_eq!(AxisMode::Linear.format_tick(0.0), "0");
    }

    #[test]
    fn test_partial_override() {
        let config: PlotConfig =
            serde_json::from_str(r##"{"legend_position": "se", "color": "#fff"}"##).unwrap();
        assert_eq!(config.legend_position, LegendPosition::Se);
        assert_eq!(config.color, HexColor::new(255, 255, 255));
        assert!(config.grid_hoverable);
    }
}
