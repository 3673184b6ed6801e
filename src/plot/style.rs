//! Chart styling, passed explicitly to every figure.

use plotters::style::RGBColor;

/// Matplotlib's `tab:blue`.
pub const TAB_BLUE: RGBColor = RGBColor(31, 119, 180);
/// Matplotlib's `tab:red`.
pub const TAB_RED: RGBColor = RGBColor(214, 39, 40);
pub const GRAY: RGBColor = RGBColor(128, 128, 128);
pub const INK: RGBColor = RGBColor(0, 0, 0);

/// Serif, high-contrast academic style.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartStyle {
    pub font_family: String,
    /// Base font size in points.
    pub font_pt: f64,
    /// Output resolution; canvas pixels are inches × dpi.
    pub dpi: u32,
    /// Line width in points.
    pub line_pt: f64,
}

impl ChartStyle {
    pub fn academic(dpi: u32) -> Self {
        Self {
            font_family: "serif".to_string(),
            font_pt: 10.0,
            dpi,
            line_pt: 1.0,
        }
    }

    /// Canvas size in pixels for a figure of `width × height` inches.
    pub fn canvas(&self, width_in: f64, height_in: f64) -> (u32, u32) {
        let px = |inches: f64| (inches * self.dpi as f64).round().max(1.0) as u32;
        (px(width_in), px(height_in))
    }

    /// Points to pixels at this dpi.
    pub fn px(&self, pt: f64) -> u32 {
        (pt * self.dpi as f64 / 72.0).round().max(1.0) as u32
    }

    pub fn font(&self) -> (&str, u32) {
        (self.font_family.as_str(), self.px(self.font_pt))
    }

    pub fn title_font(&self) -> (&str, u32) {
        (self.font_family.as_str(), self.px(self.font_pt * 1.2))
    }

    pub fn stroke(&self) -> u32 {
        self.px(self.line_pt)
    }
}
