//! SVG figures for the descriptive analysis.
//!
//! Styling is an explicit `ChartStyle` value; nothing here touches global
//! state.

pub mod figures;
pub mod style;

pub use figures::{acf_pacf, distribution_comparison, volatility_clustering};
pub use style::ChartStyle;
