//! Reporting: table model, coefficient formatting, display labels, LaTeX.
//!
//! Formatting lives here so the diagnostics and model code only produce
//! numbers, and every output change is localized.

pub mod format;
pub mod labels;
pub mod latex;
pub mod table;

pub use format::{
    DESIRED_ORDER, append_information_criteria, build_model_table, format_coef_std, format_fit_summary, select_order,
    stars,
};
pub use labels::{LabelFamily, display_label};
pub use latex::{make_label, render_latex};
pub use table::{Cell, MISSING, Row, Table};
