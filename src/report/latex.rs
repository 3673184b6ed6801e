//! LaTeX serialization of a `Table`.
//!
//! Output is a `table` float wrapping a `threeparttable`, so notes can sit
//! under a full-width `tabularx`:
//!
//! ```text
//! \begin{table}[htbp]
//! \centering
//! \begin{threeparttable}
//! \caption{...}
//! \label{tab:...}
//! \begin{tabularx}{\textwidth}{@{\extracolsep{\fill}}lcc}
//! \toprule
//!  & GARCH & FIGARCH \\
//! \midrule
//! ...
//! \bottomrule
//! \end{tabularx}
//!
//! \vspace{0.1cm}
//! \begin{tablenotes}
//! \small
//! \item Note 1: ...
//! \end{tablenotes}
//! \end{threeparttable}
//! \end{table}
//! ```

use crate::report::format::PRECISION;
use crate::report::labels::{LabelFamily, display_label};
use crate::report::table::Table;

/// Legend emitted as the first note whenever a cell carries stars.
pub const SIGNIFICANCE_LEGEND: &str =
    r"\textit{Note:} ***, **, and * denote significance at the 1\%, 5\%, and 10\% levels, respectively.";

/// Cross-reference label for a filename stem, e.g. `My Results Table!!` →
/// `tab:my-results-table`.
pub fn make_label(stem: &str) -> String {
    let mut label = String::with_capacity(stem.len());
    for ch in stem.to_lowercase().chars() {
        let ch = if ch == '_' || ch == ' ' { '-' } else { ch };
        if !(ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-') {
            continue;
        }
        if ch == '-' && label.ends_with('-') {
            continue;
        }
        label.push(ch);
    }
    format!("tab:{}", label.trim_matches('-'))
}

/// Caption used when none is given: underscores become spaces, then every
/// word is capitalized (a letter following a non-letter starts a word).
pub fn default_caption(stem: &str) -> String {
    let mut out = String::with_capacity(stem.len());
    let mut prev_cased = false;
    for ch in stem.chars() {
        let ch = if ch == '_' { ' ' } else { ch };
        if ch.is_alphabetic() {
            if prev_cased {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_cased = true;
        } else {
            out.push(ch);
            prev_cased = false;
        }
    }
    out
}

/// Escape bare `%` so it survives LaTeX. An existing `\%` is kept as is.
pub fn escape_percent(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev = None;
    for ch in text.chars() {
        if ch == '%' && prev != Some('\\') {
            out.push('\\');
        }
        out.push(ch);
        prev = Some(ch);
    }
    out
}

/// Notes block items: legend first when `has_stars`, then `notes` in order.
pub fn note_items(has_stars: bool, notes: &[String]) -> Vec<String> {
    let legend = has_stars.then_some(SIGNIFICANCE_LEGEND);
    legend
        .into_iter()
        .chain(notes.iter().map(String::as_str))
        .enumerate()
        .map(|(i, note)| format!(r"\item Note {}: {}", i + 1, escape_percent(note)))
        .collect()
}

fn notes_block(table: &Table, notes: &[String]) -> Option<String> {
    let items = note_items(table.has_significance_markers(), notes);
    if items.is_empty() {
        return None;
    }
    let mut out = String::from("\n\\vspace{0.1cm}\n\\begin{tablenotes}\n\\small\n");
    for item in items {
        out.push_str(&item);
        out.push('\n');
    }
    out.push_str("\\end{tablenotes}\n");
    Some(out)
}

/// Render `table` as a LaTeX fragment. Row keys are mapped through `family`
/// here and nowhere else.
pub fn render_latex(
    table: &Table,
    family: LabelFamily,
    stem: &str,
    caption: Option<&str>,
    notes: &[String],
) -> String {
    let caption = caption.map(str::to_string).unwrap_or_else(|| default_caption(stem));
    let col_fmt = format!("l{}", "c".repeat(table.columns.len()));

    let mut out = String::new();
    out.push_str("\\begin{table}[htbp]\n\\centering\n\\begin{threeparttable}\n");
    out.push_str(&format!("\\caption{{{caption}}}\n"));
    out.push_str(&format!("\\label{{{}}}\n", make_label(stem)));
    out.push_str(&format!("\\begin{{tabularx}}{{\\textwidth}}{{@{{\\extracolsep{{\\fill}}}}{col_fmt}}}\n"));
    out.push_str("\\toprule\n");

    let header: Vec<&str> = std::iter::once("").chain(table.columns.iter().map(String::as_str)).collect();
    out.push_str(&format!("{} \\\\\n", header.join(" & ")));
    out.push_str("\\midrule\n");

    for row in &table.rows {
        let mut fields = vec![display_label(family, &row.key).to_string()];
        fields.extend(row.cells.iter().map(|c| c.render(PRECISION)));
        out.push_str(&format!("{} \\\\\n", fields.join(" & ")));
    }

    out.push_str("\\bottomrule\n\\end{tabularx}\n");
    if let Some(block) = notes_block(table, notes) {
        out.push_str(&block);
    }
    out.push_str("\\end{threeparttable}\n\\end{table}\n");
    out
}
