//! Output routing: tables and figures land under the directories named in the
//! configuration file.
//!
//! Tables go to `<root>/<tables_dir>/<subfolder>/<filename>` and the extension
//! picks the serializer (`.tex` or `.csv`). Figures go to
//! `<root>/<figures_dir>/<subfolder>/<name>.<plot_format>`.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::ProjectConfig;
use crate::domain::{OutputCategory, Series};
use crate::error::AppError;
use crate::report::{Cell, LabelFamily, Table, display_label, render_latex};

/// Figure formats the SVG backend can produce.
pub const SUPPORTED_PLOT_FORMATS: &[&str] = &["svg"];

/// Where and how a table is exported.
#[derive(Debug, Clone, PartialEq)]
pub struct TableOutput {
    pub filename: String,
    pub subfolder: String,
    pub caption: Option<String>,
    pub notes: Vec<String>,
    pub family: LabelFamily,
}

impl TableOutput {
    /// A model table under `models/`.
    pub fn estimation(filename: &str, caption: &str, notes: Vec<String>) -> Self {
        Self {
            filename: filename.to_string(),
            subfolder: "models".to_string(),
            caption: Some(caption.to_string()),
            notes,
            family: LabelFamily::Estimation,
        }
    }

    /// A diagnostics table under `diagnostics/`.
    pub fn diagnostics(filename: &str, caption: &str, notes: Vec<String>) -> Self {
        Self {
            filename: filename.to_string(),
            subfolder: "diagnostics".to_string(),
            caption: Some(caption.to_string()),
            notes,
            family: LabelFamily::Generic,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TableFormat {
    Latex,
    Csv,
}

impl TableFormat {
    fn from_filename(filename: &str) -> Result<Self, AppError> {
        match Path::new(filename).extension().and_then(|e| e.to_str()) {
            Some("tex") => Ok(TableFormat::Latex),
            Some("csv") => Ok(TableFormat::Csv),
            _ => Err(AppError::config(format!(
                "Unsupported table format for '{filename}' (expected .tex or .csv)."
            ))),
        }
    }
}

/// Create `dir` and its parents if needed.
pub fn ensure_dir(dir: &Path) -> Result<(), AppError> {
    fs::create_dir_all(dir).map_err(|e| AppError::export(dir, e))
}

/// Export `table` and return the written path.
pub fn save_table(config: &ProjectConfig, table: &Table, output: &TableOutput) -> Result<PathBuf, AppError> {
    let format = TableFormat::from_filename(&output.filename)?;

    let dir = config.category_dir(OutputCategory::Tables)?.join(&output.subfolder);
    ensure_dir(&dir)?;
    let path = dir.join(&output.filename);

    match format {
        TableFormat::Latex => {
            let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
            let latex = render_latex(table, output.family, stem, output.caption.as_deref(), &output.notes);
            fs::write(&path, latex).map_err(|e| AppError::export(&path, e))?;
        }
        TableFormat::Csv => write_table_csv(&path, table, output.family)?,
    }

    tracing::info!(path = %path.display(), rows = table.rows.len(), "table saved");
    Ok(path)
}

fn csv_field(cell: &Cell) -> String {
    match cell {
        Cell::Text(s) => s.clone(),
        Cell::Float(v) if v.is_finite() => v.to_string(),
        Cell::Float(_) | Cell::Missing => String::new(),
        Cell::Int(v) => v.to_string(),
    }
}

/// Plain CSV dump: a leading row-label column, then one column per table
/// column. Floats keep full precision; missing cells are empty.
pub fn write_table_csv(path: &Path, table: &Table, family: LabelFamily) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| AppError::export(path, e))?;

    let header = std::iter::once("").chain(table.columns.iter().map(String::as_str));
    writer.write_record(header).map_err(|e| AppError::export(path, e))?;

    for row in &table.rows {
        let mut record = vec![display_label(family, &row.key).to_string()];
        record.extend(row.cells.iter().map(csv_field));
        writer.write_record(&record).map_err(|e| AppError::export(path, e))?;
    }

    writer.flush().map_err(|e| AppError::export(path, e))
}

/// Resolve the output path of a figure, creating its directory. The format
/// comes from `settings.plot_format`.
pub fn figure_path(config: &ProjectConfig, name: &str, subfolder: &str) -> Result<PathBuf, AppError> {
    let format = config.settings().plot_format.as_str();
    if !SUPPORTED_PLOT_FORMATS.contains(&format) {
        return Err(AppError::config(format!(
            "Unsupported plot_format '{format}' (supported: {}).",
            SUPPORTED_PLOT_FORMATS.join(", ")
        )));
    }

    let dir = config.category_dir(OutputCategory::Figures)?.join(subfolder);
    ensure_dir(&dir)?;
    Ok(dir.join(name).with_extension(format))
}

/// Write a dated series as `date,value` rows.
pub fn write_series_csv(path: &Path, series: &Series) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| AppError::export(path, e))?;
    for obs in &series.observations {
        writer.serialize(obs).map_err(|e| AppError::export(path, e))?;
    }
    writer.flush().map_err(|e| AppError::export(path, e))
}
