//! CSV ingest for the exchange-rate source file.
//!
//! Expected layout: the first column holds the observation date, the second
//! column holds the rate. Extra columns are ignored.
//!
//! - **Strict dates**: an unparseable date is a data error (the file is
//!   malformed, not just sparse).
//! - **Lenient values**: empty or non-numeric values (e.g. `.` placeholders in
//!   FRED exports) are skipped and reported, like dropping missing rows.
//! - **Sorted output**: observations are returned in ascending date order.

use std::fs::File;
use std::path::Path;

use chrono::NaiveDate;

use crate::domain::Observation;
use crate::error::AppError;

/// A row that was skipped during ingest.
#[derive(Debug, Clone)]
pub struct SkippedRow {
    pub line: usize,
    pub message: String,
}

/// Raw price observations plus ingest bookkeeping.
#[derive(Debug, Clone)]
pub struct PriceData {
    /// Name of the value column (e.g. `DEXJPUS`).
    pub value_column: String,
    pub observations: Vec<Observation>,
    pub skipped: Vec<SkippedRow>,
    pub rows_read: usize,
}

/// Load and sort the raw rate series.
pub fn load_price_csv(path: &Path) -> Result<PriceData, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::data(format!("Failed to open CSV '{}': {e}", path.display())))?;

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let headers = reader
        .headers()
        .map_err(|e| AppError::data(format!("Failed to read CSV headers: {e}")))?
        .clone();
    if headers.len() < 2 {
        return Err(AppError::data(format!(
            "'{}' needs a date column and a value column, found {} column(s).",
            path.display(),
            headers.len()
        )));
    }
    let value_column = normalize_header_name(headers.get(1).unwrap_or_default());

    let mut observations = Vec::new();
    let mut skipped = Vec::new();
    let mut rows_read = 0usize;

    for (idx, result) in reader.records().enumerate() {
        // +2: header is line 1, records are 1-based after it.
        let line = idx + 2;
        rows_read += 1;

        let record = result.map_err(|e| AppError::data(format!("CSV parse error on line {line}: {e}")))?;
        let raw_date = record.get(0).unwrap_or_default();
        let date = parse_date(raw_date).map_err(|e| AppError::data(format!("Line {line}: {e}")))?;

        match parse_value(record.get(1)) {
            Some(value) => observations.push(Observation { date, value }),
            None => skipped.push(SkippedRow {
                line,
                message: format!("Missing/invalid value on {date}."),
            }),
        }
    }

    if !skipped.is_empty() {
        tracing::warn!(
            skipped = skipped.len(),
            first_line = skipped[0].line,
            "skipped rows without a usable rate"
        );
    }

    // Stable sort keeps file order for duplicate dates.
    observations.sort_by_key(|o| o.date);

    tracing::debug!(rows_read, rows_used = observations.len(), file = %path.display(), "ingested price CSV");

    Ok(PriceData {
        value_column,
        observations,
        skipped,
        rows_read,
    })
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet exports sometimes prefix the first header with a BOM.
    name.trim().trim_start_matches('\u{feff}').to_string()
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    let s = s.trim().trim_start_matches('\u{feff}');
    const FMTS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y", "%m/%d/%Y"];
    for fmt in FMTS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(d);
        }
    }
    Err(format!("Invalid date '{s}'. Expected YYYY-MM-DD."))
}

fn parse_value(s: Option<&str>) -> Option<f64> {
    let v = s?.trim().parse::<f64>().ok()?;
    if v.is_finite() { Some(v) } else { None }
}
