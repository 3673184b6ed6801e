//! In-memory formatted table.
//!
//! Rows keep their *raw* identifiers (`alpha[1]`, `alpha[1]_std`, `Dataset I`);
//! display labels are applied once, by the renderer. Row and column order is
//! insertion order, so rendering is deterministic.

use std::collections::BTreeMap;

/// Placeholder for a value a column does not have.
pub const MISSING: &str = "---";

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Float(f64),
    Int(i64),
    Missing,
}

impl Cell {
    /// Render with `precision` decimals for floats. Non-finite floats count as
    /// missing.
    pub fn render(&self, precision: usize) -> String {
        match self {
            Cell::Text(s) => s.clone(),
            Cell::Float(v) if v.is_finite() => format!("{v:.precision$}"),
            Cell::Float(_) | Cell::Missing => MISSING.to_string(),
            Cell::Int(v) => v.to_string(),
        }
    }

    pub fn has_marker(&self) -> bool {
        matches!(self, Cell::Text(s) if s.contains('*'))
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Float(value)
    }
}

impl From<usize> for Cell {
    fn from(value: usize) -> Self {
        Cell::Int(value as i64)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub key: String,
    pub cells: Vec<Cell>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Build from per-column string maps, keeping only `row_order` entries
    /// (in that order). A column without an entry gets `Cell::Missing`.
    pub fn from_columns(columns: &[(String, BTreeMap<String, String>)], row_order: &[&str]) -> Self {
        let mut table = Table::new(columns.iter().map(|(name, _)| name.clone()).collect());
        for key in row_order {
            let cells = columns
                .iter()
                .map(|(_, entries)| entries.get(*key).map(|s| Cell::Text(s.clone())).unwrap_or(Cell::Missing))
                .collect();
            table.rows.push(Row {
                key: (*key).to_string(),
                cells,
            });
        }
        table
    }

    /// Build from row records of `(column, cell)` pairs. Columns appear in
    /// first-seen order; gaps are `Cell::Missing`.
    pub fn from_records(records: Vec<(String, Vec<(String, Cell)>)>) -> Self {
        let mut columns: Vec<String> = Vec::new();
        for (_, fields) in &records {
            for (col, _) in fields {
                if !columns.contains(col) {
                    columns.push(col.clone());
                }
            }
        }

        let mut table = Table::new(columns);
        for (key, fields) in records {
            let mut cells = vec![Cell::Missing; table.columns.len()];
            for (col, cell) in fields {
                if let Some(idx) = table.columns.iter().position(|c| *c == col) {
                    cells[idx] = cell;
                }
            }
            table.rows.push(Row { key, cells });
        }
        table
    }

    /// Append a row; short rows are padded with `Cell::Missing`.
    pub fn push_row(&mut self, key: impl Into<String>, mut cells: Vec<Cell>) {
        debug_assert!(cells.len() <= self.columns.len(), "row wider than the table");
        cells.resize(self.columns.len(), Cell::Missing);
        self.rows.push(Row { key: key.into(), cells });
    }

    pub fn has_significance_markers(&self) -> bool {
        self.rows.iter().flat_map(|r| r.cells.iter()).any(Cell::has_marker)
    }

    pub fn row(&self, key: &str) -> Option<&Row> {
        self.rows.iter().find(|r| r.key == key)
    }

    pub fn row_keys(&self) -> Vec<&str> {
        self.rows.iter().map(|r| r.key.as_str()).collect()
    }
}
