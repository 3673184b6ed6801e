//! Per-dataset descriptive statistics and the two diagnostics tables.

use chrono::NaiveDate;

use crate::diagnostics::hypothesis::{Ar1Check, TestStat, ar1_check, arch_lm, demean, jarque_bera, ljung_box};
use crate::domain::{DatasetId, Series};
use crate::error::AppError;
use crate::math::{kurtosis, mean, skewness, std_dev};
use crate::report::format::stars;
use crate::report::table::{Cell, Table};

/// Lags of the ARCH-LM regression.
pub const ARCH_LM_LAGS: usize = 10;

/// Lag of the Ljung–Box Q statistic in the descriptives table.
pub const LJUNG_BOX_LAGS: usize = 5;

/// Sample period and size of one dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetMetadata {
    pub dataset: DatasetId,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub nobs: usize,
}

impl DatasetMetadata {
    pub fn of(series: &Series) -> Result<Self, AppError> {
        let (Some(start), Some(end)) = (series.first_date(), series.last_date()) else {
            return Err(AppError::data(format!("{} has no observations.", series.dataset)));
        };
        Ok(Self {
            dataset: series.dataset,
            start,
            end,
            nobs: series.len(),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DescriptiveStats {
    pub mean: f64,
    pub std_dev: f64,
    pub skewness: f64,
    /// Pearson (non-excess) kurtosis.
    pub kurtosis: f64,
    pub ar1: Option<Ar1Check>,
    pub jarque_bera: TestStat,
    pub arch_lm: Option<TestStat>,
    pub ljung_box: Option<TestStat>,
}

/// Moments plus AR(1), Jarque–Bera, ARCH-LM and Ljung–Box on `values`.
pub fn describe(values: &[f64]) -> DescriptiveStats {
    DescriptiveStats {
        mean: mean(values),
        std_dev: std_dev(values),
        skewness: skewness(values),
        kurtosis: kurtosis(values),
        ar1: ar1_check(values),
        jarque_bera: jarque_bera(values),
        arch_lm: arch_lm(&demean(values), ARCH_LM_LAGS),
        ljung_box: ljung_box(values, LJUNG_BOX_LAGS),
    }
}

fn starred(stat: Option<TestStat>) -> Cell {
    match stat {
        Some(t) if t.statistic.is_finite() => Cell::Text(format!("{:.2}{}", t.statistic, stars(t.p_value))),
        _ => Cell::Missing,
    }
}

/// One row per dataset: start date, end date, observation count.
pub fn metadata_table(rows: &[DatasetMetadata]) -> Table {
    let records = rows
        .iter()
        .map(|m| {
            (
                m.dataset.label().to_string(),
                vec![
                    ("Start Date".to_string(), Cell::Text(m.start.format("%Y-%m-%d").to_string())),
                    ("End Date".to_string(), Cell::Text(m.end.format("%Y-%m-%d").to_string())),
                    ("Obs ($T$)".to_string(), Cell::from(m.nobs)),
                ],
            )
        })
        .collect();
    Table::from_records(records)
}

/// One row per dataset: moments as floats, tests as starred strings.
pub fn descriptives_table(rows: &[(DatasetId, DescriptiveStats)]) -> Table {
    let records = rows
        .iter()
        .map(|(id, s)| {
            let ar1 = match s.ar1 {
                Some(c) => Cell::Text(format!("{:.4}{}", c.rho, stars(c.p_value))),
                None => Cell::Missing,
            };
            (
                id.label().to_string(),
                vec![
                    ("Mean".to_string(), Cell::Float(s.mean)),
                    ("Std Dev".to_string(), Cell::Float(s.std_dev)),
                    ("Skew".to_string(), Cell::Float(s.skewness)),
                    ("Kurt".to_string(), Cell::Float(s.kurtosis)),
                    ("AR(1)".to_string(), ar1),
                    ("JB-Stat".to_string(), starred(Some(s.jarque_bera))),
                    ("ARCH-LM".to_string(), starred(s.arch_lm)),
                    (format!("Q({LJUNG_BOX_LAGS})"), starred(s.ljung_box)),
                ],
            )
        })
        .collect();
    Table::from_records(records)
}
