//! Shared domain types.
//!
//! Kept lightweight and serializable so the same values can drive the
//! in-memory pipeline and the JSON handed to the external estimator.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Named sample periods of the study.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DatasetId {
    #[serde(rename = "Dataset I")]
    DatasetI,
    #[serde(rename = "Dataset II")]
    DatasetII,
    #[serde(rename = "Extended")]
    Extended,
    /// Everything in the source file.
    #[serde(rename = "Global")]
    Global,
}

impl DatasetId {
    /// The three estimation samples, in table order.
    pub const SAMPLES: [DatasetId; 3] = [DatasetId::DatasetI, DatasetId::DatasetII, DatasetId::Extended];

    pub fn label(self) -> &'static str {
        match self {
            DatasetId::DatasetI => "Dataset I",
            DatasetId::DatasetII => "Dataset II",
            DatasetId::Extended => "Extended",
            DatasetId::Global => "Global",
        }
    }

    /// Directory/file friendly name.
    pub fn slug(self) -> &'static str {
        match self {
            DatasetId::DatasetI => "dataset-i",
            DatasetId::DatasetII => "dataset-ii",
            DatasetId::Extended => "extended",
            DatasetId::Global => "global",
        }
    }

    /// Inclusive date bounds, `None` for the full range.
    pub fn date_range(self) -> Option<(NaiveDate, NaiveDate)> {
        let (start, end) = match self {
            DatasetId::DatasetI => ((1978, 1, 3), (1994, 6, 29)),
            DatasetId::DatasetII => ((1986, 1, 2), (2003, 2, 21)),
            DatasetId::Extended => ((2003, 1, 1), (2023, 12, 31)),
            DatasetId::Global => return None,
        };
        Some((ymd(start), ymd(end)))
    }
}

fn ymd((y, m, d): (i32, u32, u32)) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or(NaiveDate::MIN)
}

impl fmt::Display for DatasetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DatasetId {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Dataset I" => Ok(DatasetId::DatasetI),
            "Dataset II" => Ok(DatasetId::DatasetII),
            "Extended" => Ok(DatasetId::Extended),
            "Global" => Ok(DatasetId::Global),
            other => Err(AppError::data(format!(
                "Unknown dataset '{other}'. Expected one of: Dataset I, Dataset II, Extended, Global."
            ))),
        }
    }
}

/// Transform applied to the price series after slicing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transform {
    /// Raw exchange-rate levels.
    Levels,
    /// `scale × ln(x_t / x_{t-1})`, first observation dropped.
    LogReturns { scale: f64 },
}

impl Transform {
    /// Percentage log returns, the convention used throughout the study.
    pub const PERCENT_LOG: Transform = Transform::LogReturns { scale: 100.0 };
}

/// One dated observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub date: NaiveDate,
    pub value: f64,
}

/// A date-sorted series with its provenance.
#[derive(Debug, Clone)]
pub struct Series {
    pub dataset: DatasetId,
    pub transform: Transform,
    pub observations: Vec<Observation>,
}

impl Series {
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn values(&self) -> Vec<f64> {
        self.observations.iter().map(|o| o.value).collect()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.observations.first().map(|o| o.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.observations.last().map(|o| o.date)
    }
}

/// Where an artifact is routed under the output root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputCategory {
    Figures,
    Tables,
}

impl OutputCategory {
    /// Name used in the config (`<name>_dir`) and in messages.
    pub fn name(self) -> &'static str {
        match self {
            OutputCategory::Figures => "figures",
            OutputCategory::Tables => "tables",
        }
    }
}

impl FromStr for OutputCategory {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "figures" => Ok(OutputCategory::Figures),
            "tables" => Ok(OutputCategory::Tables),
            other => Err(AppError::config(format!(
                "Unknown output category '{other}' (expected 'figures' or 'tables')."
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dataset_labels_round_trip_through_from_str() {
        for id in [DatasetId::DatasetI, DatasetId::DatasetII, DatasetId::Extended, DatasetId::Global] {
            assert_eq!(id.label().parse::<DatasetId>().unwrap(), id);
        }
    }

    #[test]
    fn unknown_dataset_is_a_data_error() {
        let err = "Dataset III".parse::<DatasetId>().unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn dataset_ranges_are_ordered() {
        for id in DatasetId::SAMPLES {
            let (start, end) = id.date_range().unwrap();
            assert!(start < end, "{id} range is inverted");
        }
        assert!(DatasetId::Global.date_range().is_none());
    }

    #[test]
    fn unknown_output_category_is_a_config_error() {
        assert_eq!("tables".parse::<OutputCategory>().unwrap(), OutputCategory::Tables);
        let err = "slides".parse::<OutputCategory>().unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }
}
