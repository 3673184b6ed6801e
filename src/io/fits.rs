//! Externally estimated fits on disk.
//!
//! Layout under the configured `fits_dir`:
//!
//! ```text
//! fits/
//!   dataset-i/
//!     returns.csv        <- written by `export-inputs`
//!     request.json       <- written by `export-inputs`
//!     garch-model.json   <- written by the estimator
//!     aparch-model.json
//! ```

use std::fs::File;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::{DatasetId, Series};
use crate::error::AppError;
use crate::models::{Estimator, FitRecord, ModelFit, VolatilitySpec};

/// One model the estimator is asked to fit, and where to put the result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestedFit {
    pub output: String,
    pub spec: VolatilitySpec,
}

/// Contents of `request.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimationRequest {
    pub dataset: DatasetId,
    pub returns: String,
    pub nobs: usize,
    pub models: Vec<RequestedFit>,
}

/// Reads fits from `<root>/<dataset-slug>/<model-slug>.json`.
#[derive(Debug, Clone)]
pub struct JsonFitStore {
    root: PathBuf,
}

impl JsonFitStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn dataset_dir(&self, dataset: DatasetId) -> PathBuf {
        self.root.join(dataset.slug())
    }

    pub fn fit_path(&self, dataset: DatasetId, spec: &VolatilitySpec) -> PathBuf {
        self.dataset_dir(dataset).join(fit_file_name(spec))
    }
}

pub fn fit_file_name(spec: &VolatilitySpec) -> String {
    format!("{}.json", spec.slug())
}

impl Estimator for JsonFitStore {
    fn estimate(&self, series: &Series, spec: &VolatilitySpec) -> Result<Box<dyn ModelFit>, AppError> {
        let path = self.fit_path(series.dataset, spec);
        let record = read_fit_json(&path)?;
        record.validate()?;

        if let Some(nobs) = record.nobs {
            if nobs != series.len() {
                return Err(AppError::estimation(format!(
                    "{} was estimated on {nobs} observations but {} has {}.",
                    spec.name,
                    series.dataset,
                    series.len()
                )));
            }
        }

        tracing::debug!(model = %spec.describe(), path = %path.display(), "loaded fit");
        Ok(Box::new(record))
    }
}

/// Read one fit result.
pub fn read_fit_json(path: &Path) -> Result<FitRecord, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::estimation(format!(
            "No fit result at '{}': {e}. Run `fxvol export-inputs` and estimate the models first.",
            path.display()
        ))
    })?;
    serde_json::from_reader(file)
        .map_err(|e| AppError::estimation(format!("Invalid fit JSON '{}': {e}", path.display())))
}

/// Write the estimation request for one table.
pub fn write_request_json(path: &Path, request: &EstimationRequest) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| AppError::export(path, e))?;
    serde_json::to_writer_pretty(file, request).map_err(|e| AppError::export(path, e))
}
