//! The research steps behind each subcommand.
//!
//! Each function loads what it needs from the configured paths, computes,
//! exports, and returns what was written so `app` can report it. Nothing is
//! printed here.

use std::path::PathBuf;

use crate::config::ProjectConfig;
use crate::data::get_dataset;
use crate::diagnostics::{
    AdfResult, DatasetMetadata, DescriptiveStats, adf, describe, descriptives_table, metadata_table,
};
use crate::domain::{DatasetId, Series, Transform};
use crate::error::AppError;
use crate::io::{
    EstimationRequest, JsonFitStore, PriceData, RequestedFit, TableOutput, ensure_dir, figure_path, fit_file_name,
    load_price_csv, save_table, write_request_json, write_series_csv,
};
use crate::models::{Estimator, ModelFit, ModelTableId};
use crate::plot::{ChartStyle, acf_pacf, distribution_comparison, volatility_clustering};
use crate::report::{append_information_criteria, build_model_table, format_fit_summary};

/// Subfolder of the descriptive figures.
const FIGURE_SUBFOLDER: &str = "descriptives";

/// Options of the descriptives step.
#[derive(Debug, Clone)]
pub struct DescriptivesOptions {
    pub figures: bool,
    pub nlags: usize,
}

#[derive(Debug, Clone)]
pub struct DescriptivesOutput {
    pub tables: Vec<PathBuf>,
    pub figures: Vec<PathBuf>,
    pub adf: Option<AdfResult>,
}

#[derive(Debug, Clone)]
pub struct ModelTableOutput {
    pub path: PathBuf,
    /// Terminal summary (log-likelihood, AIC, BIC per model).
    pub summary: String,
}

/// Load the source file named in the config.
pub fn load_prices(config: &ProjectConfig) -> Result<PriceData, AppError> {
    let path = config.data_file();
    let prices = load_price_csv(&path)?;
    if !prices.skipped.is_empty() {
        tracing::info!(
            skipped = prices.skipped.len(),
            rows = prices.rows_read,
            column = %prices.value_column,
            "dropped rows without a usable value"
        );
    }
    Ok(prices)
}

fn returns(prices: &PriceData, dataset: DatasetId) -> Result<Series, AppError> {
    let series = get_dataset(prices, dataset, Transform::PERCENT_LOG)?;
    tracing::debug!(dataset = %dataset, nobs = series.len(), "prepared log returns");
    Ok(series)
}

/// Diagnostics tables for every sample, ADF on the extended sample, and the
/// descriptive figures.
pub fn run_descriptives(config: &ProjectConfig, options: &DescriptivesOptions) -> Result<DescriptivesOutput, AppError> {
    let prices = load_prices(config)?;

    let mut metadata = Vec::with_capacity(DatasetId::SAMPLES.len());
    let mut stats: Vec<(DatasetId, DescriptiveStats)> = Vec::with_capacity(DatasetId::SAMPLES.len());
    let mut extended = None;

    for id in DatasetId::SAMPLES {
        let series = returns(&prices, id)?;
        metadata.push(DatasetMetadata::of(&series)?);
        stats.push((id, describe(&series.values())));
        if id == DatasetId::Extended {
            extended = Some(series);
        }
    }

    let mut figures = Vec::new();
    let mut adf_result = None;
    if let Some(series) = &extended {
        let values = series.values();

        if options.figures {
            let style = ChartStyle::academic(config.settings().dpi);

            let path = figure_path(config, "volatility_clustering", FIGURE_SUBFOLDER)?;
            volatility_clustering(&path, series, &style)?;
            figures.push(path);

            let path = figure_path(config, "distribution_comparison", FIGURE_SUBFOLDER)?;
            distribution_comparison(&path, &values, "Distributional Analysis", &style)?;
            figures.push(path);

            let path = figure_path(config, "acf_pacf", FIGURE_SUBFOLDER)?;
            acf_pacf(&path, &values, options.nlags, true, &style)?;
            figures.push(path);
        }

        adf_result = adf(&values);
        match adf_result {
            Some(r) => tracing::info!(
                statistic = r.statistic,
                p_value = r.p_value,
                lags = r.used_lag,
                "ADF test on extended returns"
            ),
            None => tracing::warn!("extended sample too short for the ADF test"),
        }
    }

    let metadata_output = TableOutput::diagnostics(
        "dataset_metadata.tex",
        "Summary of Dataset Metadata and Sample Periods",
        vec!["Start and end dates represent the available log-return series after synchronization.".to_string()],
    );
    let descriptives_output = TableOutput::diagnostics(
        "descriptives.tex",
        "Descriptive Statistics and Mean Model Diagnostics",
        vec![r"Returns are defined as $r_t = (\ln S_t - \ln S_{t-1}) \times 100$.".to_string()],
    );

    let tables = vec![
        save_table(config, &metadata_table(&metadata), &metadata_output)?,
        save_table(config, &descriptives_table(&stats), &descriptives_output)?,
    ];

    Ok(DescriptivesOutput {
        tables,
        figures,
        adf: adf_result,
    })
}

/// Collect the fits of one estimation table and export it.
pub fn run_model_table(
    config: &ProjectConfig,
    id: ModelTableId,
    estimator: &dyn Estimator,
) -> Result<ModelTableOutput, AppError> {
    let definition = id.table();
    let prices = load_prices(config)?;
    let series = returns(&prices, definition.dataset)?;

    tracing::info!(dataset = %definition.dataset, columns = ?definition.column_names(), "collecting model fits");
    let mut fits: Vec<(&str, Box<dyn ModelFit>)> = Vec::with_capacity(definition.specs.len());
    for spec in &definition.specs {
        let fit = estimator.estimate(&series, spec)?;
        fits.push((spec.name.as_str(), fit));
    }
    let columns: Vec<(&str, &dyn ModelFit)> = fits.iter().map(|(name, fit)| (*name, fit.as_ref())).collect();

    let mut table = build_model_table(&columns, definition.annotate);
    if definition.append_ic {
        append_information_criteria(&mut table, &columns);
    }

    let path = save_table(config, &table, &definition.output)?;
    let summary = format_fit_summary(definition.dataset.label(), series.len(), &columns);

    Ok(ModelTableOutput { path, summary })
}

/// Model tables through the fits stored under the configured `fits_dir`.
pub fn run_stored_model_table(config: &ProjectConfig, id: ModelTableId) -> Result<ModelTableOutput, AppError> {
    let store = JsonFitStore::new(config.fits_dir());
    run_model_table(config, id, &store)
}

/// Write `returns.csv` and `request.json` per estimation table, for the
/// external estimator.
pub fn export_inputs(config: &ProjectConfig) -> Result<Vec<PathBuf>, AppError> {
    let prices = load_prices(config)?;
    let store = JsonFitStore::new(config.fits_dir());
    let mut written = Vec::new();

    for id in ModelTableId::ALL {
        let definition = id.table();
        let series = returns(&prices, definition.dataset)?;
        let dir = store.dataset_dir(definition.dataset);
        ensure_dir(&dir)?;

        let returns_path = dir.join("returns.csv");
        write_series_csv(&returns_path, &series)?;

        let request = EstimationRequest {
            dataset: definition.dataset,
            returns: "returns.csv".to_string(),
            nobs: series.len(),
            models: definition
                .specs
                .iter()
                .map(|spec| RequestedFit {
                    output: fit_file_name(spec),
                    spec: spec.clone(),
                })
                .collect(),
        };
        let request_path = dir.join("request.json");
        write_request_json(&request_path, &request)?;

        tracing::info!(dataset = %definition.dataset, dir = %dir.display(), "estimation inputs written");
        written.push(returns_path);
        written.push(request_path);
    }

    Ok(written)
}

/// Write one sample as `date,value` CSV next to its estimation inputs
/// (`levels.csv` or `returns.csv`).
pub fn export_series(config: &ProjectConfig, dataset: DatasetId, transform: Transform) -> Result<PathBuf, AppError> {
    let prices = load_prices(config)?;
    let series = get_dataset(&prices, dataset, transform)?;

    let dir = JsonFitStore::new(config.fits_dir()).dataset_dir(dataset);
    ensure_dir(&dir)?;
    let path = match transform {
        Transform::Levels => dir.join("levels.csv"),
        Transform::LogReturns { .. } => dir.join("returns.csv"),
    };
    write_series_csv(&path, &series)?;

    tracing::info!(dataset = %dataset, nobs = series.len(), path = %path.display(), "series written");
    Ok(path)
}
