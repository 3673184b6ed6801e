//! Research steps end to end over a synthetic exchange-rate file.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Datelike, NaiveDate, Weekday};
use pretty_assertions::assert_eq;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Normal};

use fx_vol_report::app::pipeline::{
    DescriptivesOptions, export_inputs, export_series, run_descriptives, run_model_table, run_stored_model_table,
};
use fx_vol_report::config::ProjectConfig;
use fx_vol_report::domain::{DatasetId, Series, Transform};
use fx_vol_report::error::AppError;
use fx_vol_report::io::{EstimationRequest, JsonFitStore};
use fx_vol_report::models::{Estimator, FitRecord, ModelFit, ModelTableId, VolatilitySpec};

/// Business-day JPY/USD-like rates from 1978 to 2023, with one FRED-style
/// `.` gap.
fn write_rates(path: &Path) {
    let mut rng = StdRng::seed_from_u64(7);
    let shock = Normal::new(0.0, 0.006).unwrap();

    let mut body = String::from("DATE,DEXJPUS\n");
    let mut date = NaiveDate::from_ymd_opt(1978, 1, 2).unwrap();
    let end = NaiveDate::from_ymd_opt(2023, 12, 29).unwrap();
    let mut rate: f64 = 240.0;
    while date <= end {
        if !matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
            if date == NaiveDate::from_ymd_opt(1990, 12, 25).unwrap() {
                body.push_str(&format!("{date},.\n"));
            } else {
                rate *= f64::exp(shock.sample(&mut rng));
                body.push_str(&format!("{date},{rate:.4}\n"));
            }
        }
        date = date.succ_opt().unwrap();
    }
    fs::write(path, body).unwrap();
}

fn project(dir: &Path, plot_format: &str) -> ProjectConfig {
    fs::create_dir_all(dir.join("data")).unwrap();
    write_rates(&dir.join("data/ExchangeRate.csv"));

    let path = dir.join("config.json");
    fs::write(
        &path,
        format!(
            r#"{{
  "paths": {{
    "figures_dir": "output/figures",
    "tables_dir": "output/tables",
    "data_file": "data/ExchangeRate.csv",
    "fits_dir": "fits"
  }},
  "settings": {{ "plot_format": "{plot_format}", "dpi": 100 }}
}}"#
        ),
    )
    .unwrap();
    ProjectConfig::load(&path).unwrap()
}

fn read_request(path: PathBuf) -> EstimationRequest {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

fn write_fit(path: &Path, params: &[(&str, f64, f64)], nobs: usize) {
    let record = FitRecord {
        params: params.iter().map(|(n, v, _)| (n.to_string(), *v)).collect(),
        std_err: params.iter().map(|(n, _, s)| (n.to_string(), *s)).collect(),
        pvalues: None,
        aic: 8123.456,
        bic: 8160.789,
        loglikelihood: Some(-4055.728),
        nobs: Some(nobs),
    };
    fs::write(path, serde_json::to_string_pretty(&record).unwrap()).unwrap();
}

const APARCH_PARAMS: &[(&str, f64, f64)] = &[
    ("Const", 0.0150, 0.0080),
    ("y[1]", 0.0100, 0.0160),
    ("omega", 0.0090, 0.0030),
    ("alpha[1]", 0.0600, 0.0120),
    ("gamma[1]", -0.0800, 0.0900),
    ("beta[1]", 0.9200, 0.0150),
    ("delta", 1.7500, 0.2500),
];

#[test]
fn export_inputs_writes_one_request_per_table() {
    let dir = tempfile::tempdir().unwrap();
    let config = project(dir.path(), "svg");

    let written = export_inputs(&config).unwrap();

    assert_eq!(written.len(), 6);
    let fits = dir.path().join("fits");
    for slug in ["dataset-i", "dataset-ii", "extended"] {
        assert!(fits.join(slug).join("returns.csv").is_file());
        assert!(fits.join(slug).join("request.json").is_file());
    }

    let request = read_request(fits.join("dataset-ii/request.json"));
    assert_eq!(request.dataset, DatasetId::DatasetII);
    assert_eq!(request.returns, "returns.csv");
    let outputs: Vec<&str> = request.models.iter().map(|m| m.output.as_str()).collect();
    assert_eq!(outputs, vec!["aparch.json", "agarch.json"]);

    let returns = fs::read_to_string(fits.join("dataset-ii/returns.csv")).unwrap();
    let mut lines = returns.lines();
    assert_eq!(lines.next(), Some("date,value"));
    assert_eq!(lines.count(), request.nobs);

    let extended = read_request(fits.join("extended/request.json"));
    assert_eq!(extended.models.len(), 6);
}

#[test]
fn stored_fits_become_the_dataset_ii_table() {
    let dir = tempfile::tempdir().unwrap();
    let config = project(dir.path(), "svg");
    export_inputs(&config).unwrap();

    let sample = dir.path().join("fits/dataset-ii");
    let nobs = read_request(sample.join("request.json")).nobs;
    write_fit(&sample.join("aparch.json"), APARCH_PARAMS, nobs);
    write_fit(
        &sample.join("agarch.json"),
        &[
            ("Const", 0.0140, 0.0080),
            ("y[1]", 0.0090, 0.0160),
            ("omega", 0.0110, 0.0040),
            ("alpha[1]", 0.0500, 0.0110),
            ("gamma[1]", 0.0200, 0.0150),
            ("beta[1]", 0.9100, 0.0160),
        ],
        nobs,
    );

    let out = run_stored_model_table(&config, ModelTableId::D2).unwrap();

    assert_eq!(out.path, dir.path().join("output/tables/models/replication_results_d2.tex"));
    let latex = fs::read_to_string(&out.path).unwrap();
    assert!(latex.contains("\\caption{Replication Results for Dataset II}\n"));
    assert!(latex.contains(" & APARCH & AGARCH \\\\\n"));
    assert!(latex.contains("$\\gamma$ & -0.0800 & 0.0200 \\\\\n"));
    assert!(latex.contains("$\\delta$ & 1.7500 & --- \\\\\n"));
    assert!(latex.contains("\\item Note 1: Standard errors in parentheses"));
    assert!(!latex.contains("***"));

    assert!(out.summary.starts_with(&format!("=== fxvol - Dataset II ===\nSample: n={nobs}\n")));
    assert!(out.summary.contains("APARCH"));
    assert!(out.summary.contains("-4055.728"));
}

#[test]
fn missing_fit_is_an_estimation_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = project(dir.path(), "svg");

    let err = run_stored_model_table(&config, ModelTableId::D1).unwrap_err();

    assert!(matches!(err, AppError::Estimation(_)));
    assert_eq!(err.exit_code(), 4);
    assert!(err.to_string().contains("garch-model.json"));
}

#[test]
fn fit_on_another_sample_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let config = project(dir.path(), "svg");
    export_inputs(&config).unwrap();

    let sample = dir.path().join("fits/dataset-ii");
    let nobs = read_request(sample.join("request.json")).nobs;
    write_fit(&sample.join("aparch.json"), APARCH_PARAMS, nobs + 1);

    let err = run_stored_model_table(&config, ModelTableId::D2).unwrap_err();

    assert!(matches!(err, AppError::Estimation(_)));
}

/// Fits every model with the same made-up GARCH(1,1) estimates.
struct FixedEstimator;

impl Estimator for FixedEstimator {
    fn estimate(&self, series: &Series, spec: &VolatilitySpec) -> Result<Box<dyn ModelFit>, AppError> {
        let params = [("omega", 0.02, 0.004), ("alpha[1]", 0.07, 0.01), ("beta[1]", 0.91, 0.012)];
        Ok(Box::new(FitRecord {
            params: params.iter().map(|(n, v, _)| (n.to_string(), *v)).collect(),
            std_err: params.iter().map(|(n, _, s)| (n.to_string(), *s)).collect(),
            pvalues: None,
            aic: 1000.0 + spec.name.len() as f64,
            bic: 1010.0 + spec.name.len() as f64,
            loglikelihood: None,
            nobs: Some(series.len()),
        }))
    }
}

#[test]
fn extended_table_through_a_custom_estimator() {
    let dir = tempfile::tempdir().unwrap();
    let config = project(dir.path(), "svg");

    let out = run_model_table(&config, ModelTableId::Extended, &FixedEstimator).unwrap();

    let latex = fs::read_to_string(&out.path).unwrap();
    assert!(latex.contains(" & GARCH-N & GARCH-t & GARCH-G & FIGARCH-N & FIGARCH-t & FIGARCH-G \\\\\n"));
    assert!(latex.contains("{@{\\extracolsep{\\fill}}lcccccc}\n"));
    assert!(latex.contains("AIC & 1007.00 & 1007.00 & 1007.00 & 1009.00 & 1009.00 & 1009.00 \\\\\n"));
    assert!(latex.contains("\\item Note 3: Column suffixes denote the error distribution"));
    assert!(out.summary.contains("n/a"));
}

#[test]
fn descriptives_tables_cover_every_sample() {
    let dir = tempfile::tempdir().unwrap();
    let config = project(dir.path(), "svg");
    let options = DescriptivesOptions {
        figures: false,
        nlags: 20,
    };

    let out = run_descriptives(&config, &options).unwrap();

    assert!(out.figures.is_empty());
    let diagnostics = dir.path().join("output/tables/diagnostics");
    assert_eq!(
        out.tables,
        vec![diagnostics.join("dataset_metadata.tex"), diagnostics.join("descriptives.tex")]
    );

    let metadata = fs::read_to_string(&out.tables[0]).unwrap();
    assert!(metadata.contains(" & Start Date & End Date & Obs ($T$) \\\\\n"));
    assert!(metadata.contains("Dataset I & 1978-01-04 & "));
    assert!(metadata.contains("Extended & 2003-01-02 & 2023-12-29 & "));

    let descriptives = fs::read_to_string(&out.tables[1]).unwrap();
    for label in ["Dataset I", "Dataset II", "Extended"] {
        assert!(descriptives.contains(&format!("\n{label} & ")));
    }
    assert!(descriptives.contains("Q(5)"));

    // A random walk in logs has stationary returns.
    let adf = out.adf.unwrap();
    assert!(adf.statistic < -10.0);
    assert!(adf.p_value < 0.01);
}

#[test]
fn figures_are_written_as_svg() {
    let dir = tempfile::tempdir().unwrap();
    let config = project(dir.path(), "svg");
    let options = DescriptivesOptions {
        figures: true,
        nlags: 10,
    };

    let out = run_descriptives(&config, &options).unwrap();

    let figures = dir.path().join("output/figures/descriptives");
    assert_eq!(
        out.figures,
        vec![
            figures.join("volatility_clustering.svg"),
            figures.join("distribution_comparison.svg"),
            figures.join("acf_pacf.svg"),
        ]
    );
    for path in &out.figures {
        assert!(fs::read_to_string(path).unwrap().contains("<svg"));
    }
}

#[test]
fn raster_plot_format_is_a_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = project(dir.path(), "png");
    let options = DescriptivesOptions {
        figures: true,
        nlags: 20,
    };

    let err = run_descriptives(&config, &options).unwrap_err();

    assert!(matches!(err, AppError::Config(_)));
    assert!(err.to_string().contains("png"));
    assert!(!dir.path().join("output/tables").exists());
}

#[test]
fn store_reads_what_the_request_names() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFitStore::new(dir.path());
    let spec = &ModelTableId::D1.table().specs[1];

    assert_eq!(
        store.fit_path(DatasetId::DatasetI, spec),
        dir.path().join("dataset-i/aparch-model.json")
    );
}

#[test]
fn global_levels_keep_every_valued_row() {
    let dir = tempfile::tempdir().unwrap();
    let config = project(dir.path(), "svg");

    let levels = export_series(&config, DatasetId::Global, Transform::Levels).unwrap();
    let returns = export_series(&config, DatasetId::Global, Transform::PERCENT_LOG).unwrap();

    assert_eq!(levels, dir.path().join("fits/global/levels.csv"));
    let levels = fs::read_to_string(levels).unwrap();
    let returns = fs::read_to_string(returns).unwrap();
    assert!(levels.lines().nth(1).unwrap().starts_with("1978-01-02,"));
    assert!(returns.lines().nth(1).unwrap().starts_with("1978-01-03,"));
    assert_eq!(levels.lines().count(), returns.lines().count() + 1);
    assert!(!levels.contains("1990-12-25"));
}
