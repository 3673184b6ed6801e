//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments and sets up logging
//! - loads the project configuration
//! - runs the requested research step
//! - prints what was written

use clap::Parser;

use crate::cli::{Cli, Command, DescriptivesArgs, SeriesArgs};
use crate::config::ProjectConfig;
use crate::domain::{DatasetId, Transform};
use crate::error::AppError;
use crate::models::ModelTableId;

pub mod pipeline;

/// Entry point for the `fxvol` binary.
pub fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    crate::logging::init(cli.verbose);

    let config = ProjectConfig::discover(cli.config.as_deref())?;

    match cli.command {
        Command::Descriptives(args) => handle_descriptives(&config, &args),
        Command::ModelsD1 => handle_models(&config, ModelTableId::D1),
        Command::ModelsD2 => handle_models(&config, ModelTableId::D2),
        Command::ModelsExtended => handle_models(&config, ModelTableId::Extended),
        Command::ExportInputs => handle_export_inputs(&config),
        Command::Series(args) => handle_series(&config, &args),
    }
}

fn handle_descriptives(config: &ProjectConfig, args: &DescriptivesArgs) -> Result<(), AppError> {
    let options = pipeline::DescriptivesOptions {
        figures: !args.no_figures,
        nlags: args.nlags,
    };
    let out = pipeline::run_descriptives(config, &options)?;

    if let Some(adf) = out.adf {
        println!("ADF-stat: {:.4} with p-value {:.4}", adf.statistic, adf.p_value);
    }
    for path in out.figures.iter().chain(&out.tables) {
        println!("Saved {}", path.display());
    }
    Ok(())
}

fn handle_models(config: &ProjectConfig, id: ModelTableId) -> Result<(), AppError> {
    let out = pipeline::run_stored_model_table(config, id)?;
    println!("{}", out.summary);
    println!("Results exported to {}", out.path.display());
    Ok(())
}

fn handle_export_inputs(config: &ProjectConfig) -> Result<(), AppError> {
    for path in pipeline::export_inputs(config)? {
        println!("Wrote {}", path.display());
    }
    Ok(())
}

fn handle_series(config: &ProjectConfig, args: &SeriesArgs) -> Result<(), AppError> {
    let (dataset, transform) = series_request(args)?;
    let path = pipeline::export_series(config, dataset, transform)?;
    println!("Wrote {}", path.display());
    Ok(())
}

fn series_request(args: &SeriesArgs) -> Result<(DatasetId, Transform), AppError> {
    let dataset: DatasetId = args.dataset.parse()?;
    let transform = if args.levels { Transform::Levels } else { Transform::PERCENT_LOG };
    Ok((dataset, transform))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(dataset: &str, levels: bool) -> SeriesArgs {
        SeriesArgs {
            dataset: dataset.to_string(),
            levels,
        }
    }

    #[test]
    fn series_request_parses_the_label() {
        let (dataset, transform) = series_request(&args("Global", true)).unwrap();
        assert_eq!(dataset, DatasetId::Global);
        assert_eq!(transform, Transform::Levels);

        let (dataset, transform) = series_request(&args("Dataset II", false)).unwrap();
        assert_eq!(dataset, DatasetId::DatasetII);
        assert_eq!(transform, Transform::PERCENT_LOG);
    }

    #[test]
    fn unknown_dataset_label_is_a_data_error() {
        let err = series_request(&args("Dataset III", false)).unwrap_err();
        assert!(matches!(err, AppError::Data(_)));
        assert_eq!(err.exit_code(), 3);
    }
}
