//! Application error type.
//!
//! Every failure in the pipeline is fatal for the run, so a single enum is
//! enough. Each variant carries its own process exit code so `main` can stay a
//! thin wrapper.

use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Missing config file, missing key, unknown output category, unsupported
    /// extension or figure format.
    #[error("configuration error: {0}")]
    Config(String),

    /// Unknown dataset, malformed source file, unusable series.
    #[error("data error: {0}")]
    Data(String),

    /// A model fit could not be obtained or does not match its sample.
    #[error("estimation error: {0}")]
    Estimation(String),

    /// Writing an artifact failed.
    #[error("failed to write '{}': {reason}", path.display())]
    Export { path: PathBuf, reason: String },
}

impl AppError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn data(message: impl Into<String>) -> Self {
        Self::Data(message.into())
    }

    pub fn estimation(message: impl Into<String>) -> Self {
        Self::Estimation(message.into())
    }

    pub fn export(path: &Path, reason: impl std::fmt::Display) -> Self {
        Self::Export {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::Config(_) => 2,
            AppError::Data(_) => 3,
            AppError::Estimation(_) => 4,
            AppError::Export { .. } => 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct_per_class() {
        let codes = [
            AppError::config("x").exit_code(),
            AppError::data("x").exit_code(),
            AppError::estimation("x").exit_code(),
            AppError::export(Path::new("out.tex"), "disk full").exit_code(),
        ];
        assert_eq!(codes, [2, 3, 4, 5]);
    }

    #[test]
    fn export_error_names_the_path() {
        let err = AppError::export(Path::new("tables/models/a.tex"), "permission denied");
        let msg = err.to_string();
        assert!(msg.contains("tables/models/a.tex"));
        assert!(msg.contains("permission denied"));
    }
}
