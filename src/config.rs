//! Project configuration (`config.json`).
//!
//! Loaded once per run; every module borrows `&ProjectConfig`.
//!
//! ```json
//! {
//!   "paths": {
//!     "project_root": null,
//!     "figures_dir": "output/figures",
//!     "tables_dir": "output/tables",
//!     "data_file": "data/ExchangeRate.csv",
//!     "fits_dir": "fits"
//!   },
//!   "settings": { "plot_format": "svg", "dpi": 300 }
//! }
//! ```

use std::fs::File;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::domain::OutputCategory;
use crate::error::AppError;

/// Environment variable (also read from `.env`) naming the config file.
pub const CONFIG_ENV: &str = "FXVOL_CONFIG";

const DEFAULT_CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub paths: PathsConfig,
    #[serde(default)]
    pub settings: Settings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PathsConfig {
    /// Output root; defaults to the directory holding the config file.
    #[serde(default)]
    pub project_root: Option<PathBuf>,
    #[serde(default)]
    pub figures_dir: Option<PathBuf>,
    #[serde(default)]
    pub tables_dir: Option<PathBuf>,
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,
    #[serde(default = "default_fits_dir")]
    pub fits_dir: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default = "default_plot_format")]
    pub plot_format: String,
    #[serde(default = "default_dpi")]
    pub dpi: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            plot_format: default_plot_format(),
            dpi: default_dpi(),
        }
    }
}

fn default_data_file() -> PathBuf {
    PathBuf::from("data/ExchangeRate.csv")
}
fn default_fits_dir() -> PathBuf {
    PathBuf::from("fits")
}
fn default_plot_format() -> String {
    "svg".to_string()
}
fn default_dpi() -> u32 {
    300
}

/// A parsed config plus the directory it was read from.
#[derive(Debug, Clone)]
pub struct ProjectConfig {
    pub file: ConfigFile,
    pub config_dir: PathBuf,
}

impl ProjectConfig {
    /// Resolve the config location and load it.
    ///
    /// Precedence: explicit path, then `FXVOL_CONFIG`, then `./config.json`.
    pub fn discover(explicit: Option<&Path>) -> Result<Self, AppError> {
        let path = match explicit {
            Some(p) => p.to_path_buf(),
            None => {
                dotenvy::dotenv().ok();
                std::env::var_os(CONFIG_ENV)
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
            }
        };
        Self::load(&path)
    }

    pub fn load(path: &Path) -> Result<Self, AppError> {
        if !path.exists() {
            return Err(AppError::config(format!("{} not found.", path.display())));
        }
        let file = File::open(path)
            .map_err(|e| AppError::config(format!("Failed to open '{}': {e}", path.display())))?;
        let parsed: ConfigFile = serde_json::from_reader(file)
            .map_err(|e| AppError::config(format!("Invalid config '{}': {e}", path.display())))?;

        let config_dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        tracing::debug!(config = %path.display(), "loaded configuration");
        Ok(Self { file: parsed, config_dir })
    }

    /// Output root for all artifacts.
    pub fn root(&self) -> PathBuf {
        match &self.file.paths.project_root {
            Some(root) => self.config_dir.join(root),
            None => self.config_dir.clone(),
        }
    }

    /// Base directory for a category; a missing key is fatal.
    pub fn category_dir(&self, category: OutputCategory) -> Result<PathBuf, AppError> {
        let rel = match category {
            OutputCategory::Figures => self.file.paths.figures_dir.as_ref(),
            OutputCategory::Tables => self.file.paths.tables_dir.as_ref(),
        };
        let rel = rel.ok_or_else(|| {
            AppError::config(format!("Category '{}' not found in config paths.", category.name()))
        })?;
        Ok(self.root().join(rel))
    }

    pub fn data_file(&self) -> PathBuf {
        self.root().join(&self.file.paths.data_file)
    }

    pub fn fits_dir(&self) -> PathBuf {
        self.root().join(&self.file.paths.fits_dir)
    }

    pub fn settings(&self) -> &Settings {
        &self.file.settings
    }
}
