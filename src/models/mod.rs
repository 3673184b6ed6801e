//! Volatility models as seen by the reporting pipeline.
//!
//! Estimation is external. This module only describes which models to fit
//! (`spec`, `catalog`), the seam through which fits arrive (`estimator`), and
//! the capability a fit must expose (`fit`).

pub mod catalog;
pub mod estimator;
pub mod fit;
pub mod spec;

pub use catalog::{ModelTable, ModelTableId};
pub use estimator::Estimator;
pub use fit::{FitRecord, InformationCriteria, ModelFit};
pub use spec::{CovarianceType, ErrorDist, MeanSpec, VolFamily, VolatilitySpec};
