use crate::domain::Series;
use crate::error::AppError;
use crate::models::fit::ModelFit;
use crate::models::spec::VolatilitySpec;

/// Produces a fitted model for a return series and a model configuration.
///
/// Failures (missing results, non-convergence upstream, a sample mismatch)
/// are estimation errors; callers do not retry.
pub trait Estimator {
    fn estimate(&self, series: &Series, spec: &VolatilitySpec) -> Result<Box<dyn ModelFit>, AppError>;
}
