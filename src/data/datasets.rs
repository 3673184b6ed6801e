//! Named sample periods and the log-return transform.

use crate::domain::{DatasetId, Observation, Series, Transform};
use crate::error::AppError;
use crate::io::ingest::PriceData;

/// Slice the raw series to a named period and apply `transform`.
///
/// Date bounds are inclusive. Log returns are `scale × ln(x_t / x_{t-1})`
/// within the slice, so the first observation of the slice is dropped.
pub fn get_dataset(prices: &PriceData, id: DatasetId, transform: Transform) -> Result<Series, AppError> {
    let subset: Vec<Observation> = match id.date_range() {
        Some((start, end)) => prices
            .observations
            .iter()
            .filter(|o| o.date >= start && o.date <= end)
            .copied()
            .collect(),
        None => prices.observations.clone(),
    };

    let observations = match transform {
        Transform::Levels => subset,
        Transform::LogReturns { scale } => log_returns(&subset, scale)?,
    };

    if observations.is_empty() {
        return Err(AppError::data(format!("{id} contains no usable observations.")));
    }

    tracing::debug!(dataset = %id, n = observations.len(), "prepared dataset");
    Ok(Series {
        dataset: id,
        transform,
        observations,
    })
}

fn log_returns(levels: &[Observation], scale: f64) -> Result<Vec<Observation>, AppError> {
    if let Some(bad) = levels.iter().find(|o| o.value <= 0.0) {
        return Err(AppError::data(format!(
            "Non-positive rate {} on {} (log returns need positive levels).",
            bad.value, bad.date
        )));
    }

    Ok(levels
        .windows(2)
        .map(|w| Observation {
            date: w[1].date,
            value: (w[1].value / w[0].value).ln() * scale,
        })
        .collect())
}
