//! The capability every fitted volatility model exposes to the formatter.
//!
//! Estimation itself happens outside this crate; whatever backend produced a
//! fit must present it through `ModelFit` before it reaches the tables.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, Normal};

use crate::error::AppError;

/// Scalar goodness-of-fit metrics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InformationCriteria {
    pub aic: f64,
    pub bic: f64,
    pub log_likelihood: Option<f64>,
}

pub trait ModelFit {
    /// Parameter name → point estimate.
    fn parameter_estimates(&self) -> &BTreeMap<String, f64>;

    /// Parameter name → standard error. Must cover every estimate key.
    fn standard_errors(&self) -> &BTreeMap<String, f64>;

    fn information_criteria(&self) -> InformationCriteria;

    /// Two-sided p-values. Defaults to the normal approximation on
    /// `estimate / std_err`.
    fn p_values(&self) -> BTreeMap<String, f64> {
        normal_p_values(self.parameter_estimates(), self.standard_errors())
    }
}

/// Two-sided normal p-values of `estimate / std_err` for every paired key.
pub fn normal_p_values(estimates: &BTreeMap<String, f64>, std_errs: &BTreeMap<String, f64>) -> BTreeMap<String, f64> {
    let Ok(normal) = Normal::new(0.0, 1.0) else {
        return BTreeMap::new();
    };
    estimates
        .iter()
        .filter_map(|(name, est)| {
            let se = std_errs.get(name)?;
            Some((name.clone(), 2.0 * normal.sf((est / se).abs())))
        })
        .collect()
}

/// A fit result as written by the external estimator (one JSON file per
/// model).
///
/// ```json
/// {
///   "params":  { "Const": 0.012, "y[1]": -0.004, "omega": 0.009, ... },
///   "std_err": { "Const": 0.007, "y[1]": 0.015, "omega": 0.003, ... },
///   "aic": 9123.4, "bic": 9160.1, "loglikelihood": -4555.7, "nobs": 4120
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitRecord {
    pub params: BTreeMap<String, f64>,
    pub std_err: BTreeMap<String, f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pvalues: Option<BTreeMap<String, f64>>,
    pub aic: f64,
    pub bic: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loglikelihood: Option<f64>,
    /// Sample size the model was estimated on, if the estimator reports it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nobs: Option<usize>,
}

impl FitRecord {
    /// Check the pairing invariant the formatter relies on.
    pub fn validate(&self) -> Result<(), AppError> {
        let missing: Vec<&str> = self
            .params
            .keys()
            .filter(|k| !self.std_err.contains_key(*k))
            .map(String::as_str)
            .collect();
        if !missing.is_empty() {
            return Err(AppError::estimation(format!(
                "Fit result has no standard error for: {}",
                missing.join(", ")
            )));
        }
        if let Some((name, _)) = self.params.iter().find(|(_, v)| !v.is_finite()) {
            return Err(AppError::estimation(format!("Non-finite estimate for '{name}'.")));
        }
        if let Some((name, _)) = self.std_err.iter().find(|(_, v)| !v.is_finite()) {
            return Err(AppError::estimation(format!("Non-finite standard error for '{name}'.")));
        }
        Ok(())
    }
}

impl ModelFit for FitRecord {
    fn parameter_estimates(&self) -> &BTreeMap<String, f64> {
        &self.params
    }

    fn standard_errors(&self) -> &BTreeMap<String, f64> {
        &self.std_err
    }

    fn information_criteria(&self) -> InformationCriteria {
        InformationCriteria {
            aic: self.aic,
            bic: self.bic,
            log_likelihood: self.loglikelihood,
        }
    }

    fn p_values(&self) -> BTreeMap<String, f64> {
        match &self.pvalues {
            Some(p) => p.clone(),
            None => normal_p_values(&self.params, &self.std_err),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::testing::record;
    use super::*;

    #[test]
    fn validate_catches_unpaired_parameters() {
        let mut r = record(&[("omega", 0.01, 0.002)], 1.0, 2.0);
        assert!(r.validate().is_ok());
        r.params.insert("alpha[1]".into(), 0.1);
        let err = r.validate().unwrap_err();
        assert!(err.to_string().contains("alpha[1]"));
    }

    #[test]
    fn validate_rejects_non_finite_standard_errors() {
        let r = record(&[("d", 0.4, f64::NAN)], 1.0, 2.0);
        let err = r.validate().unwrap_err();
        assert_eq!(err.to_string(), "estimation error: Non-finite standard error for 'd'.");
    }

    #[test]
    fn p_values_default_to_normal_approximation() {
        let r = record(&[("a", 1.96, 1.0), ("b", 0.0, 1.0)], 0.0, 0.0);
        let p = r.p_values();
        assert!((p["a"] - 0.05).abs() < 1e-3);
        assert!((p["b"] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn reported_p_values_win() {
        let mut r = record(&[("a", 1.96, 1.0)], 0.0, 0.0);
        r.pvalues = Some([("a".to_string(), 0.2)].into_iter().collect());
        assert_eq!(r.p_values()["a"], 0.2);
    }

    #[test]
    fn deserializes_estimator_json() {
        let json = r#"{"params": {"omega": 0.01}, "std_err": {"omega": 0.002}, "aic": 10.5, "bic": 12.25}"#;
        let r: FitRecord = serde_json::from_str(json).unwrap();
        assert_eq!(r.information_criteria().bic, 12.25);
        assert!(r.nobs.is_none());
    }
}
