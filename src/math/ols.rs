//! Ordinary least squares.
//!
//! The diagnostics repeatedly solve small regressions of the form
//!
//! ```text
//! minimize Σ (y_i - x_i^T β)^2
//! ```
//!
//! (AR(1) mean check, ARCH-LM auxiliary regression, ADF regressions).
//!
//! Implementation choices:
//! - SVD solve, which handles tall design matrices and degrades gracefully when
//!   columns are nearly collinear (e.g. a constant-only ARCH-LM regression on
//!   a flat series).
//! - Designs have at most a few dozen columns, so cost is irrelevant.

use nalgebra::{DMatrix, DVector};

/// Solve a least squares problem using SVD.
///
/// Returns `None` if the system is too ill-conditioned to solve robustly.
pub fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<DVector<f64>> {
    let svd = x.clone().svd(true, true);

    for &tol in &[1e-10, 1e-8, 1e-6] {
        if let Ok(beta) = svd.solve(y, tol) {
            if beta.iter().all(|v| v.is_finite()) {
                return Some(beta);
            }
        }
    }

    None
}

/// Fitted regression with the quantities the tests need.
#[derive(Debug, Clone)]
pub struct OlsFit {
    pub beta: DVector<f64>,
    pub residuals: DVector<f64>,
    /// Sum of squared residuals.
    pub ssr: f64,
    /// Centered R² (assumes the design includes a constant).
    pub r_squared: f64,
    /// `(X'X)^{-1}`, if invertible.
    pub xtx_inv: Option<DMatrix<f64>>,
    pub nobs: usize,
}

impl OlsFit {
    /// Standard errors with `σ² = SSR / (n - dof_correction)`.
    pub fn std_errors(&self, dof_correction: usize) -> Option<DVector<f64>> {
        let inv = self.xtx_inv.as_ref()?;
        let denom = self.nobs.checked_sub(dof_correction).filter(|d| *d > 0)? as f64;
        let sigma2 = self.ssr / denom;
        Some(DVector::from_iterator(
            inv.nrows(),
            (0..inv.nrows()).map(|i| (sigma2 * inv[(i, i)]).sqrt()),
        ))
    }

    /// Gaussian log-likelihood at the MLE variance `SSR / n`.
    pub fn log_likelihood(&self) -> f64 {
        let n = self.nobs as f64;
        -0.5 * n * ((2.0 * std::f64::consts::PI * self.ssr / n).ln() + 1.0)
    }
}

/// Fit `y = X β + e`.
pub fn ols(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<OlsFit> {
    if x.nrows() != y.len() || x.nrows() <= x.ncols() {
        return None;
    }
    let beta = solve_least_squares(x, y)?;
    let residuals = y - x * &beta;
    let ssr = residuals.norm_squared();

    let mean = y.mean();
    let tss: f64 = y.iter().map(|v| (v - mean).powi(2)).sum();
    let r_squared = if tss > 0.0 { 1.0 - ssr / tss } else { 0.0 };

    let xtx_inv = (x.transpose() * x).try_inverse();

    Some(OlsFit {
        beta,
        residuals,
        ssr,
        r_squared,
        xtx_inv,
        nobs: y.len(),
    })
}
