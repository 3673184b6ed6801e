//! Closed-form specification tests on a return series.
//!
//! Each test returns its statistic with an asymptotic p-value. Degenerate
//! inputs (too short, constant) yield `None` rather than NaN so callers can
//! decide how to render them.

use nalgebra::{DMatrix, DVector};
use statrs::distribution::{ChiSquared, ContinuousCDF, Normal};

use crate::math::{acf, kurtosis, mean, ols, skewness};

/// A test statistic with its p-value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TestStat {
    pub statistic: f64,
    pub p_value: f64,
}

/// Lag-1 coefficient of an AR(1) mean equation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ar1Check {
    pub constant: f64,
    pub rho: f64,
    pub p_value: f64,
}

/// Augmented Dickey–Fuller result (constant, no trend).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdfResult {
    pub statistic: f64,
    pub p_value: f64,
    pub used_lag: usize,
    pub nobs: usize,
}

fn chi2_sf(x: f64, df: f64) -> f64 {
    ChiSquared::new(df).map(|d| d.sf(x)).unwrap_or(f64::NAN)
}

fn normal_two_sided(z: f64) -> f64 {
    Normal::new(0.0, 1.0).map(|d| 2.0 * d.sf(z.abs())).unwrap_or(f64::NAN)
}

/// OLS of `r_t` on `(1, r_{t-1})` with `σ² = SSR/n` and normal p-values.
pub fn ar1_check(x: &[f64]) -> Option<Ar1Check> {
    let n = x.len().checked_sub(1)?;
    if n < 3 {
        return None;
    }
    let design = DMatrix::from_fn(n, 2, |i, j| if j == 0 { 1.0 } else { x[i] });
    let y = DVector::from_column_slice(&x[1..]);
    let fit = ols(&design, &y)?;
    let se = fit.std_errors(0)?;
    let z = fit.beta[1] / se[1];

    Some(Ar1Check {
        constant: fit.beta[0],
        rho: fit.beta[1],
        p_value: normal_two_sided(z),
    })
}

/// Jarque–Bera normality test, χ²(2).
pub fn jarque_bera(x: &[f64]) -> TestStat {
    let n = x.len() as f64;
    let s = skewness(x);
    let k = kurtosis(x);
    let statistic = n / 6.0 * (s * s + (k - 3.0).powi(2) / 4.0);
    TestStat {
        statistic,
        p_value: chi2_sf(statistic, 2.0),
    }
}

/// Engle's ARCH-LM test on `resid`: `(n - L) R²` of `e²_t` on a constant and
/// `L` own lags, χ²(L).
pub fn arch_lm(resid: &[f64], nlags: usize) -> Option<TestStat> {
    if nlags == 0 || resid.len() <= 2 * nlags + 1 {
        return None;
    }
    let sq: Vec<f64> = resid.iter().map(|e| e * e).collect();
    let rows = sq.len() - nlags;
    let design = DMatrix::from_fn(rows, nlags + 1, |i, j| if j == 0 { 1.0 } else { sq[nlags + i - j] });
    let y = DVector::from_column_slice(&sq[nlags..]);
    let fit = ols(&design, &y)?;

    let statistic = rows as f64 * fit.r_squared;
    Some(TestStat {
        statistic,
        p_value: chi2_sf(statistic, nlags as f64),
    })
}

/// Ljung–Box Q at `lags`, χ²(lags).
pub fn ljung_box(x: &[f64], lags: usize) -> Option<TestStat> {
    let n = x.len();
    if lags == 0 || n <= lags {
        return None;
    }
    let r = acf(x, lags);
    let nf = n as f64;
    let q = nf * (nf + 2.0) * (1..=lags).map(|k| r[k] * r[k] / (nf - k as f64)).sum::<f64>();
    Some(TestStat {
        statistic: q,
        p_value: chi2_sf(q, lags as f64),
    })
}

/// ADF test with a constant; lag length picked by AIC up to
/// `ceil(12 (n/100)^{1/4})` on a common sample, then refit on all usable rows.
pub fn adf(x: &[f64]) -> Option<AdfResult> {
    let n = x.len();
    if n < 20 {
        return None;
    }
    let dx: Vec<f64> = x.windows(2).map(|w| w[1] - w[0]).collect();
    let maxlag = ((12.0 * (n as f64 / 100.0).powf(0.25)).ceil() as usize).min(n / 2 - 3);

    let mut best: Option<(f64, usize)> = None;
    for lag in 0..=maxlag {
        let Some(fit) = adf_regression(x, &dx, lag, maxlag) else { continue };
        let k = (lag + 2) as f64;
        let aic = -2.0 * fit.0.log_likelihood() + 2.0 * k;
        if best.is_none_or(|(b, _)| aic < b) {
            best = Some((aic, lag));
        }
    }
    let (_, used_lag) = best?;

    let (fit, rows) = adf_regression(x, &dx, used_lag, used_lag)?;
    let k = used_lag + 2;
    let se = fit.std_errors(k)?;
    let statistic = fit.beta[1] / se[1];

    Some(AdfResult {
        statistic,
        p_value: mackinnon_p_constant(statistic),
        used_lag,
        nobs: rows,
    })
}

/// Regress `Δy_t` on `(1, y_{t-1}, Δy_{t-1..=t-lag})`, dropping the first
/// `skip` differences so different lags can share a sample.
fn adf_regression(x: &[f64], dx: &[f64], lag: usize, skip: usize) -> Option<(crate::math::OlsFit, usize)> {
    let rows = dx.len().checked_sub(skip)?;
    if rows <= lag + 2 {
        return None;
    }
    let design = DMatrix::from_fn(rows, lag + 2, |i, j| {
        let t = skip + i;
        match j {
            0 => 1.0,
            1 => x[t],
            _ => dx[t - (j - 1)],
        }
    });
    let y = DVector::from_iterator(rows, (0..rows).map(|i| dx[skip + i]));
    ols(&design, &y).map(|fit| (fit, rows))
}

/// MacKinnon (1994) approximate p-value for the constant-only ADF statistic.
pub fn mackinnon_p_constant(tau: f64) -> f64 {
    const TAU_MAX: f64 = 2.74;
    const TAU_MIN: f64 = -18.83;
    const TAU_STAR: f64 = -1.61;
    const SMALL_P: [f64; 3] = [2.1659, 1.4412, 0.038269];
    const LARGE_P: [f64; 4] = [1.7339, 0.93202e-1, -0.12745e-1, -0.10368e-3];

    if tau > TAU_MAX {
        return 1.0;
    }
    if tau < TAU_MIN {
        return 0.0;
    }
    let coefs: &[f64] = if tau <= TAU_STAR { &SMALL_P } else { &LARGE_P };
    let poly = coefs.iter().rev().fold(0.0, |acc, c| acc * tau + c);
    Normal::new(0.0, 1.0).map(|d| d.cdf(poly)).unwrap_or(f64::NAN)
}

/// Demeaned copy of `x` (residuals of a constant-mean model).
pub fn demean(x: &[f64]) -> Vec<f64> {
    let m = mean(x);
    x.iter().map(|v| v - m).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rand_distr::{Distribution, Normal as NormalDist, StudentT};

    fn gaussian(n: usize, seed: u64) -> Vec<f64> {
        let mut rng = StdRng::seed_from_u64(seed);
        let d = NormalDist::new(0.0, 1.0).unwrap();
        (0..n).map(|_| d.sample(&mut rng)).collect()
    }

    #[test]
    fn jarque_bera_separates_normal_from_fat_tails() {
        let normal = gaussian(5000, 1);
        assert!(jarque_bera(&normal).p_value > 0.01);

        let mut rng = StdRng::seed_from_u64(2);
        let t3 = StudentT::new(3.0).unwrap();
        let fat: Vec<f64> = (0..5000).map(|_| t3.sample(&mut rng)).collect();
        let jb = jarque_bera(&fat);
        assert!(jb.statistic > 100.0);
        assert!(jb.p_value < 0.01);
    }

    #[test]
    fn ar1_recovers_persistence() {
        let e = gaussian(3000, 3);
        let mut x = vec![0.0];
        for t in 1..e.len() {
            x.push(0.3 * x[t - 1] + e[t]);
        }
        let check = ar1_check(&x).unwrap();
        assert!((check.rho - 0.3).abs() < 0.06);
        assert!(check.p_value < 0.01);
    }

    #[test]
    fn arch_lm_detects_volatility_clustering() {
        let z = gaussian(4000, 4);
        let (omega, alpha, beta): (f64, f64, f64) = (0.05, 0.15, 0.8);
        let mut h = omega / (1.0 - alpha - beta);
        let mut r = Vec::with_capacity(z.len());
        for zt in &z {
            let e = h.sqrt() * zt;
            r.push(e);
            h = omega + alpha * e * e + beta * h;
        }
        let clustered = arch_lm(&demean(&r), 10).unwrap();
        assert!(clustered.p_value < 0.01, "p = {}", clustered.p_value);

        let iid = arch_lm(&demean(&z), 10).unwrap();
        assert!(iid.p_value > 0.001);
    }

    #[test]
    fn ljung_box_on_white_noise_is_insignificant() {
        let z = gaussian(2000, 5);
        let lb = ljung_box(&z, 5).unwrap();
        assert!(lb.statistic >= 0.0);
        assert!(lb.p_value > 0.001);
        assert!(ljung_box(&z[..3], 5).is_none());
    }

    #[test]
    fn mackinnon_matches_critical_values() {
        // 5% critical value for the constant case is about -2.86.
        assert!((mackinnon_p_constant(-2.86) - 0.05).abs() < 0.005);
        assert_eq!(mackinnon_p_constant(3.0), 1.0);
        assert_eq!(mackinnon_p_constant(-20.0), 0.0);
    }

    #[test]
    fn adf_rejects_unit_root_for_stationary_series() {
        let z = gaussian(1500, 6);
        let res = adf(&z).unwrap();
        assert!(res.statistic < -10.0);
        assert!(res.p_value < 0.01);

        let mut walk = vec![0.0];
        for t in 1..z.len() {
            walk.push(walk[t - 1] + z[t]);
        }
        let res = adf(&walk).unwrap();
        assert!(res.p_value > 0.01);
    }
}
