//! Sample moments and autocorrelations.
//!
//! All estimators here are the biased (divide-by-n) versions, which is what
//! the descriptive tables report.

pub fn mean(x: &[f64]) -> f64 {
    if x.is_empty() {
        return f64::NAN;
    }
    x.iter().sum::<f64>() / x.len() as f64
}

/// `k`-th central moment.
pub fn central_moment(x: &[f64], k: i32) -> f64 {
    let m = mean(x);
    x.iter().map(|v| (v - m).powi(k)).sum::<f64>() / x.len() as f64
}

/// Population standard deviation (ddof = 0).
pub fn std_dev(x: &[f64]) -> f64 {
    central_moment(x, 2).sqrt()
}

/// Biased sample skewness `m3 / m2^{3/2}`.
pub fn skewness(x: &[f64]) -> f64 {
    let m2 = central_moment(x, 2);
    central_moment(x, 3) / m2.powf(1.5)
}

/// Pearson kurtosis `m4 / m2²` (normal = 3).
pub fn kurtosis(x: &[f64]) -> f64 {
    let m2 = central_moment(x, 2);
    central_moment(x, 4) / (m2 * m2)
}

/// Autocorrelations `ρ_0..=ρ_nlags` from biased autocovariances.
pub fn acf(x: &[f64], nlags: usize) -> Vec<f64> {
    let n = x.len();
    let m = mean(x);
    let d: Vec<f64> = x.iter().map(|v| v - m).collect();
    let c0: f64 = d.iter().map(|v| v * v).sum::<f64>() / n as f64;

    (0..=nlags)
        .map(|k| {
            if k >= n || c0 == 0.0 {
                return if k == 0 { 1.0 } else { 0.0 };
            }
            let ck: f64 = d[k..].iter().zip(&d[..n - k]).map(|(a, b)| a * b).sum::<f64>() / n as f64;
            ck / c0
        })
        .collect()
}

/// Partial autocorrelations via Levinson–Durbin on the biased ACF
/// (Yule–Walker without small-sample adjustment). `pacf[0] = 1`.
pub fn pacf_yule_walker(x: &[f64], nlags: usize) -> Vec<f64> {
    let r = acf(x, nlags);
    let mut out = vec![1.0];
    if nlags == 0 {
        return out;
    }

    let mut phi = vec![r[1]];
    let mut sigma = 1.0 - r[1] * r[1];
    out.push(r[1]);

    for k in 2..=nlags {
        let num = r[k] - (1..k).map(|j| phi[j - 1] * r[k - j]).sum::<f64>();
        let a = if sigma.abs() > f64::EPSILON { num / sigma } else { 0.0 };
        let mut next = Vec::with_capacity(k);
        for j in 1..k {
            next.push(phi[j - 1] - a * phi[k - j - 1]);
        }
        next.push(a);
        phi = next;
        sigma *= 1.0 - a * a;
        out.push(a);
    }
    out
}
