//! Descriptive figures for the extended sample.
//!
//! Each figure is split into a pure data-preparation step (tested) and a
//! drawing step that writes an SVG through plotters.

use std::error::Error;
use std::f64::consts::PI;
use std::path::Path;

use chrono::Datelike;
use plotters::prelude::*;
use statrs::distribution::{Continuous, Normal, StudentsT};

use crate::domain::Series;
use crate::error::AppError;
use crate::math::{acf, kurtosis, mean, pacf_yule_walker};
use crate::plot::style::{ChartStyle, GRAY, INK, TAB_BLUE, TAB_RED};

/// Bins of the return histogram.
pub const HISTOGRAM_BINS: usize = 100;

/// Points on the density evaluation grid.
const GRID_POINTS: usize = 1000;

/// Empirical and fitted densities over `mean ± 4σ`.
#[derive(Debug, Clone)]
pub struct DistributionCurves {
    pub mean: f64,
    /// Sample standard deviation (ddof = 1).
    pub std: f64,
    pub kurtosis: f64,
    /// `(left, right, density)` per bin.
    pub histogram: Vec<(f64, f64, f64)>,
    pub grid: Vec<f64>,
    pub kde: Vec<f64>,
    pub normal: Vec<f64>,
    /// Student's t matched to the sample kurtosis; `None` without excess
    /// kurtosis.
    pub student_t: Option<StudentFit>,
}

#[derive(Debug, Clone)]
pub struct StudentFit {
    pub nu: f64,
    pub scale: f64,
    pub pdf: Vec<f64>,
}

/// ACF/PACF values with their confidence band and plotting range.
#[derive(Debug, Clone)]
pub struct Correlogram {
    pub acf: Vec<f64>,
    pub pacf: Vec<f64>,
    /// `1.96 / √n`.
    pub band: f64,
    pub y_range: (f64, f64),
    pub squared: bool,
}

fn sample_std(x: &[f64]) -> f64 {
    let n = x.len() as f64;
    let m = mean(x);
    (x.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (n - 1.0)).sqrt()
}

fn linspace(lo: f64, hi: f64, n: usize) -> Vec<f64> {
    let step = (hi - lo) / (n.max(2) - 1) as f64;
    (0..n).map(|i| lo + step * i as f64).collect()
}

/// Density histogram over `[lo, hi]`, normalized by the in-range count.
pub fn density_histogram(values: &[f64], lo: f64, hi: f64, bins: usize) -> Vec<(f64, f64, f64)> {
    let width = (hi - lo) / bins as f64;
    let mut counts = vec![0usize; bins];
    for v in values {
        if *v < lo || *v > hi {
            continue;
        }
        let idx = (((v - lo) / width) as usize).min(bins - 1);
        counts[idx] += 1;
    }
    let total: usize = counts.iter().sum();
    counts
        .iter()
        .enumerate()
        .map(|(i, c)| {
            let left = lo + width * i as f64;
            let density = if total == 0 { 0.0 } else { *c as f64 / (total as f64 * width) };
            (left, left + width, density)
        })
        .collect()
}

/// Gaussian KDE with Scott's bandwidth `σ n^{-1/5}`.
pub fn gaussian_kde(values: &[f64], grid: &[f64]) -> Vec<f64> {
    let n = values.len() as f64;
    let h = sample_std(values) * n.powf(-0.2);
    if !(h.is_finite() && h > 0.0) {
        return vec![0.0; grid.len()];
    }
    let norm = 1.0 / (n * h * (2.0 * PI).sqrt());
    grid.iter()
        .map(|x| {
            values
                .iter()
                .map(|xi| {
                    let z = (x - xi) / h;
                    (-0.5 * z * z).exp()
                })
                .sum::<f64>()
                * norm
        })
        .collect()
}

/// Student's t implied by Pearson kurtosis `κ`: `ν = 4 + 6/(κ−3)`, scaled so
/// its variance matches `σ²`.
pub fn implied_student_t(kurt: f64, std: f64) -> Option<(f64, f64)> {
    let excess = kurt - 3.0;
    if !(excess.is_finite() && excess > 0.0) {
        return None;
    }
    let nu = 4.0 + 6.0 / excess;
    Some((nu, std * ((nu - 2.0) / nu).sqrt()))
}

pub fn distribution_curves(values: &[f64]) -> Result<DistributionCurves, AppError> {
    if values.len() < 2 {
        return Err(AppError::data("Need at least two returns for the distribution figure."));
    }
    let m = mean(values);
    let s = sample_std(values);
    if !(s.is_finite() && s > 0.0) {
        return Err(AppError::data("Returns have zero variance; nothing to plot."));
    }
    let (lo, hi) = (m - 4.0 * s, m + 4.0 * s);
    let grid = linspace(lo, hi, GRID_POINTS);

    let normal_dist =
        Normal::new(m, s).map_err(|e| AppError::data(format!("Cannot fit normal density: {e}")))?;
    let normal = grid.iter().map(|x| normal_dist.pdf(*x)).collect();

    let kurt = kurtosis(values);
    let student_t = match implied_student_t(kurt, s) {
        Some((nu, scale)) => {
            let dist = StudentsT::new(m, scale, nu)
                .map_err(|e| AppError::data(format!("Cannot fit Student's t density: {e}")))?;
            Some(StudentFit {
                nu,
                scale,
                pdf: grid.iter().map(|x| dist.pdf(*x)).collect(),
            })
        }
        None => {
            tracing::warn!(kurtosis = kurt, "no excess kurtosis; skipping Student's t overlay");
            None
        }
    };

    Ok(DistributionCurves {
        mean: m,
        std: s,
        kurtosis: kurt,
        histogram: density_histogram(values, lo, hi, HISTOGRAM_BINS),
        kde: gaussian_kde(values, &grid),
        grid,
        normal,
        student_t,
    })
}

pub fn correlogram(values: &[f64], nlags: usize, squared: bool) -> Correlogram {
    let data: Vec<f64> = if squared {
        values.iter().map(|v| v * v).collect()
    } else {
        values.to_vec()
    };
    Correlogram {
        acf: acf(&data, nlags),
        pacf: pacf_yule_walker(&data, nlags),
        band: 1.96 / (values.len() as f64).sqrt(),
        y_range: if squared { (-0.05, 0.2) } else { (-0.15, 0.2) },
        squared,
    }
}

fn date_axis(series: &Series) -> Vec<f64> {
    series
        .observations
        .iter()
        .map(|o| o.date.year() as f64 + o.date.ordinal0() as f64 / 365.25)
        .collect()
}

fn bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (lo, hi) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
    if !(lo.is_finite() && hi.is_finite()) {
        return (0.0, 1.0);
    }
    let pad = ((hi - lo) * 0.05).max(1e-9);
    (lo - pad, hi + pad)
}

fn to_export_error(path: &Path, err: Box<dyn Error>) -> AppError {
    AppError::export(path, err)
}

/// Log returns over squared returns, stacked.
pub fn volatility_clustering(path: &Path, series: &Series, style: &ChartStyle) -> Result<(), AppError> {
    let x = date_axis(series);
    let returns: Vec<(f64, f64)> = x.iter().copied().zip(series.observations.iter().map(|o| o.value)).collect();
    let squared: Vec<(f64, f64)> = returns.iter().map(|(t, r)| (*t, r * r)).collect();

    draw_volatility_clustering(path, &returns, &squared, style).map_err(|e| to_export_error(path, e))?;
    tracing::info!(path = %path.display(), "figure saved");
    Ok(())
}

fn draw_volatility_clustering(
    path: &Path,
    returns: &[(f64, f64)],
    squared: &[(f64, f64)],
    style: &ChartStyle,
) -> Result<(), Box<dyn Error>> {
    let root = SVGBackend::new(path, style.canvas(8.0, 6.0)).into_drawing_area();
    root.fill(&WHITE)?;
    let panels = root.split_evenly((2, 1));
    let (x0, x1) = bounds(returns.iter().map(|p| p.0));

    let panel_data = [("Log Returns", "r_t", returns), ("Squared Returns", "ε_t²", squared)];
    for (area, (title, y_desc, data)) in panels.iter().zip(panel_data) {
        let (y0, y1) = bounds(data.iter().map(|p| p.1));
        let mut chart = ChartBuilder::on(area)
            .caption(title, style.title_font())
            .margin(style.px(6.0))
            .x_label_area_size(style.px(22.0))
            .y_label_area_size(style.px(36.0))
            .build_cartesian_2d(x0..x1, y0..y1)?;

        chart
            .configure_mesh()
            .disable_mesh()
            .x_desc("Date")
            .y_desc(y_desc)
            .label_style(style.font())
            .x_label_formatter(&|x| format!("{x:.0}"))
            .draw()?;

        chart.draw_series(LineSeries::new(data.iter().copied(), TAB_BLUE.stroke_width(style.stroke())))?;
    }

    root.present()?;
    Ok(())
}

/// Histogram, KDE, fitted normal and kurtosis-matched Student's t.
pub fn distribution_comparison(path: &Path, values: &[f64], title: &str, style: &ChartStyle) -> Result<(), AppError> {
    let curves = distribution_curves(values)?;
    draw_distribution_comparison(path, &curves, title, style).map_err(|e| to_export_error(path, e))?;
    tracing::info!(path = %path.display(), "figure saved");
    Ok(())
}

fn draw_distribution_comparison(
    path: &Path,
    curves: &DistributionCurves,
    title: &str,
    style: &ChartStyle,
) -> Result<(), Box<dyn Error>> {
    let x0 = curves.mean - 4.0 * curves.std;
    let x1 = curves.mean + 4.0 * curves.std;
    let y_max = curves
        .histogram
        .iter()
        .map(|b| b.2)
        .chain(curves.kde.iter().copied())
        .chain(curves.normal.iter().copied())
        .chain(curves.student_t.iter().flat_map(|t| t.pdf.iter().copied()))
        .fold(0.0f64, f64::max)
        .max(1e-6)
        * 1.05;

    let root = SVGBackend::new(path, style.canvas(9.0, 6.0)).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption(title, style.title_font())
        .margin(style.px(8.0))
        .x_label_area_size(style.px(24.0))
        .y_label_area_size(style.px(40.0))
        .build_cartesian_2d(x0..x1, 0.0..y_max)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("Returns")
        .y_desc("Density")
        .label_style(style.font())
        .draw()?;

    let w = style.stroke();
    chart
        .draw_series(
            curves
                .histogram
                .iter()
                .map(|&(l, r, d)| Rectangle::new([(l, 0.0), (r, d)], GRAY.mix(0.2).filled())),
        )?
        .label("Empirical Histogram")
        .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 20, y + 5)], GRAY.mix(0.2).filled()));

    chart
        .draw_series(LineSeries::new(
            curves.grid.iter().copied().zip(curves.kde.iter().copied()),
            INK.mix(0.8).stroke_width(w),
        ))?
        .label("Empirical KDE")
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], INK.stroke_width(w)));

    chart
        .draw_series(LineSeries::new(
            curves.grid.iter().copied().zip(curves.normal.iter().copied()),
            TAB_RED.mix(0.8).stroke_width(w),
        ))?
        .label(format!("Normal (μ={:.3}, σ={:.3})", curves.mean, curves.std))
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], TAB_RED.stroke_width(w)));

    if let Some(t) = &curves.student_t {
        let thick = style.px(style.line_pt * 1.5);
        chart
            .draw_series(LineSeries::new(
                curves.grid.iter().copied().zip(t.pdf.iter().copied()),
                TAB_BLUE.stroke_width(thick),
            ))?
            .label(format!("Student's t (ν={:.2}, s={:.3})", t.nu, t.scale))
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], TAB_BLUE.stroke_width(thick)));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.8))
        .border_style(WHITE)
        .label_font(style.font())
        .draw()?;

    root.present()?;
    Ok(())
}

/// ACF over PACF with ±1.96/√n bands.
pub fn acf_pacf(path: &Path, values: &[f64], nlags: usize, squared: bool, style: &ChartStyle) -> Result<(), AppError> {
    if values.len() <= nlags {
        return Err(AppError::data(format!(
            "Need more than {nlags} returns for the correlogram, got {}.",
            values.len()
        )));
    }
    let corr = correlogram(values, nlags, squared);
    draw_acf_pacf(path, &corr, style).map_err(|e| to_export_error(path, e))?;
    tracing::info!(path = %path.display(), "figure saved");
    Ok(())
}

fn draw_acf_pacf(path: &Path, corr: &Correlogram, style: &ChartStyle) -> Result<(), Box<dyn Error>> {
    let label = if corr.squared { "Squared Returns" } else { "Returns" };
    let title = format!("Autocorrelation Analysis: {label}");
    let (y0, y1) = corr.y_range;
    let nlags = corr.acf.len().saturating_sub(1);
    let (x0, x1) = (-0.5, nlags as f64 + 0.5);

    let root = SVGBackend::new(path, style.canvas(10.0, 5.0)).into_drawing_area();
    root.fill(&WHITE)?;
    let panels = root.split_evenly((2, 1));

    let panel_data = [(Some(title.as_str()), "ACF", &corr.acf, TAB_BLUE), (None, "PACF", &corr.pacf, TAB_RED)];
    for (area, (caption, y_desc, values, color)) in panels.iter().zip(panel_data) {
        let mut builder = ChartBuilder::on(area);
        if let Some(caption) = caption {
            builder.caption(caption, style.title_font());
        }
        let mut chart = builder
            .margin(style.px(6.0))
            .x_label_area_size(style.px(20.0))
            .y_label_area_size(style.px(36.0))
            .build_cartesian_2d(x0..x1, y0..y1)?;

        chart
            .configure_mesh()
            .disable_mesh()
            .x_desc("Lags")
            .y_desc(y_desc)
            .label_style(style.font())
            .draw()?;

        chart.draw_series(values.iter().enumerate().map(|(lag, &v)| {
            let x = lag as f64;
            Rectangle::new([(x - 0.3, 0.0), (x + 0.3, v.clamp(y0, y1))], color.mix(0.8).filled())
        }))?;

        let band_style = GRAY.mix(0.5).stroke_width(style.stroke());
        for level in [corr.band, -corr.band] {
            chart.draw_series(std::iter::once(PathElement::new(vec![(x0, level), (x1, level)], band_style)))?;
        }
        chart.draw_series(std::iter::once(PathElement::new(
            vec![(x0, 0.0), (x1, 0.0)],
            INK.stroke_width(style.stroke()),
        )))?;
    }

    root.present()?;
    Ok(())
}
