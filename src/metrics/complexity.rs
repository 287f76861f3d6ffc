//! Empirical complexity exponents from log-log least squares.

use crate::aggregate::{aggregate, mean_by};
use crate::data::{Dataset, GroupField, MetricField};
use crate::diagnostics;
use serde::Serialize;

/// Fewest distinct input sizes a fit is attempted with.
pub const MIN_POINTS: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComplexityFit {
    pub algorithm: String,
    pub density: f64,
    /// Slope of ln(time) against ln(vertices).
    pub exponent: f64,
    /// Points that survived filtering and entered the fit.
    pub sample_count: usize,
}

/// Ordinary least squares slope of `ln(y)` on `ln(x)`.
///
/// Points with a non-positive coordinate are dropped before the transform.
/// Returns the slope and the number of points used, or `None` when fewer than
/// `MIN_POINTS` distinct x values remain.
pub fn fit_exponent(points: &[(f64, f64)]) -> Option<(f64, usize)> {
    let logs: Vec<(f64, f64)> = points
        .iter()
        .filter(|(x, y)| *x > 0.0 && *y > 0.0 && x.is_finite() && y.is_finite())
        .map(|(x, y)| (x.ln(), y.ln()))
        .collect();

    let mut xs: Vec<f64> = logs.iter().map(|p| p.0).collect();
    xs.sort_by(f64::total_cmp);
    xs.dedup();
    if xs.len() < MIN_POINTS {
        return None;
    }

    let n = logs.len() as f64;
    let mean_x = logs.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_y = logs.iter().map(|p| p.1).sum::<f64>() / n;

    let mut sxx = 0.0;
    let mut sxy = 0.0;
    for (x, y) in &logs {
        sxx += (x - mean_x) * (x - mean_x);
        sxy += (x - mean_x) * (y - mean_y);
    }
    if sxx <= 0.0 {
        return None;
    }

    Some((sxy / sxx, logs.len()))
}

/// Fit one algorithm at one density. Repeated trials are averaged per vertex
/// count first, so each input size contributes one point.
pub fn fit_complexity(dataset: &Dataset, algorithm: &str, density: f64) -> Option<ComplexityFit> {
    let subset = dataset
        .iter()
        .filter(|r| r.algorithm == algorithm && r.density == density);
    let points: Vec<(f64, f64)> = mean_by(subset, GroupField::Vertices, MetricField::Time)
        .into_iter()
        .filter_map(|(k, mean)| k.as_f64().map(|x| (x, mean)))
        .collect();

    match fit_exponent(&points) {
        Some((exponent, sample_count)) => Some(ComplexityFit {
            algorithm: algorithm.to_string(),
            density,
            exponent,
            sample_count,
        }),
        None => {
            diagnostics::skipped(
                "complexity fit",
                format!("{} at density {}", algorithm, density),
                "fewer than 3 usable vertex sizes",
            );
            None
        }
    }
}

/// Fit every observed (algorithm, density) pair, ordered by algorithm then density.
pub fn complexity_fits(dataset: &Dataset) -> Vec<ComplexityFit> {
    aggregate(
        dataset.iter(),
        &[GroupField::Algorithm, GroupField::Density],
        MetricField::Time,
    )
    .iter()
    .filter_map(|s| match s.key.0.as_slice() {
        [alg, density] => Some((alg.as_text()?, density.as_f64()?)),
        _ => None,
    })
    .filter_map(|(alg, density)| fit_complexity(dataset, alg, density))
    .collect()
}
