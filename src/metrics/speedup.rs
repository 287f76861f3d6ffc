//! Speedup ratios between two algorithms.

use crate::aggregate::{GroupValue, mean_by, overall_mean};
use crate::data::{Dataset, GroupField, MetricField};
use crate::diagnostics;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpeedupRatio {
    pub baseline: String,
    pub candidate: String,
    /// Workload bucket the means were matched on; `None` for whole-dataset means.
    pub bucket: Option<GroupValue>,
    /// baseline mean time / candidate mean time. Always finite and > 0.
    pub ratio: f64,
}

/// `baseline / candidate`, or `None` when either side is missing or not positive.
fn ratio(baseline: Option<f64>, candidate: Option<f64>) -> Option<f64> {
    let (b, c) = (baseline?, candidate?);
    let r = b / c;
    (b > 0.0 && c > 0.0 && r.is_finite()).then_some(r)
}

/// Per-bucket ratios for every bucket where both algorithms have a usable mean,
/// ordered by bucket.
pub fn speedup_by(
    dataset: &Dataset,
    baseline: &str,
    candidate: &str,
    bucket: GroupField,
) -> Vec<SpeedupRatio> {
    let base = mean_by(
        dataset.iter().filter(|r| r.algorithm == baseline),
        bucket,
        MetricField::Time,
    );
    let cand = mean_by(
        dataset.iter().filter(|r| r.algorithm == candidate),
        bucket,
        MetricField::Time,
    );

    base.into_iter()
        .filter_map(|(key, b)| match ratio(Some(b), cand.get(&key).copied()) {
            Some(r) => Some(SpeedupRatio {
                baseline: baseline.to_string(),
                candidate: candidate.to_string(),
                bucket: Some(key),
                ratio: r,
            }),
            None => {
                diagnostics::skipped(
                    "speedup",
                    format!("{} vs {} at {} {}", baseline, candidate, bucket, key),
                    "missing or zero mean",
                );
                None
            }
        })
        .collect()
}

/// Ratio of whole-dataset mean times.
pub fn overall_speedup(dataset: &Dataset, baseline: &str, candidate: &str) -> Option<SpeedupRatio> {
    let b = overall_mean(dataset.iter().filter(|r| r.algorithm == baseline), MetricField::Time);
    let c = overall_mean(dataset.iter().filter(|r| r.algorithm == candidate), MetricField::Time);

    let Some(r) = ratio(b, c) else {
        diagnostics::skipped(
            "speedup",
            format!("{} vs {}", baseline, candidate),
            "missing or zero mean",
        );
        return None;
    };
    Some(SpeedupRatio {
        baseline: baseline.to_string(),
        candidate: candidate.to_string(),
        bucket: None,
        ratio: r,
    })
}

/// Overall speedup of every parallel algorithm against `baseline`, by name.
pub fn parallel_speedups(dataset: &Dataset, baseline: &str) -> Vec<SpeedupRatio> {
    dataset
        .algorithms()
        .filter(|d| d.parallel)
        .filter_map(|d| overall_speedup(dataset, baseline, &d.name))
        .collect()
}
