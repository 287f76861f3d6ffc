//! Best observed trial per algorithm.

use crate::data::{Dataset, MetricField, Record};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BestCase {
    pub algorithm: String,
    pub value: f64,
    /// Index of the winning record in dataset order.
    pub position: usize,
    pub record: Record,
}

/// For each algorithm, the trial with the smallest `metric`. Ties go to the
/// earliest record in dataset order. Results are sorted by value ascending.
pub fn best_cases(dataset: &Dataset, metric: MetricField) -> Vec<BestCase> {
    let mut best: BTreeMap<&str, (usize, f64)> = BTreeMap::new();
    for (i, r) in dataset.iter().enumerate() {
        let Some(v) = r.metric(metric) else {
            continue;
        };
        match best.get(r.algorithm.as_str()) {
            Some(&(_, cur)) if cur <= v => {}
            _ => {
                best.insert(&r.algorithm, (i, v));
            }
        }
    }

    let mut out: Vec<BestCase> = best
        .into_iter()
        .map(|(alg, (position, value))| BestCase {
            algorithm: alg.to_string(),
            value,
            position,
            record: dataset.records()[position].clone(),
        })
        .collect();
    out.sort_by(|a, b| a.value.total_cmp(&b.value).then(a.position.cmp(&b.position)));
    out
}
