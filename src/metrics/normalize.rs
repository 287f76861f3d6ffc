//! Row normalization for relative-performance ranking.

use crate::aggregate::{GroupValue, aggregate};
use crate::data::{Dataset, GroupField, MetricField};
use crate::diagnostics;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// One row of the ranking: each algorithm's mean divided by the row's best mean.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedRow {
    pub key: GroupValue,
    /// algorithm -> relative value (>= 1, the best algorithm is exactly 1).
    pub values: BTreeMap<String, f64>,
}

/// Dense table for heatmap-style rendering. Cells without data are `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    pub row_labels: Vec<String>,
    pub column_labels: Vec<String>,
    pub matrix: Vec<Vec<Option<f64>>>,
}

/// Build a table keyed by `row_field` and columned by algorithm, then divide
/// each row by its minimum cell. Rows whose minimum is not positive are dropped.
pub fn normalize_rows(
    dataset: &Dataset,
    row_field: GroupField,
    metric: MetricField,
) -> Vec<NormalizedRow> {
    let mut rows: BTreeMap<GroupValue, BTreeMap<String, f64>> = BTreeMap::new();
    for stat in aggregate(dataset.iter(), &[row_field, GroupField::Algorithm], metric) {
        let mut key = stat.key.0.into_iter();
        if let (Some(row), Some(GroupValue::Text(alg))) = (key.next(), key.next()) {
            rows.entry(row).or_default().insert(alg, stat.mean);
        }
    }

    rows.into_iter()
        .filter_map(|(key, cells)| {
            let min = cells.values().copied().fold(f64::INFINITY, f64::min);
            if !(min > 0.0 && min.is_finite()) {
                diagnostics::skipped(
                    "normalization",
                    format!("{} {}", row_field, key),
                    "row minimum is not positive",
                );
                return None;
            }
            let values = cells.into_iter().map(|(alg, v)| (alg, v / min)).collect();
            Some(NormalizedRow { key, values })
        })
        .collect()
}

impl Table {
    pub fn from_rows(rows: &[NormalizedRow]) -> Self {
        let columns: BTreeSet<&str> = rows
            .iter()
            .flat_map(|r| r.values.keys().map(String::as_str))
            .collect();

        let matrix = rows
            .iter()
            .map(|r| columns.iter().map(|c| r.values.get(*c).copied()).collect())
            .collect();

        Self {
            row_labels: rows.iter().map(|r| r.key.to_string()).collect(),
            column_labels: columns.into_iter().map(str::to_string).collect(),
            matrix,
        }
    }
}
