use super::algorithm::AlgorithmDescriptor;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// One benchmark trial.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    pub algorithm: String,
    pub vertices: u64,
    pub density: f64,
    pub time_ms: f64,
    /// 0 means the runner did not measure memory for this trial.
    pub memory_kb: f64,
    pub experiment: Option<String>,
}

impl Record {
    /// Value of `metric` for this trial; `None` when the metric was not measured.
    pub fn metric(&self, metric: MetricField) -> Option<f64> {
        match metric {
            MetricField::Time => Some(self.time_ms),
            MetricField::Memory => (self.memory_kb > 0.0).then_some(self.memory_kb),
        }
    }
}

/// Columns a reduction can group on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupField {
    Algorithm,
    Vertices,
    Density,
}

/// Numeric columns a reduction can summarize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricField {
    #[default]
    Time,
    Memory,
}

impl fmt::Display for GroupField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            GroupField::Algorithm => "algorithm",
            GroupField::Vertices => "vertices",
            GroupField::Density => "density",
        })
    }
}

/// Immutable, ordered set of trials plus the descriptors of every algorithm seen.
#[derive(Debug, Clone)]
pub struct Dataset {
    source: PathBuf,
    records: Vec<Record>,
    algorithms: BTreeMap<String, AlgorithmDescriptor>,
    dropped_trials: usize,
}

impl Dataset {
    /// Freeze `records` (in load order) and classify every algorithm name once.
    pub fn from_records(
        source: impl Into<PathBuf>,
        records: Vec<Record>,
        dropped_trials: usize,
    ) -> Self {
        let mut algorithms = BTreeMap::new();
        for r in &records {
            if !algorithms.contains_key(&r.algorithm) {
                algorithms.insert(r.algorithm.clone(), AlgorithmDescriptor::classify(&r.algorithm));
            }
        }

        Self {
            source: source.into(),
            records,
            algorithms,
            dropped_trials,
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Failed trials discarded while loading.
    pub fn dropped_trials(&self) -> usize {
        self.dropped_trials
    }

    pub fn descriptor(&self, algorithm: &str) -> Option<&AlgorithmDescriptor> {
        self.algorithms.get(algorithm)
    }

    /// Descriptors sorted by algorithm name.
    pub fn algorithms(&self) -> impl Iterator<Item = &AlgorithmDescriptor> {
        self.algorithms.values()
    }

    /// Distinct vertex counts, ascending.
    pub fn vertex_sizes(&self) -> Vec<u64> {
        let mut v: Vec<u64> = self.records.iter().map(|r| r.vertices).collect();
        v.sort_unstable();
        v.dedup();
        v
    }

    /// Distinct densities, ascending.
    pub fn densities(&self) -> Vec<f64> {
        let mut v: Vec<f64> = self.records.iter().map(|r| r.density).collect();
        v.sort_by(f64::total_cmp);
        v.dedup();
        v
    }
}
