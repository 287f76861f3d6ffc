//! Analysis configuration (optional JSON file).
//!
//! JSON shape (every field optional):
//! {
//!   "baseline": "Prim_BinaryHeap",                 // reference for parallel speedups
//!   "gap": { "baseline": "KKT", "candidate": "Prim_BinaryHeap" },
//!   "buckets": [
//!     {
//!       "name": "Sparse graphs (density < 1.0)",
//!       "metric": "time",                           // or "memory"
//!       "when": [ { "field": "density", "op": "lt", "value": 1.0 } ]
//!     }
//!   ]
//! }
//!
//! Omitted baselines are resolved against the loaded dataset by algorithm
//! family; omitted buckets fall back to `default_buckets()`.

use crate::Result;
use crate::data::{Dataset, Family, MetricField};
use crate::metrics::{Bucket, BucketField, Comparison, Predicate};

use anyhow::{Context, bail};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub baseline: Option<String>,

    #[serde(default)]
    pub gap: Option<RawPair>,

    #[serde(default)]
    pub buckets: Option<Vec<RawBucket>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawPair {
    pub baseline: String,
    pub candidate: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawBucket {
    pub name: String,

    #[serde(default)]
    pub metric: MetricField,

    #[serde(default)]
    pub when: Vec<RawPredicate>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawPredicate {
    pub field: BucketField,
    pub op: Comparison,
    pub value: f64,
}

/// Validated configuration ready for the report model.
#[derive(Debug, Clone)]
pub struct ValidatedConfig {
    pub baseline: Option<String>,
    pub gap: Option<(String, String)>,
    pub buckets: Vec<Bucket>,
}

impl AnalysisConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parse config file {}", path.display()))
    }

    /// Check names and thresholds, then fill in default buckets.
    pub fn validate_and_build(&self) -> Result<ValidatedConfig> {
        let baseline = match &self.baseline {
            Some(b) if b.trim().is_empty() => bail!("config: baseline must not be empty"),
            Some(b) => Some(b.trim().to_string()),
            None => None,
        };

        let gap = match &self.gap {
            Some(p) if p.baseline.trim().is_empty() || p.candidate.trim().is_empty() => {
                bail!("config: gap baseline and candidate must not be empty")
            }
            Some(p) => Some((p.baseline.trim().to_string(), p.candidate.trim().to_string())),
            None => None,
        };

        let buckets = match &self.buckets {
            None => default_buckets(),
            Some(raw) => {
                let mut seen = BTreeSet::new();
                let mut out = Vec::with_capacity(raw.len());
                for b in raw {
                    let name = b.name.trim();
                    if name.is_empty() {
                        bail!("config: bucket with empty name");
                    }
                    if !seen.insert(name.to_string()) {
                        bail!("config: duplicate bucket name '{}'", name);
                    }
                    for p in &b.when {
                        if !p.value.is_finite() {
                            bail!("config: bucket '{}' has a non-finite threshold", name);
                        }
                    }
                    out.push(Bucket {
                        name: name.to_string(),
                        metric: b.metric,
                        when: b
                            .when
                            .iter()
                            .map(|p| Predicate::new(p.field, p.op, p.value))
                            .collect(),
                    });
                }
                out
            }
        };

        Ok(ValidatedConfig {
            baseline,
            gap,
            buckets,
        })
    }
}

impl ValidatedConfig {
    /// Configured baseline, else the first sequential Prim variant in the data.
    pub fn baseline_for(&self, dataset: &Dataset) -> Option<String> {
        self.baseline.clone().or_else(|| {
            dataset
                .algorithms()
                .find(|d| d.family == Family::Prim && !d.parallel)
                .map(|d| d.name.clone())
        })
    }

    /// Configured gap pair, else (first KKT variant, baseline).
    pub fn gap_for(&self, dataset: &Dataset) -> Option<(String, String)> {
        if let Some(pair) = &self.gap {
            return Some(pair.clone());
        }
        let kkt = dataset.algorithms().find(|d| d.family == Family::Kkt)?;
        Some((kkt.name.clone(), self.baseline_for(dataset)?))
    }
}

/// The workload regimes the benchmark report has always summarized.
pub fn default_buckets() -> Vec<Bucket> {
    vec![
        Bucket {
            name: "Sparse graphs (density < 1.0)".to_string(),
            metric: MetricField::Time,
            when: vec![Predicate::new(BucketField::Density, Comparison::Lt, 1.0)],
        },
        Bucket {
            name: "Dense graphs (density >= 1.0)".to_string(),
            metric: MetricField::Time,
            when: vec![Predicate::new(BucketField::Density, Comparison::Ge, 1.0)],
        },
        Bucket {
            name: "Most memory efficient".to_string(),
            metric: MetricField::Memory,
            when: vec![],
        },
        Bucket {
            name: "Large graphs (V >= 1000)".to_string(),
            metric: MetricField::Time,
            when: vec![Predicate::new(BucketField::Vertices, Comparison::Ge, 1000.0)],
        },
    ]
}
