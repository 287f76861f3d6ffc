//! Per-workload algorithm recommendations.

use crate::aggregate::mean_by;
use crate::data::{Dataset, GroupField, MetricField, Record};
use crate::diagnostics;
use serde::{Deserialize, Serialize};

/// Numeric record fields a bucket predicate can test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BucketField {
    Vertices,
    Density,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Comparison {
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Predicate {
    pub field: BucketField,
    pub op: Comparison,
    pub value: f64,
}

impl Predicate {
    pub fn new(field: BucketField, op: Comparison, value: f64) -> Self {
        Self { field, op, value }
    }

    pub fn matches(&self, record: &Record) -> bool {
        let x = match self.field {
            BucketField::Vertices => record.vertices as f64,
            BucketField::Density => record.density,
        };
        match self.op {
            Comparison::Lt => x < self.value,
            Comparison::Le => x <= self.value,
            Comparison::Gt => x > self.value,
            Comparison::Ge => x >= self.value,
            Comparison::Eq => x == self.value,
        }
    }
}

/// A named workload regime: records matching every predicate, ranked by `metric`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bucket {
    pub name: String,
    pub metric: MetricField,
    pub when: Vec<Predicate>,
}

impl Bucket {
    pub fn matches(&self, record: &Record) -> bool {
        self.when.iter().all(|p| p.matches(record))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub bucket: String,
    pub algorithm: String,
    pub metric: MetricField,
    pub mean: f64,
}

/// Arg-min algorithm by mean metric within each bucket. Buckets with no
/// matching rows are left out. Ties go to the alphabetically first algorithm.
pub fn recommend(dataset: &Dataset, buckets: &[Bucket]) -> Vec<Recommendation> {
    buckets
        .iter()
        .filter_map(|bucket| {
            let means = mean_by(
                dataset.iter().filter(|r| bucket.matches(r)),
                GroupField::Algorithm,
                bucket.metric,
            );

            let mut best: Option<(&str, f64)> = None;
            for (alg, mean) in &means {
                let Some(alg) = alg.as_text() else { continue };
                if best.is_none_or(|(_, m)| *mean < m) {
                    best = Some((alg, *mean));
                }
            }

            match best {
                Some((algorithm, mean)) => Some(Recommendation {
                    bucket: bucket.name.clone(),
                    algorithm: algorithm.to_string(),
                    metric: bucket.metric,
                    mean,
                }),
                None => {
                    diagnostics::skipped("recommendation", &bucket.name, "no matching rows");
                    None
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::dataset;
    use pretty_assertions::assert_eq;

    fn bucket(name: &str, metric: MetricField, when: Vec<Predicate>) -> Bucket {
        Bucket {
            name: name.to_string(),
            metric,
            when,
        }
    }

    #[test]
    fn best_mean_per_bucket() {
        let ds = dataset(&[
            ("Prim", 100, 0.05, 1.0, 500.0),
            ("Kruskal", 100, 0.05, 2.0, 200.0),
            ("Prim", 100, 5.0, 9.0, 0.0),
            ("Kruskal", 100, 5.0, 4.0, 0.0),
        ]);
        let buckets = vec![
            bucket(
                "sparse",
                MetricField::Time,
                vec![Predicate::new(BucketField::Density, Comparison::Lt, 0.1)],
            ),
            bucket(
                "dense",
                MetricField::Time,
                vec![Predicate::new(BucketField::Density, Comparison::Ge, 1.0)],
            ),
            bucket("memory", MetricField::Memory, vec![]),
        ];

        let got: Vec<(String, String)> = recommend(&ds, &buckets)
            .into_iter()
            .map(|r| (r.bucket, r.algorithm))
            .collect();
        assert_eq!(
            got,
            vec![
                ("sparse".to_string(), "Prim".to_string()),
                ("dense".to_string(), "Kruskal".to_string()),
                ("memory".to_string(), "Kruskal".to_string()),
            ]
        );
    }

    #[test]
    fn empty_bucket_yields_nothing() {
        let ds = dataset(&[("Prim", 100, 0.05, 1.0, 0.0)]);
        let large = bucket(
            "large",
            MetricField::Time,
            vec![Predicate::new(BucketField::Vertices, Comparison::Ge, 10000.0)],
        );
        assert!(recommend(&ds, &[large]).is_empty());
    }

    #[test]
    fn ties_go_to_first_name() {
        let ds = dataset(&[("B", 10, 0.1, 3.0, 0.0), ("A", 10, 0.1, 3.0, 0.0)]);
        let all = bucket("all", MetricField::Time, vec![]);
        assert_eq!(recommend(&ds, &[all])[0].algorithm, "A");
    }
}
