//! Group-by reduction over benchmark records.
//!
//! Groups are keyed by an ordered tuple of column values and kept in a
//! `BTreeMap`, so output order is the ascending lexicographic order of the key
//! tuple. Only observed values form groups; an empty group cannot occur.

use crate::data::{GroupField, MetricField, Record};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

/// One grouping-column value.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum GroupValue {
    Text(String),
    Count(u64),
    Real(f64),
}

impl GroupValue {
    pub fn of(record: &Record, field: GroupField) -> Self {
        match field {
            GroupField::Algorithm => GroupValue::Text(record.algorithm.clone()),
            GroupField::Vertices => GroupValue::Count(record.vertices),
            GroupField::Density => GroupValue::Real(record.density),
        }
    }

    /// Numeric view for plotting; `None` for text keys.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            GroupValue::Text(_) => None,
            GroupValue::Count(n) => Some(*n as f64),
            GroupValue::Real(x) => Some(*x),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            GroupValue::Text(s) => Some(s),
            _ => None,
        }
    }

    fn rank(&self) -> u8 {
        match self {
            GroupValue::Text(_) => 0,
            GroupValue::Count(_) => 1,
            GroupValue::Real(_) => 2,
        }
    }
}

impl Ord for GroupValue {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (GroupValue::Text(a), GroupValue::Text(b)) => a.cmp(b),
            (GroupValue::Count(a), GroupValue::Count(b)) => a.cmp(b),
            (GroupValue::Real(a), GroupValue::Real(b)) => a.total_cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for GroupValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for GroupValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for GroupValue {}

impl fmt::Display for GroupValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupValue::Text(s) => f.write_str(s),
            GroupValue::Count(n) => write!(f, "{}", n),
            GroupValue::Real(x) => write!(f, "{}", x),
        }
    }
}

/// Tuple of grouping values, compared lexicographically.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct GroupKey(pub Vec<GroupValue>);

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|v| v.to_string()).collect();
        write!(f, "({})", parts.join(", "))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateStat {
    pub key: GroupKey,
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation; 0 for a single-element group.
    pub std: f64,
    pub min: f64,
    pub max: f64,
}

impl AggregateStat {
    /// Summarize a non-empty group.
    fn from_values(key: GroupKey, values: &[f64]) -> Self {
        let count = values.len();
        let mean = values.iter().sum::<f64>() / count as f64;
        let std = if count < 2 {
            0.0
        } else {
            let ss: f64 = values.iter().map(|x| (x - mean).powi(2)).sum();
            (ss / (count - 1) as f64).sqrt()
        };
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        Self {
            key,
            count,
            mean,
            std,
            min,
            max,
        }
    }
}

/// Reduce `rows` to one `AggregateStat` per distinct `group_by` key, sorted by key.
///
/// Rows where `metric` was not measured (memory 0) do not contribute. An empty
/// `group_by` yields a single group covering every contributing row.
pub fn aggregate<'a, I>(rows: I, group_by: &[GroupField], metric: MetricField) -> Vec<AggregateStat>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut groups: BTreeMap<GroupKey, Vec<f64>> = BTreeMap::new();
    for r in rows {
        let Some(value) = r.metric(metric) else {
            continue;
        };
        let key = GroupKey(group_by.iter().map(|f| GroupValue::of(r, *f)).collect());
        groups.entry(key).or_default().push(value);
    }

    groups
        .into_iter()
        .map(|(key, values)| AggregateStat::from_values(key, &values))
        .collect()
}

/// Mean of `metric` per value of a single grouping field.
pub fn mean_by<'a, I>(rows: I, field: GroupField, metric: MetricField) -> BTreeMap<GroupValue, f64>
where
    I: IntoIterator<Item = &'a Record>,
{
    aggregate(rows, &[field], metric)
        .into_iter()
        .filter_map(|s| s.key.0.into_iter().next().map(|k| (k, s.mean)))
        .collect()
}

/// Mean of `metric` over all contributing rows, if any.
pub fn overall_mean<'a, I>(rows: I, metric: MetricField) -> Option<f64>
where
    I: IntoIterator<Item = &'a Record>,
{
    aggregate(rows, &[], metric).first().map(|s| s.mean)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::dataset;
    use pretty_assertions::assert_eq;

    #[test]
    fn mean_is_sum_over_count() {
        let ds = dataset(&[
            ("Prim", 100, 0.1, 1.5, 0.0),
            ("Prim", 100, 0.1, 2.25, 0.0),
            ("Prim", 100, 0.1, 7.0, 0.0),
            ("Kruskal", 100, 0.1, 3.0, 0.0),
        ]);
        let stats = aggregate(ds.iter(), &[GroupField::Algorithm], MetricField::Time);

        assert_eq!(stats.len(), 2);
        let prim = &stats[1];
        assert_eq!(prim.key, GroupKey(vec![GroupValue::Text("Prim".into())]));
        assert_eq!(prim.count, 3);
        assert!((prim.mean - (1.5 + 2.25 + 7.0) / 3.0).abs() < 1e-9);
        assert_eq!(prim.min, 1.5);
        assert_eq!(prim.max, 7.0);
    }

    #[test]
    fn single_element_std_is_zero() {
        let ds = dataset(&[("Kruskal", 10, 0.1, 4.0, 0.0)]);
        let stats = aggregate(ds.iter(), &[GroupField::Algorithm], MetricField::Time);
        assert_eq!(stats[0].std, 0.0);
    }

    #[test]
    fn std_uses_sample_denominator() {
        let ds = dataset(&[("A", 10, 0.1, 2.0, 0.0), ("A", 10, 0.1, 4.0, 0.0)]);
        let stats = aggregate(ds.iter(), &[], MetricField::Time);
        assert!((stats[0].std - 2f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn keys_sort_lexicographically_over_tuple() {
        let ds = dataset(&[
            ("B", 100, 0.5, 1.0, 0.0),
            ("A", 1000, 0.1, 1.0, 0.0),
            ("A", 100, 2.0, 1.0, 0.0),
            ("A", 100, 0.1, 1.0, 0.0),
        ]);
        let keys: Vec<String> = aggregate(
            ds.iter(),
            &[GroupField::Algorithm, GroupField::Vertices, GroupField::Density],
            MetricField::Time,
        )
        .into_iter()
        .map(|s| s.key.to_string())
        .collect();

        assert_eq!(
            keys,
            vec!["(A, 100, 0.1)", "(A, 100, 2)", "(A, 1000, 0.1)", "(B, 100, 0.5)"]
        );
    }

    #[test]
    fn unmeasured_memory_is_excluded() {
        let ds = dataset(&[
            ("A", 10, 0.1, 1.0, 0.0),
            ("A", 10, 0.1, 1.0, 300.0),
            ("B", 10, 0.1, 1.0, 0.0),
        ]);
        let means = mean_by(ds.iter(), GroupField::Algorithm, MetricField::Memory);
        assert_eq!(means.len(), 1);
        assert_eq!(means[&GroupValue::Text("A".into())], 300.0);
    }

    #[test]
    fn overall_mean_of_nothing_is_none() {
        let ds = dataset(&[]);
        assert_eq!(overall_mean(ds.iter(), MetricField::Time), None);
    }
}
