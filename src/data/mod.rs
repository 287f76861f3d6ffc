//! Benchmark dataset: typed records and the CSV loader that produces them.

pub mod algorithm;
pub mod error;
pub mod load;
pub mod record;

pub use algorithm::Family;
pub use load::{candidate_sources, load_first};
pub use record::{Dataset, GroupField, MetricField, Record};

#[cfg(test)]
pub mod fixtures {
    use super::{Dataset, Record};

    pub fn record(
        algorithm: &str,
        vertices: u64,
        density: f64,
        time_ms: f64,
        memory_kb: f64,
    ) -> Record {
        Record {
            algorithm: algorithm.to_string(),
            vertices,
            density,
            time_ms,
            memory_kb,
            experiment: None,
        }
    }

    /// Build a dataset from `(algorithm, vertices, density, time_ms, memory_kb)` rows.
    pub fn dataset(rows: &[(&str, u64, f64, f64, f64)]) -> Dataset {
        let records = rows
            .iter()
            .map(|&(a, v, d, t, m)| record(a, v, d, t, m))
            .collect();
        Dataset::from_records("fixture.csv", records, 0)
    }
}
