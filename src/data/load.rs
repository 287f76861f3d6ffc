//! Candidate resolution and CSV parsing for benchmark result files.
//!
//! Expected columns (comma-separated, header required, extra columns ignored):
//! Experiment,Vertices,Edges,Density,Status,Algorithm,Time(ms),Memory(KB),Weight
//!
//! Example:
//! sparse_1000,1000,5000,0.05,COMPLETED,Kruskal,1.82,412,20381.4

use super::error::LoadError;
use super::record::{Dataset, Record};
use crate::diagnostics;

use csv::{ReaderBuilder, StringRecord, Trim};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Required columns by canonical name, in schema order.
const REQUIRED: [&str; 5] = ["algorithm", "vertices", "density", "time", "memory"];

/// The runners rename crashed trials to `<name>_ERROR` / `<name>_MEMORY_ERROR`.
const FAILURE_SUFFIX: &str = "_ERROR";

/// Expand a file name into its probe order: the name itself, then the same
/// name in the parent directory.
pub fn candidate_sources(name: impl AsRef<Path>) -> Vec<PathBuf> {
    let name = name.as_ref();
    let mut out = vec![name.to_path_buf()];
    if name.is_relative() {
        out.push(Path::new("..").join(name));
    }
    out
}

/// Probe `candidates` in order and parse the first one that can be opened.
///
/// Missing or unopenable candidates are skipped. Once a candidate opens, its
/// parse result is final: a schema or content error is returned as-is rather
/// than falling through to the next location.
pub fn load_first(candidates: &[PathBuf]) -> Result<Dataset, LoadError> {
    for path in candidates {
        if !path.is_file() {
            tracing::debug!(path = %path.display(), "candidate source does not exist");
            continue;
        }
        let file = match File::open(path) {
            Ok(f) => f,
            Err(err) => {
                tracing::debug!(
                    path = %path.display(),
                    error = %err,
                    "candidate source unreadable"
                );
                continue;
            }
        };

        let dataset = parse_reader(file, path)?;
        tracing::info!(
            path = %path.display(),
            records = dataset.len(),
            algorithms = dataset.algorithms().count(),
            "loaded benchmark data"
        );
        return Ok(dataset);
    }

    Err(LoadError::DataUnavailable {
        tried: candidates.to_vec(),
    })
}

/// Column positions resolved from the header row.
struct Columns {
    algorithm: usize,
    vertices: usize,
    density: usize,
    time: usize,
    memory: usize,
    experiment: Option<usize>,
}

impl Columns {
    fn resolve(headers: &StringRecord, path: &Path) -> Result<Self, LoadError> {
        let names: Vec<String> = headers.iter().map(canonical).collect();
        let find = |name: &str| names.iter().position(|n| n == name);

        let missing: Vec<String> = REQUIRED
            .into_iter()
            .filter(|c| find(*c).is_none())
            .map(str::to_string)
            .collect();
        if !missing.is_empty() {
            return Err(LoadError::SchemaError {
                path: path.to_path_buf(),
                missing,
            });
        }

        let idx = |name: &str| find(name).unwrap_or_default();
        Ok(Self {
            algorithm: idx("algorithm"),
            vertices: idx("vertices"),
            density: idx("density"),
            time: idx("time"),
            memory: idx("memory"),
            experiment: find("experiment"),
        })
    }
}

/// "Time(ms)" -> "time", " Memory (KB) " -> "memory".
fn canonical(header: &str) -> String {
    let h = header.trim();
    let h = h.find('(').map_or(h, |i| &h[..i]);
    h.trim().to_ascii_lowercase()
}

/// Parse a benchmark CSV from `reader`. `path` is only used in diagnostics.
pub fn parse_reader<R: Read>(reader: R, path: &Path) -> Result<Dataset, LoadError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(reader);

    let csv_error = |err: csv::Error| LoadError::MalformedRow {
        path: path.to_path_buf(),
        line: err.position().map_or(1, |p| p.line()),
        reason: err.to_string(),
    };

    let headers = rdr.headers().map_err(csv_error)?.clone();
    let cols = Columns::resolve(&headers, path)?;

    let mut records = Vec::new();
    let mut dropped = 0usize;

    for row in rdr.records() {
        let row = row.map_err(csv_error)?;
        let line = row.position().map_or(0, |p| p.line());
        let bad = |reason: String| LoadError::MalformedRow {
            path: path.to_path_buf(),
            line,
            reason,
        };

        if row.iter().all(str::is_empty) {
            continue;
        }

        let algorithm = row.get(cols.algorithm).unwrap_or_default();
        if algorithm.is_empty() {
            return Err(bad("empty algorithm name".to_string()));
        }

        let time_ms: f64 = parse_field(&row, cols.time, "time").map_err(bad)?;
        if time_ms < 0.0 || algorithm.ends_with(FAILURE_SUFFIX) {
            tracing::debug!(line, algorithm, time_ms, "dropping failed trial");
            dropped += 1;
            continue;
        }
        if !time_ms.is_finite() {
            return Err(bad(format!("time must be finite, got {}", time_ms)));
        }

        let vertices: u64 = parse_field(&row, cols.vertices, "vertices").map_err(bad)?;
        if vertices == 0 {
            return Err(bad("vertices must be positive".to_string()));
        }

        let density: f64 = parse_field(&row, cols.density, "density").map_err(bad)?;
        if !(density.is_finite() && density > 0.0) {
            return Err(bad(format!("density must be positive, got {}", density)));
        }

        let memory_kb: f64 = parse_field(&row, cols.memory, "memory").map_err(bad)?;
        if !(memory_kb.is_finite() && memory_kb >= 0.0) {
            return Err(bad(format!("memory must be non-negative, got {}", memory_kb)));
        }

        let experiment = cols
            .experiment
            .and_then(|i| row.get(i))
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        records.push(Record {
            algorithm: algorithm.to_string(),
            vertices,
            density,
            time_ms,
            memory_kb,
            experiment,
        });
    }

    if dropped > 0 {
        diagnostics::warn(format!(
            "{}: dropped {} failed trial(s) (negative time or _ERROR algorithm)",
            path.display(),
            dropped
        ));
    }

    Ok(Dataset::from_records(path, records, dropped))
}

fn parse_field<T: FromStr>(row: &StringRecord, idx: usize, column: &str) -> Result<T, String> {
    let raw = row.get(idx).unwrap_or_default();
    raw.parse::<T>()
        .map_err(|_| format!("cannot parse {} value {:?}", column, raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;

    const HEADER: &str =
        "Experiment,Vertices,Edges,Density,Status,Algorithm,Time(ms),Memory(KB),Weight\n";

    fn parse(text: &str) -> Result<Dataset, LoadError> {
        parse_reader(text.as_bytes(), Path::new("test.csv"))
    }

    #[test]
    fn parses_runner_output() {
        let text = format!(
            "{}{}{}",
            HEADER,
            "sparse_1000,1000,5000,0.05,COMPLETED,Kruskal,1.82,412,20381.4\n",
            "sparse_1000,1000,5000,0.05,COMPLETED,Prim_BinaryHeap,2.5,0,20381.4\n"
        );
        let ds = parse(&text).unwrap();

        assert_eq!(ds.len(), 2);
        let first = &ds.records()[0];
        assert_eq!(first.algorithm, "Kruskal");
        assert_eq!(first.vertices, 1000);
        assert_eq!(first.density, 0.05);
        assert_eq!(first.time_ms, 1.82);
        assert_eq!(first.memory_kb, 412.0);
        assert_eq!(first.experiment.as_deref(), Some("sparse_1000"));
        assert_eq!(ds.records()[1].memory_kb, 0.0);
    }

    #[test]
    fn accepts_plain_column_names_in_any_order() {
        let text = "memory,time,algorithm,density,vertices\n10,5.5,Kruskal,0.5,100\n";
        let ds = parse(text).unwrap();
        assert_eq!(ds.records()[0].time_ms, 5.5);
        assert_eq!(ds.records()[0].experiment, None);
    }

    #[test]
    fn missing_density_is_a_schema_error() {
        let text = "Algorithm,Vertices,Time(ms),Memory(KB)\nKruskal,10,1.0,0\n";
        match parse(text) {
            Err(LoadError::SchemaError { missing, .. }) => {
                assert_eq!(missing, vec!["density".to_string()]);
            }
            other => panic!("expected SchemaError, got {:?}", other),
        }
    }

    #[test]
    fn failed_trials_are_dropped_and_counted() {
        let text = format!(
            "{}{}{}",
            HEADER,
            "dense_10,10,100,10,PARTIAL_ERROR,Kruskal,0.5,12,33\n",
            "dense_10,10,100,10,PARTIAL_ERROR,KKT_MEMORY_ERROR,-1,18446744073709551615,-1\n"
        );
        let ds = parse(&text).unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.dropped_trials(), 1);
        assert!(ds.descriptor("KKT_MEMORY_ERROR").is_none());
    }

    #[test]
    fn bad_number_reports_its_line() {
        let text = format!("{}{}", HEADER, "x,ten,100,10,COMPLETED,Kruskal,0.5,12,33\n");
        match parse(&text) {
            Err(LoadError::MalformedRow { line, reason, .. }) => {
                assert_eq!(line, 2);
                assert!(reason.contains("vertices"), "{}", reason);
            }
            other => panic!("expected MalformedRow, got {:?}", other),
        }
    }

    #[test]
    fn zero_density_is_rejected() {
        let text = format!("{}{}", HEADER, "x,10,0,0,COMPLETED,Kruskal,0.5,12,33\n");
        assert!(matches!(parse(&text), Err(LoadError::MalformedRow { .. })));
    }

    #[test]
    fn header_only_yields_empty_dataset() {
        let ds = parse(HEADER).unwrap();
        assert!(ds.is_empty());
    }

    #[test]
    fn candidate_sources_adds_parent_fallback() {
        assert_eq!(
            candidate_sources("results.csv"),
            vec![PathBuf::from("results.csv"), PathBuf::from("../results.csv")]
        );
        assert_eq!(candidate_sources("/tmp/r.csv"), vec![PathBuf::from("/tmp/r.csv")]);
    }

    #[test]
    fn nonexistent_candidates_are_data_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let candidates = vec![dir.path().join("nope.csv"), dir.path().join("also_nope.csv")];
        match load_first(&candidates) {
            Err(LoadError::DataUnavailable { tried }) => assert_eq!(tried, candidates),
            other => panic!("expected DataUnavailable, got {:?}", other),
        }
    }

    #[test]
    fn first_existing_candidate_wins() {
        let dir = tempfile::tempdir().unwrap();
        let second = dir.path().join("second.csv");
        let third = dir.path().join("third.csv");
        fs::write(&second, format!("{}x,10,1,0.1,COMPLETED,Kruskal,1,0,1\n", HEADER)).unwrap();
        fs::write(&third, format!("{}x,10,1,0.1,COMPLETED,KKT,1,0,1\n", HEADER)).unwrap();

        let ds = load_first(&[dir.path().join("first.csv"), second.clone(), third]).unwrap();
        assert_eq!(ds.source(), second.as_path());
        assert_eq!(ds.records()[0].algorithm, "Kruskal");
    }

    #[test]
    fn malformed_primary_is_not_masked_by_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let primary = dir.path().join("primary.csv");
        let fallback = dir.path().join("fallback.csv");
        fs::write(&primary, "Algorithm,Vertices\nKruskal,10\n").unwrap();
        fs::write(&fallback, format!("{}x,10,1,0.1,COMPLETED,Kruskal,1,0,1\n", HEADER)).unwrap();

        let err = load_first(&[primary, fallback]).unwrap_err();
        assert!(matches!(err, LoadError::SchemaError { .. }), "{:?}", err);
    }
}
