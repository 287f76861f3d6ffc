//! Hard failures of the loader.

use std::path::PathBuf;
use thiserror::Error;

/// Why no dataset could be produced.
///
/// "Nothing to read" and "read something broken" are distinct variants so a
/// malformed primary source is never mistaken for a missing one.
#[derive(Debug, Error)]
pub enum LoadError {
    /// None of the candidate locations exists or could be opened.
    #[error("no benchmark data found (tried: {})", display_paths(.tried))]
    DataUnavailable {
        /// Every location probed, in probe order.
        tried: Vec<PathBuf>,
    },

    /// The source is missing one or more required columns.
    #[error("{}: missing required column(s): {}", .path.display(), .missing.join(", "))]
    SchemaError {
        path: PathBuf,
        /// Canonical names of the absent columns, in schema order.
        missing: Vec<String>,
    },

    /// A data row could not be turned into a record.
    #[error("{}:{line}: {reason}", .path.display())]
    MalformedRow {
        path: PathBuf,
        /// 1-based line in the source file.
        line: u64,
        reason: String,
    },
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn messages_name_the_problem() {
        let err = LoadError::SchemaError {
            path: PathBuf::from("results.csv"),
            missing: vec!["density".to_string(), "memory".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "results.csv: missing required column(s): density, memory"
        );

        let err = LoadError::DataUnavailable {
            tried: vec![PathBuf::from("a.csv"), PathBuf::from("../a.csv")],
        };
        assert_eq!(
            err.to_string(),
            "no benchmark data found (tried: a.csv, ../a.csv)"
        );
    }
}
