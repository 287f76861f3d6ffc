//! Algorithm descriptors.
//!
//! Benchmark runners encode variant information in the algorithm name
//! (`Boruvka_Parallel_4threads`, `Prim_BinaryHeap`, `Karger-Klein-Tarjan`).
//! We classify each name exactly once at ingestion so downstream code reads
//! explicit attributes instead of re-matching strings.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

/// Broad algorithm family, used for theoretical bounds and default baselines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Family {
    Kruskal,
    Prim,
    Boruvka,
    Kkt,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlgorithmDescriptor {
    pub name: String,
    pub family: Family,
    pub parallel: bool,
    /// Worker count when the name carries one (`..._4threads`).
    pub threads: Option<u32>,
}

impl AlgorithmDescriptor {
    /// Textbook bound for the family, if we know one.
    pub fn theoretical_bound(&self) -> Option<String> {
        let base = match self.family {
            Family::Kruskal => "O(E log E)",
            Family::Prim | Family::Boruvka => "O(E log V)",
            Family::Kkt => "O(E) expected",
            Family::Other => return None,
        };
        if self.parallel {
            Some(format!("{} with parallel speedup", base))
        } else {
            Some(base.to_string())
        }
    }
}

static FAMILY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(kruskal|prim|bor[uů]vka|kkt|karger)").expect("family pattern")
});
static PARALLEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)parallel").expect("parallel pattern"));
static THREADS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+)\s*_?threads?\b").expect("threads pattern"));

impl AlgorithmDescriptor {
    /// Read family, parallelism and thread count out of a runner name.
    pub fn classify(name: &str) -> Self {
        let family = match FAMILY
            .captures(name)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_ascii_lowercase())
            .as_deref()
        {
            Some("kruskal") => Family::Kruskal,
            Some("prim") => Family::Prim,
            Some("kkt") | Some("karger") => Family::Kkt,
            Some(_) => Family::Boruvka,
            None => Family::Other,
        };

        let threads = THREADS
            .captures(name)
            .and_then(|c| c.get(1))
            .and_then(|m| m.as_str().parse::<u32>().ok());

        Self {
            name: name.to_string(),
            family,
            parallel: PARALLEL.is_match(name) || threads.is_some_and(|t| t > 1),
            threads,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn classifies_runner_names() {
        let boruvka = AlgorithmDescriptor::classify("Boruvka_Parallel_4threads");
        assert_eq!(boruvka.family, Family::Boruvka);
        assert!(boruvka.parallel);
        assert_eq!(boruvka.threads, Some(4));

        let prim = AlgorithmDescriptor::classify("Prim_BinaryHeap");
        assert_eq!(prim.family, Family::Prim);
        assert!(!prim.parallel);
        assert_eq!(prim.threads, None);

        assert_eq!(AlgorithmDescriptor::classify("Karger-Klein-Tarjan").family, Family::Kkt);
        assert_eq!(AlgorithmDescriptor::classify("KKT").family, Family::Kkt);
        assert_eq!(AlgorithmDescriptor::classify("Kruskal").family, Family::Kruskal);
        assert_eq!(AlgorithmDescriptor::classify("Chazelle").family, Family::Other);
    }

    #[test]
    fn parallel_bound_mentions_speedup() {
        assert_eq!(
            AlgorithmDescriptor::classify("Prim_Parallel_2threads").theoretical_bound().as_deref(),
            Some("O(E log V) with parallel speedup")
        );
        assert_eq!(AlgorithmDescriptor::classify("Chazelle").theoretical_bound(), None);
    }
}
