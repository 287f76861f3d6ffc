//! Line-oriented text report.

use crate::model::ReportData;
use std::io::{self, Write};

fn opt(v: Option<f64>) -> String {
    v.map_or_else(|| "-".to_string(), |x| format!("{:.2}", x))
}

/// Write the summary, recommendations and exponents to `out`.
///
/// Recommendation lines read `<category>: <algorithm>`; exponent lines read
/// `<algorithm>: empirical exponent = <value>`.
pub fn write_text_report<W: Write>(data: &ReportData, out: &mut W) -> io::Result<()> {
    let t = &data.totals;
    writeln!(out, "=== MST Algorithms Performance Analysis ===")?;
    writeln!(
        out,
        "Source: {} ({} records, {} failed trials dropped)",
        t.source, t.records, t.dropped_trials
    )?;
    writeln!(out, "Algorithms: {}", t.algorithms.join(", "))?;
    writeln!(
        out,
        "Graph sizes: {}",
        t.vertex_sizes.iter().map(|v| v.to_string()).collect::<Vec<_>>().join(", ")
    )?;
    writeln!(
        out,
        "Densities: {}",
        t.densities.iter().map(|d| d.to_string()).collect::<Vec<_>>().join(", ")
    )?;
    writeln!(out)?;

    writeln!(out, "Summary statistics:")?;
    writeln!(
        out,
        "{:<30} {:>6} {:>10} {:>10} {:>10} {:>10} {:>12} {:>12}",
        "algorithm",
        "trials",
        "time_mean",
        "time_std",
        "time_min",
        "time_max",
        "mem_mean",
        "mem_std"
    )?;
    for row in &data.summary {
        writeln!(
            out,
            "{:<30} {:>6} {:>10.2} {:>10.2} {:>10.2} {:>10.2} {:>12} {:>12}",
            row.algorithm,
            row.trials,
            row.time_mean,
            row.time_std,
            row.time_min,
            row.time_max,
            opt(row.memory_mean),
            opt(row.memory_std)
        )?;
    }
    writeln!(out)?;

    writeln!(out, "=== Best Algorithm Recommendations ===")?;
    for r in &data.recommendations {
        writeln!(out, "{}: {}", r.bucket, r.algorithm)?;
    }
    writeln!(out)?;

    match data.exponent_density {
        Some(d) => writeln!(out, "=== Empirical Complexity (density = {}) ===", d)?,
        None => writeln!(out, "=== Empirical Complexity ===")?,
    }
    for fit in &data.exponents {
        writeln!(out, "{}: empirical exponent = {:.3}", fit.algorithm, fit.exponent)?;
    }
    writeln!(out)?;

    writeln!(out, "=== Theoretical Complexities ===")?;
    for c in &data.complexities {
        writeln!(out, "{:<30}: {}", c.algorithm, c.bound)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnalysisConfig;
    use crate::data::fixtures::dataset;
    use crate::model::build_report_data;

    #[test]
    fn emits_fixed_line_formats() {
        let ds = dataset(&[
            ("Kruskal", 10, 0.05, 10.0, 64.0),
            ("Kruskal", 100, 0.05, 100.0, 0.0),
            ("Kruskal", 500, 0.05, 500.0, 0.0),
            ("Prim_BinaryHeap", 10, 2.0, 30.0, 0.0),
        ]);
        let cfg = AnalysisConfig::default().validate_and_build().unwrap();
        let data = build_report_data(&ds, &cfg);

        let mut buf = Vec::new();
        write_text_report(&data, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert!(lines.contains(&"Sparse graphs (density < 1.0): Kruskal"), "{}", text);
        assert!(lines.contains(&"Dense graphs (density >= 1.0): Prim_BinaryHeap"));
        assert!(lines.contains(&"Most memory efficient: Kruskal"));
        assert!(!text.contains("Large graphs"));
        assert!(lines.contains(&"Kruskal: empirical exponent = 1.000"));
        assert!(lines.contains(&"=== Empirical Complexity (density = 0.05) ==="));
    }
}
