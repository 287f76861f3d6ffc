//! Report model: every derivation the renderers need, as plain serializable data.

use crate::aggregate::{AggregateStat, GroupValue, aggregate, mean_by};
use crate::config::ValidatedConfig;
use crate::data::{Dataset, Family, GroupField, MetricField, Record};
use crate::metrics::{
    ComplexityFit, Recommendation, Table, best_cases, complexity_fits, normalize_rows,
    parallel_speedups, recommend, speedup_by,
};

use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Bar,
    Line,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Scale {
    Linear,
    Log,
}

/// Named sequence of points. `x` is ascending for line charts; for bar charts
/// it indexes into the chart's `categories`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub label: String,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartView {
    pub id: String,
    pub title: String,
    pub kind: ChartKind,
    pub x_label: String,
    pub y_label: String,
    pub x_scale: Scale,
    pub y_scale: Scale,
    pub categories: Vec<String>,
    /// Horizontal reference line, e.g. ratio 1.
    pub reference: Option<f64>,
    pub series: Vec<Series>,
}

impl ChartView {
    fn new(
        id: &str,
        title: impl Into<String>,
        kind: ChartKind,
        x_label: &str,
        y_label: &str,
    ) -> Self {
        Self {
            id: id.to_string(),
            title: title.into(),
            kind,
            x_label: x_label.to_string(),
            y_label: y_label.to_string(),
            x_scale: Scale::Linear,
            y_scale: Scale::Linear,
            categories: Vec::new(),
            reference: None,
            series: Vec::new(),
        }
    }

    fn log_log(mut self) -> Self {
        self.x_scale = Scale::Log;
        self.y_scale = Scale::Log;
        self
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryRow {
    pub algorithm: String,
    pub parallel: bool,
    pub trials: usize,
    pub time_mean: f64,
    pub time_std: f64,
    pub time_min: f64,
    pub time_max: f64,
    /// `None` when memory was never measured for this algorithm.
    pub memory_mean: Option<f64>,
    pub memory_std: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ComplexityRow {
    pub algorithm: String,
    pub bound: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TotalsView {
    pub source: String,
    pub records: usize,
    pub dropped_trials: usize,
    pub algorithms: Vec<String>,
    pub vertex_sizes: Vec<u64>,
    pub densities: Vec<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportData {
    pub totals: TotalsView,
    pub charts: Vec<ChartView>,
    /// Mean time per vertex count, normalized to the fastest algorithm.
    pub ranking: Table,
    pub recommendations: Vec<Recommendation>,
    /// Density the headline exponents were fitted at (the sparsest observed).
    pub exponent_density: Option<f64>,
    pub exponents: Vec<ComplexityFit>,
    /// Fits for every (algorithm, density) pair.
    pub fits: Vec<ComplexityFit>,
    pub summary: Vec<SummaryRow>,
    pub complexities: Vec<ComplexityRow>,
}

/// Run every derivation over `dataset`.
pub fn build_report_data(dataset: &Dataset, config: &ValidatedConfig) -> ReportData {
    let densities = dataset.densities();
    let sizes = dataset.vertex_sizes();
    let sparsest = densities.first().copied();
    let densest = densities.last().copied();
    let baseline = config.baseline_for(dataset);

    let mut charts = vec![performance_chart(dataset)];
    charts.push(gap_chart(dataset, config.gap_for(dataset)));

    let mut sparse = ChartView::new(
        "scalability_sparse",
        match sparsest {
            Some(d) => format!("Scalability (sparse: density={})", d),
            None => "Scalability (sparse)".to_string(),
        },
        ChartKind::Line,
        "Vertices",
        "Time (ms)",
    )
    .log_log();
    if let Some(d) = sparsest {
        sparse.series = series_by(
            dataset.iter().filter(|r| r.density == d),
            GroupField::Vertices,
            MetricField::Time,
        );
    }
    charts.push(sparse);

    let mut dense = ChartView::new(
        "scalability_dense",
        match densest {
            Some(d) => format!("Scalability (dense: density={})", d),
            None => "Scalability (dense)".to_string(),
        },
        ChartKind::Line,
        "Vertices",
        "Time (ms)",
    )
    .log_log();
    if let Some(d) = densest {
        dense.series = series_by(
            dataset.iter().filter(|r| r.density == d),
            GroupField::Vertices,
            MetricField::Time,
        );
    }
    charts.push(dense);

    let mut memory = ChartView::new(
        "memory",
        "Memory usage vs graph size",
        ChartKind::Line,
        "Vertices",
        "Memory (KB)",
    );
    memory.series = series_by(dataset.iter(), GroupField::Vertices, MetricField::Memory);
    charts.push(memory);

    let medium = sizes.get(sizes.len() / 2).copied();
    let mut density_effect = ChartView::new(
        "density_effect",
        match medium {
            Some(v) => format!("Performance vs density (V={})", v),
            None => "Performance vs density".to_string(),
        },
        ChartKind::Line,
        "Density (E/V)",
        "Time (ms)",
    );
    density_effect.x_scale = Scale::Log;
    if let Some(v) = medium {
        density_effect.series = series_by(
            dataset.iter().filter(|r| r.vertices == v),
            GroupField::Density,
            MetricField::Time,
        );
    }
    charts.push(density_effect);

    charts.push(parallel_chart(dataset, baseline.as_deref()));
    charts.push(best_case_chart(dataset));

    let fits = complexity_fits(dataset);
    let exponents = fits
        .iter()
        .filter(|f| Some(f.density) == sparsest)
        .cloned()
        .collect();

    ReportData {
        totals: TotalsView {
            source: dataset.source().display().to_string(),
            records: dataset.len(),
            dropped_trials: dataset.dropped_trials(),
            algorithms: dataset.algorithms().map(|d| d.name.clone()).collect(),
            vertex_sizes: sizes,
            densities,
        },
        charts,
        ranking: Table::from_rows(&normalize_rows(
            dataset,
            GroupField::Vertices,
            MetricField::Time,
        )),
        recommendations: recommend(dataset, &config.buckets),
        exponent_density: sparsest,
        exponents,
        fits,
        summary: summary_rows(dataset),
        complexities: dataset
            .algorithms()
            .filter_map(|d| {
                d.theoretical_bound().map(|bound| ComplexityRow {
                    algorithm: d.name.clone(),
                    bound,
                })
            })
            .collect(),
    }
}

/// One series per algorithm: mean `metric` against `x_field`, x ascending.
fn series_by<'a, I>(rows: I, x_field: GroupField, metric: MetricField) -> Vec<Series>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut by_alg: BTreeMap<String, Series> = BTreeMap::new();
    for stat in aggregate(rows, &[GroupField::Algorithm, x_field], metric) {
        let [GroupValue::Text(alg), x] = stat.key.0.as_slice() else {
            continue;
        };
        let Some(x) = x.as_f64() else { continue };
        let s = by_alg.entry(alg.clone()).or_insert_with(|| Series {
            label: alg.clone(),
            x: Vec::new(),
            y: Vec::new(),
        });
        s.x.push(x);
        s.y.push(stat.mean);
    }
    by_alg.into_values().collect()
}

/// Bars of mean time per algorithm, fastest first, split by algorithm kind.
fn performance_chart(dataset: &Dataset) -> ChartView {
    let mut chart = ChartView::new(
        "performance",
        "Algorithm performance",
        ChartKind::Bar,
        "Algorithm",
        "Average time (ms)",
    );

    let mut means: Vec<(String, f64)> =
        mean_by(dataset.iter(), GroupField::Algorithm, MetricField::Time)
            .into_iter()
            .filter_map(|(k, m)| k.as_text().map(|a| (a.to_string(), m)))
            .collect();
    means.sort_by(|a, b| a.1.total_cmp(&b.1).then_with(|| a.0.cmp(&b.0)));

    let mut groups: BTreeMap<&str, Series> = BTreeMap::new();
    for (i, (alg, mean)) in means.iter().enumerate() {
        let kind = match dataset.descriptor(alg) {
            Some(d) if d.family == Family::Kkt => "KKT",
            Some(d) if d.parallel => "Parallel",
            _ => "Sequential",
        };
        let s = groups.entry(kind).or_insert_with(|| Series {
            label: kind.to_string(),
            x: Vec::new(),
            y: Vec::new(),
        });
        s.x.push(i as f64);
        s.y.push(*mean);
    }

    chart.categories = means.into_iter().map(|(a, _)| a).collect();
    chart.series = groups.into_values().collect();
    chart
}

fn gap_chart(dataset: &Dataset, pair: Option<(String, String)>) -> ChartView {
    let mut chart = ChartView::new(
        "gap",
        "Performance gap by graph size",
        ChartKind::Bar,
        "Vertices",
        "Time ratio",
    );
    chart.reference = Some(1.0);

    let Some((baseline, candidate)) = pair else {
        return chart;
    };
    chart.title = format!("{} vs {} by graph size", baseline, candidate);
    chart.y_label = format!("{} time / {} time", baseline, candidate);

    let ratios = speedup_by(dataset, &baseline, &candidate, GroupField::Vertices);
    chart.categories = ratios
        .iter()
        .map(|r| match &r.bucket {
            Some(b) => format!("V{}", b),
            None => String::new(),
        })
        .collect();
    chart.series = vec![Series {
        label: format!("{} / {}", baseline, candidate),
        x: (0..ratios.len()).map(|i| i as f64).collect(),
        y: ratios.iter().map(|r| r.ratio).collect(),
    }];
    chart
}

fn parallel_chart(dataset: &Dataset, baseline: Option<&str>) -> ChartView {
    let mut chart = ChartView::new(
        "parallel",
        "Parallel speedup",
        ChartKind::Bar,
        "Algorithm",
        "Speedup",
    );
    chart.reference = Some(1.0);

    let Some(baseline) = baseline else {
        return chart;
    };
    chart.y_label = format!("Speedup vs {}", baseline);

    let speedups = parallel_speedups(dataset, baseline);
    if speedups.is_empty() {
        return chart;
    }
    chart.categories = speedups.iter().map(|s| s.candidate.clone()).collect();
    chart.series = vec![Series {
        label: format!("speedup vs {}", baseline),
        x: (0..speedups.len()).map(|i| i as f64).collect(),
        y: speedups.iter().map(|s| s.ratio).collect(),
    }];
    chart
}

fn best_case_chart(dataset: &Dataset) -> ChartView {
    let mut chart = ChartView::new(
        "best_cases",
        "Best case performance",
        ChartKind::Bar,
        "Algorithm",
        "Best time (ms)",
    );

    let best = best_cases(dataset, MetricField::Time);
    if best.is_empty() {
        return chart;
    }
    chart.categories = best
        .iter()
        .map(|b| format!("{} (V{}, d={})", b.algorithm, b.record.vertices, b.record.density))
        .collect();
    chart.series = vec![Series {
        label: "best time".to_string(),
        x: (0..best.len()).map(|i| i as f64).collect(),
        y: best.iter().map(|b| b.value).collect(),
    }];
    chart
}

fn summary_rows(dataset: &Dataset) -> Vec<SummaryRow> {
    let memory: BTreeMap<GroupValue, AggregateStat> =
        aggregate(dataset.iter(), &[GroupField::Algorithm], MetricField::Memory)
            .into_iter()
            .filter_map(|s| s.key.0.first().cloned().map(|k| (k, s)))
            .collect();

    aggregate(dataset.iter(), &[GroupField::Algorithm], MetricField::Time)
        .into_iter()
        .filter_map(|t| {
            let key = t.key.0.first()?;
            let algorithm = key.as_text()?.to_string();
            let mem = memory.get(key);
            Some(SummaryRow {
                parallel: dataset.descriptor(&algorithm).is_some_and(|d| d.parallel),
                algorithm,
                trials: t.count,
                time_mean: t.mean,
                time_std: t.std,
                time_min: t.min,
                time_max: t.max,
                memory_mean: mem.map(|m| m.mean),
                memory_std: mem.map(|m| m.std),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnalysisConfig;
    use crate::data::fixtures::dataset;
    use pretty_assertions::assert_eq;

    fn sample() -> Dataset {
        dataset(&[
            ("Prim_BinaryHeap", 100, 0.05, 1.0, 100.0),
            ("Prim_BinaryHeap", 1000, 0.05, 10.0, 900.0),
            ("Prim_BinaryHeap", 10000, 0.05, 100.0, 9000.0),
            ("KKT", 100, 0.05, 4.0, 0.0),
            ("KKT", 1000, 0.05, 40.0, 0.0),
            ("KKT", 10000, 0.05, 400.0, 0.0),
            ("Boruvka_Parallel_4threads", 100, 0.05, 0.5, 0.0),
            ("Boruvka_Parallel_4threads", 1000, 5.0, 5.0, 0.0),
        ])
    }

    fn chart<'a>(data: &'a ReportData, id: &str) -> &'a ChartView {
        data.charts.iter().find(|c| c.id == id).unwrap()
    }

    #[test]
    fn builds_every_panel() {
        let cfg = AnalysisConfig::default().validate_and_build().unwrap();
        let data = build_report_data(&sample(), &cfg);

        let ids: Vec<&str> = data.charts.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "performance",
                "gap",
                "scalability_sparse",
                "scalability_dense",
                "memory",
                "density_effect",
                "parallel",
                "best_cases"
            ]
        );
        assert_eq!(data.totals.records, 8);
        assert_eq!(data.exponent_density, Some(0.05));
    }

    #[test]
    fn performance_bars_are_sorted_and_classified() {
        let cfg = AnalysisConfig::default().validate_and_build().unwrap();
        let data = build_report_data(&sample(), &cfg);
        let perf = chart(&data, "performance");

        assert_eq!(
            perf.categories,
            vec!["Boruvka_Parallel_4threads", "Prim_BinaryHeap", "KKT"]
        );
        let labels: Vec<&str> = perf.series.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["KKT", "Parallel", "Sequential"]);
        assert_eq!(perf.series[0].x, vec![2.0]);
    }

    #[test]
    fn gap_and_parallel_use_family_defaults() {
        let cfg = AnalysisConfig::default().validate_and_build().unwrap();
        let data = build_report_data(&sample(), &cfg);

        let gap = chart(&data, "gap");
        assert_eq!(gap.categories, vec!["V100", "V1000", "V10000"]);
        assert_eq!(gap.series[0].y, vec![4.0, 4.0, 4.0]);

        let parallel = chart(&data, "parallel");
        assert_eq!(parallel.categories, vec!["Boruvka_Parallel_4threads"]);
    }

    #[test]
    fn headline_exponents_use_sparsest_density() {
        let cfg = AnalysisConfig::default().validate_and_build().unwrap();
        let data = build_report_data(&sample(), &cfg);

        let algs: Vec<&str> = data.exponents.iter().map(|f| f.algorithm.as_str()).collect();
        assert_eq!(algs, vec!["KKT", "Prim_BinaryHeap"]);
        for fit in &data.exponents {
            assert!((fit.exponent - 1.0).abs() < 0.05);
        }
    }

    #[test]
    fn summary_reports_memory_only_when_measured() {
        let cfg = AnalysisConfig::default().validate_and_build().unwrap();
        let data = build_report_data(&sample(), &cfg);

        let prim = data.summary.iter().find(|r| r.algorithm == "Prim_BinaryHeap").unwrap();
        assert_eq!(prim.trials, 3);
        assert!((prim.memory_mean.unwrap() - 10000.0 / 3.0).abs() < 1e-9);
        let kkt = data.summary.iter().find(|r| r.algorithm == "KKT").unwrap();
        assert_eq!(kkt.memory_mean, None);
    }

    #[test]
    fn empty_dataset_still_builds() {
        let cfg = AnalysisConfig::default().validate_and_build().unwrap();
        let data = build_report_data(&dataset(&[]), &cfg);

        assert!(data.charts.iter().all(|c| c.series.is_empty()));
        assert!(data.recommendations.is_empty());
        assert!(data.ranking.matrix.is_empty());
        assert_eq!(data.exponent_density, None);
    }
}
