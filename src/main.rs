use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod aggregate;
mod config;
mod data;
mod diagnostics;
mod metrics;
mod model;
mod render;

pub type Result<T> = anyhow::Result<T>;

/// Names probed when `--input` is not given, each also tried in the parent directory.
const DEFAULT_INPUTS: [&str; 2] = ["comprehensive_results.csv", "large_scale_results.csv"];

#[derive(Parser)]
#[command(name = "mst-bench-report")]
#[command(about = "MST benchmark analyzer", long_about = None)]
struct Cli {
    /// Log derivations that were skipped and which source was loaded.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate an HTML report with charts and rankings.
    Report {
        /// Result file name; repeat to add fallbacks (each also tried in ..).
        #[arg(long)]
        input: Vec<PathBuf>,

        /// Analysis configuration (JSON).
        #[arg(long)]
        config: Option<PathBuf>,

        #[arg(short = 'o', long)]
        out: PathBuf,

        /// Also write the report data as JSON.
        #[arg(long)]
        json: Option<PathBuf>,
    },

    /// Print the text summary (statistics, recommendations, exponents).
    Summary {
        #[arg(long)]
        input: Vec<PathBuf>,

        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn candidates(inputs: &[PathBuf]) -> Vec<PathBuf> {
    if inputs.is_empty() {
        DEFAULT_INPUTS
            .iter()
            .flat_map(|name| data::candidate_sources(name))
            .collect()
    } else {
        inputs
            .iter()
            .flat_map(|name| data::candidate_sources(name))
            .collect()
    }
}

fn load(inputs: &[PathBuf]) -> Result<data::Dataset> {
    let dataset = data::load_first(&candidates(inputs))?;
    if dataset.is_empty() {
        diagnostics::warn(format!(
            "{} contains no usable trials; every derivation will be empty",
            dataset.source().display()
        ));
    }
    Ok(dataset)
}

fn load_config(path: Option<&PathBuf>) -> Result<config::ValidatedConfig> {
    let raw = match path {
        Some(p) => config::AnalysisConfig::from_file(p)?,
        None => config::AnalysisConfig::default(),
    };
    raw.validate_and_build()
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    diagnostics::init(cli.verbose);

    match cli.cmd {
        Commands::Report {
            input,
            config,
            out,
            json,
        } => {
            // 1) Validate config before touching data.
            let cfg = load_config(config.as_ref())?;

            // 2) Load the first available result file.
            let dataset = load(&input)?;

            // 3) Derive metrics.
            let report = model::build_report_data(&dataset, &cfg);

            // 4) Render.
            let html = render::render_html_report(&report)?;
            std::fs::write(&out, html)?;
            println!("Wrote {}", out.display());

            if let Some(json_out) = json {
                std::fs::write(&json_out, serde_json::to_string_pretty(&report)?)?;
                println!("Wrote {}", json_out.display());
            }
        }
        Commands::Summary { input, config } => {
            let cfg = load_config(config.as_ref())?;
            let dataset = load(&input)?;
            let report = model::build_report_data(&dataset, &cfg);

            let stdout = std::io::stdout();
            render::write_text_report(&report, &mut stdout.lock())?;
        }
    }

    Ok(())
}
