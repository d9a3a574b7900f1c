//! botlab CLI — backtest results reporting commands.
//!
//! Commands:
//! - `report` — locate the newest tester artifact, copy it into the
//!   reports directory, print the summary, render the equity chart
//! - `analyze` — run the same analytics on an explicit artifact file
//!
//! The terminal and compiler that produce the artifact are launched
//! elsewhere; this binary only consumes a finished results file.

mod config;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use botlab_report::report::export::{write_equity_csv, write_trades_csv};
use botlab_report::{
    chart_path_for, consistency_warnings, decode_artifact, find_latest_artifact,
    reconstruct_equity, render_equity_chart, render_summary, DerivedMetrics, EquityPoint,
    ResultArtifact,
};
use config::ReportConfig;

#[derive(Parser)]
#[command(name = "botlab", about = "botlab CLI — backtest results analytics")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Locate the newest results artifact and produce the full report.
    Report {
        /// Path to a TOML config file.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Directory the tester drops artifacts under. Overrides the config file.
        #[arg(long)]
        base_dir: Option<PathBuf>,

        /// Glob pattern relative to the base directory (repeatable). Overrides the config file.
        #[arg(long = "pattern")]
        patterns: Vec<String>,

        /// Output directory for the artifact copy, chart, and CSV exports.
        #[arg(long)]
        report_dir: Option<PathBuf>,

        /// Skip chart rendering.
        #[arg(long, default_value_t = false)]
        no_chart: bool,
    },
    /// Analyze an explicit artifact file, writing outputs beside it.
    Analyze {
        /// Path to the results artifact.
        artifact: PathBuf,

        /// Skip chart rendering.
        #[arg(long, default_value_t = false)]
        no_chart: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Report {
            config,
            base_dir,
            patterns,
            report_dir,
            no_chart,
        } => run_report(config, base_dir, patterns, report_dir, no_chart),
        Commands::Analyze { artifact, no_chart } => analyze(&artifact, !no_chart),
    }
}

fn run_report(
    config_path: Option<PathBuf>,
    base_dir: Option<PathBuf>,
    patterns: Vec<String>,
    report_dir: Option<PathBuf>,
    no_chart: bool,
) -> Result<()> {
    let file_config = config_path
        .as_deref()
        .map(ReportConfig::from_file)
        .transpose()?;

    let base_dir = base_dir
        .or_else(|| file_config.as_ref().map(|c| c.search.base_dir.clone()))
        .context("--base-dir or a config file with [search].base_dir is required")?;
    let patterns = if !patterns.is_empty() {
        patterns
    } else {
        file_config
            .as_ref()
            .map(|c| c.search.patterns.clone())
            .unwrap_or_else(config::default_patterns)
    };
    let report_dir = report_dir
        .or_else(|| file_config.as_ref().map(|c| c.output.report_dir.clone()))
        .unwrap_or_else(|| PathBuf::from("reports"));
    let chart = !no_chart && file_config.as_ref().map(|c| c.output.chart).unwrap_or(true);

    let artifact_path = find_latest_artifact(&base_dir, &patterns)?;
    println!("Found artifact: {}", artifact_path.display());

    std::fs::create_dir_all(&report_dir)
        .with_context(|| format!("failed to create report dir {}", report_dir.display()))?;
    let file_name = artifact_path
        .file_name()
        .context("artifact path has no file name")?;
    let copy_path = report_dir.join(file_name);
    std::fs::copy(&artifact_path, &copy_path)
        .with_context(|| format!("failed to copy artifact to {}", copy_path.display()))?;
    println!("Copied artifact to: {}", copy_path.display());

    analyze(&copy_path, chart)
}

fn analyze(path: &Path, chart: bool) -> Result<()> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("failed to read artifact {}", path.display()))?;
    let artifact = decode_artifact(&bytes)?;
    let series = reconstruct_equity(&artifact)?;
    let metrics = DerivedMetrics::compute(&artifact);
    let warnings = consistency_warnings(&series, &artifact);

    // The summary goes out before any rendering so a chart failure can
    // never suppress it.
    print!("{}", render_summary(&artifact, &metrics, &warnings));

    write_exports(path, &artifact, &series);

    if !chart {
        return Ok(());
    }
    if artifact.trades.is_empty() {
        eprintln!("WARNING: no trades in artifact — skipping equity chart");
        return Ok(());
    }

    let chart_path = chart_path_for(path);
    match render_equity_chart(&chart_path, &artifact, &series, &metrics) {
        Ok(()) => println!("Equity chart saved to: {}", chart_path.display()),
        Err(e) => eprintln!("WARNING: chart rendering failed: {e}"),
    }

    Ok(())
}

fn write_exports(path: &Path, artifact: &ResultArtifact, series: &[EquityPoint]) {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("backtest");
    let equity_path = path.with_file_name(format!("{stem}_equity.csv"));
    let trades_path = path.with_file_name(format!("{stem}_trades.csv"));

    if let Err(e) = write_equity_csv(&equity_path, series) {
        eprintln!("WARNING: {e:#}");
    }
    if let Err(e) = write_trades_csv(&trades_path, &artifact.trades) {
        eprintln!("WARNING: {e:#}");
    }
}
