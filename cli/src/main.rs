//! trajeval: score recorded mobile-GUI agent trajectories.
//!
//! Usage:
//!   trajeval evaluate --config bench.toml [--method guardian] [--output summary]
//!   trajeval compare --config bench.toml [--by-app]
//!   trajeval verify --config bench.toml [--method guardian]
//!   trajeval tokens "[true, false, t]"

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use trajeval_compare::{app_breakdown, compare_methods, percent, render_breakdown, MethodInput};
use trajeval_config::{BenchmarkConfig, MethodConfig};
use trajeval_contracts::{error::TrajevalResult, summary::EvaluationReport};
use trajeval_core::Evaluator;
use trajeval_report::{verify_outputs, ReportWriter, RunManifest};
use trajeval_sources::{tokens::parse_verdict_tokens, JsonAnnotationSource, JsonGroundTruthSource};

// ── CLI definition ────────────────────────────────────────────────────────────

/// Trajectory evaluation for mobile-GUI agents.
///
/// Scores annotated candidate trajectories against reference trajectories
/// over a fixed-size benchmark and reports corpus-level metrics.
#[derive(Parser)]
#[command(
    name = "trajeval",
    about = "Trajectory evaluation and metrics for mobile-GUI agents",
    long_about = "Scores annotated agent trajectories against groundtruth, writes\n\
                  fingerprinted per-task and summary reports, and compares methods."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Evaluate one or all configured methods and persist their reports.
    Evaluate {
        /// Benchmark configuration file (TOML).
        #[arg(long)]
        config: PathBuf,
        /// Only evaluate this method.
        #[arg(long)]
        method: Option<String>,
        /// Override the configured output directory.
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Evaluate every configured method and print a comparison table.
    Compare {
        #[arg(long)]
        config: PathBuf,
        /// Also print a per-app breakdown for each method.
        #[arg(long)]
        by_app: bool,
    },
    /// Re-check persisted reports against their manifests.
    Verify {
        #[arg(long)]
        config: PathBuf,
        #[arg(long)]
        method: Option<String>,
    },
    /// Parse a verdict token string and print the booleans.
    Tokens {
        /// e.g. "[true, false, t]"
        raw: String,
    },
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Set RUST_LOG=debug for per-file and per-task detail.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Evaluate { config, method, output } => run_evaluate(&config, method.as_deref(), output),
        Command::Compare { config, by_app } => run_compare(&config, by_app),
        Command::Verify { config, method } => run_verify(&config, method.as_deref()),
        Command::Tokens { raw } => {
            println!("{:?}", parse_verdict_tokens(&raw));
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("trajeval error: {e}");
        std::process::exit(1);
    }
}

// ── Wiring ────────────────────────────────────────────────────────────────────

fn selected<'a>(config: &'a BenchmarkConfig, method: Option<&str>) -> TrajevalResult<Vec<&'a MethodConfig>> {
    match method {
        Some(name) => Ok(vec![config.method(name)?]),
        None => Ok(config.methods.iter().collect()),
    }
}

fn annotation_source(method: &MethodConfig) -> JsonAnnotationSource {
    let source = JsonAnnotationSource::new(method.name.clone(), method.annotations.clone());
    match &method.verdicts {
        Some(path) => source.with_verdicts(path.clone()),
        None => source,
    }
}

fn groundtruth_source(config: &BenchmarkConfig) -> JsonGroundTruthSource {
    JsonGroundTruthSource::new("groundtruth", config.groundtruth.clone())
}

// ── Subcommands ───────────────────────────────────────────────────────────────

fn run_evaluate(config_path: &Path, method: Option<&str>, output: Option<PathBuf>) -> TrajevalResult<()> {
    let config = BenchmarkConfig::from_file(config_path)?;
    let evaluator = Evaluator::new(config.settings());
    let groundtruth = groundtruth_source(&config);
    let writer = ReportWriter::new(output.unwrap_or_else(|| config.output_dir.clone()));

    for method in selected(&config, method)? {
        info!(method = %method.name, "evaluating");
        let report = evaluator.evaluate(&annotation_source(method), &groundtruth)?;
        let manifest = writer.write(&method.name, &report)?;
        print_summary(&report, &manifest);
    }
    Ok(())
}

fn run_compare(config_path: &Path, by_app: bool) -> TrajevalResult<()> {
    let config = BenchmarkConfig::from_file(config_path)?;
    let sources: Vec<JsonAnnotationSource> = config.methods.iter().map(annotation_source).collect();
    let inputs: Vec<MethodInput<'_>> = config
        .methods
        .iter()
        .zip(&sources)
        .map(|(method, source)| MethodInput::new(&method.name, source))
        .collect();

    let comparison = compare_methods(&config.settings(), &groundtruth_source(&config), &inputs)?;
    print!("{}", comparison.render_table());

    if by_app {
        for row in &comparison.rows {
            if let Some(report) = row.report() {
                println!();
                println!("{}", row.name);
                print!("{}", render_breakdown(&app_breakdown(&report.results)));
            }
        }
    }
    Ok(())
}

fn run_verify(config_path: &Path, method: Option<&str>) -> TrajevalResult<()> {
    let config = BenchmarkConfig::from_file(config_path)?;
    for method in selected(&config, method)? {
        let manifest = verify_outputs(&config.output_dir, &method.name)?;
        println!(
            "ok  {}  run {}  written {}",
            manifest.method,
            manifest.run_id,
            manifest.generated_at.to_rfc3339()
        );
    }
    Ok(())
}

// ── Output ────────────────────────────────────────────────────────────────────

fn print_summary(report: &EvaluationReport, manifest: &RunManifest) {
    let s = &report.summary;
    let count_line = |label: &str, count: usize, rate: f64| {
        println!("  {label:<22} {count:>5}  ({}%)", percent(rate));
    };

    println!();
    println!("{}  (run {})", manifest.method, manifest.run_id);
    println!("  {:<22} {:>5} / {}", "tasks evaluated", s.evaluated_tasks, s.total_tasks);
    count_line("exact match", s.total_exact_match_tasks, s.exact_match_percentage);
    count_line("completed", s.total_tasks_completed, s.task_completion_percentage);
    count_line("achieved", s.total_achieved_tasks, s.achieved_tasks_percentage);
    println!("  {:<22} {:>5}", "not done but end", s.total_not_done_but_end);
    println!("  {:<22} {:>5}%", "average prefix match", percent(s.average_prefix_match));
    println!("  {:<22} {:>5}%", "macro precision", percent(s.macro_average_precision));
    println!(
        "  {:<22} {:>5}%  ({}/{} actions)",
        "micro precision",
        percent(s.micro_average_precision),
        s.total_correct_actions,
        s.total_actions
    );

    if !report.failures.is_empty() {
        println!("  {} task(s) given zero credit:", report.failures.len());
        for failure in &report.failures {
            println!("    {}: {}", failure.task_id, failure.reason);
        }
    }
}
