//! Gridsweep main entry point
//!
//! This is the command-line interface for the gridsweep business harvester.

use anyhow::Context;
use clap::Parser;
use gridsweep::config::{load_config, Config, OutputFormat};
use gridsweep::engine::{estimate_duration, run_sweep, ProgressFn, RunPlan};
use gridsweep::fetch::{Fetcher, MapsFetcher};
use gridsweep::geo::GeoPoint;
use gridsweep::output::{CsvExporter, Exporter, SqliteExporter};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Gridsweep: a grid-dispatch local business harvester
///
/// Gridsweep tiles the area around a center point into a grid of
/// sub-searches, runs them concurrently against a maps search page,
/// deduplicates the extracted businesses, and writes them to CSV or SQLite.
#[derive(Parser, Debug)]
#[command(name = "gridsweep")]
#[command(version = "1.0.0")]
#[command(about = "A grid-dispatch local business harvester", long_about = None)]
struct Cli {
    /// Latitude of the search center
    #[arg(long, allow_negative_numbers = true, value_name = "DEGREES")]
    lat: f64,

    /// Longitude of the search center
    #[arg(long, allow_negative_numbers = true, value_name = "DEGREES")]
    lon: f64,

    /// Search query, e.g. "coffee shop"
    #[arg(short, long)]
    query: String,

    /// Search radius in kilometers
    #[arg(short, long, default_value_t = 2.0)]
    radius: f64,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Output file path (defaults to a timestamped file in the output directory)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format (defaults to the configured format)
    #[arg(long, value_parser = ["csv", "sqlite"])]
    format: Option<String>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate the plan and show the grid and estimate without fetching
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    // Load tuning configuration; the search itself comes from the flags
    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)
                .with_context(|| format!("failed to load config {}", path.display()))?
        }
        None => Config::default(),
    };

    let center = GeoPoint::new(cli.lat, cli.lon);
    let plan = RunPlan::new(center, cli.query.clone(), cli.radius, &config)?;

    if cli.dry_run {
        handle_dry_run(&plan);
        return Ok(());
    }

    handle_sweep(&cli, &config, plan).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("gridsweep=info,warn"),
            1 => EnvFilter::new("gridsweep=debug,info"),
            2 => EnvFilter::new("gridsweep=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: validates the plan and shows what would run
fn handle_dry_run(plan: &RunPlan) {
    let points = plan.grid();
    let estimate = estimate_duration(points.len(), plan.max_workers, plan.task_timeout);

    println!("=== Gridsweep Dry Run ===\n");

    println!("Search:");
    println!("  Center: {}", plan.center);
    println!("  Query: {}", plan.query);
    println!("  Radius: {:.1} km", plan.radius_km);

    println!("\nGrid:");
    println!("  Step: {:.1} km", plan.grid_step_km);
    println!("  Sub-search radius: {:.1} km", plan.sub_radius_km);
    println!("  Points: {}", points.len());

    println!("\nWorkers:");
    println!("  Max workers: {}", plan.max_workers);
    println!("  Task timeout: {}s", plan.task_timeout.as_secs());
    println!("  Batch pause: {}ms", plan.batch_pause.as_millis());

    println!("\n✓ Plan is valid");
    println!(
        "✓ Would dispatch {} sub-searches, estimated {}",
        points.len(),
        format_duration(estimate)
    );
}

/// Handles the main sweep operation
async fn handle_sweep(cli: &Cli, config: &Config, plan: RunPlan) -> anyhow::Result<()> {
    let exporter = build_exporter(cli, config);
    let fetcher: Arc<dyn Fetcher> = Arc::new(MapsFetcher::new()?);

    let total = plan.grid().len();
    let estimate = estimate_duration(total, plan.max_workers, plan.task_timeout);
    println!(
        "Please wait... Estimated time: {}",
        format_duration(estimate)
    );

    let bar = ProgressBar::new(total as u64);
    bar.set_style(
        ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} searches ({percent}%)",
            )?
            .progress_chars("#>-"),
    );

    let tick = bar.clone();
    let progress: ProgressFn = Arc::new(move |_outcome| tick.inc(1));

    let report = run_sweep(&plan, fetcher, exporter.as_ref(), Some(progress)).await?;
    bar.finish_and_clear();

    match &report.receipt {
        Some(receipt) => println!(
            "{} places saved to {}",
            receipt.places_written,
            receipt.path.display()
        ),
        None => println!("No places found for the given search parameters."),
    }

    if !report.failures.is_empty() {
        println!(
            "{} of {} searches failed or timed out.",
            report.failures.len(),
            report.grid_points
        );
    }

    Ok(())
}

/// Picks the exporter from the --format/--output flags and config defaults
fn build_exporter(cli: &Cli, config: &Config) -> Box<dyn Exporter> {
    let format = match cli.format.as_deref() {
        Some("sqlite") => OutputFormat::Sqlite,
        Some(_) => OutputFormat::Csv,
        None => config.output.format,
    };

    match (format, &cli.output) {
        (OutputFormat::Csv, Some(path)) => Box::new(CsvExporter::new(path.clone())),
        (OutputFormat::Csv, None) => Box::new(CsvExporter::timestamped(&config.output.directory)),
        (OutputFormat::Sqlite, Some(path)) => Box::new(SqliteExporter::new(path.clone())),
        (OutputFormat::Sqlite, None) => {
            Box::new(SqliteExporter::timestamped(&config.output.directory))
        }
    }
}

fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    if secs >= 60 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}s", secs)
    }
}
