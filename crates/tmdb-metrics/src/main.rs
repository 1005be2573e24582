use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tmdb_core::{columns, stats, MovieMetricsPipeline, PipelineConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod render;

const NUMERIC_COLUMNS: [&str; 6] = [
    columns::BUDGET,
    columns::REVENUE,
    columns::RUNTIME,
    columns::POPULARITY,
    columns::VOTE_AVERAGE,
    columns::VOTE_COUNT,
];

#[derive(Parser, Debug)]
#[command(author, version, about = "Cleaning and ranking reports for the TMDB movie dataset", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the full pipeline and print every report table
    Report(ReportArgs),
    /// Print the per-column missing value counts of the raw dataset
    Missing(DatasetArgs),
    /// Print summary statistics of the raw numeric columns
    Describe(DatasetArgs),
}

#[derive(Args, Debug, Default)]
struct DatasetArgs {
    /// Path to tmdb_5000_movies.csv (defaults to TMDB_DATASET_PATH)
    #[arg(long)]
    dataset: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
struct ReportArgs {
    #[command(flatten)]
    dataset: DatasetArgs,
    /// TOML file overriding ranking sizes and thresholds
    #[arg(long)]
    config: Option<PathBuf>,
    /// Also write each table to <DIR>/<table>.csv
    #[arg(long)]
    output_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Report(args) => handle_report(args),
        Command::Missing(args) => {
            let raw = load_dataset(&args)?;
            let report = stats::missing_value_counts(&raw)?;
            render::print_table("missing_values", &report, &[])
        }
        Command::Describe(args) => {
            let raw = load_dataset(&args)?;
            let summary = stats::describe_numeric(&raw, &NUMERIC_COLUMNS)?;
            render::print_table("summary_statistics", &summary, &[])
        }
    }
}

fn handle_report(args: ReportArgs) -> Result<()> {
    let config = match args.config.as_deref() {
        Some(path) => PipelineConfig::load(path)
            .with_context(|| format!("failed to load config '{}'", path.display()))?,
        None => PipelineConfig::default(),
    };

    let raw = load_dataset(&args.dataset)?;
    let report = MovieMetricsPipeline::new(config)
        .run(&raw)
        .context("pipeline run failed")?;

    for table in report.tables() {
        render::print_table(table.name, table.frame, table.columns)?;
    }

    if let Some(dir) = args.output_dir.as_deref() {
        export_tables(dir, &report)?;
    }
    Ok(())
}

fn export_tables(dir: &Path, report: &tmdb_core::PipelineReport) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output directory '{}'", dir.display()))?;
    for table in report.tables() {
        let path = dir.join(format!("{}.csv", table.name));
        render::write_csv(&path, table.frame)
            .with_context(|| format!("failed to write '{}'", path.display()))?;
    }
    info!(dir = %dir.display(), "exported report tables");
    Ok(())
}

fn load_dataset(args: &DatasetArgs) -> Result<polars::prelude::DataFrame> {
    let path = match &args.dataset {
        Some(path) => path.clone(),
        None => {
            dotenvy::dotenv().ok();
            std::env::var("TMDB_DATASET_PATH")
                .map(PathBuf::from)
                .context("--dataset or TMDB_DATASET_PATH must be set")?
        }
    };
    tmdb_parser::load_movies_csv(&path)
        .with_context(|| format!("failed to load dataset '{}'", path.display()))
}
