use anyhow::{bail, Context};
use chrono::Utc;
use clap::{Parser, Subcommand};
use cricket_sql::app::{
    self, FlattenReport, FlattenUseCase, LoadReport, LoadUseCase, QueryReport, QueryUseCase,
    RunSummary,
};
use cricket_sql::config::{CategoryConfig, Config};
use cricket_sql::pipeline::analysis::select_queries;
use cricket_sql::pipeline::ingestion::DirectoryMatchSource;
use cricket_sql::pipeline::storage::{CricketDb, CsvTableSink};
use cricket_sql::{logging, observability};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, warn};

#[derive(Parser)]
#[command(name = "cricket_sql")]
#[command(about = "Flatten ball-by-ball cricket match files into SQL-ready delivery tables")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to a TOML config file (defaults to $CRICKET_CONFIG, then ./cricket.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Categories to process (comma-separated). Available: IPL, ODIs, T20, Test
    #[arg(long, global = true)]
    categories: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Flatten match files into one CSV per category
    Flatten,
    /// Load the flattened CSVs into the SQLite database
    Load,
    /// Run the aggregate query catalog and save each result as CSV
    Query {
        /// Only run these queries (comma-separated names)
        #[arg(long)]
        only: Option<String>,
    },
    /// Flatten, load and query in sequence
    Run,
}

async fn run_flatten(
    config: &Config,
    categories: Vec<CategoryConfig>,
) -> (Vec<FlattenReport>, Vec<(String, String)>) {
    println!("🔄 Flattening {} categories...", categories.len());
    for category in &categories {
        info!(
            "{}: {} → {}",
            category.name,
            config.source_dir(category).display(),
            config.csv_path(category).display()
        );
    }
    let use_case = Arc::new(FlattenUseCase::new(
        Box::new(DirectoryMatchSource::new(&config.data_root)),
        Box::new(CsvTableSink::new(&config.output_dir)),
    ));

    let mut reports = Vec::new();
    let mut failures = Vec::new();
    for (name, result) in app::flatten_categories(use_case, categories).await {
        match result {
            Ok(report) => {
                println!("\n📊 Flatten results for {}:", report.category);
                println!("   Match files: {}", report.files_seen);
                println!("   Processed: {}", report.files_processed);
                println!("   Skipped files: {}", report.files_skipped);
                println!("   Skipped deliveries: {}", report.deliveries_skipped);
                println!("   Rows: {}", report.rows_written);
                println!("   Output file: {}", report.destination);
                if !report.errors.is_empty() {
                    warn!("{} problems encountered while flattening {}", report.errors.len(), name);
                }
                reports.push(report);
            }
            Err(e) => {
                error!("Flattening {} failed: {}", name, e);
                println!("❌ {}: {}", name, e);
                failures.push((name, e.to_string()));
            }
        }
    }
    (reports, failures)
}

fn run_load(config: &Config, categories: &[CategoryConfig]) -> anyhow::Result<LoadReport> {
    println!("\n💾 Loading CSVs into {}...", config.database_path.display());
    let mut db = CricketDb::open(&config.database_path)
        .with_context(|| format!("opening {}", config.database_path.display()))?;
    let report = LoadUseCase::new(&mut db, &config.output_dir).load_all(categories);
    for (table, rows) in &report.loaded {
        println!("   {table}: {rows} rows");
    }
    for e in &report.errors {
        println!("   ⚠️  {e}");
    }
    Ok(report)
}

fn run_queries(config: &Config, only: Option<&str>) -> anyhow::Result<QueryReport> {
    let names: Option<Vec<String>> = only.map(|list| {
        list.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    });
    let (queries, unknown) = select_queries(names.as_deref());
    if !unknown.is_empty() {
        bail!("unknown queries: {}", unknown.join(", "));
    }

    println!("\n🔍 Running {} queries...", queries.len());
    let db = CricketDb::open(&config.database_path)
        .with_context(|| format!("opening {}", config.database_path.display()))?;
    let report = QueryUseCase::new(&db, &config.query_results_dir).run(&queries);
    for outcome in &report.succeeded {
        println!("✅ Saved: {}", outcome.output_file);
    }
    for (name, e) in &report.failed {
        println!("❌ {name}: {e}");
    }
    Ok(report)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref()).context("loading configuration")?;
    let _log_guard = logging::init_logging(&config.log_dir);
    if let Err(e) = observability::init() {
        warn!("Metrics disabled: {}", e);
    }

    let categories = config.select_categories(cli.categories.as_deref())?;
    info!(
        "Using {} categories from data root {}",
        categories.len(),
        config.data_root.display()
    );

    let started_at = Utc::now();
    let mut summary = RunSummary {
        started_at,
        finished_at: started_at,
        flatten: Vec::new(),
        flatten_failures: Vec::new(),
        load: None,
        query: None,
    };

    match cli.command {
        Commands::Flatten => {
            let (reports, failures) = run_flatten(&config, categories).await;
            summary.flatten = reports;
            summary.flatten_failures = failures;
        }
        Commands::Load => {
            summary.load = Some(run_load(&config, &categories)?);
        }
        Commands::Query { only } => {
            summary.query = Some(run_queries(&config, only.as_deref())?);
        }
        Commands::Run => {
            println!("🚀 Running full pipeline (flatten → load → query)...");
            let (reports, failures) = run_flatten(&config, categories.clone()).await;
            summary.flatten = reports;
            summary.flatten_failures = failures;
            summary.load = Some(run_load(&config, &categories)?);
            summary.query = Some(run_queries(&config, None)?);
        }
    }

    summary.finished_at = Utc::now();
    match app::persist_summary(&summary, &config.output_dir) {
        Ok(path) => info!("Run summary written to {}", path),
        Err(e) => warn!("Could not write run summary: {}", e),
    }

    if let Some(path) = &config.metrics_file {
        if let Some(rendered) = observability::render() {
            std::fs::write(path, rendered)
                .with_context(|| format!("writing metrics to {}", path.display()))?;
        }
    }

    Ok(())
}
