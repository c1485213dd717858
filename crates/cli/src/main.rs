//! Burndown CLI - weekly earned value and completion forecasts from tracker history.

mod render;

use std::path::PathBuf;

use anyhow::{Context, Result};
use burndown_core::{Date, ReportConfig};
use burndown_progress::{BurndownReport, ReportBuilder};
use burndown_tracker::{ItemSource, JiraSource, JsonFileSource};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "burndown")]
#[command(about = "Burndown report and completion forecasts from issue tracker history", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "config.json")]
    config: PathBuf,

    /// Tracker query, overrides the config
    #[arg(long)]
    jql: Option<String>,

    /// Report file, overrides the config
    #[arg(long)]
    output: Option<String>,

    /// Project start date (YYYY-MM-DD), overrides the config
    #[arg(long)]
    start_date: Option<String>,

    /// Compute the report as of this date (YYYY-MM-DD) instead of today
    #[arg(long, value_parser = parse_date)]
    as_of: Option<Date>,

    /// Read issues from a JSON export instead of querying the tracker
    #[arg(long)]
    input: Option<PathBuf>,

    /// Do not print tables
    #[arg(long)]
    quiet: bool,
}

fn parse_date(s: &str) -> std::result::Result<Date, String> {
    Date::parse_from_str(s, burndown_core::config::DATE_FORMAT)
        .map_err(|e| format!("expected YYYY-MM-DD: {}", e))
}

fn init_logging() {
    // Logs go to stderr; stdout carries the tables
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();

    let mut config = ReportConfig::load(&cli.config).context("Config loading error")?;

    // Override config with command line flags if provided
    if let Some(jql) = cli.jql {
        config.jql = jql;
    }
    if let Some(output) = cli.output {
        config.output_file = output;
    }
    if let Some(start_date) = cli.start_date {
        config.start_date = start_date;
    }

    config.validate().context("Configuration error")?;

    let source: Box<dyn ItemSource> = match &cli.input {
        Some(path) => Box::new(JsonFileSource::new(path, config.tracker.size_field.clone())),
        None => Box::new(JiraSource::new(&config).context("failed to create tracker client")?),
    };
    let items = source.fetch_items().await.context("failed to query tracker")?;

    let as_of = cli.as_of.unwrap_or_else(|| chrono::Local::now().date_naive());
    info!(%as_of, items = items.len(), "Building report");

    let report = ReportBuilder::from_config(&config)
        .and_then(|builder| builder.build(&items, as_of))
        .context("failed to build burndown report")?;

    write_report(&config.output_file, &report).await?;

    if !cli.quiet {
        let mut out = std::io::stdout().lock();
        render::write_work_table(&mut out, &report, &config)?;
        render::write_projection_table(&mut out, &report)?;
    }

    println!("Burndown report generated: {}", config.output_file);
    Ok(())
}

async fn write_report(path: &str, report: &BurndownReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report).context("failed to serialize report")?;
    tokio::fs::write(path, json)
        .await
        .with_context(|| format!("failed to write report to {}", path))
}
