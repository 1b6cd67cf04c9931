use anyhow::{Context, Result};
use clap::Parser;
use dotplot::{
    output::{write_dataset, OutputFormat},
    scrape_all, Config, FailurePolicy, HttpFetcher,
};
use std::{
    fs::File,
    io::{self, BufWriter},
    path::PathBuf,
    time::Duration,
};
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

/// Scrape the FOMC dot-plot projection tables into a single table.
#[derive(Debug, Parser)]
#[command(name = "dotplot", version)]
struct Cli {
    /// Skip source pages that fail to extract instead of aborting the run.
    #[arg(long)]
    skip_failed: bool,

    /// Write to this file instead of stdout.
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
    format: OutputFormat,

    /// Per-request timeout.
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,

    /// Extra attempts for transient fetch failures.
    #[arg(long, default_value_t = 3)]
    max_retries: u32,
}

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) init logging (stderr; stdout carries the data) ───────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    // ─── 2) configure ────────────────────────────────────────────────
    let mut config = Config::default();
    if cli.skip_failed {
        config.failure_policy = FailurePolicy::SkipFailed;
    }
    config.fetch.timeout = Duration::from_secs(cli.timeout_secs);
    config.fetch.max_retries = cli.max_retries;

    let fetcher = HttpFetcher::new(&config.fetch).context("building HTTP client")?;
    info!(index = %config.index_url, "startup");

    // ─── 3) scrape ───────────────────────────────────────────────────
    let dataset = match scrape_all(&config, &fetcher).await {
        Ok(ds) => ds,
        Err(e) => {
            error!(stage = %e.stage(), url = e.url().unwrap_or("-"), "scrape failed");
            return Err(e.into());
        }
    };

    // ─── 4) emit ─────────────────────────────────────────────────────
    match &cli.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("creating {}", path.display()))?;
            write_dataset(&dataset, cli.format, BufWriter::new(file))?;
            info!(path = %path.display(), rows = dataset.len(), "wrote output");
        }
        None => write_dataset(&dataset, cli.format, io::stdout().lock())?,
    }

    Ok(())
}
