//! # Blaulicht Watch
//!
//! Polls the police section of the Presseportal news index, picks out press
//! releases about burglaries and thefts, and appends one geocoded line per
//! report to a plain-text log that can be fed to a mapping tool.
//!
//! ## Usage
//!
//! ```sh
//! blaulicht_watch --coordinates-file koordinaten.json
//! ```
//!
//! ## Architecture
//!
//! Every poll cycle runs the same steps, strictly in sequence:
//! 1. **Fetching**: download the index page and split it into article blocks
//! 2. **Filtering**: keep blocks that mention one of the keywords and carry a date
//! 3. **Extraction**: guess a location and resolve it against the coordinate table
//! 4. **Output**: append the canonical line unless the same line was logged before
//!
//! The loop then sleeps for the poll interval and starts over until the
//! process is killed.

use clap::Parser;
use reqwest::Client;
use std::error::Error;
use std::path::PathBuf;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod config;
mod coordinates;
mod extract;
mod models;
mod outputs;
mod pipeline;
mod scrapers;
mod utils;

use cli::Cli;
use config::WatchConfig;
use coordinates::CoordinateTable;
use extract::LocationExtractor;
use outputs::log::EntryLog;
use pipeline::Pipeline;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    info!("blaulicht_watch starting up");

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    // ---- Configuration, CLI flags win ----
    let mut config = WatchConfig::load(args.config.as_deref()).await?;
    if let Some(path) = &args.output_file {
        config.output_file = PathBuf::from(path);
    }
    if let Some(path) = &args.coordinates_file {
        config.coordinates_file = PathBuf::from(path);
    }
    info!(
        url = %config.url,
        output_file = %config.output_file.display(),
        keywords = ?config.keywords,
        interval_secs = config.poll_interval_secs,
        "Configuration ready"
    );

    let table = CoordinateTable::load(&config.coordinates_file).await;
    let log = EntryLog::open(&config.output_file, &config.keywords).await?;
    info!(existing = log.store().len(), "Entries already present");

    let locator = LocationExtractor::new(config.exclude_words.iter().cloned());
    let mut pipeline = Pipeline::new(config.keywords.clone(), locator, table, log);
    let client = scrapers::presseportal::build_client(&config)?;

    info!("Watching... (Ctrl+C to stop)");
    loop {
        run_cycle(&client, &config, &mut pipeline).await;
        if args.once {
            break;
        }
        tokio::time::sleep(config.poll_interval()).await;
    }

    Ok(())
}

/// One fetch-and-process pass. Failures end the cycle, never the loop.
#[instrument(level = "info", skip_all)]
async fn run_cycle(client: &Client, config: &WatchConfig, pipeline: &mut Pipeline) {
    let start_time = std::time::Instant::now();

    let articles = match scrapers::presseportal::fetch_articles(client, &config.url).await {
        Ok(articles) => articles,
        Err(e) => {
            error!(url = %config.url, error = %e, "Poll cycle failed");
            return;
        }
    };

    let summary = pipeline.process(&articles).await;
    let elapsed = start_time.elapsed();
    info!(
        seen = summary.seen,
        matched = summary.matched,
        undated = summary.undated,
        written = summary.written,
        duplicates = summary.duplicates,
        failed = summary.failed,
        millis = elapsed.as_millis() as u64,
        "Poll cycle complete"
    );
}
