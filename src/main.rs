//! # TBMM Scrape
//!
//! Harvests structured records from the Turkish Grand National Assembly
//! website into durable local JSON datasets:
//!
//! - `tbmm_scrape votes` walks every configured legislative period, visits
//!   each roll-call results page, and accumulates bills plus per-member
//!   vote outcomes in `data.json`.
//! - `tbmm_scrape contacts` harvests the member phone/address listing with
//!   profile images, then reconciles the e-mail listing against it by
//!   normalized name, producing `contacts.json`.
//!
//! Both pipelines run strictly sequentially, pause between page fetches,
//! and persist their full snapshot after every crawl unit, so a partial run
//! can simply be re-run: every merge is idempotent.

use clap::Parser;
use std::error::Error;
use tracing::{debug, info, instrument};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

mod cli;
mod config;
mod extract;
mod fetch;
mod models;
mod normalize;
mod pipelines;
mod reconcile;
mod store;
mod utils;

use cli::{Cli, Command};

#[tokio::main(flavor = "current_thread")]
#[instrument]
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

    let start_time = std::time::Instant::now();
    info!("tbmm_scrape starting up");

    let args = Cli::parse();
    debug!(?args.command, "Parsed CLI arguments");

    match args.command {
        Command::Votes { data_file } => pipelines::votes::run(&data_file).await?,
        Command::Contacts { contacts_file } => pipelines::contacts::run(&contacts_file).await?,
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}
