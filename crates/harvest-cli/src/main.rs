mod poll;
mod shutdown;
mod stats;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::poll::PollDriver;

#[derive(Debug, Parser)]
#[command(name = "harvest")]
#[command(about = "Polls the catalogue API and appends enriched products to daily files")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Poll until interrupted (the default)
    Run,
    /// Run a single listing/detail cycle and exit
    Once,
    /// Summarise one day's catalog file
    Stats {
        /// Day to inspect as YYYYMMDD (defaults to today)
        #[arg(long, value_parser = parse_day)]
        date: Option<NaiveDate>,
    },
}

fn parse_day(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw, "%Y%m%d").map_err(|e| format!("expected YYYYMMDD: {e}"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = harvest_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => {
            let driver = PollDriver::from_config(&config)?;
            tracing::info!(?config, "starting product harvester");
            driver.run(shutdown::install()).await;
        }
        Commands::Once => {
            let driver = PollDriver::from_config(&config)?;
            let report = driver.run_cycle(&shutdown::install()).await?;
            println!(
                "listed {} products: {} saved, {} skipped, {} failed",
                report.listed, report.persisted, report.skipped, report.failed
            );
        }
        Commands::Stats { date } => stats::run_stats(&config, date).await?,
    }

    Ok(())
}
