use crate::config::Config;
use crate::error::Result;
use crate::processor::Processor;
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod config;
mod domain;
mod error;
mod infrastructure;
mod processor;
mod scrapers;
mod services;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::new()?;
    let log_file = config.open_log_file()?;
    tracing_subscriber::registry()
        .with(LevelFilter::from_level(config.log_level()?))
        .with(fmt::layer())
        .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(log_file)))
        .init();

    let processor = Processor::new(config)?;
    match processor.run().await? {
        Some(manifest) => info!(
            "Scraping completed successfully! {} new matches, {} in total",
            manifest.new_matches, manifest.total_matches
        ),
        None => info!("Scraping completed successfully! Nothing new to store"),
    }

    Ok(())
}
