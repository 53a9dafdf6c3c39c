use crate::config::cli::Args;
use crate::domain::{current_year, validate_season};
use crate::error::{Result, ScrapeError};
use clap::Parser;
use reqwest::Client;
use std::fs::{File, OpenOptions};
use std::ops::RangeInclusive;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tokio::time::sleep;
use tracing::Level;

pub(crate) mod cli;

/// Where the pages of the source site live.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub season_index_base: String,
    pub stats_base: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            season_index_base: "https://afltables.com/afl/seas/".to_string(),
            stats_base: "http://afltables.com/afl/stats/".to_string(),
        }
    }
}

impl SiteConfig {
    pub fn season_url(&self, year: i32) -> String {
        format!("{}{}.html", self.season_index_base, year)
    }

    /// Canonical URL for a path relative to the stats directory.
    pub fn stats_url(&self, path: &str) -> String {
        format!("{}{}", self.stats_base, path)
    }
}

/// Fixed pauses between requests to the source site.
#[derive(Debug, Clone, Copy, Default)]
pub struct Throttle {
    pub between_matches: Duration,
    pub between_seasons: Duration,
}

impl Throttle {
    pub fn new(between_matches: Duration, between_seasons: Duration) -> Self {
        Self {
            between_matches,
            between_seasons,
        }
    }

    pub async fn after_match(&self) {
        pause(self.between_matches).await;
    }

    pub async fn after_season(&self) {
        pause(self.between_seasons).await;
    }
}

async fn pause(duration: Duration) {
    if !duration.is_zero() {
        sleep(duration).await;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataLocation {
    Local(PathBuf),
    Remote(String),
}

impl DataLocation {
    pub fn parse(location: &str) -> Self {
        if location.starts_with("http://") || location.starts_with("https://") {
            DataLocation::Remote(location.to_string())
        } else {
            DataLocation::Local(PathBuf::from(location))
        }
    }
}

pub struct Config {
    pub args: Args,
    pub site: SiteConfig,
    pub http_client: Client,
}

impl Config {
    pub fn new() -> Result<Self> {
        Self::from_args(Args::parse())
    }

    pub fn from_args(args: Args) -> Result<Self> {
        validate_years(args.from_year, args.to_year.unwrap_or_else(current_year))?;

        let http_client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .build()?;

        Ok(Self {
            args,
            site: SiteConfig::default(),
            http_client,
        })
    }

    pub fn years(&self) -> RangeInclusive<i32> {
        self.args.from_year..=self.args.to_year.unwrap_or_else(current_year)
    }

    pub fn throttle(&self) -> Throttle {
        Throttle::new(
            Duration::from_secs(self.args.match_delay_secs),
            Duration::from_secs(self.args.season_delay_secs),
        )
    }

    pub fn previous_matches(&self) -> DataLocation {
        DataLocation::parse(&self.args.prev_match_data)
    }

    pub fn previous_players(&self) -> DataLocation {
        DataLocation::parse(&self.args.prev_player_data)
    }

    pub fn log_level(&self) -> Result<Level> {
        parse_log_level(&self.args.log_level)
    }

    /// Opens the log file for appending, creating it and its parent directory.
    pub fn open_log_file(&self) -> Result<File> {
        let path = &self.args.log_file;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        Ok(OpenOptions::new().create(true).append(true).open(path)?)
    }

    pub fn ensure_directories(&self) -> Result<()> {
        if !self.args.data_dir.exists() {
            std::fs::create_dir_all(&self.args.data_dir)?;
        }
        Ok(())
    }
}

pub fn parse_log_level(level: &str) -> Result<Level> {
    Level::from_str(level.trim())
        .map_err(|_| ScrapeError::Config(format!("Unknown log level '{level}'")))
}

/// Checks a season range before anything touches the network.
pub fn validate_years(from: i32, to: i32) -> Result<()> {
    validate_season(from)?;
    validate_season(to)?;
    if from > to {
        return Err(ScrapeError::InvalidYearRange { from, to });
    }
    Ok(())
}
