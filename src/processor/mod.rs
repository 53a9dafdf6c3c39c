mod processor;

pub use processor::IncrementalScraper;

use crate::config::{Config, DataLocation, SiteConfig, Throttle};
use crate::domain::storage::Storage;
use crate::domain::RunManifest;
use crate::error::Result;
use crate::infrastructure::{FileSystemStore, PreviousData};
use crate::scrapers::{HttpPageSource, PageSource};
use crate::services::merging::{merge_datasets, ConflictPolicy};
use std::ops::RangeInclusive;
use tracing::info;

/// The knobs of one run, lifted out of [`Config`].
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub years: RangeInclusive<i32>,
    pub previous_matches: DataLocation,
    pub previous_players: DataLocation,
    pub policy: ConflictPolicy,
    pub site: SiteConfig,
    pub throttle: Throttle,
    pub verbose: bool,
}

impl RunSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            years: config.years(),
            previous_matches: config.previous_matches(),
            previous_players: config.previous_players(),
            policy: config.args.conflict_policy,
            site: config.site.clone(),
            throttle: config.throttle(),
            verbose: config.args.verbose,
        }
    }
}

pub struct Processor<S: PageSource, St: Storage> {
    source: S,
    store: St,
    settings: RunSettings,
}

impl Processor<HttpPageSource, FileSystemStore> {
    pub fn new(config: Config) -> Result<Self> {
        config.ensure_directories()?;

        Ok(Self::from_parts(
            HttpPageSource::new(config.http_client.clone()),
            FileSystemStore::new(&config.args.data_dir),
            RunSettings::from_config(&config),
        ))
    }
}

impl<S: PageSource, St: Storage> Processor<S, St> {
    pub fn from_parts(source: S, store: St, settings: RunSettings) -> Self {
        Self {
            source,
            store,
            settings,
        }
    }

    /// Scrapes the configured seasons and persists the merged tables.
    /// Returns `None` when nothing new was scraped; nothing is written then.
    pub async fn run(&self) -> Result<Option<RunManifest>> {
        info!("Started scraping");

        // Step 1: Load what earlier runs produced
        let previous = PreviousData::new(&self.source)
            .load(&self.settings.previous_matches, &self.settings.previous_players)
            .await?
            .unwrap_or_default();
        let known = previous.known_urls();
        info!("{} matches already scraped", known.len());

        // Step 2: Scrape the seasons
        let report = IncrementalScraper::new(
            &self.source,
            &self.settings.site,
            self.settings.throttle,
            self.settings.verbose,
        )
        .scrape(self.settings.years.clone(), &known)
        .await?;

        if report.dataset.is_empty() {
            info!("No data scraped");
            return Ok(None);
        }

        // Step 3: Merge with the previous tables
        let outcome = merge_datasets(previous, report.dataset.clone(), self.settings.policy)?;
        info!(
            "Added {} matches ({} conflicts)",
            outcome.added,
            outcome.conflicts.len()
        );

        // Step 4: Persist
        self.store.save_dataset(&outcome.dataset)?;
        let manifest = RunManifest::new(
            report.seasons,
            &report.dataset,
            &outcome.dataset,
            outcome.conflicts,
        );
        let manifest_path = self.store.save_manifest(&manifest)?;
        info!("Wrote run manifest to {}", manifest_path.display());

        Ok(Some(manifest))
    }
}
