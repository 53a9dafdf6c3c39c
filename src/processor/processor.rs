use crate::config::{SiteConfig, Throttle};
use crate::domain::{Dataset, MatchRecord, Season, SeasonSummary};
use crate::error::{Result, ScrapeError};
use crate::scrapers::match_page::MatchScraper;
use crate::scrapers::season::SeasonScraper;
use crate::scrapers::PageSource;
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::HashSet;
use std::ops::RangeInclusive;
use tracing::{info, warn};

/// Everything scraped in one run, before it meets the previous data.
#[derive(Debug, Default)]
pub struct ScrapeReport {
    pub dataset: Dataset,
    pub seasons: Vec<SeasonSummary>,
}

/// Walks seasons in order and scrapes every match page not yet known.
pub struct IncrementalScraper<'a, S: PageSource> {
    source: &'a S,
    site: &'a SiteConfig,
    throttle: Throttle,
    verbose: bool,
}

impl<'a, S: PageSource> IncrementalScraper<'a, S> {
    pub fn new(source: &'a S, site: &'a SiteConfig, throttle: Throttle, verbose: bool) -> Self {
        Self {
            source,
            site,
            throttle,
            verbose,
        }
    }

    pub async fn scrape(
        &self,
        years: RangeInclusive<i32>,
        known: &HashSet<String>,
    ) -> Result<ScrapeReport> {
        info!("Scraping years: {:?}", years.clone().collect::<Vec<_>>());
        let seasons = SeasonScraper::new(self.source, self.site);
        let mut report = ScrapeReport::default();

        for year in years {
            let season = seasons.enumerate(year, known).await?;
            let (batch, summary) = self.scrape_season(&season).await?;

            report.dataset.extend(batch);
            report.seasons.push(summary);
            self.throttle.after_season().await;
        }

        Ok(report)
    }

    async fn scrape_season(&self, season: &Season) -> Result<(Dataset, SeasonSummary)> {
        let mut batch = Dataset::default();
        let mut summary = SeasonSummary {
            year: season.year,
            listed: season.match_urls.len(),
            scraped: 0,
            skipped: 0,
        };

        if season.match_urls.is_empty() {
            info!("No games to scrape for season {}", season.year);
            return Ok((batch, summary));
        }

        let progress = ProgressBar::new(season.match_urls.len() as u64);
        progress.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
                .map_err(|e| ScrapeError::Config(e.to_string()))?,
        );

        let matches = MatchScraper::new(self.source);
        for url in &season.match_urls {
            progress.set_message(format!("Season {}", season.year));

            match matches.scrape(url, season.year).await {
                Ok(Some(scraped)) => {
                    self.log_match(&scraped.record);
                    batch.extend(scraped.into_dataset());
                    summary.scraped += 1;
                }
                Ok(None) => {
                    warn!("Could not find player statistics on {}, skipping", url);
                    summary.skipped += 1;
                }
                Err(ScrapeError::Parse(reason)) => {
                    warn!("Skipping {}: {}", url, reason);
                    summary.skipped += 1;
                }
                Err(e) => {
                    progress.abandon();
                    return Err(e);
                }
            }

            progress.inc(1);
            self.throttle.after_match().await;
        }

        progress.finish_and_clear();
        Ok((batch, summary))
    }

    fn log_match(&self, record: &MatchRecord) {
        if self.verbose {
            info!(
                "Date: {}, Attendance: {}, Round: {}, Home: {}, Away: {}, ID: {}",
                record.date.as_deref().unwrap_or("-"),
                record.attendance.as_deref().unwrap_or("-"),
                record.round.as_deref().unwrap_or("-"),
                record.home_team,
                record.away_team,
                record.match_id
            );
        } else {
            info!(
                "Season: {}, Home: {}, Away: {}",
                record.season, record.home_team, record.away_team
            );
        }
    }
}
