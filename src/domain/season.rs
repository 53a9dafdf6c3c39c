use crate::error::{Result, ScrapeError};
use chrono::{Datelike, Local};

/// Earliest season the source publishes player statistics for.
pub const FIRST_SEASON: i32 = 2000;

/// The match pages still to scrape for one year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Season {
    pub year: i32,
    pub match_urls: Vec<String>,
}

pub fn current_year() -> i32 {
    Local::now().year()
}

pub fn validate_season(year: i32) -> Result<()> {
    validate_season_against(year, current_year())
}

pub fn validate_season_against(year: i32, latest: i32) -> Result<()> {
    if (FIRST_SEASON..=latest).contains(&year) {
        Ok(())
    } else {
        Err(ScrapeError::InvalidSeason { year, latest })
    }
}
