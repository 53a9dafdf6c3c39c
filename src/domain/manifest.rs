use super::Dataset;
use chrono::Local;
use serde::{Deserialize, Serialize};

/// Summary of one scrape run, written next to the CSV output.
#[derive(Debug, Serialize, Deserialize)]
pub struct RunManifest {
    pub last_updated: String,
    pub seasons: Vec<SeasonSummary>,
    pub new_matches: usize,
    pub new_player_rows: usize,
    pub total_matches: usize,
    pub total_player_rows: usize,
    pub conflicts: Vec<String>,
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonSummary {
    pub year: i32,
    pub listed: usize,
    pub scraped: usize,
    pub skipped: usize,
}

impl RunManifest {
    pub fn new(
        seasons: Vec<SeasonSummary>,
        scraped: &Dataset,
        merged: &Dataset,
        conflicts: Vec<String>,
    ) -> Self {
        Self {
            last_updated: Local::now().to_rfc3339(),
            seasons,
            new_matches: scraped.matches.len(),
            new_player_rows: scraped.players.len(),
            total_matches: merged.matches.len(),
            total_player_rows: merged.players.len(),
            conflicts,
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
