use serde::{Deserialize, Serialize};
use std::fmt;

/// One row of the match table. `url` is the unique key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub home_team: String,
    pub away_team: String,
    pub umpires: Option<String>,
    pub round: Option<String>,
    pub attendance: Option<String>,
    pub venue: Option<String>,
    pub date: Option<String>,
    pub season: i32,
    pub margin: i32,
    pub home_score: i32,
    pub away_score: i32,
    pub url: String,
    #[serde(default)]
    pub match_id: String,
}

impl MatchRecord {
    /// Fills in `match_id` for rows loaded from files written before the
    /// column existed.
    pub fn backfill_id(&mut self) {
        if self.match_id.is_empty() {
            self.match_id = match_id_from_url(&self.url);
        }
    }
}

/// Derives a stable match identifier from the match page URL: the last path
/// segment without its `.html` suffix.
pub fn match_id_from_url(url: &str) -> String {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let segment = path.trim_end_matches('/').rsplit('/').next().unwrap_or(path);
    let id = segment.strip_suffix(".html").unwrap_or(segment);

    if id.is_empty() {
        url.to_string()
    } else {
        id.to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TeamStatus {
    Home,
    Away,
}

impl TeamStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TeamStatus::Home => "home",
            TeamStatus::Away => "away",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "home" => Some(TeamStatus::Home),
            "away" => Some(TeamStatus::Away),
            _ => None,
        }
    }
}

impl fmt::Display for TeamStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One player's line for one match. The stat columns are whatever the
/// source table carried, in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerStatRow {
    pub stats: Vec<(String, String)>,
    pub status: TeamStatus,
    pub url: String,
}

impl PlayerStatRow {
    pub fn stat(&self, column: &str) -> Option<&str> {
        self.stats
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value.as_str())
    }
}
