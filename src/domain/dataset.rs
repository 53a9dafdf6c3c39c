use super::{MatchRecord, PlayerStatRow};
use std::collections::HashSet;

/// The two tables produced by a scrape: match metadata and player lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    pub matches: Vec<MatchRecord>,
    pub players: Vec<PlayerStatRow>,
}

impl Dataset {
    pub fn new(matches: Vec<MatchRecord>, players: Vec<PlayerStatRow>) -> Self {
        Self { matches, players }
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty() && self.players.is_empty()
    }

    pub fn extend(&mut self, other: Dataset) {
        self.matches.extend(other.matches);
        self.players.extend(other.players);
    }

    /// Every match URL referenced by either table. A URL in this set is
    /// never fetched again.
    pub fn known_urls(&self) -> HashSet<String> {
        self.matches
            .iter()
            .map(|m| m.url.clone())
            .chain(self.players.iter().map(|p| p.url.clone()))
            .collect()
    }

    /// Ordered union of the player stat columns, first-seen order.
    pub fn player_columns(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut columns = Vec::new();
        for row in &self.players {
            for (name, _) in &row.stats {
                if seen.insert(name.as_str()) {
                    columns.push(name.clone());
                }
            }
        }
        columns
    }
}
