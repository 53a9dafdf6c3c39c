use crate::domain::{Dataset, MatchRecord, PlayerStatRow};
use crate::error::{Result, ScrapeError};
use clap::ValueEnum;
use std::collections::{HashMap, HashSet};
use tracing::{info, warn};

/// What happens when a scraped match is already in the previous data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ConflictPolicy {
    /// Keep the stored match and its players; drop the scraped copy.
    #[default]
    KeepExisting,
    /// Replace the stored match and its players with the scraped copy.
    Overwrite,
    /// Abort the run.
    Error,
}

#[derive(Debug)]
pub struct MergeOutcome {
    pub dataset: Dataset,
    pub added: usize,
    pub conflicts: Vec<String>,
}

/// Union of `existing` and `scraped`, keyed by match URL.
///
/// Existing rows keep their order and come first. Within each side the
/// first row for a URL wins.
pub fn merge_datasets(
    existing: Dataset,
    scraped: Dataset,
    policy: ConflictPolicy,
) -> Result<MergeOutcome> {
    let Dataset {
        matches: existing_matches,
        players: existing_players,
    } = existing;

    let mut matches = dedup_matches(existing_matches);
    let mut position: HashMap<String, usize> = matches
        .iter()
        .enumerate()
        .map(|(i, m)| (m.url.clone(), i))
        .collect();

    let mut new_players = group_by_url(scraped.players);
    let mut replaced: HashSet<String> = HashSet::new();
    let mut accepted: Vec<String> = Vec::new();
    let mut conflicts = Vec::new();
    let mut added = 0;

    for record in dedup_matches(scraped.matches) {
        match position.get(&record.url).copied() {
            None => {
                position.insert(record.url.clone(), matches.len());
                accepted.push(record.url.clone());
                matches.push(record);
                added += 1;
            }
            Some(idx) => {
                conflicts.push(record.url.clone());
                match policy {
                    ConflictPolicy::KeepExisting => {
                        info!("Keeping stored copy of {}", record.url);
                    }
                    ConflictPolicy::Overwrite => {
                        info!("Overwriting stored copy of {}", record.url);
                        replaced.insert(record.url.clone());
                        accepted.push(record.url.clone());
                        matches[idx] = record;
                    }
                    ConflictPolicy::Error => return Err(ScrapeError::MergeConflict(record.url)),
                }
            }
        }
    }

    let mut players: Vec<PlayerStatRow> = existing_players
        .into_iter()
        .filter(|p| !replaced.contains(&p.url))
        .collect();
    for url in &accepted {
        if let Some(rows) = new_players.remove(url) {
            players.extend(rows);
        }
    }

    Ok(MergeOutcome {
        dataset: Dataset::new(matches, players),
        added,
        conflicts,
    })
}

fn dedup_matches(matches: Vec<MatchRecord>) -> Vec<MatchRecord> {
    let total = matches.len();
    let mut seen = HashSet::new();
    let unique: Vec<MatchRecord> = matches
        .into_iter()
        .filter(|m| seen.insert(m.url.clone()))
        .collect();

    if unique.len() < total {
        warn!("Dropped {} duplicate match rows", total - unique.len());
    }
    unique
}

fn group_by_url(players: Vec<PlayerStatRow>) -> HashMap<String, Vec<PlayerStatRow>> {
    let mut grouped: HashMap<String, Vec<PlayerStatRow>> = HashMap::new();
    for row in players {
        grouped.entry(row.url.clone()).or_default().push(row);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{match_id_from_url, TeamStatus};

    fn record(url: &str, home_score: i32) -> MatchRecord {
        MatchRecord {
            home_team: "Geelong".into(),
            away_team: "Hawthorn".into(),
            umpires: None,
            round: Some("1".into()),
            attendance: None,
            venue: Some("M.C.G.".into()),
            date: None,
            season: 2011,
            margin: home_score - 80,
            home_score,
            away_score: 80,
            url: url.into(),
            match_id: match_id_from_url(url),
        }
    }

    fn players(url: &str, kicks: &str) -> Vec<PlayerStatRow> {
        [TeamStatus::Home, TeamStatus::Away]
            .into_iter()
            .map(|status| PlayerStatRow {
                stats: vec![("KI".into(), kicks.into())],
                status,
                url: url.into(),
            })
            .collect()
    }

    fn dataset(entries: &[(&str, i32)]) -> Dataset {
        let mut data = Dataset::default();
        for (url, score) in entries {
            data.matches.push(record(url, *score));
            data.players.extend(players(url, &score.to_string()));
        }
        data
    }

    #[test]
    fn appends_new_matches_after_existing_rows() {
        let outcome = merge_datasets(
            dataset(&[("a", 90), ("b", 91)]),
            dataset(&[("c", 92)]),
            ConflictPolicy::KeepExisting,
        )
        .unwrap();

        let urls: Vec<_> = outcome.dataset.matches.iter().map(|m| m.url.as_str()).collect();
        assert_eq!(urls, vec!["a", "b", "c"]);
        assert_eq!(outcome.dataset.players.len(), 6);
        assert_eq!(outcome.added, 1);
        assert!(outcome.conflicts.is_empty());
    }

    #[test]
    fn keep_existing_drops_scraped_copy() {
        let outcome = merge_datasets(
            dataset(&[("a", 90)]),
            dataset(&[("a", 120), ("b", 91)]),
            ConflictPolicy::KeepExisting,
        )
        .unwrap();

        assert_eq!(outcome.dataset.matches[0].home_score, 90);
        assert_eq!(outcome.dataset.matches.len(), 2);
        assert_eq!(outcome.conflicts, vec!["a"]);
        assert!(outcome
            .dataset
            .players
            .iter()
            .filter(|p| p.url == "a")
            .all(|p| p.stat("KI") == Some("90")));
    }

    #[test]
    fn overwrite_replaces_match_and_players() {
        let outcome = merge_datasets(
            dataset(&[("a", 90), ("b", 91)]),
            dataset(&[("a", 120)]),
            ConflictPolicy::Overwrite,
        )
        .unwrap();

        assert_eq!(outcome.dataset.matches[0].url, "a");
        assert_eq!(outcome.dataset.matches[0].home_score, 120);
        let a_rows: Vec<_> = outcome
            .dataset
            .players
            .iter()
            .filter(|p| p.url == "a")
            .collect();
        assert_eq!(a_rows.len(), 2);
        assert!(a_rows.iter().all(|p| p.stat("KI") == Some("120")));
    }

    #[test]
    fn error_policy_aborts_on_conflict() {
        let result = merge_datasets(
            dataset(&[("a", 90)]),
            dataset(&[("a", 90)]),
            ConflictPolicy::Error,
        );
        assert!(matches!(result, Err(ScrapeError::MergeConflict(url)) if url == "a"));
    }

    #[test]
    fn existing_duplicates_collapse_to_first_row() {
        let mut existing = dataset(&[("a", 90)]);
        existing.matches.push(record("a", 99));

        let outcome =
            merge_datasets(existing, Dataset::default(), ConflictPolicy::KeepExisting).unwrap();
        assert_eq!(outcome.dataset.matches.len(), 1);
        assert_eq!(outcome.dataset.matches[0].home_score, 90);
    }

    #[test]
    fn merging_the_same_batch_twice_is_idempotent() {
        let existing = dataset(&[("a", 90), ("b", 91)]);
        let scraped = dataset(&[("b", 91), ("c", 92)]);

        let once = merge_datasets(existing, scraped.clone(), ConflictPolicy::KeepExisting)
            .unwrap()
            .dataset;
        let twice = merge_datasets(once.clone(), scraped, ConflictPolicy::KeepExisting)
            .unwrap()
            .dataset;

        assert_eq!(once, twice);
        assert_eq!(twice.matches.len(), 3);
    }
}
