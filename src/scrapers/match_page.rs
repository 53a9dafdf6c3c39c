use super::fields::MatchHeader;
use super::table::{extract_team_tables, HtmlTable, StatTable, StatTableKind};
use super::PageSource;
use crate::domain::{match_id_from_url, Dataset, MatchRecord, PlayerStatRow, TeamStatus};
use crate::error::{Result, ScrapeError};
use std::collections::HashMap;

/// Fixed (row, column) positions in the summary table at the top of a
/// match page.
const HEADER_CELL: (usize, usize) = (0, 1);
const HOME_TEAM_CELL: (usize, usize) = (1, 1);
const AWAY_TEAM_CELL: (usize, usize) = (2, 1);
const HOME_SCORE_CELL: (usize, usize) = (1, 5);
const AWAY_SCORE_CELL: (usize, usize) = (2, 5);
const UMPIRES_CELL: (usize, usize) = (5, 2);

const PLAYER_COLUMN: &str = "Player";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapedMatch {
    pub record: MatchRecord,
    pub home: Vec<PlayerStatRow>,
    pub away: Vec<PlayerStatRow>,
}

impl ScrapedMatch {
    pub fn into_dataset(self) -> Dataset {
        let mut players = self.home;
        players.extend(self.away);
        Dataset::new(vec![self.record], players)
    }
}

pub struct MatchScraper<'a, S: PageSource> {
    source: &'a S,
}

impl<'a, S: PageSource> MatchScraper<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self { source }
    }

    pub async fn scrape(&self, url: &str, season: i32) -> Result<Option<ScrapedMatch>> {
        let html = self.source.fetch(url).await?;
        parse_match_page(url, season, &html)
    }
}

/// Builds the match record and both teams' player lines from a match page.
///
/// Returns `Ok(None)` when the page lacks the two "Match Statistics" tables;
/// a malformed summary table is a [`ScrapeError::Parse`].
pub fn parse_match_page(url: &str, season: i32, html: &str) -> Result<Option<ScrapedMatch>> {
    let tables = HtmlTable::parse_all(html)?;
    let summary = tables
        .first()
        .ok_or_else(|| ScrapeError::Parse(format!("No tables found on {url}")))?;

    let header = MatchHeader::parse(required_cell(summary, HEADER_CELL, "match header", url)?);
    let home_team = required_cell(summary, HOME_TEAM_CELL, "home team", url)?.to_string();
    let away_team = required_cell(summary, AWAY_TEAM_CELL, "away team", url)?.to_string();
    let home_score = parse_final_score(required_cell(summary, HOME_SCORE_CELL, "home score", url)?)?;
    let away_score = parse_final_score(required_cell(summary, AWAY_SCORE_CELL, "away score", url)?)?;
    let umpires = summary
        .cell(UMPIRES_CELL.0, UMPIRES_CELL.1)
        .filter(|s| !s.is_empty())
        .map(String::from);

    let stats = extract_team_tables(&tables, StatTableKind::MatchStatistics);
    if stats.home.is_empty() || stats.away.is_empty() {
        return Ok(None);
    }
    let details = extract_team_tables(&tables, StatTableKind::PlayerDetails);

    let record = MatchRecord {
        home_team,
        away_team,
        umpires,
        round: header.round,
        attendance: header.attendance,
        venue: header.venue,
        date: header.date,
        season,
        margin: home_score - away_score,
        home_score,
        away_score,
        url: url.to_string(),
        match_id: match_id_from_url(url),
    };

    Ok(Some(ScrapedMatch {
        record,
        home: player_rows(&stats.home, &details.home, TeamStatus::Home, url),
        away: player_rows(&stats.away, &details.away, TeamStatus::Away, url),
    }))
}

/// Total points from a `goals.behinds.total` score such as `13.11.89`.
pub fn parse_final_score(score: &str) -> Result<i32> {
    score
        .trim()
        .split('.')
        .nth(2)
        .and_then(|total| total.trim().parse::<i32>().ok())
        .ok_or_else(|| ScrapeError::Parse(format!("Malformed score '{score}'")))
}

fn required_cell<'t>(
    table: &'t HtmlTable,
    (row, col): (usize, usize),
    what: &str,
    url: &str,
) -> Result<&'t str> {
    table
        .cell(row, col)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ScrapeError::Parse(format!("Missing {what} at ({row}, {col}) on {url}")))
}

/// Player lines from the stats table, minus its jumper-number column, with
/// the details columns the stats table lacks joined on the player name.
fn player_rows(
    stats: &StatTable,
    details: &StatTable,
    status: TeamStatus,
    url: &str,
) -> Vec<PlayerStatRow> {
    let extra_columns: Vec<(usize, &String)> = details
        .columns
        .iter()
        .enumerate()
        .filter(|(_, column)| stats.column_index(column).is_none())
        .collect();

    let details_by_player: HashMap<&str, &Vec<String>> = details
        .column_index(PLAYER_COLUMN)
        .map(|idx| {
            details
                .rows
                .iter()
                .filter_map(|row| row.get(idx).map(|name| (name.as_str(), row)))
                .collect()
        })
        .unwrap_or_default();

    stats
        .records()
        .map(|record| {
            let mut row: Vec<(String, String)> = record.into_iter().skip(1).collect();

            let detail = row
                .iter()
                .find(|(column, _)| column == PLAYER_COLUMN)
                .and_then(|(_, name)| details_by_player.get(name.as_str()));

            for (idx, column) in &extra_columns {
                let value = detail
                    .and_then(|cells| cells.get(*idx))
                    .cloned()
                    .unwrap_or_default();
                row.push(((*column).clone(), value));
            }

            PlayerStatRow {
                stats: row,
                status,
                url: url.to_string(),
            }
        })
        .collect()
}
