use crate::domain::{MatchRecord, PlayerStatRow, TeamStatus};
use crate::error::{Result, ScrapeError};
use csv::{ReaderBuilder, WriterBuilder};
use std::collections::HashMap;
use std::io::{Read, Write};

pub const MATCH_COLUMNS: [&str; 13] = [
    "home_team",
    "away_team",
    "umpires",
    "round",
    "attendance",
    "venue",
    "date",
    "season",
    "margin",
    "home_score",
    "away_score",
    "url",
    "match_id",
];

const STATUS_COLUMN: &str = "status";
const URL_COLUMN: &str = "url";

pub fn read_matches<R: Read>(reader: R) -> Result<Vec<MatchRecord>> {
    let mut reader = ReaderBuilder::new().from_reader(reader);
    let mut matches = Vec::new();

    for row in reader.deserialize::<MatchRecord>() {
        let mut record = row?;
        record.backfill_id();
        matches.push(record);
    }

    Ok(matches)
}

pub fn write_matches<W: Write>(writer: W, matches: &[MatchRecord]) -> Result<()> {
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(writer);
    writer.write_record(MATCH_COLUMNS)?;
    for record in matches {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Reads a player table. `status` and `url` are required; every other column
/// is a stat column.
pub fn read_players<R: Read>(reader: R) -> Result<Vec<PlayerStatRow>> {
    let mut reader = ReaderBuilder::new().from_reader(reader);
    let headers = reader.headers()?.clone();

    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| ScrapeError::Parse(format!("Player table has no '{name}' column")))
    };
    let status_idx = column(STATUS_COLUMN)?;
    let url_idx = column(URL_COLUMN)?;

    let mut players = Vec::new();
    for row in reader.records() {
        let row = row?;
        let status_value = row.get(status_idx).unwrap_or_default();
        let status = TeamStatus::parse(status_value)
            .ok_or_else(|| ScrapeError::Parse(format!("Unknown player status '{status_value}'")))?;

        let stats = headers
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != status_idx && *i != url_idx)
            .map(|(i, name)| (name.to_string(), row.get(i).unwrap_or_default().to_string()))
            .collect();

        players.push(PlayerStatRow {
            stats,
            status,
            url: row.get(url_idx).unwrap_or_default().to_string(),
        });
    }

    Ok(players)
}

/// Writes the stat columns (ordered union over all rows) followed by
/// `status` and `url`. Missing stats are written as empty cells.
pub fn write_players<W: Write>(writer: W, columns: &[String], players: &[PlayerStatRow]) -> Result<()> {
    let mut writer = WriterBuilder::new().from_writer(writer);

    let mut header: Vec<&str> = columns.iter().map(String::as_str).collect();
    header.extend([STATUS_COLUMN, URL_COLUMN]);
    writer.write_record(&header)?;

    for player in players {
        let values: HashMap<&str, &str> = player
            .stats
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
            .collect();

        let mut record: Vec<&str> = columns
            .iter()
            .map(|column| values.get(column.as_str()).copied().unwrap_or(""))
            .collect();
        record.push(player.status.as_str());
        record.push(&player.url);
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}
