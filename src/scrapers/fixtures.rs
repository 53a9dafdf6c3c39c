//! HTML pages shaped like the afltables.com season and match pages, plus an
//! in-memory [`PageSource`] serving them.

use super::PageSource;
use crate::error::{Result, ScrapeError};
use std::cell::RefCell;
use std::collections::HashMap;
use std::io::Write;
use std::sync::{Arc, Mutex};

#[derive(Default)]
pub struct StaticPages {
    pages: HashMap<String, String>,
    fetched: RefCell<Vec<String>>,
}

impl StaticPages {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: impl Into<String>, html: impl Into<String>) -> Self {
        self.pages.insert(url.into(), html.into());
        self
    }

    pub fn fetched(&self) -> Vec<String> {
        self.fetched.borrow().clone()
    }
}

impl PageSource for StaticPages {
    async fn fetch(&self, url: &str) -> Result<String> {
        self.fetched.borrow_mut().push(url.to_string());
        self.pages.get(url).cloned().ok_or_else(|| {
            ScrapeError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("no fixture for {url}"),
            ))
        })
    }
}

/// Formatted log output of everything emitted inside [`CapturedLogs::capture`].
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    pub fn capture<T>(&self, f: impl FnOnce() -> T) -> T {
        let logs = self.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_writer(move || logs.clone())
            .finish();
        tracing::subscriber::with_default(subscriber, f)
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

pub struct MatchFixture {
    pub home_team: String,
    pub away_team: String,
    pub home_score: String,
    pub away_score: String,
    pub header: String,
    pub players_per_team: usize,
    pub include_stat_tables: bool,
}

impl Default for MatchFixture {
    fn default() -> Self {
        Self {
            home_team: "Carlton".into(),
            away_team: "Richmond".into(),
            home_score: "11.12.78".into(),
            away_score: "15.15.105".into(),
            header: "Round: 1 Venue: M.C.G. Date: Thu, 26-Mar-2015 7:20 PM Attendance: 77770"
                .into(),
            players_per_team: 3,
            include_stat_tables: true,
        }
    }
}

pub fn season_page(hrefs: &[&str]) -> String {
    let links: String = hrefs
        .iter()
        .map(|href| format!(r#"<tr><td><a href="{href}">Match stats</a></td></tr>"#))
        .collect();

    format!(
        r#"<html><body>
        <a href="../teams/carlton_idx.html">Carlton</a>
        <table>{links}</table>
        <a href="../venues/mcg.html">M.C.G.</a>
        </body></html>"#
    )
}

pub fn stat_table(team: &str, label: &str, columns: &[&str], rows: usize) -> String {
    let head: String = columns.iter().map(|c| format!("<th>{c}</th>")).collect();
    let body: String = (0..rows)
        .map(|i| {
            let cells: String = columns
                .iter()
                .map(|c| format!("<td>{}</td>", cell_value(team, c, i)))
                .collect();
            format!("<tr>{cells}</tr>")
        })
        .collect();

    format!(
        r#"<table>
        <thead>
          <tr><th colspan="{span}">{team} {label} [Season][Game by Game]</th></tr>
          <tr>{head}</tr>
        </thead>
        <tbody>{body}</tbody>
        </table>"#,
        span = columns.len()
    )
}

pub fn match_page(fixture: &MatchFixture) -> String {
    let summary = format!(
        r#"<table>
        <tr><td>Match</td><td colspan="5">{header}</td></tr>
        <tr><td>1</td><td>{home}</td><td>3.2.20</td><td>5.6.36</td><td>8.9.57</td><td>{home_score}</td></tr>
        <tr><td>2</td><td>{away}</td><td>4.3.27</td><td>7.8.50</td><td>11.10.76</td><td>{away_score}</td></tr>
        <tr><td colspan="6">Quarter scores</td></tr>
        <tr><td colspan="6">Rushed behinds</td></tr>
        <tr><td>Umpires</td><td>Field</td><td>Stevic, Rosebury, Ryan</td></tr>
        </table>"#,
        header = fixture.header,
        home = fixture.home_team,
        away = fixture.away_team,
        home_score = fixture.home_score,
        away_score = fixture.away_score,
    );

    let stat_columns = ["#", "Player", "KI", "MK", "HB", "GL"];
    let detail_columns = ["#", "Player", "Age", "Career Games (W-D-L W%)"];
    let n = fixture.players_per_team;

    let mut tables = vec![summary];
    if fixture.include_stat_tables {
        tables.push(stat_table(&fixture.home_team, "Match Statistics", &stat_columns, n));
        tables.push(stat_table(&fixture.away_team, "Match Statistics", &stat_columns, n));
    }
    tables.push(stat_table(&fixture.home_team, "Player Details", &detail_columns, n));
    tables.push(stat_table(&fixture.away_team, "Player Details", &detail_columns, n));

    format!("<html><body>{}</body></html>", tables.join("\n"))
}

fn cell_value(team: &str, column: &str, i: usize) -> String {
    match column {
        "#" => (i + 1).to_string(),
        "Player" => format!("{team} Player {}", i + 1),
        "Age" => format!("{}y 0d", 20 + i),
        "Career Games (W-D-L W%)" => format!("{} (1-0-0 100%)", 1 + i),
        _ => (10 + i).to_string(),
    }
}
