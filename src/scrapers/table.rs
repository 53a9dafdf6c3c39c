use super::{normalize_text, parse_selector};
use crate::error::Result;
use scraper::{ElementRef, Html, Selector};
use tracing::warn;

/// Rows kept per team table. Later rows are interchange extras or totals.
pub const ROSTER_SIZE: usize = 22;

/// A `<table>` laid out as a grid. Header rows come from `<thead>`, or from
/// the leading all-`<th>` rows when there is none. `<tfoot>` rows always
/// follow the body rows. Spanned cells are repeated in every grid position
/// they cover.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HtmlTable {
    header: Vec<Vec<String>>,
    rows: Vec<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamTables {
    pub home: StatTable,
    pub away: StatTable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatTableKind {
    MatchStatistics,
    PlayerDetails,
}

impl StatTableKind {
    pub fn label(&self) -> &'static str {
        match self {
            StatTableKind::MatchStatistics => "Match Statistics",
            StatTableKind::PlayerDetails => "Player Details",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Head,
    Body,
    Foot,
}

impl HtmlTable {
    pub fn parse_all(html: &str) -> Result<Vec<HtmlTable>> {
        let document = Html::parse_document(html);
        Self::from_document(&document)
    }

    pub fn from_document(document: &Html) -> Result<Vec<HtmlTable>> {
        let table_selector = parse_selector("table")?;
        let row_selector = parse_selector("tr")?;

        Ok(document
            .select(&table_selector)
            .map(|table| Self::from_element(table, &row_selector))
            .collect())
    }

    fn from_element(table: ElementRef, row_selector: &Selector) -> Self {
        let mut head = Vec::new();
        let mut body = Vec::new();
        let mut foot = Vec::new();

        for tr in table.select(row_selector).filter(|tr| owned_by(*tr, table)) {
            let cells: Vec<ElementRef> = tr
                .children()
                .filter_map(ElementRef::wrap)
                .filter(|cell| matches!(cell.value().name(), "td" | "th"))
                .collect();

            match section_of(tr) {
                Section::Head => head.push(cells),
                Section::Body => body.push(cells),
                Section::Foot => foot.push(cells),
            }
        }

        if head.is_empty() {
            let leading = body.iter().take_while(|cells| is_header_row(cells)).count();
            head = body.drain(..leading).collect();
        }

        let mut rows = expand_spans(&body);
        rows.extend(expand_spans(&foot));

        Self {
            header: expand_spans(&head),
            rows,
        }
    }

    /// Top-level header label, e.g. "Richmond Match Statistics [Season]".
    pub fn label(&self) -> &str {
        self.header
            .first()
            .and_then(|row| row.first())
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Stat names from the lowest header row.
    pub fn columns(&self) -> &[String] {
        self.header.last().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(String::as_str)
    }

    fn to_stat_table(&self, max_rows: usize) -> StatTable {
        StatTable {
            columns: self.columns().to_vec(),
            rows: self.rows.iter().take(max_rows).cloned().collect(),
        }
    }
}

impl StatTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Rows as (column, value) pairs. Short rows are padded with empty cells.
    pub fn records(&self) -> impl Iterator<Item = Vec<(String, String)>> + '_ {
        self.rows.iter().map(|row| {
            self.columns
                .iter()
                .enumerate()
                .map(|(i, column)| (column.clone(), row.get(i).cloned().unwrap_or_default()))
                .collect()
        })
    }
}

impl TeamTables {
    pub fn is_empty(&self) -> bool {
        self.home.is_empty() && self.away.is_empty()
    }
}

pub fn find_tables_by_label(tables: &[HtmlTable], label: &str) -> Vec<usize> {
    tables
        .iter()
        .enumerate()
        .filter(|(_, table)| table.label().contains(label))
        .map(|(i, _)| i)
        .collect()
}

/// Home and away tables for `kind`. Anything other than exactly two labelled
/// tables yields two empty tables.
pub fn extract_team_tables(tables: &[HtmlTable], kind: StatTableKind) -> TeamTables {
    let indices = find_tables_by_label(tables, kind.label());

    match indices.as_slice() {
        [home, away] => TeamTables {
            home: tables[*home].to_stat_table(ROSTER_SIZE),
            away: tables[*away].to_stat_table(ROSTER_SIZE),
        },
        _ => {
            warn!(
                "Could not find two '{}' tables (found {})",
                kind.label(),
                indices.len()
            );
            TeamTables::default()
        }
    }
}

fn owned_by(tr: ElementRef, table: ElementRef) -> bool {
    tr.ancestors()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "table")
        .is_some_and(|el| el.id() == table.id())
}

fn section_of(tr: ElementRef) -> Section {
    tr.ancestors()
        .filter_map(ElementRef::wrap)
        .take_while(|el| el.value().name() != "table")
        .find_map(|el| match el.value().name() {
            "thead" => Some(Section::Head),
            "tfoot" => Some(Section::Foot),
            _ => None,
        })
        .unwrap_or(Section::Body)
}

fn is_header_row(cells: &[ElementRef]) -> bool {
    !cells.is_empty() && cells.iter().all(|c| c.value().name() == "th")
}

fn span(cell: ElementRef, attr: &str) -> usize {
    cell.value()
        .attr(attr)
        .and_then(|s| s.trim().parse::<usize>().ok())
        .unwrap_or(1)
        .max(1)
}

/// Lays out one table section as a grid. A `rowspan` cell is carried down
/// into the same column of the following rows before their own cells are
/// placed; spans never cross into another section.
fn expand_spans(rows: &[Vec<ElementRef>]) -> Vec<Vec<String>> {
    // (text, rows still covered) per column
    let mut carried: Vec<Option<(String, usize)>> = Vec::new();
    let mut grid = Vec::with_capacity(rows.len());

    for cells in rows {
        let mut row = Vec::new();

        for cell in cells {
            while let Some(text) = take_carried(&mut carried, row.len()) {
                row.push(text);
            }

            let text = normalize_text(cell.text());
            let rowspan = span(*cell, "rowspan");
            for _ in 0..span(*cell, "colspan") {
                if rowspan > 1 {
                    let col = row.len();
                    if carried.len() <= col {
                        carried.resize(col + 1, None);
                    }
                    carried[col] = Some((text.clone(), rowspan - 1));
                }
                row.push(text.clone());
            }
        }

        let trailing: Vec<usize> = (row.len()..carried.len())
            .filter(|col| carried[*col].is_some())
            .collect();
        for col in trailing {
            if let Some(text) = take_carried(&mut carried, col) {
                row.push(text);
            }
        }

        grid.push(row);
    }

    grid
}

fn take_carried(carried: &mut [Option<(String, usize)>], col: usize) -> Option<String> {
    let slot = carried.get_mut(col)?;
    let (text, left) = slot.clone()?;
    *slot = if left > 1 {
        Some((text.clone(), left - 1))
    } else {
        None
    };
    Some(text)
}
