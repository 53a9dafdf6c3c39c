use crate::error::{Result, ScrapeError};
use reqwest::Client;
use scraper::Selector;
use std::future::Future;
use tracing::debug;

pub(crate) mod fields;
#[cfg(test)]
pub(crate) mod fixtures;
pub(crate) mod match_page;
pub(crate) mod season;
pub(crate) mod table;

/// Anything that can hand back the HTML body of a URL.
pub trait PageSource {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String>>;
}

pub struct HttpPageSource {
    client: Client,
}

impl HttpPageSource {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl PageSource for HttpPageSource {
    async fn fetch(&self, url: &str) -> Result<String> {
        debug!("GET {}", url);
        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.text().await?)
    }
}

pub(crate) fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| ScrapeError::Selector(e.to_string()))
}

/// Collapses runs of whitespace (including the newlines HTML sources are
/// full of) into single spaces.
pub(crate) fn normalize_text<'a>(fragments: impl Iterator<Item = &'a str>) -> String {
    fragments
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<&str>>()
        .join(" ")
}
