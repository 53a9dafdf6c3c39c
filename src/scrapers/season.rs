use super::{parse_selector, PageSource};
use crate::config::SiteConfig;
use crate::domain::{validate_season, Season};
use crate::error::Result;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::Html;
use std::collections::HashSet;
use tracing::debug;

static GAME_LINK: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\.\./stats/(games/\S+)$").unwrap());

pub struct SeasonScraper<'a, S: PageSource> {
    source: &'a S,
    site: &'a SiteConfig,
}

impl<'a, S: PageSource> SeasonScraper<'a, S> {
    pub fn new(source: &'a S, site: &'a SiteConfig) -> Self {
        Self { source, site }
    }

    /// Lists the match pages of `year` that are not in `exclude`.
    pub async fn enumerate(&self, year: i32, exclude: &HashSet<String>) -> Result<Season> {
        validate_season(year)?;

        let index_url = self.site.season_url(year);
        debug!("Fetching season index {}", index_url);
        let html = self.source.fetch(&index_url).await?;

        parse_season_index(year, &html, self.site, exclude)
    }
}

pub fn parse_season_index(
    year: i32,
    html: &str,
    site: &SiteConfig,
    exclude: &HashSet<String>,
) -> Result<Season> {
    let document = Html::parse_document(html);
    let link_selector = parse_selector("a[href]")?;

    let mut seen = HashSet::new();
    let match_urls = document
        .select(&link_selector)
        .filter_map(|link| link.value().attr("href"))
        .filter_map(|href| GAME_LINK.captures(href.trim()))
        .filter_map(|caps| caps.get(1).map(|path| site.stats_url(path.as_str())))
        .filter(|url| !exclude.contains(url))
        .filter(|url| seen.insert(url.clone()))
        .collect();

    Ok(Season { year, match_urls })
}
