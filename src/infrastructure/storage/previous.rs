use super::csv_tables::{read_matches, read_players};
use crate::config::DataLocation;
use crate::domain::Dataset;
use crate::error::Result;
use crate::scrapers::PageSource;
use tracing::info;

/// Loads the tables written by an earlier run, from disk or over HTTP.
pub struct PreviousData<'a, S: PageSource> {
    source: &'a S,
}

impl<'a, S: PageSource> PreviousData<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self { source }
    }

    /// Both tables, or `None` unless both are available.
    pub async fn load(
        &self,
        matches: &DataLocation,
        players: &DataLocation,
    ) -> Result<Option<Dataset>> {
        let (Some(match_csv), Some(player_csv)) =
            (self.read(matches).await?, self.read(players).await?)
        else {
            info!("Previous data could not be found");
            return Ok(None);
        };

        info!("Previous data found");
        Ok(Some(Dataset::new(
            read_matches(match_csv.as_bytes())?,
            read_players(player_csv.as_bytes())?,
        )))
    }

    async fn read(&self, location: &DataLocation) -> Result<Option<String>> {
        match location {
            DataLocation::Local(path) if path.exists() => {
                Ok(Some(tokio::fs::read_to_string(path).await?))
            }
            DataLocation::Local(_) => Ok(None),
            DataLocation::Remote(url) => {
                info!("Downloading previous data from {}", url);
                Ok(Some(self.source.fetch(url).await?))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scrapers::fixtures::StaticPages;
    use tempfile::tempdir;

    const MATCHES: &str = "home_team,away_team,umpires,round,attendance,venue,date,season,margin,home_score,away_score,url,match_id\n\
Sydney,Hawthorn,,GF,99454,M.C.G.,,2012,10,91,81,http://afltables.com/afl/stats/games/2012/1.html,1\n";
    const PLAYERS: &str =
        "Player,KI,status,url\n\"Kennedy, Josh\",21,home,http://afltables.com/afl/stats/games/2012/1.html\n";

    #[tokio::test]
    async fn loads_local_tables() {
        let dir = tempdir().unwrap();
        let match_path = dir.path().join("m.csv");
        let player_path = dir.path().join("p.csv");
        std::fs::write(&match_path, MATCHES).unwrap();
        std::fs::write(&player_path, PLAYERS).unwrap();

        let pages = StaticPages::new();
        let dataset = PreviousData::new(&pages)
            .load(
                &DataLocation::Local(match_path),
                &DataLocation::Local(player_path),
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(dataset.matches[0].round.as_deref(), Some("GF"));
        assert_eq!(dataset.players.len(), 1);
        assert_eq!(dataset.known_urls().len(), 1);
    }

    #[tokio::test]
    async fn missing_table_means_no_previous_data() {
        let dir = tempdir().unwrap();
        let match_path = dir.path().join("m.csv");
        std::fs::write(&match_path, MATCHES).unwrap();

        let pages = StaticPages::new();
        let loaded = PreviousData::new(&pages)
            .load(
                &DataLocation::Local(match_path),
                &DataLocation::Local(dir.path().join("absent.csv")),
            )
            .await
            .unwrap();

        assert!(loaded.is_none());
    }

    #[tokio::test]
    async fn loads_remote_tables_through_page_source() {
        let pages = StaticPages::new()
            .with_page("https://example.com/m.csv", MATCHES)
            .with_page("https://example.com/p.csv", PLAYERS);

        let dataset = PreviousData::new(&pages)
            .load(
                &DataLocation::Remote("https://example.com/m.csv".into()),
                &DataLocation::Remote("https://example.com/p.csv".into()),
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(dataset.matches.len(), 1);
        assert_eq!(pages.fetched().len(), 2);
    }
}
