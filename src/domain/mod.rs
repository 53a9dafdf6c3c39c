mod dataset;
mod manifest;
mod match_record;
mod season;
pub(crate) mod storage;

pub use dataset::Dataset;
pub use manifest::{RunManifest, SeasonSummary};
pub use match_record::{match_id_from_url, MatchRecord, PlayerStatRow, TeamStatus};
pub use season::{current_year, validate_season, Season};
