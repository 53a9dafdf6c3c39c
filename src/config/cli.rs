use crate::services::merging::ConflictPolicy;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Incrementally scrape AFL match and player statistics")]
pub struct Args {
    /// First season to scrape
    #[arg(long, default_value_t = 2000)]
    pub from_year: i32,

    /// Last season to scrape (defaults to the current year)
    #[arg(long)]
    pub to_year: Option<i32>,

    /// Previous match data, as a file path or an http(s) URL
    #[arg(long, default_value = "data/afl_data_match.csv")]
    pub prev_match_data: String,

    /// Previous player data, as a file path or an http(s) URL
    #[arg(long, default_value = "data/afl_data_player.csv")]
    pub prev_player_data: String,

    /// Directory to store output data
    #[arg(long, default_value = "data")]
    pub data_dir: PathBuf,

    /// What to do when a scraped match is already in the previous data
    #[arg(long, value_enum, default_value_t = ConflictPolicy::KeepExisting)]
    pub conflict_policy: ConflictPolicy,

    /// Pause between match pages, in seconds
    #[arg(long, default_value_t = 5)]
    pub match_delay_secs: u64,

    /// Pause between seasons, in seconds
    #[arg(long, default_value_t = 5)]
    pub season_delay_secs: u64,

    /// Log date, attendance, round and match id for every match
    #[arg(long)]
    pub verbose: bool,

    /// File that receives a copy of the log output
    #[arg(long, default_value = "scrape.log")]
    pub log_file: PathBuf,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info", env = "AFL_SCRAPE_LOG")]
    pub log_level: String,
}
