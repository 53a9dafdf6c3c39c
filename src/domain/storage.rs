use super::{Dataset, RunManifest};
use crate::error::Result;
use std::path::PathBuf;

pub trait Storage {
    fn save_dataset(&self, dataset: &Dataset) -> Result<()>;
    fn save_manifest(&self, manifest: &RunManifest) -> Result<PathBuf>;
}

pub struct StorageKeys;

impl StorageKeys {
    pub const MATCH_FILE: &'static str = "afl_data_match.csv";
    pub const PLAYER_FILE: &'static str = "afl_data_player.csv";
    pub const MANIFEST_PREFIX: &'static str = "manifest";
}
