use super::csv_tables::{write_matches, write_players};
use crate::domain::storage::{Storage, StorageKeys};
use crate::domain::{Dataset, RunManifest};
use crate::error::Result;
use chrono::Utc;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Clone)]
pub struct FileSystemStore {
    data_dir: PathBuf,
}

impl FileSystemStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn match_path(&self) -> PathBuf {
        self.data_dir.join(StorageKeys::MATCH_FILE)
    }

    pub fn player_path(&self) -> PathBuf {
        self.data_dir.join(StorageKeys::PLAYER_FILE)
    }

    fn ensure_dir(&self, dir: &Path) -> Result<()> {
        if !dir.exists() {
            fs::create_dir_all(dir)?;
        }
        Ok(())
    }

    fn create_file(&self, path: &Path) -> Result<BufWriter<File>> {
        self.ensure_dir(&self.data_dir)?;
        Ok(BufWriter::new(File::create(path)?))
    }
}

impl Storage for FileSystemStore {
    fn save_dataset(&self, dataset: &Dataset) -> Result<()> {
        let match_path = self.match_path();
        info!("Writing {} records to {}", dataset.matches.len(), match_path.display());
        write_matches(self.create_file(&match_path)?, &dataset.matches)?;

        let player_path = self.player_path();
        info!("Writing {} records to {}", dataset.players.len(), player_path.display());
        write_players(
            self.create_file(&player_path)?,
            &dataset.player_columns(),
            &dataset.players,
        )?;

        Ok(())
    }

    fn save_manifest(&self, manifest: &RunManifest) -> Result<PathBuf> {
        let filename = format!(
            "{}_{}.json",
            StorageKeys::MANIFEST_PREFIX,
            Utc::now().timestamp()
        );
        let path = self.data_dir.join(filename);

        self.ensure_dir(&self.data_dir)?;
        fs::write(&path, serde_json::to_string_pretty(manifest)?)?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PlayerStatRow, TeamStatus};
    use crate::infrastructure::storage::csv_tables::{read_matches, read_players};
    use tempfile::tempdir;

    #[test]
    fn writes_both_tables_and_manifest_into_data_dir() {
        let dir = tempdir().unwrap();
        let store = FileSystemStore::new(dir.path().join("out"));

        let dataset = Dataset::new(
            vec![],
            vec![PlayerStatRow {
                stats: vec![("Player".into(), "Dangerfield, Patrick".into())],
                status: TeamStatus::Home,
                url: "u1".into(),
            }],
        );
        store.save_dataset(&dataset).unwrap();

        let matches = read_matches(File::open(store.match_path()).unwrap()).unwrap();
        assert!(matches.is_empty());
        let players = read_players(File::open(store.player_path()).unwrap()).unwrap();
        assert_eq!(players, dataset.players);

        let manifest = RunManifest::new(vec![], &dataset, &dataset, vec![]);
        let path = store.save_manifest(&manifest).unwrap();
        let written: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(written["new_player_rows"], 1);
    }
}
