use crate::error::StorageError;
use reflex_core::{PlayerDataset, StoredDataset};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Durable home of the player records.
///
/// Callers always load, append and save; nothing is ever edited in place.
pub trait PersistenceGateway {
    /// Read the stored dataset. Missing or damaged storage yields an empty one.
    fn load(&self) -> PlayerDataset;

    /// Replace the stored dataset with `dataset`. Returns once the data is on disk.
    fn save(&self, dataset: &PlayerDataset) -> Result<(), StorageError>;
}

/// Players stored as one JSON document.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Like [`PersistenceGateway::load`], but reports why storage was unusable.
    ///
    /// Rows that fail validation are skipped with a warning; the rest load.
    pub fn try_load(&self) -> Result<PlayerDataset, StorageError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no player data yet");
                return Ok(PlayerDataset::new());
            }
            Err(source) => {
                return Err(StorageError::Unreadable {
                    path: self.path.clone(),
                    source,
                });
            }
        };
        let stored: StoredDataset =
            serde_json::from_slice(&bytes).map_err(|source| StorageError::Corrupt {
                path: self.path.clone(),
                source,
            })?;
        let (dataset, rejected) = stored.into_dataset();
        for skipped in &rejected {
            warn!(
                path = %self.path.display(),
                name = %skipped.row.name,
                time = skipped.row.time,
                error = %skipped.error,
                "skipping invalid player record"
            );
        }
        Ok(dataset)
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl PersistenceGateway for JsonFileStore {
    fn load(&self) -> PlayerDataset {
        self.try_load().unwrap_or_else(|e| {
            warn!(
                error = %e,
                cause = ?std::error::Error::source(&e),
                "starting from an empty player list"
            );
            PlayerDataset::new()
        })
    }

    fn save(&self, dataset: &PlayerDataset) -> Result<(), StorageError> {
        let bytes = serde_json::to_vec(dataset)?;
        let write_failure = |source| StorageError::WriteFailure {
            path: self.path.clone(),
            source,
        };
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(write_failure)?;
        }
        // write-then-rename so a crash mid-write never truncates the old data
        let tmp = self.temp_path();
        fs::write(&tmp, &bytes).map_err(write_failure)?;
        fs::rename(&tmp, &self.path).map_err(write_failure)?;
        debug!(path = %self.path.display(), records = dataset.len(), "player data saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temp_file_sits_next_to_target() {
        let store = JsonFileStore::new("data/players.json");
        assert_eq!(store.temp_path(), PathBuf::from("data/players.json.tmp"));
    }
}
