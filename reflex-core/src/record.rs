use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Longest name a player can enter, in characters.
pub const NAME_MAX_CHARS: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("player name is empty")]
    EmptyName,
    #[error("player name is longer than {NAME_MAX_CHARS} characters")]
    NameTooLong,
    #[error("player name contains {0:?}, only letters, digits and spaces are allowed")]
    InvalidChar(char),
    #[error("reaction time must be a positive number of milliseconds")]
    ZeroTime,
}

/// Characters a player name may contain.
pub fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == ' '
}

/// One completed attempt, as persisted on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StoredRecord", into = "StoredRecord")]
pub struct PlayerRecord {
    name: String,
    reaction_time_ms: u32,
}

impl PlayerRecord {
    pub fn new(name: impl Into<String>, reaction_time_ms: u32) -> Result<Self, RecordError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(RecordError::EmptyName);
        }
        if name.chars().count() > NAME_MAX_CHARS {
            return Err(RecordError::NameTooLong);
        }
        if let Some(bad) = name.chars().find(|c| !is_name_char(*c)) {
            return Err(RecordError::InvalidChar(bad));
        }
        if reaction_time_ms == 0 {
            return Err(RecordError::ZeroTime);
        }
        Ok(Self {
            name,
            reaction_time_ms,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn reaction_time_ms(&self) -> u32 {
        self.reaction_time_ms
    }
}

/// On-disk shape of a record: `{"name": "...", "time": 312}`.
///
/// Nothing is validated at this level, so one bad row never hides the others.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredRecord {
    pub name: String,
    pub time: u32,
}

impl TryFrom<StoredRecord> for PlayerRecord {
    type Error = RecordError;

    fn try_from(raw: StoredRecord) -> Result<Self, Self::Error> {
        PlayerRecord::new(raw.name, raw.time)
    }
}

impl From<PlayerRecord> for StoredRecord {
    fn from(record: PlayerRecord) -> Self {
        StoredRecord {
            name: record.name,
            time: record.reaction_time_ms,
        }
    }
}

/// On-disk shape of the whole file, before any row is validated.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StoredDataset {
    #[serde(default)]
    pub players: Vec<StoredRecord>,
}

/// A stored row that failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedRecord {
    pub row: StoredRecord,
    pub error: RecordError,
}

impl StoredDataset {
    /// Validate each row on its own, keeping the good ones in file order.
    pub fn into_dataset(self) -> (PlayerDataset, Vec<RejectedRecord>) {
        let mut dataset = PlayerDataset::new();
        let mut rejected = Vec::new();
        for row in self.players {
            match PlayerRecord::new(row.name.clone(), row.time) {
                Ok(record) => dataset.push(record),
                Err(error) => rejected.push(RejectedRecord { row, error }),
            }
        }
        (dataset, rejected)
    }
}

/// Every persisted record, in insertion order.
///
/// Queries never depend on the order; they sort or aggregate on their own.
/// Reading goes through [`StoredDataset`] so invalid rows can be skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PlayerDataset {
    #[serde(default)]
    players: Vec<PlayerRecord>,
}

impl PlayerDataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(players: Vec<PlayerRecord>) -> Self {
        Self { players }
    }

    pub fn push(&mut self, record: PlayerRecord) {
        self.players.push(record);
    }

    pub fn records(&self) -> &[PlayerRecord] {
        &self.players
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PlayerRecord> {
        self.players.iter()
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

impl<'a> IntoIterator for &'a PlayerDataset {
    type Item = &'a PlayerRecord;
    type IntoIter = std::slice::Iter<'a, PlayerRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.players.iter()
    }
}
