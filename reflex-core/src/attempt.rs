use crate::record::{PlayerRecord, RecordError};

/// Why a round ended without a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LossReason {
    EarlyPress,
    Timeout,
}

impl LossReason {
    pub fn message(self) -> &'static str {
        match self {
            LossReason::EarlyPress => "You pressed too early and lost",
            LossReason::Timeout => "You didn't press anything and lost",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptOutcome {
    Pending,
    EarlyPress,
    Timeout,
    Reacted(u32),
}

/// The round in progress. Lives from Welcome submission until the round ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameAttempt {
    pub player_name: String,
    pub outcome: AttemptOutcome,
}

impl GameAttempt {
    pub fn new(player_name: impl Into<String>) -> Self {
        Self {
            player_name: player_name.into(),
            outcome: AttemptOutcome::Pending,
        }
    }

    pub fn lose(&mut self, reason: LossReason) {
        self.outcome = match reason {
            LossReason::EarlyPress => AttemptOutcome::EarlyPress,
            LossReason::Timeout => AttemptOutcome::Timeout,
        };
    }

    pub fn react(&mut self, time_ms: u32) {
        self.outcome = AttemptOutcome::Reacted(time_ms);
    }

    /// The record to persist, only for a `Reacted` outcome.
    pub fn into_record(self) -> Option<Result<PlayerRecord, RecordError>> {
        match self.outcome {
            AttemptOutcome::Reacted(ms) => Some(PlayerRecord::new(self.player_name, ms)),
            _ => None,
        }
    }
}
