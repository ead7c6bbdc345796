use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Inclusive bounds of the random delay before the stimulus.
    pub wait_range_ms: (u64, u64),
    pub stimulus_timeout_ms: u64,
    pub loss_display_ms: u64,
    pub name_max_chars: usize,
    pub leaderboard_size: usize,
    /// Typical adult reaction time, shown for comparison.
    pub reference_mean_ms: u32,
    pub cursor_blink_ms: u64,
    pub header: Option<String>,
    pub credits: Option<String>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            wait_range_ms: (3_000, 10_000),
            stimulus_timeout_ms: 10_000,
            loss_display_ms: 6_000,
            name_max_chars: reflex_core::record::NAME_MAX_CHARS,
            leaderboard_size: 5,
            reference_mean_ms: 250,
            cursor_blink_ms: 500,
            header: None,
            credits: None,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (min, max) = self.wait_range_ms;
        if min > max {
            return Err(ConfigError::InvertedWaitRange { min, max });
        }
        if self.stimulus_timeout_ms == 0 {
            return Err(ConfigError::ZeroDuration("stimulus_timeout_ms"));
        }
        if self.loss_display_ms == 0 {
            return Err(ConfigError::ZeroDuration("loss_display_ms"));
        }
        if self.cursor_blink_ms == 0 {
            return Err(ConfigError::ZeroDuration("cursor_blink_ms"));
        }
        if self.name_max_chars == 0 || self.name_max_chars > reflex_core::record::NAME_MAX_CHARS {
            return Err(ConfigError::NameLength(self.name_max_chars));
        }
        Ok(())
    }

    pub fn stimulus_timeout(&self) -> Duration {
        Duration::from_millis(self.stimulus_timeout_ms)
    }

    pub fn loss_display(&self) -> Duration {
        Duration::from_millis(self.loss_display_ms)
    }
}
