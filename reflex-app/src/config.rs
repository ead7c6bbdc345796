//! Application settings read from a TOML file.
//!
//! ```toml
//! data_file = "/srv/reflex/players.json"
//! fullscreen = true
//!
//! [game]
//! header = "Science Fair"
//! wait_range_ms = [3000, 10000]
//! ```

use anyhow::{Context, Result, bail};
use reflex_game::GameConfig;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const APP_DIR: &str = "reflex";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub data_file: PathBuf,
    pub font_path: Option<PathBuf>,
    pub fullscreen: bool,
    pub frame_rate: u32,
    pub game: GameConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            font_path: None,
            fullscreen: true,
            frame_rate: 30,
            game: GameConfig::default(),
        }
    }
}

fn default_data_file() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join(APP_DIR).join("players.json"))
        .unwrap_or_else(|| PathBuf::from("players.json"))
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR).join("config.toml"))
}

impl AppConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(text).context("invalid config file")?;
        config.validate()?;
        Ok(config)
    }

    /// Read `path`, or the per-user config file when none is given.
    ///
    /// An explicit path must exist; a missing per-user file means defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, required) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => match default_config_path() {
                Some(p) => (p, false),
                None => return Ok(Self::default()),
            },
        };
        if !required && !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let text = fs::read_to_string(&path)
            .with_context(|| format!("cannot read config {}", path.display()))?;
        let config = Self::from_toml_str(&text)
            .with_context(|| format!("in {}", path.display()))?;
        info!(path = %path.display(), "config loaded");
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.frame_rate == 0 {
            bail!("frame_rate must be at least 1");
        }
        self.game.validate()?;
        Ok(())
    }

    /// Command-line values win over the file.
    pub fn with_overrides(
        mut self,
        data_file: Option<PathBuf>,
        font_path: Option<PathBuf>,
        windowed: bool,
    ) -> Self {
        if let Some(data_file) = data_file {
            self.data_file = data_file;
        }
        if font_path.is_some() {
            self.font_path = font_path;
        }
        if windowed {
            self.fullscreen = false;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_all_defaults() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.frame_rate, 30);
        assert!(config.fullscreen);
    }

    #[test]
    fn game_table_is_partial() {
        let config = AppConfig::from_toml_str(
            r#"
            data_file = "scores.json"
            fullscreen = false

            [game]
            header = "Science Fair"
            wait_range_ms = [2000, 4000]
            "#,
        )
        .unwrap();
        assert_eq!(config.data_file, PathBuf::from("scores.json"));
        assert!(!config.fullscreen);
        assert_eq!(config.game.header.as_deref(), Some("Science Fair"));
        assert_eq!(config.game.wait_range_ms, (2000, 4000));
        assert_eq!(config.game.stimulus_timeout_ms, 10_000);
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(AppConfig::from_toml_str("frame_rate = 0").is_err());
        assert!(AppConfig::from_toml_str("[game]\nwait_range_ms = [5000, 1000]").is_err());
        assert!(AppConfig::from_toml_str("fullscreen = \"yes\"").is_err());
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(AppConfig::load(Some(&dir.path().join("nope.toml"))).is_err());
    }

    #[test]
    fn loads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "frame_rate = 60\n").unwrap();
        assert_eq!(AppConfig::load(Some(&path)).unwrap().frame_rate, 60);
    }

    #[test]
    fn overrides_replace_file_values() {
        let config = AppConfig::default().with_overrides(
            Some(PathBuf::from("/tmp/p.json")),
            Some(PathBuf::from("/tmp/f.ttf")),
            true,
        );
        assert_eq!(config.data_file, PathBuf::from("/tmp/p.json"));
        assert_eq!(config.font_path, Some(PathBuf::from("/tmp/f.ttf")));
        assert!(!config.fullscreen);

        let untouched = AppConfig::default().with_overrides(None, None, false);
        assert_eq!(untouched, AppConfig::default());
    }
}
