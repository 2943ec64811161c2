use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::warn;

use crate::controller::Timing;
use crate::difficulty::Difficulty;
use crate::error::GameResult;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Skip the menu and start at this tier
    pub difficulty: Option<Difficulty>,
    pub loading_delay_ms: u64,
    pub correct_delay_ms: u64,
    pub wrong_pulse_ms: u64,
    /// Show the target concept in the status line
    pub show_hints: bool,
}

impl Default for Config {
    fn default() -> Self {
        let timing = Timing::default();
        Self {
            difficulty: None,
            loading_delay_ms: timing.loading_delay.as_millis() as u64,
            correct_delay_ms: timing.correct_delay.as_millis() as u64,
            wrong_pulse_ms: timing.wrong_pulse.as_millis() as u64,
            show_hints: false,
        }
    }
}

impl Config {
    pub fn timing(&self) -> Timing {
        Timing {
            loading_delay: Duration::from_millis(self.loading_delay_ms),
            correct_delay: Duration::from_millis(self.correct_delay_ms),
            wrong_pulse: Duration::from_millis(self.wrong_pulse_ms),
        }
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> GameResult<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = if let Some(pd) = ProjectDirs::from("", "", "letter-twins") {
            pd.config_dir().join("config.json")
        } else {
            PathBuf::from("letter_twins_config.json")
        };
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the file, reporting why it could not be used.
    pub fn try_load(&self) -> GameResult<Config> {
        let bytes = fs::read(&self.path)?;
        Ok(serde_json::from_slice::<Config>(&bytes)?)
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        if !self.path.exists() {
            return Config::default();
        }
        match self.try_load() {
            Ok(cfg) => cfg,
            Err(err) => {
                warn!(path = %self.path.display(), %err, "ignoring unreadable config");
                Config::default()
            }
        }
    }

    fn save(&self, cfg: &Config) -> GameResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg)?;
        fs::write(&self.path, data)?;
        Ok(())
    }
}
