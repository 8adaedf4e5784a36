//! Game configuration and preferences
//!
//! Loaded once at startup from a JSON file. Anything missing falls back to
//! the defaults below.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Volume levels, persisted with every save
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
        }
    }
}

impl AudioSettings {
    /// Effective effect volume after the master level
    pub fn effective_sfx(&self) -> f32 {
        (self.master_volume * self.sfx_volume).clamp(0.0, 1.0)
    }

    pub fn effective_music(&self) -> f32 {
        (self.master_volume * self.music_volume).clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Directory holding save files (created on first use)
    pub save_dir: PathBuf,
    /// Schema every loaded save must satisfy
    pub save_schema: Option<PathBuf>,
    /// Profile document fed to the progression pipeline
    pub profile_path: PathBuf,
    pub profile_schema: Option<PathBuf>,

    // === Timers ===
    pub autosave_interval_secs: f32,
    /// Seconds without input on the menu before demo mode takes over
    pub idle_demo_timeout_secs: f32,

    /// Auto-named saves kept before the oldest are pruned
    pub max_auto_saves: usize,

    pub audio: AudioSettings,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            save_dir: PathBuf::from("saves"),
            save_schema: Some(PathBuf::from("schemas/save_schema.json")),
            profile_path: PathBuf::from("data/resume.json"),
            profile_schema: Some(PathBuf::from("schemas/portfolio_schema.json")),

            autosave_interval_secs: 30.0,
            idle_demo_timeout_secs: 60.0,

            max_auto_saves: 10,

            audio: AudioSettings::default(),
        }
    }
}

impl GameConfig {
    /// Load config from a JSON file, falling back to defaults
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(config) => {
                    log::info!("Loaded config from {}", path.display());
                    config
                }
                Err(err) => {
                    log::warn!("Ignoring invalid config {}: {}", path.display(), err);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("No config at {}, using defaults", path.display());
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_config_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = GameConfig::load(dir.path().join("config.json"));
        assert_eq!(config, GameConfig::default());
        assert_eq!(config.autosave_interval_secs, 30.0);
        assert_eq!(config.idle_demo_timeout_secs, 60.0);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"save_dir": "elsewhere", "audio": {"music_volume": 0.2}}"#).unwrap();

        let config = GameConfig::load(&path);
        assert_eq!(config.save_dir, PathBuf::from("elsewhere"));
        assert_eq!(config.max_auto_saves, 10);
        assert_eq!(config.audio.music_volume, 0.2);
        assert_eq!(config.audio.master_volume, 0.8);
    }

    #[test]
    fn test_invalid_config_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "not json").unwrap();
        assert_eq!(GameConfig::load(&path), GameConfig::default());
    }

    #[test]
    fn test_effective_volumes() {
        let audio = AudioSettings {
            master_volume: 0.5,
            sfx_volume: 0.5,
            music_volume: 2.0,
        };
        assert_eq!(audio.effective_sfx(), 0.25);
        assert_eq!(audio.effective_music(), 1.0);
    }
}
