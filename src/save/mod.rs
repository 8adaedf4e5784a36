//! Save/load persistence with corruption quarantine
//!
//! Features:
//! - Versioned JSON envelope (`version`, `timestamp`, opaque `data`)
//! - Write-then-rename so a failed save never leaves a torn file
//! - Schema-invalid saves are moved aside to `<name>.json.bak`
//! - Retention for auto-named saves
//!
//! Nothing here returns an error to the caller: saves report `false`, loads
//! report `None`, and the reason goes to the log.

pub mod game_data;

pub use game_data::{GameData, PlayerData};

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::consts::SAVE_FORMAT_VERSION;
use crate::schema::SchemaValidator;

/// Prefix of generated save names
pub const AUTO_SAVE_PREFIX: &str = "save_";
/// Local-time stamp following the prefix
const AUTO_SAVE_STAMP: &str = "%Y%m%d_%H%M%S";
/// Length of a rendered `AUTO_SAVE_STAMP`
const AUTO_SAVE_STAMP_LEN: usize = 15;

/// What actually lands on disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveSnapshot {
    pub version: String,
    /// Unix time in seconds
    pub timestamp: f64,
    pub data: Value,
}

#[derive(Debug, Error)]
enum SaveError {
    #[error("invalid save name `{0}`")]
    InvalidName(String),
    #[error("failed to write {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to encode save: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug)]
pub struct SaveStore {
    dir: PathBuf,
    version: String,
    validator: SchemaValidator,
    max_auto_saves: usize,
}

impl SaveStore {
    /// Store rooted at `dir`. The directory is created on first use.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            version: SAVE_FORMAT_VERSION.to_string(),
            validator: SchemaValidator::disabled(),
            max_auto_saves: 10,
        }
    }

    /// Validate every loaded snapshot against this schema
    pub fn with_validator(mut self, validator: SchemaValidator) -> Self {
        self.validator = validator;
        self
    }

    pub fn with_max_auto_saves(mut self, max: usize) -> Self {
        self.max_auto_saves = max.max(1);
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.json"))
    }

    /// Wrap `data` in a snapshot and write it under `name` (or a generated
    /// timestamped name). Returns false on any failure.
    pub fn save(&self, data: &Value, name: Option<&str>) -> bool {
        let result = match name {
            Some(name) => self.write_snapshot(name, data),
            None => {
                let name = self.auto_name();
                self.write_snapshot(&name, data).inspect(|_| self.prune_auto_saves(&name))
            }
        };
        match result {
            Ok(path) => {
                log::info!("Game saved to {}", path.display());
                true
            }
            Err(err) => {
                log::error!("Failed to save game: {}", err);
                false
            }
        }
    }

    /// Load the `data` payload of save `name`.
    ///
    /// Missing or unparseable files yield `None`. A schema failure also moves
    /// the file aside to `<name>.json.bak`. A version mismatch only warns.
    pub fn load(&self, name: &str) -> Option<Value> {
        if !is_valid_name(name) {
            log::error!("Refusing to load invalid save name `{}`", name);
            return None;
        }
        let path = self.path_for(name);
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                log::warn!("Save file not found at {}", path.display());
                return None;
            }
            Err(err) => {
                log::error!("Failed to read {}: {}", path.display(), err);
                return None;
            }
        };

        let raw: Value = match serde_json::from_str(&text) {
            Ok(raw) => raw,
            Err(err) => {
                log::error!("Failed to load game from {}: {}", path.display(), err);
                return None;
            }
        };

        let violations = self.validator.validate(&raw);
        if !violations.is_empty() {
            for violation in &violations {
                log::warn!("{}: {}", path.display(), violation);
            }
            self.quarantine(&path);
            return None;
        }

        let snapshot: SaveSnapshot = match serde_json::from_value(raw) {
            Ok(snapshot) => snapshot,
            Err(err) => {
                log::error!("{} is not a save snapshot: {}", path.display(), err);
                return None;
            }
        };

        if snapshot.version != self.version {
            log::warn!(
                "Save file version '{}' does not match current version '{}'; loading as-is",
                snapshot.version,
                self.version
            );
        }
        Some(snapshot.data)
    }

    /// Save names, most recently modified first
    pub fn list_saves(&self) -> Vec<String> {
        let mut saves = self.scan();
        saves.sort_by(|a, b| {
            b.1.cmp(&a.1)
                .then_with(|| auto_save_order(&b.0).cmp(&auto_save_order(&a.0)))
                .then_with(|| b.0.cmp(&a.0))
        });
        saves.into_iter().map(|(name, _)| name).collect()
    }

    /// Most recently modified save, if any
    pub fn latest(&self) -> Option<String> {
        self.list_saves().into_iter().next()
    }

    pub fn delete(&self, name: &str) -> bool {
        if !is_valid_name(name) {
            return false;
        }
        match fs::remove_file(self.path_for(name)) {
            Ok(()) => true,
            Err(err) => {
                log::warn!("Failed to delete save `{}`: {}", name, err);
                false
            }
        }
    }

    fn ensure_dir(&self) -> Result<(), SaveError> {
        fs::create_dir_all(&self.dir).map_err(|source| SaveError::Io {
            path: self.dir.clone(),
            source,
        })
    }

    fn write_snapshot(&self, name: &str, data: &Value) -> Result<PathBuf, SaveError> {
        if !is_valid_name(name) {
            return Err(SaveError::InvalidName(name.to_string()));
        }
        self.ensure_dir()?;

        let snapshot = SaveSnapshot {
            version: self.version.clone(),
            timestamp: chrono::Utc::now().timestamp_millis() as f64 / 1000.0,
            data: data.clone(),
        };
        let final_path = self.path_for(name);
        let tmp_path = self.dir.join(format!("{name}.json.tmp"));

        let io_err = |path: &Path| {
            let path = path.to_path_buf();
            move |source| SaveError::Io { path, source }
        };

        {
            let file = File::create(&tmp_path).map_err(io_err(&tmp_path))?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, &snapshot)?;
            writer.flush().map_err(io_err(&tmp_path))?;
            writer
                .get_ref()
                .sync_all()
                .map_err(io_err(&tmp_path))?;
        }

        if let Err(source) = fs::rename(&tmp_path, &final_path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(SaveError::Io {
                path: final_path,
                source,
            });
        }
        Ok(final_path)
    }

    /// `save_YYYYmmdd_HHMMSS`, suffixed `_NNN` past the highest save already
    /// written in that second so generated names only ever increase
    fn auto_name(&self) -> String {
        let base = format!(
            "{}{}",
            AUTO_SAVE_PREFIX,
            chrono::Local::now().format(AUTO_SAVE_STAMP)
        );
        let taken = self
            .scan()
            .into_iter()
            .filter_map(|(name, _)| {
                let (stamp, n) = auto_save_order(&name);
                (stamp == base).then_some(n)
            })
            .max();
        match taken {
            Some(n) => format!("{base}_{:03}", n + 1),
            None => base,
        }
    }

    /// Drop the oldest auto-named saves beyond the retention limit. `current`
    /// was just written and is never dropped.
    fn prune_auto_saves(&self, current: &str) {
        let mut auto: Vec<String> = self
            .scan()
            .into_iter()
            .map(|(name, _)| name)
            .filter(|name| name.starts_with(AUTO_SAVE_PREFIX))
            .collect();
        auto.sort_by(|a, b| {
            auto_save_order(b)
                .cmp(&auto_save_order(a))
                .then_with(|| b.cmp(a))
        });
        for stale in auto
            .iter()
            .skip(self.max_auto_saves)
            .filter(|name| name.as_str() != current)
        {
            if self.delete(stale) {
                log::debug!("Pruned old save `{}`", stale);
            }
        }
    }

    fn quarantine(&self, path: &Path) {
        let backup = path.with_extension("json.bak");
        if backup.exists() {
            if let Err(err) = fs::remove_file(&backup) {
                log::warn!("Failed to remove old backup {}: {}", backup.display(), err);
            }
        }
        match fs::rename(path, &backup) {
            Ok(()) => log::warn!(
                "Save {} failed validation, moved to {}",
                path.display(),
                backup.display()
            ),
            Err(err) => log::error!("Failed to quarantine {}: {}", path.display(), err),
        }
    }

    /// (name, modified time) of every `*.json` save in the directory
    fn scan(&self) -> Vec<(String, SystemTime)> {
        let Ok(entries) = fs::read_dir(&self.dir) else {
            return Vec::new();
        };
        entries
            .filter_map(Result::ok)
            .filter_map(|entry| {
                let path = entry.path();
                if path.extension().and_then(|e| e.to_str()) != Some("json") {
                    return None;
                }
                let name = path.file_stem()?.to_str()?.to_string();
                let modified = entry
                    .metadata()
                    .and_then(|m| m.modified())
                    .unwrap_or(SystemTime::UNIX_EPOCH);
                Some((name, modified))
            })
            .collect()
    }
}

/// Chronological key of a generated name: (prefix + stamp, same-second counter)
fn auto_save_order(name: &str) -> (&str, u32) {
    let stamp_end = AUTO_SAVE_PREFIX.len() + AUTO_SAVE_STAMP_LEN;
    match (name.get(..stamp_end), name.get(stamp_end..)) {
        (Some(stamp), Some(rest)) => {
            let n = rest
                .strip_prefix('_')
                .and_then(|n| n.parse().ok())
                .unwrap_or(0);
            (stamp, n)
        }
        _ => (name, 0),
    }
}

fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && !name.contains(['/', '\\']) && name != "." && name != ".."
}
