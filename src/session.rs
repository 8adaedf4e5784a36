//! Live game state shared by every scene
//!
//! One session exists per running game. It owns the mutable `GameData`
//! (what gets saved) and the read-only progression derived from the profile.

use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::error::PipelineError;
use crate::progression::{ProgressionModel, ProgressionPipeline};
use crate::save::{GameData, SaveStore};

#[derive(Debug)]
pub struct Session {
    pub data: GameData,
    /// Set once the profile pipeline has run successfully
    pub profile: Option<Rc<ProgressionModel>>,
    pipeline: ProgressionPipeline,
    profile_path: PathBuf,
}

impl Session {
    pub fn new(pipeline: ProgressionPipeline, profile_path: impl Into<PathBuf>) -> Self {
        Self {
            data: GameData::default(),
            profile: None,
            pipeline,
            profile_path: profile_path.into(),
        }
    }

    pub fn profile_path(&self) -> &Path {
        &self.profile_path
    }

    /// Run (or reuse) the profile pipeline
    pub fn load_profile(&mut self) -> Result<Rc<ProgressionModel>, PipelineError> {
        let model = self.pipeline.load_and_transform(&self.profile_path)?;
        self.profile = Some(Rc::clone(&model));
        Ok(model)
    }

    /// Replace the live data with a fresh game seeded from the profile.
    ///
    /// A missing or broken profile degrades to a level 1 start.
    pub fn start_fresh(&mut self) {
        self.data = match self.load_profile() {
            Ok(model) => GameData::from_profile(&model.player),
            Err(err) => {
                log::warn!("Starting without profile progression: {}", err);
                GameData::default()
            }
        };
    }

    /// Restore the most recent save, or start fresh if there is none usable
    pub fn restore_latest(&mut self, store: &SaveStore) -> bool {
        let restored = store
            .latest()
            .and_then(|name| store.load(&name).map(|value| (name, value)))
            .and_then(|(name, value)| match GameData::from_value(value) {
                Ok(data) => {
                    log::info!("Restored save `{}`", name);
                    Some(data)
                }
                Err(err) => {
                    log::warn!("Save `{}` has an unusable payload: {}", name, err);
                    None
                }
            });

        match restored {
            Some(data) => {
                self.data = data;
                if let Err(err) = self.load_profile() {
                    log::warn!("Profile unavailable: {}", err);
                }
                true
            }
            None => {
                self.start_fresh();
                false
            }
        }
    }

    /// Persist the live data under `name`, or a generated name
    pub fn save(&self, store: &SaveStore, name: Option<&str>) -> bool {
        match self.data.to_value() {
            Ok(value) => store.save(&value, name),
            Err(err) => {
                log::error!("Failed to encode game data: {}", err);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const SAMPLE: &str = include_str!("../data/resume.json");

    fn session_in(dir: &Path) -> Session {
        let path = dir.join("resume.json");
        fs::write(&path, SAMPLE).unwrap();
        Session::new(ProgressionPipeline::default(), path)
    }

    #[test]
    fn test_fresh_start_seeds_from_profile() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session_in(dir.path());
        session.start_fresh();

        let model = session.profile.clone().unwrap();
        assert_eq!(session.data.player.level, model.player.current_level);
        assert_eq!(session.data.player.experience, model.player.experience_points);
        assert!(session.data.completed_zones.is_empty());
    }

    #[test]
    fn test_missing_profile_starts_at_level_one() {
        let dir = tempfile::tempdir().unwrap();
        let mut session =
            Session::new(ProgressionPipeline::default(), dir.path().join("missing.json"));
        session.start_fresh();
        assert!(session.profile.is_none());
        assert_eq!(session.data, GameData::default());
    }

    #[test]
    fn test_restore_latest_save() {
        let dir = tempfile::tempdir().unwrap();
        let store = SaveStore::new(dir.path().join("saves"));

        let mut first = session_in(dir.path());
        first.start_fresh();
        first.data.record_zone_complete(3);
        first.data.current_zone = 3;
        assert!(first.save(&store, Some("slot")));

        let mut second = session_in(dir.path());
        assert!(second.restore_latest(&store));
        assert_eq!(second.data, first.data);
        assert!(second.profile.is_some());
    }

    #[test]
    fn test_corrupt_latest_save_falls_back_to_fresh() {
        let dir = tempfile::tempdir().unwrap();
        let store = SaveStore::new(dir.path().join("saves"));
        fs::create_dir_all(store.dir()).unwrap();
        fs::write(store.path_for("broken"), "{{{").unwrap();

        let mut session = session_in(dir.path());
        assert!(!session.restore_latest(&store));
        assert!(session.data.completed_zones.is_empty());
        assert!(session.profile.is_some());
    }
}
