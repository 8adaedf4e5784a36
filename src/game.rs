//! Game loop: input, scene update, autosave
//!
//! The host calls `tick` once per frame with the elapsed time and the
//! sampled input; nothing here blocks.

use crate::config::GameConfig;
use crate::platform::{ActionState, AssetProvider, AudioSink};
use crate::progression::ProgressionPipeline;
use crate::renderer::Frame;
use crate::save::SaveStore;
use crate::scene::{GameContext, GameScene, MenuScene, Scene, SceneArgs, SceneStack, Transition};
use crate::schema::SchemaValidator;
use crate::session::Session;

pub struct Game {
    config: GameConfig,
    session: Session,
    saves: SaveStore,
    audio: Box<dyn AudioSink>,
    assets: Box<dyn AssetProvider>,
    stack: SceneStack,
    frame: Frame,
    autosave_timer: f32,
    running: bool,
}

impl Game {
    /// Build the game from config, restore the latest save, open the menu
    pub fn new(
        config: GameConfig,
        audio: Box<dyn AudioSink>,
        assets: Box<dyn AssetProvider>,
    ) -> Self {
        let saves = SaveStore::new(&config.save_dir)
            .with_validator(SchemaValidator::from_optional_file(
                config.save_schema.as_deref(),
            ))
            .with_max_auto_saves(config.max_auto_saves);
        let pipeline = ProgressionPipeline::with_schema_file(config.profile_schema.as_deref());
        let mut session = Session::new(pipeline, &config.profile_path);
        if !session.restore_latest(&saves) {
            session.data.settings = config.audio;
        }

        let mut game = Self {
            config,
            session,
            saves,
            audio,
            assets,
            stack: SceneStack::new(),
            frame: Frame::new(),
            autosave_timer: 0.0,
            running: true,
        };
        game.audio.apply_settings(&game.session.data.settings);
        game.transition(Transition::Push(Box::new(MenuScene::new()), SceneArgs::default()));
        game
    }

    /// Skip the menu and hand control to the demo pilot
    pub fn start_demo(&mut self) {
        self.transition(Transition::Replace(
            Box::new(GameScene::new()),
            SceneArgs::demo(),
        ));
    }

    fn transition(&mut self, transition: Transition) {
        let mut ctx = GameContext {
            session: &mut self.session,
            saves: &self.saves,
            audio: self.audio.as_mut(),
            assets: self.assets.as_mut(),
            config: &self.config,
        };
        self.stack.apply(&mut ctx, transition);
    }

    /// Advance one frame. Returns false once the game has quit.
    pub fn tick(&mut self, dt: f32, input: &ActionState) -> bool {
        if !self.running {
            return false;
        }

        {
            let mut ctx = GameContext {
                session: &mut self.session,
                saves: &self.saves,
                audio: self.audio.as_mut(),
                assets: self.assets.as_mut(),
                config: &self.config,
            };
            self.stack.handle_input(&mut ctx, input);
            self.stack.update(&mut ctx, dt);
        }

        self.autosave_timer += dt;
        if self.autosave_timer >= self.config.autosave_interval_secs {
            self.autosave_timer -= self.config.autosave_interval_secs;
            log::debug!("Autosave");
            self.session.save(&self.saves, None);
        }

        if self.stack.quit_requested() || self.stack.is_empty() {
            self.quit();
        }
        self.running
    }

    /// Save once and stop
    pub fn quit(&mut self) {
        if !self.running {
            return;
        }
        log::info!("Quitting");
        self.session.save(&self.saves, None);
        self.running = false;
    }

    /// Draw the active scene into the reusable frame
    pub fn render(&mut self) -> &Frame {
        self.frame.reset();
        self.stack.render(&mut self.frame);
        &self.frame
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn saves(&self) -> &SaveStore {
        &self.saves
    }

    pub fn active_scene(&self) -> Option<&'static str> {
        self.stack.active_name()
    }

    pub fn scene_names(&self) -> Vec<&'static str> {
        self.stack.names()
    }

    /// True once a demo run has nothing left to clear
    pub fn demo_finished(&self) -> bool {
        self.stack.active().is_some_and(|scene| scene.demo_finished())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::FRAME_DT;
    use crate::platform::{Action, AssetCatalog, SilentAudio};
    use std::fs;
    use std::path::Path;

    fn config_in(dir: &Path) -> GameConfig {
        let profile = dir.join("resume.json");
        fs::write(&profile, include_str!("../data/resume.json")).unwrap();
        GameConfig {
            save_dir: dir.join("saves"),
            save_schema: None,
            profile_path: profile,
            profile_schema: None,
            autosave_interval_secs: 1.0,
            idle_demo_timeout_secs: 2.0,
            ..GameConfig::default()
        }
    }

    fn game_in(dir: &Path) -> Game {
        Game::new(
            config_in(dir),
            Box::new(SilentAudio),
            Box::new(AssetCatalog::new(dir.join("assets"))),
        )
    }

    #[test]
    fn test_starts_on_menu_with_profile_progress() {
        let dir = tempfile::tempdir().unwrap();
        let game = game_in(dir.path());
        assert_eq!(game.active_scene(), Some("menu"));
        let model = game.session().profile.clone().unwrap();
        assert_eq!(game.session().data.player.level, model.player.current_level);
    }

    #[test]
    fn test_autosave_on_interval() {
        let dir = tempfile::tempdir().unwrap();
        let mut game = game_in(dir.path());
        let idle = ActionState::default();
        for _ in 0..30 {
            game.tick(FRAME_DT, &idle);
        }
        assert!(game.saves().list_saves().is_empty());
        for _ in 0..40 {
            game.tick(FRAME_DT, &idle);
        }
        assert_eq!(game.saves().list_saves().len(), 1);
    }

    #[test]
    fn test_idle_menu_hands_over_to_demo() {
        let dir = tempfile::tempdir().unwrap();
        let mut game = game_in(dir.path());
        let idle = ActionState::default();
        for _ in 0..150 {
            game.tick(FRAME_DT, &idle);
        }
        assert_eq!(game.scene_names(), vec!["menu", "game"]);

        game.tick(FRAME_DT, &ActionState::pressed(&[Action::Confirm]));
        assert_eq!(game.scene_names(), vec!["menu"]);
    }

    #[test]
    fn test_pause_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut game = game_in(dir.path());
        game.tick(FRAME_DT, &ActionState::pressed(&[Action::Confirm]));
        assert_eq!(game.active_scene(), Some("game"));

        game.tick(FRAME_DT, &ActionState::pressed(&[Action::Pause]));
        assert_eq!(game.scene_names(), vec!["game", "pause"]);

        game.tick(FRAME_DT, &ActionState::pressed(&[Action::Pause]));
        assert_eq!(game.scene_names(), vec!["game"]);
    }

    #[test]
    fn test_quit_saves_once_and_stops() {
        let dir = tempfile::tempdir().unwrap();
        let mut game = game_in(dir.path());
        assert!(!game.tick(FRAME_DT, &ActionState::pressed(&[Action::Quit])));
        assert!(!game.is_running());
        assert_eq!(game.saves().list_saves().len(), 1);

        game.quit();
        assert!(!game.tick(FRAME_DT, &ActionState::default()));
        assert_eq!(game.saves().list_saves().len(), 1);
    }

    #[test]
    fn test_restart_restores_progress() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut game = game_in(dir.path());
            game.start_demo();
            let idle = ActionState::default();
            while !game.demo_finished() {
                game.tick(FRAME_DT, &idle);
            }
            game.quit();
        }
        let game = game_in(dir.path());
        let mut completed = game.session().data.completed_zones.clone();
        completed.sort_unstable();
        assert_eq!(completed, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_render_draws_active_scene() {
        let dir = tempfile::tempdir().unwrap();
        let mut game = game_in(dir.path());
        let frame = game.render();
        assert!(frame.texts().any(|t| t == "Portfolio Quest"));
    }
}
