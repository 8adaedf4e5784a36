//! A single zone as a scene: player movement, station interaction, HUD

use glam::Vec2;

use super::ZoneDefinition;
use super::quest::{QuestTracker, StationCompletion};
use crate::consts::*;
use crate::clamp_to_world;
use crate::platform::{Action, ActionState, ImageHandle};
use crate::progression::Avatar;
use crate::renderer::{Frame, GOLD, GREEN, WHITE};
use crate::scene::{GameContext, Scene, SceneArgs, Transition};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ZonePhase {
    #[default]
    NotEntered,
    InProgress,
    Complete,
}

#[derive(Debug, Clone)]
struct Message {
    text: String,
    remaining: f32,
}

pub struct ZoneScene {
    definition: Box<dyn ZoneDefinition>,
    phase: ZonePhase,
    /// Present only while the zone is entered
    quests: Option<QuestTracker>,
    player_pos: Vec2,
    heading: Vec2,
    camera: Vec2,
    message: Option<Message>,
    station_sprites: Vec<ImageHandle>,
    player_sprite: Option<ImageHandle>,
    // Cached for render, which has no context
    hud_level: u32,
    hud_xp: u64,
}

impl ZoneScene {
    pub fn new(definition: Box<dyn ZoneDefinition>) -> Self {
        Self {
            definition,
            phase: ZonePhase::NotEntered,
            quests: None,
            player_pos: Vec2::new(PLAYER_START.0, PLAYER_START.1),
            heading: Vec2::ZERO,
            camera: Vec2::ZERO,
            message: None,
            station_sprites: Vec::new(),
            player_sprite: None,
            hud_level: 1,
            hud_xp: 0,
        }
    }

    pub fn id(&self) -> u32 {
        self.definition.id()
    }

    pub fn zone_name(&self) -> &'static str {
        self.definition.name()
    }

    pub fn phase(&self) -> ZonePhase {
        self.phase
    }

    pub fn quests(&self) -> Option<&QuestTracker> {
        self.quests.as_ref()
    }

    pub fn player_pos(&self) -> Vec2 {
        self.player_pos
    }

    pub fn player_center(&self) -> Vec2 {
        self.player_pos + Vec2::splat(PLAYER_SIZE / 2.0)
    }

    /// Teleport the player (top-left corner), clamped to the world
    pub fn place_player(&mut self, pos: Vec2) {
        self.player_pos = clamp_to_world(pos, PLAYER_SIZE);
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_ref().map(|m| m.text.as_str())
    }

    pub fn show_message(&mut self, text: impl Into<String>) {
        self.message = Some(Message {
            text: text.into(),
            remaining: MESSAGE_DURATION,
        });
    }

    /// Interact with whatever is in reach; awards XP for each completion
    pub fn interact(&mut self, ctx: &mut GameContext) -> Vec<StationCompletion> {
        let center = self.player_center();
        let Some(quests) = self.quests.as_mut() else {
            return Vec::new();
        };
        let done = quests.try_interact(center);

        for completion in &done {
            let player = &mut ctx.session.data.player;
            let gained = player.award_experience(completion.xp);
            log::info!(
                "Zone {}: {} (+{} XP)",
                self.definition.id(),
                completion.message,
                completion.xp
            );
            if gained > 0 {
                log::info!("Level up! Now level {}", player.level);
            }
            ctx.play_sound(completion.sound);
            self.show_message(completion.message.clone());
        }

        if !done.is_empty() {
            if let Some(text) = self.check_completion(ctx) {
                self.show_message(text);
            }
        }
        self.sync_hud(ctx);
        done
    }

    fn sync_hud(&mut self, ctx: &GameContext) {
        self.hud_level = ctx.session.data.player.level;
        self.hud_xp = ctx.session.data.player.experience;
    }

    fn follow_camera(&mut self) {
        let target = self.player_pos - Vec2::new(SCREEN_WIDTH, SCREEN_HEIGHT) / 2.0;
        self.camera = Vec2::new(
            target.x.clamp(0.0, WORLD_WIDTH - SCREEN_WIDTH),
            target.y.clamp(0.0, WORLD_HEIGHT - SCREEN_HEIGHT),
        );
    }
}

impl Scene for ZoneScene {
    fn name(&self) -> &'static str {
        "zone"
    }

    fn on_enter(&mut self, ctx: &mut GameContext, _args: SceneArgs) {
        let id = self.definition.id();
        let stations = self.definition.stations();

        self.station_sprites = stations
            .iter()
            .map(|s| ctx.assets.image(&s.kind.sprite()))
            .collect();
        let avatar = ctx
            .session
            .profile
            .as_ref()
            .map_or(Avatar::default(), |model| model.player.avatar);
        self.player_sprite = Some(ctx.assets.image(&avatar.sprite_path()));

        // Station progress never survives a re-entry
        self.quests = Some(QuestTracker::new(id, stations));
        self.phase = ZonePhase::InProgress;
        self.place_player(ctx.session.data.player.position);
        self.heading = Vec2::ZERO;
        self.message = None;
        self.follow_camera();
        self.sync_hud(ctx);

        ctx.session.data.player.zone = id;
        log::info!(
            "Entered zone {} ({}){}",
            id,
            self.definition.name(),
            if ctx.session.data.is_zone_complete(id) {
                ", already complete"
            } else {
                ""
            }
        );
    }

    fn on_exit(&mut self, ctx: &mut GameContext) {
        ctx.session.data.player.position = self.player_pos;
        self.quests = None;
        self.phase = ZonePhase::NotEntered;
        self.station_sprites.clear();
        self.message = None;
        self.heading = Vec2::ZERO;
    }

    fn handle_input(&mut self, ctx: &mut GameContext, input: &ActionState) -> Transition {
        let axis = |neg: Action, pos: Action| {
            input.is_held(pos) as i32 as f32 - input.is_held(neg) as i32 as f32
        };
        self.heading = Vec2::new(
            axis(Action::MoveLeft, Action::MoveRight),
            axis(Action::MoveUp, Action::MoveDown),
        );

        if input.just_pressed(Action::Interact) {
            self.interact(ctx);
        }
        Transition::None
    }

    fn update(&mut self, ctx: &mut GameContext, dt: f32) -> Transition {
        if self.quests.is_none() {
            return Transition::None;
        }

        // Speed is tuned per 1/60 s frame
        let step = self.heading.normalize_or_zero() * PLAYER_SPEED * dt * FPS;
        if step != Vec2::ZERO {
            self.place_player(self.player_pos + step);
            ctx.session.data.player.position = self.player_pos;
        }
        self.follow_camera();

        if let Some(message) = &mut self.message {
            message.remaining -= dt;
            if message.remaining <= 0.0 {
                self.message = None;
            }
        }
        self.sync_hud(ctx);
        Transition::None
    }

    fn render(&self, frame: &mut Frame) {
        frame.clear(self.definition.background());
        frame.camera = self.camera;

        if let Some(quests) = &self.quests {
            for (station, sprite) in quests.stations().iter().zip(&self.station_sprites) {
                frame.sprite_world(sprite.clone(), station.pos, Vec2::splat(station.size()));
                if station.is_completed() {
                    frame.rect(
                        station.pos - self.camera,
                        Vec2::new(station.size(), 4.0),
                        GREEN,
                    );
                }
            }
        }
        if let Some(sprite) = &self.player_sprite {
            frame.sprite_world(sprite.clone(), self.player_pos, Vec2::splat(PLAYER_SIZE));
        }

        frame.text(
            format!("Zone {}: {}", self.definition.id(), self.definition.name()),
            Vec2::new(10.0, 10.0),
            WHITE,
        );
        frame.text(format!("Level: {}", self.hud_level), Vec2::new(10.0, 40.0), WHITE);
        frame.text(format!("XP: {}", self.hud_xp), Vec2::new(10.0, 70.0), WHITE);
        if let Some(quests) = &self.quests {
            frame.text(
                quests.progress_line(),
                Vec2::new(10.0, SCREEN_HEIGHT - 40.0),
                WHITE,
            );
        }
        if let Some(message) = &self.message {
            frame.text(
                message.text.clone(),
                Vec2::new(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT - 50.0),
                GOLD,
            );
        }
    }

    fn check_completion(&mut self, ctx: &mut GameContext) -> Option<String> {
        let quests = self.quests.as_ref()?;
        if quests.is_complete() {
            self.phase = ZonePhase::Complete;
        }
        let text = quests.check_completion(&mut ctx.session.data)?;
        log::info!("{}", text);
        Some(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::test_support::Harness;
    use crate::zone::{DataCenter, EnterpriseHub, MlAcademy};

    fn entered(harness: &mut Harness, zone: ZoneScene) -> ZoneScene {
        let mut zone = zone;
        zone.on_enter(&mut harness.ctx(), SceneArgs::default());
        zone
    }

    /// Walk onto each station in turn and press interact
    fn clear_zone(harness: &mut Harness, zone: &mut ZoneScene) {
        let centers: Vec<Vec2> = zone
            .quests()
            .unwrap()
            .stations()
            .iter()
            .map(|s| s.center())
            .collect();
        for center in centers {
            zone.place_player(center - Vec2::splat(PLAYER_SIZE / 2.0));
            zone.interact(&mut harness.ctx());
        }
    }

    #[test]
    fn test_enter_reads_player_position() {
        let mut harness = Harness::new();
        harness.session.data.player.position = Vec2::new(300.0, 320.0);
        let zone = entered(&mut harness, ZoneScene::new(Box::new(EnterpriseHub)));
        assert_eq!(zone.phase(), ZonePhase::InProgress);
        assert_eq!(zone.player_pos(), Vec2::new(300.0, 320.0));
        assert_eq!(zone.quests().unwrap().stations().len(), 6);
    }

    #[test]
    fn test_station_awards_xp_once() {
        let mut harness = Harness::new();
        let mut zone = entered(&mut harness, ZoneScene::new(Box::new(EnterpriseHub)));
        // Centre (232, 232) is the first gherkin station's centre
        zone.place_player(Vec2::new(216.0, 216.0));

        let done = zone.interact(&mut harness.ctx());
        assert_eq!(done.len(), 1);
        assert_eq!(zone.message(), Some("Gherkin puzzle completed: User login"));
        assert_eq!(harness.session.data.player.experience, 50);
        assert_eq!(harness.played(), vec!["gherkin_complete.wav"]);

        assert!(zone.interact(&mut harness.ctx()).is_empty());
        assert_eq!(harness.session.data.player.experience, 50);
        assert_eq!(zone.quests().unwrap().progress_line(), "Gherkin: 1/3  APIs: 0/3");
    }

    #[test]
    fn test_clearing_zone_records_completion_once() {
        let mut harness = Harness::new();
        let mut zone = entered(&mut harness, ZoneScene::new(Box::new(MlAcademy)));
        clear_zone(&mut harness, &mut zone);

        assert_eq!(zone.phase(), ZonePhase::Complete);
        assert_eq!(zone.message(), Some("Zone 3 completed!"));
        assert_eq!(harness.session.data.completed_zones, vec![3]);
        // 3 * 70 + 3 * 90 = 480 XP pays the 100, 150 and 225 tiers
        assert_eq!(harness.session.data.player.level, 4);
        assert_eq!(harness.session.data.player.experience, 5);

        assert_eq!(zone.check_completion(&mut harness.ctx()), None);
        assert_eq!(harness.session.data.completed_zones, vec![3]);
    }

    #[test]
    fn test_reentry_resets_stations_but_keeps_completion() {
        let mut harness = Harness::new();
        let mut zone = entered(&mut harness, ZoneScene::new(Box::new(EnterpriseHub)));
        clear_zone(&mut harness, &mut zone);
        zone.on_exit(&mut harness.ctx());
        assert!(zone.quests().is_none());
        assert_eq!(zone.phase(), ZonePhase::NotEntered);

        zone.on_enter(&mut harness.ctx(), SceneArgs::default());
        let quests = zone.quests().unwrap();
        assert!(quests.stations().iter().all(|s| !s.is_completed()));
        assert_eq!(zone.phase(), ZonePhase::InProgress);
        assert!(harness.session.data.is_zone_complete(1));

        clear_zone(&mut harness, &mut zone);
        assert_eq!(harness.session.data.completed_zones, vec![1]);
    }

    #[test]
    fn test_leaving_zone_returns_to_not_entered() {
        let mut harness = Harness::new();
        let mut zone = ZoneScene::new(Box::new(DataCenter));
        assert_eq!(zone.phase(), ZonePhase::NotEntered);
        zone.on_enter(&mut harness.ctx(), SceneArgs::default());
        assert_eq!(zone.phase(), ZonePhase::InProgress);
        zone.on_exit(&mut harness.ctx());
        assert_eq!(zone.phase(), ZonePhase::NotEntered);
    }

    #[test]
    fn test_movement_is_clamped_and_synced() {
        let mut harness = Harness::new();
        let mut zone = entered(&mut harness, ZoneScene::new(Box::new(EnterpriseHub)));
        zone.place_player(Vec2::new(2.0, 100.0));

        let left = ActionState::pressed(&[Action::MoveLeft]);
        zone.handle_input(&mut harness.ctx(), &left);
        zone.update(&mut harness.ctx(), FRAME_DT);
        assert_eq!(zone.player_pos().x, 0.0);
        assert_eq!(harness.session.data.player.position, zone.player_pos());

        let down = ActionState::pressed(&[Action::MoveDown]);
        zone.handle_input(&mut harness.ctx(), &down);
        zone.update(&mut harness.ctx(), FRAME_DT);
        assert!((zone.player_pos().y - (100.0 + PLAYER_SPEED)).abs() < 1e-3);
    }

    #[test]
    fn test_hud_and_message_expiry() {
        let mut harness = Harness::new();
        let mut zone = entered(&mut harness, ZoneScene::new(Box::new(EnterpriseHub)));
        zone.show_message("hello");

        let mut frame = Frame::new();
        zone.render(&mut frame);
        let texts: Vec<&str> = frame.texts().collect();
        assert!(texts.contains(&"Zone 1: Enterprise Hub"));
        assert!(texts.contains(&"Level: 1"));
        assert!(texts.contains(&"hello"));

        zone.update(&mut harness.ctx(), MESSAGE_DURATION + 0.1);
        assert_eq!(zone.message(), None);
    }
}
