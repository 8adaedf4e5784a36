//! In-game scene hosting the four zones

use std::collections::BTreeMap;

use glam::Vec2;

use super::{GameContext, MenuScene, PauseScene, Scene, SceneArgs, Transition};
use crate::consts::SCREEN_WIDTH;
use crate::platform::{Action, ActionState};
use crate::renderer::{Frame, GOLD, WHITE};
use crate::zone::{DemoPilot, ZONE_IDS, ZonePhase, ZoneScene, zone_definition};

pub struct GameScene {
    zones: BTreeMap<u32, ZoneScene>,
    current: Option<u32>,
    pilot: Option<DemoPilot>,
    demo_done: bool,
}

impl Default for GameScene {
    fn default() -> Self {
        Self::new()
    }
}

impl GameScene {
    pub fn new() -> Self {
        let zones = ZONE_IDS
            .into_iter()
            .filter_map(|id| zone_definition(id).map(|def| (id, ZoneScene::new(def))))
            .collect();
        Self {
            zones,
            current: None,
            pilot: None,
            demo_done: false,
        }
    }

    pub fn current_zone(&self) -> Option<&ZoneScene> {
        self.current.and_then(|id| self.zones.get(&id))
    }

    pub fn current_zone_mut(&mut self) -> Option<&mut ZoneScene> {
        self.current.and_then(|id| self.zones.get_mut(&id))
    }

    pub fn current_zone_id(&self) -> Option<u32> {
        self.current
    }

    pub fn in_demo(&self) -> bool {
        self.pilot.is_some()
    }

    /// Leave the current zone, enter `zone_id`, then persist position and
    /// zone with a save. Unknown ids are ignored.
    pub fn set_zone(&mut self, ctx: &mut GameContext, zone_id: u32) -> bool {
        if !self.zones.contains_key(&zone_id) {
            log::warn!("No zone {}", zone_id);
            return false;
        }
        if let Some(zone) = self.current_zone_mut() {
            zone.on_exit(ctx);
        }
        self.current = Some(zone_id);
        let Some(zone) = self.zones.get_mut(&zone_id) else {
            return false;
        };
        zone.on_enter(ctx, SceneArgs::zone(zone_id));

        let data = &mut ctx.session.data;
        data.player.position = zone.player_pos();
        data.player.zone = zone_id;
        data.current_zone = zone_id;
        ctx.save_game();
        true
    }

    fn fly_demo(&mut self, ctx: &mut GameContext) {
        let Some(pilot) = self.pilot else {
            return;
        };
        let Some(zone_id) = self.current else {
            return;
        };

        let zone_done = ctx.session.data.is_zone_complete(zone_id)
            || self.current_zone().map(|z| z.phase()) == Some(ZonePhase::Complete);
        if zone_done {
            match pilot.next_zone(&ctx.session.data) {
                Some(next) => {
                    log::info!("Demo moving on to zone {}", next);
                    self.set_zone(ctx, next);
                }
                None => {
                    if !self.demo_done {
                        log::info!("Demo cleared every zone");
                    }
                    self.demo_done = true;
                }
            }
            return;
        }

        if let Some(zone) = self.current_zone_mut() {
            let input = pilot.steer(zone);
            zone.handle_input(ctx, &input);
        }
    }
}

impl Scene for GameScene {
    fn name(&self) -> &'static str {
        "game"
    }

    fn on_enter(&mut self, ctx: &mut GameContext, args: SceneArgs) {
        if args.demo {
            log::info!("Entering demo mode");
            self.pilot = Some(DemoPilot::new());
            self.demo_done = false;
        }
        match (self.current, args.zone) {
            (_, Some(zone_id)) => {
                self.set_zone(ctx, zone_id);
            }
            (None, None) => {
                let saved = ctx.session.data.current_zone;
                if !self.set_zone(ctx, saved) {
                    self.set_zone(ctx, ZONE_IDS[0]);
                }
            }
            // Back from the pause menu: the zone keeps its stations
            (Some(_), None) => {}
        }
    }

    fn handle_input(&mut self, ctx: &mut GameContext, input: &ActionState) -> Transition {
        if self.pilot.is_some() {
            if input.any_just_pressed() {
                log::info!("Input received, leaving demo mode");
                self.pilot = None;
                return Transition::Replace(Box::new(MenuScene::new()), SceneArgs::default());
            }
            return Transition::None;
        }

        if let Some(zone_id) = Action::ALL
            .iter()
            .filter(|&&action| input.just_pressed(action))
            .find_map(|action| action.zone_id())
        {
            self.set_zone(ctx, zone_id);
            return Transition::None;
        }

        if input.just_pressed(Action::Pause) {
            return Transition::Push(Box::new(PauseScene::new()), SceneArgs::default());
        }

        match self.current_zone_mut() {
            Some(zone) => zone.handle_input(ctx, input),
            None => Transition::None,
        }
    }

    fn update(&mut self, ctx: &mut GameContext, dt: f32) -> Transition {
        self.fly_demo(ctx);
        match self.current_zone_mut() {
            Some(zone) => zone.update(ctx, dt),
            None => Transition::None,
        }
    }

    fn render(&self, frame: &mut Frame) {
        if let Some(zone) = self.current_zone() {
            zone.render(frame);
        }

        let x = SCREEN_WIDTH - 200.0;
        for (row, (&id, zone)) in self.zones.iter().enumerate() {
            let color = if Some(id) == self.current { GOLD } else { WHITE };
            frame.text(
                format!("{}: {}", id, zone.zone_name()),
                Vec2::new(x, 10.0 + row as f32 * 25.0),
                color,
            );
        }
        frame.text("Press 1-4 to switch zones", Vec2::new(x, 115.0), WHITE);
        if self.in_demo() {
            frame.text("DEMO MODE - press any key", Vec2::new(10.0, 100.0), GOLD);
        }
    }

    fn check_completion(&mut self, ctx: &mut GameContext) -> Option<String> {
        self.current_zone_mut()?.check_completion(ctx)
    }

    fn demo_finished(&self) -> bool {
        self.in_demo() && self.demo_done
    }
}
