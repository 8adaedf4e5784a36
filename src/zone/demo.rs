//! Demo pilot: plays the zones when nobody is at the keyboard

use glam::Vec2;

use super::ZONE_IDS;
use super::scene::ZoneScene;
use crate::consts::PLAYER_SPEED;
use crate::platform::{Action, ActionState};
use crate::save::GameData;

/// Steers toward the nearest open station and interacts once in reach
#[derive(Debug, Clone, Copy)]
pub struct DemoPilot {
    /// Distance per axis treated as "lined up"
    deadband: f32,
}

impl Default for DemoPilot {
    fn default() -> Self {
        Self::new()
    }
}

impl DemoPilot {
    pub fn new() -> Self {
        Self {
            deadband: PLAYER_SPEED,
        }
    }

    /// Synthetic input for this tick
    pub fn steer(&self, zone: &ZoneScene) -> ActionState {
        let Some(quests) = zone.quests() else {
            return ActionState::default();
        };
        let center = zone.player_center();
        let Some(target) = quests.nearest_open(center) else {
            return ActionState::default();
        };

        if target.in_reach(center) {
            return ActionState::pressed(&[Action::Interact]);
        }

        let dir = self.heading(center, target.center());
        let mut state = ActionState::default();
        state.set(Action::MoveRight, dir.x > 0.0);
        state.set(Action::MoveLeft, dir.x < 0.0);
        state.set(Action::MoveDown, dir.y > 0.0);
        state.set(Action::MoveUp, dir.y < 0.0);
        state
    }

    /// First zone not yet recorded as complete
    pub fn next_zone(&self, data: &GameData) -> Option<u32> {
        ZONE_IDS.into_iter().find(|&id| !data.is_zone_complete(id))
    }

    /// Unit step per axis from `from` toward `to`
    pub fn heading(&self, from: Vec2, to: Vec2) -> Vec2 {
        let delta = to - from;
        let axis = |d: f32| {
            if d > self.deadband {
                1.0
            } else if d < -self.deadband {
                -1.0
            } else {
                0.0
            }
        };
        Vec2::new(axis(delta.x), axis(delta.y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::FRAME_DT;
    use crate::scene::test_support::Harness;
    use crate::scene::{Scene, SceneArgs};
    use crate::zone::{DataCenter, ZonePhase};

    #[test]
    fn test_pilot_clears_a_zone() {
        let mut harness = Harness::new();
        let mut zone = ZoneScene::new(Box::new(DataCenter));
        zone.on_enter(&mut harness.ctx(), SceneArgs::default());
        let pilot = DemoPilot::new();

        for _ in 0..10_000 {
            if zone.phase() == ZonePhase::Complete {
                break;
            }
            let input = pilot.steer(&zone);
            zone.handle_input(&mut harness.ctx(), &input);
            zone.update(&mut harness.ctx(), FRAME_DT);
        }

        assert_eq!(zone.phase(), ZonePhase::Complete);
        assert_eq!(harness.session.data.completed_zones, vec![2]);
        assert_eq!(pilot.steer(&zone), ActionState::default());
    }

    #[test]
    fn test_next_zone_skips_completed() {
        let pilot = DemoPilot::new();
        let mut data = GameData::default();
        assert_eq!(pilot.next_zone(&data), Some(1));
        data.record_zone_complete(1);
        data.record_zone_complete(3);
        assert_eq!(pilot.next_zone(&data), Some(2));
        data.record_zone_complete(2);
        data.record_zone_complete(4);
        assert_eq!(pilot.next_zone(&data), None);
    }

    #[test]
    fn test_heading_respects_deadband() {
        let pilot = DemoPilot::new();
        assert_eq!(
            pilot.heading(Vec2::ZERO, Vec2::new(100.0, -2.0)),
            Vec2::new(1.0, 0.0)
        );
        assert_eq!(
            pilot.heading(Vec2::ZERO, Vec2::new(-50.0, 50.0)),
            Vec2::new(-1.0, 1.0)
        );
    }
}
