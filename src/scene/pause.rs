//! Pause overlay pushed on top of the game

use glam::Vec2;

use super::{GameContext, MenuScene, Scene, SceneArgs, Transition};
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::platform::{Action, ActionState};
use crate::renderer::{DIM, Frame, GOLD, WHITE};

const OPTIONS: [&str; 2] = ["Resume", "Main Menu"];

#[derive(Debug, Default)]
pub struct PauseScene {
    selected: usize,
}

impl PauseScene {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Scene for PauseScene {
    fn name(&self) -> &'static str {
        "pause"
    }

    fn on_enter(&mut self, ctx: &mut GameContext, _args: SceneArgs) {
        self.selected = 0;
        log::debug!("Paused in zone {}", ctx.session.data.current_zone);
    }

    fn handle_input(&mut self, _ctx: &mut GameContext, input: &ActionState) -> Transition {
        if input.just_pressed(Action::Pause) {
            return Transition::Pop;
        }
        if input.just_pressed(Action::MoveUp) || input.just_pressed(Action::MoveDown) {
            self.selected = (self.selected + 1) % OPTIONS.len();
        }
        if input.just_pressed(Action::Confirm) || input.just_pressed(Action::Interact) {
            return match self.selected {
                0 => Transition::Pop,
                _ => Transition::Replace(Box::new(MenuScene::new()), SceneArgs::default()),
            };
        }
        if input.just_pressed(Action::Quit) {
            return Transition::Replace(Box::new(MenuScene::new()), SceneArgs::default());
        }
        Transition::None
    }

    fn render(&self, frame: &mut Frame) {
        frame.rect(Vec2::ZERO, Vec2::new(SCREEN_WIDTH, SCREEN_HEIGHT), DIM);
        frame.text("Paused", Vec2::new(SCREEN_WIDTH / 2.0, 200.0), WHITE);
        for (i, option) in OPTIONS.iter().enumerate() {
            let color = if i == self.selected { GOLD } else { WHITE };
            frame.text(*option, Vec2::new(SCREEN_WIDTH / 2.0, 270.0 + i as f32 * 60.0), color);
        }
    }
}
