//! Title menu with idle demo takeover

use glam::Vec2;

use super::{GameContext, GameScene, ResumeScene, Scene, SceneArgs, Transition};
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::platform::{Action, ActionState};
use crate::renderer::{BLACK, Frame, GOLD, WHITE};

const OPTIONS: [&str; 3] = ["Start Game", "View Profile", "Quit"];

#[derive(Debug, Default)]
pub struct MenuScene {
    selected: usize,
    /// Seconds since the last input
    idle_timer: f32,
}

impl MenuScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> &'static str {
        OPTIONS[self.selected]
    }

    pub fn idle_timer(&self) -> f32 {
        self.idle_timer
    }

    fn select(&self) -> Transition {
        match self.selected {
            0 => Transition::Replace(Box::new(GameScene::new()), SceneArgs::default()),
            1 => Transition::Push(Box::new(ResumeScene::new()), SceneArgs::default()),
            _ => Transition::Quit,
        }
    }
}

impl Scene for MenuScene {
    fn name(&self) -> &'static str {
        "menu"
    }

    fn on_enter(&mut self, _ctx: &mut GameContext, _args: SceneArgs) {
        self.idle_timer = 0.0;
    }

    fn handle_input(&mut self, _ctx: &mut GameContext, input: &ActionState) -> Transition {
        if input.any_just_pressed() {
            self.idle_timer = 0.0;
        }

        if input.just_pressed(Action::MoveUp) {
            self.selected = (self.selected + OPTIONS.len() - 1) % OPTIONS.len();
        } else if input.just_pressed(Action::MoveDown) {
            self.selected = (self.selected + 1) % OPTIONS.len();
        }

        if input.just_pressed(Action::Confirm) {
            self.select()
        } else if input.just_pressed(Action::ViewProfile) {
            Transition::Push(Box::new(ResumeScene::new()), SceneArgs::default())
        } else if input.just_pressed(Action::Quit) {
            Transition::Quit
        } else {
            Transition::None
        }
    }

    fn update(&mut self, ctx: &mut GameContext, dt: f32) -> Transition {
        self.idle_timer += dt;
        if self.idle_timer >= ctx.config.idle_demo_timeout_secs {
            log::info!("Idle for {:.0}s, starting demo", self.idle_timer);
            self.idle_timer = 0.0;
            return Transition::Push(Box::new(GameScene::new()), SceneArgs::demo());
        }
        Transition::None
    }

    fn render(&self, frame: &mut Frame) {
        frame.clear(BLACK);
        frame.text("Portfolio Quest", Vec2::new(SCREEN_WIDTH / 2.0, 150.0), WHITE);
        for (i, option) in OPTIONS.iter().enumerate() {
            let color = if i == self.selected { GOLD } else { WHITE };
            frame.text(*option, Vec2::new(SCREEN_WIDTH / 2.0, 300.0 + i as f32 * 60.0), color);
        }
        frame.text(
            "Use UP/DOWN arrows to navigate, ENTER to select",
            Vec2::new(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT - 50.0),
            WHITE,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::test_support::Harness;

    #[test]
    fn test_idle_timer_accumulates_and_resets() {
        let mut harness = Harness::new();
        let mut menu = MenuScene::new();
        assert!(menu.update(&mut harness.ctx(), 1.0).is_none());
        assert_eq!(menu.idle_timer(), 1.0);

        let key = ActionState::pressed(&[Action::Interact]);
        menu.handle_input(&mut harness.ctx(), &key);
        assert_eq!(menu.idle_timer(), 0.0);
    }

    #[test]
    fn test_idle_timeout_starts_demo() {
        let mut harness = Harness::new();
        harness.config.idle_demo_timeout_secs = 60.0;
        let mut menu = MenuScene::new();
        assert!(menu.update(&mut harness.ctx(), 59.9).is_none());
        match menu.update(&mut harness.ctx(), 0.2) {
            Transition::Push(next, args) => {
                assert_eq!(next.name(), "game");
                assert!(args.demo);
            }
            other => panic!("expected demo, got {other:?}"),
        }
    }

    #[test]
    fn test_navigation_wraps() {
        let mut harness = Harness::new();
        let mut menu = MenuScene::new();
        let up = ActionState::pressed(&[Action::MoveUp]);
        menu.handle_input(&mut harness.ctx(), &up);
        assert_eq!(menu.selected(), "Quit");
        let confirm = ActionState::pressed(&[Action::Confirm]);
        assert!(matches!(
            menu.handle_input(&mut harness.ctx(), &confirm),
            Transition::Quit
        ));

        let down = ActionState::pressed(&[Action::MoveDown]);
        menu.handle_input(&mut harness.ctx(), &down);
        assert_eq!(menu.selected(), "Start Game");
        match menu.handle_input(&mut harness.ctx(), &confirm) {
            Transition::Replace(next, args) => {
                assert_eq!(next.name(), "game");
                assert!(!args.demo);
            }
            other => panic!("expected game, got {other:?}"),
        }
    }
}
