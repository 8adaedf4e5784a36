//! Profile viewer
//!
//! Runs the progression pipeline on entry. A missing or broken profile only
//! blanks this scene's content area.

use glam::Vec2;

use super::{GameContext, Scene, SceneArgs, Transition};
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::platform::{Action, ActionState};
use crate::progression::ProgressionModel;
use crate::renderer::{BLACK, Frame, GOLD};

pub const DATA_NOT_FOUND: &str = "Profile data not found";

const LINE_HEIGHT: f32 = 26.0;
const PADDING: f32 = 40.0;
const VISIBLE_LINES: usize = ((SCREEN_HEIGHT - 2.0 * PADDING) / LINE_HEIGHT) as usize;

#[derive(Debug, Clone, PartialEq)]
enum Content {
    Loading,
    Lines(Vec<String>),
    Unavailable,
}

#[derive(Debug)]
pub struct ResumeScene {
    content: Content,
    scroll: usize,
}

impl Default for ResumeScene {
    fn default() -> Self {
        Self::new()
    }
}

impl ResumeScene {
    pub fn new() -> Self {
        Self {
            content: Content::Loading,
            scroll: 0,
        }
    }

    pub fn lines(&self) -> &[String] {
        match &self.content {
            Content::Lines(lines) => lines.as_slice(),
            _ => &[],
        }
    }

    pub fn is_unavailable(&self) -> bool {
        self.content == Content::Unavailable
    }

    fn max_scroll(&self) -> usize {
        self.lines().len().saturating_sub(VISIBLE_LINES)
    }
}

/// Flatten a progression model into display lines
pub fn profile_lines(model: &ProgressionModel) -> Vec<String> {
    let player = &model.player;
    let mut lines = vec![
        player.name.clone(),
        player.title.clone(),
        format!(
            "Level {}  XP {}  Skill points {}",
            player.current_level, player.experience_points, player.available_skill_points
        ),
        String::new(),
        "Skills".to_string(),
    ];
    lines.extend(
        model
            .skill_categories
            .iter()
            .map(|c| format!("{}: {}", c.name, c.skills.join(", "))),
    );

    lines.push(String::new());
    lines.push("Stats".to_string());
    lines.extend(model.stats.iter().map(|(stat, value)| format!("{stat}: {value}")));

    lines.push(String::new());
    lines.push("Professional Experience".to_string());
    for job in &model.experience {
        lines.push(format!(
            "{} at {} (level {})",
            job.role, job.company, job.level_requirement
        ));
        lines.extend(job.achievements.iter().map(|a| format!("- {a}")));
    }

    if !model.achievements.is_empty() {
        lines.push(String::new());
        lines.push("Achievements".to_string());
        lines.extend(
            model
                .achievements
                .iter()
                .map(|a| format!("{}: {}", a.name, a.description)),
        );
    }
    lines
}

impl Scene for ResumeScene {
    fn name(&self) -> &'static str {
        "resume"
    }

    fn on_enter(&mut self, ctx: &mut GameContext, _args: SceneArgs) {
        if self.content != Content::Loading {
            return;
        }
        self.content = match ctx.session.load_profile() {
            Ok(model) => Content::Lines(profile_lines(&model)),
            Err(err) => {
                log::error!("Cannot show profile: {}", err);
                Content::Unavailable
            }
        };
    }

    fn handle_input(&mut self, _ctx: &mut GameContext, input: &ActionState) -> Transition {
        if input.just_pressed(Action::Pause) || input.just_pressed(Action::ViewProfile) {
            return Transition::Pop;
        }
        if input.just_pressed(Action::MoveDown) {
            self.scroll = (self.scroll + 1).min(self.max_scroll());
        } else if input.just_pressed(Action::MoveUp) {
            self.scroll = self.scroll.saturating_sub(1);
        }
        Transition::None
    }

    fn render(&self, frame: &mut Frame) {
        frame.clear([0.96, 0.91, 0.82, 1.0]);
        match &self.content {
            Content::Lines(lines) => {
                for (row, line) in lines.iter().skip(self.scroll).take(VISIBLE_LINES).enumerate() {
                    frame.text(
                        line.clone(),
                        Vec2::new(PADDING, PADDING + row as f32 * LINE_HEIGHT),
                        BLACK,
                    );
                }
            }
            Content::Unavailable => {
                frame.text(
                    DATA_NOT_FOUND,
                    Vec2::new(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT / 2.0),
                    GOLD,
                );
            }
            Content::Loading => {}
        }
    }
}
