//! Scene stack
//!
//! Exactly one scene is active: the top of the stack. Every stack mutation
//! calls `on_exit` on the scene losing focus before `on_enter` on the scene
//! gaining it.

pub mod game;
pub mod menu;
pub mod pause;
pub mod resume;

pub use game::GameScene;
pub use menu::MenuScene;
pub use pause::PauseScene;
pub use resume::ResumeScene;

use std::fmt;

use crate::config::GameConfig;
use crate::platform::{ActionState, AssetProvider, AudioSink};
use crate::renderer::Frame;
use crate::save::SaveStore;
use crate::session::Session;

/// Services injected into every scene callback
pub struct GameContext<'a> {
    pub session: &'a mut Session,
    pub saves: &'a SaveStore,
    pub audio: &'a mut dyn AudioSink,
    pub assets: &'a mut dyn AssetProvider,
    pub config: &'a GameConfig,
}

impl GameContext<'_> {
    /// Play an effect at the configured effect volume
    pub fn play_sound(&mut self, sound: &str) {
        let volume = self.session.data.settings.effective_sfx();
        self.audio.play(sound, volume);
    }

    /// Save the live game under a generated name
    pub fn save_game(&mut self) -> bool {
        self.session.save(self.saves, None)
    }
}

/// Arguments handed to `on_enter`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SceneArgs {
    /// Zone to open, if the scene hosts zones
    pub zone: Option<u32>,
    /// Hand control to the demo pilot
    pub demo: bool,
}

impl SceneArgs {
    pub fn zone(id: u32) -> Self {
        Self {
            zone: Some(id),
            ..Self::default()
        }
    }

    pub fn demo() -> Self {
        Self {
            demo: true,
            ..Self::default()
        }
    }
}

/// What a scene asks the stack to do after a callback
pub enum Transition {
    None,
    Push(Box<dyn Scene>, SceneArgs),
    Pop,
    /// Clear the whole stack, then push
    Replace(Box<dyn Scene>, SceneArgs),
    Quit,
}

impl fmt::Debug for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transition::None => write!(f, "None"),
            Transition::Push(scene, args) => write!(f, "Push({}, {:?})", scene.name(), args),
            Transition::Pop => write!(f, "Pop"),
            Transition::Replace(scene, args) => {
                write!(f, "Replace({}, {:?})", scene.name(), args)
            }
            Transition::Quit => write!(f, "Quit"),
        }
    }
}

impl Transition {
    pub fn is_none(&self) -> bool {
        matches!(self, Transition::None)
    }
}

pub trait Scene {
    fn name(&self) -> &'static str;

    fn on_enter(&mut self, _ctx: &mut GameContext, _args: SceneArgs) {}

    fn on_exit(&mut self, _ctx: &mut GameContext) {}

    fn handle_input(&mut self, ctx: &mut GameContext, input: &ActionState) -> Transition;

    fn update(&mut self, _ctx: &mut GameContext, _dt: f32) -> Transition {
        Transition::None
    }

    fn render(&self, frame: &mut Frame);

    /// Completion message, produced at most once per completion
    fn check_completion(&mut self, _ctx: &mut GameContext) -> Option<String> {
        None
    }

    /// True when the scene is being driven by the demo pilot and has nothing
    /// left to do
    fn demo_finished(&self) -> bool {
        false
    }
}

#[derive(Default)]
pub struct SceneStack {
    scenes: Vec<Box<dyn Scene>>,
    quit_requested: bool,
}

impl fmt::Debug for SceneStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SceneStack")
            .field("scenes", &self.names())
            .field("quit_requested", &self.quit_requested)
            .finish()
    }
}

impl SceneStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, ctx: &mut GameContext, mut scene: Box<dyn Scene>, args: SceneArgs) {
        if let Some(active) = self.scenes.last_mut() {
            active.on_exit(ctx);
        }
        log::debug!("Entering scene {}", scene.name());
        scene.on_enter(ctx, args);
        self.scenes.push(scene);
    }

    /// No-op on an empty stack
    pub fn pop(&mut self, ctx: &mut GameContext) {
        if let Some(mut old) = self.scenes.pop() {
            old.on_exit(ctx);
            log::debug!("Left scene {}", old.name());
        }
        if let Some(active) = self.scenes.last_mut() {
            active.on_enter(ctx, SceneArgs::default());
        }
    }

    pub fn replace(&mut self, ctx: &mut GameContext, scene: Box<dyn Scene>, args: SceneArgs) {
        while let Some(mut old) = self.scenes.pop() {
            old.on_exit(ctx);
        }
        self.push(ctx, scene, args);
    }

    pub fn apply(&mut self, ctx: &mut GameContext, transition: Transition) {
        match transition {
            Transition::None => {}
            Transition::Push(scene, args) => self.push(ctx, scene, args),
            Transition::Pop => self.pop(ctx),
            Transition::Replace(scene, args) => self.replace(ctx, scene, args),
            Transition::Quit => self.quit_requested = true,
        }
    }

    pub fn active(&self) -> Option<&dyn Scene> {
        self.scenes.last().map(|scene| scene.as_ref())
    }

    pub fn active_mut(&mut self) -> Option<&mut (dyn Scene + 'static)> {
        self.scenes.last_mut().map(|scene| scene.as_mut())
    }

    pub fn active_name(&self) -> Option<&'static str> {
        self.active().map(|scene| scene.name())
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.scenes.iter().map(|scene| scene.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    /// Route input to the active scene and apply its answer
    pub fn handle_input(&mut self, ctx: &mut GameContext, input: &ActionState) {
        if let Some(scene) = self.active_mut() {
            let transition = scene.handle_input(ctx, input);
            self.apply(ctx, transition);
        }
    }

    pub fn update(&mut self, ctx: &mut GameContext, dt: f32) {
        if let Some(scene) = self.active_mut() {
            let transition = scene.update(ctx, dt);
            self.apply(ctx, transition);
        }
    }

    /// Draw only the active scene
    pub fn render(&self, frame: &mut Frame) {
        if let Some(scene) = self.active() {
            scene.render(frame);
        }
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::Harness;
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Log = Rc<RefCell<Vec<String>>>;

    struct Probe {
        name: &'static str,
        log: Log,
    }

    impl Probe {
        fn boxed(name: &'static str, log: &Log) -> Box<dyn Scene> {
            Box::new(Self {
                name,
                log: Rc::clone(log),
            })
        }
    }

    impl Scene for Probe {
        fn name(&self) -> &'static str {
            self.name
        }

        fn on_enter(&mut self, _ctx: &mut GameContext, _args: SceneArgs) {
            self.log.borrow_mut().push(format!("enter {}", self.name));
        }

        fn on_exit(&mut self, _ctx: &mut GameContext) {
            self.log.borrow_mut().push(format!("exit {}", self.name));
        }

        fn handle_input(&mut self, _ctx: &mut GameContext, _input: &ActionState) -> Transition {
            Transition::None
        }

        fn render(&self, _frame: &mut Frame) {}
    }

    #[test]
    fn test_exit_runs_before_enter() {
        let mut harness = Harness::new();
        let mut ctx = harness.ctx();
        let log: Log = Rc::default();
        let mut stack = SceneStack::new();

        stack.push(&mut ctx, Probe::boxed("a", &log), SceneArgs::default());
        stack.push(&mut ctx, Probe::boxed("b", &log), SceneArgs::default());
        stack.pop(&mut ctx);
        assert_eq!(stack.active_name(), Some("a"));

        assert_eq!(
            *log.borrow(),
            vec!["enter a", "exit a", "enter b", "exit b", "enter a"]
        );
    }

    #[test]
    fn test_replace_clears_whole_stack() {
        let mut harness = Harness::new();
        let mut ctx = harness.ctx();
        let log: Log = Rc::default();
        let mut stack = SceneStack::new();

        stack.push(&mut ctx, Probe::boxed("a", &log), SceneArgs::default());
        stack.push(&mut ctx, Probe::boxed("b", &log), SceneArgs::default());
        log.borrow_mut().clear();

        stack.apply(
            &mut ctx,
            Transition::Replace(Probe::boxed("c", &log), SceneArgs::default()),
        );
        assert_eq!(stack.names(), vec!["c"]);
        assert_eq!(*log.borrow(), vec!["exit b", "exit a", "enter c"]);
    }

    #[test]
    fn test_pop_empty_is_noop() {
        let mut harness = Harness::new();
        let mut ctx = harness.ctx();
        let mut stack = SceneStack::new();
        stack.pop(&mut ctx);
        assert!(stack.is_empty());
        assert_eq!(stack.active_name(), None);

        let log: Log = Rc::default();
        stack.push(&mut ctx, Probe::boxed("only", &log), SceneArgs::default());
        stack.pop(&mut ctx);
        stack.pop(&mut ctx);
        assert!(stack.is_empty());
        assert_eq!(*log.borrow(), vec!["enter only", "exit only"]);
    }

    #[test]
    fn test_quit_is_recorded() {
        let mut harness = Harness::new();
        let mut ctx = harness.ctx();
        let mut stack = SceneStack::new();
        assert!(!stack.quit_requested());
        stack.apply(&mut ctx, Transition::Quit);
        assert!(stack.quit_requested());
        assert_eq!(format!("{:?}", Transition::Pop), "Pop");
    }
}
