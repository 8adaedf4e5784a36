//! Logical input actions with edge detection

/// Everything the game can be asked to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    /// Use the station under the player
    Interact,
    Pause,
    /// Menu accept / start game
    Confirm,
    /// Open the profile viewer from the menu
    ViewProfile,
    Quit,
    Zone1,
    Zone2,
    Zone3,
    Zone4,
}

impl Action {
    pub const ALL: [Action; 13] = [
        Action::MoveUp,
        Action::MoveDown,
        Action::MoveLeft,
        Action::MoveRight,
        Action::Interact,
        Action::Pause,
        Action::Confirm,
        Action::ViewProfile,
        Action::Quit,
        Action::Zone1,
        Action::Zone2,
        Action::Zone3,
        Action::Zone4,
    ];

    fn bit(self) -> u16 {
        1 << (self as u16)
    }

    /// Zone id bound to this action, if it is a zone hotkey
    pub fn zone_id(self) -> Option<u32> {
        match self {
            Action::Zone1 => Some(1),
            Action::Zone2 => Some(2),
            Action::Zone3 => Some(3),
            Action::Zone4 => Some(4),
            _ => None,
        }
    }
}

/// Anything that can answer "is this action active right now"
pub trait InputProvider {
    fn is_active(&self, action: Action) -> bool;
}

/// Held actions for this tick and the previous one
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActionState {
    held: u16,
    previous: u16,
}

impl ActionState {
    /// State where `actions` were just pressed this tick
    pub fn pressed(actions: &[Action]) -> Self {
        let mut state = Self::default();
        for &action in actions {
            state.held |= action.bit();
        }
        state
    }

    /// Sample every action from `provider`, keeping last tick for edges
    pub fn poll(&mut self, provider: &dyn InputProvider) {
        self.previous = self.held;
        self.held = Action::ALL
            .iter()
            .filter(|&&action| provider.is_active(action))
            .fold(0, |bits, action| bits | action.bit());
    }

    pub fn set(&mut self, action: Action, active: bool) {
        if active {
            self.held |= action.bit();
        } else {
            self.held &= !action.bit();
        }
    }

    pub fn is_held(&self, action: Action) -> bool {
        self.held & action.bit() != 0
    }

    /// True only on the tick the action went down
    pub fn just_pressed(&self, action: Action) -> bool {
        self.is_held(action) && self.previous & action.bit() == 0
    }

    pub fn any_held(&self) -> bool {
        self.held != 0
    }

    pub fn any_just_pressed(&self) -> bool {
        self.held & !self.previous != 0
    }
}

/// Provider replaying a fixed set of held actions, for headless runs
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    active: Vec<Action>,
}

impl ScriptedInput {
    pub fn new(active: &[Action]) -> Self {
        Self {
            active: active.to_vec(),
        }
    }

    pub fn hold(&mut self, action: Action) {
        if !self.active.contains(&action) {
            self.active.push(action);
        }
    }

    pub fn release_all(&mut self) {
        self.active.clear();
    }
}

impl InputProvider for ScriptedInput {
    fn is_active(&self, action: Action) -> bool {
        self.active.contains(&action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges_fire_once() {
        let mut provider = ScriptedInput::new(&[Action::Interact]);
        let mut state = ActionState::default();

        state.poll(&provider);
        assert!(state.just_pressed(Action::Interact));

        state.poll(&provider);
        assert!(state.is_held(Action::Interact));
        assert!(!state.just_pressed(Action::Interact));

        provider.release_all();
        state.poll(&provider);
        assert!(!state.any_held());

        provider.hold(Action::Interact);
        state.poll(&provider);
        assert!(state.just_pressed(Action::Interact));
    }

    #[test]
    fn test_pressed_helper_and_zone_keys() {
        let state = ActionState::pressed(&[Action::Zone3, Action::MoveLeft]);
        assert!(state.just_pressed(Action::Zone3));
        assert!(state.is_held(Action::MoveLeft));
        assert!(!state.is_held(Action::MoveRight));
        assert!(state.any_just_pressed());
        assert_eq!(Action::Zone3.zone_id(), Some(3));
        assert_eq!(Action::Pause.zone_id(), None);
    }

    #[test]
    fn test_every_action_has_a_distinct_bit() {
        let bits: u16 = Action::ALL.iter().fold(0, |acc, a| {
            assert_eq!(acc & a.bit(), 0);
            acc | a.bit()
        });
        assert_eq!(bits.count_ones() as usize, Action::ALL.len());
    }
}
