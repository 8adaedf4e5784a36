//! Platform abstraction layer
//!
//! The game logic only talks to these traits:
//! - Input (logical actions, polled once per tick)
//! - Audio (fire-and-forget effects)
//! - Assets (keyed lookup that never fails)
//!
//! Every implementation is constructed by the caller and handed to the scene
//! tree through `GameContext`; nothing here is global.

pub mod assets;
pub mod audio;
pub mod input;

pub use assets::{AssetCatalog, AssetProvider, ImageHandle};
pub use audio::{AudioSink, SilentAudio};
pub use input::{Action, ActionState, InputProvider, ScriptedInput};
