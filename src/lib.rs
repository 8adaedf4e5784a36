//! Portfolio Quest - a pixel-art portfolio game
//!
//! Core modules:
//! - `progression`: Profile document -> level, XP, stats, achievements
//! - `schema`: JSON-Schema safety net for incoming documents
//! - `save`: Versioned save snapshots with corruption quarantine
//! - `scene`: Scene stack and the concrete scenes
//! - `zone`: Zone quest tracking and the demo pilot
//! - `platform`: Input/audio/asset collaborator seams
//! - `renderer`: Per-frame draw list handed to scenes
//! - `config`: Data-driven game configuration

pub mod config;
pub mod error;
pub mod game;
pub mod platform;
pub mod progression;
pub mod renderer;
pub mod save;
pub mod scene;
pub mod schema;
pub mod session;
pub mod zone;

pub use config::{AudioSettings, GameConfig};
pub use error::PipelineError;
pub use game::Game;
pub use progression::{ProgressionModel, ProgressionPipeline};
pub use save::{GameData, SaveStore};
pub use session::Session;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Frame rate the game loop is tuned for
    pub const FPS: f32 = 60.0;
    /// Fixed frame timestep
    pub const FRAME_DT: f32 = 1.0 / FPS;

    /// Viewport dimensions
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;
    /// Zone world dimensions (camera clamps to these)
    pub const WORLD_WIDTH: f32 = 1600.0;
    pub const WORLD_HEIGHT: f32 = 1200.0;

    /// Player defaults
    pub const PLAYER_SIZE: f32 = 32.0;
    /// Pixels per 1/60 s when a direction is held
    pub const PLAYER_SPEED: f32 = 4.0;
    pub const PLAYER_START: (f32, f32) = (100.0, 100.0);

    /// Leveling curve
    pub const LEVEL_CAP: u32 = 100;
    pub const FIRST_TIER_COST: u64 = 100;
    pub const SKILL_POINTS_PER_LEVEL: u32 = 3;

    /// Profile XP weights
    pub const XP_PER_JOB: u64 = 500;
    pub const XP_PER_JOB_ACHIEVEMENT: u64 = 150;
    pub const XP_PER_SKILL: u64 = 25;
    pub const XP_PER_CERTIFICATION: u64 = 300;

    /// Station footprints and interaction half-extents
    pub const LARGE_STATION_SIZE: f32 = 64.0;
    pub const LARGE_STATION_REACH: f32 = 50.0;
    pub const SMALL_STATION_SIZE: f32 = 48.0;
    pub const SMALL_STATION_REACH: f32 = 40.0;

    /// On-screen message lifetime (seconds)
    pub const MESSAGE_DURATION: f32 = 3.0;

    /// Save format version written into every snapshot
    pub const SAVE_FORMAT_VERSION: &str = "1.0";
}

/// Integer ×1.5 growth of a tier cost, saturating instead of overflowing
#[inline]
pub fn grow_tier_cost(cost: u64) -> u64 {
    cost.checked_mul(3).map_or(u64::MAX, |c| c / 2)
}

/// Per-axis proximity test (square reach around `center`)
#[inline]
pub fn within_reach(point: Vec2, center: Vec2, reach: f32) -> bool {
    let delta = (point - center).abs();
    delta.x < reach && delta.y < reach
}

/// Clamp a top-left position so a box of `size` stays inside the world
#[inline]
pub fn clamp_to_world(pos: Vec2, size: f32) -> Vec2 {
    use consts::{WORLD_HEIGHT, WORLD_WIDTH};
    Vec2::new(
        pos.x.clamp(0.0, WORLD_WIDTH - size),
        pos.y.clamp(0.0, WORLD_HEIGHT - size),
    )
}
