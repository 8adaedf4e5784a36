//! Mutable game state carried inside save snapshots
//!
//! The save store treats this as opaque JSON; only the session knows its shape.
//! Every field defaults, so an older-shaped payload still loads best-effort.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::AudioSettings;
use crate::consts::*;
use crate::progression::{PlayerProfile, spend_experience};

/// The player's live progression and whereabouts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerData {
    /// Top-left corner in world pixels
    pub position: Vec2,
    pub zone: u32,
    pub level: u32,
    /// XP inside the current level
    pub experience: u64,
    pub inventory: Vec<String>,
}

impl Default for PlayerData {
    fn default() -> Self {
        Self {
            position: Vec2::new(PLAYER_START.0, PLAYER_START.1),
            zone: 1,
            level: 1,
            experience: 0,
            inventory: Vec::new(),
        }
    }
}

impl PlayerData {
    /// Add XP and pay for any level-ups it affords. Returns levels gained.
    pub fn award_experience(&mut self, xp: u64) -> u32 {
        let before = self.level;
        let progress = spend_experience(self.level, self.experience.saturating_add(xp));
        self.level = progress.level;
        self.experience = progress.remaining_xp;
        self.level.saturating_sub(before)
    }

    pub fn center(&self) -> Vec2 {
        self.position + Vec2::splat(PLAYER_SIZE / 2.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameData {
    pub player: PlayerData,
    pub current_zone: u32,
    /// Zone ids cleared at least once, in completion order, no duplicates
    pub completed_zones: Vec<u32>,
    pub settings: AudioSettings,
}

impl Default for GameData {
    fn default() -> Self {
        Self {
            player: PlayerData::default(),
            current_zone: 1,
            completed_zones: Vec::new(),
            settings: AudioSettings::default(),
        }
    }
}

impl GameData {
    /// Fresh game seeded from a derived profile
    pub fn from_profile(profile: &PlayerProfile) -> Self {
        let mut data = Self::default();
        data.player.level = profile.current_level;
        data.player.experience = profile.experience_points;
        data
    }

    pub fn is_zone_complete(&self, zone_id: u32) -> bool {
        self.completed_zones.contains(&zone_id)
    }

    /// Record a cleared zone; false if it was already recorded
    pub fn record_zone_complete(&mut self, zone_id: u32) -> bool {
        if self.is_zone_complete(zone_id) {
            return false;
        }
        self.completed_zones.push(zone_id);
        true
    }

    pub fn to_value(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }
}
