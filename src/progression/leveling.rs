//! XP accumulation and the leveling curve
//!
//! Total XP is the single source of truth for level. Only the level and the
//! remainder inside it are ever kept.

use serde::{Deserialize, Serialize};

use super::profile::ProfileDocument;
use crate::consts::*;
use crate::grow_tier_cost;

/// Result of spending total XP on the tier curve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelProgress {
    /// 1..=LEVEL_CAP
    pub level: u32,
    /// XP left over inside the current level
    pub remaining_xp: u64,
    /// Cost of the next level-up from `level`
    pub next_level_cost: u64,
}

/// Total XP a profile is worth
pub fn total_experience(doc: &ProfileDocument) -> u64 {
    let jobs: u64 = doc
        .professional_experience
        .iter()
        .map(|job| XP_PER_JOB + job.key_achievements.len() as u64 * XP_PER_JOB_ACHIEVEMENT)
        .sum();
    let skills = doc.skill_count() as u64 * XP_PER_SKILL;
    let certifications = doc.certifications.len() as u64 * XP_PER_CERTIFICATION;
    jobs + skills + certifications
}

/// XP needed to go from `level` to `level + 1`
pub fn tier_cost(level: u32) -> u64 {
    (1..level.max(1)).fold(FIRST_TIER_COST, |cost, _| grow_tier_cost(cost))
}

/// Spend `total_xp` tier by tier starting at level 1
pub fn level_for_experience(total_xp: u64) -> LevelProgress {
    spend_experience(1, total_xp)
}

/// Spend `xp` starting from an already-reached `level`
pub fn spend_experience(level: u32, xp: u64) -> LevelProgress {
    let mut level = level.clamp(1, LEVEL_CAP);
    let mut remaining = xp;
    let mut cost = tier_cost(level);
    while level < LEVEL_CAP && remaining >= cost {
        remaining -= cost;
        level += 1;
        cost = grow_tier_cost(cost);
    }
    LevelProgress {
        level,
        remaining_xp: remaining,
        next_level_cost: cost,
    }
}

/// Skill points granted for reaching `level`
pub fn skill_points_for_level(level: u32) -> u32 {
    SKILL_POINTS_PER_LEVEL * level.saturating_sub(1)
}
