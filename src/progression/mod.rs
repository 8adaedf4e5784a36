//! Profile document -> player progression
//!
//! The transform is a pure function of the document: the same profile always
//! yields the same level, stats and achievements.

pub mod experience;
pub mod leveling;
pub mod pipeline;
pub mod profile;
pub mod stats;

pub use experience::{Achievement, ExperienceRecord, generate_achievements, level_requirement};
pub use leveling::{LevelProgress, level_for_experience, spend_experience, tier_cost, total_experience};
pub use pipeline::ProgressionPipeline;
pub use profile::{ContactInfo, ExperienceEntry, ProfileDocument, SkillList};
pub use stats::{SkillCategory, StatBlock, derive_stats};

use serde::{Deserialize, Serialize};

/// Player sprite picked from the dominant skill family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Avatar {
    Analyst,
    Developer,
    Manager,
    #[default]
    Professional,
}

impl Avatar {
    pub fn as_str(&self) -> &'static str {
        match self {
            Avatar::Analyst => "analyst",
            Avatar::Developer => "developer",
            Avatar::Manager => "manager",
            Avatar::Professional => "professional",
        }
    }

    pub fn sprite_path(&self) -> String {
        format!("sprites/player/{}.png", self.as_str())
    }
}

/// First match wins: analyst, developer, manager, then professional
pub fn select_avatar(doc: &ProfileDocument) -> Avatar {
    let text = doc
        .skills
        .iter()
        .map(|list| format!("{}: [{}]", list.category, list.skills.join(", ")))
        .collect::<Vec<_>>()
        .join(", ")
        .to_lowercase();

    if text.contains("business_analysis") {
        Avatar::Analyst
    } else if ["api", "python", "sql"].iter().any(|k| text.contains(k)) {
        Avatar::Developer
    } else if text.contains("management") {
        Avatar::Manager
    } else {
        Avatar::Professional
    }
}

/// Root progression entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub name: String,
    pub title: String,
    pub current_level: u32,
    /// Remainder inside the current level, not a running total
    pub experience_points: u64,
    pub available_skill_points: u32,
    pub avatar: Avatar,
}

/// Everything derived from one profile document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressionModel {
    pub player: PlayerProfile,
    pub skill_categories: Vec<SkillCategory>,
    pub experience: Vec<ExperienceRecord>,
    pub stats: StatBlock,
    pub achievements: Vec<Achievement>,
}

pub fn player_profile(doc: &ProfileDocument) -> PlayerProfile {
    let progress = level_for_experience(total_experience(doc));
    PlayerProfile {
        name: doc
            .contact_info
            .name
            .clone()
            .unwrap_or_else(|| "Professional Hero".to_string()),
        title: doc
            .contact_info
            .title
            .clone()
            .unwrap_or_else(|| "Analyst".to_string()),
        current_level: progress.level,
        experience_points: progress.remaining_xp,
        available_skill_points: leveling::skill_points_for_level(progress.level),
        avatar: select_avatar(doc),
    }
}

/// Derive the full progression model from a document
pub fn transform(doc: &ProfileDocument) -> ProgressionModel {
    ProgressionModel {
        player: player_profile(doc),
        skill_categories: stats::skill_categories(doc),
        experience: experience::experience_records(doc),
        stats: derive_stats(doc),
        achievements: generate_achievements(doc),
    }
}
