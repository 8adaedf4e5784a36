//! Job history -> experience records and achievements

use serde::{Deserialize, Serialize};

use super::profile::ProfileDocument;

pub const SENIOR_LEVEL_REQUIREMENT: u32 = 15;
pub const JUNIOR_LEVEL_REQUIREMENT: u32 = 5;
pub const DEFAULT_LEVEL_REQUIREMENT: u32 = 10;

const SENIOR_KEYWORDS: &[&str] = &["lead", "senior", "manager"];
const JUNIOR_KEYWORDS: &[&str] = &["junior", "associate", "intern"];

/// A job as the game sees it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceRecord {
    pub role: String,
    pub company: String,
    pub achievements: Vec<String>,
    pub level_requirement: u32,
}

/// A static reward unlocked by a trigger phrase
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Achievement {
    pub name: String,
    pub description: String,
    pub icon: String,
}

/// Phrases that unlock an achievement
struct AchievementTrigger {
    /// Must appear verbatim
    exact: &'static str,
    /// Must appear ignoring case
    keyword: &'static str,
    name: &'static str,
    description: &'static str,
    icon: &'static str,
}

const ACHIEVEMENT_TRIGGERS: &[AchievementTrigger] = &[
    AchievementTrigger {
        exact: "200+",
        keyword: "gherkin",
        name: "Story Master",
        description: "Authored 200+ Gherkin user stories.",
        icon: "achievements/story_master.png",
    },
    AchievementTrigger {
        exact: "7-member",
        keyword: "squad",
        name: "Squad Leader",
        description: "Led a 7-member cross-functional squad.",
        icon: "achievements/squad_leader.png",
    },
];

impl AchievementTrigger {
    fn matches(&self, text: &str) -> bool {
        text.contains(self.exact) && text.to_lowercase().contains(self.keyword)
    }

    fn to_achievement(&self) -> Achievement {
        Achievement {
            name: self.name.to_string(),
            description: self.description.to_string(),
            icon: self.icon.to_string(),
        }
    }
}

/// Minimum level tier suggested by a role title
pub fn level_requirement(role: &str) -> u32 {
    let role = role.to_lowercase();
    if SENIOR_KEYWORDS.iter().any(|k| role.contains(k)) {
        SENIOR_LEVEL_REQUIREMENT
    } else if JUNIOR_KEYWORDS.iter().any(|k| role.contains(k)) {
        JUNIOR_LEVEL_REQUIREMENT
    } else {
        DEFAULT_LEVEL_REQUIREMENT
    }
}

pub fn experience_records(doc: &ProfileDocument) -> Vec<ExperienceRecord> {
    doc.professional_experience
        .iter()
        .map(|job| ExperienceRecord {
            role: job.role.clone().unwrap_or_else(|| "Unknown Role".to_string()),
            company: job
                .company
                .clone()
                .unwrap_or_else(|| "Unknown Company".to_string()),
            achievements: job.key_achievements.clone(),
            level_requirement: level_requirement(job.role.as_deref().unwrap_or("")),
        })
        .collect()
}

/// One record per trigger hit. Repeated hits across jobs are kept, not merged.
pub fn generate_achievements(doc: &ProfileDocument) -> Vec<Achievement> {
    let mut achievements = Vec::new();
    for job in &doc.professional_experience {
        for text in &job.key_achievements {
            for trigger in ACHIEVEMENT_TRIGGERS {
                if trigger.matches(text) {
                    achievements.push(trigger.to_achievement());
                }
            }
        }
    }
    achievements
}
