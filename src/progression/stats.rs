//! Stat derivation from skills
//!
//! Skill strings are matched case-insensitively against a closed keyword
//! table. Bonuses are summed, so the result never depends on skill order.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::profile::ProfileDocument;

/// Stat name -> value. Values never go below zero.
pub type StatBlock = BTreeMap<String, u32>;

/// Seed values applied before any skill bonus
pub const BASE_STATS: &[(&str, u32)] = &[
    ("intelligence", 10),
    ("programming", 5),
    ("analysis", 5),
    ("technical", 5),
    ("integration", 5),
    ("leadership", 5),
    ("management", 5),
    ("charisma", 8),
];

/// Lower-cased skill keyword -> stat bonuses
pub const SKILL_KEYWORDS: &[(&str, &[(&str, u32)])] = &[
    ("python", &[("intelligence", 10), ("programming", 15)]),
    ("javascript", &[("intelligence", 8), ("programming", 12)]),
    ("java", &[("intelligence", 9), ("programming", 13)]),
    ("sql", &[("intelligence", 12), ("analysis", 15)]),
    ("excel", &[("intelligence", 8), ("analysis", 10)]),
    ("power bi", &[("intelligence", 10), ("analysis", 12)]),
    ("tableau", &[("intelligence", 11), ("analysis", 13)]),
    ("rest api integration", &[("technical", 12), ("integration", 15)]),
    ("postman", &[("technical", 10), ("integration", 12)]),
    ("swagger/openapi", &[("technical", 11), ("integration", 13)]),
    ("project management", &[("leadership", 12), ("management", 15)]),
    ("team leadership", &[("leadership", 14), ("charisma", 10)]),
    ("agile", &[("leadership", 10), ("management", 10)]),
    ("gherkin", &[("analysis", 10), ("communication", 5)]),
];

/// A skill category with the bonuses its skills contribute
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillCategory {
    /// Title-cased, underscores replaced by spaces
    pub name: String,
    pub skills: Vec<String>,
    pub bonuses: StatBlock,
}

/// The fixed base block
pub fn base_stats() -> StatBlock {
    BASE_STATS
        .iter()
        .map(|(name, value)| (name.to_string(), *value))
        .collect()
}

/// Add every keyword bonus `skill` matches into `block`
pub fn apply_skill(block: &mut StatBlock, skill: &str) {
    let lowered = skill.to_lowercase();
    for (keyword, bonuses) in SKILL_KEYWORDS {
        if !lowered.contains(keyword) {
            continue;
        }
        for (stat, bonus) in bonuses.iter() {
            *block.entry(stat.to_string()).or_insert(0) += bonus;
        }
    }
}

/// Bonuses attributable to one list of skills (no base values)
pub fn category_bonuses<S: AsRef<str>>(skills: &[S]) -> StatBlock {
    let mut block = StatBlock::new();
    for skill in skills {
        apply_skill(&mut block, skill.as_ref());
    }
    block
}

/// Base stats plus every skill bonus in the document
pub fn derive_stats(doc: &ProfileDocument) -> StatBlock {
    let mut block = base_stats();
    for skill in doc.all_skills() {
        apply_skill(&mut block, skill);
    }
    block
}

pub fn skill_categories(doc: &ProfileDocument) -> Vec<SkillCategory> {
    doc.skills
        .iter()
        .map(|list| SkillCategory {
            name: title_case(&list.category.replace('_', " ")),
            skills: list.skills.clone(),
            bonuses: category_bonuses(&list.skills),
        })
        .collect()
}

/// Upper-case the first letter of every alphabetic run, lower-case the rest
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_alpha = false;
    for ch in text.chars() {
        if ch.is_alphabetic() {
            if prev_alpha {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(ch);
            prev_alpha = false;
        }
    }
    out
}
