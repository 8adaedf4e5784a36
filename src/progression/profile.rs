//! Raw profile document as it arrives on disk
//!
//! Read-only once loaded. Every section is optional; absent sections are empty.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

/// Root of a profile document
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProfileDocument {
    pub contact_info: ContactInfo,
    /// Skill categories in document order
    #[serde(deserialize_with = "ordered_skill_lists")]
    pub skills: Vec<SkillList>,
    pub professional_experience: Vec<ExperienceEntry>,
    pub certifications: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ContactInfo {
    pub name: Option<String>,
    pub title: Option<String>,
    pub email: Option<String>,
    pub location: Option<String>,
}

/// One `"category": [skills...]` entry
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkillList {
    pub category: String,
    pub skills: Vec<String>,
}

impl SkillList {
    pub fn new(category: impl Into<String>, skills: &[&str]) -> Self {
        Self {
            category: category.into(),
            skills: skills.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ExperienceEntry {
    pub role: Option<String>,
    pub company: Option<String>,
    pub key_achievements: Vec<String>,
    pub dates: Option<String>,
}

impl ProfileDocument {
    /// Every skill string across every category
    pub fn all_skills(&self) -> impl Iterator<Item = &str> {
        self.skills
            .iter()
            .flat_map(|list| list.skills.iter().map(String::as_str))
    }

    pub fn skill_count(&self) -> usize {
        self.skills.iter().map(|list| list.skills.len()).sum()
    }
}

/// Keeps the category map in document order instead of sorting it
fn ordered_skill_lists<'de, D>(deserializer: D) -> Result<Vec<SkillList>, D::Error>
where
    D: Deserializer<'de>,
{
    struct SkillListsVisitor;

    impl<'de> Visitor<'de> for SkillListsVisitor {
        type Value = Vec<SkillList>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map of skill category to a list of skill names")
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut lists = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((category, skills)) = map.next_entry::<String, Vec<String>>()? {
                lists.push(SkillList { category, skills });
            }
            Ok(lists)
        }
    }

    deserializer.deserialize_map(SkillListsVisitor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skill_categories_keep_document_order() {
        let doc: ProfileDocument = serde_json::from_str(
            r#"{"skills": {"zeta": ["a"], "alpha": ["b", "c"], "mid": []}}"#,
        )
        .unwrap();
        let order: Vec<&str> = doc.skills.iter().map(|l| l.category.as_str()).collect();
        assert_eq!(order, vec!["zeta", "alpha", "mid"]);
        assert_eq!(doc.skill_count(), 3);
    }

    #[test]
    fn test_order_survives_value_round_trip() {
        let raw: serde_json::Value =
            serde_json::from_str(r#"{"skills": {"zeta": ["a"], "alpha": ["b"]}}"#).unwrap();
        let doc: ProfileDocument = serde_json::from_value(raw).unwrap();
        assert_eq!(doc.skills[0].category, "zeta");
    }

    #[test]
    fn test_missing_sections_default_to_empty() {
        let doc: ProfileDocument = serde_json::from_str("{}").unwrap();
        assert!(doc.skills.is_empty());
        assert!(doc.professional_experience.is_empty());
        assert!(doc.certifications.is_empty());
        assert!(doc.contact_info.name.is_none());
    }
}
