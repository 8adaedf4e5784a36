//! Zones: station layouts, quest tracking and the demo pilot
//!
//! Every zone places three large stations and three small ones on the same
//! footprint; only the station types and labels differ.

pub mod demo;
pub mod quest;
pub mod scene;
pub mod station;

pub use demo::DemoPilot;
pub use quest::{CategoryProgress, QuestTracker, StationCompletion};
pub use scene::{ZonePhase, ZoneScene};
pub use station::{Station, StationKind, StationSize};

/// Top-left corners of the large stations
const LARGE_SPOTS: [(f32, f32); 3] = [(200.0, 200.0), (400.0, 300.0), (600.0, 250.0)];
/// Top-left corners of the small stations
const SMALL_SPOTS: [(f32, f32); 3] = [(150.0, 400.0), (350.0, 450.0), (550.0, 350.0)];

/// Zone ids in play order
pub const ZONE_IDS: [u32; 4] = [1, 2, 3, 4];

pub trait ZoneDefinition {
    fn id(&self) -> u32;

    fn name(&self) -> &'static str;

    /// Clear colour behind the zone
    fn background(&self) -> [f32; 4];

    /// Fresh, all-incomplete stations
    fn stations(&self) -> Vec<Station>;
}

fn rgb(r: u8, g: u8, b: u8) -> [f32; 4] {
    [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0]
}

fn layout(large: [StationKind; 3], small: [StationKind; 3]) -> Vec<Station> {
    let large = large
        .into_iter()
        .zip(LARGE_SPOTS)
        .map(|(kind, (x, y))| Station::new(kind, x, y));
    let small = small
        .into_iter()
        .zip(SMALL_SPOTS)
        .map(|(kind, (x, y))| Station::new(kind, x, y));
    large.chain(small).collect()
}

/// Zone 1: requirements and API work
#[derive(Debug, Clone, Copy, Default)]
pub struct EnterpriseHub;

impl ZoneDefinition for EnterpriseHub {
    fn id(&self) -> u32 {
        1
    }

    fn name(&self) -> &'static str {
        "Enterprise Hub"
    }

    fn background(&self) -> [f32; 4] {
        rgb(20, 20, 40)
    }

    fn stations(&self) -> Vec<Station> {
        use StationKind::{ApiTerminal, GherkinPuzzle};
        layout(
            [
                GherkinPuzzle { scenario: "User login" },
                GherkinPuzzle { scenario: "Data export" },
                GherkinPuzzle { scenario: "Report generation" },
            ],
            [
                ApiTerminal { endpoint: "/api/users" },
                ApiTerminal { endpoint: "/api/reports" },
                ApiTerminal { endpoint: "/api/data" },
            ],
        )
    }
}

/// Zone 2: queries and dashboards
#[derive(Debug, Clone, Copy, Default)]
pub struct DataCenter;

impl ZoneDefinition for DataCenter {
    fn id(&self) -> u32 {
        2
    }

    fn name(&self) -> &'static str {
        "Data Center"
    }

    fn background(&self) -> [f32; 4] {
        rgb(10, 10, 20)
    }

    fn stations(&self) -> Vec<Station> {
        use StationKind::{AnalyticsDashboard, SqlTerminal};
        layout(
            [
                SqlTerminal { query: "SELECT users FROM database" },
                SqlTerminal { query: "JOIN tables ON condition" },
                SqlTerminal { query: "GROUP BY aggregate" },
            ],
            [
                AnalyticsDashboard { dashboard: "Sales Analytics" },
                AnalyticsDashboard { dashboard: "User Metrics" },
                AnalyticsDashboard { dashboard: "Performance Data" },
            ],
        )
    }
}

/// Zone 3: models and research
#[derive(Debug, Clone, Copy, Default)]
pub struct MlAcademy;

impl ZoneDefinition for MlAcademy {
    fn id(&self) -> u32 {
        3
    }

    fn name(&self) -> &'static str {
        "ML Academy"
    }

    fn background(&self) -> [f32; 4] {
        rgb(20, 30, 20)
    }

    fn stations(&self) -> Vec<Station> {
        use StationKind::{ModelWorkbench, ResearchTerminal};
        layout(
            [
                ModelWorkbench { model: "Linear Regression" },
                ModelWorkbench { model: "Decision Tree" },
                ModelWorkbench { model: "Neural Network" },
            ],
            [
                ResearchTerminal { topic: "Statistical Analysis" },
                ResearchTerminal { topic: "Machine Learning" },
                ResearchTerminal { topic: "Data Visualization" },
            ],
        )
    }
}

/// Zone 4: systems design and QA
#[derive(Debug, Clone, Copy, Default)]
pub struct EngineeringWorkshop;

impl ZoneDefinition for EngineeringWorkshop {
    fn id(&self) -> u32 {
        4
    }

    fn name(&self) -> &'static str {
        "Engineering Workshop"
    }

    fn background(&self) -> [f32; 4] {
        rgb(30, 20, 10)
    }

    fn stations(&self) -> Vec<Station> {
        use StationKind::{BlueprintTable, QaStation};
        layout(
            [
                BlueprintTable { system: "Process Control" },
                BlueprintTable { system: "Quality Management" },
                BlueprintTable { system: "Safety Systems" },
            ],
            [
                QaStation { test: "System Validation" },
                QaStation { test: "Performance Testing" },
                QaStation { test: "Safety Compliance" },
            ],
        )
    }
}

pub fn zone_definition(id: u32) -> Option<Box<dyn ZoneDefinition>> {
    match id {
        1 => Some(Box::new(EnterpriseHub)),
        2 => Some(Box::new(DataCenter)),
        3 => Some(Box::new(MlAcademy)),
        4 => Some(Box::new(EngineeringWorkshop)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_zone_has_two_categories_of_three() {
        for id in ZONE_IDS {
            let zone = zone_definition(id).unwrap();
            assert_eq!(zone.id(), id);
            let quests = QuestTracker::new(id, zone.stations());
            assert_eq!(quests.categories().len(), 2, "zone {id}");
            assert!(quests.categories().iter().all(|c| c.total == 3));
            assert!(!quests.is_complete());
        }
        assert!(zone_definition(5).is_none());
    }

    #[test]
    fn test_zone_rewards_match_layout() {
        let total: u64 = EnterpriseHub
            .stations()
            .iter()
            .map(|s| s.kind.xp_reward())
            .sum();
        assert_eq!(total, 3 * 50 + 3 * 75);

        let zone4 = EngineeringWorkshop.stations();
        assert_eq!(zone4[0].kind.xp_reward(), 85);
        assert_eq!(zone4[3].kind.xp_reward(), 65);
        assert_eq!(zone4[3].pos, glam::Vec2::new(150.0, 400.0));
        assert_eq!(zone4[3].size(), 48.0);
    }
}
