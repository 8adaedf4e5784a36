//! Per-zone quest tracking
//!
//! A zone is complete when every category counter reaches its total. The
//! completed-zone fact is the only thing promoted into `GameData`.

use glam::Vec2;

use super::station::Station;
use crate::save::GameData;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryProgress {
    pub name: &'static str,
    pub completed: usize,
    pub total: usize,
}

/// What a single station completion produced
#[derive(Debug, Clone, PartialEq)]
pub struct StationCompletion {
    pub index: usize,
    pub xp: u64,
    pub message: String,
    pub sound: &'static str,
}

#[derive(Debug, Clone)]
pub struct QuestTracker {
    zone_id: u32,
    stations: Vec<Station>,
    categories: Vec<CategoryProgress>,
}

impl QuestTracker {
    /// Categories are counted in order of first appearance
    pub fn new(zone_id: u32, stations: Vec<Station>) -> Self {
        let mut categories: Vec<CategoryProgress> = Vec::new();
        for station in &stations {
            let name = station.kind.category();
            match categories.iter_mut().find(|c| c.name == name) {
                Some(progress) => progress.total += 1,
                None => categories.push(CategoryProgress {
                    name,
                    completed: 0,
                    total: 1,
                }),
            }
        }
        Self {
            zone_id,
            stations,
            categories,
        }
    }

    pub fn zone_id(&self) -> u32 {
        self.zone_id
    }

    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    pub fn categories(&self) -> &[CategoryProgress] {
        &self.categories
    }

    /// Complete station `index`. `None` if it was already complete.
    pub fn complete_station(&mut self, index: usize) -> Option<StationCompletion> {
        let station = self.stations.get_mut(index)?;
        if !station.complete() {
            return None;
        }
        let kind = station.kind;
        if let Some(progress) = self
            .categories
            .iter_mut()
            .find(|c| c.name == kind.category())
        {
            progress.completed += 1;
        }
        Some(StationCompletion {
            index,
            xp: kind.xp_reward(),
            message: kind.completion_message(),
            sound: kind.sound(),
        })
    }

    /// Interact from `player_center`: completes at most one station per
    /// category, the first incomplete one in reach.
    pub fn try_interact(&mut self, player_center: Vec2) -> Vec<StationCompletion> {
        let targets: Vec<usize> = self
            .categories
            .iter()
            .filter_map(|category| {
                self.stations.iter().position(|s| {
                    s.kind.category() == category.name
                        && !s.is_completed()
                        && s.in_reach(player_center)
                })
            })
            .collect();

        targets
            .into_iter()
            .filter_map(|index| self.complete_station(index))
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.categories.iter().all(|c| c.completed == c.total)
    }

    /// Record the zone in `data` the first time it is complete.
    ///
    /// Returns the completion message only on that first call.
    pub fn check_completion(&self, data: &mut GameData) -> Option<String> {
        if self.is_complete() && data.record_zone_complete(self.zone_id) {
            Some(format!("Zone {} completed!", self.zone_id))
        } else {
            None
        }
    }

    /// Nearest incomplete station to `from`, by straight-line distance
    pub fn nearest_open(&self, from: Vec2) -> Option<&Station> {
        self.stations
            .iter()
            .filter(|s| !s.is_completed())
            .min_by(|a, b| {
                a.center()
                    .distance_squared(from)
                    .partial_cmp(&b.center().distance_squared(from))
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
    }

    /// HUD line, e.g. `Gherkin: 1/3  APIs: 0/3`
    pub fn progress_line(&self) -> String {
        self.categories
            .iter()
            .map(|c| format!("{}: {}/{}", c.name, c.completed, c.total))
            .collect::<Vec<_>>()
            .join("  ")
    }
}
