//! Interactive stations and their per-type payloads

use glam::Vec2;

use crate::consts::*;
use crate::within_reach;

/// Footprint class of a station
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StationSize {
    /// 64 px, 50 px reach
    Large,
    /// 48 px, 40 px reach
    Small,
}

impl StationSize {
    pub fn size(self) -> f32 {
        match self {
            StationSize::Large => LARGE_STATION_SIZE,
            StationSize::Small => SMALL_STATION_SIZE,
        }
    }

    /// Half-extent of the square the player centre must be inside
    pub fn reach(self) -> f32 {
        match self {
            StationSize::Large => LARGE_STATION_REACH,
            StationSize::Small => SMALL_STATION_REACH,
        }
    }
}

/// One variant per station type, each carrying its own label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StationKind {
    GherkinPuzzle { scenario: &'static str },
    ApiTerminal { endpoint: &'static str },
    SqlTerminal { query: &'static str },
    AnalyticsDashboard { dashboard: &'static str },
    ModelWorkbench { model: &'static str },
    ResearchTerminal { topic: &'static str },
    BlueprintTable { system: &'static str },
    QaStation { test: &'static str },
}

impl StationKind {
    /// Counter label; stations sharing a category are tracked together
    pub fn category(&self) -> &'static str {
        match self {
            StationKind::GherkinPuzzle { .. } => "Gherkin",
            StationKind::ApiTerminal { .. } => "APIs",
            StationKind::SqlTerminal { .. } => "SQL",
            StationKind::AnalyticsDashboard { .. } => "Dashboards",
            StationKind::ModelWorkbench { .. } => "Models",
            StationKind::ResearchTerminal { .. } => "Research",
            StationKind::BlueprintTable { .. } => "Blueprints",
            StationKind::QaStation { .. } => "QA",
        }
    }

    pub fn label(&self) -> &'static str {
        match *self {
            StationKind::GherkinPuzzle { scenario } => scenario,
            StationKind::ApiTerminal { endpoint } => endpoint,
            StationKind::SqlTerminal { query } => query,
            StationKind::AnalyticsDashboard { dashboard } => dashboard,
            StationKind::ModelWorkbench { model } => model,
            StationKind::ResearchTerminal { topic } => topic,
            StationKind::BlueprintTable { system } => system,
            StationKind::QaStation { test } => test,
        }
    }

    pub fn xp_reward(&self) -> u64 {
        match self {
            StationKind::GherkinPuzzle { .. } => 50,
            StationKind::ApiTerminal { .. } => 75,
            StationKind::SqlTerminal { .. } => 60,
            StationKind::AnalyticsDashboard { .. } => 80,
            StationKind::ModelWorkbench { .. } => 70,
            StationKind::ResearchTerminal { .. } => 90,
            StationKind::BlueprintTable { .. } => 85,
            StationKind::QaStation { .. } => 65,
        }
    }

    pub fn size(&self) -> StationSize {
        match self {
            StationKind::GherkinPuzzle { .. }
            | StationKind::SqlTerminal { .. }
            | StationKind::ModelWorkbench { .. }
            | StationKind::BlueprintTable { .. } => StationSize::Large,
            _ => StationSize::Small,
        }
    }

    pub fn sound(&self) -> &'static str {
        match self {
            StationKind::GherkinPuzzle { .. } => "gherkin_complete.wav",
            StationKind::ApiTerminal { .. } => "api_validated.wav",
            StationKind::SqlTerminal { .. } => "sql_success.wav",
            StationKind::AnalyticsDashboard { .. } => "dashboard_created.wav",
            StationKind::ModelWorkbench { .. } => "model_built.wav",
            StationKind::ResearchTerminal { .. } => "research_complete.wav",
            StationKind::BlueprintTable { .. } => "blueprint_done.wav",
            StationKind::QaStation { .. } => "qa_complete.wav",
        }
    }

    pub fn completion_message(&self) -> String {
        let label = self.label();
        match self {
            StationKind::GherkinPuzzle { .. } => format!("Gherkin puzzle completed: {label}"),
            StationKind::ApiTerminal { .. } => format!("API validated: {label}"),
            StationKind::SqlTerminal { .. } => format!("SQL query solved: {label}"),
            StationKind::AnalyticsDashboard { .. } => {
                format!("Analytics dashboard created: {label}")
            }
            StationKind::ModelWorkbench { .. } => format!("Model built: {label}"),
            StationKind::ResearchTerminal { .. } => format!("Research completed: {label}"),
            StationKind::BlueprintTable { .. } => format!("Blueprint designed: {label}"),
            StationKind::QaStation { .. } => format!("QA test completed: {label}"),
        }
    }

    pub fn sprite(&self) -> String {
        let stem = match self {
            StationKind::GherkinPuzzle { .. } => "gherkin_station",
            StationKind::ApiTerminal { .. } => "api_terminal",
            StationKind::SqlTerminal { .. } => "sql_terminal",
            StationKind::AnalyticsDashboard { .. } => "dashboard",
            StationKind::ModelWorkbench { .. } => "model_workbench",
            StationKind::ResearchTerminal { .. } => "research_terminal",
            StationKind::BlueprintTable { .. } => "blueprint_table",
            StationKind::QaStation { .. } => "qa_station",
        };
        format!("sprites/stations/{stem}.png")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    pub kind: StationKind,
    /// Top-left corner in world pixels
    pub pos: Vec2,
    completed: bool,
}

impl Station {
    pub fn new(kind: StationKind, x: f32, y: f32) -> Self {
        Self {
            kind,
            pos: Vec2::new(x, y),
            completed: false,
        }
    }

    pub fn size(&self) -> f32 {
        self.kind.size().size()
    }

    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.size() / 2.0)
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn in_reach(&self, player_center: Vec2) -> bool {
        within_reach(player_center, self.center(), self.kind.size().reach())
    }

    /// Flip to completed. False if it already was.
    pub fn complete(&mut self) -> bool {
        if self.completed {
            return false;
        }
        self.completed = true;
        true
    }
}
