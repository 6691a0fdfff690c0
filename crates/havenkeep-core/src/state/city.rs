//! City snapshot: the building grid and its derived aggregates.
//!
//! Population, score, and tier are recomputed from the building list on
//! every read — they are never stored, so they cannot drift from the
//! grid.

use serde::{Deserialize, Serialize};

use havenkeep_logic::buildings::{BuildingCategory, BuildingKind};
use havenkeep_logic::city::{self, CityTier};

use crate::clock::GameTime;

/// One placed building. `id`, `kind`, and position are fixed for the
/// building's lifetime; only `level`, health, rate, and the collection
/// timestamp change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Building {
    pub id: String,
    pub kind: BuildingKind,
    pub x: u32,
    pub y: u32,
    pub level: u32,
    pub health: u32,
    pub max_health: u32,
    pub production_rate: f64,
    pub last_collected: GameTime,
}

impl Default for Building {
    fn default() -> Self {
        Self {
            id: String::new(),
            kind: BuildingKind::House,
            x: 0,
            y: 0,
            level: 1,
            health: 0,
            max_health: 0,
            production_rate: 0.0,
            last_collected: GameTime::default(),
        }
    }
}

/// The city snapshot: a sparse grid of buildings keyed by position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct City {
    pub name: String,
    pub buildings: Vec<Building>,
    /// Monotonic counter backing building id allocation.
    pub next_building_id: u64,
}

impl Default for City {
    fn default() -> Self {
        Self {
            name: "New Haven".to_string(),
            buildings: Vec::new(),
            next_building_id: 1,
        }
    }
}

impl City {
    pub fn building(&self, id: &str) -> Option<&Building> {
        self.buildings.iter().find(|b| b.id == id)
    }

    pub fn building_mut(&mut self, id: &str) -> Option<&mut Building> {
        self.buildings.iter_mut().find(|b| b.id == id)
    }

    pub fn is_occupied(&self, x: u32, y: u32) -> bool {
        self.buildings.iter().any(|b| b.x == x && b.y == y)
    }

    /// Stable, unique id for a new building.
    pub fn allocate_id(&mut self) -> String {
        let id = format!("bld-{}", self.next_building_id);
        self.next_building_id += 1;
        id
    }

    pub fn population(&self) -> u64 {
        city::population(&self.kind_levels())
    }

    pub fn score(&self) -> u64 {
        city::score(&self.kind_levels())
    }

    pub fn tier(&self) -> CityTier {
        CityTier::from_score(self.score())
    }

    /// Summed levels of defense buildings, feeding the battle tower
    /// bonus.
    pub fn defense_levels(&self) -> u32 {
        self.buildings
            .iter()
            .filter(|b| b.kind.info().category == BuildingCategory::Defense)
            .map(|b| b.level)
            .sum()
    }

    fn kind_levels(&self) -> Vec<(BuildingKind, u32)> {
        self.buildings.iter().map(|b| (b.kind, b.level)).collect()
    }
}
