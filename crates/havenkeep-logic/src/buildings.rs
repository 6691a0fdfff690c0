//! Building catalog — costs, unlock levels, production recipes, upgrades.
//!
//! Each [`BuildingKind`] carries its full balance sheet in
//! [`BuildingKind::info`]. Placement legality and the actual grid live in
//! the core; this module only answers "what does this kind cost and do".

use serde::{Deserialize, Serialize};

use crate::resources::Resources;

/// Buildings never upgrade past this level.
pub const MAX_BUILDING_LEVEL: u32 = 5;

/// Max-health gained per upgrade.
pub const UPGRADE_HEALTH_BONUS: u32 = 20;

/// Production-rate growth factor per upgrade.
pub const UPGRADE_RATE_GROWTH: f64 = 1.2;

/// All placeable building kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum BuildingKind {
    /// Housing — the population backbone.
    House = 0,
    /// Food production.
    Farm = 1,
    /// Wood production.
    LumberMill = 2,
    /// Stone production.
    Quarry = 3,
    /// Gold production.
    GoldMine = 4,
    /// Defense — also feeds the battle tower bonus.
    Tower = 5,
    /// Defense, cheap and sturdy.
    Wall = 6,
    /// Civic centerpiece, small population boost.
    TownHall = 7,
}

/// Coarse building classification used by the city score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuildingCategory {
    Housing,
    Production,
    Defense,
    Civic,
}

/// One of the four ledger counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResourceKind {
    Wood,
    Stone,
    Gold,
    Food,
}

/// A production recipe: which counter the building feeds and how fast.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Production {
    pub resource: ResourceKind,
    /// Units per minute at building level 1, before boosts.
    pub rate: f64,
}

/// Static balance sheet for a building kind.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildingInfo {
    pub name: &'static str,
    pub category: BuildingCategory,
    pub cost: Resources,
    pub unlock_level: u32,
    pub base_health: u32,
    /// Population contributed per building level.
    pub population_per_level: u32,
    pub production: Option<Production>,
}

impl BuildingKind {
    /// All kinds in catalog order.
    pub const ALL: [BuildingKind; 8] = [
        BuildingKind::House,
        BuildingKind::Farm,
        BuildingKind::LumberMill,
        BuildingKind::Quarry,
        BuildingKind::GoldMine,
        BuildingKind::Tower,
        BuildingKind::Wall,
        BuildingKind::TownHall,
    ];

    pub fn info(&self) -> BuildingInfo {
        match self {
            Self::House => BuildingInfo {
                name: "House",
                category: BuildingCategory::Housing,
                cost: Resources::new(40, 20, 0, 0),
                unlock_level: 1,
                base_health: 100,
                population_per_level: 4,
                production: None,
            },
            Self::Farm => BuildingInfo {
                name: "Farm",
                category: BuildingCategory::Production,
                cost: Resources::new(50, 0, 0, 0),
                unlock_level: 1,
                base_health: 80,
                population_per_level: 0,
                production: Some(Production {
                    resource: ResourceKind::Food,
                    rate: 2.0,
                }),
            },
            Self::LumberMill => BuildingInfo {
                name: "Lumber Mill",
                category: BuildingCategory::Production,
                cost: Resources::new(60, 30, 0, 0),
                unlock_level: 2,
                base_health: 90,
                population_per_level: 0,
                production: Some(Production {
                    resource: ResourceKind::Wood,
                    rate: 1.5,
                }),
            },
            Self::Quarry => BuildingInfo {
                name: "Quarry",
                category: BuildingCategory::Production,
                cost: Resources::new(80, 20, 10, 0),
                unlock_level: 4,
                base_health: 110,
                population_per_level: 0,
                production: Some(Production {
                    resource: ResourceKind::Stone,
                    rate: 1.2,
                }),
            },
            Self::GoldMine => BuildingInfo {
                name: "Gold Mine",
                category: BuildingCategory::Production,
                cost: Resources::new(100, 80, 0, 0),
                unlock_level: 8,
                base_health: 120,
                population_per_level: 0,
                production: Some(Production {
                    resource: ResourceKind::Gold,
                    rate: 0.8,
                }),
            },
            Self::Tower => BuildingInfo {
                name: "Watchtower",
                category: BuildingCategory::Defense,
                cost: Resources::new(30, 60, 20, 0),
                unlock_level: 5,
                base_health: 150,
                population_per_level: 0,
                production: None,
            },
            Self::Wall => BuildingInfo {
                name: "Wall",
                category: BuildingCategory::Defense,
                cost: Resources::new(0, 40, 0, 0),
                unlock_level: 3,
                base_health: 200,
                population_per_level: 0,
                production: None,
            },
            Self::TownHall => BuildingInfo {
                name: "Town Hall",
                category: BuildingCategory::Civic,
                cost: Resources::new(120, 100, 50, 0),
                unlock_level: 10,
                base_health: 250,
                population_per_level: 2,
                production: None,
            },
        }
    }

    pub fn from_u8(val: u8) -> Option<Self> {
        match val {
            0 => Some(Self::House),
            1 => Some(Self::Farm),
            2 => Some(Self::LumberMill),
            3 => Some(Self::Quarry),
            4 => Some(Self::GoldMine),
            5 => Some(Self::Tower),
            6 => Some(Self::Wall),
            7 => Some(Self::TownHall),
            _ => None,
        }
    }
}

/// Upgrade cost from `level` to `level + 1`. Scales linearly with the
/// current level; food is never charged.
pub fn upgrade_cost(level: u32) -> Resources {
    let level = level as u64;
    Resources::new(50 * level, 30 * level, 20 * level, 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_is_consistent() {
        for kind in BuildingKind::ALL {
            let info = kind.info();
            assert!(!info.name.is_empty());
            assert!(info.unlock_level >= 1);
            assert!(info.base_health > 0);
            assert!(!info.cost.is_zero(), "{:?} must cost something", kind);
            if let Some(p) = info.production {
                assert!(p.rate > 0.0, "{:?} has a zero production rate", kind);
            }
        }
    }

    #[test]
    fn from_u8_roundtrip() {
        for kind in BuildingKind::ALL {
            assert_eq!(BuildingKind::from_u8(kind as u8), Some(kind));
        }
        assert_eq!(BuildingKind::from_u8(200), None);
    }

    #[test]
    fn every_resource_has_a_producer() {
        let mut produced = Vec::new();
        for kind in BuildingKind::ALL {
            if let Some(p) = kind.info().production {
                produced.push(p.resource);
            }
        }
        for res in [
            ResourceKind::Wood,
            ResourceKind::Stone,
            ResourceKind::Gold,
            ResourceKind::Food,
        ] {
            assert!(produced.contains(&res), "{:?} has no producer", res);
        }
    }

    #[test]
    fn level_one_buildings_exist() {
        let starters: Vec<_> = BuildingKind::ALL
            .iter()
            .filter(|k| k.info().unlock_level == 1)
            .collect();
        assert!(starters.len() >= 2);
    }

    #[test]
    fn upgrade_cost_scales_linearly() {
        assert_eq!(upgrade_cost(1), Resources::new(50, 30, 20, 0));
        assert_eq!(upgrade_cost(4), Resources::new(200, 120, 80, 0));
        assert_eq!(upgrade_cost(1).food, 0);
    }

    #[test]
    fn defense_kinds_are_flagged() {
        assert_eq!(
            BuildingKind::Tower.info().category,
            BuildingCategory::Defense
        );
        assert_eq!(BuildingKind::Wall.info().category, BuildingCategory::Defense);
        assert_ne!(
            BuildingKind::House.info().category,
            BuildingCategory::Defense
        );
    }
}
