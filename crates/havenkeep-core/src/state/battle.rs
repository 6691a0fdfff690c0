//! Battle session snapshot.
//!
//! A session exists only while `active`; starting a new battle replaces
//! the whole record. The log keeps the last fight's lines after
//! resolution so the presentation layer can still show them.

use serde::{Deserialize, Serialize};

use havenkeep_logic::combat::MonsterKind;
use havenkeep_logic::resources::Resources;

/// One monster in the current roster, with stats already scaled to the
/// hero level at generation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Monster {
    pub id: u32,
    pub kind: MonsterKind,
    pub health: u32,
    pub max_health: u32,
    pub attack: u32,
    pub xp_reward: u64,
    pub loot: Resources,
}

impl Default for Monster {
    fn default() -> Self {
        Self {
            id: 0,
            kind: MonsterKind::Slime,
            health: 0,
            max_health: 0,
            attack: 0,
            xp_reward: 0,
            loot: Resources::ZERO,
        }
    }
}

impl Monster {
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }
}

/// Turn-based battle state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleSession {
    pub active: bool,
    pub monsters: Vec<Monster>,
    pub turn: u32,
    pub player_health: u32,
    pub max_player_health: u32,
    pub log: Vec<String>,
}

impl BattleSession {
    pub fn living(&self) -> impl Iterator<Item = &Monster> {
        self.monsters.iter().filter(|m| m.is_alive())
    }

    pub fn all_defeated(&self) -> bool {
        self.monsters.iter().all(|m| !m.is_alive())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn living_filters_dead_monsters() {
        let session = BattleSession {
            monsters: vec![
                Monster {
                    health: 10,
                    ..Monster::default()
                },
                Monster {
                    health: 0,
                    ..Monster::default()
                },
            ],
            ..BattleSession::default()
        };
        assert_eq!(session.living().count(), 1);
        assert!(!session.all_defeated());
    }

    #[test]
    fn empty_roster_counts_as_defeated() {
        assert!(BattleSession::default().all_defeated());
    }
}
