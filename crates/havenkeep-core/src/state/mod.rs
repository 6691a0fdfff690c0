//! Snapshot definitions — the unit of persistence.
//!
//! These are plain serde structs with no behavior beyond derived
//! aggregates. Every container tolerates missing fields on load
//! (`#[serde(default)]`), which is what lets an envelope written by an
//! older schema still deserialize.

mod battle;
mod city;
mod hero;
mod meta;
mod quests;

pub use battle::*;
pub use city::*;
pub use hero::*;
pub use meta::*;
pub use quests::*;

use serde::{Deserialize, Serialize};

use havenkeep_logic::resources::Resources;

use crate::clock::GameTime;

/// The complete persisted state of one player's save.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameState {
    pub hero: Hero,
    pub city: City,
    pub resources: Resources,
    pub quests: Vec<Quest>,
    pub challenges: Vec<DailyChallenge>,
    pub battle: BattleSession,
    pub stats: GameStats,
    pub settings: Settings,
    pub last_saved: GameTime,
}

impl GameState {
    /// Starting resources for a fresh save.
    pub fn starting_resources() -> Resources {
        Resources::new(100, 50, 50, 100)
    }

    /// A fresh level-1 state. Quest and challenge sets are generated by
    /// the engine on reset, not here — state stays data-only.
    pub fn new_game() -> Self {
        Self {
            resources: Self::starting_resources(),
            ..Self::default()
        }
    }
}
