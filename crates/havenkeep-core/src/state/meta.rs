//! Lifetime counters and player settings.

use serde::{Deserialize, Serialize};

/// Meta-counters accumulated over the lifetime of a save.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameStats {
    pub monsters_defeated: u64,
    pub completed_quests: u64,
    pub total_coins_earned: u64,
    pub login_streak: u32,
    /// Calendar day index of the last recorded login.
    pub last_login_day: Option<i64>,
    pub play_time_minutes: u64,
}

/// Player-facing toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub music_enabled: bool,
    pub sfx_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            music_enabled: true,
            sfx_enabled: true,
        }
    }
}
