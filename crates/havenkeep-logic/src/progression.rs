//! Hero progression — XP curve, level cap, map size, skill multipliers.
//!
//! Leveling is a loop, not a single step: one large XP grant can cross
//! several thresholds, and each crossing grows the next threshold by
//! [`XP_GROWTH`]. Capabilities downstream of the level (map size, gather
//! boost) are pure functions and never stored.

use serde::{Deserialize, Serialize};

/// XP required to go from level 1 to level 2.
pub const BASE_XP_TO_NEXT: u64 = 100;

/// Per-level growth factor for the XP threshold (floored after each level).
pub const XP_GROWTH: f64 = 1.2;

/// Hero levels never exceed this.
pub const LEVEL_CAP: u32 = 50;

/// Individual skills never exceed this.
pub const SKILL_CAP: u8 = 10;

/// Hero skill categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkillKind {
    /// Single-target battle damage.
    Attack,
    /// Damage reduction, player health pool, battle healing.
    Defense,
    /// Production accrual multiplier.
    Gather,
    /// Area battle damage.
    Magic,
}

impl SkillKind {
    pub const ALL: [SkillKind; 4] = [
        SkillKind::Attack,
        SkillKind::Defense,
        SkillKind::Gather,
        SkillKind::Magic,
    ];
}

/// Result of pushing XP through the level curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelCurve {
    pub level: u32,
    pub xp: u64,
    pub xp_to_next: u64,
    pub levels_gained: u32,
}

/// Add `amount` XP to the curve position `(level, xp, xp_to_next)`.
///
/// While the accumulated XP covers the threshold and the level is below
/// [`LEVEL_CAP`], the threshold is subtracted, the level incremented, and
/// the threshold grown by [`XP_GROWTH`] (floored). At the cap, leftover
/// XP is clamped below the threshold so `xp < xp_to_next` keeps holding.
pub fn apply_xp(level: u32, xp: u64, xp_to_next: u64, amount: u64) -> LevelCurve {
    let mut level = level.min(LEVEL_CAP);
    let mut xp = xp.saturating_add(amount);
    let mut xp_to_next = xp_to_next.max(1);
    let mut levels_gained = 0;

    while xp >= xp_to_next && level < LEVEL_CAP {
        xp -= xp_to_next;
        level += 1;
        levels_gained += 1;
        xp_to_next = (xp_to_next as f64 * XP_GROWTH).floor() as u64;
    }

    if level == LEVEL_CAP && xp >= xp_to_next {
        xp = xp_to_next - 1;
    }

    LevelCurve {
        level,
        xp,
        xp_to_next,
        levels_gained,
    }
}

/// Grid edge length unlocked at a given hero level.
pub fn map_size_for_level(level: u32) -> u32 {
    if level < 15 {
        20
    } else if level < 30 {
        35
    } else {
        50
    }
}

/// Production multiplier from the gather skill: +10% per point above 1.
pub fn gather_multiplier(gather_skill: u8) -> f64 {
    1.0 + (gather_skill.max(1) - 1) as f64 * 0.1
}
