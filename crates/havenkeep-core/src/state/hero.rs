//! Hero snapshot: identity, level curve position, skills, cosmetics.

use serde::{Deserialize, Serialize};

use havenkeep_logic::progression::{self, SkillKind, BASE_XP_TO_NEXT, SKILL_CAP};

/// Cosmetic hero appearance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum HeroSkin {
    #[default]
    Classic = 0,
    Knight = 1,
    Ranger = 2,
    Mage = 3,
    Royal = 4,
}

/// Per-skill levels, each `1..=10`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillSet {
    pub attack: u8,
    pub defense: u8,
    pub gather: u8,
    pub magic: u8,
}

impl Default for SkillSet {
    fn default() -> Self {
        Self {
            attack: 1,
            defense: 1,
            gather: 1,
            magic: 1,
        }
    }
}

impl SkillSet {
    pub fn get(&self, kind: SkillKind) -> u8 {
        match kind {
            SkillKind::Attack => self.attack,
            SkillKind::Defense => self.defense,
            SkillKind::Gather => self.gather,
            SkillKind::Magic => self.magic,
        }
    }

    /// Raise a skill by one point. Returns `false` when already capped.
    pub fn raise(&mut self, kind: SkillKind) -> bool {
        let slot = match kind {
            SkillKind::Attack => &mut self.attack,
            SkillKind::Defense => &mut self.defense,
            SkillKind::Gather => &mut self.gather,
            SkillKind::Magic => &mut self.magic,
        };
        if *slot >= SKILL_CAP {
            return false;
        }
        *slot += 1;
        true
    }
}

/// The hero snapshot. `level` is monotonically non-decreasing for the
/// lifetime of a save and `xp < xp_to_next` holds after every operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Hero {
    pub name: String,
    pub skin: HeroSkin,
    pub level: u32,
    pub xp: u64,
    pub xp_to_next: u64,
    pub skill_points: u32,
    pub skills: SkillSet,
    pub unlocked_skins: Vec<HeroSkin>,
}

impl Default for Hero {
    fn default() -> Self {
        Self {
            name: "Hero".to_string(),
            skin: HeroSkin::default(),
            level: 1,
            xp: 0,
            xp_to_next: BASE_XP_TO_NEXT,
            skill_points: 0,
            skills: SkillSet::default(),
            unlocked_skins: vec![HeroSkin::Classic],
        }
    }
}

impl Hero {
    /// Grid edge length available at the current level.
    pub fn map_size(&self) -> u32 {
        progression::map_size_for_level(self.level)
    }

    pub fn has_skin(&self, skin: HeroSkin) -> bool {
        self.unlocked_skins.contains(&skin)
    }

    /// Idempotent set-insert.
    pub fn unlock_skin(&mut self, skin: HeroSkin) {
        if !self.has_skin(skin) {
            self.unlocked_skins.push(skin);
        }
    }
}
