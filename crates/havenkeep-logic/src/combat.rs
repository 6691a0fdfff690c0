//! Monster catalog, stat scaling, and battle formulas.
//!
//! Battles are scripted and deterministic once a roster exists: every
//! number here is a pure function of the hero's skills, the monster
//! stats, and the city's defense buildings. Randomness only enters when
//! the core generates a roster.

use serde::{Deserialize, Serialize};

use crate::progression::SkillKind;
use crate::resources::Resources;

/// All monster kinds, in unlock order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum MonsterKind {
    Slime = 0,
    Goblin = 1,
    Wolf = 2,
    Skeleton = 3,
    Orc = 4,
    Troll = 5,
    Dragon = 6,
}

/// Base stats for a monster kind, before hero-level scaling.
#[derive(Debug, Clone, PartialEq)]
pub struct MonsterInfo {
    pub name: &'static str,
    /// Hero level at which this kind joins the encounter pool.
    pub unlock_level: u32,
    pub health: u32,
    pub attack: u32,
    pub xp_reward: u64,
    pub loot: Resources,
}

impl MonsterKind {
    pub const ALL: [MonsterKind; 7] = [
        MonsterKind::Slime,
        MonsterKind::Goblin,
        MonsterKind::Wolf,
        MonsterKind::Skeleton,
        MonsterKind::Orc,
        MonsterKind::Troll,
        MonsterKind::Dragon,
    ];

    pub fn info(&self) -> MonsterInfo {
        match self {
            Self::Slime => MonsterInfo {
                name: "Slime",
                unlock_level: 1,
                health: 20,
                attack: 4,
                xp_reward: 10,
                loot: Resources::new(0, 0, 5, 2),
            },
            Self::Goblin => MonsterInfo {
                name: "Goblin",
                unlock_level: 1,
                health: 30,
                attack: 6,
                xp_reward: 15,
                loot: Resources::new(3, 0, 8, 0),
            },
            Self::Wolf => MonsterInfo {
                name: "Wolf",
                unlock_level: 5,
                health: 45,
                attack: 9,
                xp_reward: 25,
                loot: Resources::new(0, 0, 0, 10),
            },
            Self::Skeleton => MonsterInfo {
                name: "Skeleton",
                unlock_level: 10,
                health: 60,
                attack: 12,
                xp_reward: 40,
                loot: Resources::new(0, 5, 15, 0),
            },
            Self::Orc => MonsterInfo {
                name: "Orc",
                unlock_level: 15,
                health: 90,
                attack: 16,
                xp_reward: 60,
                loot: Resources::new(10, 0, 25, 0),
            },
            Self::Troll => MonsterInfo {
                name: "Troll",
                unlock_level: 25,
                health: 140,
                attack: 22,
                xp_reward: 100,
                loot: Resources::new(0, 20, 40, 0),
            },
            Self::Dragon => MonsterInfo {
                name: "Dragon",
                unlock_level: 40,
                health: 250,
                attack: 35,
                xp_reward: 250,
                loot: Resources::new(0, 0, 120, 0),
            },
        }
    }

    pub fn from_u8(val: u8) -> Option<Self> {
        match val {
            0 => Some(Self::Slime),
            1 => Some(Self::Goblin),
            2 => Some(Self::Wolf),
            3 => Some(Self::Skeleton),
            4 => Some(Self::Orc),
            5 => Some(Self::Troll),
            6 => Some(Self::Dragon),
            _ => None,
        }
    }
}

/// Encounter pool for a hero level — widens as the hero grows.
pub fn kinds_for_level(hero_level: u32) -> Vec<MonsterKind> {
    MonsterKind::ALL
        .iter()
        .copied()
        .filter(|k| k.info().unlock_level <= hero_level)
        .collect()
}

/// Party size for a hero level: one monster plus one per ten levels,
/// capped at three.
pub fn monster_count(hero_level: u32) -> usize {
    ((1 + hero_level / 10) as usize).min(3)
}

/// Scale a base stat by hero level: +10% per level, floored.
pub fn scaled(base: u32, hero_level: u32) -> u32 {
    (base as f64 * level_factor(hero_level)).floor() as u32
}

/// Same scaling for XP rewards.
pub fn scaled_xp(base: u64, hero_level: u32) -> u64 {
    (base as f64 * level_factor(hero_level)).floor() as u64
}

/// Same scaling applied to every loot counter.
pub fn scaled_loot(base: &Resources, hero_level: u32) -> Resources {
    base.scaled(level_factor(hero_level))
}

fn level_factor(hero_level: u32) -> f64 {
    1.0 + hero_level as f64 * 0.1
}

/// Player health pool: 100 plus 10 per defense skill point.
pub fn player_max_health(defense_skill: u8) -> u32 {
    100 + defense_skill as u32 * 10
}

/// Flat damage bonus from defense buildings: 2 per summed building level.
pub fn tower_bonus(defense_building_levels: u32) -> u32 {
    2 * defense_building_levels
}

/// What a skill does when used in battle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkillEffect {
    /// Damage dealt to the first living monster, or to all of them.
    Damage { amount: u32, area: bool },
    /// Healing applied to the player; monsters do not retaliate.
    Heal { amount: u32 },
}

/// Resolve a skill into its battle effect, or `None` for skills with no
/// battle use (gathering).
pub fn skill_effect(skill: SkillKind, skill_level: u8, tower_bonus: u32) -> Option<SkillEffect> {
    let level = skill_level as u32;
    match skill {
        SkillKind::Attack => Some(SkillEffect::Damage {
            amount: 18 + 4 * level + tower_bonus,
            area: false,
        }),
        SkillKind::Magic => Some(SkillEffect::Damage {
            amount: 10 + 3 * level + tower_bonus,
            area: true,
        }),
        SkillKind::Defense => Some(SkillEffect::Heal {
            amount: 15 + 5 * level,
        }),
        SkillKind::Gather => None,
    }
}

/// Total incoming damage from the surviving monsters: each hits for at
/// least 1 regardless of the hero's defense skill.
pub fn counter_damage(attacks: &[u32], defense_skill: u8) -> u32 {
    attacks
        .iter()
        .map(|atk| atk.saturating_sub(defense_skill as u32).max(1))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_is_consistent() {
        for kind in MonsterKind::ALL {
            let info = kind.info();
            assert!(!info.name.is_empty());
            assert!(info.health > 0);
            assert!(info.attack > 0);
            assert!(info.xp_reward > 0);
            assert!(!info.loot.is_zero(), "{:?} drops nothing", kind);
        }
    }

    #[test]
    fn from_u8_roundtrip() {
        for kind in MonsterKind::ALL {
            assert_eq!(MonsterKind::from_u8(kind as u8), Some(kind));
        }
        assert_eq!(MonsterKind::from_u8(99), None);
    }

    #[test]
    fn pool_widens_with_level() {
        let low = kinds_for_level(1);
        let mid = kinds_for_level(15);
        let high = kinds_for_level(50);
        assert_eq!(low.len(), 2);
        assert!(mid.len() > low.len());
        assert_eq!(high.len(), MonsterKind::ALL.len());
        for k in &low {
            assert!(mid.contains(k));
        }
    }

    #[test]
    fn party_size_caps_at_three() {
        assert_eq!(monster_count(1), 1);
        assert_eq!(monster_count(9), 1);
        assert_eq!(monster_count(10), 2);
        assert_eq!(monster_count(20), 3);
        assert_eq!(monster_count(50), 3);
    }

    #[test]
    fn stat_scaling_adds_ten_percent_per_level() {
        assert_eq!(scaled(20, 0), 20);
        assert_eq!(scaled(20, 5), 30);
        assert_eq!(scaled(20, 10), 40);
        assert_eq!(scaled_xp(15, 10), 30);
    }

    #[test]
    fn loot_scaling_floors_each_counter() {
        let base = Resources::new(3, 0, 8, 0);
        let scaled = scaled_loot(&base, 5);
        assert_eq!(scaled, Resources::new(4, 0, 12, 0));
    }

    #[test]
    fn player_health_grows_with_defense() {
        assert_eq!(player_max_health(1), 110);
        assert_eq!(player_max_health(10), 200);
    }

    #[test]
    fn attack_skill_hits_single_target() {
        let effect = skill_effect(SkillKind::Attack, 1, 0);
        assert_eq!(
            effect,
            Some(SkillEffect::Damage {
                amount: 22,
                area: false
            })
        );
    }

    #[test]
    fn magic_skill_hits_area() {
        let effect = skill_effect(SkillKind::Magic, 2, 4);
        assert_eq!(
            effect,
            Some(SkillEffect::Damage {
                amount: 20,
                area: true
            })
        );
    }

    #[test]
    fn defense_skill_heals() {
        let effect = skill_effect(SkillKind::Defense, 3, 100);
        // Tower bonus never applies to healing.
        assert_eq!(effect, Some(SkillEffect::Heal { amount: 30 }));
    }

    #[test]
    fn gather_has_no_battle_effect() {
        assert_eq!(skill_effect(SkillKind::Gather, 10, 10), None);
    }

    #[test]
    fn counter_damage_floors_at_one_per_monster() {
        // Three weak monsters against heavy defense: 1 each.
        assert_eq!(counter_damage(&[2, 3, 4], 10), 3);
        assert_eq!(counter_damage(&[16, 9], 4), 17);
        assert_eq!(counter_damage(&[], 4), 0);
    }

    #[test]
    fn tower_bonus_scales_with_levels() {
        assert_eq!(tower_bonus(0), 0);
        assert_eq!(tower_bonus(7), 14);
    }
}
