//! Quest channels, reward records, template tables, and login streaks.
//!
//! A channel groups quests and daily challenges that advance together on
//! the same gameplay event: placing a building feeds `Build`, winning a
//! battle feeds `Defeat` with the monster count, and so on. Templates are
//! static tables the core samples from when it regenerates a quest set.

use serde::{Deserialize, Serialize};

use crate::resources::Resources;

/// Number of persistent quests active after a refresh.
pub const QUESTS_PER_REFRESH: usize = 3;

/// Number of daily challenges generated each day.
pub const CHALLENGES_PER_DAY: usize = 3;

/// Progress channel — the gameplay event a quest listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuestChannel {
    /// Buildings placed.
    Build,
    /// Buildings upgraded.
    Upgrade,
    /// Resource units collected.
    Collect,
    /// Monsters defeated.
    Defeat,
    /// Hero levels gained.
    Reach,
}

/// What a completed quest pays out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuestReward {
    pub xp: u64,
    /// Coins credit the gold counter.
    pub coins: u64,
    pub resources: Option<Resources>,
}

/// A quest blueprint: the core instantiates these with level-scaled
/// targets.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestTemplate {
    pub id: &'static str,
    pub channel: QuestChannel,
    pub description: &'static str,
    pub base_target: u64,
    /// Extra target per hero level above 1.
    pub target_per_level: u64,
    pub reward: QuestReward,
}

impl QuestTemplate {
    /// Target for a hero of the given level.
    pub fn target_for_level(&self, hero_level: u32) -> u64 {
        self.base_target + self.target_per_level * hero_level.saturating_sub(1) as u64
    }
}

/// Persistent quest blueprints.
pub fn quest_templates() -> Vec<QuestTemplate> {
    vec![
        QuestTemplate {
            id: "raise_the_walls",
            channel: QuestChannel::Build,
            description: "Place new buildings",
            base_target: 3,
            target_per_level: 1,
            reward: QuestReward {
                xp: 60,
                coins: 150,
                resources: Some(Resources::new(25, 0, 0, 0)),
            },
        },
        QuestTemplate {
            id: "master_builder",
            channel: QuestChannel::Upgrade,
            description: "Upgrade buildings",
            base_target: 2,
            target_per_level: 1,
            reward: QuestReward {
                xp: 80,
                coins: 200,
                resources: None,
            },
        },
        QuestTemplate {
            id: "harvest_season",
            channel: QuestChannel::Collect,
            description: "Collect resource units",
            base_target: 100,
            target_per_level: 50,
            reward: QuestReward {
                xp: 50,
                coins: 120,
                resources: Some(Resources::new(0, 0, 0, 30)),
            },
        },
        QuestTemplate {
            id: "clear_the_roads",
            channel: QuestChannel::Defeat,
            description: "Defeat monsters",
            base_target: 3,
            target_per_level: 1,
            reward: QuestReward {
                xp: 100,
                coins: 250,
                resources: None,
            },
        },
        QuestTemplate {
            id: "growing_renown",
            channel: QuestChannel::Reach,
            description: "Gain hero levels",
            base_target: 1,
            target_per_level: 0,
            reward: QuestReward {
                xp: 0,
                coins: 300,
                resources: Some(Resources::new(20, 20, 0, 0)),
            },
        },
        QuestTemplate {
            id: "stockpile",
            channel: QuestChannel::Collect,
            description: "Fill the granaries",
            base_target: 250,
            target_per_level: 75,
            reward: QuestReward {
                xp: 120,
                coins: 300,
                resources: None,
            },
        },
        QuestTemplate {
            id: "monster_hunter",
            channel: QuestChannel::Defeat,
            description: "Hunt a pack of monsters",
            base_target: 6,
            target_per_level: 2,
            reward: QuestReward {
                xp: 180,
                coins: 400,
                resources: Some(Resources::new(0, 0, 50, 0)),
            },
        },
        QuestTemplate {
            id: "cornerstones",
            channel: QuestChannel::Build,
            description: "Lay the foundations of a district",
            base_target: 5,
            target_per_level: 2,
            reward: QuestReward {
                xp: 150,
                coins: 350,
                resources: None,
            },
        },
    ]
}

/// Daily challenge blueprints — smaller targets, auto-granted rewards.
pub fn challenge_templates() -> Vec<QuestTemplate> {
    vec![
        QuestTemplate {
            id: "daily_build",
            channel: QuestChannel::Build,
            description: "Place a building today",
            base_target: 1,
            target_per_level: 0,
            reward: QuestReward {
                xp: 25,
                coins: 75,
                resources: None,
            },
        },
        QuestTemplate {
            id: "daily_harvest",
            channel: QuestChannel::Collect,
            description: "Collect resources today",
            base_target: 40,
            target_per_level: 20,
            reward: QuestReward {
                xp: 20,
                coins: 60,
                resources: None,
            },
        },
        QuestTemplate {
            id: "daily_patrol",
            channel: QuestChannel::Defeat,
            description: "Defeat a monster today",
            base_target: 1,
            target_per_level: 0,
            reward: QuestReward {
                xp: 35,
                coins: 100,
                resources: None,
            },
        },
        QuestTemplate {
            id: "daily_improvement",
            channel: QuestChannel::Upgrade,
            description: "Upgrade a building today",
            base_target: 1,
            target_per_level: 0,
            reward: QuestReward {
                xp: 30,
                coins: 80,
                resources: None,
            },
        },
        QuestTemplate {
            id: "daily_training",
            channel: QuestChannel::Reach,
            description: "Gain a level today",
            base_target: 1,
            target_per_level: 0,
            reward: QuestReward {
                xp: 0,
                coins: 150,
                resources: None,
            },
        },
    ]
}

/// Coin bonus for a consecutive-login streak. The first login of a save
/// pays the base amount; each further consecutive day adds 1000 up to a
/// +5000 cap.
pub fn login_bonus(streak: u32) -> u64 {
    10_000 + (streak.saturating_sub(1) as u64 * 1000).min(5000)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn templates_are_consistent() {
        for t in quest_templates().iter().chain(challenge_templates().iter()) {
            assert!(!t.id.is_empty());
            assert!(!t.description.is_empty());
            assert!(t.base_target > 0, "{} has a zero target", t.id);
            let pays = t.reward.xp > 0
                || t.reward.coins > 0
                || t.reward.resources.map(|r| !r.is_zero()).unwrap_or(false);
            assert!(pays, "{} pays nothing", t.id);
        }
    }

    #[test]
    fn template_ids_are_unique() {
        let mut ids: Vec<_> = quest_templates()
            .iter()
            .chain(challenge_templates().iter())
            .map(|t| t.id)
            .collect();
        ids.sort_unstable();
        let before = ids.len();
        ids.dedup();
        assert_eq!(ids.len(), before);
    }

    #[test]
    fn targets_scale_with_level() {
        let t = &quest_templates()[0];
        assert_eq!(t.target_for_level(1), t.base_target);
        assert_eq!(
            t.target_for_level(5),
            t.base_target + 4 * t.target_per_level
        );
    }

    #[test]
    fn enough_templates_for_a_refresh() {
        assert!(quest_templates().len() >= QUESTS_PER_REFRESH);
        assert!(challenge_templates().len() >= CHALLENGES_PER_DAY);
    }

    #[test]
    fn login_bonus_first_day() {
        assert_eq!(login_bonus(1), 10_000);
    }

    #[test]
    fn login_bonus_second_day() {
        assert_eq!(login_bonus(2), 11_000);
    }

    #[test]
    fn login_bonus_caps_at_plus_5000() {
        assert_eq!(login_bonus(6), 15_000);
        assert_eq!(login_bonus(100), 15_000);
    }

    #[test]
    fn login_bonus_zero_streak_treated_as_first() {
        assert_eq!(login_bonus(0), 10_000);
    }
}
