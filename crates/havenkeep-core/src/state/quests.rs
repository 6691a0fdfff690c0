//! Quest and daily-challenge snapshot entries.
//!
//! The two ledgers are deliberately asymmetric: quests keep a `claimed`
//! flag and pay out on an explicit claim, while challenges auto-grant at
//! the completion transition and carry no claim state.

use serde::{Deserialize, Serialize};

use havenkeep_logic::quests::{QuestChannel, QuestReward, QuestTemplate};

/// A persistent quest. `progress <= target` always holds, and `claimed`
/// can only become true after `completed`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Quest {
    pub id: String,
    pub channel: QuestChannel,
    pub description: String,
    pub progress: u64,
    pub target: u64,
    pub reward: QuestReward,
    pub completed: bool,
    pub claimed: bool,
}

impl Default for Quest {
    fn default() -> Self {
        Self {
            id: String::new(),
            channel: QuestChannel::Build,
            description: String::new(),
            progress: 0,
            target: 1,
            reward: QuestReward::default(),
            completed: false,
            claimed: false,
        }
    }
}

impl Quest {
    /// Instantiate a template with a level-scaled target.
    pub fn from_template(template: &QuestTemplate, hero_level: u32) -> Self {
        Self {
            id: template.id.to_string(),
            channel: template.channel,
            description: template.description.to_string(),
            progress: 0,
            target: template.target_for_level(hero_level),
            reward: template.reward,
            completed: false,
            claimed: false,
        }
    }

    /// Advance progress, clamped to the target. Returns `true` on the
    /// completion transition.
    pub fn advance(&mut self, amount: u64) -> bool {
        if self.completed {
            return false;
        }
        self.progress = self.progress.saturating_add(amount).min(self.target);
        if self.progress == self.target {
            self.completed = true;
            return true;
        }
        false
    }
}

/// A daily challenge: same progress mechanics as a quest, no claim step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DailyChallenge {
    pub id: String,
    pub channel: QuestChannel,
    pub description: String,
    pub progress: u64,
    pub target: u64,
    pub reward: QuestReward,
    pub completed: bool,
}

impl Default for DailyChallenge {
    fn default() -> Self {
        Self {
            id: String::new(),
            channel: QuestChannel::Build,
            description: String::new(),
            progress: 0,
            target: 1,
            reward: QuestReward::default(),
            completed: false,
        }
    }
}

impl DailyChallenge {
    pub fn from_template(template: &QuestTemplate, hero_level: u32) -> Self {
        Self {
            id: template.id.to_string(),
            channel: template.channel,
            description: template.description.to_string(),
            progress: 0,
            target: template.target_for_level(hero_level),
            reward: template.reward,
            completed: false,
        }
    }

    pub fn advance(&mut self, amount: u64) -> bool {
        if self.completed {
            return false;
        }
        self.progress = self.progress.saturating_add(amount).min(self.target);
        if self.progress == self.target {
            self.completed = true;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quest(target: u64) -> Quest {
        Quest {
            target,
            ..Quest::default()
        }
    }

    #[test]
    fn advance_clamps_to_target() {
        let mut q = quest(5);
        assert!(!q.advance(3));
        assert_eq!(q.progress, 3);
        assert!(q.advance(100));
        assert_eq!(q.progress, 5);
        assert!(q.completed);
    }

    #[test]
    fn completion_transition_fires_once() {
        let mut q = quest(2);
        assert!(q.advance(2));
        assert!(!q.advance(1));
        assert_eq!(q.progress, 2);
    }

    #[test]
    fn completed_quests_stop_advancing() {
        let mut q = quest(1);
        q.advance(1);
        let before = q.progress;
        q.advance(10);
        assert_eq!(q.progress, before);
    }
}
