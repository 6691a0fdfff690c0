//! Quest tracker operations: refresh, progress fan-out, claims.

use log::debug;
use rand::Rng;

use havenkeep_logic::quests::{QuestChannel, QuestReward};

use crate::clock::Clock;
use crate::generation::generate_quests;

use super::{GameEngine, OpError, OpResult};

impl<C: Clock> GameEngine<C> {
    /// Wholesale-replace the persistent quest set with a fresh draw for
    /// the current hero level.
    pub fn refresh_quests(&mut self, rng: &mut impl Rng) {
        self.state.quests = generate_quests(self.state.hero.level, rng);
        debug!("quest set refreshed ({} quests)", self.state.quests.len());
    }

    /// Advance every active, non-completed quest on the channel. All
    /// matching entries move together — fan-out, not first-match.
    /// Returns the ids of quests that just completed.
    pub fn update_quest_progress(&mut self, channel: QuestChannel, amount: u64) -> Vec<String> {
        let mut completed = Vec::new();
        for quest in &mut self.state.quests {
            if quest.channel == channel && quest.advance(amount) {
                debug!("quest {} completed", quest.id);
                completed.push(quest.id.clone());
            }
        }
        completed
    }

    /// Claim a completed quest's reward. Claiming is idempotent: a
    /// second claim (or a claim on an incomplete quest) grants nothing
    /// and reports `None`. Unknown ids are rejected.
    pub fn claim_quest_reward(&mut self, quest_id: &str) -> OpResult<Option<QuestReward>> {
        let quest = self
            .state
            .quests
            .iter_mut()
            .find(|q| q.id == quest_id)
            .ok_or(OpError::InvalidState)?;

        if !quest.completed || quest.claimed {
            return Ok(None);
        }
        quest.claimed = true;
        let reward = quest.reward;

        self.state.stats.completed_quests += 1;
        self.apply_reward(&reward);
        debug!("quest {quest_id} claimed");
        Ok(Some(reward))
    }

    /// Route a gameplay event into both trackers.
    pub(crate) fn note_progress(&mut self, channel: QuestChannel, amount: u64) {
        if amount == 0 {
            return;
        }
        self.update_quest_progress(channel, amount);
        self.update_challenge_progress(channel, amount);
    }

    /// Pay out a reward: XP through the level curve, coins into gold
    /// and the lifetime counter, bundled resources into the ledger.
    pub(crate) fn apply_reward(&mut self, reward: &QuestReward) {
        if reward.xp > 0 {
            self.grant_xp(reward.xp);
        }
        if reward.coins > 0 {
            self.state.resources.gold = self.state.resources.gold.saturating_add(reward.coins);
            self.state.stats.total_coins_earned += reward.coins;
        }
        if let Some(bundle) = &reward.resources {
            self.state.resources.add(bundle);
        }
    }
}
