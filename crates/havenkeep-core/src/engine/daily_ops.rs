//! Daily cadence: login streaks and daily challenges.

use log::debug;
use rand::Rng;

use havenkeep_logic::quests::{login_bonus, QuestChannel, QuestReward};

use crate::clock::Clock;
use crate::generation::generate_challenges;

use super::GameEngine;

/// Outcome of a daily login check. A zero bonus means today was already
/// recorded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoginReport {
    pub bonus_coins: u64,
    pub streak: u32,
}

impl<C: Clock> GameEngine<C> {
    /// Record today's login at most once per calendar day. Consecutive
    /// days grow the streak; a gap resets it to 1. The coin bonus lands
    /// in gold and the lifetime coin counter.
    pub fn check_daily_login(&mut self) -> LoginReport {
        let today = self.now().day_number();

        if self.state.stats.last_login_day == Some(today) {
            return LoginReport {
                bonus_coins: 0,
                streak: self.state.stats.login_streak,
            };
        }

        let streak = match self.state.stats.last_login_day {
            Some(last) if last + 1 == today => self.state.stats.login_streak + 1,
            _ => 1,
        };
        let bonus = login_bonus(streak);

        self.state.stats.login_streak = streak;
        self.state.stats.last_login_day = Some(today);
        self.state.resources.gold = self.state.resources.gold.saturating_add(bonus);
        self.state.stats.total_coins_earned += bonus;
        debug!("daily login: streak {streak}, bonus {bonus}");

        LoginReport {
            bonus_coins: bonus,
            streak,
        }
    }

    /// Wholesale-replace the daily challenge set for a new day.
    pub fn refresh_daily_challenges(&mut self, rng: &mut impl Rng) {
        self.state.challenges = generate_challenges(self.state.hero.level, rng);
        debug!(
            "daily challenges refreshed ({} challenges)",
            self.state.challenges.len()
        );
    }

    /// Advance every matching challenge; rewards are granted
    /// automatically at the completion transition — there is no claim
    /// step for challenges. Returns the rewards granted by this call.
    pub fn update_challenge_progress(
        &mut self,
        channel: QuestChannel,
        amount: u64,
    ) -> Vec<QuestReward> {
        let mut granted = Vec::new();
        for i in 0..self.state.challenges.len() {
            let challenge = &mut self.state.challenges[i];
            if challenge.channel == channel && challenge.advance(amount) {
                let reward = challenge.reward;
                let id = challenge.id.clone();
                self.state.stats.completed_quests += 1;
                self.apply_reward(&reward);
                debug!("challenge {id} completed, reward auto-granted");
                granted.push(reward);
            }
        }
        granted
    }
}
