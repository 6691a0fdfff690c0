//! Quest and daily-challenge set generation.

use rand::seq::SliceRandom;
use rand::Rng;

use havenkeep_logic::quests::{
    challenge_templates, quest_templates, CHALLENGES_PER_DAY, QUESTS_PER_REFRESH,
};

use crate::state::{DailyChallenge, Quest};

/// Sample a fresh persistent quest set for a hero level. Templates are
/// drawn without replacement, so a set never contains duplicates.
pub fn generate_quests(hero_level: u32, rng: &mut impl Rng) -> Vec<Quest> {
    quest_templates()
        .choose_multiple(rng, QUESTS_PER_REFRESH)
        .map(|t| Quest::from_template(t, hero_level))
        .collect()
}

/// Sample a fresh daily-challenge set for a hero level.
pub fn generate_challenges(hero_level: u32, rng: &mut impl Rng) -> Vec<DailyChallenge> {
    challenge_templates()
        .choose_multiple(rng, CHALLENGES_PER_DAY)
        .map(|t| DailyChallenge::from_template(t, hero_level))
        .collect()
}
