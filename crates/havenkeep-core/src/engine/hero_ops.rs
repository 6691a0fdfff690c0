//! Hero operations: naming, cosmetics, XP, skill upgrades.

use log::debug;

use havenkeep_logic::progression::{self, LevelCurve, SkillKind};
use havenkeep_logic::quests::QuestChannel;

use crate::clock::Clock;
use crate::state::HeroSkin;

use super::{GameEngine, OpError, OpResult};

impl<C: Clock> GameEngine<C> {
    pub fn set_hero_name(&mut self, name: &str) {
        self.state.hero.name = name.to_string();
    }

    /// Switch the hero to an unlocked cosmetic skin.
    pub fn set_skin(&mut self, skin: HeroSkin) -> OpResult<()> {
        if !self.state.hero.has_skin(skin) {
            return Err(OpError::InvalidState);
        }
        self.state.hero.skin = skin;
        Ok(())
    }

    /// Idempotent cosmetic unlock.
    pub fn unlock_skin(&mut self, skin: HeroSkin) {
        self.state.hero.unlock_skin(skin);
    }

    /// Grant XP, looping the level curve for as many thresholds as the
    /// grant crosses. Level gains feed the `Reach` progress channel.
    pub fn add_xp(&mut self, amount: u64) -> LevelCurve {
        let curve = self.grant_xp(amount);
        if curve.levels_gained > 0 {
            self.note_progress(QuestChannel::Reach, curve.levels_gained as u64);
        }
        curve
    }

    /// Raise a skill one point, up to the cap. Returns the new level.
    pub fn upgrade_skill(&mut self, skill: SkillKind) -> OpResult<u8> {
        if !self.state.hero.skills.raise(skill) {
            return Err(OpError::AlreadyMaxed);
        }
        Ok(self.state.hero.skills.get(skill))
    }

    /// Apply the level curve without feeding progress channels. Reward
    /// payouts use this to keep the quest trackers from re-entering
    /// themselves.
    pub(crate) fn grant_xp(&mut self, amount: u64) -> LevelCurve {
        let hero = &mut self.state.hero;
        let curve = progression::apply_xp(hero.level, hero.xp, hero.xp_to_next, amount);
        hero.level = curve.level;
        hero.xp = curve.xp;
        hero.xp_to_next = curve.xp_to_next;
        hero.skill_points += curve.levels_gained;
        if curve.levels_gained > 0 {
            debug!(
                "hero reached level {} (+{} level{})",
                curve.level,
                curve.levels_gained,
                if curve.levels_gained == 1 { "" } else { "s" }
            );
        }
        curve
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{GameTime, ManualClock};

    fn engine() -> GameEngine<ManualClock> {
        GameEngine::from_state(
            crate::state::GameState::new_game(),
            ManualClock::new(GameTime::from_unix_ms(0)),
        )
    }

    #[test]
    fn add_xp_levels_up_and_normalizes() {
        let mut e = engine();
        let curve = e.add_xp(100);
        assert_eq!(curve.level, 2);
        assert_eq!(curve.levels_gained, 1);
        assert_eq!(e.state().hero.level, 2);
        assert_eq!(e.state().hero.xp, 0);
        assert_eq!(e.state().hero.xp_to_next, 120);
        assert_eq!(e.state().hero.skill_points, 1);
    }

    #[test]
    fn add_xp_zero_is_harmless() {
        let mut e = engine();
        let curve = e.add_xp(0);
        assert_eq!(curve.levels_gained, 0);
        assert_eq!(e.state().hero.level, 1);
    }

    #[test]
    fn map_size_expands_with_level() {
        let mut e = engine();
        assert_eq!(e.state().hero.map_size(), 20);
        // Enough XP to cross level 15.
        e.add_xp(10_000);
        assert!(e.state().hero.level >= 15);
        assert_eq!(e.state().hero.map_size(), 35);
    }

    #[test]
    fn upgrade_skill_respects_cap() {
        let mut e = engine();
        for expected in 2..=10u8 {
            assert_eq!(e.upgrade_skill(SkillKind::Gather), Ok(expected));
        }
        assert_eq!(
            e.upgrade_skill(SkillKind::Gather),
            Err(OpError::AlreadyMaxed)
        );
        assert_eq!(e.state().hero.skills.gather, 10);
    }

    #[test]
    fn set_skin_requires_unlock() {
        let mut e = engine();
        assert_eq!(e.set_skin(HeroSkin::Royal), Err(OpError::InvalidState));
        e.unlock_skin(HeroSkin::Royal);
        assert_eq!(e.set_skin(HeroSkin::Royal), Ok(()));
        assert_eq!(e.state().hero.skin, HeroSkin::Royal);
    }

    #[test]
    fn set_hero_name_overwrites() {
        let mut e = engine();
        e.set_hero_name("Wren");
        assert_eq!(e.state().hero.name, "Wren");
    }
}
