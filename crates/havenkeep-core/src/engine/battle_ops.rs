//! The battle state machine: Idle → Active → Resolved → Idle.
//!
//! Randomness only enters at `start_battle` (roster generation); after
//! that, a fixed sequence of skill choices always produces the same
//! health totals, turn count, and loot.

use log::debug;
use rand::Rng;

use havenkeep_logic::combat::{self, SkillEffect};
use havenkeep_logic::progression::SkillKind;
use havenkeep_logic::quests::QuestChannel;
use havenkeep_logic::resources::Resources;

use crate::clock::Clock;
use crate::generation::generate_party;
use crate::state::BattleSession;

use super::{GameEngine, OpError, OpResult};

/// How a battle round left the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BattleOutcome {
    /// The fight continues; another skill is awaited.
    Ongoing,
    /// All monsters are down. XP and loot have been applied.
    Victory { xp: u64, loot: Resources },
    /// The player fell. No rewards.
    Defeat,
}

/// Result of one `use_skill` call: the outcome plus the log lines this
/// round appended, for the presentation layer to animate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundReport {
    pub outcome: BattleOutcome,
    pub log: Vec<String>,
}

impl<C: Clock> GameEngine<C> {
    /// Start a battle. Valid only while no battle is active; the old
    /// session is wholesale-replaced by the new roster.
    pub fn start_battle(&mut self, rng: &mut impl Rng) -> OpResult<()> {
        if self.state.battle.active {
            return Err(OpError::InvalidState);
        }

        let hero_level = self.state.hero.level;
        let monsters = generate_party(hero_level, rng);
        let max_health = combat::player_max_health(self.state.hero.skills.defense);

        let mut log = Vec::new();
        let names: Vec<&str> = monsters.iter().map(|m| m.kind.info().name).collect();
        log.push(format!("Ambushed by {}!", names.join(", ")));

        debug!("battle started against {} monster(s)", monsters.len());
        self.state.battle = BattleSession {
            active: true,
            monsters,
            turn: 0,
            player_health: max_health,
            max_player_health: max_health,
            log,
        };
        Ok(())
    }

    /// Spend a turn on a skill. Damage skills hit the first living
    /// monster (or all of them, for area magic) and provoke a
    /// counter-attack from every survivor; the defensive skill heals
    /// and skips the counter-attack entirely.
    pub fn use_skill(&mut self, skill: SkillKind) -> OpResult<RoundReport> {
        if !self.state.battle.active {
            return Err(OpError::InvalidState);
        }

        let skill_level = self.state.hero.skills.get(skill);
        let tower_bonus = combat::tower_bonus(self.state.city.defense_levels());
        let effect =
            combat::skill_effect(skill, skill_level, tower_bonus).ok_or(OpError::InvalidState)?;

        let mut round_log = Vec::new();

        match effect {
            SkillEffect::Heal { amount } => {
                let battle = &mut self.state.battle;
                battle.player_health =
                    (battle.player_health + amount).min(battle.max_player_health);
                round_log.push(format!(
                    "You raise your shield and recover {amount} health ({}/{}).",
                    battle.player_health, battle.max_player_health
                ));
                battle.log.extend(round_log.iter().cloned());
                return Ok(RoundReport {
                    outcome: BattleOutcome::Ongoing,
                    log: round_log,
                });
            }
            SkillEffect::Damage { amount, area } => {
                if area {
                    for monster in self.state.battle.monsters.iter_mut().filter(|m| m.is_alive())
                    {
                        monster.health = monster.health.saturating_sub(amount);
                        round_log.push(hit_line(monster.kind.info().name, amount, monster.health));
                    }
                } else if let Some(monster) = self
                    .state
                    .battle
                    .monsters
                    .iter_mut()
                    .find(|m| m.is_alive())
                {
                    monster.health = monster.health.saturating_sub(amount);
                    round_log.push(hit_line(monster.kind.info().name, amount, monster.health));
                }
            }
        }

        // Every survivor strikes back, each for at least 1.
        let attacks: Vec<u32> = self.state.battle.living().map(|m| m.attack).collect();
        if !attacks.is_empty() {
            let incoming = combat::counter_damage(&attacks, self.state.hero.skills.defense);
            let battle = &mut self.state.battle;
            battle.player_health = battle.player_health.saturating_sub(incoming);
            round_log.push(format!(
                "The monsters strike back for {incoming} ({}/{}).",
                battle.player_health, battle.max_player_health
            ));
        }

        self.state.battle.turn += 1;

        let outcome = if self.state.battle.all_defeated() {
            self.resolve_victory(&mut round_log)
        } else if self.state.battle.player_health == 0 {
            self.resolve_defeat(&mut round_log)
        } else {
            BattleOutcome::Ongoing
        };

        self.state.battle.log.extend(round_log.iter().cloned());
        Ok(RoundReport {
            outcome,
            log: round_log,
        })
    }

    /// Abandon an active battle. No rewards either way.
    pub fn end_battle(&mut self) -> OpResult<()> {
        if !self.state.battle.active {
            return Err(OpError::InvalidState);
        }
        self.state.battle.active = false;
        self.state
            .battle
            .log
            .push("You retreat behind the walls.".to_string());
        debug!("battle abandoned");
        Ok(())
    }

    fn resolve_victory(&mut self, round_log: &mut Vec<String>) -> BattleOutcome {
        let battle = &self.state.battle;
        let xp: u64 = battle.monsters.iter().map(|m| m.xp_reward).sum();
        let mut loot = Resources::ZERO;
        for monster in &battle.monsters {
            loot.add(&monster.loot);
        }
        let count = battle.monsters.len() as u64;

        self.state.battle.active = false;
        round_log.push(format!("Victory! Gained {xp} XP and the spoils."));
        debug!("battle won: {count} monster(s), {xp} xp");

        self.state.resources.add(&loot);
        self.add_xp(xp);
        self.state.stats.monsters_defeated += count;
        self.note_progress(QuestChannel::Defeat, count);

        BattleOutcome::Victory { xp, loot }
    }

    fn resolve_defeat(&mut self, round_log: &mut Vec<String>) -> BattleOutcome {
        self.state.battle.active = false;
        round_log.push("You fall. The monsters scatter with the dawn.".to_string());
        debug!("battle lost");
        BattleOutcome::Defeat
    }
}

fn hit_line(name: &str, amount: u32, remaining: u32) -> String {
    if remaining == 0 {
        format!("{name} takes {amount} damage and is defeated!")
    } else {
        format!("{name} takes {amount} damage ({remaining} left).")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{GameTime, ManualClock};
    use crate::state::{GameState, Monster};
    use havenkeep_logic::combat::MonsterKind;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn engine() -> GameEngine<ManualClock> {
        GameEngine::from_state(
            GameState::new_game(),
            ManualClock::new(GameTime::from_unix_ms(0)),
        )
    }

    fn scripted_battle(monsters: Vec<Monster>) -> GameEngine<ManualClock> {
        let mut state = GameState::new_game();
        state.battle = BattleSession {
            active: true,
            monsters,
            turn: 0,
            player_health: 110,
            max_player_health: 110,
            log: Vec::new(),
        };
        GameEngine::from_state(state, ManualClock::new(GameTime::from_unix_ms(0)))
    }

    fn slime(health: u32, attack: u32) -> Monster {
        Monster {
            kind: MonsterKind::Slime,
            health,
            max_health: health,
            attack,
            xp_reward: 10,
            loot: Resources::new(0, 0, 5, 2),
            ..Monster::default()
        }
    }

    #[test]
    fn start_battle_initializes_the_session() {
        let mut e = engine();
        e.start_battle(&mut StdRng::seed_from_u64(1)).expect("start");
        let battle = &e.state().battle;
        assert!(battle.active);
        assert_eq!(battle.monsters.len(), 1);
        assert_eq!(battle.turn, 0);
        // Level-1 hero with defense 1: 110 health.
        assert_eq!(battle.player_health, 110);
        assert_eq!(battle.max_player_health, 110);
        assert!(!battle.log.is_empty());
    }

    #[test]
    fn start_battle_twice_is_rejected() {
        let mut e = engine();
        let mut rng = StdRng::seed_from_u64(1);
        e.start_battle(&mut rng).expect("start");
        assert_eq!(e.start_battle(&mut rng), Err(OpError::InvalidState));
    }

    #[test]
    fn use_skill_outside_battle_is_rejected() {
        let mut e = engine();
        assert_eq!(e.use_skill(SkillKind::Attack), Err(OpError::InvalidState));
    }

    #[test]
    fn gather_skill_has_no_battle_use() {
        let mut e = scripted_battle(vec![slime(50, 5)]);
        assert_eq!(e.use_skill(SkillKind::Gather), Err(OpError::InvalidState));
        // The rejection consumed no turn.
        assert_eq!(e.state().battle.turn, 0);
    }

    #[test]
    fn attack_hits_first_living_monster_then_counters() {
        let mut e = scripted_battle(vec![slime(50, 5), slime(50, 7)]);
        let report = e.use_skill(SkillKind::Attack).expect("active");
        assert_eq!(report.outcome, BattleOutcome::Ongoing);

        let battle = &e.state().battle;
        // Attack skill 1, no towers: 22 damage on the first slime only.
        assert_eq!(battle.monsters[0].health, 28);
        assert_eq!(battle.monsters[1].health, 50);
        // Counters: max(1, 5-1) + max(1, 7-1) = 10.
        assert_eq!(battle.player_health, 100);
        assert_eq!(battle.turn, 1);
    }

    #[test]
    fn area_magic_hits_every_living_monster() {
        let mut e = scripted_battle(vec![slime(50, 5), slime(50, 5), slime(50, 5)]);
        e.use_skill(SkillKind::Magic).expect("active");
        // Magic skill 1, no towers: 13 to each.
        for monster in &e.state().battle.monsters {
            assert_eq!(monster.health, 37);
        }
    }

    #[test]
    fn heal_skips_the_counter_attack() {
        let mut e = scripted_battle(vec![slime(50, 40)]);
        e.state.battle.player_health = 50;
        let report = e.use_skill(SkillKind::Defense).expect("active");
        assert_eq!(report.outcome, BattleOutcome::Ongoing);
        // Defense skill 1 heals 20; nothing strikes back.
        assert_eq!(e.state().battle.player_health, 70);
        assert_eq!(e.state().battle.turn, 0);
    }

    #[test]
    fn heal_never_exceeds_max_health() {
        let mut e = scripted_battle(vec![slime(50, 5)]);
        e.use_skill(SkillKind::Defense).expect("active");
        assert_eq!(e.state().battle.player_health, 110);
    }

    #[test]
    fn victory_applies_xp_loot_and_counters() {
        let mut e = scripted_battle(vec![slime(10, 5)]);
        let gold_before = e.state().resources.gold;
        let report = e.use_skill(SkillKind::Attack).expect("active");

        match report.outcome {
            BattleOutcome::Victory { xp, loot } => {
                assert_eq!(xp, 10);
                assert_eq!(loot, Resources::new(0, 0, 5, 2));
            }
            other => panic!("expected victory, got {other:?}"),
        }
        assert!(!e.state().battle.active);
        assert_eq!(e.state().resources.gold, gold_before + 5);
        assert_eq!(e.state().hero.xp, 10);
        assert_eq!(e.state().stats.monsters_defeated, 1);
        // No survivors — no counter-attack landed.
        assert_eq!(e.state().battle.player_health, 110);
    }

    #[test]
    fn lethal_monster_resolves_defeat_without_rewards() {
        let mut e = scripted_battle(vec![slime(1000, 150)]);
        e.state.battle.player_health = 100;
        e.state.battle.max_player_health = 100;
        let gold_before = e.state().resources.gold;
        let xp_before = e.state().hero.xp;

        let report = e.use_skill(SkillKind::Attack).expect("active");
        assert_eq!(report.outcome, BattleOutcome::Defeat);
        assert!(!e.state().battle.active);
        assert_eq!(e.state().resources.gold, gold_before);
        assert_eq!(e.state().hero.xp, xp_before);
        assert_eq!(e.state().stats.monsters_defeated, 0);
    }

    #[test]
    fn fixed_roster_and_skill_sequence_is_deterministic() {
        let run = || {
            let mut e = scripted_battle(vec![slime(60, 8), slime(40, 6)]);
            let mut turns = Vec::new();
            for skill in [
                SkillKind::Attack,
                SkillKind::Magic,
                SkillKind::Defense,
                SkillKind::Attack,
                SkillKind::Attack,
            ] {
                if let Ok(report) = e.use_skill(skill) {
                    turns.push(report.outcome);
                }
                if !e.state().battle.active {
                    break;
                }
            }
            (
                e.state().battle.player_health,
                e.state().battle.turn,
                turns,
            )
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn end_battle_abandons_without_rewards() {
        let mut e = scripted_battle(vec![slime(50, 5)]);
        e.end_battle().expect("active");
        assert!(!e.state().battle.active);
        assert_eq!(e.state().stats.monsters_defeated, 0);
        assert_eq!(e.end_battle(), Err(OpError::InvalidState));
    }

    #[test]
    fn new_battle_replaces_the_old_session() {
        let mut e = scripted_battle(vec![slime(50, 5)]);
        e.end_battle().expect("active");
        let old_log_len = e.state().battle.log.len();
        e.start_battle(&mut StdRng::seed_from_u64(2)).expect("idle");
        assert!(e.state().battle.log.len() <= old_log_len);
        assert!(e.state().battle.active);
        assert_eq!(e.state().battle.turn, 0);
    }
}
