//! Monster party generation.
//!
//! Randomness ends here: once a roster exists, battle resolution is
//! fully deterministic.

use rand::Rng;

use havenkeep_logic::combat::{kinds_for_level, monster_count, scaled, scaled_loot, scaled_xp};

use crate::state::Monster;

/// Generate a monster party for a hero level. The pool of kinds widens
/// with the level; every stat is the kind's base scaled by the level.
pub fn generate_party(hero_level: u32, rng: &mut impl Rng) -> Vec<Monster> {
    let pool = kinds_for_level(hero_level.max(1));
    let count = monster_count(hero_level);

    (0..count)
        .map(|i| {
            let kind = pool[rng.gen_range(0..pool.len())];
            let info = kind.info();
            let health = scaled(info.health, hero_level);
            Monster {
                id: i as u32,
                kind,
                health,
                max_health: health,
                attack: scaled(info.attack, hero_level),
                xp_reward: scaled_xp(info.xp_reward, hero_level),
                loot: scaled_loot(&info.loot, hero_level),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn party_size_follows_hero_level() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(generate_party(1, &mut rng).len(), 1);
        assert_eq!(generate_party(12, &mut rng).len(), 2);
        assert_eq!(generate_party(45, &mut rng).len(), 3);
    }

    #[test]
    fn generation_is_deterministic_per_seed() {
        let a = generate_party(20, &mut StdRng::seed_from_u64(42));
        let b = generate_party(20, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn monsters_respect_the_unlock_pool() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..50 {
            for monster in generate_party(1, &mut rng) {
                assert!(monster.kind.info().unlock_level <= 1);
            }
        }
    }

    #[test]
    fn stats_are_scaled_and_full_health() {
        let mut rng = StdRng::seed_from_u64(11);
        for monster in generate_party(10, &mut rng) {
            let base = monster.kind.info();
            assert_eq!(monster.health, monster.max_health);
            assert_eq!(monster.health, scaled(base.health, 10));
            assert_eq!(monster.attack, scaled(base.attack, 10));
        }
    }

    #[test]
    fn monster_ids_are_sequential() {
        let mut rng = StdRng::seed_from_u64(5);
        let party = generate_party(30, &mut rng);
        for (i, monster) in party.iter().enumerate() {
            assert_eq!(monster.id, i as u32);
        }
    }
}
