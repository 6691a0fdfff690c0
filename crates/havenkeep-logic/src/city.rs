//! Derived city aggregates and production accrual math.
//!
//! Population, score, and tier are pure functions of the building list —
//! they are recomputed on read and never stored, so they cannot drift.

use serde::{Deserialize, Serialize};

use crate::buildings::{BuildingCategory, BuildingKind};

/// Coarse classification of city size, derived from the score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CityTier {
    #[default]
    Village,
    Town,
    City,
    MegaCity,
}

impl CityTier {
    /// Score thresholds: below 500 a village, below 2000 a town, below
    /// 5000 a city, anything above a mega city.
    pub fn from_score(score: u64) -> Self {
        if score < 500 {
            Self::Village
        } else if score < 2000 {
            Self::Town
        } else if score < 5000 {
            Self::City
        } else {
            Self::MegaCity
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Village => "Village",
            Self::Town => "Town",
            Self::City => "City",
            Self::MegaCity => "Mega City",
        }
    }
}

/// Total population: each building contributes its per-level value times
/// its current level.
pub fn population(buildings: &[(BuildingKind, u32)]) -> u64 {
    buildings
        .iter()
        .map(|(kind, level)| kind.info().population_per_level as u64 * *level as u64)
        .sum()
}

/// City score: 10 points per building level, 5 per citizen, and a flat
/// 25 per defense building.
pub fn score(buildings: &[(BuildingKind, u32)]) -> u64 {
    let level_points: u64 = buildings.iter().map(|(_, level)| *level as u64 * 10).sum();
    let defense_count = buildings
        .iter()
        .filter(|(kind, _)| kind.info().category == BuildingCategory::Defense)
        .count() as u64;
    level_points + population(buildings) * 5 + defense_count * 25
}

/// Units produced over `elapsed_minutes` by one building.
///
/// Negative elapsed time (clock moved backwards) yields zero, never a
/// negative credit. The result is floored to whole units.
pub fn accrued_units(elapsed_minutes: f64, rate: f64, level: u32, gather_mult: f64) -> u64 {
    if elapsed_minutes <= 0.0 || rate <= 0.0 {
        return 0;
    }
    (elapsed_minutes * rate * level as f64 * gather_mult).floor() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_thresholds() {
        assert_eq!(CityTier::from_score(0), CityTier::Village);
        assert_eq!(CityTier::from_score(499), CityTier::Village);
        assert_eq!(CityTier::from_score(500), CityTier::Town);
        assert_eq!(CityTier::from_score(1999), CityTier::Town);
        assert_eq!(CityTier::from_score(2000), CityTier::City);
        assert_eq!(CityTier::from_score(4999), CityTier::City);
        assert_eq!(CityTier::from_score(5000), CityTier::MegaCity);
    }

    #[test]
    fn empty_city_scores_zero() {
        assert_eq!(score(&[]), 0);
        assert_eq!(population(&[]), 0);
        assert_eq!(CityTier::from_score(score(&[])), CityTier::Village);
    }

    #[test]
    fn population_scales_with_level() {
        let buildings = [(BuildingKind::House, 1), (BuildingKind::House, 3)];
        // 4 per level: 4 + 12
        assert_eq!(population(&buildings), 16);
    }

    #[test]
    fn score_counts_levels_population_and_defense() {
        let buildings = [
            (BuildingKind::House, 2),  // 20 level points, 8 population
            (BuildingKind::Tower, 1),  // 10 level points, defense
            (BuildingKind::Farm, 1),   // 10 level points
        ];
        // 40 + 8*5 + 25 = 105
        assert_eq!(score(&buildings), 105);
    }

    #[test]
    fn accrual_two_minutes_of_farming() {
        // A level-1 farm at 2.0/min with no boost: 2 minutes → 4 units.
        assert_eq!(accrued_units(2.0, 2.0, 1, 1.0), 4);
    }

    #[test]
    fn accrual_floors_fractional_units() {
        assert_eq!(accrued_units(1.0, 0.8, 1, 1.0), 0);
        assert_eq!(accrued_units(2.0, 0.8, 1, 1.0), 1);
    }

    #[test]
    fn accrual_scales_with_level_and_boost() {
        assert_eq!(accrued_units(10.0, 2.0, 3, 1.0), 60);
        assert_eq!(accrued_units(10.0, 2.0, 3, 1.5), 90);
    }

    #[test]
    fn negative_elapsed_produces_nothing() {
        assert_eq!(accrued_units(-5.0, 2.0, 1, 1.0), 0);
        assert_eq!(accrued_units(0.0, 2.0, 1, 1.0), 0);
    }

    #[test]
    fn tier_ordering() {
        assert!(CityTier::Village < CityTier::Town);
        assert!(CityTier::Town < CityTier::City);
        assert!(CityTier::City < CityTier::MegaCity);
        assert_eq!(CityTier::MegaCity.name(), "Mega City");
    }
}
