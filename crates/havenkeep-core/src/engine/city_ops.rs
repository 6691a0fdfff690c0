//! City operations: placement, removal, upgrades, production collection.

use log::debug;

use havenkeep_logic::buildings::{
    self, BuildingKind, ResourceKind, MAX_BUILDING_LEVEL, UPGRADE_HEALTH_BONUS,
    UPGRADE_RATE_GROWTH,
};
use havenkeep_logic::city::accrued_units;
use havenkeep_logic::progression::gather_multiplier;
use havenkeep_logic::quests::QuestChannel;
use havenkeep_logic::resources::Resources;

use crate::clock::Clock;
use crate::state::Building;

use super::{GameEngine, OpError, OpResult};

/// What a collection pass credited, for the presentation layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollectReport {
    pub collected: Resources,
}

impl<C: Clock> GameEngine<C> {
    pub fn set_city_name(&mut self, name: &str) {
        self.state.city.name = name.to_string();
    }

    /// Place a new building. Checks, in order: grid bounds (the map
    /// grows with hero level), cell occupancy, unlock level, and cost.
    /// The debit is atomic — any rejection leaves the snapshot
    /// untouched. Returns the new building's id.
    pub fn place_building(&mut self, kind: BuildingKind, x: u32, y: u32) -> OpResult<String> {
        let now = self.now();
        let info = kind.info();
        let map_size = self.state.hero.map_size();

        if x >= map_size || y >= map_size {
            return Err(OpError::LevelLocked);
        }
        if self.state.city.is_occupied(x, y) {
            return Err(OpError::PositionOccupied);
        }
        if info.unlock_level > self.state.hero.level {
            return Err(OpError::LevelLocked);
        }
        if !self.state.resources.spend(&info.cost) {
            return Err(OpError::InsufficientResources);
        }

        let id = self.state.city.allocate_id();
        self.state.city.buildings.push(Building {
            id: id.clone(),
            kind,
            x,
            y,
            level: 1,
            health: info.base_health,
            max_health: info.base_health,
            production_rate: info.production.map(|p| p.rate).unwrap_or(0.0),
            last_collected: now,
        });
        debug!("placed {} at ({x}, {y}) as {id}", info.name);

        self.note_progress(QuestChannel::Build, 1);
        Ok(id)
    }

    /// Remove a building by id. No resource refund.
    pub fn remove_building(&mut self, id: &str) -> OpResult<()> {
        let before = self.state.city.buildings.len();
        self.state.city.buildings.retain(|b| b.id != id);
        if self.state.city.buildings.len() == before {
            return Err(OpError::InvalidState);
        }
        debug!("removed building {id}");
        Ok(())
    }

    /// Upgrade a building one level. Cost scales linearly with the
    /// current level; the upgrade adds max health and speeds up
    /// production. Returns the new level.
    pub fn upgrade_building(&mut self, id: &str) -> OpResult<u32> {
        let idx = self
            .state
            .city
            .buildings
            .iter()
            .position(|b| b.id == id)
            .ok_or(OpError::InvalidState)?;

        let level = self.state.city.buildings[idx].level;
        if level >= MAX_BUILDING_LEVEL {
            return Err(OpError::AlreadyMaxed);
        }
        if !self.state.resources.spend(&buildings::upgrade_cost(level)) {
            return Err(OpError::InsufficientResources);
        }

        let building = &mut self.state.city.buildings[idx];
        building.level += 1;
        building.max_health += UPGRADE_HEALTH_BONUS;
        building.health += UPGRADE_HEALTH_BONUS;
        building.production_rate *= UPGRADE_RATE_GROWTH;
        let new_level = building.level;
        debug!("upgraded {id} to level {new_level}");

        self.note_progress(QuestChannel::Upgrade, 1);
        Ok(new_level)
    }

    /// Collect production accrued since each building's last collection.
    /// This is the only operation besides the daily login that reads the
    /// clock; elapsed time is measured lazily from `last_collected`, so
    /// idle sessions reconcile on the next call.
    pub fn collect_resources(&mut self) -> CollectReport {
        let now = self.now();
        let gather_mult = gather_multiplier(self.state.hero.skills.gather);
        let mut collected = Resources::ZERO;

        for building in &mut self.state.city.buildings {
            let Some(production) = building.kind.info().production else {
                continue;
            };
            let elapsed = now.minutes_since(building.last_collected);
            let units = accrued_units(elapsed, building.production_rate, building.level, gather_mult);
            match production.resource {
                ResourceKind::Wood => collected.wood += units,
                ResourceKind::Stone => collected.stone += units,
                ResourceKind::Gold => collected.gold += units,
                ResourceKind::Food => collected.food += units,
            }
            building.last_collected = now;
        }

        self.state.resources.add(&collected);
        let total = collected.total();
        if total > 0 {
            debug!("collected {total} resource units");
            self.note_progress(QuestChannel::Collect, total);
        }
        CollectReport { collected }
    }
}
