//! The game engine — single entry point for every inbound operation.
//!
//! The engine owns the snapshot and a clock; all mutation goes through
//! its methods. Operations are synchronous and run to completion, read
//! the clock at most once at entry, and report failure through
//! [`OpError`] instead of panicking. Callers needing concurrency must
//! serialize access themselves (single-writer handle or actor queue).

mod battle_ops;
mod city_ops;
mod daily_ops;
mod hero_ops;
mod quest_ops;

pub use battle_ops::{BattleOutcome, RoundReport};
pub use city_ops::CollectReport;
pub use daily_ops::LoginReport;

use log::info;
use rand::Rng;
use thiserror::Error;

use havenkeep_logic::resources::Resources;

use crate::clock::{Clock, GameTime, SystemClock};
use crate::generation::{generate_challenges, generate_quests};
use crate::persistence::{self, SaveError};
use crate::state::GameState;

/// Why an operation was rejected. Rejections are ordinary results, not
/// exceptions: the snapshot is untouched and the caller decides what to
/// show the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum OpError {
    #[error("not enough resources")]
    InsufficientResources,
    #[error("position already occupied")]
    PositionOccupied,
    #[error("locked at the current hero level")]
    LevelLocked,
    #[error("already at the maximum")]
    AlreadyMaxed,
    #[error("not valid in the current state")]
    InvalidState,
}

pub type OpResult<T> = Result<T, OpError>;

/// The game core: one snapshot, one clock, exclusive mutable access per
/// operation.
pub struct GameEngine<C: Clock = SystemClock> {
    state: GameState,
    clock: C,
}

impl GameEngine<SystemClock> {
    /// An engine over the real wall clock with an empty fresh state.
    /// Call [`GameEngine::reset`] to populate quests and challenges.
    pub fn new() -> Self {
        Self::from_state(GameState::new_game(), SystemClock)
    }
}

impl Default for GameEngine<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> GameEngine<C> {
    /// Wrap an existing snapshot (e.g. a loaded save).
    pub fn from_state(state: GameState, clock: C) -> Self {
        Self { state, clock }
    }

    /// Start a brand-new game: fresh state plus generated quest and
    /// challenge sets.
    pub fn new_game(clock: C, rng: &mut impl Rng) -> Self {
        let mut engine = Self::from_state(GameState::new_game(), clock);
        engine.reset(rng);
        engine
    }

    /// Read-only view of the snapshot for the presentation layer.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn into_state(self) -> GameState {
        self.state
    }

    pub(crate) fn now(&self) -> GameTime {
        self.clock.now()
    }

    // ── Resources ───────────────────────────────────────────────────

    /// Credit a resource bundle.
    pub fn add_resources(&mut self, income: &Resources) {
        self.state.resources.add(income);
    }

    /// Atomic all-or-nothing debit.
    pub fn spend_resources(&mut self, cost: &Resources) -> bool {
        self.state.resources.spend(cost)
    }

    // ── Settings & lifecycle ────────────────────────────────────────

    /// Flip the music toggle, returning the new value.
    pub fn toggle_music(&mut self) -> bool {
        self.state.settings.music_enabled = !self.state.settings.music_enabled;
        self.state.settings.music_enabled
    }

    /// Flip the sound-effects toggle, returning the new value.
    pub fn toggle_sfx(&mut self) -> bool {
        self.state.settings.sfx_enabled = !self.state.settings.sfx_enabled;
        self.state.settings.sfx_enabled
    }

    /// Accumulate session play time.
    pub fn update_play_time(&mut self, minutes: u64) {
        self.state.stats.play_time_minutes =
            self.state.stats.play_time_minutes.saturating_add(minutes);
    }

    /// Reinitialize to a fresh level-1 save. Quest and challenge sets
    /// are regenerated rather than left empty.
    pub fn reset(&mut self, rng: &mut impl Rng) {
        let now = self.clock.now();
        let mut state = GameState::new_game();
        state.quests = generate_quests(state.hero.level, rng);
        state.challenges = generate_challenges(state.hero.level, rng);
        state.last_saved = now;
        self.state = state;
        info!("game state reset");
    }

    // ── Persistence ─────────────────────────────────────────────────

    /// Stamp `last_saved` and write the schema-tolerant envelope.
    pub fn save_game<W: std::io::Write>(&mut self, writer: W) -> Result<(), SaveError> {
        self.state.last_saved = self.clock.now();
        persistence::save_json(writer, &self.state)
    }

    /// Stamp `last_saved` and write the compact binary checkpoint.
    pub fn save_checkpoint<W: std::io::Write>(&mut self, writer: W) -> Result<(), SaveError> {
        self.state.last_saved = self.clock.now();
        persistence::save_binary(writer, &self.state)
    }

    /// Load a save envelope and wrap it in an engine.
    pub fn load_game<R: std::io::Read>(reader: R, clock: C) -> Result<Self, SaveError> {
        let state = persistence::load_json(reader)?;
        Ok(Self::from_state(state, clock))
    }

    /// Load a binary checkpoint and wrap it in an engine.
    pub fn load_checkpoint<R: std::io::Read>(reader: R, clock: C) -> Result<Self, SaveError> {
        let state = persistence::load_binary(reader)?;
        Ok(Self::from_state(state, clock))
    }
}
