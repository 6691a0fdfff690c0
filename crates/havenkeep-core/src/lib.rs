//! Havenkeep Core - City-Builder Progression Engine
//!
//! The deterministic state machine behind the Havenkeep mini-game: hero
//! progression, a building grid with time-based production, quest and
//! daily-challenge ledgers, scripted turn-based battles, and a versioned
//! save envelope.
//!
//! # Architecture
//!
//! The core is purely reactive. Gameplay events arrive as method calls
//! on [`engine::GameEngine`]; each operation validates preconditions
//! against the owned [`state::GameState`] snapshot, applies the change,
//! and returns a small result record for the presentation layer. The
//! core never calls outward, performs no I/O besides the injected
//! [`clock::Clock`], and is single-threaded by contract — callers
//! serialize access.
//!
//! # Example
//!
//! ```rust,no_run
//! use havenkeep_core::prelude::*;
//! use havenkeep_logic::buildings::BuildingKind;
//!
//! let mut rng = rand::thread_rng();
//! let mut engine = GameEngine::new_game(SystemClock, &mut rng);
//!
//! engine.check_daily_login();
//! engine.place_building(BuildingKind::Farm, 0, 0).ok();
//! let report = engine.collect_resources();
//! println!("collected {:?}", report.collected);
//! ```

pub mod clock;
pub mod engine;
pub mod generation;
pub mod persistence;
pub mod state;

/// Commonly used types for convenient importing.
pub mod prelude {
    pub use crate::clock::{Clock, GameTime, ManualClock, SystemClock};
    pub use crate::engine::{
        BattleOutcome, CollectReport, GameEngine, LoginReport, OpError, OpResult, RoundReport,
    };
    pub use crate::persistence::{SaveData, SaveError, SAVE_VERSION};
    pub use crate::state::*;
}
