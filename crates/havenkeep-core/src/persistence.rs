//! Save/Load — a versioned envelope around the full snapshot.
//!
//! Two formats share one envelope shape:
//!
//! * **JSON** is the canonical save-slot format. It is self-describing,
//!   so a snapshot written by an older schema loads with defaulted
//!   fields instead of failing.
//! * **bincode** is the compact checkpoint format for same-session
//!   autosaves, where the schema cannot have changed; its version check
//!   is strict.

use std::io::{Read, Write};

use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::state::GameState;

/// Current save format version (increment when the schema changes).
pub const SAVE_VERSION: u32 = 1;

/// The serialized envelope: version tag plus the full snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveData {
    #[serde(default = "current_version")]
    pub version: u32,
    #[serde(default)]
    pub state: GameState,
}

fn current_version() -> u32 {
    SAVE_VERSION
}

/// Errors that can occur during save/load.
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("save data corrupt: {0}")]
    Json(#[from] serde_json::Error),
    #[error("checkpoint corrupt: {0}")]
    Binary(#[from] bincode::Error),
    #[error("save version {found} is newer than supported version {expected}")]
    VersionMismatch { expected: u32, found: u32 },
}

/// Write the snapshot as a JSON envelope.
pub fn save_json<W: Write>(writer: W, state: &GameState) -> Result<(), SaveError> {
    let envelope = SaveData {
        version: SAVE_VERSION,
        state: state.clone(),
    };
    serde_json::to_writer(writer, &envelope)?;
    debug!("snapshot saved (json, version {SAVE_VERSION})");
    Ok(())
}

/// Read a JSON envelope. Envelopes from older schema versions load with
/// defaulted fields; envelopes from a *newer* version are rejected.
pub fn load_json<R: Read>(reader: R) -> Result<GameState, SaveError> {
    let envelope: SaveData = serde_json::from_reader(reader)?;
    if envelope.version > SAVE_VERSION {
        return Err(SaveError::VersionMismatch {
            expected: SAVE_VERSION,
            found: envelope.version,
        });
    }
    debug!("snapshot loaded (json, version {})", envelope.version);
    Ok(envelope.state)
}

/// Write the snapshot as a compact binary checkpoint.
pub fn save_binary<W: Write>(writer: W, state: &GameState) -> Result<(), SaveError> {
    let envelope = SaveData {
        version: SAVE_VERSION,
        state: state.clone(),
    };
    bincode::serialize_into(writer, &envelope)?;
    debug!("snapshot saved (binary, version {SAVE_VERSION})");
    Ok(())
}

/// Read a binary checkpoint. The format is not self-describing, so only
/// the exact current version is accepted.
pub fn load_binary<R: Read>(reader: R) -> Result<GameState, SaveError> {
    let envelope: SaveData = bincode::deserialize_from(reader)?;
    if envelope.version != SAVE_VERSION {
        return Err(SaveError::VersionMismatch {
            expected: SAVE_VERSION,
            found: envelope.version,
        });
    }
    debug!("snapshot loaded (binary)");
    Ok(envelope.state)
}
