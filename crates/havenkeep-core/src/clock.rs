//! Wall-clock access behind an injectable abstraction.
//!
//! The engine reads the clock once at the start of an operation and
//! treats the value as plain data from then on. Production code uses
//! [`SystemClock`]; tests and the headless harness use [`ManualClock`]
//! to simulate elapsed time deterministically.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

const MS_PER_MINUTE: i64 = 60_000;
const MS_PER_DAY: i64 = 86_400_000;

/// A point in wall-clock time, stored as milliseconds since the Unix
/// epoch.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct GameTime {
    pub unix_ms: i64,
}

impl GameTime {
    pub fn from_unix_ms(unix_ms: i64) -> Self {
        Self { unix_ms }
    }

    /// Fractional minutes elapsed since `earlier`, clamped to zero when
    /// the clock has moved backwards.
    pub fn minutes_since(&self, earlier: GameTime) -> f64 {
        (self.unix_ms - earlier.unix_ms).max(0) as f64 / MS_PER_MINUTE as f64
    }

    /// Calendar day index (UTC days since the epoch).
    pub fn day_number(&self) -> i64 {
        self.unix_ms.div_euclid(MS_PER_DAY)
    }

    pub fn plus_minutes(&self, minutes: i64) -> Self {
        Self {
            unix_ms: self.unix_ms + minutes * MS_PER_MINUTE,
        }
    }

    pub fn plus_days(&self, days: i64) -> Self {
        Self {
            unix_ms: self.unix_ms + days * MS_PER_DAY,
        }
    }
}

/// Source of "now" for the engine.
pub trait Clock {
    fn now(&self) -> GameTime;
}

/// Real wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> GameTime {
        let ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as i64)
            .unwrap_or_default();
        GameTime::from_unix_ms(ms)
    }
}

/// A settable clock for tests and headless runs. Clones share the same
/// underlying instant, so a handle kept by the caller can advance time
/// for an engine that owns the other handle.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    ms: Rc<Cell<i64>>,
}

impl ManualClock {
    pub fn new(start: GameTime) -> Self {
        Self {
            ms: Rc::new(Cell::new(start.unix_ms)),
        }
    }

    pub fn set(&self, now: GameTime) {
        self.ms.set(now.unix_ms);
    }

    pub fn advance_minutes(&self, minutes: i64) {
        self.ms.set(self.ms.get() + minutes * MS_PER_MINUTE);
    }

    pub fn advance_days(&self, days: i64) {
        self.ms.set(self.ms.get() + days * MS_PER_DAY);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> GameTime {
        GameTime::from_unix_ms(self.ms.get())
    }
}
