//! Run statistics
//!
//! Lifetime counters that survive level regeneration and process restarts.
//! Persisted as JSON through a `KeyValueStorage`; every increment is
//! written straight back.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::platform::KeyValueStorage;
use crate::sim::{GameEvent, PowerUpKind};

/// A persisted counter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Counter {
    LevelsWon,
    PeopleSoaked,
    Refills,
    SpeedBoosts,
    JumpBoosts,
}

impl Counter {
    pub const ALL: [Counter; 5] = [
        Counter::LevelsWon,
        Counter::PeopleSoaked,
        Counter::Refills,
        Counter::SpeedBoosts,
        Counter::JumpBoosts,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Counter::LevelsWon => "levels_won",
            Counter::PeopleSoaked => "people_soaked",
            Counter::Refills => "refills",
            Counter::SpeedBoosts => "speed_boosts",
            Counter::JumpBoosts => "jump_boosts",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == s)
    }

    /// The counter a simulation event bumps, if any
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Won => Some(Counter::LevelsWon),
            GameEvent::Soaked { .. } => Some(Counter::PeopleSoaked),
            GameEvent::Refilled => Some(Counter::Refills),
            GameEvent::PowerUpCollected(PowerUpKind::Speed) => Some(Counter::SpeedBoosts),
            GameEvent::PowerUpCollected(PowerUpKind::Jump) => Some(Counter::JumpBoosts),
            GameEvent::Trampled => None,
        }
    }
}

/// Monotonic counter store
pub trait StatsStore {
    fn increment(&mut self, counter: Counter);
    fn read(&self, counter: Counter) -> u64;

    /// Bump whatever counter `event` maps to
    fn record(&mut self, event: &GameEvent) {
        if let Some(counter) = Counter::for_event(event) {
            self.increment(counter);
        }
    }
}

/// Counters backed by persistent storage
pub struct RunStats {
    counts: BTreeMap<Counter, u64>,
    storage: Box<dyn KeyValueStorage>,
}

impl RunStats {
    /// Storage key
    const STORAGE_KEY: &'static str = "lion_splash_stats";

    /// Load counters from storage; missing or corrupt data starts from zero
    pub fn load(storage: Box<dyn KeyValueStorage>) -> Self {
        let counts = match storage.get(Self::STORAGE_KEY) {
            Ok(Some(json)) => match serde_json::from_str::<BTreeMap<Counter, u64>>(&json) {
                Ok(counts) => {
                    log::info!("Loaded run stats ({} counters)", counts.len());
                    counts
                }
                Err(e) => {
                    log::warn!("Corrupt run stats, starting fresh: {}", e);
                    BTreeMap::new()
                }
            },
            Ok(None) => {
                log::info!("No run stats found, starting fresh");
                BTreeMap::new()
            }
            Err(e) => {
                log::warn!("Could not read run stats: {}", e);
                BTreeMap::new()
            }
        };
        Self { counts, storage }
    }

    /// Write all counters back to storage
    pub fn save(&mut self) {
        match serde_json::to_string(&self.counts) {
            Ok(json) => {
                if let Err(e) = self.storage.set(Self::STORAGE_KEY, &json) {
                    log::warn!("Could not save run stats: {}", e);
                }
            }
            Err(e) => log::warn!("Could not encode run stats: {}", e),
        }
    }

    /// Give the storage back (e.g. to reload it)
    pub fn into_storage(self) -> Box<dyn KeyValueStorage> {
        self.storage
    }
}

impl StatsStore for RunStats {
    fn increment(&mut self, counter: Counter) {
        *self.counts.entry(counter).or_insert(0) += 1;
        self.save();
    }

    fn read(&self, counter: Counter) -> u64 {
        self.counts.get(&counter).copied().unwrap_or(0)
    }
}

impl std::fmt::Debug for RunStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunStats")
            .field("counts", &self.counts)
            .finish_non_exhaustive()
    }
}
