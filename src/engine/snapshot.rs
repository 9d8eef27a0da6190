//! Serializable engine state.
//!
//! A snapshot holds everything needed to resume a game mid-flight: the
//! deck, the session counters, the RNG position and the pending timers.
//! The deck clones in O(1) thanks to `im`, so snapshots are cheap to take.

use serde::{Deserialize, Serialize};

use crate::cards::Deck;
use crate::core::{DeckRngState, EngineConfig, SnapshotError};
use crate::session::Session;
use crate::timers::Scheduler;

use super::match_engine::EngineTimer;

/// Full engine state, minus the undrained event queue.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineSnapshot {
    pub config: EngineConfig,
    pub rng: DeckRngState,
    pub deck: Deck,
    pub session: Session,
    pub scheduler: Scheduler<EngineTimer>,
}

impl EngineSnapshot {
    /// Encode with bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        bincode::serialize(self).map_err(SnapshotError::Encode)
    }

    /// Decode from bincode.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        bincode::deserialize(bytes).map_err(SnapshotError::Decode)
    }
}
