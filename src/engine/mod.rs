//! The match engine and its companions.
//!
//! - `MatchEngine`: the game state machine
//! - `EngineSnapshot`: serializable state for save/resume
//! - `ObservationEncoder`: board tensors for agents

pub mod match_engine;
pub mod observation;
pub mod snapshot;

pub use match_engine::{EngineTimer, MatchEngine, RevealOutcome};
pub use observation::ObservationEncoder;
pub use snapshot::EngineSnapshot;
