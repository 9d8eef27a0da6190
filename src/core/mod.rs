//! Core engine types: tokens, RNG, configuration, errors.
//!
//! These are the building blocks every other module leans on. Nothing
//! here knows about cards or timers.

pub mod rng;
pub mod config;
pub mod token;
pub mod error;

pub use rng::{DeckRng, DeckRngState};
pub use config::{ConfigError, EngineConfig};
pub use token::{Token, TokenSet, TokenSetError};
pub use error::{EngineError, SnapshotError};
