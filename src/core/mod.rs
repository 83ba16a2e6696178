//! Core engine types: players, lifecycle phase, configuration, RNG.
//!
//! These are the game-agnostic building blocks; concrete games configure
//! them rather than modifying the engine.

pub mod config;
pub mod phase;
pub mod player;
pub mod rng;

pub use config::{EngineConfig, EstimateConfig};
pub use phase::GamePhase;
pub use player::{Player, PlayerId};
pub use rng::{GameRng, GameRngState};
