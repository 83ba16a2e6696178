//! # tabletop-engine
//!
//! An interaction runtime for turn-based tabletop games on a text/speech
//! multiplayer platform.
//!
//! ## Design Principles
//!
//! 1. **Game-Agnostic**: No hardcoded actions, menus, or turn rules.
//!    Games describe their actions as data and register behavior by name.
//!
//! 2. **Data Over Callbacks**: Actions, action sets, and pending input are
//!    plain serializable records; the behaviors they name live in a
//!    per-game [`RulesRegistry`] rebuilt at load time.
//!
//! 3. **Rendering-Free**: The engine decides *what* a player can do and
//!    hands opaque localization keys to a [`Session`] implementation; it
//!    never renders UI or formats text itself.
//!
//! ## Architecture
//!
//! - **Pull-Based Dispatch**: The session layer feeds player events into
//!   [`Engine::handle_event`] and pumps [`Engine::tick`]; the engine never
//!   owns a thread of its own except for estimation workers.
//!
//! - **Suspended Input**: An action that needs input parks as a
//!   [`PendingAction`] until the player answers; bots answer inline
//!   through registered policies and never suspend.
//!
//! - **Concurrent Estimation**: Session-length forecasts run whole games
//!   forward on worker threads and are collected by a non-blocking poll.
//!
//! ## Modules
//!
//! - `core`: Player identity, phases, configuration, deterministic RNG
//! - `actions`: Action records, action sets, input requests
//! - `rules`: Capability traits and the per-game registry
//! - `keybinds`: Canonical key strings and the keybind registry
//! - `turn`: Turn order with direction, skips, and live-roster wraparound
//! - `session`: Outbound session and localization contracts
//! - `dispatch`: The engine: roster, events, execution, the tick pump
//! - `estimate`: Concurrent game-duration estimation
//! - `games`: Concrete games (the five-dice game)

pub mod actions;
pub mod core;
pub mod dispatch;
pub mod estimate;
pub mod games;
pub mod keybinds;
pub mod rules;
pub mod session;
pub mod turn;

// Re-export commonly used types
pub use crate::core::{
    EngineConfig, EstimateConfig, GamePhase, GameRng, GameRngState, Player, PlayerId,
};

pub use crate::actions::{
    Action, ActionContext, ActionId, ActionSet, ActionSetTable, InputRequest, PendingAction,
    ResolvedAction,
};

pub use crate::rules::{
    ActionHandler, BotInput, BotPolicy, BotSelect, Enablement, EnabledPredicate, LabelResolver,
    OptionsProvider, RulesRegistry, VisiblePredicate,
};

pub use crate::keybinds::{canonical_key, Keybind, KeybindRegistry, KeybindState};

pub use crate::turn::TurnOrder;

pub use crate::session::{Localize, MenuItem, NullSession, Session};

pub use crate::dispatch::{Cx, Engine, Event, View};

pub use crate::estimate::{
    DurationEstimator, EstimateError, EstimateOutcome, EstimateReport, EstimateSummary,
};
