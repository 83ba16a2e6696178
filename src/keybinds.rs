//! Keybind records and the key-string registry.
//!
//! A key string (with modifier prefixes in a fixed canonical order) maps
//! to an ordered list of bindings. Several bindings may share one key so
//! that, for example, `enter` can mean "start game" in the lobby and
//! "roll" mid-game without either definition overriding the other; the
//! dispatcher tries each matching binding independently.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::actions::ActionId;
use crate::core::{GamePhase, Player};

/// When a keybind is applicable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeybindState {
    /// Never fires (defined but disabled).
    Never,
    /// Lobby only.
    Idle,
    /// Mid-game only.
    Active,
    /// Any phase.
    Always,
}

impl KeybindState {
    /// Whether this applicability state matches a game phase.
    #[must_use]
    pub fn matches(self, phase: GamePhase) -> bool {
        match self {
            KeybindState::Never => false,
            KeybindState::Idle => phase.is_waiting(),
            KeybindState::Active => phase.is_playing(),
            KeybindState::Always => true,
        }
    }
}

/// A key combination bound to one or more action ids.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keybind {
    /// Human-readable name ("Roll dice").
    pub name: String,
    /// Canonical key string ("space", "shift+b", "f5").
    pub default_key: String,
    /// Actions this keybind triggers, in order.
    pub actions: SmallVec<[ActionId; 2]>,
    /// If true, only fires while one of its actions is the focused menu item.
    pub requires_focus: bool,
    /// When the keybind applies.
    pub state: KeybindState,
    /// Player display names allowed to use it. Empty = everyone.
    pub players: Vec<String>,
    /// Whether spectators may use it.
    pub include_spectators: bool,
}

impl Keybind {
    /// Whether this binding may fire for a player in the current phase.
    #[must_use]
    pub fn can_use(&self, phase: GamePhase, player: &Player) -> bool {
        if !self.state.matches(phase) {
            return false;
        }
        if player.is_spectator && !self.include_spectators {
            return false;
        }
        if !self.players.is_empty() && !self.players.iter().any(|name| *name == player.name) {
            return false;
        }
        true
    }
}

/// Compose the canonical key string from a raw key plus modifier flags.
///
/// The key is lowercased and modifier prefixes are applied in the fixed
/// order shift, ctrl, alt — each only when the flag is set and the prefix
/// is not already at the head of the string. A fully modified event
/// therefore yields `alt+ctrl+shift+<key>`.
#[must_use]
pub fn canonical_key(key: &str, shift: bool, control: bool, alt: bool) -> String {
    let mut key = key.to_ascii_lowercase();
    if shift && !key.starts_with("shift+") {
        key = format!("shift+{key}");
    }
    if control && !key.starts_with("ctrl+") {
        key = format!("ctrl+{key}");
    }
    if alt && !key.starts_with("alt+") {
        key = format!("alt+{key}");
    }
    key
}

/// Key string → ordered bindings, in definition order.
#[derive(Clone, Debug, Default)]
pub struct KeybindRegistry {
    by_key: FxHashMap<String, Vec<Keybind>>,
    // Keys in first-definition order, so hint lookups are stable
    key_order: Vec<String>,
}

impl KeybindRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a binding under its key. Later definitions for the same
    /// key are tried after earlier ones.
    pub fn define(&mut self, keybind: Keybind) {
        let binds = self.by_key.entry(keybind.default_key.clone()).or_default();
        if binds.is_empty() {
            self.key_order.push(keybind.default_key.clone());
        }
        binds.push(keybind);
    }

    /// All bindings registered under an exact canonical key.
    #[must_use]
    pub fn lookup(&self, key: &str) -> &[Keybind] {
        self.by_key.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The key string bound to an action, if any (for menu hints). When an
    /// action is bound under several keys, the first-defined key wins.
    #[must_use]
    pub fn key_for_action(&self, action: &str) -> Option<&str> {
        self.key_order.iter().find_map(|key| {
            self.by_key
                .get(key)?
                .iter()
                .any(|kb| kb.actions.iter().any(|a| a.as_str() == action))
                .then_some(key.as_str())
        })
    }

    /// Number of distinct keys registered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    /// True when no keybinds are defined.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }
}
