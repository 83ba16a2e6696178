//! Named, ordered action groups and the per-player table that owns them.
//!
//! A player carries several [`ActionSet`]s at once (turn actions, lobby,
//! options, standard). Traversal order across sets determines menu order,
//! so both the sets and the actions inside them are kept in insertion
//! order. The table serializes with game state; behaviors are re-registered
//! on load.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::action::Action;
use crate::core::PlayerId;

/// Named ordered group of actions scoped to one player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionSet {
    /// Set name, unique per player ("lobby", "turn", "standard", ...).
    pub name: String,
    actions: Vec<Action>,
}

impl ActionSet {
    /// Create an empty set.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            actions: Vec::new(),
        }
    }

    /// Append an action. Order of addition is menu order.
    pub fn add(&mut self, action: Action) {
        self.actions.push(action);
    }

    /// Append an action, builder style.
    #[must_use]
    pub fn with(mut self, action: Action) -> Self {
        self.add(action);
        self
    }

    /// Look up an action by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Action> {
        self.actions.iter().find(|a| a.id.as_str() == id)
    }

    /// Iterate actions in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Action> {
        self.actions.iter()
    }

    /// Number of actions in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// True if the set holds no actions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

/// Per-player table of ordered action sets.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionSetTable {
    sets: FxHashMap<PlayerId, Vec<ActionSet>>,
}

impl ActionSetTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a player's action sets in attachment order.
    #[must_use]
    pub fn sets(&self, player: &PlayerId) -> &[ActionSet] {
        self.sets.get(player).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Attach a set to a player, appended after existing sets.
    pub fn add_set(&mut self, player: &PlayerId, set: ActionSet) {
        self.sets.entry(player.clone()).or_default().push(set);
    }

    /// Detach a player's set by name.
    pub fn remove_set(&mut self, player: &PlayerId, name: &str) {
        if let Some(sets) = self.sets.get_mut(player) {
            sets.retain(|s| s.name != name);
        }
    }

    /// Get one of a player's sets by name.
    #[must_use]
    pub fn set(&self, player: &PlayerId, name: &str) -> Option<&ActionSet> {
        self.sets(player).iter().find(|s| s.name == name)
    }

    /// Find an action by id across all of a player's sets.
    #[must_use]
    pub fn find(&self, player: &PlayerId, id: &str) -> Option<&Action> {
        self.sets(player).iter().find_map(|s| s.get(id))
    }

    /// Iterate a player's actions across sets in menu order.
    pub fn actions(&self, player: &PlayerId) -> impl Iterator<Item = &Action> {
        self.sets(player).iter().flat_map(ActionSet::iter)
    }

    /// Drop all sets belonging to a player.
    pub fn remove_player(&mut self, player: &PlayerId) {
        self.sets.remove(player);
    }
}
