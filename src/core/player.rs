//! Player identity and per-player engine data.
//!
//! ## PlayerId
//!
//! Stable string identifier: a session UUID for humans, a generated id for
//! bots. The engine compares ids, never interprets them.
//!
//! ## Player
//!
//! The engine-visible player record. Serialized with game state so a table
//! can be suspended and resumed; the user/session object is reattached by
//! the session layer after load and never stored here.

use serde::{Deserialize, Serialize};

use crate::actions::ActionId;

/// Stable player identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(String);

impl PlayerId {
    /// Create a new player ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the raw id string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for PlayerId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A player at a table.
///
/// Bot pacing fields (`bot_think_ticks`, `bot_pending_action`, `bot_target`)
/// are the only fields a bot policy mutates; they make bots act on a
/// believable cadence instead of instantly.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Unique identifier.
    pub id: PlayerId,
    /// Display name.
    pub name: String,
    /// True for non-human players.
    pub is_bot: bool,
    /// Spectators watch but hold no turn.
    pub is_spectator: bool,
    /// Ticks remaining before the bot may act.
    pub bot_think_ticks: u32,
    /// Action queued to run once the think counter reaches zero.
    pub bot_pending_action: Option<ActionId>,
    /// Game-specific numeric target (e.g. a score the bot is chasing).
    pub bot_target: Option<i64>,
}

impl Player {
    /// Create a human player.
    pub fn human(id: impl Into<PlayerId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            is_bot: false,
            is_spectator: false,
            bot_think_ticks: 0,
            bot_pending_action: None,
            bot_target: None,
        }
    }

    /// Create a bot player.
    pub fn bot(id: impl Into<PlayerId>, name: impl Into<String>) -> Self {
        Self {
            is_bot: true,
            ..Self::human(id, name)
        }
    }

    /// Mark this player as a spectator.
    #[must_use]
    pub fn spectator(mut self) -> Self {
        self.is_spectator = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_id_display() {
        let id = PlayerId::new("abc-123");
        assert_eq!(id.as_str(), "abc-123");
        assert_eq!(format!("{}", id), "abc-123");
    }

    #[test]
    fn test_human_defaults() {
        let p = Player::human("u1", "Alice");
        assert!(!p.is_bot);
        assert!(!p.is_spectator);
        assert_eq!(p.bot_think_ticks, 0);
        assert!(p.bot_pending_action.is_none());
    }

    #[test]
    fn test_bot_flag() {
        let p = Player::bot("b1", "Robo");
        assert!(p.is_bot);
        assert!(!p.is_spectator);
    }

    #[test]
    fn test_spectator_builder() {
        let p = Player::human("u2", "Watcher").spectator();
        assert!(p.is_spectator);
    }

    #[test]
    fn test_player_serialization() {
        let mut p = Player::bot("b1", "Robo");
        p.bot_think_ticks = 12;
        p.bot_pending_action = Some(ActionId::new("roll"));
        p.bot_target = Some(63);

        let json = serde_json::to_string(&p).unwrap();
        let back: Player = serde_json::from_str(&json).unwrap();
        assert_eq!(p, back);
    }
}
