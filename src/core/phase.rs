//! Game lifecycle phase.
//!
//! Every hosted game moves through the same three phases. The engine never
//! interprets game rules, but the phase gates keybind applicability and
//! lobby-versus-play behavior.

use serde::{Deserialize, Serialize};

/// Lifecycle phase of a hosted game.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    /// Lobby phase: players joining, host configuring, bots being added.
    #[default]
    Waiting,
    /// Game in progress.
    Playing,
    /// Game over; only the game-over menu remains interactive.
    Finished,
}

impl GamePhase {
    /// True while the game is in the lobby.
    #[must_use]
    pub fn is_waiting(self) -> bool {
        self == GamePhase::Waiting
    }

    /// True while the game is in progress.
    #[must_use]
    pub fn is_playing(self) -> bool {
        self == GamePhase::Playing
    }

    /// True once the game has ended.
    #[must_use]
    pub fn is_finished(self) -> bool {
        self == GamePhase::Finished
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_predicates() {
        assert!(GamePhase::Waiting.is_waiting());
        assert!(!GamePhase::Waiting.is_playing());
        assert!(GamePhase::Playing.is_playing());
        assert!(GamePhase::Finished.is_finished());
    }

    #[test]
    fn test_phase_default() {
        assert_eq!(GamePhase::default(), GamePhase::Waiting);
    }

    #[test]
    fn test_phase_serialization() {
        let json = serde_json::to_string(&GamePhase::Playing).unwrap();
        let phase: GamePhase = serde_json::from_str(&json).unwrap();
        assert_eq!(phase, GamePhase::Playing);
    }
}
