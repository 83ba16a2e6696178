//! Turn-order management.
//!
//! Pure index arithmetic over the live participant list: an ordered list
//! of player ids, a current index, a direction, and a skip count. The
//! manager enforces no game legality — reversal and skip are primitives a
//! game's rules invoke. The current player is recomputed on every read so
//! late joins and removals are reflected immediately.

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;

/// Ordered active-player sequence with pointer, direction, and skip count.
///
/// Invariant: `current = player_ids[index mod len]` when the list is
/// non-empty; there is no current player when it is empty.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnOrder {
    player_ids: Vec<PlayerId>,
    index: usize,
    direction: i8,
    skip_count: u32,
}

impl Default for TurnOrder {
    fn default() -> Self {
        Self::new()
    }
}

impl TurnOrder {
    /// Create an empty turn order (forward direction).
    pub fn new() -> Self {
        Self {
            player_ids: Vec::new(),
            index: 0,
            direction: 1,
            skip_count: 0,
        }
    }

    /// Replace the participant list, resetting the pointer to the front.
    pub fn set_order(&mut self, player_ids: Vec<PlayerId>) {
        self.player_ids = player_ids;
        self.index = 0;
        self.skip_count = 0;
    }

    /// Append a participant at the end of the order.
    pub fn add(&mut self, player: PlayerId) {
        self.player_ids.push(player);
    }

    /// Remove a participant. The pointer is left alone; reads re-wrap
    /// against the shrunk list.
    pub fn remove(&mut self, player: &PlayerId) {
        self.player_ids.retain(|p| p != player);
    }

    /// The participant list in turn order.
    #[must_use]
    pub fn player_ids(&self) -> &[PlayerId] {
        &self.player_ids
    }

    /// Number of participants.
    #[must_use]
    pub fn len(&self) -> usize {
        self.player_ids.len()
    }

    /// True when nobody holds a turn.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.player_ids.is_empty()
    }

    /// The player whose turn it is, if any.
    #[must_use]
    pub fn current(&self) -> Option<&PlayerId> {
        if self.player_ids.is_empty() {
            return None;
        }
        self.player_ids.get(self.index % self.player_ids.len())
    }

    /// Point the turn at a specific participant.
    ///
    /// No-op if the player is not in the order; returns whether it took
    /// effect.
    pub fn set_current(&mut self, player: &PlayerId) -> bool {
        match self.player_ids.iter().position(|p| p == player) {
            Some(index) => {
                self.index = index;
                true
            }
            None => false,
        }
    }

    /// Current direction: `+1` forward, `-1` reverse.
    #[must_use]
    pub fn direction(&self) -> i8 {
        self.direction
    }

    /// Flip the direction of play.
    pub fn reverse(&mut self) {
        self.direction = -self.direction;
    }

    /// Queue additional players to be skipped on the next advance.
    pub fn add_skip(&mut self, count: u32) {
        self.skip_count += count;
    }

    /// Pending skip count.
    #[must_use]
    pub fn skip_count(&self) -> u32 {
        self.skip_count
    }

    /// Advance to the next player.
    ///
    /// Moves one step in the current direction, plus one extra step per
    /// queued skip, then clears the skip count. Wraps at either end.
    pub fn advance(&mut self) {
        if self.player_ids.is_empty() {
            self.skip_count = 0;
            return;
        }
        let len = self.player_ids.len() as i64;
        let steps = 1 + i64::from(self.skip_count);
        let next = (self.index as i64 % len) + i64::from(self.direction) * steps;
        self.index = next.rem_euclid(len) as usize;
        self.skip_count = 0;
    }
}
