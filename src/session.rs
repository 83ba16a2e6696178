//! Outbound collaborator contracts: presenting menus and speech.
//!
//! The engine decides *what* a player can do; the surrounding session
//! layer decides how that is rendered (menus, speech, sockets). These
//! traits are the entire outbound surface — the engine never renders UI
//! and treats every user-facing string as an opaque localization key.

use crate::core::PlayerId;

/// One entry in a rendered menu.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MenuItem {
    /// Display text (an opaque localization key).
    pub text: String,
    /// Stable id returned in the selection event.
    pub id: String,
}

impl MenuItem {
    /// Create a menu item.
    pub fn new(text: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            id: id.into(),
        }
    }
}

/// The user/session collaborator.
///
/// Implementations live in the session layer (network, speech output).
/// All calls are fire-and-forget from the engine's point of view.
pub trait Session {
    /// Speak a message key to one player.
    fn speak(&mut self, player: &PlayerId, key: &str);

    /// Show a menu to one player.
    fn show_menu(&mut self, player: &PlayerId, menu_id: &str, items: &[MenuItem]);

    /// Show a free-text entry box to one player.
    fn show_editbox(&mut self, player: &PlayerId, input_id: &str, prompt: &str, default: &str);

    /// Remove a menu from one player's view.
    fn remove_menu(&mut self, player: &PlayerId, menu_id: &str);

    /// Re-render one player's main menu from current state.
    fn refresh_menu(&mut self, player: &PlayerId);

    /// Re-render every player's main menu from current state.
    fn refresh_all(&mut self);
}

/// The localization collaborator.
///
/// The engine itself never calls this — labels flow through as keys — but
/// session implementations resolve keys to text with it, so the contract
/// lives next to [`Session`].
pub trait Localize {
    /// Resolve a key for a locale.
    fn get(&self, locale: &str, key: &str) -> String;
}

/// A session that renders nothing.
///
/// Used by fast-forwarded simulated playouts, where thousands of menu
/// refreshes per run would be wasted work.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSession;

impl Session for NullSession {
    fn speak(&mut self, _player: &PlayerId, _key: &str) {}
    fn show_menu(&mut self, _player: &PlayerId, _menu_id: &str, _items: &[MenuItem]) {}
    fn show_editbox(&mut self, _player: &PlayerId, _input_id: &str, _prompt: &str, _default: &str) {
    }
    fn remove_menu(&mut self, _player: &PlayerId, _menu_id: &str) {}
    fn refresh_menu(&mut self, _player: &PlayerId) {}
    fn refresh_all(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_item() {
        let item = MenuItem::new("roll-dice", "roll");
        assert_eq!(item.text, "roll-dice");
        assert_eq!(item.id, "roll");
    }

    #[test]
    fn test_null_session_is_silent() {
        let mut session = NullSession;
        let p = PlayerId::new("p1");
        session.speak(&p, "hello");
        session.show_menu(&p, "turn_menu", &[MenuItem::new("a", "a")]);
        session.refresh_all();
    }
}
