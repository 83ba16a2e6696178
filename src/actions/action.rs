//! Action descriptions and their per-evaluation resolved views.
//!
//! An [`Action`] is pure data: an id, a label key, and the *names* of the
//! behaviors it needs (handler, predicates, options provider, bot
//! policies). Names are resolved through the per-game
//! [`RulesRegistry`](crate::rules::RulesRegistry) at call time; a name with
//! no registered capability means "use default behavior", never an error.
//! Keeping actions as plain data lets the whole action-set table serialize
//! with game state.

use serde::{Deserialize, Serialize};

/// Action identifier, unique within a player's action sets.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActionId(String);

impl ActionId {
    /// Create a new action ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the raw id string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ActionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ActionId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for ActionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Input an action gathers before its handler runs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputRequest {
    /// Choose one entry from a menu.
    Menu {
        /// Name of the registered options provider.
        options: String,
        /// Name of the registered bot selection policy.
        /// Absent = bots pick the first option.
        bot_select: Option<String>,
    },
    /// Free-text entry.
    Editbox {
        /// Localization key for the prompt.
        prompt: String,
        /// Pre-filled default value.
        default: String,
        /// Name of the registered bot value policy.
        /// Absent = bots submit the default.
        bot_input: Option<String>,
    },
}

impl InputRequest {
    /// Menu input with no bot policy.
    pub fn menu(options: impl Into<String>) -> Self {
        InputRequest::Menu {
            options: options.into(),
            bot_select: None,
        }
    }

    /// Menu input with a bot selection policy.
    pub fn menu_with_bot(options: impl Into<String>, bot_select: impl Into<String>) -> Self {
        InputRequest::Menu {
            options: options.into(),
            bot_select: Some(bot_select.into()),
        }
    }

    /// Editbox input with no bot policy.
    pub fn editbox(prompt: impl Into<String>, default: impl Into<String>) -> Self {
        InputRequest::Editbox {
            prompt: prompt.into(),
            default: default.into(),
            bot_input: None,
        }
    }
}

/// A selectable operation offered to one player.
///
/// Created once when a player's action sets are built and immutable
/// afterwards; looked up by id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    /// Unique id within the owning player's sets.
    pub id: ActionId,

    /// Static label (an opaque localization key).
    pub label: String,

    /// Name of the registered handler.
    pub handler: String,

    /// Name of the enablement predicate. Absent = always enabled.
    pub enabled_when: Option<String>,

    /// Name of the visibility predicate. Absent = always visible.
    pub visible_when: Option<String>,

    /// Name of a dynamic label resolver. Absent = static label.
    pub label_from: Option<String>,

    /// Input gathered before the handler runs, if any.
    pub input: Option<InputRequest>,
}

impl Action {
    /// Create an action with the defensive defaults: always enabled,
    /// always visible, static label, no input.
    pub fn new(
        id: impl Into<ActionId>,
        label: impl Into<String>,
        handler: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            handler: handler.into(),
            enabled_when: None,
            visible_when: None,
            label_from: None,
            input: None,
        }
    }

    /// Gate this action on a named enablement predicate.
    #[must_use]
    pub fn enabled_when(mut self, predicate: impl Into<String>) -> Self {
        self.enabled_when = Some(predicate.into());
        self
    }

    /// Gate this action's visibility on a named predicate.
    #[must_use]
    pub fn visible_when(mut self, predicate: impl Into<String>) -> Self {
        self.visible_when = Some(predicate.into());
        self
    }

    /// Resolve the label dynamically through a named resolver.
    #[must_use]
    pub fn label_from(mut self, resolver: impl Into<String>) -> Self {
        self.label_from = Some(resolver.into());
        self
    }

    /// Require input before the handler runs.
    #[must_use]
    pub fn with_input(mut self, input: InputRequest) -> Self {
        self.input = Some(input);
        self
    }
}

/// The live-evaluated view of an [`Action`] for current state.
///
/// Never persisted; recomputed on every query so display stays in sync
/// with game state. Resolution has no side effects, so repeated calls
/// with unchanged state produce identical output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedAction {
    /// The source action.
    pub action: Action,
    /// Current label.
    pub label: String,
    /// Whether the action may execute right now.
    pub enabled: bool,
    /// Spoken reason when not enabled. Only meaningful if `!enabled`.
    pub disabled_reason: Option<String>,
    /// Whether the action appears in menus.
    pub visible: bool,
}

/// A suspended action awaiting player-supplied input.
///
/// At most one exists per player; creating one suspends further dispatch
/// for that player until it resolves or is superseded.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingAction {
    /// The action id awaiting input.
    pub action: ActionId,
}

/// Context passed to handlers for the duration of one execution.
///
/// Exactly one context exists per in-flight execution per player; it is
/// created when the handler is invoked and discarded afterwards.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ActionContext {
    /// Id of the focused menu item when a keybind fired.
    pub menu_item_id: Option<String>,
    /// 1-based index of the focused menu item.
    pub menu_index: Option<usize>,
    /// True when triggered by a key press, false for a menu pick.
    pub from_keybind: bool,
}

impl ActionContext {
    /// Context for a keybind-triggered execution.
    #[must_use]
    pub fn from_keybind(menu_item_id: Option<String>, menu_index: Option<usize>) -> Self {
        Self {
            menu_item_id,
            menu_index,
            from_keybind: true,
        }
    }
}
