//! The engine core: roster, event dispatch, action execution, and the
//! per-tick bot/estimation pump.
//!
//! [`Engine`] owns everything that serializes with a table (players, turn
//! order, action sets, pending input) plus the runtime-only pieces rebuilt
//! at load (keybinds, execution contexts, the estimator). It is not
//! generic over the game type; the generic methods take the game state and
//! its [`RulesRegistry`] as parameters, so one engine type serves every
//! game.
//!
//! Handlers receive a [`Cx`] with mutable access to the engine, the game
//! state, and the session; predicates and providers receive a read-only
//! [`View`]. The split keeps pure resolution side-effect free by
//! construction.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::actions::{
    Action, ActionContext, ActionId, ActionSet, ActionSetTable, InputRequest, PendingAction,
    ResolvedAction,
};
use crate::core::{EngineConfig, GamePhase, Player, PlayerId};
use crate::estimate::{DurationEstimator, EstimateError, EstimateReport};
use crate::keybinds::{canonical_key, Keybind, KeybindRegistry};
use crate::rules::{Enablement, RulesRegistry};
use crate::session::{MenuItem, Session};
use crate::turn::TurnOrder;

/// Main per-turn action menu.
pub const TURN_MENU: &str = "turn_menu";
/// Secondary "more actions" menu.
pub const ACTIONS_MENU: &str = "actions_menu";
/// The read-only status display.
pub const STATUS_BOX: &str = "status_box";
/// Post-game menu; any selection leaves the table.
pub const GAME_OVER_MENU: &str = "game_over";
/// Menu shown to gather an action's menu input.
pub const ACTION_INPUT_MENU: &str = "action_input_menu";
/// Editbox shown to gather an action's text input.
pub const ACTION_INPUT_EDITBOX: &str = "action_input_editbox";
/// Selection id that cancels a pending input.
pub const CANCEL_ID: &str = "_cancel";
/// Selection id that closes the secondary actions menu.
pub const GO_BACK_ID: &str = "go_back";
/// Action id executed from the game-over menu.
pub const LEAVE_ACTION: &str = "leave_game";

/// A player-originated UI event, already demultiplexed by the session
/// layer to the originating player.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// A menu selection, or a menu being dismissed.
    Menu {
        /// Which menu the selection came from.
        menu_id: String,
        /// Stable id of the selected item, when the client sent one.
        selection_id: Option<String>,
        /// 1-based position of the selection, used when the id is stale.
        selection: Option<usize>,
    },
    /// Text submitted from an editbox. Empty text cancels.
    Editbox {
        /// Which editbox the text came from.
        input_id: String,
        /// The submitted text.
        text: String,
    },
    /// A raw key press with modifier flags and the focused menu item.
    Keybind {
        /// Base key name as reported by the client.
        key: String,
        /// Shift held.
        shift: bool,
        /// Control held.
        control: bool,
        /// Alt held.
        alt: bool,
        /// Id of the menu item focused at press time, if any.
        menu_item_id: Option<String>,
        /// 1-based index of the focused menu item, if any.
        menu_index: Option<usize>,
    },
}

/// Read-only resolution context handed to predicates and providers.
pub struct View<'a, G> {
    /// The engine (roster, turns, phase).
    pub engine: &'a Engine,
    /// The game state.
    pub game: &'a G,
}

/// Mutable execution context handed to action handlers.
pub struct Cx<'a, G> {
    /// The engine, for turn and roster mutation.
    pub engine: &'a mut Engine,
    /// The game state.
    pub game: &'a mut G,
    /// The outbound session surface.
    pub session: &'a mut dyn Session,
}

impl<'a, G> Cx<'a, G> {
    /// A read-only view over the same engine and game.
    pub fn view(&self) -> View<'_, G> {
        View {
            engine: self.engine,
            game: self.game,
        }
    }

    /// Speak a message key to one player.
    pub fn speak(&mut self, player: &PlayerId, key: &str) {
        self.session.speak(player, key);
    }

    /// Pass the turn to the next player.
    pub fn end_turn(&mut self) {
        self.engine.end_turn();
    }
}

/// The interaction runtime for one table.
#[derive(Debug, Serialize, Deserialize)]
pub struct Engine {
    /// Table configuration.
    pub config: EngineConfig,
    /// Turn order over active players.
    pub turns: TurnOrder,
    /// Current lifecycle phase.
    pub phase: GamePhase,
    players: Vec<Player>,
    actions: ActionSetTable,
    pending: FxHashMap<PlayerId, PendingAction>,
    // Estimation is always idle after a restore
    #[serde(skip)]
    estimate_requester: Option<PlayerId>,
    // Open menus are not re-presented after a restore
    #[serde(skip)]
    status_box_open: FxHashSet<PlayerId>,
    #[serde(skip)]
    actions_menu_open: FxHashSet<PlayerId>,
    #[serde(skip)]
    keybinds: KeybindRegistry,
    #[serde(skip)]
    contexts: FxHashMap<PlayerId, ActionContext>,
    #[serde(skip)]
    estimator: DurationEstimator,
}

impl Engine {
    /// Create an engine in the waiting phase with an empty roster.
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            turns: TurnOrder::new(),
            phase: GamePhase::Waiting,
            players: Vec::new(),
            actions: ActionSetTable::new(),
            pending: FxHashMap::default(),
            status_box_open: FxHashSet::default(),
            actions_menu_open: FxHashSet::default(),
            estimate_requester: None,
            keybinds: KeybindRegistry::new(),
            contexts: FxHashMap::default(),
            estimator: DurationEstimator::new(),
        }
    }

    // --- roster ---

    /// All players at the table, in join order.
    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Look up a player by id.
    #[must_use]
    pub fn player(&self, id: &PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| &p.id == id)
    }

    /// Mutable player lookup by id.
    pub fn player_mut(&mut self, id: &PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| &p.id == id)
    }

    /// Look up a player by display name.
    #[must_use]
    pub fn player_by_name(&self, name: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.name == name)
    }

    /// Non-spectator players, in join order.
    pub fn active_players(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|p| !p.is_spectator)
    }

    /// Number of human non-spectators.
    #[must_use]
    pub fn human_count(&self) -> usize {
        self.active_players().filter(|p| !p.is_bot).count()
    }

    /// Number of bots.
    #[must_use]
    pub fn bot_count(&self) -> usize {
        self.active_players().filter(|p| p.is_bot).count()
    }

    /// Admit a player. Non-spectators count against `max_players`;
    /// spectators are always admitted. Returns whether the player joined.
    pub fn add_player(&mut self, player: Player) -> bool {
        if self.player(&player.id).is_some() {
            return false;
        }
        if !player.is_spectator && self.active_players().count() >= self.config.max_players {
            debug!(player = %player.id, "table full, join rejected");
            return false;
        }
        trace!(player = %player.id, bot = player.is_bot, "player joined");
        self.players.push(player);
        true
    }

    /// Remove a player and everything scoped to them.
    pub fn remove_player(&mut self, id: &PlayerId) {
        self.players.retain(|p| &p.id != id);
        self.turns.remove(id);
        self.actions.remove_player(id);
        self.pending.remove(id);
        self.contexts.remove(id);
        self.status_box_open.remove(id);
        self.actions_menu_open.remove(id);
        trace!(player = %id, "player removed");
    }

    /// Whether enough active players are present to start.
    #[must_use]
    pub fn can_start(&self) -> bool {
        self.active_players().count() >= self.config.min_players
    }

    // --- action sets and keybinds ---

    /// Attach an action set to a player.
    pub fn add_action_set(&mut self, player: &PlayerId, set: ActionSet) {
        self.actions.add_set(player, set);
    }

    /// Detach a player's action set by name.
    pub fn remove_action_set(&mut self, player: &PlayerId, name: &str) {
        self.actions.remove_set(player, name);
    }

    /// Find an action by id across a player's sets.
    #[must_use]
    pub fn find_action(&self, player: &PlayerId, id: &str) -> Option<&Action> {
        self.actions.find(player, id)
    }

    /// Register a keybind. Keybinds are runtime-only and re-registered
    /// after load, alongside the rules registry.
    pub fn define_keybind(&mut self, keybind: Keybind) {
        self.keybinds.define(keybind);
    }

    /// The keybind registry, for menu hint rendering.
    #[must_use]
    pub fn keybinds(&self) -> &KeybindRegistry {
        &self.keybinds
    }

    // --- pending input and contexts ---

    /// The suspended action awaiting this player's input, if any.
    #[must_use]
    pub fn pending_action(&self, player: &PlayerId) -> Option<&PendingAction> {
        self.pending.get(player)
    }

    /// Whether this player has a suspended action.
    #[must_use]
    pub fn has_pending(&self, player: &PlayerId) -> bool {
        self.pending.contains_key(player)
    }

    /// The execution context of this player's in-flight action, if the
    /// caller is inside a handler invocation.
    #[must_use]
    pub fn action_context(&self, player: &PlayerId) -> Option<&ActionContext> {
        self.contexts.get(player)
    }

    // --- open-menu bookkeeping ---

    /// Record whether a player's status box is showing.
    pub fn set_status_box_open(&mut self, player: &PlayerId, open: bool) {
        if open {
            self.status_box_open.insert(player.clone());
        } else {
            self.status_box_open.remove(player);
        }
    }

    /// Record whether a player's secondary actions menu is showing.
    pub fn set_actions_menu_open(&mut self, player: &PlayerId, open: bool) {
        if open {
            self.actions_menu_open.insert(player.clone());
        } else {
            self.actions_menu_open.remove(player);
        }
    }

    /// Whether a player's status box is showing.
    #[must_use]
    pub fn status_box_open(&self, player: &PlayerId) -> bool {
        self.status_box_open.contains(player)
    }

    /// Whether a player's secondary actions menu is showing.
    #[must_use]
    pub fn actions_menu_open(&self, player: &PlayerId) -> bool {
        self.actions_menu_open.contains(player)
    }

    // --- turns ---

    /// Pass the turn to the next player, honoring direction and skips.
    pub fn end_turn(&mut self) {
        self.turns.advance();
        trace!(current = ?self.turns.current(), "turn advanced");
    }

    // --- resolution ---

    /// Evaluate an action's label, enablement, and visibility for current
    /// state. Pure: repeated calls with unchanged state agree.
    #[must_use]
    pub fn resolve_action<G>(
        &self,
        registry: &RulesRegistry<G>,
        game: &G,
        player_id: &PlayerId,
        action: &Action,
    ) -> ResolvedAction {
        let view = View { engine: self, game };
        let player = self.player(player_id);

        let label = match (&action.label_from, player) {
            (Some(name), Some(p)) => match registry.get_label(name) {
                Some(resolver) => resolver.label(&view, p),
                None => action.label.clone(),
            },
            _ => action.label.clone(),
        };

        let enablement = match (&action.enabled_when, player) {
            (Some(name), Some(p)) => match registry.get_enabled(name) {
                Some(predicate) => predicate.check(&view, p),
                // Dangling name: fail open, trusted game code defined it
                None => Enablement::Enabled,
            },
            _ => Enablement::Enabled,
        };

        let visible = match (&action.visible_when, player) {
            (Some(name), Some(p)) => match registry.get_visible(name) {
                Some(predicate) => predicate.visible(&view, p),
                None => true,
            },
            _ => true,
        };

        ResolvedAction {
            action: action.clone(),
            label,
            enabled: enablement.is_enabled(),
            disabled_reason: enablement.reason().map(str::to_owned),
            visible,
        }
    }

    /// All currently visible actions for a player, across sets in menu
    /// order.
    #[must_use]
    pub fn visible_actions<G>(
        &self,
        registry: &RulesRegistry<G>,
        game: &G,
        player: &PlayerId,
    ) -> Vec<ResolvedAction> {
        self.actions
            .actions(player)
            .map(|a| self.resolve_action(registry, game, player, a))
            .filter(|r| r.visible)
            .collect()
    }

    /// Visible actions that are also enabled.
    #[must_use]
    pub fn enabled_actions<G>(
        &self,
        registry: &RulesRegistry<G>,
        game: &G,
        player: &PlayerId,
    ) -> Vec<ResolvedAction> {
        let mut actions = self.visible_actions(registry, game, player);
        actions.retain(|r| r.enabled);
        actions
    }

    /// The player's main menu as renderable items, one per visible action.
    #[must_use]
    pub fn menu_items<G>(
        &self,
        registry: &RulesRegistry<G>,
        game: &G,
        player: &PlayerId,
    ) -> Vec<MenuItem> {
        self.visible_actions(registry, game, player)
            .into_iter()
            .map(|r| MenuItem::new(r.label, r.action.id.as_str()))
            .collect()
    }

    // --- event dispatch ---

    /// Dispatch one player-originated event.
    pub fn handle_event<G>(
        &mut self,
        registry: &RulesRegistry<G>,
        game: &mut G,
        session: &mut dyn Session,
        player_id: &PlayerId,
        event: Event,
    ) {
        match event {
            Event::Menu {
                menu_id,
                selection_id,
                selection,
            } => self.handle_menu(
                registry,
                game,
                session,
                player_id,
                &menu_id,
                selection_id.as_deref(),
                selection,
            ),
            Event::Editbox { input_id, text } => {
                self.handle_editbox(registry, game, session, player_id, &input_id, &text);
            }
            Event::Keybind {
                key,
                shift,
                control,
                alt,
                menu_item_id,
                menu_index,
            } => self.handle_keybind(
                registry,
                game,
                session,
                player_id,
                &key,
                shift,
                control,
                alt,
                menu_item_id,
                menu_index,
            ),
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn handle_menu<G>(
        &mut self,
        registry: &RulesRegistry<G>,
        game: &mut G,
        session: &mut dyn Session,
        player_id: &PlayerId,
        menu_id: &str,
        selection_id: Option<&str>,
        selection: Option<usize>,
    ) {
        match menu_id {
            TURN_MENU => {
                // Interacting with the turn menu supersedes the secondary menu.
                self.actions_menu_open.remove(player_id);
                if self.has_pending(player_id) {
                    debug!(player = %player_id, "turn menu event while input pending ignored");
                    return;
                }
                let visible = self.visible_actions(registry, game, player_id);
                let Some(action_id) = selection_to_action(&visible, selection_id, selection)
                else {
                    debug!(player = %player_id, "turn menu selection matched no action");
                    return;
                };
                self.execute_action(
                    registry,
                    game,
                    session,
                    player_id,
                    &action_id,
                    ActionContext::default(),
                );
                if !self.has_pending(player_id) {
                    session.refresh_all();
                }
            }
            ACTIONS_MENU => {
                // Any selection closes the secondary menu, matched or not.
                self.actions_menu_open.remove(player_id);
                if self.has_pending(player_id) {
                    debug!(player = %player_id, "actions menu event while input pending ignored");
                    return;
                }
                if selection_id == Some(GO_BACK_ID) {
                    session.refresh_menu(player_id);
                    return;
                }
                let visible = self.visible_actions(registry, game, player_id);
                let Some(action_id) = selection_to_action(&visible, selection_id, selection)
                else {
                    debug!(player = %player_id, "actions menu selection matched no action");
                    session.refresh_menu(player_id);
                    return;
                };
                self.execute_action(
                    registry,
                    game,
                    session,
                    player_id,
                    &action_id,
                    ActionContext::default(),
                );
                if !self.has_pending(player_id) {
                    session.refresh_menu(player_id);
                }
            }
            STATUS_BOX => {
                session.remove_menu(player_id, STATUS_BOX);
                session.speak(player_id, "status-box-closed");
                self.status_box_open.remove(player_id);
                session.refresh_menu(player_id);
            }
            GAME_OVER_MENU => {
                // Any interaction with the post-game menu leaves the table.
                self.execute_action(
                    registry,
                    game,
                    session,
                    player_id,
                    &ActionId::new(LEAVE_ACTION),
                    ActionContext::default(),
                );
            }
            ACTION_INPUT_MENU => {
                let Some(pending) = self.pending.remove(player_id) else {
                    debug!(player = %player_id, "input menu selection with nothing pending");
                    return;
                };
                match selection_id {
                    None | Some(CANCEL_ID) => {
                        trace!(player = %player_id, action = %pending.action, "input cancelled");
                    }
                    Some(choice) => {
                        let choice = choice.to_owned();
                        self.invoke_by_id(
                            registry,
                            game,
                            session,
                            player_id,
                            &pending.action,
                            Some(&choice),
                        );
                    }
                }
                session.refresh_menu(player_id);
            }
            other => {
                debug!(menu = other, "event for unknown menu ignored");
            }
        }
    }

    fn handle_editbox<G>(
        &mut self,
        registry: &RulesRegistry<G>,
        game: &mut G,
        session: &mut dyn Session,
        player_id: &PlayerId,
        input_id: &str,
        text: &str,
    ) {
        if input_id != ACTION_INPUT_EDITBOX {
            debug!(input = input_id, "event for unknown editbox ignored");
            return;
        }
        let Some(pending) = self.pending.remove(player_id) else {
            debug!(player = %player_id, "editbox submission with nothing pending");
            return;
        };
        if text.is_empty() {
            trace!(player = %player_id, action = %pending.action, "input cancelled");
        } else {
            self.invoke_by_id(registry, game, session, player_id, &pending.action, Some(text));
        }
        session.refresh_menu(player_id);
    }

    #[allow(clippy::too_many_arguments)]
    fn handle_keybind<G>(
        &mut self,
        registry: &RulesRegistry<G>,
        game: &mut G,
        session: &mut dyn Session,
        player_id: &PlayerId,
        key: &str,
        shift: bool,
        control: bool,
        alt: bool,
        menu_item_id: Option<String>,
        menu_index: Option<usize>,
    ) {
        let key = canonical_key(key, shift, control, alt);
        let binds: Vec<Keybind> = self.keybinds.lookup(&key).to_vec();
        if binds.is_empty() {
            return;
        }
        let Some(player) = self.player(player_id).cloned() else {
            return;
        };

        let mut executed_any = false;
        for bind in &binds {
            if !bind.can_use(self.phase, &player) {
                continue;
            }
            if bind.requires_focus {
                let focused = menu_item_id
                    .as_deref()
                    .is_some_and(|id| bind.actions.iter().any(|a| a.as_str() == id));
                if !focused {
                    continue;
                }
            }
            for action_id in &bind.actions {
                let context = ActionContext::from_keybind(menu_item_id.clone(), menu_index);
                executed_any |=
                    self.execute_action(registry, game, session, player_id, action_id, context);
            }
        }

        // Suppress refresh while input or an auxiliary menu is up so the
        // key press does not clobber what the player is looking at.
        if executed_any
            && !self.has_pending(player_id)
            && !self.status_box_open.contains(player_id)
            && !self.actions_menu_open.contains(player_id)
        {
            session.refresh_all();
        }
    }

    // --- execution ---

    /// Execute an action for a player: resolve it, gather input if needed
    /// (suspending for humans, substituting for bots), then run the
    /// handler. Returns whether anything happened (handler ran or input
    /// was requested).
    pub fn execute_action<G>(
        &mut self,
        registry: &RulesRegistry<G>,
        game: &mut G,
        session: &mut dyn Session,
        player_id: &PlayerId,
        action_id: &ActionId,
        context: ActionContext,
    ) -> bool {
        let Some(action) = self.actions.find(player_id, action_id.as_str()).cloned() else {
            debug!(player = %player_id, action = %action_id, "unknown action ignored");
            return false;
        };
        let Some(player) = self.player(player_id).cloned() else {
            return false;
        };

        let resolved = self.resolve_action(registry, game, player_id, &action);
        if !resolved.enabled {
            if let Some(reason) = &resolved.disabled_reason {
                session.speak(player_id, reason);
            }
            trace!(player = %player_id, action = %action_id, "action disabled");
            return false;
        }

        if let Some(input) = action.input.clone() {
            if player.is_bot {
                let value = self.bot_input_value(registry, game, &player, &input);
                let Some(value) = value else {
                    trace!(player = %player_id, action = %action_id, "bot declined input");
                    return false;
                };
                return self.invoke_handler(
                    registry,
                    game,
                    session,
                    player_id,
                    &action,
                    Some(&value),
                    context,
                );
            }
            return self.request_input(registry, game, session, player_id, &action, &input);
        }

        self.invoke_handler(registry, game, session, player_id, &action, None, context)
    }

    /// Compute a bot's answer to an input request without suspending.
    fn bot_input_value<G>(
        &self,
        registry: &RulesRegistry<G>,
        game: &G,
        player: &Player,
        input: &InputRequest,
    ) -> Option<String> {
        let view = View { engine: self, game };
        match input {
            InputRequest::Menu {
                options,
                bot_select,
            } => {
                let opts = registry
                    .get_options(options)
                    .map(|p| p.options(&view, player))
                    .unwrap_or_default();
                if opts.is_empty() {
                    return None;
                }
                match bot_select.as_deref().and_then(|n| registry.get_bot_select(n)) {
                    Some(select) => select.select(&view, player, &opts),
                    None => opts.into_iter().next(),
                }
            }
            InputRequest::Editbox {
                default, bot_input, ..
            } => match bot_input.as_deref().and_then(|n| registry.get_bot_input(n)) {
                Some(provider) => provider.value(&view, player),
                None => Some(default.clone()),
            },
        }
    }

    /// Suspend the action and present its input surface to a human.
    fn request_input<G>(
        &mut self,
        registry: &RulesRegistry<G>,
        game: &G,
        session: &mut dyn Session,
        player_id: &PlayerId,
        action: &Action,
        input: &InputRequest,
    ) -> bool {
        match input {
            InputRequest::Menu { options, .. } => {
                let opts = {
                    let view = View { engine: self, game };
                    let player = self.player(player_id);
                    match (registry.get_options(options), player) {
                        (Some(provider), Some(p)) => provider.options(&view, p),
                        _ => Vec::new(),
                    }
                };
                if opts.is_empty() {
                    session.speak(player_id, "no-options-available");
                    return false;
                }
                self.pending.insert(
                    player_id.clone(),
                    PendingAction {
                        action: action.id.clone(),
                    },
                );
                let mut items: Vec<MenuItem> = opts
                    .iter()
                    .map(|opt| MenuItem::new(opt.clone(), opt.clone()))
                    .collect();
                items.push(MenuItem::new("cancel", CANCEL_ID));
                session.show_menu(player_id, ACTION_INPUT_MENU, &items);
                true
            }
            InputRequest::Editbox {
                prompt, default, ..
            } => {
                self.pending.insert(
                    player_id.clone(),
                    PendingAction {
                        action: action.id.clone(),
                    },
                );
                session.show_editbox(player_id, ACTION_INPUT_EDITBOX, prompt, default);
                true
            }
        }
    }

    /// Look an action up again by id and run its handler with gathered
    /// input. Used when a pending input resolves.
    fn invoke_by_id<G>(
        &mut self,
        registry: &RulesRegistry<G>,
        game: &mut G,
        session: &mut dyn Session,
        player_id: &PlayerId,
        action_id: &ActionId,
        input: Option<&str>,
    ) -> bool {
        let Some(action) = self.actions.find(player_id, action_id.as_str()).cloned() else {
            debug!(player = %player_id, action = %action_id, "pending action no longer exists");
            return false;
        };
        self.invoke_handler(
            registry,
            game,
            session,
            player_id,
            &action,
            input,
            ActionContext::default(),
        )
    }

    #[allow(clippy::too_many_arguments)]
    fn invoke_handler<G>(
        &mut self,
        registry: &RulesRegistry<G>,
        game: &mut G,
        session: &mut dyn Session,
        player_id: &PlayerId,
        action: &Action,
        input: Option<&str>,
        context: ActionContext,
    ) -> bool {
        let Some(handler) = registry.get_handler(&action.handler) else {
            warn!(handler = %action.handler, action = %action.id, "no handler registered");
            return false;
        };
        trace!(player = %player_id, action = %action.id, "invoking handler");
        self.contexts.insert(player_id.clone(), context);
        {
            let mut cx = Cx {
                engine: self,
                game,
                session,
            };
            handler.invoke(&mut cx, player_id, &action.id, input);
        }
        self.contexts.remove(player_id);
        true
    }

    // --- the tick pump ---

    /// Advance time by one tick: pace and fire bot decisions, and poll the
    /// duration estimator. Returns a finished estimate when one completed
    /// this tick.
    pub fn tick<G>(
        &mut self,
        registry: &RulesRegistry<G>,
        game: &mut G,
        session: &mut dyn Session,
    ) -> Option<EstimateReport> {
        if self.phase.is_playing() {
            self.pump_bots(registry, game, session);
        }

        if let Some(outcome) = self.estimator.poll() {
            let requester = self.estimate_requester.take();
            return Some(EstimateReport { requester, outcome });
        }
        None
    }

    fn pump_bots<G>(
        &mut self,
        registry: &RulesRegistry<G>,
        game: &mut G,
        session: &mut dyn Session,
    ) {
        // Fire queued decisions whose think counter has elapsed.
        let mut to_fire = Vec::new();
        for p in &mut self.players {
            if !p.is_bot || p.bot_pending_action.is_none() {
                continue;
            }
            if p.bot_think_ticks > 0 {
                p.bot_think_ticks -= 1;
            }
            if p.bot_think_ticks == 0 {
                if let Some(action) = p.bot_pending_action.take() {
                    to_fire.push((p.id.clone(), action));
                }
            }
        }
        for (player_id, action) in to_fire {
            self.execute_action(
                registry,
                game,
                session,
                &player_id,
                &action,
                ActionContext::default(),
            );
        }

        // Consult the policy for idle bots.
        let Some(policy) = registry.get_bot_policy() else {
            return;
        };
        let mut decisions = Vec::new();
        {
            let view = View {
                engine: &*self,
                game: &*game,
            };
            for p in view.engine.players.iter() {
                if !p.is_bot || p.is_spectator || p.bot_pending_action.is_some() {
                    continue;
                }
                if view.engine.has_pending(&p.id) {
                    continue;
                }
                if let Some(action) = policy.decide(&view, p) {
                    decisions.push((p.id.clone(), action));
                }
            }
        }
        let think = self.config.bot_think_ticks;
        for (player_id, action) in decisions {
            if think == 0 {
                self.execute_action(
                    registry,
                    game,
                    session,
                    &player_id,
                    &action,
                    ActionContext::default(),
                );
            } else if let Some(p) = self.player_mut(&player_id) {
                trace!(player = %player_id, action = %action, think, "bot decided");
                p.bot_pending_action = Some(action);
                p.bot_think_ticks = think;
            }
        }
    }

    // --- estimation ---

    /// Launch a duration estimate with the configured worker count.
    ///
    /// `simulate` runs one fast-forwarded playout per worker, seeded
    /// uniquely. Rejected as a no-op while an estimate is already running.
    pub fn start_estimate<F>(&mut self, requester: Option<PlayerId>, simulate: F) -> bool
    where
        F: Fn(u64) -> Result<u64, EstimateError> + Send + Sync + 'static,
    {
        let started = self.estimator.start(self.config.estimate.workers, simulate);
        if started {
            self.estimate_requester = requester;
        }
        started
    }

    /// Whether an estimate is currently in flight.
    #[must_use]
    pub fn estimate_running(&self) -> bool {
        self.estimator.is_running()
    }
}

/// Resolve a menu selection to an action id against the list the menu was
/// rendered from. The stable id wins; the 1-based positional index is the
/// fallback for clients racing a menu refresh.
fn selection_to_action(
    visible: &[ResolvedAction],
    selection_id: Option<&str>,
    selection: Option<usize>,
) -> Option<ActionId> {
    if let Some(id) = selection_id {
        if let Some(found) = visible.iter().find(|r| r.action.id.as_str() == id) {
            return Some(found.action.id.clone());
        }
    }
    selection
        .and_then(|i| i.checked_sub(1))
        .and_then(|i| visible.get(i))
        .map(|r| r.action.id.clone())
}
