//! Capability traits the concrete game implements, and the registry that
//! maps the names carried on [`Action`](crate::actions::Action) records to
//! instances.
//!
//! This is the seam between the generic runtime and a game's rules. Each
//! role gets its own narrow trait: handlers mutate state, predicates and
//! providers are pure reads. Games register small named types or closures
//! under the names their actions reference; a lookup miss is "use default
//! behavior", never an error, because actions are defined by trusted game
//! code and a dangling name must not take down a live session.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::actions::ActionId;
use crate::core::{Player, PlayerId};
use crate::dispatch::{Cx, View};

/// Enablement verdict from an [`EnabledPredicate`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Enablement {
    /// The action may execute.
    Enabled,
    /// The action may not execute; the optional key is spoken to the player.
    Disabled(Option<String>),
}

impl Enablement {
    /// Disabled with a spoken reason key.
    pub fn disabled(reason: impl Into<String>) -> Self {
        Enablement::Disabled(Some(reason.into()))
    }

    /// True when the action may execute.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        matches!(self, Enablement::Enabled)
    }

    /// The disabled-reason key, if any.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        match self {
            Enablement::Enabled => None,
            Enablement::Disabled(reason) => reason.as_deref(),
        }
    }
}

/// Executes an action after its input (if any) has been gathered.
pub trait ActionHandler<G>: Send + Sync {
    /// Run the action. `input` is the gathered menu selection or text.
    fn invoke(&self, cx: &mut Cx<'_, G>, player: &PlayerId, action: &ActionId, input: Option<&str>);
}

/// Decides whether an action is currently enabled.
pub trait EnabledPredicate<G>: Send + Sync {
    /// Pure read of live state; must not mutate anything.
    fn check(&self, view: &View<'_, G>, player: &Player) -> Enablement;
}

/// Decides whether an action is currently visible in menus.
pub trait VisiblePredicate<G>: Send + Sync {
    /// Pure read of live state; must not mutate anything.
    fn visible(&self, view: &View<'_, G>, player: &Player) -> bool;
}

/// Produces an action's current label.
pub trait LabelResolver<G>: Send + Sync {
    /// Returns the label key for display right now.
    fn label(&self, view: &View<'_, G>, player: &Player) -> String;
}

/// Supplies the option list for a menu-input action.
pub trait OptionsProvider<G>: Send + Sync {
    /// Returns the selectable values in display order.
    fn options(&self, view: &View<'_, G>, player: &Player) -> Vec<String>;
}

/// Picks a menu option on behalf of a bot.
pub trait BotSelect<G>: Send + Sync {
    /// Returns the chosen option, or `None` if the bot cannot choose.
    fn select(&self, view: &View<'_, G>, player: &Player, options: &[String]) -> Option<String>;
}

/// Supplies a free-text value on behalf of a bot.
pub trait BotInput<G>: Send + Sync {
    /// Returns the submitted text, or `None` if the bot cannot provide one.
    fn value(&self, view: &View<'_, G>, player: &Player) -> Option<String>;
}

/// Decides a bot's next action.
///
/// Consulted from the engine tick once a bot's think counter reaches zero.
/// `None` means the bot stays idle this tick.
pub trait BotPolicy<G>: Send + Sync {
    /// Returns the next action id to execute, or `None` to wait.
    fn decide(&self, view: &View<'_, G>, player: &Player) -> Option<ActionId>;
}

impl<G, F> ActionHandler<G> for F
where
    F: Fn(&mut Cx<'_, G>, &PlayerId, &ActionId, Option<&str>) + Send + Sync,
{
    fn invoke(
        &self,
        cx: &mut Cx<'_, G>,
        player: &PlayerId,
        action: &ActionId,
        input: Option<&str>,
    ) {
        self(cx, player, action, input)
    }
}

impl<G, F> EnabledPredicate<G> for F
where
    F: Fn(&View<'_, G>, &Player) -> Enablement + Send + Sync,
{
    fn check(&self, view: &View<'_, G>, player: &Player) -> Enablement {
        self(view, player)
    }
}

impl<G, F> VisiblePredicate<G> for F
where
    F: Fn(&View<'_, G>, &Player) -> bool + Send + Sync,
{
    fn visible(&self, view: &View<'_, G>, player: &Player) -> bool {
        self(view, player)
    }
}

impl<G, F> OptionsProvider<G> for F
where
    F: Fn(&View<'_, G>, &Player) -> Vec<String> + Send + Sync,
{
    fn options(&self, view: &View<'_, G>, player: &Player) -> Vec<String> {
        self(view, player)
    }
}

/// Per-game mapping from capability names to instances.
///
/// One registry exists per table, rebuilt at load time (trait objects are
/// runtime-only; the names on actions are what persists).
pub struct RulesRegistry<G> {
    handlers: FxHashMap<String, Arc<dyn ActionHandler<G>>>,
    enabled: FxHashMap<String, Arc<dyn EnabledPredicate<G>>>,
    visible: FxHashMap<String, Arc<dyn VisiblePredicate<G>>>,
    labels: FxHashMap<String, Arc<dyn LabelResolver<G>>>,
    options: FxHashMap<String, Arc<dyn OptionsProvider<G>>>,
    bot_selects: FxHashMap<String, Arc<dyn BotSelect<G>>>,
    bot_inputs: FxHashMap<String, Arc<dyn BotInput<G>>>,
    bot_policy: Option<Arc<dyn BotPolicy<G>>>,
}

impl<G> Default for RulesRegistry<G> {
    fn default() -> Self {
        Self {
            handlers: FxHashMap::default(),
            enabled: FxHashMap::default(),
            visible: FxHashMap::default(),
            labels: FxHashMap::default(),
            options: FxHashMap::default(),
            bot_selects: FxHashMap::default(),
            bot_inputs: FxHashMap::default(),
            bot_policy: None,
        }
    }
}

impl<G> RulesRegistry<G> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an action handler under a name.
    pub fn handler(&mut self, name: impl Into<String>, h: impl ActionHandler<G> + 'static) {
        self.handlers.insert(name.into(), Arc::new(h));
    }

    /// Register an enablement predicate under a name.
    pub fn enabled_predicate(
        &mut self,
        name: impl Into<String>,
        p: impl EnabledPredicate<G> + 'static,
    ) {
        self.enabled.insert(name.into(), Arc::new(p));
    }

    /// Register a visibility predicate under a name.
    pub fn visible_predicate(
        &mut self,
        name: impl Into<String>,
        p: impl VisiblePredicate<G> + 'static,
    ) {
        self.visible.insert(name.into(), Arc::new(p));
    }

    /// Register a dynamic label resolver under a name.
    pub fn label_resolver(&mut self, name: impl Into<String>, r: impl LabelResolver<G> + 'static) {
        self.labels.insert(name.into(), Arc::new(r));
    }

    /// Register an options provider under a name.
    pub fn options_provider(
        &mut self,
        name: impl Into<String>,
        p: impl OptionsProvider<G> + 'static,
    ) {
        self.options.insert(name.into(), Arc::new(p));
    }

    /// Register a bot menu-selection policy under a name.
    pub fn bot_select(&mut self, name: impl Into<String>, p: impl BotSelect<G> + 'static) {
        self.bot_selects.insert(name.into(), Arc::new(p));
    }

    /// Register a bot text-input policy under a name.
    pub fn bot_input(&mut self, name: impl Into<String>, p: impl BotInput<G> + 'static) {
        self.bot_inputs.insert(name.into(), Arc::new(p));
    }

    /// Install the bot turn policy for this game.
    pub fn bot_policy(&mut self, p: impl BotPolicy<G> + 'static) {
        self.bot_policy = Some(Arc::new(p));
    }

    /// Look up a handler by name.
    #[must_use]
    pub fn get_handler(&self, name: &str) -> Option<Arc<dyn ActionHandler<G>>> {
        self.handlers.get(name).cloned()
    }

    /// Look up an enablement predicate by name.
    #[must_use]
    pub fn get_enabled(&self, name: &str) -> Option<&Arc<dyn EnabledPredicate<G>>> {
        self.enabled.get(name)
    }

    /// Look up a visibility predicate by name.
    #[must_use]
    pub fn get_visible(&self, name: &str) -> Option<&Arc<dyn VisiblePredicate<G>>> {
        self.visible.get(name)
    }

    /// Look up a label resolver by name.
    #[must_use]
    pub fn get_label(&self, name: &str) -> Option<&Arc<dyn LabelResolver<G>>> {
        self.labels.get(name)
    }

    /// Look up an options provider by name.
    #[must_use]
    pub fn get_options(&self, name: &str) -> Option<&Arc<dyn OptionsProvider<G>>> {
        self.options.get(name)
    }

    /// Look up a bot menu-selection policy by name.
    #[must_use]
    pub fn get_bot_select(&self, name: &str) -> Option<&Arc<dyn BotSelect<G>>> {
        self.bot_selects.get(name)
    }

    /// Look up a bot text-input policy by name.
    #[must_use]
    pub fn get_bot_input(&self, name: &str) -> Option<&Arc<dyn BotInput<G>>> {
        self.bot_inputs.get(name)
    }

    /// The installed bot turn policy, if any.
    #[must_use]
    pub fn get_bot_policy(&self) -> Option<Arc<dyn BotPolicy<G>>> {
        self.bot_policy.clone()
    }
}
