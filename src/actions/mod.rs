//! Action model: immutable action descriptions, named per-player sets,
//! and the transient resolved views menus are built from.

pub mod action;
pub mod set;

pub use action::{Action, ActionContext, ActionId, InputRequest, PendingAction, ResolvedAction};
pub use set::{ActionSet, ActionSetTable};
