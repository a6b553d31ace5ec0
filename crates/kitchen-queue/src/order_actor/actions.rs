//! Kitchen status commands for the Order actor.

use crate::model::{KitchenStatus, Order};

/// Custom actions for the Order actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KitchenAction {
    /// Move the kitchen status forward to the given value.
    ///
    /// Idempotent: targets at or behind the current status leave the order as is.
    AdvanceTo(KitchenStatus),
}

/// Outcome of a [`KitchenAction`].
#[derive(Debug, Clone, PartialEq)]
pub struct KitchenTransition {
    /// Status before the action ran.
    pub from: KitchenStatus,
    /// `false` when the action was a no-op.
    pub applied: bool,
    /// State after the action.
    pub order: Order,
}
