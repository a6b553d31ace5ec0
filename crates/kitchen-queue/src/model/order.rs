//! Orders as seen by the kitchen queue.
//!
//! # Actor Framework
//! [`Order`] implements the [`ActorEntity`](actor_framework::ActorEntity) trait,
//! allowing it to be managed by a [`ResourceActor`](actor_framework::ResourceActor).
//!
//! See [`crate::order_actor`] for details on:
//! - Creation parameters ([`OrderCreate`])
//! - Update parameters ([`OrderUpdate`])
//! - Kitchen transitions ([`KitchenAction`](crate::order_actor::KitchenAction))

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderId(pub u32);

impl From<u32> for OrderId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "order_{}", self.0)
    }
}

/// Overall order lifecycle, owned by the ordering workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderStatus {
    Pending,
    Completed,
    Cancelled,
}

/// Kitchen-facing lifecycle.
///
/// Variants are declared in lifecycle order, so the derived `Ord` is the
/// progression `New < InProgress < Ready < Delivered`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum KitchenStatus {
    New,
    InProgress,
    Ready,
    Delivered,
}

impl KitchenStatus {
    pub fn is_terminal(self) -> bool {
        self == KitchenStatus::Delivered
    }
}

/// True only when `to` lies strictly after `from` in the kitchen lifecycle.
///
/// Every kitchen status write goes through this check; a write that fails it
/// is dropped rather than rejected.
pub fn is_forward_transition(from: KitchenStatus, to: KitchenStatus) -> bool {
    to > from
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    /// Display number within the day.
    pub order_number: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub status: OrderStatus,
    pub kitchen_status: KitchenStatus,
    /// Kitchen-supplied and advisory; may already be in the past.
    pub estimated_completion_time: Option<DateTime<Utc>>,
}

impl Order {
    /// Creates a fresh order: pending, new in the kitchen, no estimate.
    pub fn new(id: OrderId, order_number: u32, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            order_number,
            created_at,
            updated_at: created_at,
            status: OrderStatus::Pending,
            kitchen_status: KitchenStatus::New,
            estimated_completion_time: None,
        }
    }

    /// Completed orders and delivered ones show the terminal "ready" text.
    pub fn is_finalized(&self) -> bool {
        self.status == OrderStatus::Completed || self.kitchen_status.is_terminal()
    }

    /// Anchor for the auto-advance grace period.
    ///
    /// The estimate wins when present, even if it predates the move to `Ready`.
    pub fn ready_anchor(&self) -> DateTime<Utc> {
        self.estimated_completion_time.unwrap_or(self.updated_at)
    }
}

/// Payload for placing a new order.
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub order_number: u32,
    /// Creation time for orders imported from elsewhere; the store's clock otherwise.
    pub placed_at: Option<DateTime<Utc>>,
}

/// Kitchen staff edits. Fields left as `None` are untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderUpdate {
    pub status: Option<OrderStatus>,
    pub estimated_completion_time: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn forward_transitions_follow_lifecycle_order() {
        use KitchenStatus::*;
        assert!(is_forward_transition(New, InProgress));
        assert!(is_forward_transition(New, Delivered));
        assert!(is_forward_transition(Ready, Delivered));
        assert!(!is_forward_transition(Delivered, Delivered));
        assert!(!is_forward_transition(Ready, InProgress));
        assert!(!is_forward_transition(Delivered, New));
    }

    #[test]
    fn ready_anchor_prefers_estimate() {
        let t = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let mut order = Order::new(OrderId(1), 1, t);
        assert_eq!(order.ready_anchor(), t);

        let eta = t + chrono::Duration::minutes(5);
        order.estimated_completion_time = Some(eta);
        assert_eq!(order.ready_anchor(), eta);
    }
}
