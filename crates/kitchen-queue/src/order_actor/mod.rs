//! # Order Actor
//!
//! The order store: a [`ResourceActor`] holding every [`Order`] in the process.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](actor_framework::ActorEntity) implementation for [`Order`]
//! - [`error`] - [`OrderError`]
//! - [`actions`] - [`KitchenAction`] and [`KitchenTransition`]
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Kitchen transitions
//!
//! Kitchen status only moves forward. `AdvanceTo(target)` is a command, not a
//! compare-and-swap: sending it for an order already at or past `target`
//! succeeds without touching the order, so the kitchen application and the
//! auto-advance scheduler can race on the same order safely.
//!
//! ## Usage
//!
//! ```rust
//! use kitchen_queue::clock::{Clock, SystemClock};
//! use kitchen_queue::clients::{OrderClient, OrderStore};
//! use kitchen_queue::model::KitchenStatus;
//! use kitchen_queue::order_actor;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, generic_client) = order_actor::new(32);
//!     let client = OrderClient::new(generic_client);
//!     let clock: Arc<dyn Clock> = Arc::new(SystemClock);
//!     tokio::spawn(actor.run(clock));
//!
//!     let id = client.place_order(1).await?;
//!     client.update_kitchen_status(id, KitchenStatus::Ready).await?;
//!     // Going back is ignored.
//!     let order = client.update_kitchen_status(id, KitchenStatus::InProgress).await?;
//!     assert_eq!(order.kitchen_status, KitchenStatus::Ready);
//!     Ok(())
//! }
//! ```

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::model::Order;
use actor_framework::{ResourceActor, ResourceClient};

/// Creates a new Order actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Order>, ResourceClient<Order>) {
    ResourceActor::new(buffer_size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{Clock, ManualClock};
    use crate::model::{KitchenStatus, OrderCreate, OrderId, OrderStatus, OrderUpdate};
    use chrono::{DateTime, Duration, FixedOffset, TimeZone};
    use std::sync::Arc;

    fn start() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2024, 5, 1, 12, 0, 0)
            .unwrap()
    }

    fn spawn_store(clock: &ManualClock) -> ResourceClient<Order> {
        let (actor, client) = new(8);
        let ctx: Arc<dyn Clock> = Arc::new(clock.clone());
        tokio::spawn(actor.run(ctx));
        client
    }

    async fn place(client: &ResourceClient<Order>, number: u32) -> OrderId {
        client
            .create(OrderCreate {
                order_number: number,
                placed_at: None,
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn create_stamps_from_injected_clock() {
        let clock = ManualClock::new(start());
        let client = spawn_store(&clock);

        let id = place(&client, 12).await;
        let order = client.get(id).await.unwrap().unwrap();
        assert_eq!(order.created_at, start());
        assert_eq!(order.updated_at, start());
        assert_eq!(order.kitchen_status, KitchenStatus::New);
        assert_eq!(order.status, OrderStatus::Pending);
    }

    #[tokio::test]
    async fn zero_order_number_is_rejected() {
        let clock = ManualClock::new(start());
        let client = spawn_store(&clock);
        let result = client
            .create(OrderCreate {
                order_number: 0,
                placed_at: None,
            })
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn advance_is_forward_only_and_idempotent() {
        let clock = ManualClock::new(start());
        let client = spawn_store(&clock);
        let id = place(&client, 1).await;

        clock.advance(Duration::seconds(10));
        let t = client
            .perform_action(id, KitchenAction::AdvanceTo(KitchenStatus::Ready))
            .await
            .unwrap();
        assert!(t.applied);
        assert_eq!(t.from, KitchenStatus::New);
        assert_eq!(t.order.updated_at, start() + Duration::seconds(10));

        clock.advance(Duration::seconds(10));
        let back = client
            .perform_action(id, KitchenAction::AdvanceTo(KitchenStatus::InProgress))
            .await
            .unwrap();
        assert!(!back.applied);
        assert_eq!(back.order.kitchen_status, KitchenStatus::Ready);
        assert_eq!(back.order.updated_at, start() + Duration::seconds(10));

        client
            .perform_action(id, KitchenAction::AdvanceTo(KitchenStatus::Delivered))
            .await
            .unwrap();
        let again = client
            .perform_action(id, KitchenAction::AdvanceTo(KitchenStatus::Delivered))
            .await
            .unwrap();
        assert!(!again.applied);
        assert_eq!(again.order.updated_at, start() + Duration::seconds(20));
    }

    #[tokio::test]
    async fn update_bumps_updated_at_only_on_change() {
        let clock = ManualClock::new(start());
        let client = spawn_store(&clock);
        let id = place(&client, 1).await;
        let eta = start().with_timezone(&chrono::Utc) + Duration::minutes(12);

        clock.advance(Duration::seconds(5));
        let order = client
            .update(
                id,
                OrderUpdate {
                    status: None,
                    estimated_completion_time: Some(eta),
                },
            )
            .await
            .unwrap();
        assert_eq!(order.estimated_completion_time, Some(eta));
        assert_eq!(order.updated_at, start() + Duration::seconds(5));

        clock.advance(Duration::seconds(5));
        let same = client
            .update(
                id,
                OrderUpdate {
                    status: Some(OrderStatus::Pending),
                    estimated_completion_time: Some(eta),
                },
            )
            .await
            .unwrap();
        assert_eq!(same.updated_at, start() + Duration::seconds(5));
    }

    #[tokio::test]
    async fn cancelled_order_cannot_be_reopened() {
        let clock = ManualClock::new(start());
        let client = spawn_store(&clock);
        let id = place(&client, 1).await;

        let cancel = OrderUpdate {
            status: Some(OrderStatus::Cancelled),
            ..Default::default()
        };
        client.update(id, cancel).await.unwrap();

        let reopen = OrderUpdate {
            status: Some(OrderStatus::Pending),
            ..Default::default()
        };
        assert!(client.update(id, reopen).await.is_err());
        let order = client.get(id).await.unwrap().unwrap();
        assert_eq!(order.status, OrderStatus::Cancelled);
    }
}
