//! [`ActorEntity`] implementation for [`Order`].
//!
//! The store's clock is the actor context, so `created_at` and every
//! `updated_at` bump come from the same injectable source as the scheduler's
//! reads.

use super::{KitchenAction, KitchenTransition, OrderError};
use crate::clock::Clock;
use crate::model::{is_forward_transition, Order, OrderCreate, OrderId, OrderStatus, OrderUpdate};
use actor_framework::ActorEntity;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

#[async_trait]
impl ActorEntity for Order {
    type Id = OrderId;
    type Create = OrderCreate;
    type Update = OrderUpdate;
    type Action = KitchenAction;
    type ActionResult = KitchenTransition;
    type Context = Arc<dyn Clock>;
    type Error = OrderError;

    fn from_create_params(
        id: OrderId,
        params: OrderCreate,
        clock: &Arc<dyn Clock>,
    ) -> Result<Self, Self::Error> {
        if params.order_number == 0 {
            return Err(OrderError::ValidationError(
                "order number must be positive".to_string(),
            ));
        }
        let created_at = params.placed_at.unwrap_or_else(|| clock.now_utc());
        Ok(Order::new(id, params.order_number, created_at))
    }

    /// Applies kitchen staff edits. Cancelled orders accept no further status change.
    async fn on_update(
        &mut self,
        update: OrderUpdate,
        clock: &Arc<dyn Clock>,
    ) -> Result<(), Self::Error> {
        if let Some(status) = update.status {
            if self.status == OrderStatus::Cancelled && status != OrderStatus::Cancelled {
                return Err(OrderError::ValidationError(format!(
                    "{} is cancelled and cannot become {:?}",
                    self.id, status
                )));
            }
        }

        let mut changed = false;
        if let Some(status) = update.status {
            changed |= self.status != status;
            self.status = status;
        }
        if let Some(eta) = update.estimated_completion_time {
            changed |= self.estimated_completion_time != Some(eta);
            self.estimated_completion_time = Some(eta);
        }
        if changed {
            self.updated_at = clock.now_utc();
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: KitchenAction,
        clock: &Arc<dyn Clock>,
    ) -> Result<KitchenTransition, Self::Error> {
        match action {
            KitchenAction::AdvanceTo(target) => {
                let from = self.kitchen_status;
                let applied = is_forward_transition(from, target);
                if applied {
                    self.kitchen_status = target;
                    self.updated_at = clock.now_utc();
                    info!(order_id = %self.id, ?from, to = ?target, "Kitchen status advanced");
                }
                Ok(KitchenTransition {
                    from,
                    applied,
                    order: self.clone(),
                })
            }
        }
    }
}
