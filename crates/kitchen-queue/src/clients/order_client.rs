//! # Order Client
//!
//! High-level API over the order actor, and the [`OrderStore`] seam the
//! scheduler and display depend on.
use crate::model::{KitchenStatus, Order, OrderCreate, OrderId, OrderUpdate};
use crate::order_actor::{KitchenAction, OrderError};
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{debug, instrument};

/// The order collection as the queue engine sees it.
///
/// Implementations must tolerate concurrent callers. `update_kitchen_status`
/// is forward-only: targets at or behind the current status return the order
/// unchanged rather than an error.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Snapshot of every order. May be stale by the time it is used.
    async fn list_orders(&self) -> Result<Vec<Order>, OrderError>;

    async fn update_kitchen_status(
        &self,
        id: OrderId,
        status: KitchenStatus,
    ) -> Result<Order, OrderError>;
}

/// Client for interacting with the Order actor.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
}

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>) -> Self {
        Self { inner }
    }

    /// Place a new order stamped with the store's clock.
    #[instrument(skip(self))]
    pub async fn place_order(&self, order_number: u32) -> Result<OrderId, OrderError> {
        self.create_order(OrderCreate {
            order_number,
            placed_at: None,
        })
        .await
    }

    #[instrument(skip(self))]
    pub async fn create_order(&self, params: OrderCreate) -> Result<OrderId, OrderError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    /// Record the kitchen's completion estimate.
    #[instrument(skip(self))]
    pub async fn set_estimate(
        &self,
        id: OrderId,
        eta: DateTime<Utc>,
    ) -> Result<Order, OrderError> {
        let update = OrderUpdate {
            estimated_completion_time: Some(eta),
            ..Default::default()
        };
        self.update_order(id, update).await
    }

    #[instrument(skip(self))]
    pub async fn update_order(&self, id: OrderId, update: OrderUpdate) -> Result<Order, OrderError> {
        debug!("Sending request");
        self.inner
            .update(id, update)
            .await
            .map_err(|e| map_with_id(e, id))
    }
}

#[async_trait]
impl ActorClient<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &ResourceClient<Order> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::EntityError(inner) => match inner.downcast::<OrderError>() {
                Ok(order_error) => *order_error,
                Err(other) => OrderError::ActorCommunicationError(other.to_string()),
            },
            other => OrderError::ActorCommunicationError(other.to_string()),
        }
    }
}

#[async_trait]
impl OrderStore for OrderClient {
    async fn list_orders(&self) -> Result<Vec<Order>, OrderError> {
        <Self as ActorClient<Order>>::list(self).await
    }

    #[instrument(skip(self))]
    async fn update_kitchen_status(
        &self,
        id: OrderId,
        status: KitchenStatus,
    ) -> Result<Order, OrderError> {
        debug!("Sending request");
        let transition = self
            .inner
            .perform_action(id, KitchenAction::AdvanceTo(status))
            .await
            .map_err(|e| map_with_id(e, id))?;
        if !transition.applied {
            debug!(current = ?transition.order.kitchen_status, "Transition was a no-op");
        }
        Ok(transition.order)
    }
}

// Keeps the typed id for NotFound; the framework only carries its string form.
fn map_with_id(e: FrameworkError, id: OrderId) -> OrderError {
    match e {
        FrameworkError::NotFound(_) => OrderError::NotFound(id),
        other => OrderClient::map_error(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actor_framework::mock::{create_mock_client, expect_action, MockClient};
    use chrono::TimeZone;

    fn order(n: u32, status: KitchenStatus) -> Order {
        let t = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let mut order = Order::new(OrderId(n), n, t);
        order.kitchen_status = status;
        order
    }

    #[tokio::test]
    async fn update_kitchen_status_sends_advance_action() {
        let (client, mut receiver) = create_mock_client::<Order>(10);
        let order_client = OrderClient::new(client);

        let task = tokio::spawn(async move {
            order_client
                .update_kitchen_status(OrderId(3), KitchenStatus::Delivered)
                .await
        });

        let (id, action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        assert_eq!(id, OrderId(3));
        assert_eq!(action, KitchenAction::AdvanceTo(KitchenStatus::Delivered));
        responder
            .send(Ok(crate::order_actor::KitchenTransition {
                from: KitchenStatus::Ready,
                applied: true,
                order: order(3, KitchenStatus::Delivered),
            }))
            .unwrap();

        let updated = task.await.unwrap().unwrap();
        assert_eq!(updated.kitchen_status, KitchenStatus::Delivered);
    }

    #[tokio::test]
    async fn missing_order_maps_to_typed_not_found() {
        let mut mock = MockClient::<Order>::new();
        mock.expect_action(OrderId(9))
            .return_err(FrameworkError::NotFound("order_9".to_string()));
        let client = OrderClient::new(mock.client());

        let err = client
            .update_kitchen_status(OrderId(9), KitchenStatus::Delivered)
            .await
            .unwrap_err();
        assert_eq!(err, OrderError::NotFound(OrderId(9)));
        mock.verify();
    }

    #[tokio::test]
    async fn entity_errors_keep_their_type() {
        let mut mock = MockClient::<Order>::new();
        mock.expect_update(OrderId(2)).return_err(FrameworkError::EntityError(Box::new(
            OrderError::ValidationError("cancelled".to_string()),
        )));
        let client = OrderClient::new(mock.client());

        let err = client
            .update_order(OrderId(2), OrderUpdate::default())
            .await
            .unwrap_err();
        assert_eq!(err, OrderError::ValidationError("cancelled".to_string()));
    }
}
