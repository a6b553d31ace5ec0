//! # Queue Display
//!
//! Turns the visible queue into rows for a customer-facing screen.
//!
//! The display keeps its own notion of "now", refreshed on a fixed period by
//! [`spawn_refresh_loop`]. Wait estimates therefore move once per refresh, not
//! on every store read; the order list itself is read fresh on each call to
//! [`QueueDisplay::rows`].

use crate::clients::OrderStore;
use crate::clock::Clock;
use crate::estimator::{estimate_wait, WaitEstimate};
use crate::model::{KitchenStatus, Order, OrderId, OrderStatus};
use crate::order_actor::OrderError;
use crate::queue::visible_orders;
use chrono::{DateTime, FixedOffset, Utc};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StatusLabel {
    Ready,
    InProgress,
    New,
    Pending,
}

impl StatusLabel {
    pub fn for_order(order: &Order) -> Self {
        if order.is_finalized() {
            return StatusLabel::Ready;
        }
        match order.kitchen_status {
            KitchenStatus::Ready => StatusLabel::Ready,
            KitchenStatus::InProgress => StatusLabel::InProgress,
            KitchenStatus::New => StatusLabel::New,
            KitchenStatus::Delivered => StatusLabel::Pending,
        }
    }
}

/// Badge color class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BadgeTone {
    Green,
    Yellow,
    Blue,
}

impl From<StatusLabel> for BadgeTone {
    fn from(label: StatusLabel) -> Self {
        match label {
            StatusLabel::Ready => BadgeTone::Green,
            StatusLabel::InProgress => BadgeTone::Yellow,
            StatusLabel::New | StatusLabel::Pending => BadgeTone::Blue,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueueRow {
    pub id: OrderId,
    pub order_number: u32,
    pub status: StatusLabel,
    pub tone: BadgeTone,
    pub wait: WaitEstimate,
    /// Creation time in the display's offset.
    pub created_at: DateTime<FixedOffset>,
    /// Row background for orders the customer can collect.
    pub highlighted: bool,
}

impl QueueRow {
    fn from_order(order: &Order, now: DateTime<Utc>, offset: &FixedOffset) -> Self {
        let status = StatusLabel::for_order(order);
        Self {
            id: order.id,
            order_number: order.order_number,
            status,
            tone: status.into(),
            wait: estimate_wait(order, now),
            created_at: order.created_at.with_timezone(offset),
            highlighted: order.kitchen_status == KitchenStatus::Ready
                || order.status == OrderStatus::Completed,
        }
    }
}

/// Rows for every visible order at `now`, in queue order. `clock` supplies
/// the day boundary.
pub fn render_rows(orders: &[Order], now: &DateTime<FixedOffset>, clock: &dyn Clock) -> Vec<QueueRow> {
    let offset = now.timezone();
    let now_utc = now.with_timezone(&Utc);
    visible_orders(orders, now_utc, clock)
        .iter()
        .map(|order| QueueRow::from_order(order, now_utc, &offset))
        .collect()
}

/// Publishes `clock.now()` every `period` until `shutdown` flips or its sender is dropped.
pub fn spawn_refresh_loop(
    clock: Arc<dyn Clock>,
    period: std::time::Duration,
    now_tx: watch::Sender<DateTime<FixedOffset>>,
    mut shutdown: watch::Receiver<bool>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        info!(period_secs = period.as_secs(), "Display refresh started");

        loop {
            tokio::select! {
                biased;
                _ = shutdown.changed() => break,
                _ = ticker.tick() => {
                    let now = clock.now();
                    debug!(%now, "Display clock refreshed");
                    now_tx.send_replace(now);
                }
            }
        }

        info!("Display refresh stopped");
    })
}

/// Read side of the display: a store plus the last refreshed "now".
#[derive(Clone)]
pub struct QueueDisplay<S> {
    store: S,
    clock: Arc<dyn Clock>,
    now: watch::Receiver<DateTime<FixedOffset>>,
}

impl<S: OrderStore> QueueDisplay<S> {
    pub fn new(
        store: S,
        clock: Arc<dyn Clock>,
        now: watch::Receiver<DateTime<FixedOffset>>,
    ) -> Self {
        Self { store, clock, now }
    }

    /// The time the rows are rendered against.
    pub fn displayed_now(&self) -> DateTime<FixedOffset> {
        *self.now.borrow()
    }

    pub async fn rows(&self) -> Result<Vec<QueueRow>, OrderError> {
        let orders = self.store.list_orders().await?;
        Ok(render_rows(&orders, &self.displayed_now(), self.clock.as_ref()))
    }
}
