//! # Auto-Advance Scheduler
//!
//! Delivers orders that have sat in `ready` for the grace period, without any
//! staff action.
//!
//! Each pass reads a fresh store snapshot, narrows it to the visible queue and
//! sends `AdvanceTo(Delivered)` for every ready order whose anchor
//! ([`Order::ready_anchor`]) is at least the grace period old. The snapshot
//! may be stale by the time the command lands; the store treats a command on an
//! already delivered order as a no-op, so a repeated or racing pass is harmless.
//!
//! A failure on one order is logged and the pass moves on. A failed or
//! panicking pass is logged and the next tick runs on schedule.

use crate::clients::OrderStore;
use crate::clock::Clock;
use crate::model::{KitchenStatus, Order, OrderId};
use crate::order_actor::OrderError;
use crate::queue::visible_orders;
use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info, instrument, warn};

/// True when `order` is ready and its anchor is at least `grace` before `now`.
pub fn due_for_delivery(order: &Order, now: DateTime<Utc>, grace: Duration) -> bool {
    order.kitchen_status == KitchenStatus::Ready
        && now.signed_duration_since(order.ready_anchor()) >= grace
}

/// What a single pass did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PassReport {
    /// Orders on the visible queue when the pass started.
    pub scanned: usize,
    /// Orders the pass sent to `delivered`, including ones that already were.
    pub delivered: Vec<OrderId>,
    /// Orders that vanished from the store between the read and the write.
    pub missing: Vec<OrderId>,
    /// Orders whose transition failed for any other reason.
    pub failed: Vec<OrderId>,
}

pub struct AutoAdvanceScheduler<S> {
    store: S,
    clock: Arc<dyn Clock>,
    grace_period: Duration,
}

impl<S: OrderStore> AutoAdvanceScheduler<S> {
    pub fn new(store: S, clock: Arc<dyn Clock>, grace_period: Duration) -> Self {
        Self {
            store,
            clock,
            grace_period,
        }
    }

    /// One scan of the queue. Errors only when the snapshot itself cannot be read.
    #[instrument(name = "scheduler_pass", skip(self))]
    pub async fn run_pass(&self) -> Result<PassReport, OrderError> {
        let now = self.clock.now_utc();
        let orders = self.store.list_orders().await?;
        let visible = visible_orders(&orders, now, self.clock.as_ref());

        let mut report = PassReport {
            scanned: visible.len(),
            ..Default::default()
        };

        for order in visible
            .iter()
            .filter(|order| due_for_delivery(order, now, self.grace_period))
        {
            let elapsed_secs = now.signed_duration_since(order.ready_anchor()).num_seconds();
            info!(order_id = %order.id, elapsed_secs, "Auto-advancing order");

            match self
                .store
                .update_kitchen_status(order.id, KitchenStatus::Delivered)
                .await
            {
                Ok(_) => report.delivered.push(order.id),
                Err(OrderError::NotFound(id)) => {
                    warn!(order_id = %id, "Order disappeared before delivery");
                    report.missing.push(id);
                }
                Err(e) => {
                    warn!(order_id = %order.id, error = %e, "Auto-advance failed");
                    report.failed.push(order.id);
                }
            }
        }

        debug!(
            scanned = report.scanned,
            delivered = report.delivered.len(),
            "Pass complete"
        );
        Ok(report)
    }
}

impl<S: OrderStore + 'static> AutoAdvanceScheduler<S> {
    /// Runs a pass every `period` until `shutdown` flips or its sender is dropped.
    ///
    /// Missed ticks are skipped, not replayed. Each pass runs in its own task so
    /// a panic in one pass does not end the schedule. A pass still in flight at
    /// shutdown is aborted.
    pub fn spawn(
        self: Arc<Self>,
        period: std::time::Duration,
        mut shutdown: watch::Receiver<bool>,
    ) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            info!(period_secs = period.as_secs(), "Auto-advance scheduler started");

            loop {
                tokio::select! {
                    biased;
                    _ = shutdown.changed() => break,
                    _ = ticker.tick() => {}
                }

                let scheduler = Arc::clone(&self);
                let mut pass = tokio::spawn(async move { scheduler.run_pass().await });

                tokio::select! {
                    biased;
                    _ = shutdown.changed() => {
                        pass.abort();
                        break;
                    }
                    result = &mut pass => match result {
                        Ok(Ok(_)) => {}
                        Ok(Err(e)) => warn!(error = %e, "Scheduler pass failed"),
                        Err(e) => error!(error = %e, "Scheduler pass panicked"),
                    },
                }
            }

            info!("Auto-advance scheduler stopped");
        })
    }
}
