//! # System Lifecycle
//!
//! Starts, wires and stops the pieces of the kitchen queue.
//!
//! ## Components
//!
//! [`KitchenSystem::new`] starts three tasks:
//!
//! 1. **Order actor** - the order store, run with the injected [`Clock`] as its context
//! 2. **Auto-advance scheduler** - delivers ready orders after the grace period
//! 3. **Display refresh** - republishes "now" for the queue display
//!
//! The two timers are independent. Each skips missed ticks and both stop on
//! the same shutdown signal.
//!
//! ## Graceful Shutdown
//!
//! 1. **Signal the timers** - flip the shutdown watch, which also aborts an in-flight pass
//! 2. **Await the timers** - they hold order clients, which must be gone before step 4
//! 3. **Drop remaining clients** - closes the actor's channel
//! 4. **Await the actor** - it drains queued requests and exits
//!
//! ```rust
//! use kitchen_queue::clock::SystemClock;
//! use kitchen_queue::config::QueueConfig;
//! use kitchen_queue::lifecycle::KitchenSystem;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let system = KitchenSystem::new(&QueueConfig::default(), Arc::new(SystemClock))?;
//!     system.order_client.place_order(1).await?;
//!     assert_eq!(system.display.rows().await?.len(), 1);
//!     system.shutdown().await;
//!     Ok(())
//! }
//! ```

use crate::clients::OrderClient;
use crate::clock::Clock;
use crate::config::{ConfigError, QueueConfig};
use crate::display::{spawn_refresh_loop, QueueDisplay};
use crate::order_actor;
use crate::scheduler::AutoAdvanceScheduler;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{info, warn};

pub struct KitchenSystem {
    pub order_client: OrderClient,
    pub display: QueueDisplay<OrderClient>,
    shutdown_tx: watch::Sender<bool>,
    timer_handles: Vec<JoinHandle<()>>,
    actor_handle: JoinHandle<()>,
}

impl KitchenSystem {
    /// Starts the system. Must be called from within a tokio runtime.
    ///
    /// The config is validated first; nothing is spawned if it is rejected.
    pub fn new(config: &QueueConfig, clock: Arc<dyn Clock>) -> Result<Self, ConfigError> {
        config.validate()?;

        let (actor, generic_client) = order_actor::new(config.channel_buffer);
        let order_client = OrderClient::new(generic_client);
        let actor_handle = tokio::spawn(actor.run(Arc::clone(&clock)));

        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let scheduler = Arc::new(AutoAdvanceScheduler::new(
            order_client.clone(),
            Arc::clone(&clock),
            config.grace_period(),
        ));
        let scheduler_handle = scheduler.spawn(config.scheduler_interval(), shutdown_rx.clone());

        let (now_tx, now_rx) = watch::channel(clock.now());
        let refresh_handle = spawn_refresh_loop(
            Arc::clone(&clock),
            config.refresh_interval(),
            now_tx,
            shutdown_rx,
        );

        info!(
            grace_period_secs = config.grace_period_secs,
            "Kitchen system started"
        );

        Ok(Self {
            display: QueueDisplay::new(order_client.clone(), clock, now_rx),
            order_client,
            shutdown_tx,
            timer_handles: vec![scheduler_handle, refresh_handle],
            actor_handle,
        })
    }

    pub async fn shutdown(self) {
        info!("Shutting down kitchen system");
        self.shutdown_tx.send_replace(true);

        for handle in self.timer_handles {
            if let Err(e) = handle.await {
                warn!(error = %e, "Timer task ended abnormally");
            }
        }

        drop(self.order_client);
        drop(self.display);

        if let Err(e) = self.actor_handle.await {
            warn!(error = %e, "Order actor ended abnormally");
        }
        info!("Kitchen system stopped");
    }
}
