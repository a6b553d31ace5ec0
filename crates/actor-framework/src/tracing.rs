//! # Observability & Tracing
//!
//! [`setup_tracing`] installs the process-wide subscriber. Call it once, from the
//! binary, before spawning any actors.
//!
//! Verbosity is controlled with `RUST_LOG`:
//!
//! ```bash
//! RUST_LOG=info cargo run -p kitchen-queue        # transitions and lifecycle
//! RUST_LOG=debug cargo run -p kitchen-queue       # every request and scheduler pass
//! RUST_LOG=kitchen_queue::scheduler=debug cargo run -p kitchen-queue
//! ```
//!
//! With `info` the auto-advance flow reads like:
//!
//! ```text
//! INFO Actor started entity_type="Order"
//! INFO Created entity_type="Order" id=order_1 size=1
//! INFO scheduler_pass: Auto-advancing order order_id=order_1 elapsed_secs=31
//! INFO Kitchen status advanced order_id=order_1 from=Ready to=Delivered
//! ```
//!
//! The actor logs with an `entity_type` field instead of the module path, so the
//! subscriber hides targets.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
