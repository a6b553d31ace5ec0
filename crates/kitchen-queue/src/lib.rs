//! # Kitchen Queue
//!
//! Order queue lifecycle engine for a restaurant's customer-facing display.
//!
//! - **[model]**: [`Order`](model::Order) and its two status axes
//! - **[order_actor]** / **[clients]**: the order store and its typed client
//! - **[queue]**, **[estimator]**: which orders are shown and how long each will take
//! - **[scheduler]**: delivers ready orders after a grace period
//! - **[display]**, **[localization]**: rows for the screen and their text
//! - **[lifecycle]**: wires it all together
//!
//! All time reads go through [`clock::Clock`] so the engine can be driven by a
//! fake clock in tests.

pub mod clients;
pub mod clock;
pub mod config;
pub mod display;
pub mod estimator;
pub mod lifecycle;
pub mod localization;
pub mod model;
pub mod order_actor;
pub mod queue;
pub mod scheduler;
