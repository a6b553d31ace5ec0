//! Plain data types for the kitchen queue.

pub mod order;

pub use order::*;
