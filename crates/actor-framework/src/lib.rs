//! # Actor Framework
//!
//! Resource-oriented actors on Tokio. A [`ResourceActor`] owns a store of entities
//! and processes requests for it one at a time; any number of cloned
//! [`ResourceClient`]s talk to it over a channel.
//!
//! The kitchen queue uses this to hold its orders: the order actor is the single
//! owner of order state in the process, and every reader (the display, the
//! auto-advance scheduler, kitchen staff tooling) goes through a client.
//!
//! ## Layers
//!
//! 1. **Entity** ([`ActorEntity`]) - the domain type, its DTOs and its hooks
//! 2. **Runtime** ([`ResourceActor`]) - message loop and store
//! 3. **Interface** ([`ResourceClient`], [`ActorClient`]) - typed requests
//!
//! ## Example
//!
//! ```rust
//! use actor_framework::{ActorEntity, ResourceActor};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)]
//! struct Ticket {
//!     id: u32,
//!     label: String,
//! }
//!
//! #[derive(Debug)] struct TicketCreate { label: String }
//! #[derive(Debug)] struct TicketUpdate { label: Option<String> }
//! #[derive(Debug)] enum TicketAction {}
//! #[derive(Debug, thiserror::Error)] #[error("ticket error")] struct TicketError;
//!
//! #[async_trait]
//! impl ActorEntity for Ticket {
//!     type Id = u32;
//!     type Create = TicketCreate;
//!     type Update = TicketUpdate;
//!     type Action = TicketAction;
//!     type ActionResult = ();
//!     type Context = ();
//!     type Error = TicketError;
//!
//!     fn from_create_params(id: u32, params: TicketCreate, _: &()) -> Result<Self, Self::Error> {
//!         Ok(Self { id, label: params.label })
//!     }
//!
//!     async fn on_update(&mut self, update: TicketUpdate, _: &()) -> Result<(), Self::Error> {
//!         if let Some(label) = update.label { self.label = label; }
//!         Ok(())
//!     }
//!
//!     async fn handle_action(&mut self, _: TicketAction, _: &()) -> Result<(), Self::Error> {
//!         Ok(())
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, client) = ResourceActor::<Ticket>::new(10);
//!     tokio::spawn(actor.run(()));
//!
//!     let id = client.create(TicketCreate { label: "A-1".into() }).await.unwrap();
//!     let ticket = client.get(id).await.unwrap().unwrap();
//!     assert_eq!(ticket.label, "A-1");
//!     assert_eq!(client.list().await.unwrap().len(), 1);
//! }
//! ```
//!
//! ## Context Injection
//!
//! Dependencies are handed to `run(context)` rather than `new()`. The context is
//! passed to every hook, including entity construction, so an entity can stamp
//! itself from an injected clock instead of reading wall time directly.
//!
//! ## Concurrency Model
//!
//! - Each actor runs in its own Tokio task
//! - Requests are processed sequentially, so the store needs no locks
//! - A `List` request returns a cloned snapshot; it may be stale by the time the
//!   caller acts on it, so writes should be idempotent commands
//!
//! ## Testing
//!
//! [`mock::MockClient`] answers requests from a queue of expectations without
//! spawning an actor.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod tracing;

pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{ResourceRequest, Response};
