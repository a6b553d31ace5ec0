//! # Generic Messages
//!
//! Requests carried from a [`ResourceClient`](crate::ResourceClient) to a
//! [`ResourceActor`](crate::ResourceActor), each with a oneshot reply channel.

use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Internal message type sent to the actor to request operations.
///
/// The variants are the resource lifecycle operations every entity supports,
/// plus `Action` for entity-specific commands:
///
/// - **Create**: builds a new entity from [`ActorEntity::Create`].
/// - **Get**: fetches one entity by id.
/// - **List**: returns a snapshot of every entity in the store.
/// - **Update**: applies an [`ActorEntity::Update`] to one entity.
/// - **Action**: runs an [`ActorEntity::Action`] against one entity.
///
/// Records are never removed; once created, an entity lives as long as the actor.
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    Create {
        params: T::Create,
        respond_to: Response<T::Id>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    List {
        respond_to: Response<Vec<T>>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
}
