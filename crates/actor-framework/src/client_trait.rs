//! # ActorClient Trait
//!
//! Domain clients wrap a [`ResourceClient`] and translate [`FrameworkError`] into
//! their own error type. Implementing this trait gives them `get` and `list`
//! for free.
use crate::{ActorEntity, FrameworkError, ResourceClient};
use async_trait::async_trait;

/// Trait for resource-specific clients to inherit the standard read operations.
///
/// # Example
///
/// ```rust
/// use actor_framework::{ActorClient, ActorEntity, FrameworkError, ResourceClient};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)]
/// struct Station { id: u32 }
/// #[derive(Debug)] struct StationCreate;
/// #[derive(Debug)] struct StationUpdate;
/// #[derive(Debug)] enum StationAction {}
/// #[derive(Debug, thiserror::Error)]
/// #[error("{0}")]
/// struct StationError(String);
///
/// impl From<String> for StationError {
///     fn from(s: String) -> Self { StationError(s) }
/// }
///
/// #[async_trait]
/// impl ActorEntity for Station {
///     type Id = u32;
///     type Create = StationCreate;
///     type Update = StationUpdate;
///     type Action = StationAction;
///     type ActionResult = ();
///     type Context = ();
///     type Error = StationError;
///
///     fn from_create_params(id: u32, _: StationCreate, _: &()) -> Result<Self, Self::Error> {
///         Ok(Self { id })
///     }
///     async fn on_update(&mut self, _: StationUpdate, _: &()) -> Result<(), Self::Error> { Ok(()) }
///     async fn handle_action(&mut self, _: StationAction, _: &()) -> Result<(), Self::Error> { Ok(()) }
/// }
///
/// struct StationClient {
///     inner: ResourceClient<Station>,
/// }
///
/// #[async_trait]
/// impl ActorClient<Station> for StationClient {
///     type Error = StationError;
///
///     fn inner(&self) -> &ResourceClient<Station> {
///         &self.inner
///     }
///
///     fn map_error(e: FrameworkError) -> Self::Error {
///         StationError(e.to_string())
///     }
/// }
///
/// async fn usage(client: StationClient) {
///     let _ = client.get(1).await;
///     let _ = client.list().await;
/// }
/// ```
#[async_trait]
pub trait ActorClient<T: ActorEntity>: Send + Sync {
    /// The resource-specific error type.
    type Error: From<String> + Send + Sync;

    /// Access the inner generic ResourceClient.
    fn inner(&self) -> &ResourceClient<T>;

    /// Map framework errors to the specific resource error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// Fetch an entity by ID.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    /// Snapshot of every entity the actor holds.
    #[tracing::instrument(skip(self))]
    async fn list(&self) -> Result<Vec<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().list().await.map_err(Self::map_error)
    }
}
