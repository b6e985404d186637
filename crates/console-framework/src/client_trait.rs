//! # ActorClient Trait
//!
//! Common surface for domain-specific client wrappers: a typed error and a
//! provided `snapshot` built on top of the generic [`StateClient`].
use crate::{ActorState, FrameworkError, StateClient};
use async_trait::async_trait;

/// Trait for domain clients wrapping a [`StateClient`].
///
/// Implementors supply `inner` and `map_error`; `snapshot` comes for free.
#[async_trait]
pub trait ActorClient<T: ActorState>: Send + Sync {
    /// The domain error type.
    type Error: Send + Sync;

    /// Access the inner generic StateClient.
    fn inner(&self) -> &StateClient<T>;

    /// Map framework errors to the domain error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// Read a copy of the current state.
    #[tracing::instrument(skip(self))]
    async fn snapshot(&self) -> Result<T, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().snapshot().await.map_err(Self::map_error)
    }
}
