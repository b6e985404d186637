//! # ActorState Trait
//!
//! The contract a value must satisfy to be owned by a [`StateActor`](crate::StateActor).
//!
//! The trait splits every mutation into two halves:
//!
//! - [`ActorState::apply`] is the state transition. It is synchronous and must not
//!   perform I/O. When it returns `Err` the value must be left exactly as it was.
//! - [`ActorState::on_commit`] is the effect that follows an accepted transition
//!   (persisting, publishing). It runs before the caller gets its reply.
//!
//! [`ActorState::on_start`] runs once, before the first message is read.

use async_trait::async_trait;
use std::fmt::Debug;

/// State owned by a single actor task.
///
/// # Async & Context
/// Hooks are `#[async_trait]` so effects can await I/O. The `Context` associated
/// type is injected into every hook at `run()` time ("late binding").
#[async_trait]
pub trait ActorState: Clone + Send + Sync + 'static {
    /// A request to change the state.
    type Command: Send + Sync + Debug;

    /// What an accepted command produced.
    type Outcome: Send + Sync + Debug;

    /// The runtime context (dependencies) injected into the actor.
    /// Use `()` if no dependencies are needed.
    type Context: Send + Sync;

    /// The error type for rejected commands.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Called once before the message loop starts.
    ///
    /// Requests sent before the actor is spawned simply queue, so nothing can
    /// observe the state before this hook has finished.
    async fn on_start(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Apply a command. Must leave `self` untouched on error.
    fn apply(&mut self, command: Self::Command) -> Result<Self::Outcome, Self::Error>;

    /// Called after every successful `apply`, with the resulting outcome.
    ///
    /// Returning `Err` rejects the command: the actor puts back the state it had
    /// before `apply` and replies with the error.
    async fn on_commit(&self, _outcome: &Self::Outcome, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }
}
