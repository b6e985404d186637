//! # Console Framework
//!
//! Building blocks for owning client-side state inside a single Tokio task.
//!
//! The console keeps a handful of pieces of mutable session state (the order
//! draft being the important one). Each of them is owned by a [`StateActor`]:
//! one task, one receiver, one value. Every mutation is a message, messages are
//! processed strictly in arrival order, and the reply is only sent once the
//! mutation and its side effects have completed.
//!
//! ## Architecture Overview
//!
//! 1. **State Layer** ([`ActorState`]) - the owned value, a *pure* transition
//!    function (`apply`) and optional async effects (`on_start`, `on_commit`).
//! 2. **Runtime Layer** ([`StateActor`]) - the message loop.
//! 3. **Interface Layer** ([`StateClient`]) - a cheap, cloneable handle.
//!
//! Keeping `apply` synchronous and free of I/O means the transition rules can be
//! unit tested directly on the value, without a runtime, storage or network.
//!
//! ```rust
//! use console_framework::{ActorState, StateActor};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug, Default)]
//! struct Counter { value: u32 }
//!
//! #[derive(Debug)]
//! enum CounterCommand { Add(u32) }
//!
//! #[derive(Debug, thiserror::Error)]
//! #[error("counter overflow")]
//! struct CounterError;
//!
//! #[async_trait]
//! impl ActorState for Counter {
//!     type Command = CounterCommand;
//!     type Outcome = u32;
//!     type Context = ();
//!     type Error = CounterError;
//!
//!     fn apply(&mut self, command: CounterCommand) -> Result<u32, CounterError> {
//!         match command {
//!             CounterCommand::Add(n) => {
//!                 self.value = self.value.checked_add(n).ok_or(CounterError)?;
//!                 Ok(self.value)
//!             }
//!         }
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, client) = StateActor::new(10, Counter::default());
//!     tokio::spawn(actor.run(()));
//!
//!     assert_eq!(client.dispatch(CounterCommand::Add(2)).await.unwrap(), 2);
//!     assert_eq!(client.snapshot().await.unwrap().value, 2);
//! }
//! ```
//!
//! ## Context Injection
//!
//! Dependencies (a storage handle, another client) are passed to
//! [`StateActor::run`] rather than to the constructor, so actors can be created
//! first and wired afterwards.
//!
//! ## Testing
//!
//! See the [`mock`] module for a client whose replies are scripted in advance.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod error;
pub mod message;
pub mod mock;
pub mod state;
pub mod tracing;

pub use actor::StateActor;
pub use client::StateClient;
pub use client_trait::ActorClient;
pub use error::FrameworkError;
pub use message::{Response, StateRequest};
pub use state::ActorState;
