//! # System Lifecycle
//!
//! [`ConsoleSystem`] creates the draft actor, injects its storage at `run()`
//! time, and builds the session, notifier and checkout orchestrator around the
//! resulting client.
//!
//! ## Startup
//!
//! The draft actor hydrates from storage in `on_start`, before it reads its
//! first message. Requests sent right after `start()` queue behind hydration,
//! so nobody observes the pre-hydration empty draft.
//!
//! ## Graceful Shutdown
//!
//! 1. **Drop all clients** - the orchestrator's clone included
//! 2. **Actors detect closure** - `receiver.recv()` returns `None`
//! 3. **Await completion** - wait for every actor task
//!
//! Every accepted mutation was persisted before its reply, so shutdown has
//! nothing left to flush.
//!
//! ## Observability
//!
//! Call [`setup_tracing`](console_framework::tracing::setup_tracing) once at
//! process start; `RUST_LOG` selects verbosity.

pub mod console_system;

pub use console_system::*;
