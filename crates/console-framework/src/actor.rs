//! # State Actor
//!
//! The server half: owns the state and the receiving end of the channel, and
//! processes requests one at a time.

use crate::client::StateClient;
use crate::error::FrameworkError;
use crate::message::StateRequest;
use crate::state::ActorState;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The generic actor that owns one [`ActorState`] value.
///
/// **Concurrency Model**:
/// Requests are handled sequentially in [`StateActor::run`], so the state needs
/// no `Mutex`. Two dispatches can never interleave, and a reply is only sent
/// after `apply` *and* `on_commit` have completed for that request.
///
/// # Usage Pattern
///
/// 1. **Create**: `StateActor::new()` returns the actor and its client.
/// 2. **Wire**: pass dependencies into `actor.run(context)`.
/// 3. **Run**: spawn the run loop in a background task.
///
/// ## Operations
///
/// * **Dispatch**:
///     1. Calls `T::apply` with the command.
///     2. On success, awaits `T::on_commit` with the outcome.
///     3. If the commit fails, restores the state from before `apply`.
///     4. Replies with the outcome, or the boxed state error.
///
/// * **Snapshot**:
///     1. Replies with a clone of the current state.
pub struct StateActor<T: ActorState> {
    receiver: mpsc::Receiver<StateRequest<T>>,
    state: T,
}

impl<T: ActorState> StateActor<T> {
    /// Creates a new `StateActor` around `initial` and its associated client.
    ///
    /// `buffer_size` is the capacity of the request channel; callers wait when it
    /// is full.
    pub fn new(buffer_size: usize, initial: T) -> (Self, StateClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            state: initial,
        };
        (actor, StateClient::new(sender))
    }

    /// Runs the actor's event loop, processing messages until every client is dropped.
    pub async fn run(mut self, context: T::Context) {
        // Just the type name ("Draft" rather than "order_console::draft::state::Draft")
        let state_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");

        if let Err(e) = self.state.on_start(&context).await {
            warn!(state_type, error = %e, "on_start failed");
        }
        info!(state_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                StateRequest::Dispatch {
                    command,
                    respond_to,
                } => {
                    debug!(state_type, ?command, "Dispatch");
                    let previous = self.state.clone();
                    let outcome = match self.state.apply(command) {
                        Ok(outcome) => outcome,
                        Err(e) => {
                            warn!(state_type, error = %e, "Rejected");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                            continue;
                        }
                    };
                    if let Err(e) = self.state.on_commit(&outcome, &context).await {
                        warn!(state_type, error = %e, "on_commit failed, rolled back");
                        self.state = previous;
                        let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        continue;
                    }
                    info!(state_type, ?outcome, "Applied");
                    let _ = respond_to.send(Ok(outcome));
                }
                StateRequest::Snapshot { respond_to } => {
                    debug!(state_type, "Snapshot");
                    let _ = respond_to.send(Ok(self.state.clone()));
                }
            }
        }

        info!(state_type, "Shutdown");
    }
}
