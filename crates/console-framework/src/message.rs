//! # Generic Messages
//!
//! The message types exchanged between [`StateClient`](crate::StateClient) and
//! [`StateActor`](crate::StateActor).

use crate::error::FrameworkError;
use crate::state::ActorState;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Request sent to a state actor.
///
/// There are only two shapes: change the state (`Dispatch`) or read a copy of it
/// (`Snapshot`). Domain-specific operations are expressed as
/// [`ActorState::Command`] variants, so the compiler rejects a draft command
/// sent to any other kind of actor.
#[derive(Debug)]
pub enum StateRequest<T: ActorState> {
    Dispatch {
        command: T::Command,
        respond_to: Response<T::Outcome>,
    },
    Snapshot {
        respond_to: Response<T>,
    },
}
