//! # Mock Framework
//!
//! `MockClient<T>` hands out a real [`StateClient<T>`] whose requests are answered
//! from a queue of scripted replies instead of a running actor. It is meant for
//! testing code that *uses* a state client (the checkout flow, for example)
//! without standing up the state, its storage, and its actor.
//!
//! | | MockClient | Real Actor |
//! |---------|------------|------------|
//! | **State** | None, replies are scripted | Real transitions |
//! | **Error Injection** | `return_err` | Needs a state that fails |
//! | **Use Case** | Logic *around* the client | The state itself, or the system |
//!
//! ```rust
//! use console_framework::mock::MockClient;
//! use console_framework::{ActorState, FrameworkError};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug, PartialEq, Default)] struct Flag { on: bool }
//! #[derive(Debug)] enum FlagCommand { Toggle }
//! #[derive(Debug, thiserror::Error)] #[error("flag")] struct FlagError;
//!
//! #[async_trait]
//! impl ActorState for Flag {
//!     type Command = FlagCommand; type Outcome = bool; type Context = (); type Error = FlagError;
//!     fn apply(&mut self, _: FlagCommand) -> Result<bool, FlagError> { self.on = !self.on; Ok(self.on) }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockClient::<Flag>::new();
//!     mock.expect_snapshot().return_ok(Flag { on: true });
//!     mock.expect_dispatch().return_err(FrameworkError::ActorClosed);
//!
//!     let client = mock.client();
//!     assert!(client.snapshot().await.unwrap().on);
//!     assert!(matches!(client.dispatch(FlagCommand::Toggle).await, Err(FrameworkError::ActorClosed)));
//!
//!     mock.verify();
//!     assert_eq!(mock.dispatched().len(), 1);
//! }
//! ```
//!
//! For step-by-step control use [`create_mock_client`] with [`expect_dispatch`]
//! / [`expect_snapshot`] and reply through the returned sender.

use crate::client::StateClient;
use crate::error::FrameworkError;
use crate::message::StateRequest;
use crate::state::ActorState;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::{mpsc, oneshot};

enum Expectation<T: ActorState> {
    Dispatch {
        response: Result<T::Outcome, FrameworkError>,
    },
    Snapshot {
        response: Result<T, FrameworkError>,
    },
}

type Queue<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

fn lock<V>(m: &Mutex<V>) -> MutexGuard<'_, V> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// A mock client with expectation tracking.
///
/// Requests are matched against expectations in the order they were declared.
/// A request with no matching expectation panics the responder task, which the
/// caller observes as [`FrameworkError::ActorDropped`].
pub struct MockClient<T: ActorState> {
    client: StateClient<T>,
    expectations: Queue<T>,
    dispatched: Arc<Mutex<Vec<T::Command>>>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorState> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ActorState> MockClient<T> {
    /// Creates a new mock client with no expectations. Must be called inside a runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<StateRequest<T>>(100);
        let expectations: Queue<T> = Arc::new(Mutex::new(VecDeque::new()));
        let dispatched = Arc::new(Mutex::new(Vec::new()));

        let queue = expectations.clone();
        let log = dispatched.clone();
        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = lock(&queue).pop_front();

                match (request, expectation) {
                    (
                        StateRequest::Dispatch {
                            command,
                            respond_to,
                        },
                        Some(Expectation::Dispatch { response }),
                    ) => {
                        lock(&log).push(command);
                        let _ = respond_to.send(response);
                    }
                    (StateRequest::Snapshot { respond_to }, Some(Expectation::Snapshot { response })) => {
                        let _ = respond_to.send(response);
                    }
                    _ => panic!("Unexpected request or expectation mismatch"),
                }
            }
        });

        Self {
            client: StateClient::new(sender),
            expectations,
            dispatched,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> StateClient<T> {
        self.client.clone()
    }

    /// Expects a `dispatch` request.
    pub fn expect_dispatch(&mut self) -> DispatchExpectationBuilder<T> {
        DispatchExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a `snapshot` request.
    pub fn expect_snapshot(&mut self) -> SnapshotExpectationBuilder<T> {
        SnapshotExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Commands received so far, in order.
    pub fn dispatched(&self) -> MutexGuard<'_, Vec<T::Command>> {
        lock(&self.dispatched)
    }

    /// Panics unless every expectation was consumed.
    pub fn verify(&self) {
        let remaining = lock(&self.expectations).len();
        if remaining != 0 {
            panic!("Not all expectations were met. {remaining} remaining");
        }
    }
}

/// Builder for `dispatch` expectations.
pub struct DispatchExpectationBuilder<T: ActorState> {
    expectations: Queue<T>,
}

impl<T: ActorState> DispatchExpectationBuilder<T> {
    pub fn return_ok(self, outcome: T::Outcome) {
        lock(&self.expectations).push_back(Expectation::Dispatch {
            response: Ok(outcome),
        });
    }

    pub fn return_err(self, error: FrameworkError) {
        lock(&self.expectations).push_back(Expectation::Dispatch {
            response: Err(error),
        });
    }
}

/// Builder for `snapshot` expectations.
pub struct SnapshotExpectationBuilder<T: ActorState> {
    expectations: Queue<T>,
}

impl<T: ActorState> SnapshotExpectationBuilder<T> {
    pub fn return_ok(self, state: T) {
        lock(&self.expectations).push_back(Expectation::Snapshot { response: Ok(state) });
    }

    pub fn return_err(self, error: FrameworkError) {
        lock(&self.expectations).push_back(Expectation::Snapshot {
            response: Err(error),
        });
    }
}

/// Creates a client together with the receiving end of its channel.
///
/// The test drives the conversation itself: read the next request with
/// [`expect_dispatch`] or [`expect_snapshot`], assert on it, then reply.
pub fn create_mock_client<T: ActorState>(
    buffer_size: usize,
) -> (StateClient<T>, mpsc::Receiver<StateRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (StateClient::new(sender), receiver)
}

/// Next message, if it is a Dispatch.
pub async fn expect_dispatch<T: ActorState>(
    receiver: &mut mpsc::Receiver<StateRequest<T>>,
) -> Option<(T::Command, oneshot::Sender<Result<T::Outcome, FrameworkError>>)> {
    match receiver.recv().await {
        Some(StateRequest::Dispatch {
            command,
            respond_to,
        }) => Some((command, respond_to)),
        _ => None,
    }
}

/// Next message, if it is a Snapshot.
pub async fn expect_snapshot<T: ActorState>(
    receiver: &mut mpsc::Receiver<StateRequest<T>>,
) -> Option<oneshot::Sender<Result<T, FrameworkError>>> {
    match receiver.recv().await {
        Some(StateRequest::Snapshot { respond_to }) => Some(respond_to),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    #[derive(Clone, Debug, PartialEq, Default)]
    struct Tally {
        count: u32,
    }

    #[derive(Debug, PartialEq)]
    enum TallyCommand {
        Bump,
    }

    #[derive(Debug, thiserror::Error)]
    #[error("Tally error")]
    struct TallyError;

    #[async_trait]
    impl ActorState for Tally {
        type Command = TallyCommand;
        type Outcome = u32;
        type Context = ();
        type Error = TallyError;

        fn apply(&mut self, _command: TallyCommand) -> Result<u32, TallyError> {
            self.count += 1;
            Ok(self.count)
        }
    }

    #[tokio::test]
    async fn test_manual_mock_client() {
        let (client, mut receiver) = create_mock_client::<Tally>(10);

        let task = tokio::spawn(async move { client.dispatch(TallyCommand::Bump).await });

        let (command, responder) = expect_dispatch(&mut receiver)
            .await
            .expect("Expected Dispatch request");
        assert_eq!(command, TallyCommand::Bump);
        responder.send(Ok(7)).unwrap();

        let result = task.await.unwrap();
        assert!(matches!(result, Ok(7)));
    }

    #[tokio::test]
    async fn test_mock_client_with_expectations() {
        let mut mock = MockClient::<Tally>::new();
        mock.expect_dispatch().return_ok(1);
        mock.expect_snapshot().return_ok(Tally { count: 1 });

        let client = mock.client();
        assert_eq!(client.dispatch(TallyCommand::Bump).await.unwrap(), 1);
        assert_eq!(client.snapshot().await.unwrap(), Tally { count: 1 });

        mock.verify();
        assert_eq!(*mock.dispatched(), vec![TallyCommand::Bump]);
    }

    #[tokio::test]
    async fn test_unexpected_request_surfaces_as_dropped() {
        let mock = MockClient::<Tally>::new();
        let result = mock.client().snapshot().await;
        assert!(matches!(result, Err(FrameworkError::ActorDropped)));
    }
}
