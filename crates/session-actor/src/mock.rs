//! # Mock Client & Testing Utilities
//!
//! [`MockClient`] implements the same request/response surface as a live
//! [`SessionClient`] but runs entirely in-memory against a queue of
//! expectations. Use it to test logic *around* a session client - reply
//! rendering, error recovery - without spawning actors.
//!
//! | Feature | MockClient | Real Actor |
//! |---------|------------|------------|
//! | Speed | Instant (in-memory) | Fast (involves tokio spawn) |
//! | Determinism | 100% deterministic | Subject to scheduler |
//! | State | None (scripted responses) | Real entity state |
//! | Error injection | Easy (`return_err`) | Requires specific state |
//!
//! For testing the entity itself, or full flows, use a real
//! [`SessionRegistry`](crate::SessionRegistry) instead - see the crate's
//! integration tests for both patterns.

use crate::client::SessionClient;
use crate::entity::SessionEntity;
use crate::error::SessionError;
use crate::message::SessionRequest;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

/// A scripted response to the next request of the matching kind.
enum Expectation<T: SessionEntity> {
    Command {
        response: Result<T::Reply, SessionError>,
    },
    Snapshot {
        response: Result<T, SessionError>,
    },
}

/// A mock session client with expectation tracking.
///
/// # Example
/// ```ignore
/// let mut mock = MockClient::<OrderSession>::new();
/// mock.expect_command().return_ok("done".to_string());
///
/// let client = mock.client();
/// // Use client in tests...
/// mock.verify(); // Ensures all expectations were consumed
/// ```
pub struct MockClient<T: SessionEntity> {
    client: SessionClient<T>,
    expectations: Arc<Mutex<VecDeque<Expectation<T>>>>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: SessionEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: SessionEntity> MockClient<T> {
    /// Creates a new mock client with no expectations.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<SessionRequest<T>>(100);
        let expectations = Arc::new(Mutex::new(VecDeque::new()));
        let expectations_clone = expectations.clone();

        // Background task answering requests from the expectation queue
        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = expectations_clone.lock().unwrap().pop_front();
                match (request, expectation) {
                    (
                        SessionRequest::Command {
                            command: _,
                            respond_to,
                        },
                        Some(Expectation::Command { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        SessionRequest::Snapshot { respond_to },
                        Some(Expectation::Snapshot { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    _ => {
                        panic!("Unexpected request or expectation mismatch");
                    }
                }
            }
        });

        Self {
            client: SessionClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> SessionClient<T> {
        self.client.clone()
    }

    /// Expects a `command` call.
    pub fn expect_command(&mut self) -> CommandExpectationBuilder<T> {
        CommandExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a `snapshot` call.
    pub fn expect_snapshot(&mut self) -> SnapshotExpectationBuilder<T> {
        SnapshotExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Panics unless every expectation was consumed.
    pub fn verify(&self) {
        let exps = self.expectations.lock().unwrap();
        if !exps.is_empty() {
            panic!("Not all expectations were met. {} remaining", exps.len());
        }
    }
}

/// Builder for `command` expectations.
pub struct CommandExpectationBuilder<T: SessionEntity> {
    expectations: Arc<Mutex<VecDeque<Expectation<T>>>>,
}

impl<T: SessionEntity> CommandExpectationBuilder<T> {
    pub fn return_ok(self, reply: T::Reply) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::Command {
                response: Ok(reply),
            });
    }

    pub fn return_err(self, error: SessionError) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::Command {
                response: Err(error),
            });
    }
}

/// Builder for `snapshot` expectations.
pub struct SnapshotExpectationBuilder<T: SessionEntity> {
    expectations: Arc<Mutex<VecDeque<Expectation<T>>>>,
}

impl<T: SessionEntity> SnapshotExpectationBuilder<T> {
    pub fn return_ok(self, state: T) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::Snapshot {
                response: Ok(state),
            });
    }

    pub fn return_err(self, error: SessionError) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::Snapshot {
                response: Err(error),
            });
    }
}

/// Creates a bare mock client and the receiver for its requests, for tests
/// that want to assert on the raw [`SessionRequest`] traffic instead of
/// scripting responses.
pub fn create_mock_client<T: SessionEntity>(
    buffer_size: usize,
) -> (SessionClient<T>, mpsc::Receiver<SessionRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (SessionClient::new(sender), receiver)
}
