//! Execution context: cancellation and deadlines for a single API call.

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::Error;

/// Caller-supplied handle that scopes the lifetime of an API call.
///
/// A context carries a [`CancellationToken`] and an optional deadline. Cancelling
/// the token or letting the deadline pass aborts the in-flight call with
/// [`Error::Cancelled`] or [`Error::DeadlineExceeded`].
#[derive(Clone, Debug, Default)]
pub struct Context {
    cancel: CancellationToken,
    deadline: Option<Instant>,
}

impl Context {
    /// A context that is never cancelled and has no deadline.
    pub fn background() -> Self {
        Self::default()
    }

    /// Uses the given token for cancellation.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Sets the deadline to `timeout` from now. An earlier existing deadline wins.
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// Sets an absolute deadline. An earlier existing deadline wins.
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(match self.deadline {
            Some(current) if current < deadline => current,
            _ => deadline,
        });
        self
    }

    /// The token that cancels this context.
    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancel
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Returns the error this context would fail with right now, if any.
    pub fn err(&self) -> Option<Error> {
        if self.cancel.is_cancelled() {
            return Some(Error::Cancelled);
        }
        match self.deadline {
            Some(deadline) if deadline <= Instant::now() => Some(Error::DeadlineExceeded),
            _ => None,
        }
    }

    /// Runs `fut` under this context.
    pub(crate) async fn run<T, F>(&self, fut: F) -> Result<T, Error>
    where
        F: Future<Output = Result<T, Error>>,
    {
        if let Some(err) = self.err() {
            return Err(err);
        }

        let bounded = async {
            match self.deadline {
                Some(deadline) => match tokio::time::timeout_at(deadline, fut).await {
                    Ok(result) => result,
                    Err(_) => Err(Error::DeadlineExceeded),
                },
                None => fut.await,
            }
        };

        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(Error::Cancelled),
            result = bounded => result,
        }
    }
}
