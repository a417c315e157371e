//! Shared utilities for use cases.
//!
//! Cancellation checking, cancellable awaiting, and task guards used by the
//! responder, aggregator and orchestrator.

use crate::publisher::PublishError;
use std::future::Future;
use thiserror::Error;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// The run was cancelled (caller gone, deadline hit, or consumer dropped).
///
/// Not a failure: a cancelled run simply stops publishing.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Run cancelled")]
pub struct Cancelled;

impl From<PublishError> for Cancelled {
    fn from(_: PublishError) -> Self {
        Cancelled
    }
}

/// Return `Err(Cancelled)` if the token is cancelled.
pub(crate) fn check_cancelled(token: &CancellationToken) -> Result<(), Cancelled> {
    if token.is_cancelled() {
        return Err(Cancelled);
    }
    Ok(())
}

/// Await `future` unless the token fires first; the future is dropped on cancellation.
pub(crate) async fn until_cancelled<F: Future>(
    token: &CancellationToken,
    future: F,
) -> Result<F::Output, Cancelled> {
    tokio::select! {
        biased;
        _ = token.cancelled() => Err(Cancelled),
        output = future => Ok(output),
    }
}

/// Aborts the wrapped task when dropped.
#[derive(Debug)]
pub struct AbortOnDrop(JoinHandle<()>);

impl AbortOnDrop {
    pub fn new(handle: JoinHandle<()>) -> Self {
        Self(handle)
    }
}

impl Drop for AbortOnDrop {
    fn drop(&mut self) {
        self.0.abort();
    }
}

/// Cancel `token` once `timeout` elapses. Dropping the guard disarms it.
pub(crate) fn cancel_after(token: CancellationToken, timeout: std::time::Duration) -> AbortOnDrop {
    AbortOnDrop::new(tokio::spawn(async move {
        tokio::select! {
            _ = tokio::time::sleep(timeout) => {
                tracing::warn!("Run deadline of {:?} reached, cancelling", timeout);
                token.cancel();
            }
            _ = token.cancelled() => {}
        }
    }))
}
