//! Deadline helper for bounding network calls.
//!
//! The deadline is any future that completes when time is up, so callers pass
//! [`sleep`] in the browser and tests pass `ready(())` or `pending()`.

#[cfg(test)]
#[path = "timeout_test.rs"]
mod timeout_test;

use std::pin::pin;
use std::time::Duration;

use futures::future::{Either, select};

/// The deadline fired before the guarded future finished.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("deadline elapsed")]
pub struct Elapsed;

/// Drive `fut` until it completes or `deadline` fires, whichever is first.
///
/// # Errors
///
/// Returns [`Elapsed`] when the deadline wins; `fut` is dropped unfinished.
pub async fn with_deadline<F, D>(fut: F, deadline: D) -> Result<F::Output, Elapsed>
where
    F: Future,
    D: Future<Output = ()>,
{
    let fut = pin!(fut);
    let deadline = pin!(deadline);
    match select(fut, deadline).await {
        Either::Left((output, _)) => Ok(output),
        Either::Right(((), _)) => Err(Elapsed),
    }
}

/// Browser timer that resolves after `duration`.
#[cfg(feature = "csr")]
pub fn sleep(duration: Duration) -> impl Future<Output = ()> {
    gloo_timers::future::sleep(duration)
}

/// Without a browser event loop there is no timer to wait on; never fires.
#[cfg(not(feature = "csr"))]
pub fn sleep(duration: Duration) -> impl Future<Output = ()> {
    let _ = duration;
    futures::future::pending()
}
