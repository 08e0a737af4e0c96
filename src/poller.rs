//! Bounded polling primitive shared by every wait in the suite.
//!
//! A condition is evaluated, then the poller sleeps one fixed interval and
//! evaluates again, until the condition reports [`Attempt::Ready`], returns an
//! error, or the next sleep would carry the wait past its deadline.

use std::future::Future;
use std::time::Duration;

use tokio::time::{sleep, Instant};
use tracing::{debug, warn};

use crate::error::ProbeError;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);
/// Shortest interval a [`Poller`] sleeps between attempts
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Outcome of a single evaluation of a poll condition.
///
/// Fatal outcomes are expressed as the `Err` arm of the surrounding `Result`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attempt<T> {
    Ready(T),
    Pending(String),
}

impl<T> Attempt<T> {
    pub fn pending(reason: impl Into<String>) -> Self {
        Attempt::Pending(reason.into())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Poller {
    interval: Duration,
}

impl Default for Poller {
    fn default() -> Self {
        Self::new(DEFAULT_POLL_INTERVAL)
    }
}

impl Poller {
    /// Intervals below [`MIN_POLL_INTERVAL`] are raised to it.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: interval.max(MIN_POLL_INTERVAL),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Evaluate `condition` until it is ready or `deadline` runs out.
    ///
    /// The condition always runs at least once, so a zero deadline means a
    /// single evaluation followed by [`ProbeError::TimeoutExceeded`]. No sleep
    /// ever extends past the deadline. Errors returned by the condition are
    /// passed through unchanged.
    pub async fn wait_until<T, F, Fut>(
        &self,
        deadline: Duration,
        label: &str,
        mut condition: F,
    ) -> Result<T, ProbeError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<Attempt<T>, ProbeError>>,
    {
        let started = Instant::now();
        let mut attempts: u32 = 0;

        loop {
            attempts = attempts.saturating_add(1);
            match condition().await? {
                Attempt::Ready(value) => {
                    debug!(label, attempts, elapsed = ?started.elapsed(), "Condition satisfied");
                    return Ok(value);
                }
                Attempt::Pending(reason) => {
                    debug!(label, attempts, reason = %reason, "Condition not met yet");
                }
            }

            let elapsed = started.elapsed();
            if elapsed.saturating_add(self.interval) > deadline {
                warn!(label, attempts, elapsed = ?elapsed, deadline = ?deadline, "Wait timed out");
                return Err(ProbeError::TimeoutExceeded {
                    label: label.to_string(),
                    waited: elapsed,
                });
            }

            sleep(self.interval).await;
        }
    }
}

/// [`Poller::wait_until`] with the default five second interval.
pub async fn wait_until<T, F, Fut>(
    deadline: Duration,
    label: &str,
    condition: F,
) -> Result<T, ProbeError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Attempt<T>, ProbeError>>,
{
    Poller::default().wait_until(deadline, label, condition).await
}
