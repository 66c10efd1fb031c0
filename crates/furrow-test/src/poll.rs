//! Deadline-bounded polling.

use log::{debug, trace};
use std::thread;
use std::time::{Duration, Instant};
use thiserror::Error;

/// Pause between checks.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(500);

/// Give up after this long.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(180);

/// Polling failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PollError {
    /// The condition never held before the deadline.
    #[error("timed out after {waited:?} waiting for state to populate")]
    Timeout {
        /// Time spent polling
        waited: Duration,
    },
}

/// Re-checks a condition at a fixed interval until it holds or the
/// deadline passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Poller {
    interval: Duration,
    timeout: Duration,
}

impl Default for Poller {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl Poller {
    /// Poller with the default interval and timeout.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the pause between checks.
    #[must_use]
    pub const fn interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Set the deadline.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Pause between checks.
    #[must_use]
    pub const fn get_interval(&self) -> Duration {
        self.interval
    }

    /// Deadline.
    #[must_use]
    pub const fn get_timeout(&self) -> Duration {
        self.timeout
    }

    /// Call `probe` until it returns `Some`, sleeping between attempts.
    ///
    /// The probe always runs at least once.
    ///
    /// # Errors
    ///
    /// Returns [`PollError::Timeout`] once the deadline has passed.
    pub fn wait_for<T>(&self, mut probe: impl FnMut() -> Option<T>) -> Result<T, PollError> {
        let start = Instant::now();
        let mut attempts = 0u32;
        loop {
            attempts += 1;
            if let Some(value) = probe() {
                debug!("poll: ready after {attempts} attempts");
                return Ok(value);
            }
            let waited = start.elapsed();
            if waited >= self.timeout {
                debug!("poll: gave up after {attempts} attempts");
                return Err(PollError::Timeout { waited });
            }
            trace!("poll: attempt {attempts} not ready, retrying");
            thread::sleep(self.interval.min(self.timeout - waited));
        }
    }

    /// Call `condition` until it returns `true`.
    ///
    /// # Errors
    ///
    /// Returns [`PollError::Timeout`] once the deadline has passed.
    pub fn wait_until(&self, mut condition: impl FnMut() -> bool) -> Result<(), PollError> {
        self.wait_for(|| condition().then_some(()))
    }
}
