// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Poll policy

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio_retry::strategy::FixedInterval;

use crate::error::{PredictionError, PredictionResult};

/// Default number of dataset fetches before giving up
pub const DEFAULT_MAX_ATTEMPTS: u32 = 10;
/// Default wait between two dataset fetches, in milliseconds
pub const DEFAULT_INTERVAL_MS: u64 = 2000;

/// How often and how long a submitted dataset is polled
///
/// The defaults (10 attempts, 2000 ms apart) bound a call to 20 seconds of
/// waiting on top of the request round trips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PollPolicy {
    /// Maximum number of fetch attempts, at least 1
    pub max_attempts: u32,
    /// Fixed wait between attempts in milliseconds
    pub interval_ms: u64,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            interval_ms: DEFAULT_INTERVAL_MS,
        }
    }
}

impl PollPolicy {
    /// Set the attempt bound
    #[must_use]
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Set the wait between attempts
    #[must_use]
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval_ms = u64::try_from(interval.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Wait between attempts
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    /// Validate the policy
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `max_attempts` is zero
    pub fn validate(&self) -> PredictionResult<()> {
        if self.max_attempts == 0 {
            return Err(PredictionError::config(
                "max_attempts must be at least 1",
            ));
        }
        Ok(())
    }

    /// Waits to perform after each non-terminal attempt
    ///
    /// Yields one delay per attempt, the final attempt included.
    pub fn delays(&self) -> impl Iterator<Item = Duration> + Send + use<> {
        let attempts = usize::try_from(self.max_attempts).unwrap_or(usize::MAX);
        FixedInterval::from_millis(self.interval_ms).take(attempts)
    }
}
