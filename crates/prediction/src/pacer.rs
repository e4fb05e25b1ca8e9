// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Waiting between poll attempts

use std::time::Duration;

/// Suspends the poll loop between attempts
///
/// Swapping the pacer lets tests observe the requested waits without sleeping.
pub trait Pacer: Send + Sync {
    /// Wait for `duration`
    fn pause(&self, duration: Duration) -> impl Future<Output = ()> + Send;
}

/// Pacer backed by the tokio timer
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioPacer;

impl Pacer for TokioPacer {
    async fn pause(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

#[cfg(test)]
mod tests {
    use tokio::time::Instant;

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn tokio_pacer_waits_on_virtual_time() {
        let start = Instant::now();
        TokioPacer.pause(Duration::from_millis(2000)).await;
        assert!(start.elapsed() >= Duration::from_millis(2000));
    }
}
