// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Signal handling for in-flight predictions

use tokio_util::sync::CancellationToken;
use tracing::warn;

/// Cancel `cancellation_token` on SIGINT or SIGTERM (Ctrl+C elsewhere)
///
/// Returns without cancelling if the handlers cannot be installed or the token is
/// cancelled by someone else first.
pub async fn cancel_on_signal(cancellation_token: CancellationToken) {
    tokio::select! {
        signal_name = wait_for_signal() => {
            let Some(signal_name) = signal_name else {
                return;
            };
            warn!("Received {}, cancelling the running prediction", signal_name);
            cancellation_token.cancel();
        },
        () = cancellation_token.cancelled() => {}
    }
}

#[cfg(unix)]
async fn wait_for_signal() -> Option<&'static str> {
    use tokio::signal::unix::{SignalKind, signal};

    let (mut sigterm, mut sigint) = match (
        signal(SignalKind::terminate()),
        signal(SignalKind::interrupt()),
    ) {
        (Ok(sigterm), Ok(sigint)) => (sigterm, sigint),
        (Err(e), _) | (_, Err(e)) => {
            warn!("Failed to register signal handlers: {}", e);
            return None;
        }
    };

    tokio::select! {
        _ = sigterm.recv() => Some("SIGTERM"),
        _ = sigint.recv() => Some("SIGINT"),
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() -> Option<&'static str> {
    match tokio::signal::ctrl_c().await {
        Ok(()) => Some("CTRL+C"),
        Err(e) => {
            warn!("Failed to install CTRL+C signal handler: {}", e);
            None
        }
    }
}
