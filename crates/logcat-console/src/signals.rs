//! Shutdown signal wiring.
//!
//! Interrupt and termination signals (and, on Windows, the console-close
//! notification) map to one idempotent close request:
//! hide the busy indicator, emit a newline so the next shell prompt starts
//! clean, and raise the remote source's closed flag. The merge loop
//! observes the flag cooperatively; no non-trivial work happens on the
//! signal path itself.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use tokio::task::JoinHandle;

use crate::{indicator::Indicator, source::SourceCloser};

/// Idempotent close request shared between signal handlers and exit paths.
#[derive(Clone)]
pub struct ShutdownGuard {
    indicator: Indicator,
    closer: SourceCloser,
    requested: Arc<AtomicBool>,
}

impl ShutdownGuard {
    /// New guard over the indicator and source close handle.
    pub fn new(indicator: Indicator, closer: SourceCloser) -> Self {
        Self { indicator, closer, requested: Arc::new(AtomicBool::new(false)) }
    }

    /// Request close. Every delivery after the first is a no-op.
    pub fn close(&self) {
        if self.requested.swap(true, Ordering::AcqRel) {
            return;
        }
        self.indicator.hide();
        println!();
        self.closer.close();
    }

    /// Whether close has already been requested.
    pub fn is_requested(&self) -> bool {
        self.requested.load(Ordering::Acquire)
    }
}

/// Listen for interrupt/termination signals and route them to the guard.
///
/// Keeps listening after the first delivery so repeated signals stay
/// harmless instead of killing the process mid-drain.
pub fn spawn_signal_listener(guard: ShutdownGuard) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            wait_for_signal().await;
            guard.close();
        }
    })
}

#[cfg(unix)]
async fn wait_for_signal() {
    use tokio::signal::unix::{SignalKind, signal};

    let mut terminate = match signal(SignalKind::terminate()) {
        Ok(stream) => stream,
        Err(error) => {
            tracing::warn!("SIGTERM handler unavailable: {error}");
            let _ = tokio::signal::ctrl_c().await;
            return;
        },
    };

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {},
        _ = terminate.recv() => {},
    }
}

#[cfg(windows)]
async fn wait_for_signal() {
    use tokio::signal::windows::{ctrl_break, ctrl_close};

    match (ctrl_close(), ctrl_break()) {
        (Ok(mut close), Ok(mut brk)) => {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {},
                _ = close.recv() => {},
                _ = brk.recv() => {},
            }
        },
        _ => {
            tracing::warn!("console-close handler unavailable");
            let _ = tokio::signal::ctrl_c().await;
        },
    }
}

#[cfg(not(any(unix, windows)))]
async fn wait_for_signal() {
    let _ = tokio::signal::ctrl_c().await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::source_channel;

    #[test]
    fn close_twice_closes_source_once() {
        let (_remote, handle) = source_channel(8);
        let guard = ShutdownGuard::new(Indicator::new(), handle.closer());

        guard.close();
        guard.close();

        assert!(guard.is_requested());
        assert!(handle.is_closed());
    }

    #[test]
    fn clones_share_the_requested_flag() {
        let (_remote, handle) = source_channel(8);
        let guard = ShutdownGuard::new(Indicator::new(), handle.closer());
        let twin = guard.clone();

        guard.close();
        assert!(twin.is_requested());
    }
}
