//! One-shot cancellation signal shared by every suspension point.
//!
//! The signal wraps a `watch` channel holding a single `bool`. Firing stores
//! `true` and wakes all receivers; once fired it never resets. Clones share the
//! same underlying channel, so the spinner thread, the line reader, and the
//! session loop all observe one operator interrupt.

use std::sync::Arc;
use tokio::sync::watch;

/// Broadcast, idempotent cancellation flag.
#[derive(Debug, Clone)]
pub struct CancelSignal {
    tx: Arc<watch::Sender<bool>>,
    rx: watch::Receiver<bool>,
}

impl Default for CancelSignal {
    fn default() -> Self {
        Self::new()
    }
}

impl CancelSignal {
    /// Create a signal in the not-fired state.
    pub fn new() -> Self {
        let (tx, rx) = watch::channel(false);
        Self {
            tx: Arc::new(tx),
            rx,
        }
    }

    /// Fire the signal. Repeated calls are no-ops.
    pub fn fire(&self) {
        self.tx.send_if_modified(|fired| {
            if *fired {
                return false;
            }
            *fired = true;
            true
        });
    }

    /// Whether the signal has fired.
    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolve once the signal fires (immediately if it already has).
    pub async fn cancelled(&self) {
        let mut rx = self.rx.clone();
        // The sender lives as long as any clone of `self`, so `wait_for` only
        // errors if every handle is gone, which cannot happen while we hold one.
        let _ = rx.wait_for(|fired| *fired).await;
    }

    /// Fire this signal when the process receives Ctrl-C.
    ///
    /// The listener runs as a detached task for the rest of the process.
    pub fn fire_on_ctrl_c(&self) {
        let signal = self.clone();
        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    tracing::debug!("interrupt received; cancelling session");
                    signal.fire();
                }
                Err(err) => tracing::warn!("failed to install Ctrl-C handler: {err}"),
            }
        });
    }
}
