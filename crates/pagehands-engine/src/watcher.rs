//! Debounced structural-change watcher.
//!
//! Collapses bursts of change signals into one re-scan: every signal restarts
//! a fixed-delay timer, and only once the delay elapses with no further
//! signal does the callback fire.

#[cfg(test)]
#[path = "watcher_tests.rs"]
mod tests;

use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::mpsc;
use tracing::debug;

use pagehands_protocols::ChangeSource;

/// Handle to a running watcher task.
///
/// Dropping the handle (or calling [`stop`](ChangeWatcher::stop)) shuts the
/// task down; in-flight handler side effects are not awaited, since the
/// engine never awaits them in the first place.
pub struct ChangeWatcher {
    shutdown_tx: Mutex<Option<mpsc::Sender<()>>>,
}

impl ChangeWatcher {
    /// Subscribe to the change source and spawn the debounce task.
    ///
    /// Must be called within a tokio runtime. `on_quiet` fires at
    /// (time of last signal + `delay`).
    pub fn spawn<F>(source: &dyn ChangeSource, delay: Duration, on_quiet: F) -> Self
    where
        F: Fn() + Send + 'static,
    {
        let mut signal_rx = source.subscribe();
        let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);

        tokio::spawn(async move {
            'watch: loop {
                tokio::select! {
                    _ = shutdown_rx.recv() => break 'watch,
                    signal = signal_rx.recv() => {
                        if signal.is_none() {
                            break 'watch;
                        }
                        // quiet-period loop: every further signal restarts
                        // the delay
                        loop {
                            let quiet = tokio::time::sleep(delay);
                            tokio::pin!(quiet);
                            tokio::select! {
                                _ = shutdown_rx.recv() => break 'watch,
                                signal = signal_rx.recv() => {
                                    if signal.is_none() {
                                        break 'watch;
                                    }
                                }
                                _ = &mut quiet => {
                                    debug!("structural changes settled; re-scanning");
                                    on_quiet();
                                    break;
                                }
                            }
                        }
                    }
                }
            }
            debug!("change watcher task exited");
        });

        Self {
            shutdown_tx: Mutex::new(Some(shutdown_tx)),
        }
    }

    /// Stop watching. Idempotent.
    pub fn stop(&self) {
        // dropping the sender closes the shutdown channel, which wakes the
        // task and ends it
        if self.shutdown_tx.lock().take().is_some() {
            debug!("change watcher stopped");
        }
    }

    pub fn is_active(&self) -> bool {
        self.shutdown_tx.lock().is_some()
    }
}

impl Drop for ChangeWatcher {
    fn drop(&mut self) {
        self.stop();
    }
}
