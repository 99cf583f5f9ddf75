//! Trailing-edge debounce for validity notifications
//!
//! Rapid bursts of sub-form updates can produce several validity edges in
//! quick succession; the notifier collapses each burst into a single
//! delivery of the latest value after a fixed quiet period.

use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedSender};
use tokio::time::timeout;

pub struct DebouncedValidityNotifier {
    tx: UnboundedSender<bool>,
}

impl DebouncedValidityNotifier {
    /// Spawns the debounce task. `listener` receives the last value of each
    /// burst once `delay` has elapsed without a newer value.
    pub fn spawn(delay: Duration, listener: impl Fn(bool) + Send + 'static) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<bool>();

        tokio::spawn(async move {
            while let Some(first) = rx.recv().await {
                let mut latest = first;
                loop {
                    match timeout(delay, rx.recv()).await {
                        // Newer value within the window: restart the wait.
                        Ok(Some(next)) => latest = next,
                        // Sender dropped: flush and stop.
                        Ok(None) => {
                            listener(latest);
                            return;
                        }
                        // Quiet period elapsed: deliver.
                        Err(_) => break,
                    }
                }
                listener(latest);
            }
        });

        Self { tx }
    }

    /// Feeds a validity value into the debounce window. Dropped silently if
    /// the task has stopped.
    pub fn notify(&self, valid: bool) {
        let _ = self.tx.send(valid);
    }
}
