//! Reset-on-input debouncing. A [`Debouncer`] owns a background task that
//! holds at most one pending value; every new input restarts the quiet
//! period, and only a value that survives the full period unreplaced is
//! published on the settled channel.

use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

/// Delays propagation of a rapidly-changing value until it has been quiet
/// for a fixed period.
///
/// Must be constructed inside a tokio runtime. Teardown is explicit via
/// [`Debouncer::shutdown`] (also performed on drop).
pub struct Debouncer<T> {
    input: mpsc::UnboundedSender<T>,
    settled: watch::Receiver<T>,
    task: JoinHandle<()>,
}

impl<T: Clone + Send + Sync + 'static> Debouncer<T> {
    pub fn new(initial: T, delay: Duration) -> Self {
        let (input, mut rx) = mpsc::unbounded_channel::<T>();
        let (settled_tx, settled) = watch::channel(initial);

        let task = tokio::spawn(async move {
            let mut pending: Option<T> = None;
            loop {
                tokio::select! {
                    received = rx.recv() => match received {
                        // Restart the quiet period: the sleep branch below
                        // is recreated on every loop iteration.
                        Some(value) => pending = Some(value),
                        None => break,
                    },
                    _ = tokio::time::sleep(delay), if pending.is_some() => {
                        if let Some(value) = pending.take() {
                            let _ = settled_tx.send(value);
                        }
                    }
                }
            }
        });

        Self {
            input,
            settled,
            task,
        }
    }

    /// Feed a new value, restarting the quiet period.
    pub fn update(&self, value: T) {
        let _ = self.input.send(value);
    }

    /// The most recently settled value.
    pub fn current(&self) -> T {
        self.settled.borrow().clone()
    }

    /// Subscribe to settled values.
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.settled.clone()
    }

    /// Stop the background task.
    pub fn shutdown(&self) {
        self.task.abort();
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        self.task.abort();
    }
}
