//! Single-slot trailing-edge debouncer.
//!
//! Every `poke` restarts the quiet-period clock; the debouncer reports once
//! after the last poke in a burst. A generation counter discards the fire of
//! a sleep task that completed just as it was being replaced, so a burst can
//! never report twice.

use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

#[derive(Debug)]
pub struct TrailingDebounce {
    delay: Duration,
    generation: u64,
    task: Option<JoinHandle<()>>,
    fire_tx: mpsc::UnboundedSender<u64>,
    fire_rx: mpsc::UnboundedReceiver<u64>,
}

impl TrailingDebounce {
    pub fn new(delay: Duration) -> Self {
        let (fire_tx, fire_rx) = mpsc::unbounded_channel();
        Self {
            delay,
            generation: 0,
            task: None,
            fire_tx,
            fire_rx,
        }
    }

    /// Restart the quiet-period clock.
    pub fn poke(&mut self) {
        self.generation += 1;
        let generation = self.generation;

        if let Some(task) = self.task.take() {
            task.abort();
        }

        let tx = self.fire_tx.clone();
        let delay = self.delay;
        self.task = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(generation);
        }));
    }

    /// Wait until a quiet period elapses after the latest poke.
    pub async fn fired(&mut self) -> Option<()> {
        while let Some(generation) = self.fire_rx.recv().await {
            if generation == self.generation && self.task.is_some() {
                self.task = None;
                return Some(());
            }
            // a replaced task got its send in before the abort landed
            tracing::trace!("ignoring stale debounce fire");
        }
        None
    }

    /// Drop any pending fire.
    pub fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Drop for TrailingDebounce {
    fn drop(&mut self) {
        self.cancel();
    }
}
