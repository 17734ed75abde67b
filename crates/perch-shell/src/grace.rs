//! Grace-period side table for delayed todo deletion.
//!
//! Each pending deletion is a cancellable sleep task keyed by todo id; the
//! handle lives here, never on the item, so the persisted record stays plain
//! data. Scheduling an id that is already pending aborts and replaces the
//! old task. A generation counter guards the window where a replaced task
//! has already pushed its expiry onto the channel: stale generations are
//! dropped instead of deleting a restored item.

use perch_domain::TodoId;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

#[derive(Debug)]
pub struct GraceQueue {
    grace: Duration,
    generation: u64,
    pending: HashMap<TodoId, (u64, JoinHandle<()>)>,
    expiry_tx: mpsc::UnboundedSender<(TodoId, u64)>,
    expiry_rx: mpsc::UnboundedReceiver<(TodoId, u64)>,
}

impl GraceQueue {
    pub fn new(grace: Duration) -> Self {
        let (expiry_tx, expiry_rx) = mpsc::unbounded_channel();
        Self {
            grace,
            generation: 0,
            pending: HashMap::new(),
            expiry_tx,
            expiry_rx,
        }
    }

    /// Start (or restart) the grace timer for `id`.
    pub fn schedule(&mut self, id: TodoId) {
        self.generation += 1;
        let generation = self.generation;

        if let Some((_, handle)) = self.pending.remove(&id) {
            handle.abort();
            tracing::debug!(%id, "replaced pending deletion timer");
        }

        let tx = self.expiry_tx.clone();
        let grace = self.grace;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(grace).await;
            let _ = tx.send((id, generation));
        });
        self.pending.insert(id, (generation, handle));
    }

    /// Abort the grace timer for `id`. Returns whether one was pending.
    pub fn cancel(&mut self, id: TodoId) -> bool {
        match self.pending.remove(&id) {
            Some((_, handle)) => {
                handle.abort();
                true
            }
            None => false,
        }
    }

    pub fn is_pending(&self, id: TodoId) -> bool {
        self.pending.contains_key(&id)
    }

    /// Wait for the next live expiry. Expiries from cancelled or replaced
    /// timers are discarded.
    pub async fn expired(&mut self) -> Option<TodoId> {
        while let Some((id, generation)) = self.expiry_rx.recv().await {
            match self.pending.get(&id) {
                Some((current, _)) if *current == generation => {
                    self.pending.remove(&id);
                    return Some(id);
                }
                _ => {
                    tracing::debug!(%id, "ignoring stale deletion expiry");
                }
            }
        }
        None
    }

    /// Abort every pending timer.
    pub fn shutdown(&mut self) {
        for (_, (_, handle)) in self.pending.drain() {
            handle.abort();
        }
    }
}

impl Drop for GraceQueue {
    fn drop(&mut self) {
        self.shutdown();
    }
}
