//! Shutdown coordination for the server.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::broadcast;

/// Coordinator for graceful shutdown.
///
/// Pairs a sticky `closed` flag with a broadcast channel. The flag lets the
/// accept loop tell a deliberate close apart from a genuine accept failure;
/// the channel wakes it while it is parked in `accept`.
#[derive(Debug, Clone)]
pub struct Shutdown {
    tx: broadcast::Sender<()>,
    closed: Arc<AtomicBool>,
}

impl Shutdown {
    /// Create a new shutdown coordinator.
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self {
            tx,
            closed: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Subscribe to the shutdown signal.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Set the closed flag, then wake every subscriber.
    pub fn trigger(&self) {
        self.closed.store(true, Ordering::SeqCst);
        let _ = self.tx.send(());
    }

    /// Whether `trigger` has been called.
    pub fn is_triggered(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Get the number of active subscribers.
    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
