//! Broker and subscription management
//!
//! Registration and removal take the write lock; fan-out takes the read
//! lock, so publishes run concurrently with each other. A publish that races
//! a subscribe or unsubscribe may or may not reach the subscriber involved
//! in the race. That nondeterminism is accepted, not a defect.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tracing::{debug, trace};

use scope_domain::CallEvent;

/// Default per-subscriber queue capacity.
pub const DEFAULT_BUFFER_SIZE: usize = 1024;

#[derive(Debug)]
struct Inner {
    /// Active subscribers, keyed by id. Senders are dropped on removal,
    /// which closes the matching receiver.
    subscribers: RwLock<HashMap<u64, mpsc::Sender<CallEvent>>>,
    next_id: AtomicU64,
    buffer_size: usize,
}

/// Fan-out registry for [`CallEvent`]s.
///
/// Cheap to clone; all clones share the same subscriber registry.
#[derive(Debug, Clone)]
pub struct Broker {
    inner: Arc<Inner>,
}

impl Broker {
    /// Create a broker. `buffer_size` is the queue capacity allocated for
    /// each subscriber, fixed for the broker's lifetime.
    pub fn new(buffer_size: usize) -> Self {
        Self {
            inner: Arc::new(Inner {
                subscribers: RwLock::new(HashMap::new()),
                next_id: AtomicU64::new(1),
                buffer_size: buffer_size.max(1),
            }),
        }
    }

    /// Register a new subscriber.
    ///
    /// The returned [`Subscription`] owns a bounded queue; dropping it (or
    /// calling [`Subscription::unsubscribe`]) removes the subscriber and
    /// closes the queue.
    pub fn subscribe(&self) -> Subscription {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        let (sender, receiver) = mpsc::channel(self.inner.buffer_size);

        self.inner.subscribers.write().insert(id, sender);
        debug!(id, "subscriber registered");

        Subscription {
            id,
            receiver,
            broker: self.clone(),
        }
    }

    /// Deliver `event` to every currently registered subscriber.
    ///
    /// Never blocks and never fails: a subscriber whose queue is full has
    /// this event dropped for it alone, keeping what is already queued.
    pub fn publish(&self, event: CallEvent) {
        let subscribers = self.inner.subscribers.read();
        for (id, sender) in subscribers.iter() {
            match sender.try_send(event.clone()) {
                Ok(()) => {}
                Err(TrySendError::Full(_)) => {
                    trace!(id, event_id = %event.id, "queue full, event dropped");
                }
                Err(TrySendError::Closed(_)) => {
                    // Removal happens in remove(); nothing to do here.
                }
            }
        }
    }

    /// Number of currently registered subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.inner.subscribers.read().len()
    }

    /// Remove a subscriber by id. A no-op if it was already removed.
    fn remove(&self, id: u64) {
        if self.inner.subscribers.write().remove(&id).is_some() {
            debug!(id, "subscriber removed");
        }
    }
}

impl Default for Broker {
    fn default() -> Self {
        Self::new(DEFAULT_BUFFER_SIZE)
    }
}

/// One registered consumer of the broker.
///
/// Holds the read end of a bounded queue. Unsubscribing is idempotent and is
/// also performed on drop, so release happens exactly once no matter which
/// exit path a consumer takes.
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    receiver: mpsc::Receiver<CallEvent>,
    broker: Broker,
}

impl Subscription {
    /// Subscriber id, unique for the broker's lifetime.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Receive the next event.
    ///
    /// Returns `None` once the subscription has been unsubscribed and all
    /// queued events have been drained.
    pub async fn recv(&mut self) -> Option<CallEvent> {
        self.receiver.recv().await
    }

    /// Receive without waiting. `Err` when the queue is empty or closed.
    pub fn try_recv(&mut self) -> Result<CallEvent, mpsc::error::TryRecvError> {
        self.receiver.try_recv()
    }

    /// Remove this subscriber from the broker and close its queue.
    ///
    /// Safe to call any number of times; later calls are no-ops. Events
    /// already queued remain receivable until drained.
    pub fn unsubscribe(&self) {
        self.broker.remove(self.id);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.broker.remove(self.id);
    }
}

#[cfg(test)]
#[path = "broker_test.rs"]
mod tests;
