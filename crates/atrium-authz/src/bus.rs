//! Broadcast channel for authorization-change notifications.
//!
//! A single-slot publish/subscribe channel with replay-one semantics: a new
//! subscriber immediately receives the most recently published event, then
//! every subsequent publish, in order. Publishing never blocks on or
//! observes subscriber completion.
//!
//! Built on `tokio::sync::broadcast` plus an explicit last-event slot. A
//! watch channel alone would coalesce rapid publishes, and the two-phase
//! update broadcast (`PermissionsUpdated` then `PermissionsReloaded`)
//! requires subscribers to see both.

use std::sync::{Arc, Mutex};
use tokio::sync::broadcast;

use crate::event::AuthorizationEvent;

/// Buffered events per subscriber before the oldest are dropped.
///
/// Authorization events are rare (profile edits, logins); a slow subscriber
/// that overflows this simply skips ahead to newer events.
const CHANNEL_CAPACITY: usize = 32;

/// Fan-out broadcast bus for [`AuthorizationEvent`]s.
///
/// Cheap to clone (Arc internals); all clones publish to and replay from
/// the same slot.
#[derive(Clone)]
pub struct PermissionEventBus {
    inner: Arc<BusInner>,
}

struct BusInner {
    tx: broadcast::Sender<AuthorizationEvent>,
    last: Mutex<Option<AuthorizationEvent>>,
}

impl PermissionEventBus {
    /// Create a bus with no event in the replay slot.
    pub fn new() -> Self {
        let (tx, _rx) = broadcast::channel(CHANNEL_CAPACITY);
        Self {
            inner: Arc::new(BusInner {
                tx,
                last: Mutex::new(None),
            }),
        }
    }

    /// Publish an event to every current subscriber and store it for replay.
    ///
    /// Fire-and-forget: returns immediately, even with no subscribers.
    pub fn publish(&self, event: AuthorizationEvent) {
        log::debug!("authorization event: {:?}", event.kind);
        {
            let mut last = self.inner.last.lock().expect("bus replay slot poisoned");
            *last = Some(event.clone());
        }
        // send() errs only when there are no receivers; replay still works.
        let _ = self.inner.tx.send(event);
    }

    /// Subscribe to the bus.
    ///
    /// The subscription yields the most recently published event first (if
    /// any), then every publish that happens after this call.
    pub fn subscribe(&self) -> Subscription {
        // Order matters: take the receiver before reading the replay slot,
        // so an event published in between is seen at most twice, never
        // dropped. recv() deduplicates against the replayed event.
        let rx = self.inner.tx.subscribe();
        let replay = self
            .inner
            .last
            .lock()
            .expect("bus replay slot poisoned")
            .clone();
        Subscription {
            replay,
            last_replayed: None,
            rx,
        }
    }

    /// Number of live subscribers (replay slot not counted).
    pub fn subscriber_count(&self) -> usize {
        self.inner.tx.receiver_count()
    }
}

impl Default for PermissionEventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// A single subscriber's view of the bus.
pub struct Subscription {
    replay: Option<AuthorizationEvent>,
    last_replayed: Option<AuthorizationEvent>,
    rx: broadcast::Receiver<AuthorizationEvent>,
}

impl Subscription {
    /// Receive the next event.
    ///
    /// Returns `None` once the bus has been dropped and all buffered events
    /// are consumed. A subscriber that falls behind the channel capacity
    /// skips to the oldest retained event rather than erroring.
    pub async fn recv(&mut self) -> Option<AuthorizationEvent> {
        if let Some(replayed) = self.replay.take() {
            // The same event may also be buffered in the channel if it was
            // published between subscribe() taking the receiver and reading
            // the replay slot; drop the duplicate when it surfaces.
            self.last_replayed = Some(replayed.clone());
            return Some(replayed);
        }
        loop {
            match self.rx.recv().await {
                Ok(event) => {
                    if self
                        .last_replayed
                        .take()
                        .is_some_and(|r| r == event)
                    {
                        continue;
                    }
                    return Some(event);
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    log::warn!("authorization subscriber lagged, skipped {skipped} events");
                    continue;
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    /// Non-blocking poll; `None` when no event is immediately available.
    pub fn try_recv(&mut self) -> Option<AuthorizationEvent> {
        if let Some(replayed) = self.replay.take() {
            self.last_replayed = Some(replayed.clone());
            return Some(replayed);
        }
        loop {
            match self.rx.try_recv() {
                Ok(event) => {
                    if self
                        .last_replayed
                        .take()
                        .is_some_and(|r| r == event)
                    {
                        continue;
                    }
                    return Some(event);
                }
                Err(broadcast::error::TryRecvError::Lagged(_)) => continue,
                Err(_) => return None,
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
