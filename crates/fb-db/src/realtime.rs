//! Insert notifications.
//!
//! `InsertFeed` fans newly stored records out to every live `Subscription`
//! over a tokio broadcast channel. Records are identified by id; a record
//! published twice (once by the local writer, once by the poller that later
//! sees the same row) reaches subscribers only once.

use std::collections::{HashSet, VecDeque};
use std::sync::{Mutex, PoisonError};

use fb_core::entities::Feedback;
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, warn};

/// Default channel capacity and dedupe window.
pub const DEFAULT_CAPACITY: usize = 256;

/// What a subscriber observes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertEvent {
    /// A record was stored.
    Inserted(Feedback),
    /// The subscriber fell behind and `n` notifications were dropped.
    /// Consumers should refetch everything.
    Missed(u64),
}

/// Ids published recently, oldest first.
#[derive(Debug, Default)]
struct RecentIds {
    order: VecDeque<String>,
    seen: HashSet<String>,
}

impl RecentIds {
    /// Returns `false` when `id` is already in the window.
    fn insert(&mut self, id: &str, window: usize) -> bool {
        if self.seen.contains(id) {
            return false;
        }
        self.seen.insert(id.to_string());
        self.order.push_back(id.to_string());
        while self.order.len() > window {
            if let Some(evicted) = self.order.pop_front() {
                self.seen.remove(&evicted);
            }
        }
        true
    }
}

/// Broadcast hub for "record inserted" notifications.
#[derive(Debug)]
pub struct InsertFeed {
    tx: broadcast::Sender<Feedback>,
    recent: Mutex<RecentIds>,
    window: usize,
}

impl InsertFeed {
    /// Create a feed whose channel and dedupe window both hold `capacity` entries.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let (tx, _rx) = broadcast::channel(capacity);
        Self {
            tx,
            recent: Mutex::new(RecentIds::default()),
            window: capacity,
        }
    }

    /// Publish a stored record. Returns `false` if the id was already published.
    ///
    /// Having no subscribers is not an error.
    pub fn publish(&self, record: Feedback) -> bool {
        let fresh = self
            .recent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(&record.id, self.window);
        if !fresh {
            debug!(id = %record.id, "insert already published; skipping");
            return false;
        }
        let delivered = self.tx.send(record).unwrap_or(0);
        debug!(delivered, "insert published");
        true
    }

    /// Register a new subscriber. It sees only records published after this call.
    #[must_use]
    pub fn subscribe(&self) -> Subscription {
        Subscription {
            rx: Some(self.tx.subscribe()),
        }
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for InsertFeed {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

/// A live registration on an [`InsertFeed`].
///
/// Dropping the subscription unsubscribes it.
#[derive(Debug)]
pub struct Subscription {
    rx: Option<broadcast::Receiver<Feedback>>,
}

impl Subscription {
    /// Wait for the next event.
    ///
    /// Returns `None` once unsubscribed or when the feed has been dropped.
    pub async fn recv(&mut self) -> Option<InsertEvent> {
        let rx = self.rx.as_mut()?;
        match rx.recv().await {
            Ok(record) => Some(InsertEvent::Inserted(record)),
            Err(RecvError::Lagged(skipped)) => {
                warn!(skipped, "insert subscriber lagged; notifications dropped");
                Some(InsertEvent::Missed(skipped))
            }
            Err(RecvError::Closed) => {
                self.rx = None;
                None
            }
        }
    }

    /// Stop receiving notifications. Safe to call more than once.
    pub fn unsubscribe(&mut self) {
        if self.rx.take().is_some() {
            debug!("insert subscription released");
        }
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.rx.is_some()
    }
}
