use crate::{BackpressurePolicy, Metrics, Subscription, SubscriptionId};

use std::sync::Arc;

use flume::TrySendError;
use log::{debug, info};
use parking_lot::Mutex;

/// Fan-out registry of subscriber queues.
///
/// Every operation takes the same lock, and nothing inside the lock can
/// suspend: enqueue attempts are `try_send` checks only. Cloning the hub
/// yields another handle to the same registry.
pub struct BroadcastHub<T> {
    inner: Arc<Mutex<HubInner<T>>>,
    policy: BackpressurePolicy,
    metrics: Metrics,
}

struct HubInner<T> {
    queues: Vec<SubscriberQueue<T>>,
    next_id: u64,
}

/// Hub side of one subscriber queue. Dropping it closes the queue.
struct SubscriberQueue<T> {
    id: SubscriptionId,
    sender: flume::Sender<T>,
    /// Hub-held receiver used to discard stale items under drain-and-replace
    stale: flume::Receiver<T>,
}

enum Offer {
    Delivered,
    Dropped,
    Evicted,
}

impl<T> SubscriberQueue<T> {
    /// Only the hub's own receiver is left: the subscriber went away
    /// without unsubscribing.
    fn is_abandoned(&self) -> bool {
        self.sender.receiver_count() <= 1
    }

    fn offer(&self, item: T, policy: BackpressurePolicy) -> Offer {
        match self.sender.try_send(item) {
            Ok(()) => Offer::Delivered,
            Err(TrySendError::Disconnected(_)) => Offer::Evicted,
            Err(TrySendError::Full(item)) => match policy {
                BackpressurePolicy::EvictOnFull { .. } => Offer::Evicted,
                BackpressurePolicy::DrainAndReplace { .. } => {
                    let _ = self.stale.try_recv();
                    match self.sender.try_send(item) {
                        Ok(()) => Offer::Delivered,
                        Err(_) => Offer::Dropped,
                    }
                }
            },
        }
    }
}

impl<T> BroadcastHub<T> {
    pub fn new(policy: BackpressurePolicy) -> Self {
        Self::with_metrics(policy, Metrics::new())
    }

    pub fn with_metrics(policy: BackpressurePolicy, metrics: Metrics) -> Self {
        Self {
            inner: Arc::new(Mutex::new(HubInner {
                queues: Vec::new(),
                next_id: 0,
            })),
            policy,
            metrics,
        }
    }

    /// Register a new subscriber queue.
    pub fn subscribe(&self) -> Subscription<T> {
        let mut inner = self.inner.lock();

        let id = SubscriptionId(inner.next_id);
        inner.next_id += 1;

        let (sender, receiver) = flume::bounded(self.policy.capacity());
        inner.queues.push(SubscriberQueue {
            id,
            sender,
            stale: receiver.clone(),
        });

        debug!("Subscriber {} registered ({} total)", id, inner.queues.len());
        self.metrics.subscription_changed("subscribed");

        Subscription::new(id, receiver)
    }

    /// Remove and close the queue behind `subscription`.
    ///
    /// Queues are matched by channel, so a subscription issued by another hub
    /// never matches. Returns false if the queue was not registered here
    /// (already unsubscribed, evicted, torn down or foreign).
    pub fn unsubscribe(&self, subscription: &Subscription<T>) -> bool {
        let mut inner = self.inner.lock();

        let before = inner.queues.len();
        inner
            .queues
            .retain(|queue| !subscription.is_fed_by(&queue.stale));
        let matched = inner.queues.len() != before;

        if matched {
            debug!(
                "Subscriber {} removed ({} remaining)",
                subscription.id(),
                inner.queues.len()
            );
            self.metrics.subscription_changed("unsubscribed");
        }

        matched
    }

    /// Close and forget every queue. Returns how many were closed.
    pub fn unsubscribe_all(&self) -> usize {
        let mut inner = self.inner.lock();

        let closed = inner.queues.len();
        inner.queues.clear();

        if closed > 0 {
            info!("Closed all {} subscriber queue(s)", closed);
        }

        closed
    }

    /// Number of registered queues.
    pub fn subscriptions(&self) -> usize {
        self.inner.lock().queues.len()
    }
}

impl<T: Clone> BroadcastHub<T> {
    /// Offer `item` to every registered queue without blocking.
    ///
    /// Full queues are handled by the hub's policy and never reported as an
    /// error. Returns the number of queues the item was enqueued on.
    pub fn publish(&self, item: T) -> usize {
        let mut delivered = 0;
        let mut dropped = 0;
        let mut abandoned = 0;
        let mut evicted = Vec::new();

        let remaining = {
            let mut inner = self.inner.lock();
            let policy = self.policy;

            inner.queues.retain(|queue| {
                if queue.is_abandoned() {
                    abandoned += 1;
                    return false;
                }

                match queue.offer(item.clone(), policy) {
                    Offer::Delivered => {
                        delivered += 1;
                        true
                    }
                    Offer::Dropped => {
                        dropped += 1;
                        true
                    }
                    Offer::Evicted => {
                        evicted.push(queue.id);
                        false
                    }
                }
            });

            inner.queues.len()
        };

        for id in &evicted {
            info!(
                "Subscriber {} too slow, evicted ({} remaining)",
                id, remaining
            );
            self.metrics.subscriber_evicted();
        }

        if abandoned > 0 {
            debug!("Pruned {} abandoned subscriber queue(s)", abandoned);
        }

        if dropped > 0 {
            self.metrics.items_dropped(dropped);
        }

        self.metrics.published(delivered);

        delivered
    }
}

impl<T> Clone for BroadcastHub<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            policy: self.policy,
            metrics: self.metrics.clone(),
        }
    }
}
