use crate::SubscriptionId;

/// Receive-only view of a subscriber queue.
///
/// Dropping a subscription without unsubscribing is tolerated: the hub prunes
/// abandoned queues on the next publish.
#[derive(Debug)]
pub struct Subscription<T> {
    id: SubscriptionId,
    receiver: flume::Receiver<T>,
}

impl<T> Subscription<T> {
    pub(crate) fn new(id: SubscriptionId, receiver: flume::Receiver<T>) -> Self {
        Self { id, receiver }
    }

    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// True if `receiver` reads the same channel as this subscription.
    pub(crate) fn is_fed_by(&self, receiver: &flume::Receiver<T>) -> bool {
        self.receiver.same_channel(receiver)
    }

    /// Wait for the next item. `None` once the hub closed this queue and every
    /// item delivered before closing has been read.
    pub async fn recv(&self) -> Option<T> {
        self.receiver.recv_async().await.ok()
    }

    /// Non-blocking receive. `None` if nothing is pending or the queue is closed.
    pub fn try_recv(&self) -> Option<T> {
        self.receiver.try_recv().ok()
    }

    /// Items pending in the queue.
    pub fn pending(&self) -> usize {
        self.receiver.len()
    }

    /// True once the hub has closed this queue.
    pub fn is_closed(&self) -> bool {
        self.receiver.is_disconnected()
    }
}
