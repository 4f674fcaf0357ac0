use crate::{BackpressurePolicy, BroadcastHub};

use googletest::assert_that;
use googletest::prelude::{eq, none, some};
use tokio::time::{Duration, timeout};

// =========================================================================
// Registry
// =========================================================================

#[test]
fn given_new_hub_when_subscribed_then_count_increases() {
    // Given
    let hub = BroadcastHub::<u32>::new(BackpressurePolicy::evict_on_full(4));

    // When
    let _first = hub.subscribe();
    let _second = hub.subscribe();

    // Then
    assert_that!(hub.subscriptions(), eq(2));
}

#[test]
fn given_subscriptions_when_subscribed_then_ids_are_distinct() {
    let hub = BroadcastHub::<u32>::new(BackpressurePolicy::evict_on_full(4));

    let first = hub.subscribe();
    let second = hub.subscribe();

    assert_ne!(first.id(), second.id());
}

#[test]
fn given_subscription_when_unsubscribed_then_removed_and_closed() {
    // Given
    let hub = BroadcastHub::<u32>::new(BackpressurePolicy::evict_on_full(4));
    let subscription = hub.subscribe();

    // When
    let matched = hub.unsubscribe(&subscription);

    // Then
    assert!(matched);
    assert_that!(hub.subscriptions(), eq(0));
    assert!(subscription.is_closed());
}

#[test]
fn given_unsubscribed_subscription_when_unsubscribed_again_then_no_match() {
    let hub = BroadcastHub::<u32>::new(BackpressurePolicy::evict_on_full(4));
    let subscription = hub.subscribe();
    hub.unsubscribe(&subscription);

    assert!(!hub.unsubscribe(&subscription));
    assert_that!(hub.subscriptions(), eq(0));
}

#[test]
fn given_subscription_from_other_hub_when_unsubscribed_then_no_match() {
    // Given
    let first = BroadcastHub::<u32>::new(BackpressurePolicy::evict_on_full(4));
    let second = BroadcastHub::<u32>::new(BackpressurePolicy::evict_on_full(4));
    let on_first = first.subscribe();
    let on_second = second.subscribe();
    assert_eq!(on_first.id(), on_second.id());

    // When
    let matched = second.unsubscribe(&on_first);

    // Then
    assert!(!matched);
    assert_that!(second.subscriptions(), eq(1));
    assert_that!(first.subscriptions(), eq(1));
    assert!(!on_second.is_closed());
    assert_that!(second.publish(9), eq(1));
    assert_that!(on_second.try_recv(), some(eq(9)));
}

#[test]
fn given_two_subscriptions_when_one_unsubscribed_then_other_still_receives() {
    // Given
    let hub = BroadcastHub::<u32>::new(BackpressurePolicy::evict_on_full(4));
    let leaving = hub.subscribe();
    let staying = hub.subscribe();

    // When
    hub.unsubscribe(&leaving);
    let delivered = hub.publish(7);

    // Then
    assert_that!(delivered, eq(1));
    assert_that!(staying.try_recv(), some(eq(7)));
    assert_that!(leaving.try_recv(), none());
}

#[test]
fn given_subscriptions_when_unsubscribe_all_then_all_closed() {
    // Given
    let hub = BroadcastHub::<u32>::new(BackpressurePolicy::evict_on_full(4));
    let subscriptions: Vec<_> = (0..3).map(|_| hub.subscribe()).collect();

    // When
    let closed = hub.unsubscribe_all();

    // Then
    assert_that!(closed, eq(3));
    assert_that!(hub.subscriptions(), eq(0));
    assert!(subscriptions.iter().all(|s| s.is_closed()));
}

#[test]
fn given_cloned_hub_when_subscribed_then_registry_shared() {
    let hub = BroadcastHub::<u32>::new(BackpressurePolicy::evict_on_full(4));
    let clone = hub.clone();

    let _subscription = clone.subscribe();

    assert_that!(hub.subscriptions(), eq(1));
}

// =========================================================================
// Publish
// =========================================================================

#[test]
fn given_no_subscribers_when_published_then_nothing_delivered() {
    let hub = BroadcastHub::<u32>::new(BackpressurePolicy::evict_on_full(4));

    assert_that!(hub.publish(1), eq(0));
}

#[tokio::test]
async fn given_three_subscribers_when_published_then_each_receives_once() {
    // Given
    let hub = BroadcastHub::<String>::new(BackpressurePolicy::evict_on_full(10));
    let subscriptions: Vec<_> = (0..3).map(|_| hub.subscribe()).collect();

    // When
    let delivered = hub.publish("score".to_string());

    // Then
    assert_that!(delivered, eq(3));
    for subscription in &subscriptions {
        let item = timeout(Duration::from_millis(100), subscription.recv())
            .await
            .expect("item should arrive");
        assert_eq!(item.as_deref(), Some("score"));
        assert_that!(subscription.pending(), eq(0));
    }
}

#[tokio::test]
async fn given_subscriber_when_items_published_then_order_preserved() {
    let hub = BroadcastHub::<u32>::new(BackpressurePolicy::evict_on_full(10));
    let subscription = hub.subscribe();

    for item in 0..5 {
        hub.publish(item);
    }

    for expected in 0..5 {
        assert_that!(subscription.recv().await, some(eq(expected)));
    }
}

#[test]
fn given_abandoned_subscription_when_published_then_pruned() {
    // Given
    let hub = BroadcastHub::<u32>::new(BackpressurePolicy::evict_on_full(4));
    let abandoned = hub.subscribe();
    let _kept = hub.subscribe();
    drop(abandoned);

    // When
    let delivered = hub.publish(1);

    // Then
    assert_that!(delivered, eq(1));
    assert_that!(hub.subscriptions(), eq(1));
}

// =========================================================================
// Evict on full
// =========================================================================

#[tokio::test]
async fn given_full_queue_when_published_then_subscriber_evicted() {
    // Given - Capacity 2, nobody reading
    let hub = BroadcastHub::<u32>::new(BackpressurePolicy::evict_on_full(2));
    let slow = hub.subscribe();
    hub.publish(1);
    hub.publish(2);

    // When
    let delivered = hub.publish(3);

    // Then - Buffered items survive, then the queue reports closed
    assert_that!(delivered, eq(0));
    assert_that!(hub.subscriptions(), eq(0));
    assert_that!(slow.recv().await, some(eq(1)));
    assert_that!(slow.recv().await, some(eq(2)));
    assert_that!(slow.recv().await, none());
}

#[test]
fn given_slow_and_fast_subscribers_when_queue_fills_then_only_slow_evicted() {
    // Given
    let hub = BroadcastHub::<u32>::new(BackpressurePolicy::evict_on_full(1));
    let slow = hub.subscribe();
    let fast = hub.subscribe();

    // When
    hub.publish(1);
    assert_that!(fast.try_recv(), some(eq(1)));
    let delivered = hub.publish(2);

    // Then
    assert_that!(delivered, eq(1));
    assert_that!(hub.subscriptions(), eq(1));
    assert_that!(fast.try_recv(), some(eq(2)));
    assert_that!(slow.try_recv(), some(eq(1)));
    assert!(slow.is_closed());
}

#[test]
fn given_evicted_subscription_when_unsubscribed_then_no_match() {
    let hub = BroadcastHub::<u32>::new(BackpressurePolicy::evict_on_full(1));
    let slow = hub.subscribe();
    hub.publish(1);
    hub.publish(2);

    assert!(!hub.unsubscribe(&slow));
}

// =========================================================================
// Drain and replace
// =========================================================================

#[test]
fn given_single_slot_when_several_published_then_only_latest_pending() {
    // Given
    let hub = BroadcastHub::<u32>::new(BackpressurePolicy::drain_and_replace(1));
    let subscription = hub.subscribe();

    // When
    for frame in 1..=5 {
        hub.publish(frame);
    }

    // Then
    assert_that!(subscription.pending(), eq(1));
    assert_that!(subscription.try_recv(), some(eq(5)));
    assert_that!(subscription.try_recv(), none());
}

#[test]
fn given_full_queue_when_published_then_subscriber_kept() {
    let hub = BroadcastHub::<u32>::new(BackpressurePolicy::drain_and_replace(2));
    let _subscription = hub.subscribe();

    for frame in 0..100 {
        hub.publish(frame);
    }

    assert_that!(hub.subscriptions(), eq(1));
}

#[test]
fn given_two_slots_when_overflowed_then_oldest_discarded() {
    // Given
    let hub = BroadcastHub::<u32>::new(BackpressurePolicy::drain_and_replace(2));
    let subscription = hub.subscribe();

    // When
    hub.publish(1);
    hub.publish(2);
    hub.publish(3);

    // Then
    assert_that!(subscription.try_recv(), some(eq(2)));
    assert_that!(subscription.try_recv(), some(eq(3)));
}

#[test]
fn given_consumer_caught_up_when_published_then_delivered_without_drop() {
    let hub = BroadcastHub::<u32>::new(BackpressurePolicy::drain_and_replace(1));
    let subscription = hub.subscribe();

    hub.publish(1);
    assert_that!(subscription.try_recv(), some(eq(1)));
    let delivered = hub.publish(2);

    assert_that!(delivered, eq(1));
    assert_that!(subscription.try_recv(), some(eq(2)));
}
