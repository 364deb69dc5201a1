//! Tests for broker fan-out and subscription lifecycle

use std::time::Duration;

use tokio::sync::mpsc::error::TryRecvError;
use tokio::time::timeout;

use super::*;

fn make_event(id: &str) -> CallEvent {
    CallEvent {
        id: id.into(),
        method: "/test.Service/Method".into(),
        ..CallEvent::default()
    }
}

#[tokio::test]
async fn test_subscribe_receives_published_event() {
    let broker = Broker::new(10);
    let mut subscription = broker.subscribe();

    broker.publish(make_event("evt-1"));

    let event = timeout(Duration::from_secs(1), subscription.recv())
        .await
        .expect("timed out waiting for event")
        .expect("queue closed unexpectedly");
    assert_eq!(event.id, "evt-1");
    assert_eq!(event.method, "/test.Service/Method");
}

#[tokio::test]
async fn test_publish_reaches_every_subscriber() {
    let broker = Broker::new(10);
    let mut first = broker.subscribe();
    let mut second = broker.subscribe();
    assert_eq!(broker.subscriber_count(), 2);

    broker.publish(make_event("evt-1"));

    for subscription in [&mut first, &mut second] {
        let event = timeout(Duration::from_secs(1), subscription.recv())
            .await
            .expect("timed out waiting for event")
            .expect("queue closed unexpectedly");
        assert_eq!(event.id, "evt-1");
    }
}

#[tokio::test]
async fn test_publish_with_no_subscribers() {
    let broker = Broker::new(10);
    assert_eq!(broker.subscriber_count(), 0);

    // Must not block or panic.
    broker.publish(make_event("evt-1"));
}

#[tokio::test]
async fn test_full_queue_drops_newest() {
    let broker = Broker::new(1);
    let mut subscription = broker.subscribe();

    broker.publish(make_event("evt-1"));
    // Queue capacity is 1, so this publish must return immediately and the
    // event must be dropped for this subscriber.
    broker.publish(make_event("evt-2"));

    let event = subscription.try_recv().expect("first event should be queued");
    assert_eq!(event.id, "evt-1");
    assert!(matches!(subscription.try_recv(), Err(TryRecvError::Empty)));
}

#[tokio::test]
async fn test_unsubscribe_closes_queue() {
    let broker = Broker::new(10);
    let mut subscription = broker.subscribe();

    subscription.unsubscribe();
    assert_eq!(broker.subscriber_count(), 0);

    // A later publish must not reopen the queue.
    broker.publish(make_event("evt-after-unsub"));
    assert!(subscription.recv().await.is_none());
}

#[tokio::test]
async fn test_unsubscribe_drains_queued_events_first() {
    let broker = Broker::new(10);
    let mut subscription = broker.subscribe();

    broker.publish(make_event("evt-1"));
    subscription.unsubscribe();

    // The queued event survives unsubscription, then the queue reads closed.
    let event = subscription.recv().await.expect("queued event survives");
    assert_eq!(event.id, "evt-1");
    assert!(subscription.recv().await.is_none());
}

#[tokio::test]
async fn test_unsubscribe_is_idempotent() {
    let broker = Broker::new(10);
    let subscription = broker.subscribe();

    subscription.unsubscribe();
    subscription.unsubscribe();
    subscription.unsubscribe();
    assert_eq!(broker.subscriber_count(), 0);
}

#[tokio::test]
async fn test_drop_unsubscribes() {
    let broker = Broker::new(10);
    let subscription = broker.subscribe();
    assert_eq!(broker.subscriber_count(), 1);

    drop(subscription);
    assert_eq!(broker.subscriber_count(), 0);
}

#[tokio::test]
async fn test_unsubscribe_then_drop() {
    let broker = Broker::new(10);
    let subscription = broker.subscribe();

    // Explicit unsubscribe followed by drop must not double-remove.
    subscription.unsubscribe();
    drop(subscription);
    assert_eq!(broker.subscriber_count(), 0);
}

#[tokio::test]
async fn test_slow_subscriber_does_not_affect_others() {
    let broker = Broker::new(1);
    let mut slow = broker.subscribe();
    let mut fast = broker.subscribe();

    broker.publish(make_event("evt-1"));
    broker.publish(make_event("evt-2"));

    // The slow subscriber keeps only the first event.
    assert_eq!(slow.try_recv().expect("first event").id, "evt-1");
    assert!(slow.try_recv().is_err());

    // Drain the fast subscriber so it has capacity again.
    assert_eq!(fast.try_recv().expect("first event").id, "evt-1");
    // ...but it never got the second either: both publishes happened before
    // the drain, and its capacity was also 1.
    assert!(fast.try_recv().is_err());

    broker.publish(make_event("evt-3"));
    assert_eq!(fast.try_recv().expect("third event").id, "evt-3");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_publishers() {
    let broker = Broker::new(100);
    let mut subscription = broker.subscribe();

    let mut handles = Vec::new();
    for i in 0..50 {
        let broker = broker.clone();
        handles.push(tokio::spawn(async move {
            broker.publish(make_event(&format!("evt-{i}")));
        }));
    }
    for handle in handles {
        handle.await.expect("publisher task panicked");
    }

    let mut received = 0;
    while received < 50 {
        timeout(Duration::from_secs(1), subscription.recv())
            .await
            .expect("timed out waiting for event")
            .expect("queue closed unexpectedly");
        received += 1;
    }
    assert!(matches!(subscription.try_recv(), Err(TryRecvError::Empty)));
}

#[tokio::test]
async fn test_ordering_within_one_subscriber() {
    let broker = Broker::new(100);
    let mut subscription = broker.subscribe();

    for i in 0..20 {
        broker.publish(make_event(&format!("evt-{i}")));
    }
    for i in 0..20 {
        let event = subscription.try_recv().expect("event should be queued");
        assert_eq!(event.id, format!("evt-{i}"));
    }
}

#[tokio::test]
async fn test_subscriber_ids_are_unique() {
    let broker = Broker::new(10);
    let a = broker.subscribe();
    let b = broker.subscribe();
    assert_ne!(a.id(), b.id());
}
