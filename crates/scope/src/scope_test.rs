//! Tests for the scope lifecycle

use std::time::Duration;

use tokio::time::{sleep, timeout};

use scope_proto::scope::v1::scope_service_client::ScopeServiceClient;
use scope_proto::scope::v1::WatchRequest;

use super::*;

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_start_publish_watch_shutdown() {
    let scope = Scope::builder()
        .port(0)
        .buffer_size(10)
        .start()
        .await
        .expect("scope should start");

    let mut client = ScopeServiceClient::connect(format!("http://{}", scope.local_addr()))
        .await
        .expect("connect to watch endpoint");
    let mut stream = client
        .watch(WatchRequest {})
        .await
        .expect("start watch stream")
        .into_inner();

    // Detect watcher attachment the way instrumentation would.
    timeout(Duration::from_secs(2), async {
        while scope.subscriber_count() == 0 {
            sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("watcher should attach");

    let mut event = CallEvent::default();
    event.id = scope.next_event_id();
    scope.publish(event);

    let response = timeout(Duration::from_secs(2), stream.message())
        .await
        .expect("timed out waiting for event")
        .expect("stream error")
        .expect("stream ended early");
    assert_eq!(response.event.expect("event").id, "call-1");

    drop(stream);
    drop(client);
    timeout(Duration::from_secs(5), scope.shutdown())
        .await
        .expect("shutdown should not hang")
        .expect("shutdown should succeed");
}

#[tokio::test]
async fn test_event_ids_are_sequential() {
    let scope = Scope::builder()
        .port(0)
        .start()
        .await
        .expect("scope should start");

    assert_eq!(scope.next_event_id(), "call-1");
    assert_eq!(scope.next_event_id(), "call-2");
    assert_eq!(scope.next_event_id(), "call-3");

    scope.shutdown().await.expect("shutdown should succeed");
}

#[tokio::test]
async fn test_subscriber_count_without_watchers() {
    let scope = Scope::builder()
        .port(0)
        .start()
        .await
        .expect("scope should start");

    assert_eq!(scope.subscriber_count(), 0);
    // Publishing with no watchers is a no-op, not an error.
    scope.publish(CallEvent::default());

    scope.shutdown().await.expect("shutdown should succeed");
}
