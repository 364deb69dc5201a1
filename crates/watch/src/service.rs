//! The ScopeService implementation

use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tonic::{Request, Response, Status};
use tracing::debug;

use scope_broker::Broker;
use scope_proto::scope::v1::scope_service_server::ScopeService;
use scope_proto::scope::v1::{WatchRequest, WatchResponse};

use crate::convert::call_event_to_proto;

/// Buffer between the forwarding task and the tonic response stream.
const STREAM_BUFFER_SIZE: usize = 16;

/// gRPC service bridging remote watchers to the broker.
#[derive(Debug, Clone)]
pub struct WatchService {
    broker: Broker,
}

impl WatchService {
    pub fn new(broker: Broker) -> Self {
        Self { broker }
    }
}

#[tonic::async_trait]
impl ScopeService for WatchService {
    type WatchStream = ReceiverStream<Result<WatchResponse, Status>>;

    async fn watch(
        &self,
        _request: Request<WatchRequest>,
    ) -> Result<Response<Self::WatchStream>, Status> {
        let mut subscription = self.broker.subscribe();
        let subscriber_id = subscription.id();
        debug!(subscriber_id, "watch stream started");

        let (tx, rx) = mpsc::channel(STREAM_BUFFER_SIZE);

        // The task owns the subscription; every exit path below drops it,
        // which unsubscribes exactly once.
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    event = subscription.recv() => match event {
                        Some(event) => {
                            let response = WatchResponse {
                                event: Some(call_event_to_proto(&event)),
                            };
                            if tx.send(Ok(response)).await.is_err() {
                                debug!(subscriber_id, "watcher disconnected");
                                break;
                            }
                        }
                        // Queue closed: clean end of stream.
                        None => {
                            debug!(subscriber_id, "subscription closed");
                            break;
                        }
                    },
                    _ = tx.closed() => {
                        debug!(subscriber_id, "watcher disconnected");
                        break;
                    }
                }
            }
        });

        Ok(Response::new(ReceiverStream::new(rx)))
    }
}

#[cfg(test)]
#[path = "service_test.rs"]
mod tests;
