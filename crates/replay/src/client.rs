//! The replay client
//!
//! Holds one connection to the target server, shared by the reflection
//! exchange and the replayed call itself. Every [`ReplayClient::send`]
//! resolves the method schema independently; nothing is cached across calls.

use std::time::Duration;

use http::uri::PathAndQuery;
use prost_reflect::{DynamicMessage, MethodDescriptor};
use tokio::time::{timeout, Instant};
use tonic::client::Grpc;
use tonic::transport::{Channel, Endpoint};
use tracing::debug;

use tonic_reflection::pb::v1::server_reflection_client::ServerReflectionClient;
use tonic_reflection::pb::v1::server_reflection_request::MessageRequest;
use tonic_reflection::pb::v1::server_reflection_response::MessageResponse;
use tonic_reflection::pb::v1::ServerReflectionRequest;

use scope_domain::Metadata;

use crate::codec::DynamicCodec;
use crate::descriptor::{ensure_unary, find_method, find_service, DescriptorRegistry};
use crate::error::{ReplayError, Result};
use crate::metadata::{build_outgoing_metadata, metadata_map_to_domain};
use crate::method::parse_method;

/// Metadata key attached to every replayed request. Capture instrumentation
/// matches on it to keep replay traffic out of the organic event stream.
pub const REPLAY_METADATA_KEY: &str = "x-grpc-scope-replay";

/// Upper bound on a single replayed call, reflection included.
const REPLAY_TIMEOUT: Duration = Duration::from_secs(30);

/// A captured (or hand-edited) request to resend.
#[derive(Debug, Clone, Default)]
pub struct ReplayRequest {
    /// Full method path, e.g. `/pkg.Service/Method`.
    pub method: String,
    /// JSON request body; empty is treated as `{}`.
    pub payload_json: String,
    /// Captured request metadata; transport-managed keys are filtered out
    /// before forwarding.
    pub metadata: Metadata,
}

/// The outcome of a replayed call that reached the RPC layer.
///
/// A non-zero `status_code` is a *remote* failure: the call was attempted
/// and the server rejected it. Local failures surface as
/// [`ReplayError`](crate::ReplayError) instead.
#[derive(Debug, Clone, Default)]
pub struct ReplayResult {
    /// Response body as JSON; empty when the call failed remotely.
    pub response_json: String,
    /// Native (0-based) gRPC status code, not the domain offset encoding.
    pub status_code: u32,
    pub status_message: String,
    pub duration: Duration,
    pub response_headers: Metadata,
    pub response_trailers: Metadata,
}

/// Client for replaying calls against one target server.
#[derive(Debug, Clone)]
pub struct ReplayClient {
    channel: Channel,
}

impl ReplayClient {
    /// Dial `target` (host:port, plaintext).
    pub async fn connect(target: &str) -> Result<Self> {
        let endpoint =
            Endpoint::from_shared(format!("http://{target}")).map_err(|source| {
                ReplayError::Connect {
                    target: target.to_string(),
                    source,
                }
            })?;
        let channel = endpoint.connect().await.map_err(|source| {
            ReplayError::Connect {
                target: target.to_string(),
                source,
            }
        })?;
        Ok(Self { channel })
    }

    /// Build a client over an existing channel.
    pub fn from_channel(channel: Channel) -> Self {
        Self { channel }
    }

    /// Replay a unary call.
    ///
    /// Resolves the method's schema over server reflection, builds the
    /// request message from the payload JSON, invokes the method by its full
    /// path with the replay marker attached, and reports the outcome.
    pub async fn send(&self, request: &ReplayRequest) -> Result<ReplayResult> {
        let (service, method) = parse_method(&request.method)?;

        let outcome = timeout(REPLAY_TIMEOUT, self.send_inner(request, &service, &method)).await;
        match outcome {
            Ok(result) => result,
            Err(_) => Err(ReplayError::DeadlineExceeded(REPLAY_TIMEOUT)),
        }
    }

    async fn send_inner(
        &self,
        request: &ReplayRequest,
        service: &str,
        method: &str,
    ) -> Result<ReplayResult> {
        let method_desc = self.resolve_method(service, method).await?;
        ensure_unary(&method_desc)?;

        let message = build_request_message(&method_desc, &request.payload_json)?;
        let metadata = build_outgoing_metadata(&request.metadata)?;

        let path: PathAndQuery = format!("/{service}/{method}")
            .parse()
            .map_err(|_| ReplayError::InvalidMethod(request.method.clone()))?;

        let mut grpc = Grpc::new(self.channel.clone());
        grpc.ready().await.map_err(ReplayError::Transport)?;

        let mut outgoing = tonic::Request::new(message);
        *outgoing.metadata_mut() = metadata;
        outgoing.set_timeout(REPLAY_TIMEOUT);

        debug!(service, method, "replaying call");
        let codec = DynamicCodec::new(method_desc.output());
        let started = Instant::now();
        let outcome = grpc.unary(outgoing, path, codec).await;
        let duration = started.elapsed();

        match outcome {
            Ok(response) => {
                let response_headers = metadata_map_to_domain(response.metadata());
                let response_json = serde_json::to_string(&response.into_inner())
                    .map_err(ReplayError::MarshalResponse)?;
                Ok(ReplayResult {
                    response_json,
                    duration,
                    response_headers,
                    ..ReplayResult::default()
                })
            }
            // A non-OK status is the server's answer, not a local failure.
            Err(status) => Ok(ReplayResult {
                status_code: status.code() as u32,
                status_message: status.message().to_string(),
                duration,
                response_trailers: metadata_map_to_domain(status.metadata()),
                ..ReplayResult::default()
            }),
        }
    }

    /// Resolve the method's descriptor via the `grpc.reflection.v1` protocol.
    async fn resolve_method(&self, service: &str, method: &str) -> Result<MethodDescriptor> {
        let mut reflection = ServerReflectionClient::new(self.channel.clone());

        let request = ServerReflectionRequest {
            host: String::new(),
            message_request: Some(MessageRequest::FileContainingSymbol(service.to_string())),
        };
        let response = reflection
            .server_reflection_info(tokio_stream::once(request))
            .await
            .map_err(ReplayError::Reflection)?;

        let mut inbound = response.into_inner();
        let reply = inbound
            .message()
            .await
            .map_err(ReplayError::Reflection)?
            .ok_or(ReplayError::UnexpectedReflectionResponse)?;

        let mut registry = DescriptorRegistry::new();
        match reply.message_response {
            Some(MessageResponse::FileDescriptorResponse(files)) => {
                for raw in &files.file_descriptor_proto {
                    registry.add_encoded_file(raw)?;
                }
            }
            Some(MessageResponse::ErrorResponse(error)) => {
                return Err(ReplayError::ReflectionResponse {
                    code: error.error_code,
                    message: error.error_message,
                });
            }
            _ => return Err(ReplayError::UnexpectedReflectionResponse),
        }
        debug!(service, files = registry.len(), "reflection descriptors received");

        let pool = registry.into_pool()?;
        let service_desc = find_service(&pool, service)?;
        find_method(&service_desc, method)
    }
}

/// Build the runtime-typed request message from payload JSON.
///
/// An empty payload is treated as `{}`. JSON that does not conform to the
/// input schema is a marshaling error, reported before any invocation.
fn build_request_message(method: &MethodDescriptor, payload_json: &str) -> Result<DynamicMessage> {
    let payload = if payload_json.is_empty() {
        "{}"
    } else {
        payload_json
    };

    let mut deserializer = serde_json::Deserializer::from_str(payload);
    let message = DynamicMessage::deserialize(method.input(), &mut deserializer)
        .map_err(ReplayError::InvalidPayload)?;
    deserializer.end().map_err(ReplayError::InvalidPayload)?;
    Ok(message)
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
