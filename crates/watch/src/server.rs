//! TCP server wrapping the ScopeService

use std::net::SocketAddr;

use tokio::net::TcpListener;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::transport::Server;
use tracing::info;

use scope_broker::Broker;
use scope_proto::scope::v1::scope_service_server::ScopeServiceServer;

use crate::error::Result;
use crate::service::WatchService;

/// Default port for the watch endpoint.
pub const DEFAULT_PORT: u16 = 9090;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct WatchServerConfig {
    /// Port to listen on (all interfaces).
    pub port: u16,
}

impl Default for WatchServerConfig {
    fn default() -> Self {
        Self { port: DEFAULT_PORT }
    }
}

impl WatchServerConfig {
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }
}

/// gRPC server exposing [`WatchService`] to remote watchers.
pub struct WatchServer {
    config: WatchServerConfig,
    broker: Broker,
}

impl WatchServer {
    pub fn new(broker: Broker, config: WatchServerConfig) -> Self {
        Self { config, broker }
    }

    pub fn with_defaults(broker: Broker) -> Self {
        Self::new(broker, WatchServerConfig::default())
    }

    /// Bind a listener on the configured port.
    pub async fn bind(&self) -> Result<TcpListener> {
        let addr: SocketAddr = ([0, 0, 0, 0], self.config.port).into();
        let listener = TcpListener::bind(addr).await?;
        Ok(listener)
    }

    /// Serve on the given listener until the process exits.
    pub async fn serve(self, listener: TcpListener) -> Result<()> {
        self.serve_with_shutdown(listener, std::future::pending())
            .await
    }

    /// Serve on the given listener until `shutdown` resolves, then stop
    /// accepting and drain in-flight streams.
    pub async fn serve_with_shutdown(
        self,
        listener: TcpListener,
        shutdown: impl std::future::Future<Output = ()> + Send,
    ) -> Result<()> {
        if let Ok(addr) = listener.local_addr() {
            info!(%addr, "watch server listening");
        }

        Server::builder()
            .add_service(ScopeServiceServer::new(WatchService::new(self.broker)))
            .serve_with_incoming_shutdown(TcpListenerStream::new(listener), shutdown)
            .await?;

        Ok(())
    }
}
