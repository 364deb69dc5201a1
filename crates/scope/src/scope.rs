//! Scope lifecycle: broker plus watch server under one handle

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::info;

use scope_broker::{Broker, DEFAULT_BUFFER_SIZE};
use scope_domain::CallEvent;
use scope_watch::{WatchServer, WatchServerConfig, DEFAULT_PORT};

use crate::error::Result;

/// Configures and starts a [`Scope`].
#[derive(Debug, Clone)]
pub struct ScopeBuilder {
    port: u16,
    buffer_size: usize,
}

impl Default for ScopeBuilder {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }
}

impl ScopeBuilder {
    /// Port for the watch endpoint. Use 0 to pick an ephemeral port.
    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Per-subscriber queue capacity.
    pub fn buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size;
        self
    }

    /// Bind the watch listener and spawn the server.
    pub async fn start(self) -> Result<Scope> {
        let broker = Broker::new(self.buffer_size);
        let server = WatchServer::new(
            broker.clone(),
            WatchServerConfig::default().with_port(self.port),
        );

        let listener = server.bind().await?;
        let local_addr = listener.local_addr()?;

        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let handle = tokio::spawn(server.serve_with_shutdown(listener, async {
            let _ = shutdown_rx.await;
        }));

        info!(%local_addr, "scope started");
        Ok(Scope {
            broker,
            local_addr,
            next_id: AtomicU64::new(0),
            shutdown: shutdown_tx,
            server: handle,
        })
    }
}

/// Handle over a running scope: the broker and its watch server.
#[derive(Debug)]
pub struct Scope {
    broker: Broker,
    local_addr: SocketAddr,
    /// Monotonic event id counter for this scope's lifetime.
    next_id: AtomicU64,
    shutdown: oneshot::Sender<()>,
    server: JoinHandle<scope_watch::Result<()>>,
}

impl Scope {
    pub fn builder() -> ScopeBuilder {
        ScopeBuilder::default()
    }

    /// Address the watch server is listening on.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// The underlying broker, for direct subscriptions in-process.
    pub fn broker(&self) -> &Broker {
        &self.broker
    }

    /// Send a captured event to all connected watchers.
    pub fn publish(&self, event: CallEvent) {
        self.broker.publish(event);
    }

    /// Number of active watch subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.broker.subscriber_count()
    }

    /// Next sequential event id, e.g. `"call-1"`, `"call-2"`.
    pub fn next_event_id(&self) -> String {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        format!("call-{id}")
    }

    /// Stop accepting watchers, drain in-flight streams, and wait for the
    /// server to exit.
    pub async fn shutdown(self) -> Result<()> {
        let _ = self.shutdown.send(());
        self.server.await??;
        Ok(())
    }
}

#[cfg(test)]
#[path = "scope_test.rs"]
mod tests;
