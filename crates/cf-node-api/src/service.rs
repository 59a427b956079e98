//! Node HTTP server lifecycle.
//!
//! Binding and serving are split so the readiness signal fires only once the
//! listener exists: a peer that observes "all nodes ready" can always connect.

use crate::domain::config::NodeApiConfig;
use crate::domain::error::NodeApiError;
use crate::router::build_router;
use cf_consensus::{NodeApi, NodeId, ReadinessSignal};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// A node whose listener is bound but not yet serving
pub struct NodeServer {
    node: Arc<dyn NodeApi>,
    listener: TcpListener,
    addr: SocketAddr,
}

impl NodeServer {
    /// Bind the node's port (`base_port + id`)
    pub async fn bind(config: &NodeApiConfig, node: Arc<dyn NodeApi>) -> Result<Self, NodeApiError> {
        let addr = config.node_addr(node.identity().id)?;
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| NodeApiError::Bind { addr, source })?;
        let addr = listener.local_addr().map_err(NodeApiError::Serve)?;

        Ok(Self {
            node,
            listener,
            addr,
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn node_id(&self) -> NodeId {
        self.node.identity().id
    }

    /// Signal readiness, then serve until `shutdown` resolves
    pub async fn serve<F>(
        self,
        readiness: Arc<dyn ReadinessSignal>,
        shutdown: F,
    ) -> Result<(), NodeApiError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let node_id = self.node_id();
        info!(node_id, addr = %self.addr, "Node is listening");
        readiness.set_node_ready(node_id);

        axum::serve(self.listener, build_router(self.node))
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(NodeApiError::Serve)?;

        info!(node_id, "Node server stopped");
        Ok(())
    }

    /// Serve on a background task, returning a handle for shutdown
    pub fn spawn(self, readiness: Arc<dyn ReadinessSignal>) -> NodeServerHandle {
        let node_id = self.node_id();
        let addr = self.addr;
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        let task = tokio::spawn(async move {
            let result = self
                .serve(readiness, async move {
                    let _ = shutdown_rx.await;
                })
                .await;
            if let Err(e) = &result {
                error!(node_id, error = %e, "Node server error");
            }
            result
        });

        NodeServerHandle {
            node_id,
            addr,
            shutdown_tx: Some(shutdown_tx),
            task,
        }
    }
}

/// Handle to a node server running on a background task
pub struct NodeServerHandle {
    node_id: NodeId,
    addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
    task: JoinHandle<Result<(), NodeApiError>>,
}

impl NodeServerHandle {
    pub fn node_id(&self) -> NodeId {
        self.node_id
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    /// Trigger graceful shutdown and wait for the server to drain
    pub async fn shutdown(mut self) -> Result<(), NodeApiError> {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        self.task
            .await
            .map_err(|e| NodeApiError::Task(e.to_string()))?
    }
}
