//! Node endpoint configuration with validation.
//!
//! Node `i` listens on `host:base_port + i`; every node derives its peers'
//! addresses from the same mapping.

use cf_consensus::NodeId;
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

/// Default port of node 0
pub const DEFAULT_BASE_PORT: u16 = 3000;

/// HTTP configuration shared by every node of a cluster
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeApiConfig {
    /// Bind and dial address
    pub host: IpAddr,
    /// Port of node 0
    pub base_port: u16,
    /// Upper bound on one peer delivery, connect included
    #[serde(with = "humantime_serde")]
    pub request_timeout: Duration,
    /// Upper bound on establishing a connection to a peer
    #[serde(with = "humantime_serde")]
    pub connect_timeout: Duration,
}

impl Default for NodeApiConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            base_port: DEFAULT_BASE_PORT,
            request_timeout: Duration::from_secs(2),
            connect_timeout: Duration::from_millis(500),
        }
    }
}

impl NodeApiConfig {
    pub fn with_base_port(mut self, base_port: u16) -> Self {
        self.base_port = base_port;
        self
    }

    /// Validate configuration for a cluster of `cluster_size` nodes
    pub fn validate(&self, cluster_size: usize) -> Result<(), ConfigError> {
        if self.base_port == 0 {
            return Err(ConfigError::InvalidPort(
                "base_port cannot be 0".into(),
            ));
        }

        if let Some(last) = cluster_size.checked_sub(1) {
            self.port_for(last)?;
        }

        if self.request_timeout.is_zero() {
            return Err(ConfigError::InvalidTimeout(
                "request_timeout cannot be 0".into(),
            ));
        }

        if self.connect_timeout.is_zero() {
            return Err(ConfigError::InvalidTimeout(
                "connect_timeout cannot be 0".into(),
            ));
        }

        Ok(())
    }

    /// Port node `id` listens on
    pub fn port_for(&self, id: NodeId) -> Result<u16, ConfigError> {
        u16::try_from(id)
            .ok()
            .and_then(|offset| self.base_port.checked_add(offset))
            .ok_or(ConfigError::PortOutOfRange {
                node: id,
                base_port: self.base_port,
            })
    }

    /// Socket address of node `id`
    pub fn node_addr(&self, id: NodeId) -> Result<SocketAddr, ConfigError> {
        Ok(SocketAddr::new(self.host, self.port_for(id)?))
    }

    /// URL of `route` on node `id`, e.g. `http://127.0.0.1:3001/message`
    pub fn node_url(&self, id: NodeId, route: &str) -> Result<String, ConfigError> {
        Ok(format!(
            "http://{}/{}",
            self.node_addr(id)?,
            route.trim_start_matches('/')
        ))
    }
}

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid port: {0}")]
    InvalidPort(String),

    #[error("Port for node {node} overflows from base port {base_port}")]
    PortOutOfRange { node: NodeId, base_port: u16 },

    #[error("Invalid timeout: {0}")]
    InvalidTimeout(String),
}
