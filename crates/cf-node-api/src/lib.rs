//! # cf-node-api
//!
//! HTTP surface of a consensus node.
//!
//! - [`NodeServer`]: axum server exposing `/status`, `/message`, `/start`,
//!   `/stop` and `/getState` on `base_port + node_id`
//! - [`HttpBroadcaster`]: reqwest-backed [`cf_consensus::PeerBroadcaster`]
//!   posting proposals to the same endpoint mapping
//!
//! ```rust,ignore
//! let config = NodeApiConfig::default();
//! let broadcaster = Arc::new(HttpBroadcaster::new(config.clone())?);
//! let node = Arc::new(NodeActor::new(identity, value, ConsensusConfig::default(), broadcaster, readiness.clone()));
//!
//! let handle = NodeServer::bind(&config, node).await?.spawn(readiness);
//! ```

pub mod adapters;
pub mod domain;
pub mod router;
pub mod service;

pub use adapters::HttpBroadcaster;
pub use domain::{ApiError, ConfigError, MessageBody, NodeApiConfig, NodeApiError, DEFAULT_BASE_PORT};
pub use router::build_router;
pub use service::{NodeServer, NodeServerHandle};
