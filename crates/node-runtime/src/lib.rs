//! # Node Runtime Library
//!
//! Exposes the cluster launcher and CLI configuration for testing.
//! The main entry point is the `main.rs` binary.

pub mod cluster;
pub mod config;

pub use cluster::Cluster;
pub use config::{Cli, ClusterSpec, RuntimeConfig};
