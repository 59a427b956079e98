//! Adapters layer (Hexagonal Architecture)

mod http_broadcaster;

pub use http_broadcaster::HttpBroadcaster;
