//! Adapters layer (Hexagonal Architecture)

mod coin;
mod network;
mod readiness;

pub use coin::*;
pub use network::*;
pub use readiness::*;
