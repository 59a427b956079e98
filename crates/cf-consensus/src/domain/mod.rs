//! Domain layer for the consensus node
//!
//! - value: the binary proposal
//! - inbox: inbound proposals, synchronized against the tally drain
//! - tally: frequency count and majority rule
//! - state: observable outcome and the faulty-node undefined triple

mod config;
mod error;
mod identity;
mod inbox;
mod message;
mod round;
mod state;
mod tally;
mod value;

pub use config::*;
pub use error::*;
pub use identity::*;
pub use inbox::*;
pub use message::*;
pub use round::*;
pub use state::*;
pub use tally::*;
pub use value::*;
