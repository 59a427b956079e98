//! # Coinflip Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── benches/                 # Tally and inbox throughput (criterion)
//! └── src/integration/
//!     ├── scenarios.rs         # Whole-cluster runs over the in-memory network
//!     └── http_cluster.rs      # End-to-end runs over real sockets
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p cf-tests
//! cargo test -p cf-tests integration::scenarios
//! cargo bench -p cf-tests
//! ```
