//! SSP Crypto - session key negotiation for the SSP host/device link
//!
//! A compact Diffie-Hellman exchange over fixed-width integers: probable
//! prime parameters, `i64` modular exponentiation, and a merge step that
//! turns the negotiated secret into a 128-bit session key.

mod config;
mod error;
mod key;
mod modpow;
mod prime;
mod random;
mod session;

pub use config::*;
pub use error::*;
pub use key::*;
pub use modpow::*;
pub use prime::*;
pub use random::*;
pub use session::*;

/// Largest operand whose square fits in `i64` (`floor(sqrt(i64::MAX))`)
pub const MAX_OPERAND: i64 = 3_037_000_499;

/// Largest accepted prime bound, leaving room for the search to step past it
pub const MAX_PRIME_BOUND: u64 = 3_000_000_000;
