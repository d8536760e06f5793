//! Shared Protocol Definitions for the SSP key exchange
//!
//! Wire layout of the integer fields exchanged between host and device
//! while negotiating a session key.

mod codec;
mod error;

pub use codec::*;
pub use error::*;

/// Size of every integer field on the wire (64 bits, little-endian)
pub const FIELD_SIZE: usize = 8;

/// Size of the merged session key handed to the cipher (128 bits)
pub const SESSION_KEY_SIZE: usize = 2 * FIELD_SIZE;
