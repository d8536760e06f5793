//! Error types for the protocol

use thiserror::Error;

use crate::WireField;

/// Protocol error
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("Invalid {field} length: expected {expected} bytes, got {actual}")]
    InvalidFieldLength {
        field: WireField,
        expected: usize,
        actual: usize,
    },
}

/// Result type alias for protocol operations
pub type ProtocolResult<T> = Result<T, ProtocolError>;
