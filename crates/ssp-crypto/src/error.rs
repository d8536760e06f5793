//! Key exchange error types

use ssp_protocol::ProtocolError;
use thiserror::Error;

/// Key exchange error
#[derive(Debug, Error)]
pub enum CryptoError {
    /// An operation was called out of order, with a zero field, or with
    /// values outside the overflow-safe range
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Prime search exhausted after {attempts} attempts")]
    PrimeSearchExhausted { attempts: u32 },

    #[error("Protocol error: {0}")]
    Protocol(#[from] ProtocolError),
}

impl CryptoError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }
}

pub type CryptoResult<T> = Result<T, CryptoError>;
