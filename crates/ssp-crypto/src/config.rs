//! Key exchange configuration

use serde::{Deserialize, Serialize};

use crate::{CryptoError, CryptoResult, MAX_PRIME_BOUND};

/// Key exchange configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyExchangeConfig {
    /// Upper bound for the first prime candidate drawn
    pub prime_bound: u64,
    /// Fermat trials run against each candidate
    pub primality_trials: u32,
    /// Odd candidates tested before a prime search gives up
    pub max_prime_candidates: u32,
    /// Redraws allowed when both sampled primes come out equal
    pub max_parameter_attempts: u32,
    /// Exclusive upper bound for the local exponent
    pub exponent_bound: u64,
}

impl Default for KeyExchangeConfig {
    fn default() -> Self {
        Self {
            prime_bound: 1 << 31,
            primality_trials: 5,
            max_prime_candidates: 100_000,
            max_parameter_attempts: 16,
            exponent_bound: 1 << 31,
        }
    }
}

impl KeyExchangeConfig {
    /// Check that every limit is usable
    pub fn validate(&self) -> CryptoResult<()> {
        if self.prime_bound < 2 || self.prime_bound > MAX_PRIME_BOUND {
            return Err(CryptoError::config(format!(
                "prime_bound must be in [2, {MAX_PRIME_BOUND}], got {}",
                self.prime_bound
            )));
        }
        if self.primality_trials == 0 {
            return Err(CryptoError::config("primality_trials must be non-zero"));
        }
        if self.max_prime_candidates == 0 {
            return Err(CryptoError::config("max_prime_candidates must be non-zero"));
        }
        if self.max_parameter_attempts == 0 {
            return Err(CryptoError::config(
                "max_parameter_attempts must be non-zero",
            ));
        }
        if self.exponent_bound == 0 {
            return Err(CryptoError::config("exponent_bound must be non-zero"));
        }
        Ok(())
    }
}
