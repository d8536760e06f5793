//! Probable prime generation
//!
//! [`is_probable_prime`] is a repeated Fermat witness test: it checks
//! `a^(n-1) ≡ 1 (mod n)` for random witnesses `a`. It does not factor
//! `n - 1` the way Miller-Rabin does, so Carmichael numbers such as 561
//! pass whenever every drawn witness is coprime to them. A `true` result
//! means "no witness found", nothing stronger.

use tracing::{trace, warn};

use crate::{pow_mod, CryptoError, CryptoResult, KeyExchangeConfig, RandomSource, MAX_OPERAND};

/// Run `trials` Fermat rounds against `n`
///
/// Witnesses are drawn uniformly from `[2, n-2]`. The first failing witness
/// short-circuits to `false`. Values below 5 have no witness range and are
/// decided directly.
pub fn is_probable_prime<R>(n: i64, trials: u32, rng: &mut R) -> CryptoResult<bool>
where
    R: RandomSource + ?Sized,
{
    if n < 5 {
        return Ok(n == 2 || n == 3);
    }

    let span = (n - 3) as u64;
    for _ in 0..trials {
        let witness = 2 + rng.uniform_below(span) as i64;
        if pow_mod(witness, n - 1, n)? != 1 {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Searches upward from a random odd candidate for a probable prime
#[derive(Debug, Clone)]
pub struct PrimeGenerator {
    bound: u64,
    trials: u32,
    max_candidates: u32,
    ceiling: u64,
}

impl PrimeGenerator {
    /// Create a generator from the prime limits in `config`
    pub fn new(config: &KeyExchangeConfig) -> CryptoResult<Self> {
        config.validate()?;
        Ok(Self {
            bound: config.prime_bound,
            trials: config.primality_trials,
            max_candidates: config.max_prime_candidates,
            ceiling: MAX_OPERAND as u64,
        })
    }

    /// Produce a probable prime
    ///
    /// The first candidate is drawn below the configured bound and forced
    /// odd; each failure steps it by 2. The result may land slightly above
    /// the bound but never above [`MAX_OPERAND`].
    pub fn generate<R>(&self, rng: &mut R) -> CryptoResult<u64>
    where
        R: RandomSource + ?Sized,
    {
        let mut candidate = rng.uniform_below(self.bound);
        if candidate & 1 == 0 {
            candidate += 1;
        }

        let mut tested = 0;
        while tested < self.max_candidates && candidate <= self.ceiling {
            tested += 1;
            if is_probable_prime(candidate as i64, self.trials, rng)? {
                trace!(attempts = tested, "Found probable prime");
                return Ok(candidate);
            }
            candidate += 2;
        }

        warn!(
            attempts = tested,
            max_candidates = self.max_candidates,
            bound = self.bound,
            "Prime search exhausted"
        );
        Err(CryptoError::PrimeSearchExhausted { attempts: tested })
    }
}
