//! Key exchange session state machine

use rand::rngs::OsRng;
use ssp_protocol::{decode_field, encode_field, WireField, FIELD_SIZE};
use tracing::{debug, warn};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::{
    pow_mod, CryptoError, CryptoResult, KeyExchangeConfig, KeyMaterial, PrimeGenerator,
    RandomSource, SessionKey, MAX_OPERAND,
};

/// Progress of a key exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExchangeState {
    /// No parameters yet
    Uninitialized,
    /// Generator and modulus are set
    ParametersReady,
    /// Local exponent drawn and inter-key computed
    LocalKeyDerived,
    /// Shared secret computed (terminal)
    SharedSecretReady,
}

/// Generator and modulus shared by both parties
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DhParameters {
    pub generator: u64,
    pub modulus: u64,
}

impl DhParameters {
    /// Encode as the `(generator, modulus)` wire fields
    pub fn encode(&self) -> ([u8; FIELD_SIZE], [u8; FIELD_SIZE]) {
        (encode_field(self.generator), encode_field(self.modulus))
    }
}

/// Values that never leave the session
#[derive(Default, Zeroize, ZeroizeOnDrop)]
struct LocalSecrets {
    exponent: u64,
    shared_secret: u64,
}

/// One party's side of the key exchange
///
/// The host calls [`generate_parameters`](Self::generate_parameters) (or
/// [`generate`](Self::generate)) and sends the encoded generator and modulus;
/// the device feeds them to [`adopt_parameters`](Self::adopt_parameters).
/// Both sides then derive and swap inter-keys before computing the shared
/// secret.
pub struct KeyExchangeSession<R = OsRng> {
    config: KeyExchangeConfig,
    rng: R,
    state: ExchangeState,
    generator: u64,
    modulus: u64,
    inter_key: u64,
    peer_inter_key: u64,
    secrets: LocalSecrets,
}

impl KeyExchangeSession<OsRng> {
    /// Create a session drawing from the operating system's entropy source
    pub fn new() -> CryptoResult<Self> {
        Self::with_rng(KeyExchangeConfig::default(), OsRng)
    }
}

impl<R: RandomSource> KeyExchangeSession<R> {
    /// Create a session with an explicit configuration and random source
    pub fn with_rng(config: KeyExchangeConfig, rng: R) -> CryptoResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            rng,
            state: ExchangeState::Uninitialized,
            generator: 0,
            modulus: 0,
            inter_key: 0,
            peer_inter_key: 0,
            secrets: LocalSecrets::default(),
        })
    }

    pub fn state(&self) -> ExchangeState {
        self.state
    }

    /// Generator and modulus, once set
    pub fn parameters(&self) -> Option<DhParameters> {
        match self.state {
            ExchangeState::Uninitialized => None,
            _ => Some(DhParameters {
                generator: self.generator,
                modulus: self.modulus,
            }),
        }
    }

    /// Our inter-key, once derived
    pub fn inter_key(&self) -> Option<u64> {
        match self.state {
            ExchangeState::LocalKeyDerived | ExchangeState::SharedSecretReady => {
                Some(self.inter_key)
            }
            _ => None,
        }
    }

    /// The peer's inter-key, once accepted
    pub fn peer_inter_key(&self) -> Option<u64> {
        (self.peer_inter_key != 0).then_some(self.peer_inter_key)
    }

    /// The negotiated secret, once computed
    pub fn shared_secret(&self) -> Option<u64> {
        (self.state == ExchangeState::SharedSecretReady).then_some(self.secrets.shared_secret)
    }

    /// Generate parameters and derive the local inter-key in one step
    ///
    /// Returns the local inter-key.
    pub fn generate(&mut self) -> CryptoResult<u64> {
        self.generate_parameters()?;
        self.derive_local_inter_key()
    }

    /// Sample two distinct probable primes
    ///
    /// The larger prime becomes the generator and the smaller the modulus.
    pub fn generate_parameters(&mut self) -> CryptoResult<DhParameters> {
        self.expect_state(ExchangeState::Uninitialized, "generate parameters")?;

        let primes = PrimeGenerator::new(&self.config)?;
        for _ in 0..self.config.max_parameter_attempts {
            let first = primes.generate(&mut self.rng)?;
            let second = primes.generate(&mut self.rng)?;
            if first == second {
                debug!(prime = first, "Sampled equal primes, retrying");
                continue;
            }

            self.generator = first.max(second);
            self.modulus = first.min(second);
            self.state = ExchangeState::ParametersReady;
            debug!(
                generator = self.generator,
                modulus = self.modulus,
                "Generated key exchange parameters"
            );
            return Ok(DhParameters {
                generator: self.generator,
                modulus: self.modulus,
            });
        }

        warn!(
            attempts = self.config.max_parameter_attempts,
            "Could not sample two distinct primes"
        );
        Err(CryptoError::PrimeSearchExhausted {
            attempts: self.config.max_parameter_attempts,
        })
    }

    /// Take generator and modulus as received from the peer
    pub fn adopt_parameters(&mut self, generator: u64, modulus: u64) -> CryptoResult<()> {
        self.expect_state(ExchangeState::Uninitialized, "adopt parameters")?;

        let limit = MAX_OPERAND as u64;
        if generator > limit || modulus > limit {
            warn!(generator, modulus, "Rejected out-of-range parameters");
            return Err(CryptoError::config(format!(
                "generator and modulus must not exceed {limit}"
            )));
        }

        self.generator = generator;
        self.modulus = modulus;
        self.state = ExchangeState::ParametersReady;
        debug!(generator, modulus, "Adopted key exchange parameters");
        Ok(())
    }

    /// Decode and adopt the generator and modulus wire fields
    pub fn adopt_encoded_parameters(
        &mut self,
        generator: &[u8],
        modulus: &[u8],
    ) -> CryptoResult<()> {
        let generator = decode_field(WireField::Generator, generator)?;
        let modulus = decode_field(WireField::Modulus, modulus)?;
        self.adopt_parameters(generator, modulus)
    }

    /// Draw the local exponent and compute `generator^exponent mod modulus`
    pub fn derive_local_inter_key(&mut self) -> CryptoResult<u64> {
        self.expect_state(ExchangeState::ParametersReady, "derive local inter-key")?;
        if self.generator == 0 || self.modulus == 0 {
            return Err(CryptoError::config("generator and modulus must be set"));
        }

        let exponent = self.rng.uniform_below(self.config.exponent_bound);
        let inter_key = pow_mod(self.generator as i64, exponent as i64, self.modulus as i64)?;

        self.secrets.exponent = exponent;
        self.inter_key = inter_key as u64;
        self.state = ExchangeState::LocalKeyDerived;
        debug!(inter_key = self.inter_key, "Derived local inter-key");
        Ok(self.inter_key)
    }

    pub fn encode_generator(&self) -> [u8; FIELD_SIZE] {
        encode_field(self.generator)
    }

    pub fn encode_modulus(&self) -> [u8; FIELD_SIZE] {
        encode_field(self.modulus)
    }

    pub fn encode_inter_key(&self) -> [u8; FIELD_SIZE] {
        encode_field(self.inter_key)
    }

    /// Store the peer's encoded inter-key
    ///
    /// Allowed in any state; the value is checked for zero when the shared
    /// secret is derived.
    pub fn accept_peer_inter_key(&mut self, data: &[u8]) -> CryptoResult<()> {
        let value = decode_field(WireField::InterKey, data)?;
        if value > MAX_OPERAND as u64 {
            warn!(value, "Rejected out-of-range peer inter-key");
            return Err(CryptoError::config(format!(
                "peer inter-key must not exceed {MAX_OPERAND}"
            )));
        }
        self.peer_inter_key = value;
        Ok(())
    }

    /// Compute `peer_inter_key^exponent mod modulus`
    pub fn derive_shared_secret(&mut self) -> CryptoResult<u64> {
        self.expect_state(ExchangeState::LocalKeyDerived, "derive shared secret")?;
        if self.peer_inter_key == 0 {
            return Err(CryptoError::config("peer inter-key not set"));
        }

        let secret = pow_mod(
            self.peer_inter_key as i64,
            self.secrets.exponent as i64,
            self.modulus as i64,
        )?;

        self.secrets.shared_secret = secret as u64;
        self.state = ExchangeState::SharedSecretReady;
        debug!("Derived shared secret");
        Ok(self.secrets.shared_secret)
    }

    /// Merge `fixed_key` with the negotiated secret into the session key
    pub fn session_key(&self, fixed_key: u64) -> CryptoResult<SessionKey> {
        self.expect_state(ExchangeState::SharedSecretReady, "build session key")?;
        Ok(KeyMaterial::new(fixed_key, self.secrets.shared_secret).merge())
    }

    fn expect_state(&self, expected: ExchangeState, operation: &str) -> CryptoResult<()> {
        if self.state != expected {
            return Err(CryptoError::config(format!(
                "cannot {operation} in state {:?} (requires {expected:?})",
                self.state
            )));
        }
        Ok(())
    }
}
