//! Session key material

use std::fmt;

use ssp_protocol::{encode_field, FIELD_SIZE, SESSION_KEY_SIZE};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// The two halves of a session key
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct KeyMaterial {
    /// Separately supplied constant half
    pub fixed_key: u64,
    /// Shared secret produced by the exchange
    pub negotiated_key: u64,
}

impl KeyMaterial {
    pub fn new(fixed_key: u64, negotiated_key: u64) -> Self {
        Self {
            fixed_key,
            negotiated_key,
        }
    }

    /// Merge into the 16-byte key: `le(fixed_key) || le(negotiated_key)`
    pub fn merge(&self) -> SessionKey {
        SessionKey(Zeroizing::new(merge_keys(
            self.fixed_key,
            self.negotiated_key,
        )))
    }
}

impl fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyMaterial").finish_non_exhaustive()
    }
}

/// Concatenate the little-endian encodings of both key halves
pub fn merge_keys(fixed_key: u64, negotiated_key: u64) -> [u8; SESSION_KEY_SIZE] {
    let mut key = [0u8; SESSION_KEY_SIZE];
    key[..FIELD_SIZE].copy_from_slice(&encode_field(fixed_key));
    key[FIELD_SIZE..].copy_from_slice(&encode_field(negotiated_key));
    key
}

/// Merged session key, wiped on drop
#[derive(Clone, PartialEq, Eq)]
pub struct SessionKey(Zeroizing<[u8; SESSION_KEY_SIZE]>);

impl SessionKey {
    pub fn as_bytes(&self) -> &[u8; SESSION_KEY_SIZE] {
        &self.0
    }
}

impl fmt::Debug for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionKey(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_layout() {
        let key = merge_keys(0x0123456701234567, 1);
        assert_eq!(
            key,
            [
                0x67, 0x45, 0x23, 0x01, 0x67, 0x45, 0x23, 0x01, //
                0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            ]
        );
    }

    #[test]
    fn test_merge_is_deterministic() {
        let material = KeyMaterial::new(81985526925837671, 88430);
        assert_eq!(material.merge(), material.merge());
        assert_eq!(
            material.merge().as_bytes(),
            &merge_keys(81985526925837671, 88430)
        );
    }

    #[test]
    fn test_halves_are_independent() {
        let key = merge_keys(0, u64::MAX);
        assert_eq!(&key[..8], &[0u8; 8]);
        assert_eq!(&key[8..], &[0xFFu8; 8]);
    }

    #[test]
    fn test_debug_is_redacted() {
        let material = KeyMaterial::new(0xDEAD_BEEF, 0xCAFE);
        let rendered = format!("{:?} {:?}", material, material.merge());
        assert!(!rendered.contains("3735928559"));
        assert!(!rendered.contains("51966"));
        assert!(!rendered.contains("222"));
    }
}
