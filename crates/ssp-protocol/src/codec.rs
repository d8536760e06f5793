//! Fixed-width field codec

use std::fmt;

use crate::{ProtocolError, ProtocolResult, FIELD_SIZE};

/// Integer fields carried in key exchange payloads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WireField {
    /// Base of the exponentiation
    Generator,
    /// Value every result is reduced against
    Modulus,
    /// A party's partial result, `generator^exponent mod modulus`
    InterKey,
}

impl fmt::Display for WireField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Generator => "generator",
            Self::Modulus => "modulus",
            Self::InterKey => "inter-key",
        };
        f.write_str(name)
    }
}

/// Encode a field value as 8 little-endian bytes
pub fn encode_field(value: u64) -> [u8; FIELD_SIZE] {
    value.to_le_bytes()
}

/// Decode a field received from the peer
///
/// The payload must be exactly [`FIELD_SIZE`] bytes; anything else is
/// rejected rather than padded or truncated.
pub fn decode_field(field: WireField, data: &[u8]) -> ProtocolResult<u64> {
    let bytes: [u8; FIELD_SIZE] = data
        .try_into()
        .map_err(|_| ProtocolError::InvalidFieldLength {
            field,
            expected: FIELD_SIZE,
            actual: data.len(),
        })?;
    Ok(u64::from_le_bytes(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_little_endian() {
        assert_eq!(
            encode_field(53432123),
            [0x3B, 0x4F, 0x2F, 0x03, 0x00, 0x00, 0x00, 0x00]
        );
        assert_eq!(
            encode_field(31245436),
            [0x7C, 0xC4, 0xDC, 0x01, 0x00, 0x00, 0x00, 0x00]
        );
    }

    #[test]
    fn test_decode_inverts_encode() {
        for value in [0, 1, 53432123, u32::MAX as u64, 3_037_000_499, u64::MAX] {
            let encoded = encode_field(value);
            assert_eq!(decode_field(WireField::InterKey, &encoded).unwrap(), value);
        }
    }

    #[test]
    fn test_decode_rejects_wrong_length() {
        let err = decode_field(WireField::Modulus, &[0x01, 0x02, 0x03]).unwrap_err();
        assert_eq!(
            err,
            ProtocolError::InvalidFieldLength {
                field: WireField::Modulus,
                expected: FIELD_SIZE,
                actual: 3,
            }
        );

        assert!(decode_field(WireField::Generator, &[0u8; 9]).is_err());
        assert!(decode_field(WireField::Generator, &[]).is_err());
    }

    #[test]
    fn test_error_messages_name_the_field() {
        let err = decode_field(WireField::InterKey, &[1, 2]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid inter-key length: expected 8 bytes, got 2"
        );
    }
}
