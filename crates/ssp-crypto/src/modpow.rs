//! Fixed-width modular exponentiation
//!
//! All arithmetic stays in `i64`. Operands are bounded by [`MAX_OPERAND`]
//! so that the product of any two of them fits the signed accumulator.

use crate::{CryptoError, CryptoResult, MAX_OPERAND};

/// Compute `x^y mod modulus`
///
/// Scans all 64 bits of `y` from the most significant bit down, squaring on
/// every step and multiplying by `x` where a bit is set. Leading zero bits
/// only square a result of 1, so the fixed iteration count is harmless.
/// `y == 1` short-circuits to `x % modulus`.
///
/// `modulus` must be in `(0, MAX_OPERAND]` and `x` in `[0, MAX_OPERAND]`.
pub fn pow_mod(x: i64, y: i64, modulus: i64) -> CryptoResult<i64> {
    if modulus <= 0 || modulus > MAX_OPERAND {
        return Err(CryptoError::config(format!(
            "modulus must be in (0, {MAX_OPERAND}], got {modulus}"
        )));
    }
    if !(0..=MAX_OPERAND).contains(&x) {
        return Err(CryptoError::config(format!(
            "base must be in [0, {MAX_OPERAND}], got {x}"
        )));
    }

    if y == 1 {
        return Ok(x % modulus);
    }

    let mut result: i64 = 1;
    let mut y = y;
    for _ in 0..64 {
        result = result * result % modulus;
        if y & i64::MIN != 0 {
            result = result * x % modulus;
        }
        y <<= 1;
    }
    Ok(result)
}
