use crate::core::alphabet::Alphabet;
use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{ToPrimitive, Zero};

use super::errors::{FrameError, Overflow};

/// Interprets `bytes` as a big-endian unsigned integer. Empty input is zero.
pub fn bytes_to_int(bytes: &[u8]) -> BigUint {
    BigUint::from_bytes_be(bytes)
}

/// Writes `n` as exactly `width` big-endian bytes, left-padded with zeros.
///
/// This is what restores leading zero bytes that the integer form drops:
/// `[0x00, 0xFF]` and `[0xFF]` are the same number, only the width differs.
pub fn int_to_bytes(n: &BigUint, width: usize) -> Result<Vec<u8>, Overflow> {
    if n.is_zero() {
        return Ok(vec![0u8; width]);
    }

    let bytes = n.to_bytes_be();
    if bytes.len() > width {
        return Err(Overflow {
            needed: bytes.len(),
            width,
        });
    }

    let mut result = Vec::with_capacity(width);
    result.resize(width - bytes.len(), 0u8);
    result.extend_from_slice(&bytes);
    Ok(result)
}

/// Largest `k` with `base^k <= u64::MAX`, and `base^k` itself.
///
/// Dividing by `base^k` peels off `k` digits per bignum division instead of one.
fn chunk(base: usize) -> (usize, u64) {
    let base = base as u64;
    let mut digits = 1;
    let mut power = base;
    while let Some(next) = power.checked_mul(base) {
        power = next;
        digits += 1;
    }
    (digits, power)
}

/// Digits of `n` in `base`, most significant first.
///
/// Zero is the single digit `[0]`, never an empty sequence.
pub fn encode_integer(n: &BigUint, base: usize) -> Vec<usize> {
    debug_assert!(base >= 2);

    if n.is_zero() {
        return vec![0];
    }

    let (chunk_digits, chunk_value) = chunk(base);
    let chunk_big = BigUint::from(chunk_value);
    let base = base as u64;

    // Estimate output size to avoid reallocations
    let estimate = (n.bits() as f64 / (base as f64).log2()) as usize + 1;
    let mut result = Vec::with_capacity(estimate + chunk_digits);

    let mut num = n.clone();
    while !num.is_zero() {
        let (quotient, remainder) = num.div_rem(&chunk_big);
        let mut rem = remainder.to_u64().unwrap_or_default();
        let last = quotient.is_zero();

        for _ in 0..chunk_digits {
            if last && rem == 0 {
                break;
            }
            result.push((rem % base) as usize);
            rem /= base;
        }
        num = quotient;
    }

    result.reverse();
    result
}

/// Folds `digits` (most significant first) back into an integer:
/// `num = num * base + digit`, left to right.
///
/// Leading zero digits are accepted and contribute nothing; `[0]` is zero.
pub fn decode_integer(digits: &[usize], base: usize) -> BigUint {
    debug_assert!(base >= 2);

    let (chunk_digits, chunk_value) = chunk(base);
    let base_u64 = base as u64;
    let mut num = BigUint::zero();

    for group in digits.chunks(chunk_digits) {
        let mut value = 0u64;
        for &digit in group {
            value = value * base_u64 + digit as u64;
        }
        let scale = if group.len() == chunk_digits {
            chunk_value
        } else {
            base_u64.pow(group.len() as u32)
        };
        num *= scale;
        num += value;
    }

    num
}

/// Writes `n` as a numeral over `alphabet`.
pub fn encode_symbols(n: &BigUint, alphabet: &Alphabet) -> String {
    encode_integer(n, alphabet.size())
        .into_iter()
        .map(|digit| alphabet.symbol_at(digit))
        .collect()
}

/// Reads a numeral over `alphabet`.
///
/// `offset` is the char position of `text` inside the enclosing frame, so
/// [`FrameError::InvalidSymbol`] points at the right column.
pub fn decode_symbols(text: &str, alphabet: &Alphabet, offset: usize) -> Result<BigUint, FrameError> {
    let digits = text
        .chars()
        .enumerate()
        .map(|(i, c)| alphabet.value_of(c, offset + i))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(decode_integer(&digits, alphabet.size()))
}
