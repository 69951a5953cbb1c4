// src/quant.rs

//! Shared scaling primitives: checked rounding into a signed width, and the least-headroom
//! power-of-two quantizer used by the filter derivers.
//!
//! All rounding goes through [`round`] (nearest, ties to even) and all transcendental
//! math through `libm`, so the generated tables do not depend on the platform's float library.

use alloc::vec::Vec;
use log::debug;

use crate::common::{GenError, GenResult};

/// Widest signed mantissa the quantizer produces.
pub const MAX_TARGET_BITS: u32 = 32;

/// Upper bound on scale decrements before giving up with [`GenError::Overflow`].
/// In practice at most one decrement is ever needed.
const SCALE_DECREMENT_LIMIT: u32 = 64;

/// Output of [`quantize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quantized {
    /// Mantissas are `round(value * 2^scale_log2)`.
    pub scale_log2: i32,
    pub mantissas: Vec<i64>,
}

/// Rounds to the nearest integer, ties to even.
#[inline]
pub fn round(x: f64) -> f64 {
    libm::rint(x)
}

/// Returns `round(value * 2^scale_log2)`.
///
/// The multiplication by a power of two is exact, so the rounding step is the only source of error.
#[inline]
pub fn scale_round(value: f64, scale_log2: i32) -> i64 {
    round(libm::ldexp(value, scale_log2)) as i64
}

/// True if `value` lies in `[-2^(bits-1), 2^(bits-1) - 1]`.
#[inline]
pub fn fits_signed(value: i64, bits: u32) -> bool {
    debug_assert!((1..=63).contains(&bits));
    let limit = 1i64 << (bits - 1);
    value >= -limit && value < limit
}

/// Rounding arithmetic right shift, ties to even.
///
/// Matches `round(value * 2^-shift)` for every `i64`, without going through floating point.
pub fn round_shr(value: i64, shift: u32) -> i64 {
    if shift == 0 {
        return value;
    }
    if shift >= 64 {
        return 0;
    }
    let value = value as i128;
    let floor = value >> shift;
    let remainder = value - (floor << shift);
    let half = 1i128 << (shift - 1);

    let rounded = if remainder > half || (remainder == half && floor & 1 == 1) {
        floor + 1
    } else {
        floor
    };
    rounded as i64
}

/// Number of significant bits in `value`.
#[inline]
pub fn bit_length(value: u64) -> u32 {
    64 - value.leading_zeros()
}

/// Smallest `k` such that `value <= 2^k`.
#[inline]
pub fn ceil_log2(value: u64) -> u32 {
    if value <= 1 { 0 } else { bit_length(value - 1) }
}

/// Finds the largest power-of-two scale for which every value, once rounded, fits in a signed
/// `target_bits` integer.
///
/// The starting point is `floor(log2(2^(target_bits-1) / max|v|))`. Rounding the largest value can
/// still land exactly on `2^(target_bits-1)`, so the scale is decremented until everything fits.
pub fn quantize(values: &[f64], target_bits: u32) -> GenResult<Quantized> {
    if values.is_empty() {
        return Err(GenError::Domain("empty coefficient array"));
    }
    if !(2..=MAX_TARGET_BITS).contains(&target_bits) {
        return Err(GenError::Domain("target width must be between 2 and 32 bits"));
    }
    if values.iter().any(|v| !v.is_finite()) {
        return Err(GenError::Domain("non-finite coefficient"));
    }

    let largest = values.iter().fold(0.0f64, |acc, &v| acc.max(libm::fabs(v)));
    if largest == 0.0 {
        return Err(GenError::Domain("all-zero coefficients have no defined scale"));
    }

    let ideal = libm::log2(libm::ldexp(1.0, target_bits as i32 - 1) / largest);
    if !ideal.is_finite() {
        return Err(GenError::Domain("coefficient magnitude out of range"));
    }

    let mut scale_log2 = libm::floor(ideal) as i32;
    for _ in 0..SCALE_DECREMENT_LIMIT {
        let mantissas: Vec<i64> = values.iter().map(|&v| scale_round(v, scale_log2)).collect();

        if mantissas.iter().all(|&m| fits_signed(m, target_bits)) {
            debug!(
                "quantized {} values to {} bits, scale 2^{}",
                values.len(),
                target_bits,
                scale_log2
            );
            return Ok(Quantized { scale_log2, mantissas });
        }
        scale_log2 -= 1;
    }

    Err(GenError::Overflow)
}

/// Checks that every mantissa keeps the sign of its source value.
///
/// A non-zero source that quantized to zero counts as a mismatch, and zero sources must stay zero.
pub fn check_signs(source: &[f64], mantissas: &[i64]) -> GenResult<()> {
    for (index, (&s, &m)) in source.iter().zip(mantissas).enumerate() {
        let preserved = if s > 0.0 {
            m > 0
        } else if s < 0.0 {
            m < 0
        } else {
            m == 0
        };
        if !preserved {
            return Err(GenError::SignMismatch { index });
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "quant_tests.rs"]
mod tests;
