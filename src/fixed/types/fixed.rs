// src/fixed/types/fixed.rs

use crate::common::{GenError, GenResult};
use crate::quant::{fits_signed, scale_round};

/// Generic fixed-point structure based on the number of fractional bits (FRAC).
/// The internal value is stored as a signed 32-bit integer.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct Fixed<const FRAC: u32>(i32);

impl<const FRAC: u32> Fixed<FRAC> {
    /// Creates a Fixed from the raw integer value (without shift).
    #[inline]
    pub const fn from_bits(bits: i32) -> Self {
        Self(bits)
    }

    /// Converts an f64 to Fixed, rounding to nearest (ties to even).
    ///
    /// Fails with [`GenError::Overflow`] instead of wrapping when the rounded value
    /// falls outside the 32-bit range.
    pub fn try_from_f64(value: f64) -> GenResult<Self> {
        if !value.is_finite() {
            return Err(GenError::Domain("non-finite value"));
        }
        let bits = scale_round(value, FRAC as i32);
        if !fits_signed(bits, 32) {
            return Err(GenError::Overflow);
        }
        Ok(Self(bits as i32))
    }

    /// Returns the stored raw value.
    #[inline]
    pub const fn to_bits(self) -> i32 {
        self.0
    }

    /// Real value represented, `raw / 2^FRAC`.
    #[inline]
    pub fn to_f64(self) -> f64 {
        libm::ldexp(self.0 as f64, -(FRAC as i32))
    }
}

use core::ops::Neg;

impl<const FRAC: u32> Neg for Fixed<FRAC> {
    type Output = Fixed<FRAC>;

    /// Two's complement negation. `i32::MIN` saturates to `i32::MAX`.
    #[inline]
    fn neg(self) -> Self::Output {
        Fixed(self.0.saturating_neg())
    }
}

use core::fmt;

impl<const FRAC: u32> fmt::Debug for Fixed<FRAC> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#010x}q{}", self.0, FRAC)
    }
}
