use num_complex::Complex64;

use super::fixed::Fixed;
use crate::common::GenResult;

/// A complex fixed-point pair laid out as `{re, im}`, matching `complex_s32_t`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[repr(C)]
pub struct ComplexFixed<const FRAC: u32> {
    pub re: Fixed<FRAC>,
    pub im: Fixed<FRAC>,
}

impl<const FRAC: u32> ComplexFixed<FRAC> {
    pub fn new(re: Fixed<FRAC>, im: Fixed<FRAC>) -> Self {
        Self { re, im }
    }

    /// Quantizes each component independently.
    pub fn try_from_complex(value: Complex64) -> GenResult<Self> {
        Ok(Self {
            re: Fixed::try_from_f64(value.re)?,
            im: Fixed::try_from_f64(value.im)?,
        })
    }

    /// Raw `(re, im)` integers, in storage order.
    #[inline]
    pub fn to_bits(self) -> (i32, i32) {
        (self.re.to_bits(), self.im.to_bits())
    }

    pub fn to_complex(self) -> Complex64 {
        Complex64::new(self.re.to_f64(), self.im.to_f64())
    }
}

use core::ops::Neg;

impl<const FRAC: u32> Neg for ComplexFixed<FRAC> {
    type Output = ComplexFixed<FRAC>;

    #[inline]
    fn neg(self) -> Self::Output {
        ComplexFixed { re: -self.re, im: -self.im }
    }
}
