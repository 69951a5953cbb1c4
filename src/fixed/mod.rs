pub mod types;

pub use types::{ComplexFixed, Fixed};

/// Fractional bits of the Q2.30 format shared by biquad coefficients and twiddle factors.
pub const Q30_FRAC: u32 = 30;

/// Exponent associated with a Q2.30 value.
pub const Q30_EXP: i32 = -(Q30_FRAC as i32);

pub type Q30 = Fixed<Q30_FRAC>;
pub type ComplexQ30 = ComplexFixed<Q30_FRAC>;
