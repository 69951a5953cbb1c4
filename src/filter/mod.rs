pub mod biquad;
pub mod block;
pub mod fir;

pub use biquad::{convert_sections, BiquadFilter, BiquadSection, SectionCoefficients};
pub use block::{pack, BiquadBlock, BIQUAD_BLOCK_SIZE};
pub use fir::{FirFilter, MantissaWidth, S16, S32};
