#![no_std]

extern crate alloc;

// Enables the standard library for tests and for the `std` feature,
// so you can run 'cargo test' on your PC normally.
#[cfg(any(test, feature = "std"))]
extern crate std;

pub mod common;
pub mod config;
pub mod quant;
pub mod fixed;
pub mod filter;
pub mod fft;
pub mod parse;

pub use common::{GenError, GenResult};
pub use config::{BiquadConfig, FftVariant, FirConfig, TwiddleConfig, VariantSelection};
