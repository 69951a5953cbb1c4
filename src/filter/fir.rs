// src/filter/fir.rs

use alloc::vec::Vec;
use core::marker::PhantomData;
use log::debug;

use crate::common::{GenError, GenResult};
use crate::config::FirConfig;
use crate::quant::{bit_length, ceil_log2, check_signs, quantize, round_shr};

/// Integer layout of a FIR filter variant: mantissa width, accumulator width and the
/// rounding shift the multiply applies to each product before accumulation.
pub trait MantissaWidth {
    type Mantissa: Copy + core::fmt::Debug + PartialEq + Into<i64>;

    /// Width of coefficients, input samples and output samples.
    const BITS: u32;
    /// Width of the accumulators the products are summed into.
    const ACCUMULATOR_BITS: u32;
    /// Rounding right shift applied to every product.
    const PRODUCT_SHIFT: u32;
    /// Input exponent assumed by [`FirFilter::exponent`].
    const CANONICAL_INPUT_EXP: i32;

    fn narrow(value: i64) -> Option<Self::Mantissa>;
}

/// 16-bit coefficients and samples, 32-bit accumulators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct S16;

/// 32-bit coefficients and samples, 40-bit accumulators, products shifted right by 30.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct S32;

impl MantissaWidth for S16 {
    type Mantissa = i16;
    const BITS: u32 = 16;
    const ACCUMULATOR_BITS: u32 = 32;
    const PRODUCT_SHIFT: u32 = 0;
    const CANONICAL_INPUT_EXP: i32 = 0;

    fn narrow(value: i64) -> Option<i16> {
        i16::try_from(value).ok()
    }
}

impl MantissaWidth for S32 {
    type Mantissa = i32;
    const BITS: u32 = 32;
    const ACCUMULATOR_BITS: u32 = 40;
    const PRODUCT_SHIFT: u32 = 30;
    const CANONICAL_INPUT_EXP: i32 = -30;

    fn narrow(value: i64) -> Option<i32> {
        i32::try_from(value).ok()
    }
}

/// Fixed-point FIR filter parameters.
///
/// The runtime computes `acc = sum(round(x[t-k] * b[k] * 2^-PRODUCT_SHIFT))` and outputs
/// `acc >> shift`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FirFilter<W: MantissaWidth> {
    /// Tap mantissas `b[0] .. b[N-1]`.
    pub coefficients: Vec<W::Mantissa>,
    /// Right shift applied to the accumulator to produce an output sample.
    pub shift: u32,
    /// Output exponent when the input carries `W::CANONICAL_INPUT_EXP`.
    pub exponent: i32,
    /// Output exponent minus input exponent.
    pub exponent_diff: i32,
    /// Worst-case accumulator magnitude for any input respecting the declared headroom.
    pub accumulator_bound: u64,
    _width: PhantomData<W>,
}

impl<W: MantissaWidth> FirFilter<W> {
    /// Converts floating-point taps into mantissas, shift and exponents.
    ///
    /// Coefficients are first given the least headroom their width allows. If the worst-case
    /// accumulator would not fit `W::ACCUMULATOR_BITS`, they are uniformly shifted right by the
    /// smallest amount that makes it fit. The output shift then brings the accumulator back to
    /// `W::BITS`, plus any requested output headroom.
    pub fn derive(coefficients: &[f64], config: &FirConfig) -> GenResult<Self> {
        if let Some(taps) = config.taps {
            if taps != coefficients.len() {
                return Err(GenError::InvalidInputSize { expected: taps, found: coefficients.len() });
            }
        }
        if config.input_headroom >= W::BITS {
            return Err(GenError::Domain("input headroom exceeds the sample width"));
        }
        if config.output_headroom >= W::BITS {
            return Err(GenError::Domain("output headroom exceeds the sample width"));
        }

        let quantized = quantize(coefficients, W::BITS)?;
        let acc_limit = 1u64 << (W::ACCUMULATOR_BITS - 1);

        let mut coef_shift = 0;
        let mut mantissas = quantized.mantissas.clone();
        let mut bound = max_dot_product::<W>(&mantissas, config.input_headroom)?;

        while bound >= acc_limit {
            coef_shift += bit_length(bound) - (W::ACCUMULATOR_BITS - 1);
            mantissas = quantized
                .mantissas
                .iter()
                .map(|&m| round_shr(m, coef_shift))
                .collect();
            bound = max_dot_product::<W>(&mantissas, config.input_headroom)?;
        }

        let shift = ceil_log2(bound).saturating_sub(W::BITS - 1) + config.output_headroom;

        // Each bit of coefficient or accumulator shift raises the output exponent by one.
        let exponent_diff =
            W::PRODUCT_SHIFT as i32 - quantized.scale_log2 + coef_shift as i32 + shift as i32;
        let exponent = exponent_diff + W::CANONICAL_INPUT_EXP;

        check_signs(coefficients, &mantissas)?;

        let narrowed = mantissas
            .iter()
            .map(|&m| W::narrow(m).ok_or(GenError::Overflow))
            .collect::<GenResult<Vec<_>>>()?;

        debug!(
            "FIR s{}: {} taps, scale 2^{}, coefficient shift {}, accumulator bound {}, shift {}, exp {}, exp_diff {}",
            W::BITS,
            narrowed.len(),
            quantized.scale_log2,
            coef_shift,
            bound,
            shift,
            exponent,
            exponent_diff
        );

        Ok(Self {
            coefficients: narrowed,
            shift,
            exponent,
            exponent_diff,
            accumulator_bound: bound,
            _width: PhantomData,
        })
    }

    pub fn tap_count(&self) -> usize {
        self.coefficients.len()
    }

    /// Size of the coefficient array in bytes. The runtime state buffer has the same size.
    pub fn size_bytes(&self) -> usize {
        self.coefficients.len() * core::mem::size_of::<W::Mantissa>()
    }
}

/// Largest accumulator value the filter can reach.
///
/// Every input sample is taken at the extreme of the sign its coefficient has, reduced by
/// `input_headroom` redundant sign bits, so every product is non-negative.
pub fn max_dot_product<W: MantissaWidth>(mantissas: &[i64], input_headroom: u32) -> GenResult<u64> {
    let max_pos = ((1i64 << (W::BITS - 1)) - 1) >> input_headroom;
    let max_neg = (-(1i64 << (W::BITS - 1))) >> input_headroom;

    mantissas.iter().try_fold(0u64, |acc, &m| {
        let input = if m >= 0 { max_pos } else { max_neg };
        let product = round_shr(m * input, W::PRODUCT_SHIFT);
        acc.checked_add(product as u64).ok_or(GenError::Overflow)
    })
}

#[cfg(test)]
#[path = "fir_tests.rs"]
mod tests;
