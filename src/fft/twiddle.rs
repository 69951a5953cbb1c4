// src/fft/twiddle.rs

//! Stage geometry of the vectorized butterfly network and the twiddle factor each load needs.
//!
//! The first two butterfly stages use a fixed rotation, so only `log2_n - 2` stages draw from the
//! table. Each stage loads twiddles four at a time, one quadruple per butterfly group.

use core::f64::consts::PI;
use num_complex::Complex64;

use crate::common::{GenError, GenResult};
use crate::config::FftVariant;
use crate::fixed::{ComplexQ30, Q30_EXP, Q30_FRAC};

/// Smallest transform that needs any table entries.
pub const MIN_FFT_LOG2: u32 = 3;

/// Largest transform a table can be built for.
pub const MAX_FFT_LOG2: u32 = 30;

/// Bytes moved by one vector load. Spans and strides are measured in these units.
pub const LOAD_GRANULARITY: u64 = 32;

/// Twiddle factors fetched per load.
pub const SUB_FACTORS: usize = 4;

pub const TWIDDLE_FRAC: u32 = Q30_FRAC;
pub const TWIDDLE_EXP: i32 = Q30_EXP;

/// Span and stride of one butterfly stage, in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageGeometry {
    pub span: u64,
    pub stride: u64,
}

impl StageGeometry {
    /// Butterfly groups in the stage, one twiddle quadruple each.
    #[inline]
    pub fn group_count(&self) -> u64 {
        self.stride / LOAD_GRANULARITY
    }
}

/// Walks the table-driven stages of a `2^log2_n` transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TwiddleSchedule {
    log2_n: u32,
    variant: FftVariant,
}

impl TwiddleSchedule {
    pub fn new(log2_n: u32, variant: FftVariant) -> GenResult<Self> {
        if log2_n < MIN_FFT_LOG2 {
            return Err(GenError::Domain("FFT size must be at least 8 points"));
        }
        if log2_n > MAX_FFT_LOG2 {
            return Err(GenError::Domain("FFT size too large"));
        }
        Ok(Self { log2_n, variant })
    }

    #[inline]
    pub fn log2_n(&self) -> u32 {
        self.log2_n
    }

    #[inline]
    pub fn variant(&self) -> FftVariant {
        self.variant
    }

    #[inline]
    pub fn stage_count(&self) -> u32 {
        self.log2_n - 2
    }

    /// Complex entries in the full table, `4 * (2^(log2_n - 2) - 1)`.
    #[inline]
    pub fn entry_count(&self) -> usize {
        (1usize << self.log2_n) - SUB_FACTORS
    }

    /// Butterfly groups in `stage`, or zero past the last stage.
    pub fn group_count(&self, stage: u32) -> u64 {
        if stage < self.stage_count() { self.stage_geometry(stage).group_count() } else { 0 }
    }

    /// DIT spans start wide and halve while strides double; DIF runs the other way.
    pub fn geometry(&self, stage: u32) -> GenResult<StageGeometry> {
        if stage >= self.stage_count() {
            return Err(GenError::Domain("stage out of range"));
        }
        Ok(self.stage_geometry(stage))
    }

    fn stage_geometry(&self, stage: u32) -> StageGeometry {
        let wide = LOAD_GRANULARITY << (self.log2_n - 3);
        let narrow = LOAD_GRANULARITY;

        let (span, stride) = match self.variant {
            FftVariant::Dit => (wide >> stage, narrow << stage),
            FftVariant::Dif => (narrow << stage, wide >> stage),
        };
        StageGeometry { span, stride }
    }

    fn locate(&self, stage: u32, group: u64) -> GenResult<StageGeometry> {
        let geometry = self.geometry(stage)?;
        if group >= geometry.group_count() {
            return Err(GenError::Domain("butterfly group out of range"));
        }
        Ok(geometry)
    }

    /// Numerator `q` of the angle `-2*pi*q / 2^log2_n` for one sub-factor of a group.
    pub fn angle_index(&self, stage: u32, group: u64, sub: usize) -> GenResult<u64> {
        let geometry = self.locate(stage, group)?;
        if sub >= SUB_FACTORS {
            return Err(GenError::Domain("twiddle sub-factor out of range"));
        }
        let offset = group * (geometry.span / LOAD_GRANULARITY) * SUB_FACTORS as u64;
        let step = (1u64 << (self.log2_n - 3)) / geometry.group_count();
        Ok(offset + step * sub as u64)
    }

    /// The exact twiddle factor, before quantization.
    pub fn twiddle(&self, stage: u32, group: u64, sub: usize) -> GenResult<Complex64> {
        let q = self.angle_index(stage, group, sub)? as f64;
        let angle = -2.0 * PI * q / libm::ldexp(1.0, self.log2_n as i32);
        let (sin, cos) = libm::sincos(angle);
        Ok(Complex64::new(cos, sin))
    }

    /// The value as stored in the table: quantized to Q2.30, then negated for DIF.
    pub fn stored(&self, stage: u32, group: u64, sub: usize) -> GenResult<ComplexQ30> {
        let value = ComplexQ30::try_from_complex(self.twiddle(stage, group, sub)?)?;
        Ok(match self.variant {
            FftVariant::Dit => value,
            FftVariant::Dif => -value,
        })
    }

    /// `(stage, group)` pairs in table order: ascending stage, descending group.
    pub fn loads(self) -> impl Iterator<Item = (u32, u64)> {
        (0..self.stage_count()).flat_map(move |stage| {
            (0..self.group_count(stage)).rev().map(move |group| (stage, group))
        })
    }

    /// Index of the first entry of a group's quadruple.
    pub fn table_index(&self, stage: u32, group: u64) -> GenResult<usize> {
        let geometry = self.locate(stage, group)?;
        let before: u64 = (0..stage).map(|s| self.group_count(s)).sum();
        Ok((before + geometry.group_count() - 1 - group) as usize * SUB_FACTORS)
    }
}

#[cfg(test)]
#[path = "twiddle_tests.rs"]
mod tests;
