// src/fft/lut.rs

use alloc::vec::Vec;
use core::mem::size_of;
use log::{debug, trace};

use super::twiddle::{TwiddleSchedule, MAX_FFT_LOG2, MIN_FFT_LOG2, SUB_FACTORS, TWIDDLE_EXP};
use crate::common::{GenError, GenResult};
use crate::config::{FftVariant, TwiddleConfig};
use crate::fixed::ComplexQ30;

/// Start of the real-FFT post-pass quadruples for a length-`n` transform in a DIT table.
///
/// The post-pass reads `table[n - 8..n - 4]` first and walks backwards `n / 16` quadruples,
/// so `n` must be a power of two of at least 16.
pub fn dit_real_fft_origin(n: usize) -> GenResult<usize> {
    if !n.is_power_of_two() || n < 16 {
        return Err(GenError::Domain("real FFT length must be a power of two of at least 16"));
    }
    Ok(n - 8)
}

/// Start of the sub-table a length-`n` transform uses in a DIF table built for `2^max_log2_n`.
pub fn dif_fft_origin(max_log2_n: u32, n: usize) -> GenResult<usize> {
    if !(MIN_FFT_LOG2..=MAX_FFT_LOG2).contains(&max_log2_n) {
        return Err(GenError::Domain("FFT table size out of range"));
    }
    let max = 1usize << max_log2_n;
    if !n.is_power_of_two() || n < 4 || n > max {
        return Err(GenError::Domain("transform length not covered by this table"));
    }
    Ok(max - n)
}

/// A complete twiddle look-up table for one FFT variant, in the order the kernel loads it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TwiddleTable {
    variant: FftVariant,
    max_log2_n: u32,
    entries: Vec<ComplexQ30>,
}

impl TwiddleTable {
    pub const EXPONENT: i32 = TWIDDLE_EXP;

    /// Builds the table serving every power-of-two transform up to `2^max_log2_n`.
    pub fn build(max_log2_n: u32, variant: FftVariant) -> GenResult<Self> {
        let schedule = TwiddleSchedule::new(max_log2_n, variant)?;

        let mut entries = Vec::with_capacity(schedule.entry_count());
        for (stage, group) in schedule.loads() {
            for sub in 0..SUB_FACTORS {
                entries.push(schedule.stored(stage, group, sub)?);
            }
            let first = schedule.angle_index(stage, group, 0)?;
            trace!("{:?} stage {} group {}: q = {}..", variant, stage, group, first);
        }
        debug_assert_eq!(entries.len(), schedule.entry_count());

        debug!(
            "{:?} twiddle table for 2^{}: {} entries, {} bytes",
            variant,
            max_log2_n,
            entries.len(),
            entries.len() * size_of::<ComplexQ30>()
        );

        Ok(Self { variant, max_log2_n, entries })
    }

    #[inline]
    pub fn variant(&self) -> FftVariant {
        self.variant
    }

    #[inline]
    pub fn max_log2_n(&self) -> u32 {
        self.max_log2_n
    }

    #[inline]
    pub fn max_fft_len(&self) -> usize {
        1 << self.max_log2_n
    }

    #[inline]
    pub fn entries(&self) -> &[ComplexQ30] {
        &self.entries
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Storage size, 8 bytes per complex entry.
    #[inline]
    pub fn size_bytes(&self) -> usize {
        self.entries.len() * size_of::<ComplexQ30>()
    }

    #[inline]
    pub fn exponent(&self) -> i32 {
        Self::EXPONENT
    }

    /// Raw `(re, im)` pairs, ready to be emitted.
    pub fn to_bits(&self) -> Vec<(i32, i32)> {
        self.entries.iter().map(|e| e.to_bits()).collect()
    }

    /// Entries a complex transform of length `n` walks through.
    ///
    /// A DIT table for a smaller size is a prefix of the larger one, so DIT always starts at
    /// index 0. DIF starts at [`dif_fft_origin`]. Length 4 needs no entries.
    pub fn for_fft(&self, n: usize) -> GenResult<&[ComplexQ30]> {
        self.check_len(n, 4)?;
        Ok(match self.variant {
            FftVariant::Dit => &self.entries[..n - SUB_FACTORS],
            FftVariant::Dif => &self.entries[dif_fft_origin(self.max_log2_n, n)?..],
        })
    }

    /// The `n / 4` entries the real-FFT post-pass of length `n` reads, ending with the quadruple
    /// at [`dit_real_fft_origin`].
    pub fn real_fft_window(&self, n: usize) -> GenResult<&[ComplexQ30]> {
        if self.variant != FftVariant::Dit {
            return Err(GenError::Domain("real FFT post-pass reads the DIT table"));
        }
        self.check_len(n, 16)?;
        let end = dit_real_fft_origin(n)? + SUB_FACTORS;
        Ok(&self.entries[end - n / 4..end])
    }

    fn check_len(&self, n: usize, min: usize) -> GenResult<()> {
        if !n.is_power_of_two() || n < min || n > self.max_fft_len() {
            return Err(GenError::Domain("transform length not covered by this table"));
        }
        Ok(())
    }
}

/// The tables one generator run produces.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FftLuts {
    pub dit: Option<TwiddleTable>,
    pub dif: Option<TwiddleTable>,
}

impl FftLuts {
    pub fn generate(config: &TwiddleConfig) -> GenResult<Self> {
        let build = |variant| {
            if config.variants.includes(variant) {
                TwiddleTable::build(config.max_log2_n, variant).map(Some)
            } else {
                Ok(None)
            }
        };

        Ok(Self {
            dit: build(FftVariant::Dit)?,
            dif: build(FftVariant::Dif)?,
        })
    }

    pub fn get(&self, variant: FftVariant) -> Option<&TwiddleTable> {
        match variant {
            FftVariant::Dit => self.dit.as_ref(),
            FftVariant::Dif => self.dif.as_ref(),
        }
    }
}

#[cfg(test)]
#[path = "lut_tests.rs"]
mod tests;
