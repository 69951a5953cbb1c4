// src/filter/block.rs

use alloc::vec::Vec;

use super::biquad::{BiquadSection, BIQUAD_COEF_COUNT};
use crate::common::{GenError, GenResult};

/// Sections processed together by one pass of the vectorized cascade kernel.
pub const BIQUAD_BLOCK_SIZE: usize = 8;

/// Up to eight biquad sections in the layout the block kernel reads.
///
/// Slots past `biquad_count` hold zero coefficients, so their lanes contribute nothing and the
/// kernel can run all eight lanes unconditionally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BiquadBlock {
    /// Active sections, in `1..=8`.
    pub biquad_count: usize,
    /// `state[j][k]` is `x[n-1-j]` of section `k`; column 8 holds the last section's outputs.
    pub state: [[i32; BIQUAD_BLOCK_SIZE + 1]; 2],
    /// `coef[j][k]` is coefficient `j` (`b0, b1, b2, -a1, -a2`) of section `k`.
    pub coef: [[i32; BIQUAD_BLOCK_SIZE]; BIQUAD_COEF_COUNT],
}

impl BiquadBlock {
    fn from_sections(sections: &[BiquadSection]) -> Self {
        debug_assert!(!sections.is_empty() && sections.len() <= BIQUAD_BLOCK_SIZE);

        let mut coef = [[0; BIQUAD_BLOCK_SIZE]; BIQUAD_COEF_COUNT];
        for (k, section) in sections.iter().enumerate() {
            for (j, value) in section.to_bits().into_iter().enumerate() {
                coef[j][k] = value;
            }
        }

        Self {
            biquad_count: sections.len(),
            state: [[0; BIQUAD_BLOCK_SIZE + 1]; 2],
            coef,
        }
    }

    /// Coefficients of section `k`, or `None` for an unused slot.
    pub fn section(&self, k: usize) -> Option<[i32; BIQUAD_COEF_COUNT]> {
        if k >= self.biquad_count {
            return None;
        }
        Some(core::array::from_fn(|j| self.coef[j][k]))
    }
}

/// Splits a cascade into consecutive blocks of at most eight sections, keeping their order.
pub fn pack(sections: &[BiquadSection]) -> GenResult<Vec<BiquadBlock>> {
    if sections.is_empty() {
        return Err(GenError::Domain("no biquad sections"));
    }
    Ok(sections.chunks(BIQUAD_BLOCK_SIZE).map(BiquadBlock::from_sections).collect())
}

#[cfg(test)]
#[path = "block_tests.rs"]
mod tests;
