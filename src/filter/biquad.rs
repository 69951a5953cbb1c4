// src/filter/biquad.rs

use alloc::vec::Vec;
use log::debug;

use super::block::{pack, BiquadBlock};
use crate::common::{GenError, GenResult};
use crate::config::BiquadConfig;
use crate::fixed::{Q30, Q30_EXP};
use crate::quant::check_signs;

/// Coefficients per biquad section: `b0, b1, b2, -a1, -a2`.
pub const BIQUAD_COEF_COUNT: usize = 5;

/// Floating-point coefficients of one section, in `b0, b1, b2, -a1, -a2` order.
pub type SectionCoefficients = [f64; BIQUAD_COEF_COUNT];

/// One biquad section in Q2.30.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BiquadSection {
    pub coef: [Q30; BIQUAD_COEF_COUNT],
}

impl BiquadSection {
    /// Converts one section to Q2.30 after applying `scale`.
    ///
    /// There is no scale search: the format is always Q2.30, so any coefficient outside
    /// `[-2, 2)` after scaling is an overflow.
    pub fn from_coefficients(coefs: &SectionCoefficients, scale: f64) -> GenResult<Self> {
        let mut coef = [Q30::default(); BIQUAD_COEF_COUNT];
        let mut scaled = [0.0; BIQUAD_COEF_COUNT];
        let mut bits = [0i64; BIQUAD_COEF_COUNT];

        for j in 0..BIQUAD_COEF_COUNT {
            scaled[j] = coefs[j] * scale;
            coef[j] = Q30::try_from_f64(scaled[j])?;
            bits[j] = coef[j].to_bits() as i64;
        }
        check_signs(&scaled, &bits)?;

        Ok(Self { coef })
    }

    pub fn to_bits(&self) -> [i32; BIQUAD_COEF_COUNT] {
        self.coef.map(Q30::to_bits)
    }
}

/// Converts a cascade of sections to Q2.30.
///
/// Sign mismatches are reported with the flat index `section * 5 + coefficient`.
pub fn convert_sections(
    sections: &[SectionCoefficients],
    config: &BiquadConfig,
) -> GenResult<Vec<BiquadSection>> {
    if let Some(expected) = config.sections {
        if expected != sections.len() {
            return Err(GenError::InvalidInputSize { expected, found: sections.len() });
        }
    }
    if sections.is_empty() {
        return Err(GenError::Domain("no biquad sections"));
    }
    if !config.scale.is_finite() || config.scale <= 0.0 {
        return Err(GenError::Domain("biquad scale must be positive and finite"));
    }
    if sections.iter().flatten().any(|c| !c.is_finite()) {
        return Err(GenError::Domain("non-finite coefficient"));
    }

    sections
        .iter()
        .enumerate()
        .map(|(k, section)| {
            BiquadSection::from_coefficients(section, config.scale).map_err(|err| match err {
                GenError::SignMismatch { index } => {
                    GenError::SignMismatch { index: k * BIQUAD_COEF_COUNT + index }
                }
                other => other,
            })
        })
        .collect()
}

/// A biquad cascade ready for the 8-wide block kernel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BiquadFilter {
    pub blocks: Vec<BiquadBlock>,
    pub section_count: usize,
}

impl BiquadFilter {
    /// Exponent of the coefficients, shared by every section.
    pub const COEF_EXP: i32 = Q30_EXP;

    pub fn derive(sections: &[SectionCoefficients], config: &BiquadConfig) -> GenResult<Self> {
        let converted = convert_sections(sections, config)?;
        let blocks = pack(&converted)?;

        debug!(
            "biquad cascade: {} sections in {} blocks, scale {}",
            converted.len(),
            blocks.len(),
            config.scale
        );

        Ok(Self { blocks, section_count: converted.len() })
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }
}

#[cfg(test)]
#[path = "biquad_tests.rs"]
mod tests;
