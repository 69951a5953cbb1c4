// src/parse.rs

//! Coefficient lists as they appear in filter design exports.

use alloc::vec::Vec;
use core::str::FromStr;

use crate::common::{GenError, GenResult};
use crate::filter::biquad::{SectionCoefficients, BIQUAD_COEF_COUNT};

fn tokens(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| c == ',' || c.is_whitespace()).filter(|t| !t.is_empty())
}

fn parse_value(token: &str) -> GenResult<f64> {
    f64::from_str(token).map_err(|_| GenError::Domain("coefficient is not a number"))
}

/// Parses FIR taps separated by commas, whitespace or newlines.
pub fn parse_coefficients(text: &str) -> GenResult<Vec<f64>> {
    tokens(text).map(parse_value).collect()
}

/// Parses a biquad cascade, one section of `b0, b1, b2, -a1, -a2` per non-empty line.
pub fn parse_biquad_sections(text: &str) -> GenResult<Vec<SectionCoefficients>> {
    let mut sections = Vec::new();

    for line in text.lines() {
        let values = tokens(line).map(parse_value).collect::<GenResult<Vec<f64>>>()?;
        if values.is_empty() {
            continue;
        }
        let section: SectionCoefficients = values.as_slice().try_into().map_err(|_| {
            GenError::InvalidInputSize { expected: BIQUAD_COEF_COUNT, found: values.len() }
        })?;
        sections.push(section);
    }

    Ok(sections)
}
