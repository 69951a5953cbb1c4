// src/common.rs

/// Errors raised by the table and coefficient generators.
///
/// Every error is terminal for one generator invocation: nothing partial is returned.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum GenError {
    /// A declared tap/section count (or per-line value count) disagrees with the data supplied.
    InvalidInputSize { expected: usize, found: usize },
    /// A quantized value cannot be represented in its target width.
    Overflow,
    /// A quantized coefficient lost or flipped the sign of its source coefficient.
    SignMismatch { index: usize },
    /// Input rejected before any computation (sizes, empty or non-finite data, bad parameters).
    Domain(&'static str),
}

use core::fmt;

impl fmt::Display for GenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenError::InvalidInputSize { expected, found } => {
                write!(f, "Expected {} coefficients, found {}", expected, found)
            }
            GenError::Overflow => write!(f, "Quantized value does not fit the target width"),
            GenError::SignMismatch { index } => {
                write!(f, "Coefficient {} changed sign during quantization", index)
            }
            GenError::Domain(reason) => write!(f, "Invalid input: {}", reason),
        }
    }
}

pub type GenResult<T> = Result<T, GenError>;

#[cfg(feature = "std")]
impl std::error::Error for GenError {}
