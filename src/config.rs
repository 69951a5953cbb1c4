// src/config.rs

/// Parameters for deriving a fixed-point FIR filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FirConfig {
    /// Declared tap count. When set, it must match the number of coefficients supplied.
    pub taps: Option<usize>,
    /// Minimum number of redundant sign bits known to be present in every input sample.
    pub input_headroom: u32,
    /// Minimum number of redundant sign bits guaranteed in every output sample.
    pub output_headroom: u32,
}

/// Parameters for converting a biquad cascade to Q2.30.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BiquadConfig {
    /// Declared section count. When set, it must match the number of sections supplied.
    pub sections: Option<usize>,
    /// Factor applied to every coefficient before conversion, trading precision for headroom.
    pub scale: f64,
}

impl Default for BiquadConfig {
    fn default() -> Self {
        Self { sections: None, scale: 1.0 }
    }
}

/// FFT butterfly network topology a twiddle table is built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FftVariant {
    /// Decimation-in-time.
    Dit,
    /// Decimation-in-frequency.
    Dif,
}

/// Which twiddle tables a generator run produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VariantSelection {
    Dit,
    Dif,
    #[default]
    Both,
}

impl VariantSelection {
    pub fn includes(self, variant: FftVariant) -> bool {
        match self {
            VariantSelection::Both => true,
            VariantSelection::Dit => variant == FftVariant::Dit,
            VariantSelection::Dif => variant == FftVariant::Dif,
        }
    }
}

/// Parameters for the FFT twiddle table builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TwiddleConfig {
    /// Log2 of the largest transform the tables must support.
    pub max_log2_n: u32,
    pub variants: VariantSelection,
}

impl Default for TwiddleConfig {
    fn default() -> Self {
        Self { max_log2_n: 10, variants: VariantSelection::Both }
    }
}
