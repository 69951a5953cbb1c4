pub mod lut;
pub mod twiddle;

pub use lut::{dif_fft_origin, dit_real_fft_origin, FftLuts, TwiddleTable};
pub use twiddle::{TwiddleSchedule, MAX_FFT_LOG2, MIN_FFT_LOG2, TWIDDLE_EXP};
