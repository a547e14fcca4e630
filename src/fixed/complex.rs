use super::bitrev::log2_size;
use super::core::radix_2_dit_fft_core;
use super::types::ComplexFixed;
use crate::common::{FftError, FftProcess};

/// Forward complex FFT of a fixed size.
///
/// No tables are held: the bit-reversal lookup table is static and twiddle
/// factors are computed per butterfly group, so the engine is just the size.
/// The same instance can process buffers of any fractional precision.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CplxFft {
    n: usize,
    bits: u32,
}

impl CplxFft {
    /// Validates the transform size. `n` must be a power of two in `2..=MAX_FFT_SIZE`.
    pub fn new(n: usize) -> Result<Self, FftError> {
        let bits = log2_size(n)?;
        if n < 2 {
            return Err(FftError::SizeOutOfRange);
        }
        Ok(Self { n, bits })
    }

    pub fn size(&self) -> usize {
        self.n
    }

    /// Executes the forward FFT in-place, output scaled by 1/N.
    pub fn process<const FRAC: u32>(&self, buffer: &mut [ComplexFixed<FRAC>]) -> Result<(), FftError> {
        if buffer.len() != self.n {
            return Err(FftError::SizeMismatch);
        }

        radix_2_dit_fft_core(buffer, self.bits);

        Ok(())
    }
}

// Implement FftProcess for ANY fixed-point precision.
impl<const FRAC: u32> FftProcess<ComplexFixed<FRAC>> for CplxFft {
    fn process(&self, buffer: &mut [ComplexFixed<FRAC>]) -> Result<(), FftError> {
        CplxFft::process(self, buffer)
    }
}

#[cfg(test)]
#[path = "complex_tests.rs"]
mod tests;
