use super::bitrev::log2_size;
use super::complex::CplxFft;
use super::trig::{Angle, TAU, twiddle};
use super::types::{ComplexFixed, Fixed};
use crate::common::{FftError, FftProcess};

/// Forward FFT of `n` real samples computed with an `n/2`-point complex FFT.
///
/// Even samples go to the real part and odd samples to the imaginary part of
/// the half-size transform; a split pass then separates the two spectra. The
/// output keeps the same 1/n scaling as [`CplxFft`], packed as:
/// - `spectrum[0].re` = DC (frequency 0)
/// - `spectrum[0].im` = Nyquist (frequency n/2)
/// - `spectrum[1..n/2]` = positive frequencies
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RealFft {
    n: usize,
    half: CplxFft,
}

impl RealFft {
    /// Note that 'n' here is the number of REAL samples, a power of two `>= 4`.
    pub fn new(n: usize) -> Result<Self, FftError> {
        log2_size(n)?;
        if n < 4 {
            return Err(FftError::SizeOutOfRange);
        }

        Ok(Self {
            n,
            half: CplxFft::new(n / 2)?,
        })
    }

    pub fn size(&self) -> usize {
        self.n
    }

    /// Transforms `input` (n samples) into `spectrum` (n/2 packed bins).
    pub fn process<const FRAC: u32>(
        &self,
        input: &[Fixed<FRAC>],
        spectrum: &mut [ComplexFixed<FRAC>],
    ) -> Result<(), FftError> {
        if input.len() != self.n || spectrum.len() != self.n / 2 {
            return Err(FftError::SizeMismatch);
        }

        for (dst, pair) in spectrum.iter_mut().zip(input.chunks_exact(2)) {
            *dst = ComplexFixed::new(pair[0], pair[1]);
        }

        self.process_packed(spectrum)
    }

    /// Same as [`process`](Self::process) on a buffer already holding
    /// `(x[2m], x[2m+1])` in element `m`.
    pub fn process_packed<const FRAC: u32>(&self, buffer: &mut [ComplexFixed<FRAC>]) -> Result<(), FftError> {
        if buffer.len() != self.n / 2 {
            return Err(FftError::SizeMismatch);
        }

        // Scaled by 2/n at this point
        self.half.process(buffer)?;

        let n_half = self.n / 2;
        let n_quarter = n_half / 2;

        // DC = even.re + odd.re, Nyquist = even.re - odd.re, both halved
        {
            let val = buffer[0];
            let dc = (val.re + val.im).scale_half();
            let nyquist = (val.re - val.im).scale_half();
            buffer[0] = ComplexFixed::new(dc, nyquist);
        }

        // Twiddle at n/4 is -i, which reduces the split to a conjugate
        buffer[n_quarter] = buffer[n_quarter].conj().scale_half();

        for k in 1..n_quarter {
            let idx_a = k;
            let idx_b = n_half - k;

            let val_a = buffer[idx_a];
            let val_b_conj = buffer[idx_b].conj();

            // even = (z[k] + conj(z[n/2-k])) / 2
            let even = (val_a + val_b_conj).scale_half();

            // odd = (z[k] - conj(z[n/2-k])) / 2i
            let odd = (val_a - val_b_conj).scale_half().mul_neg_i();

            let t = odd * twiddle(self.bin_angle(k));

            // X[k] = even + w^k odd, X[n/2-k] = conj(even - w^k odd)
            buffer[idx_a] = (even + t).scale_half();
            buffer[idx_b] = (even - t).conj().scale_half();
        }

        Ok(())
    }

    /// -2*pi*k/n, rounded once rather than accumulated.
    fn bin_angle(&self, k: usize) -> Angle {
        let raw = -(TAU.to_bits() as i64 * k as i64) / self.n as i64;
        Angle::from_bits(raw as i32)
    }
}

impl<const FRAC: u32> FftProcess<ComplexFixed<FRAC>> for RealFft {
    fn process(&self, buffer: &mut [ComplexFixed<FRAC>]) -> Result<(), FftError> {
        self.process_packed(buffer)
    }
}

#[cfg(test)]
#[path = "real_tests.rs"]
mod tests;
