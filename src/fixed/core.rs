// src/fixed/core.rs

use super::bitrev::permute_unchecked;
use super::trig::{Angle, TAU, twiddle};
use super::types::ComplexFixed;

/// Radix-2 Decimation-in-Time forward FFT for fixed-point complex numbers.
///
/// `buffer.len()` must be `2^bits`; callers validate this.
///
/// Twiddles are generated per butterfly group from the stage angle increment,
/// which starts at -2*pi and halves every stage. Both butterfly outputs are
/// divided by 2, so the result is the DFT scaled by 1/N. Values that leave the
/// Q-format range wrap (see [`Fixed`](super::types::Fixed)).
pub(crate) fn radix_2_dit_fft_core<const FRAC: u32>(buffer: &mut [ComplexFixed<FRAC>], bits: u32) {
    let n = buffer.len();

    // 1. Bit-reverse permutation
    permute_unchecked(buffer, bits);

    // 2. Butterfly stages
    let mut delta: Angle = -TAU;
    let mut size = 2;

    while size <= n {
        delta = delta.scale_half();
        let half = size >> 1;

        for i in 0..half {
            // i * delta stays within [-pi, 0]
            let w = twiddle(Angle::from_bits(delta.to_bits() * i as i32));

            for j in (i..n).step_by(size) {
                let a = buffer[j];
                let b = buffer[j + half];

                // Butterfly: t = b * w
                let t = b * w;

                buffer[j] = (a + t).scale_half();
                buffer[j + half] = (a - t).scale_half();
            }
        }
        size <<= 1;
    }
}

#[cfg(test)]
#[path = "core_tests.rs"]
mod tests;
