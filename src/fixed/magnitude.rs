//! Complex bin to magnitude conversion.

use super::types::{ComplexFixed, Fixed};
use crate::common::FftError;

/// How bin magnitudes are computed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MagnitudeMode {
    /// `sqrt(re^2 + im^2)` with an integer square root.
    #[default]
    Exact,
    /// `15/16 * max + 15/32 * min` of `|re|` and `|im|`, within about 6.3% of exact.
    AlphaMaxBetaMin,
}

/// Magnitude of one bin, in the bin's own Q-format.
///
/// Squaring the raw values yields a Q(2*FRAC) number, and its integer square
/// root is back in Q(FRAC), so no rescale is needed.
pub fn magnitude<const FRAC: u32>(bin: ComplexFixed<FRAC>, mode: MagnitudeMode) -> Fixed<FRAC> {
    let re = (bin.re.to_bits() as i64).unsigned_abs();
    let im = (bin.im.to_bits() as i64).unsigned_abs();

    let mag = match mode {
        MagnitudeMode::Exact => (re * re + im * im).isqrt(),
        MagnitudeMode::AlphaMaxBetaMin => {
            let (max, min) = if re > im { (re, im) } else { (im, re) };
            (15 * max) / 16 + (15 * min) / 32
        }
    };

    Fixed::from_bits(mag.min(i32::MAX as u64) as i32)
}

/// Raw magnitude clamped into the 16-bit unsigned wire range.
#[inline]
pub fn to_wire<const FRAC: u32>(mag: Fixed<FRAC>) -> u16 {
    mag.to_bits().clamp(0, u16::MAX as i32) as u16
}

/// Writes the magnitudes of the first `out.len()` bins into `out`.
///
/// The output buffer is separate from the complex bins, so nothing is aliased.
pub fn extract_magnitudes<const FRAC: u32>(
    bins: &[ComplexFixed<FRAC>],
    out: &mut [u16],
    mode: MagnitudeMode,
) -> Result<(), FftError> {
    if out.len() > bins.len() {
        return Err(FftError::SizeMismatch);
    }

    for (dst, &bin) in out.iter_mut().zip(bins) {
        *dst = to_wire(magnitude(bin, mode));
    }

    Ok(())
}
