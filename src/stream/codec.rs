//! Byte layout of the serial link, shared by the device and its host.
//!
//! Both directions carry back-to-back little-endian 16-bit words with no
//! header, delimiter or checksum. Inbound words are signed Q12 samples,
//! outbound words are unsigned Q12 magnitudes.

use crate::common::FftError;

/// Splits a word into `[value % 256, value / 256]`.
#[inline]
pub const fn split_le(value: u16) -> [u8; 2] {
    value.to_le_bytes()
}

/// Host side: serializes raw Q-format samples into a frame.
/// Returns the number of bytes written (`2 * samples.len()`).
pub fn encode_samples(samples: &[i16], out: &mut [u8]) -> Result<usize, FftError> {
    let len = samples.len() * 2;
    if out.len() < len {
        return Err(FftError::BufferTooSmall);
    }

    for (chunk, &sample) in out.chunks_exact_mut(2).zip(samples) {
        chunk.copy_from_slice(&sample.to_le_bytes());
    }

    Ok(len)
}

/// Host side: reassembles magnitudes from the device's reply.
/// Returns the number of values decoded; a trailing odd byte is ignored.
pub fn decode_magnitudes(bytes: &[u8], out: &mut [u16]) -> usize {
    let mut count = 0;
    for (dst, pair) in out.iter_mut().zip(bytes.chunks_exact(2)) {
        *dst = u16::from_le_bytes([pair[0], pair[1]]);
        count += 1;
    }
    count
}

/// Centre frequency of `bin` in Hz for an `n`-point transform at `sample_rate`.
/// An empty transform (`n == 0`) has no bins and yields 0.
pub fn bin_frequency(bin: usize, n: usize, sample_rate: u32) -> u32 {
    if n == 0 {
        return 0;
    }
    ((bin as u64 * sample_rate as u64) / n as u64) as u32
}
